//! Project templates and config artifact writing
//!
//! This module provides:
//! - [`Template`]: the user's choice, either a plain language setup or a framework
//! - Plain language setups (TypeScript, JavaScript)
//! - The fill-if-absent config writer shared by every template

pub mod language;
pub mod writer;

pub use language::Language;
pub use writer::{fill_if_absent, is_falsy, ArtifactAction, ConfigReport, ConfigWriter};

use crate::error::Result;
use crate::frameworks::Framework;
use crate::install::{InstallCommandSet, InstallationStrategy, ProjectTarget};
use crate::runtime::Runtime;
use std::fmt;
use std::str::FromStr;

/// What the user wants to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Language(Language),
    Framework(Framework),
}

impl Template {
    pub fn display_name(&self) -> &'static str {
        match self {
            Template::Language(lang) => lang.display_name(),
            Template::Framework(fw) => fw.descriptor().display_name,
        }
    }

    /// Registry package whose versions are offered, if the template is versioned
    pub fn package(&self) -> Option<&'static str> {
        match self {
            Template::Language(_) => None,
            Template::Framework(fw) => Some(fw.descriptor().package),
        }
    }

    pub fn prerequisites(&self) -> &'static [Runtime] {
        match self {
            Template::Language(lang) => lang.prerequisites(),
            Template::Framework(fw) => fw.descriptor().prerequisites,
        }
    }

    /// Install variants for this invocation; `version` is ignored by languages
    pub fn install_commands(&self, version: &str, target: &ProjectTarget) -> InstallCommandSet {
        match self {
            Template::Language(lang) => lang.install_commands(),
            Template::Framework(fw) => fw.install_commands(version, target),
        }
    }

    /// Create or patch config artifacts after the install commands ran
    pub fn setup_config(
        &self,
        writer: &mut ConfigWriter,
        target: &ProjectTarget,
        strategy: InstallationStrategy,
    ) -> Result<()> {
        match self {
            Template::Language(lang) => lang.setup_config(writer, target),
            Template::Framework(fw) => fw.setup_config(writer, target, strategy),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(lang) = Language::parse(s) {
            return Ok(Template::Language(lang));
        }
        if let Some(fw) = Framework::parse(s) {
            return Ok(Template::Framework(fw));
        }
        let known: Vec<&str> = Language::ALL
            .iter()
            .map(|l| l.id())
            .chain(Framework::ALL.iter().map(|f| f.id()))
            .collect();
        Err(format!(
            "unknown template '{}' (expected one of: {})",
            s,
            known.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_templates() {
        assert_eq!(
            "ts".parse::<Template>().unwrap(),
            Template::Language(Language::TypeScript)
        );
        assert_eq!(
            "JavaScript".parse::<Template>().unwrap(),
            Template::Language(Language::JavaScript)
        );
        assert_eq!(
            "nextjs".parse::<Template>().unwrap(),
            Template::Framework(Framework::NextJs)
        );
    }

    #[test]
    fn test_parse_unknown_lists_choices() {
        let err = "rails".parse::<Template>().unwrap_err();
        assert!(err.contains("rails"));
        assert!(err.contains("next"));
        assert!(err.contains("ts"));
    }

    #[test]
    fn test_languages_are_unversioned() {
        assert!(Template::Language(Language::TypeScript).package().is_none());
        assert_eq!(
            Template::Framework(Framework::Angular).package(),
            Some("@angular/cli")
        );
    }
}
