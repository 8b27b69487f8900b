//! Installation planning and execution
//!
//! This module provides:
//! - [`Script`]: an ordered list of shell statements, built once per template
//! - [`InstallCommandSet`]: the global/local/manual variants a template declares
//! - [`strategy`]: the state machine choosing which variant runs
//! - [`executor`]: sequential statement execution with stop-on-first-failure

pub mod executor;
pub mod strategy;

pub use executor::{Executor, ShellRunner, StepRunner, StepStatus};
pub use strategy::{select_strategy, StrategyDecision, StrategyOptions};

use crate::error::{Result, SetupError};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// Project name used when the target path has no usable final component
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Quote a shell argument when it contains anything beyond a safe set
pub fn shell_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./@:=+,".contains(c));
    if safe {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// How a template gets installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum InstallationStrategy {
    /// Install the scaffolding CLI globally, then generate from the invocation directory
    Global,
    /// Run the scaffolding CLI through npx inside the target directory
    Local,
    /// Install packages into an existing directory and write config by hand
    Manual,
    #[value(skip)]
    Skip,
}

impl InstallationStrategy {
    /// Variants in selection priority order
    pub const PRIORITY: [InstallationStrategy; 3] = [
        InstallationStrategy::Global,
        InstallationStrategy::Local,
        InstallationStrategy::Manual,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationStrategy::Global => "Global",
            InstallationStrategy::Local => "Local",
            InstallationStrategy::Manual => "Manual",
            InstallationStrategy::Skip => "Skip",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            InstallationStrategy::Global => "install the CLI globally, then generate",
            InstallationStrategy::Local => "run the generator with npx",
            InstallationStrategy::Manual => "add packages to an existing directory",
            InstallationStrategy::Skip => "go back without installing",
        }
    }
}

impl fmt::Display for InstallationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An ordered list of shell statements, each run as its own subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<String>,
}

impl Script {
    /// Build a script from statements; blank statements are dropped
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps
                .into_iter()
                .map(Into::into)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.join(" && "))
    }
}

/// The install variants a template declares for one invocation
///
/// An unset (or empty) variant means the strategy is unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallCommandSet {
    global: Option<Script>,
    local: Option<Script>,
    manual: Option<Script>,
}

impl InstallCommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, script: Script) -> Self {
        self.global = Some(script);
        self
    }

    pub fn with_local(mut self, script: Script) -> Self {
        self.local = Some(script);
        self
    }

    pub fn with_manual(mut self, script: Script) -> Self {
        self.manual = Some(script);
        self
    }

    /// The script for a strategy, if declared and non-empty
    pub fn get(&self, strategy: InstallationStrategy) -> Option<&Script> {
        let script = match strategy {
            InstallationStrategy::Global => self.global.as_ref(),
            InstallationStrategy::Local => self.local.as_ref(),
            InstallationStrategy::Manual => self.manual.as_ref(),
            InstallationStrategy::Skip => None,
        };
        script.filter(|s| !s.is_empty())
    }

    pub fn supports(&self, strategy: InstallationStrategy) -> bool {
        self.get(strategy).is_some()
    }

    /// Declared strategies in priority order
    pub fn available(&self) -> Vec<InstallationStrategy> {
        InstallationStrategy::PRIORITY
            .into_iter()
            .filter(|s| self.supports(*s))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.available().is_empty()
    }
}

/// Where the project goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    pub name: String,
    pub path: PathBuf,
}

impl ProjectTarget {
    /// Resolve user input against the invocation directory
    ///
    /// Empty input or `.` targets the invocation directory itself.
    pub fn resolve(invocation_dir: &Path, input: &str) -> Self {
        let input = input.trim();
        let path = if input.is_empty() || input == "." {
            invocation_dir.to_path_buf()
        } else {
            let p = PathBuf::from(input);
            if p.is_absolute() {
                p
            } else {
                invocation_dir.join(p)
            }
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            .unwrap_or(DEFAULT_PROJECT_NAME)
            .to_string();

        Self { name, path }
    }

    /// The name in a form npm and framework generators accept
    pub fn package_name(&self) -> String {
        let name: String = self
            .name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let name = name.trim_matches(|c| c == '-' || c == '_');
        if name.is_empty() {
            DEFAULT_PROJECT_NAME.to_string()
        } else {
            name.to_string()
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Whether an existing target holds any entries
    pub fn is_empty_dir(&self) -> Result<bool> {
        if !self.path.is_dir() {
            return Err(SetupError::io(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::Other, "target exists but is not a directory"),
            ));
        }
        let mut entries =
            std::fs::read_dir(&self.path).map_err(|e| SetupError::io(&self.path, e))?;
        Ok(entries.next().is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_arg() {
        assert_eq!(shell_arg("my-app"), "my-app");
        assert_eq!(shell_arg("/home/me/My Sites"), "\"/home/me/My Sites\"");
        assert_eq!(shell_arg("a$b"), "\"a\\$b\"");
        assert_eq!(shell_arg(""), "\"\"");
    }

    #[test]
    fn test_script_drops_blank_statements() {
        let script = Script::new(["npm init -y", "  ", "", "  npm install next  "]);
        assert_eq!(script.steps(), ["npm init -y", "npm install next"]);
        assert_eq!(script.to_string(), "npm init -y && npm install next");
    }

    #[test]
    fn test_empty_variant_is_unsupported() {
        let set = InstallCommandSet::new()
            .with_global(Script::new(Vec::<String>::new()))
            .with_local(Script::new(["npx create-next-app@14.2.3 ."]));
        assert!(!set.supports(InstallationStrategy::Global));
        assert_eq!(set.available(), [InstallationStrategy::Local]);
    }

    #[test]
    fn test_available_priority_order() {
        let set = InstallCommandSet::new()
            .with_manual(Script::new(["c"]))
            .with_local(Script::new(["b"]))
            .with_global(Script::new(["a"]));
        assert_eq!(
            set.available(),
            [
                InstallationStrategy::Global,
                InstallationStrategy::Local,
                InstallationStrategy::Manual
            ]
        );
        assert!(set.get(InstallationStrategy::Skip).is_none());
    }

    #[test]
    fn test_resolve_relative_target() {
        let target = ProjectTarget::resolve(Path::new("/work"), "./my-app");
        assert_eq!(target.name, "my-app");
        assert_eq!(target.path, Path::new("/work/./my-app"));
    }

    #[test]
    fn test_resolve_absolute_target() {
        let target = ProjectTarget::resolve(Path::new("/work"), "/srv/sites/blog");
        assert_eq!(target.name, "blog");
        assert_eq!(target.path, Path::new("/srv/sites/blog"));
    }

    #[test]
    fn test_resolve_dot_uses_invocation_dir() {
        let target = ProjectTarget::resolve(Path::new("/work/shop"), ".");
        assert_eq!(target.name, "shop");
        assert_eq!(target.path, Path::new("/work/shop"));
    }

    #[test]
    fn test_package_name_is_npm_safe() {
        let target = ProjectTarget::resolve(Path::new("/work"), "My Shop.v2");
        assert_eq!(target.name, "My Shop.v2");
        assert_eq!(target.package_name(), "my-shop-v2");

        let target = ProjectTarget::resolve(Path::new("/work"), "_.");
        assert_eq!(target.package_name(), DEFAULT_PROJECT_NAME);
    }

    #[test]
    fn test_is_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve(tmp.path(), ".");
        assert!(target.is_empty_dir().unwrap());

        std::fs::write(tmp.path().join("README.md"), "hi").unwrap();
        assert!(!target.is_empty_dir().unwrap());
    }

    #[test]
    fn test_is_empty_dir_rejects_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("app"), "").unwrap();
        let target = ProjectTarget::resolve(tmp.path(), "app");
        assert!(target.is_empty_dir().is_err());
    }
}
