//! ESLint and Prettier setup

use crate::install::Script;
use serde_json::Value;
use std::fmt;
use std::path::Path;

const ESLINT_CONFIG: &str = r#"import js from "@eslint/js";

export default [
  js.configs.recommended,
  {
    ignores: ["dist/", "build/", ".next/", ".nuxt/", ".output/"],
  },
];
"#;

const PRETTIER_CONFIG: &str = "{\n  \"singleQuote\": false,\n  \"trailingComma\": \"all\"\n}\n";

const PRETTIER_IGNORE: &str = "node_modules\ndist\nbuild\n.next\n.nuxt\n.output\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintTool {
    Eslint,
    Prettier,
}

impl LintTool {
    pub const ALL: [LintTool; 2] = [LintTool::Eslint, LintTool::Prettier];

    pub fn display_name(&self) -> &'static str {
        match self {
            LintTool::Eslint => "ESLint",
            LintTool::Prettier => "Prettier",
        }
    }

    /// Config file names that mean the tool is already set up
    pub fn config_files(&self) -> &'static [&'static str] {
        match self {
            LintTool::Eslint => &[
                "eslint.config.js",
                "eslint.config.mjs",
                "eslint.config.cjs",
                "eslint.config.ts",
                ".eslintrc",
                ".eslintrc.js",
                ".eslintrc.cjs",
                ".eslintrc.json",
                ".eslintrc.yaml",
                ".eslintrc.yml",
            ],
            LintTool::Prettier => &[
                ".prettierrc",
                ".prettierrc.json",
                ".prettierrc.json5",
                ".prettierrc.yaml",
                ".prettierrc.yml",
                ".prettierrc.toml",
                ".prettierrc.js",
                ".prettierrc.cjs",
                ".prettierrc.mjs",
                "prettier.config.js",
                "prettier.config.cjs",
                "prettier.config.mjs",
            ],
        }
    }

    /// `package.json` key that can hold the tool's config inline
    fn package_json_key(&self) -> &'static str {
        match self {
            LintTool::Eslint => "eslintConfig",
            LintTool::Prettier => "prettier",
        }
    }

    pub fn is_configured(&self, root: &Path) -> bool {
        if self.config_files().iter().any(|f| root.join(f).exists()) {
            return true;
        }
        std::fs::read_to_string(root.join("package.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|pkg| pkg.get(self.package_json_key()).cloned())
            .is_some_and(|v| !crate::templates::is_falsy(&v))
    }

    pub fn install_script(&self) -> Script {
        match self {
            LintTool::Eslint => Script::new(["npm install --save-dev eslint @eslint/js"]),
            LintTool::Prettier => Script::new(["npm install --save-dev --save-exact prettier"]),
        }
    }

    /// Files written when absent
    pub fn config_artifacts(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            LintTool::Eslint => &[("eslint.config.mjs", ESLINT_CONFIG)],
            LintTool::Prettier => &[
                (".prettierrc.json", PRETTIER_CONFIG),
                (".prettierignore", PRETTIER_IGNORE),
            ],
        }
    }

    pub fn scripts(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            LintTool::Eslint => &[("lint", "eslint .")],
            LintTool::Prettier => &[("format", "prettier --write .")],
        }
    }
}

impl fmt::Display for LintTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detects_legacy_eslintrc() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!LintTool::Eslint.is_configured(tmp.path()));
        fs::write(tmp.path().join(".eslintrc.json"), "{}").unwrap();
        assert!(LintTool::Eslint.is_configured(tmp.path()));
        assert!(!LintTool::Prettier.is_configured(tmp.path()));
    }

    #[test]
    fn test_detects_inline_package_json_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("package.json"),
            r#"{ "prettier": { "semi": false }, "eslintConfig": null }"#,
        )
        .unwrap();
        assert!(LintTool::Prettier.is_configured(tmp.path()));
        assert!(!LintTool::Eslint.is_configured(tmp.path()));
    }
}
