//! Test framework setup

use crate::install::Script;
use clap::ValueEnum;
use std::fmt;

const VITEST_CONFIG: &str = r#"import { defineConfig } from "vitest/config";

export default defineConfig({
  test: {
    include: ["**/*.{test,spec}.?(c|m)[jt]s?(x)"],
  },
});
"#;

const JEST_CONFIG: &str = "{\n  \"testEnvironment\": \"node\"\n}\n";

const MOCHA_CONFIG: &str = "{\n  \"spec\": \"test/**/*.test.{js,mjs,cjs}\"\n}\n";

const PLAYWRIGHT_CONFIG: &str = r#"import { defineConfig, devices } from "@playwright/test";

export default defineConfig({
  testDir: "./tests",
  reporter: "list",
  projects: [{ name: "chromium", use: { ...devices["Desktop Chrome"] } }],
});
"#;

/// Testing tools offered after installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TestFramework {
    Vitest,
    Jest,
    Mocha,
    Playwright,
    /// Skip test setup
    #[value(name = "none", alias = "skip")]
    Skip,
}

impl TestFramework {
    pub const ALL: [TestFramework; 5] = [
        TestFramework::Vitest,
        TestFramework::Jest,
        TestFramework::Mocha,
        TestFramework::Playwright,
        TestFramework::Skip,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TestFramework::Vitest => "Vitest",
            TestFramework::Jest => "Jest",
            TestFramework::Mocha => "Mocha",
            TestFramework::Playwright => "Playwright",
            TestFramework::Skip => "Skip",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            TestFramework::Vitest => "fast unit tests, Vite-native",
            TestFramework::Jest => "batteries-included unit tests",
            TestFramework::Mocha => "minimal test runner",
            TestFramework::Playwright => "end-to-end browser tests",
            TestFramework::Skip => "set up testing later",
        }
    }

    pub fn install_script(&self) -> Script {
        match self {
            TestFramework::Vitest => Script::new(["npm install --save-dev vitest"]),
            TestFramework::Jest => Script::new(["npm install --save-dev jest"]),
            TestFramework::Mocha => Script::new(["npm install --save-dev mocha"]),
            TestFramework::Playwright => Script::new([
                "npm install --save-dev @playwright/test",
                "npx playwright install",
            ]),
            TestFramework::Skip => Script::default(),
        }
    }

    /// Config file written when absent
    pub fn config_artifact(&self) -> Option<(&'static str, &'static str)> {
        match self {
            TestFramework::Vitest => Some(("vitest.config.mjs", VITEST_CONFIG)),
            TestFramework::Jest => Some(("jest.config.json", JEST_CONFIG)),
            TestFramework::Mocha => Some((".mocharc.json", MOCHA_CONFIG)),
            TestFramework::Playwright => Some(("playwright.config.ts", PLAYWRIGHT_CONFIG)),
            TestFramework::Skip => None,
        }
    }

    pub fn test_script(&self) -> Option<&'static str> {
        match self {
            TestFramework::Vitest => Some("vitest run"),
            TestFramework::Jest => Some("jest"),
            TestFramework::Mocha => Some("mocha"),
            TestFramework::Playwright => Some("playwright test"),
            TestFramework::Skip => None,
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_has_nothing_to_do() {
        assert!(TestFramework::Skip.install_script().is_empty());
        assert!(TestFramework::Skip.config_artifact().is_none());
        assert!(TestFramework::Skip.test_script().is_none());
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(
            TestFramework::from_str("none", true).unwrap(),
            TestFramework::Skip
        );
        assert_eq!(
            TestFramework::from_str("Vitest", true).unwrap(),
            TestFramework::Vitest
        );
    }
}
