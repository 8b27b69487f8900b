//! Linting and testing setup after a successful install
//!
//! Runs as two independent steps. A failure in either is reported as a
//! warning and never undoes or fails the installation that preceded it.

pub mod lint;
pub mod testing;

pub use lint::LintTool;
pub use testing::TestFramework;

use crate::error::{Result, SetupError};
use crate::install::{Executor, StepRunner};
use crate::prompt::{LogLevel, Prompter, SelectItem};
use crate::templates::{ConfigReport, ConfigWriter};
use std::path::Path;
use tracing::warn;

/// Answers that let a non-interactive run skip the post-setup prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct PostSetupOptions {
    /// Set up linting without asking (`Some(false)` declines)
    pub lint: Option<bool>,
    pub test_framework: Option<TestFramework>,
    pub assume_yes: bool,
}

/// How one post-setup step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// Installed, but some config artifacts were left as they were
    Incomplete(String),
    AlreadyConfigured,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSetupSummary {
    pub lint: Vec<(LintTool, StepOutcome)>,
    pub testing: (TestFramework, StepOutcome),
}

impl PostSetupSummary {
    pub fn has_failures(&self) -> bool {
        self.lint
            .iter()
            .map(|(_, o)| o)
            .chain(std::iter::once(&self.testing.1))
            .any(|o| matches!(o, StepOutcome::Failed(_)))
    }

    /// Failed steps, or steps that left config untouched
    pub fn has_warnings(&self) -> bool {
        self.lint
            .iter()
            .map(|(_, o)| o)
            .chain(std::iter::once(&self.testing.1))
            .any(|o| matches!(o, StepOutcome::Failed(_) | StepOutcome::Incomplete(_)))
    }
}

/// Offer lint tooling, then a test framework, in `root`
pub fn run_post_setup<P: Prompter, R: StepRunner>(
    root: &Path,
    executor: &mut Executor<R>,
    prompter: &mut P,
    options: PostSetupOptions,
) -> PostSetupSummary {
    let lint = setup_linting(root, executor, prompter, options);
    let testing = setup_testing(root, executor, prompter, options);
    PostSetupSummary { lint, testing }
}

fn notify<P: Prompter>(prompter: &mut P, level: LogLevel, message: &str) {
    if let Err(e) = prompter.log(level, message) {
        warn!("failed to show message ({}): {}", e, message);
    }
}

/// Surface skipped artifacts and turn the step result into an outcome
fn conclude<P: Prompter>(
    prompter: &mut P,
    name: &str,
    result: Result<ConfigReport>,
) -> StepOutcome {
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            let msg = format!("{} setup failed: {}", name, e);
            notify(prompter, LogLevel::Warning, &msg);
            return StepOutcome::Failed(msg);
        }
    };

    let skipped: Vec<String> = report
        .skipped()
        .map(|(path, reason)| format!("{}: {}", path.display(), reason))
        .collect();
    if skipped.is_empty() {
        notify(prompter, LogLevel::Success, &format!("{} configured", name));
        return StepOutcome::Completed;
    }

    for line in &skipped {
        notify(
            prompter,
            LogLevel::Warning,
            &format!("{}, left unchanged", line),
        );
    }
    let msg = format!(
        "{} installed; config left unchanged ({})",
        name,
        skipped.join("; ")
    );
    notify(prompter, LogLevel::Warning, &msg);
    StepOutcome::Incomplete(msg)
}

fn setup_linting<P: Prompter, R: StepRunner>(
    root: &Path,
    executor: &mut Executor<R>,
    prompter: &mut P,
    options: PostSetupOptions,
) -> Vec<(LintTool, StepOutcome)> {
    let mut outcomes = Vec::new();
    let mut pending = Vec::new();

    for tool in LintTool::ALL {
        if tool.is_configured(root) {
            notify(
                prompter,
                LogLevel::Info,
                &format!("{} is already configured; skipping", tool),
            );
            outcomes.push((tool, StepOutcome::AlreadyConfigured));
        } else {
            pending.push(tool);
        }
    }

    if pending.is_empty() {
        return outcomes;
    }

    let names: Vec<&str> = pending.iter().map(|t| t.display_name()).collect();
    let wanted = match options.lint {
        Some(answer) => Ok(answer),
        None if options.assume_yes => Ok(true),
        None => prompter.confirm(&format!("Set up {}?", names.join(" and ")), true),
    };

    let wanted = match wanted {
        Ok(w) => w,
        Err(e) => {
            let msg = format!("Lint setup failed: {}", SetupError::Prompt(e));
            notify(prompter, LogLevel::Warning, &msg);
            outcomes.extend(pending.into_iter().map(|t| (t, StepOutcome::Failed(msg.clone()))));
            return outcomes;
        }
    };

    for tool in pending {
        if !wanted {
            outcomes.push((tool, StepOutcome::Skipped));
            continue;
        }
        let result = install_lint_tool(tool, root, executor);
        let outcome = conclude(prompter, tool.display_name(), result);
        outcomes.push((tool, outcome));
    }

    outcomes
}

fn install_lint_tool<R: StepRunner>(
    tool: LintTool,
    root: &Path,
    executor: &mut Executor<R>,
) -> Result<ConfigReport> {
    executor.run_script(&tool.install_script(), root)?;
    let mut writer = ConfigWriter::new(root);
    for (file, contents) in tool.config_artifacts() {
        writer.write_if_absent(file, contents)?;
    }
    writer.patch_package_json(&[], tool.scripts())?;
    Ok(writer.into_report())
}

fn setup_testing<P: Prompter, R: StepRunner>(
    root: &Path,
    executor: &mut Executor<R>,
    prompter: &mut P,
    options: PostSetupOptions,
) -> (TestFramework, StepOutcome) {
    let choice = match options.test_framework {
        Some(fw) => Ok(fw),
        None if options.assume_yes => Ok(TestFramework::Skip),
        None => {
            let items: Vec<SelectItem> = TestFramework::ALL
                .iter()
                .map(|fw| SelectItem::new(fw.display_name(), fw.hint()))
                .collect();
            prompter
                .select("Choose a testing framework", &items)
                .map(|idx| TestFramework::ALL[idx])
        }
    };

    let framework = match choice {
        Ok(fw) => fw,
        Err(e) => {
            let msg = format!("Test setup failed: {}", SetupError::Prompt(e));
            notify(prompter, LogLevel::Warning, &msg);
            return (TestFramework::Skip, StepOutcome::Failed(msg));
        }
    };

    if framework == TestFramework::Skip {
        return (framework, StepOutcome::Skipped);
    }

    let result = install_test_framework(framework, root, executor);
    (framework, conclude(prompter, framework.display_name(), result))
}

fn install_test_framework<R: StepRunner>(
    framework: TestFramework,
    root: &Path,
    executor: &mut Executor<R>,
) -> Result<ConfigReport> {
    executor.run_script(&framework.install_script(), root)?;
    let mut writer = ConfigWriter::new(root);
    if let Some((file, contents)) = framework.config_artifact() {
        writer.write_if_absent(file, contents)?;
    }
    if let Some(script) = framework.test_script() {
        writer.patch_package_json(&[], &[("test", script)])?;
    }
    Ok(writer.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::executor::testing::RecordingRunner;
    use crate::prompt::testing::{Answer, ScriptedPrompter};
    use std::fs;

    fn read_pkg(root: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap()
    }

    #[test]
    fn test_full_interactive_run() {
        let tmp = tempfile::tempdir().unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Select(0)]);

        let summary = run_post_setup(
            tmp.path(),
            &mut executor,
            &mut prompter,
            PostSetupOptions::default(),
        );

        assert_eq!(
            summary.lint,
            [
                (LintTool::Eslint, StepOutcome::Completed),
                (LintTool::Prettier, StepOutcome::Completed)
            ]
        );
        assert_eq!(summary.testing, (TestFramework::Vitest, StepOutcome::Completed));
        assert!(tmp.path().join("eslint.config.mjs").exists());
        assert!(tmp.path().join("vitest.config.mjs").exists());
        let pkg = read_pkg(tmp.path());
        assert_eq!(pkg["scripts"]["lint"], "eslint .");
        assert_eq!(pkg["scripts"]["test"], "vitest run");
    }

    #[test]
    fn test_configured_tool_is_not_reinstalled() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("eslint.config.js"), "export default [];\n").unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Select(4)]);

        let summary = run_post_setup(
            tmp.path(),
            &mut executor,
            &mut prompter,
            PostSetupOptions::default(),
        );

        assert_eq!(summary.lint[0], (LintTool::Eslint, StepOutcome::AlreadyConfigured));
        assert_eq!(summary.testing, (TestFramework::Skip, StepOutcome::Skipped));
        assert!(executor
            .runner()
            .steps()
            .iter()
            .all(|s| !s.contains("eslint")));
        assert_eq!(prompter.asked[0], "Set up Prettier?");
    }

    #[test]
    fn test_lint_failure_does_not_block_testing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut executor = Executor::new(RecordingRunner::failing_on("eslint"));
        let options = PostSetupOptions {
            lint: Some(true),
            test_framework: Some(TestFramework::Jest),
            assume_yes: false,
        };
        let mut prompter = ScriptedPrompter::default();

        let summary = run_post_setup(tmp.path(), &mut executor, &mut prompter, options);

        assert!(matches!(summary.lint[0].1, StepOutcome::Failed(_)));
        assert_eq!(summary.lint[1].1, StepOutcome::Completed);
        assert_eq!(summary.testing.1, StepOutcome::Completed);
        assert!(summary.has_failures());
        assert!(prompter.logged(LogLevel::Warning, "ESLint setup failed"));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_existing_test_script_kept() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("package.json"),
            r#"{ "scripts": { "test": "ng test" } }"#,
        )
        .unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        let options = PostSetupOptions {
            lint: Some(false),
            test_framework: Some(TestFramework::Mocha),
            assume_yes: false,
        };
        let mut prompter = ScriptedPrompter::default();

        let summary = run_post_setup(tmp.path(), &mut executor, &mut prompter, options);

        assert_eq!(summary.testing.1, StepOutcome::Completed);
        assert_eq!(read_pkg(tmp.path())["scripts"]["test"], "ng test");
        assert_eq!(executor.runner().steps(), ["npm install --save-dev mocha"]);
    }

    #[test]
    fn test_unparseable_package_json_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("package.json"), "{ // broken\n}").unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        let options = PostSetupOptions {
            lint: Some(false),
            test_framework: Some(TestFramework::Vitest),
            assume_yes: false,
        };
        let mut prompter = ScriptedPrompter::default();

        let summary = run_post_setup(tmp.path(), &mut executor, &mut prompter, options);

        let (framework, outcome) = &summary.testing;
        assert_eq!(*framework, TestFramework::Vitest);
        assert!(matches!(outcome, StepOutcome::Incomplete(msg) if msg.contains("package.json")));
        assert!(!summary.has_failures());
        assert!(summary.has_warnings());
        assert!(prompter.logged(LogLevel::Warning, "package.json: could not parse"));
        assert!(!prompter.logged(LogLevel::Success, "Vitest configured"));
        assert_eq!(
            fs::read_to_string(tmp.path().join("package.json")).unwrap(),
            "{ // broken\n}"
        );
    }

    #[test]
    fn test_existing_lint_artifact_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".prettierignore"), "dist\n").unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        let options = PostSetupOptions {
            lint: Some(true),
            test_framework: Some(TestFramework::Skip),
            assume_yes: false,
        };
        let mut prompter = ScriptedPrompter::default();

        let summary = run_post_setup(tmp.path(), &mut executor, &mut prompter, options);

        assert_eq!(summary.lint[0], (LintTool::Eslint, StepOutcome::Completed));
        assert!(matches!(summary.lint[1].1, StepOutcome::Incomplete(_)));
        assert!(prompter.logged(LogLevel::Warning, ".prettierignore: already exists"));
        assert_eq!(fs::read_to_string(tmp.path().join(".prettierignore")).unwrap(), "dist\n");
    }

    #[test]
    fn test_prompt_failure_is_contained() {
        let tmp = tempfile::tempdir().unwrap();
        let mut executor = Executor::new(RecordingRunner::default());
        // no scripted answers: every prompt errors
        let mut prompter = ScriptedPrompter::default();

        let summary = run_post_setup(
            tmp.path(),
            &mut executor,
            &mut prompter,
            PostSetupOptions::default(),
        );

        assert!(summary.lint.iter().all(|(_, o)| matches!(o, StepOutcome::Failed(_))));
        assert!(matches!(summary.testing.1, StepOutcome::Failed(_)));
        assert!(executor.runner().ran.is_empty());
    }
}
