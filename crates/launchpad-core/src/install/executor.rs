//! Sequential execution of install scripts
//!
//! Each statement runs to completion with inherited stdio before the next
//! one starts. The first failing statement stops the script; nothing that
//! already ran is rolled back.

use super::Script;
use crate::error::{Result, SetupError};
use colored::Colorize;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// Exit status of one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl StepStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a single shell statement
pub trait StepRunner {
    fn run(&mut self, step: &str, cwd: &Path) -> io::Result<StepStatus>;
}

/// Runs statements through the platform shell with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    /// Suppress the `Running:` header
    pub quiet: bool,
}

impl ShellRunner {
    fn command(step: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(step);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(step);
            cmd
        }
    }
}

impl StepRunner for ShellRunner {
    fn run(&mut self, step: &str, cwd: &Path) -> io::Result<StepStatus> {
        if !self.quiet {
            println!();
            println!("{} {}", "Running:".dimmed(), step.yellow());
            println!();
        }

        let status = Self::command(step)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(StepStatus {
            code: status.code(),
        })
    }
}

/// Runs scripts statement by statement
pub struct Executor<R> {
    runner: R,
}

impl<R: StepRunner> Executor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run every statement of `script` in `cwd`, stopping at the first failure
    pub fn run_script(&mut self, script: &Script, cwd: &Path) -> Result<()> {
        for step in script.steps() {
            debug!(step = %step, cwd = %cwd.display(), "running step");

            let status = self.runner.run(step, cwd).map_err(|source| {
                error!(step = %step, "failed to start: {}", source);
                SetupError::StepSpawn {
                    step: step.clone(),
                    source,
                }
            })?;

            if !status.success() {
                error!(step = %step, code = ?status.code, "step failed");
                return Err(SetupError::StepFailed {
                    step: step.clone(),
                    code: status.code,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::PathBuf;

    /// Records every statement and fails the ones listed in `failing`
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRunner {
        pub(crate) ran: Vec<(String, PathBuf)>,
        pub(crate) failing: Vec<String>,
    }

    impl RecordingRunner {
        pub(crate) fn failing_on(step: &str) -> Self {
            Self {
                failing: vec![step.to_string()],
                ..Self::default()
            }
        }

        pub(crate) fn steps(&self) -> Vec<&str> {
            self.ran.iter().map(|(s, _)| s.as_str()).collect()
        }
    }

    impl StepRunner for RecordingRunner {
        fn run(&mut self, step: &str, cwd: &Path) -> io::Result<StepStatus> {
            self.ran.push((step.to_string(), cwd.to_path_buf()));
            let code = if self.failing.iter().any(|f| step.contains(f.as_str())) {
                1
            } else {
                0
            };
            Ok(StepStatus { code: Some(code) })
        }
    }
}
