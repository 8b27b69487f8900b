//! Error taxonomy for project setup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a setup run.
///
/// A declined overwrite or a skipped strategy are not errors; those are
/// reported through [`crate::workflow::Outcome`].
#[derive(Debug, Error)]
pub enum SetupError {
    /// The target already exists but the template declares no manual variant
    #[error("manual mode not implemented for {template} (target {} already exists)", .path.display())]
    ManualModeUnsupported { template: String, path: PathBuf },

    /// The registry returned nothing usable for the package
    #[error("no versions available for {package}")]
    NoVersions { package: String },

    /// A prerequisite tool is not on PATH
    #[error("missing required runtimes:\n{0}")]
    MissingRuntime(String),

    /// A statement exited non-zero
    #[error("command failed with {}: {step}", describe_code(.code))]
    StepFailed { step: String, code: Option<i32> },

    /// A statement could not be started at all
    #[error("failed to run `{step}`: {source}")]
    StepSpawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The interactive prompt failed (terminal closed, interrupted)
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl SetupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T, E = SetupError> = std::result::Result<T, E>;
