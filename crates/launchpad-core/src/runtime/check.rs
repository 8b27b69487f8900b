//! Runtime detection for Node.js, npm and npx

use crate::error::{Result, SetupError};
use std::fmt;
use std::process::Command;
use tracing::debug;

/// Tools a template needs on PATH before its install commands can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Node,
    Npm,
    Npx,
}

impl Runtime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Runtime::Node => "Node.js",
            Runtime::Npm => "npm",
            Runtime::Npx => "npx",
        }
    }

    fn program(&self) -> &'static str {
        match (self, cfg!(windows)) {
            (Runtime::Node, _) => "node",
            (Runtime::Npm, false) => "npm",
            (Runtime::Npm, true) => "npm.cmd",
            (Runtime::Npx, false) => "npx",
            (Runtime::Npx, true) => "npx.cmd",
        }
    }

    fn install_hint(&self) -> &'static str {
        match self {
            Runtime::Node => "install from https://nodejs.org",
            Runtime::Npm | Runtime::Npx => "ships with Node.js, see https://nodejs.org",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub runtime: Runtime,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether a tool answers `--version`
pub fn check_runtime(runtime: Runtime) -> RuntimeInfo {
    let output = Command::new(runtime.program()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            debug!(%runtime, %version, "runtime detected");
            RuntimeInfo {
                runtime,
                version: Some(version),
                available: true,
            }
        }
        _ => {
            debug!(%runtime, "runtime not found");
            RuntimeInfo {
                runtime,
                version: None,
                available: false,
            }
        }
    }
}

/// Check all runtimes; fails listing every missing one
pub fn check_runtimes(runtimes: &[Runtime]) -> Result<Vec<RuntimeInfo>> {
    let results: Vec<RuntimeInfo> = runtimes.iter().map(|r| check_runtime(*r)).collect();
    let missing = missing_report(&results);
    if !missing.is_empty() {
        return Err(SetupError::MissingRuntime(missing));
    }
    Ok(results)
}

fn missing_report(results: &[RuntimeInfo]) -> String {
    results
        .iter()
        .filter(|r| !r.available)
        .map(|r| format!("  - {} ({})", r.runtime, r.runtime.install_hint()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_report_lists_only_missing() {
        let results = vec![
            RuntimeInfo {
                runtime: Runtime::Node,
                version: Some("v20.11.0".to_string()),
                available: true,
            },
            RuntimeInfo {
                runtime: Runtime::Npx,
                version: None,
                available: false,
            },
        ];
        let report = missing_report(&results);
        assert!(report.contains("npx"));
        assert!(!report.contains("Node.js ("));
    }

    #[test]
    fn test_no_runtimes_required() {
        assert!(check_runtimes(&[]).unwrap().is_empty());
    }
}
