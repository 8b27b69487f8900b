//! Installation strategy selection
//!
//! The target directory's state and the declared variants decide which
//! variant runs:
//!
//! - target exists: only `manual` applies; a non-empty directory needs an
//!   explicit overwrite confirmation
//! - target absent: with both `global` and `local` declared the user picks
//!   (or skips); otherwise the single declared variant runs, in priority
//!   order global > local > manual

use super::{InstallCommandSet, InstallationStrategy, ProjectTarget};
use crate::error::{Result, SetupError};
use crate::prompt::{Prompter, SelectItem};
use tracing::{debug, info};

/// Where strategy selection ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyDecision {
    Execute(InstallationStrategy),
    /// Nothing to install, or the user chose to skip
    Skipped,
    /// The user declined to overwrite a non-empty directory
    Declined,
}

/// Knobs that let a non-interactive run answer the selector's questions
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyOptions {
    /// Used when the target is absent and the variant is declared
    pub preferred: Option<InstallationStrategy>,
    /// Confirm overwrites and take the highest priority strategy without asking
    pub assume_yes: bool,
}

/// Decide how to install `template` into `target`
pub fn select_strategy<P: Prompter>(
    template: &str,
    commands: &InstallCommandSet,
    target: &ProjectTarget,
    options: StrategyOptions,
    prompter: &mut P,
) -> Result<StrategyDecision> {
    if target.exists() {
        return select_for_existing(template, commands, target, options, prompter);
    }

    let available = commands.available();
    if available.is_empty() {
        info!(template, "no install variants declared; skipping");
        return Ok(StrategyDecision::Skipped);
    }

    if let Some(preferred) = options.preferred {
        if commands.supports(preferred) {
            debug!(template, strategy = %preferred, "using preferred strategy");
            return Ok(StrategyDecision::Execute(preferred));
        }
        debug!(template, strategy = %preferred, "preferred strategy not declared; ignoring");
    }

    let both = commands.supports(InstallationStrategy::Global)
        && commands.supports(InstallationStrategy::Local);

    if both && !options.assume_yes {
        let choices = [
            InstallationStrategy::Global,
            InstallationStrategy::Local,
            InstallationStrategy::Skip,
        ];
        let items: Vec<SelectItem> = choices
            .iter()
            .map(|s| SelectItem::new(s.display_name(), s.hint()))
            .collect();
        let idx = prompter
            .select(&format!("How should {} be installed?", template), &items)
            .map_err(SetupError::Prompt)?;
        return Ok(match choices[idx] {
            InstallationStrategy::Skip => StrategyDecision::Skipped,
            chosen => StrategyDecision::Execute(chosen),
        });
    }

    Ok(StrategyDecision::Execute(available[0]))
}

fn select_for_existing<P: Prompter>(
    template: &str,
    commands: &InstallCommandSet,
    target: &ProjectTarget,
    options: StrategyOptions,
    prompter: &mut P,
) -> Result<StrategyDecision> {
    if !commands.supports(InstallationStrategy::Manual) {
        return Err(SetupError::ManualModeUnsupported {
            template: template.to_string(),
            path: target.path.clone(),
        });
    }

    if target.is_empty_dir()? {
        debug!(path = %target.path.display(), "target exists and is empty");
        return Ok(StrategyDecision::Execute(InstallationStrategy::Manual));
    }

    let confirmed = options.assume_yes
        || prompter
            .confirm(
                &format!(
                    "{} is not empty. Existing files may be overwritten. Continue?",
                    target.path.display()
                ),
                false,
            )
            .map_err(SetupError::Prompt)?;

    if confirmed {
        Ok(StrategyDecision::Execute(InstallationStrategy::Manual))
    } else {
        info!(path = %target.path.display(), "overwrite declined");
        Ok(StrategyDecision::Declined)
    }
}
