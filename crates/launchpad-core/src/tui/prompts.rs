//! Charm-style CLI prompts using cliclack

use crate::error::SetupError;
use crate::install::{InstallationStrategy, ShellRunner};
use crate::postsetup::{StepOutcome, TestFramework};
use crate::product::ProductConfig;
use crate::prompt::{LogLevel, Prompter, SelectItem};
use crate::registry::RegistryClient;
use crate::templates::Template;
use crate::workflow::{Outcome, SetupOptions, Workflow};
use anyhow::Result;
use std::io;
use std::path::PathBuf;

/// [`Prompter`] backed by cliclack
#[derive(Debug, Default, Clone, Copy)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn select(&mut self, message: &str, items: &[SelectItem]) -> io::Result<usize> {
        let mut select = cliclack::select(message);
        for (idx, item) in items.iter().enumerate() {
            select = select.item(idx, &item.label, &item.hint);
        }
        select.interact()
    }

    fn input(&mut self, message: &str, default: &str) -> io::Result<String> {
        cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .interact()
    }

    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<bool> {
        cliclack::confirm(message).initial_value(initial).interact()
    }

    fn log(&mut self, level: LogLevel, message: &str) -> io::Result<()> {
        match level {
            LogLevel::Info => cliclack::log::info(message),
            LogLevel::Step => cliclack::log::step(message),
            LogLevel::Success => cliclack::log::success(message),
            LogLevel::Warning => cliclack::log::warning(message),
            LogLevel::Error => cliclack::log::error(message),
        }
    }
}

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Template to set up; runs once without the menu when set
    pub template: Option<Template>,

    /// Framework version, skipping the registry lookup
    pub version: Option<String>,

    /// Project directory
    pub directory: Option<PathBuf>,

    /// Preferred installation strategy for a new directory
    pub strategy: Option<InstallationStrategy>,

    /// Testing framework for post-setup
    pub test_framework: Option<TestFramework>,

    /// Skip linting and testing setup
    pub skip_post_setup: bool,

    /// Skip the Node.js/npm check
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    fn setup_options(&self) -> SetupOptions {
        SetupOptions {
            version: self.version.clone(),
            directory: self.directory.clone(),
            strategy: self.strategy,
            test_framework: self.test_framework,
            skip_post_setup: self.skip_post_setup,
            skip_runtime_check: self.skip_runtime_check,
            assume_yes: self.yes,
        }
    }
}

/// Run the CLI with interactive prompts
///
/// With a template in `args` the setup runs once. Otherwise the menu loops
/// until a setup completes or the user exits; skipped and declined setups
/// return to the menu. Errors are returned unprinted for the caller to report.
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<Outcome> {
    cliclack::intro(config.display_name())?;

    let registry = RegistryClient::from_config(config)?;
    let invocation_dir = std::env::current_dir()?;
    let options = args.setup_options();
    let mut prompter = ClackPrompter;
    let mut workflow = Workflow::new(
        &registry,
        &mut prompter,
        ShellRunner::default(),
        invocation_dir,
    );

    let result = match args.template {
        Some(template) => workflow.run(template, &options).await,
        None => workflow.run_menu(&options).await,
    };
    finish(config, result)
}

fn finish<C: ProductConfig>(
    config: &C,
    result: std::result::Result<Outcome, SetupError>,
) -> Result<Outcome> {
    match result {
        Ok(outcome) => {
            match &outcome {
                Outcome::Completed {
                    template,
                    target,
                    post_setup,
                    ..
                } => {
                    if let Some(summary) = post_setup {
                        for (tool, step) in &summary.lint {
                            cliclack::log::info(format!("{}: {}", tool, describe_step(step)))?;
                        }
                        let (framework, step) = &summary.testing;
                        cliclack::log::info(format!(
                            "{}: {}",
                            framework.display_name(),
                            describe_step(step)
                        ))?;
                        if summary.has_warnings() {
                            cliclack::log::warning("Post-setup finished with warnings")?;
                        }
                    }
                    print_next_steps(&config.next_steps(target, *template))?;
                }
                Outcome::Exited => cliclack::outro("Goodbye!")?,
                Outcome::Skipped | Outcome::Declined => cliclack::outro("Nothing was installed")?,
            }
            Ok(outcome)
        }
        Err(SetupError::Prompt(e)) if e.kind() == io::ErrorKind::Interrupted => {
            cliclack::outro_cancel("Setup cancelled")?;
            Ok(Outcome::Exited)
        }
        Err(e) => {
            cliclack::outro_cancel("Setup failed")?;
            Err(e.into())
        }
    }
}

fn print_next_steps(steps: &[String]) -> Result<()> {
    println!();
    println!("  {}", console::style("Next steps").bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn describe_step(outcome: &StepOutcome) -> &str {
    match outcome {
        StepOutcome::Completed => "done",
        StepOutcome::Incomplete(msg) => msg,
        StepOutcome::AlreadyConfigured => "already configured",
        StepOutcome::Skipped => "skipped",
        StepOutcome::Failed(msg) => msg,
    }
}
