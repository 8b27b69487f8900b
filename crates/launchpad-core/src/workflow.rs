//! Setup orchestration
//!
//! One run takes a [`Template`] through version resolution, target and
//! strategy selection, command execution, config writing and post-setup.
//! Every terminal state is returned as an [`Outcome`] or a
//! [`SetupError`]; the binary alone turns those into exit codes.

use crate::error::{Result, SetupError};
use crate::frameworks::Framework;
use crate::install::{
    select_strategy, Executor, InstallationStrategy, ProjectTarget, StepRunner,
    StrategyDecision, StrategyOptions, DEFAULT_PROJECT_NAME,
};
use crate::postsetup::{run_post_setup, PostSetupOptions, PostSetupSummary, TestFramework};
use crate::prompt::{LogLevel, Prompter, SelectItem};
use crate::registry::{resolve_versions, select_recent_versions, RegistryClient};
use crate::runtime::check_runtimes;
use crate::templates::{ConfigReport, ConfigWriter, Language, Template};
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

/// How a setup run ended
#[derive(Debug, Clone)]
pub enum Outcome {
    Completed {
        template: Template,
        target: ProjectTarget,
        strategy: InstallationStrategy,
        config: ConfigReport,
        post_setup: Option<PostSetupSummary>,
    },
    /// Nothing installed; the caller may offer the menu again
    Skipped,
    /// The user declined to overwrite a non-empty directory
    Declined,
    /// The user chose to leave the menu
    Exited,
}

impl Outcome {
    /// Process exit status for a one-shot run
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Declined => 1,
            Outcome::Completed { .. } | Outcome::Skipped | Outcome::Exited => 0,
        }
    }
}

/// Answers supplied up front (from the command line)
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Framework version; skips the registry lookup
    pub version: Option<String>,
    pub directory: Option<PathBuf>,
    pub strategy: Option<InstallationStrategy>,
    pub test_framework: Option<TestFramework>,
    pub skip_post_setup: bool,
    pub skip_runtime_check: bool,
    /// Accept defaults instead of prompting
    pub assume_yes: bool,
}

/// Drives setup runs against one registry, prompter and step runner
pub struct Workflow<'a, P, R> {
    registry: &'a RegistryClient,
    prompter: &'a mut P,
    executor: Executor<R>,
    invocation_dir: PathBuf,
}

impl<'a, P: Prompter, R: StepRunner> Workflow<'a, P, R> {
    pub fn new(
        registry: &'a RegistryClient,
        prompter: &'a mut P,
        runner: R,
        invocation_dir: PathBuf,
    ) -> Self {
        Self {
            registry,
            prompter,
            executor: Executor::new(runner),
            invocation_dir,
        }
    }

    pub fn executor(&self) -> &Executor<R> {
        &self.executor
    }

    fn log(&mut self, level: LogLevel, message: impl AsRef<str>) -> Result<()> {
        self.prompter
            .log(level, message.as_ref())
            .map_err(SetupError::Prompt)
    }

    /// Offer the template menu until a setup completes or the user exits
    ///
    /// Skipped and declined setups return to the menu; errors end the loop.
    pub async fn run_menu(&mut self, options: &SetupOptions) -> Result<Outcome> {
        loop {
            let Some(template) =
                select_template(&mut *self.prompter).map_err(SetupError::Prompt)?
            else {
                return Ok(Outcome::Exited);
            };

            match self.run(template, options).await? {
                Outcome::Skipped | Outcome::Declined => {
                    debug!(%template, "returning to menu");
                }
                outcome => return Ok(outcome),
            }
        }
    }

    /// Run one template end to end
    pub async fn run(&mut self, template: Template, options: &SetupOptions) -> Result<Outcome> {
        info!(%template, "starting setup");

        if !options.skip_runtime_check {
            let found = check_runtimes(template.prerequisites())?;
            debug!(count = found.len(), "prerequisites present");
        }

        let version = match template.package() {
            Some(package) => self.choose_version(template, package, options).await?,
            None => String::new(),
        };

        let target = self.choose_target(options)?;
        let commands = template.install_commands(&version, &target);

        let strategy_options = StrategyOptions {
            preferred: options.strategy,
            assume_yes: options.assume_yes,
        };
        let decision = select_strategy(
            template.display_name(),
            &commands,
            &target,
            strategy_options,
            self.prompter,
        )?;

        let strategy = match decision {
            StrategyDecision::Execute(strategy) => strategy,
            StrategyDecision::Skipped => {
                self.log(LogLevel::Info, format!("Skipped {} setup", template))?;
                return Ok(Outcome::Skipped);
            }
            StrategyDecision::Declined => {
                self.log(
                    LogLevel::Warning,
                    format!("Left {} untouched", target.path.display()),
                )?;
                return Ok(Outcome::Declined);
            }
        };

        // select_strategy only returns Execute for declared variants
        let Some(script) = commands.get(strategy) else {
            return Ok(Outcome::Skipped);
        };

        let cwd = match strategy {
            InstallationStrategy::Global => self.invocation_dir.clone(),
            _ => {
                std::fs::create_dir_all(&target.path)
                    .map_err(|e| SetupError::io(&target.path, e))?;
                target.path.clone()
            }
        };

        self.log(
            LogLevel::Step,
            format!("Installing {} ({} strategy)", template, strategy),
        )?;
        self.log(LogLevel::Info, format!("This will execute: {}", script))?;
        self.executor.run_script(script, &cwd)?;

        let mut writer = ConfigWriter::new(&target.path);
        template.setup_config(&mut writer, &target, strategy)?;
        let config = writer.into_report();
        debug!(written = config.written(), "config artifacts written");
        for (path, reason) in config.skipped() {
            self.log(
                LogLevel::Warning,
                format!("{}: {}, left unchanged", path.display(), reason),
            )?;
        }
        self.log(
            LogLevel::Success,
            format!("{} installed in {}", template, target.path.display()),
        )?;

        let post_setup = if options.skip_post_setup {
            None
        } else {
            let post_options = PostSetupOptions {
                lint: None,
                test_framework: options.test_framework,
                assume_yes: options.assume_yes,
            };
            Some(run_post_setup(
                &target.path,
                &mut self.executor,
                self.prompter,
                post_options,
            ))
        };

        Ok(Outcome::Completed {
            template,
            target,
            strategy,
            config,
            post_setup,
        })
    }

    async fn choose_version(
        &mut self,
        template: Template,
        package: &str,
        options: &SetupOptions,
    ) -> Result<String> {
        if let Some(version) = &options.version {
            debug!(%version, "using version from options");
            return Ok(version.clone());
        }

        self.log(
            LogLevel::Step,
            format!("Fetching {} versions from {}", template, self.registry.base_url()),
        )?;
        let records = resolve_versions(self.registry, package).await;
        let choices = select_recent_versions(&records);
        if choices.is_empty() {
            return Err(SetupError::NoVersions {
                package: package.to_string(),
            });
        }

        if options.assume_yes {
            return Ok(choices[0].clone());
        }

        let items: Vec<SelectItem> = choices
            .iter()
            .enumerate()
            .map(|(i, v)| SelectItem::new(v, if i == 0 { "latest" } else { "" }))
            .collect();
        let idx = self
            .prompter
            .select(&format!("Which {} version?", template), &items)
            .map_err(SetupError::Prompt)?;
        Ok(choices[idx].clone())
    }

    fn choose_target(&mut self, options: &SetupOptions) -> Result<ProjectTarget> {
        let input = match &options.directory {
            Some(dir) => dir.to_string_lossy().into_owned(),
            None if options.assume_yes => DEFAULT_PROJECT_NAME.to_string(),
            None => self
                .prompter
                .input("Project directory", DEFAULT_PROJECT_NAME)
                .map_err(SetupError::Prompt)?,
        };
        let target = ProjectTarget::resolve(&self.invocation_dir, &input);
        debug!(name = %target.name, path = %target.path.display(), "resolved target");
        Ok(target)
    }
}

/// Walk the main menu; `None` means the user chose to exit
pub fn select_template<P: Prompter>(prompter: &mut P) -> io::Result<Option<Template>> {
    loop {
        let menu = [
            SelectItem::new("Language", "plain TypeScript or JavaScript project"),
            SelectItem::new("Framework", "scaffold with a framework generator"),
            SelectItem::new("Exit", ""),
        ];
        match prompter.select("What would you like to set up?", &menu)? {
            0 => {
                let mut items: Vec<SelectItem> = Language::ALL
                    .iter()
                    .map(|l| SelectItem::new(l.display_name(), ""))
                    .collect();
                items.push(SelectItem::new("Back", ""));
                let idx = prompter.select("Select a language", &items)?;
                if let Some(language) = Language::ALL.get(idx) {
                    return Ok(Some(Template::Language(*language)));
                }
            }
            1 => {
                let mut items: Vec<SelectItem> = Framework::ALL
                    .iter()
                    .map(|f| SelectItem::new(f.descriptor().display_name, f.descriptor().package))
                    .collect();
                items.push(SelectItem::new("Back", ""));
                let idx = prompter.select("Select a framework", &items)?;
                if let Some(framework) = Framework::ALL.get(idx) {
                    return Ok(Some(Template::Framework(*framework)));
                }
            }
            _ => return Ok(None),
        }
    }
}
