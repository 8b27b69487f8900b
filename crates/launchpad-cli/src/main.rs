//! Launchpad CLI - Interactive setup for language and web framework projects

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use launchpad_core::install::InstallationStrategy;
use launchpad_core::registry::{resolve_versions, select_recent_versions};
use launchpad_core::tui::CreateArgs;
use launchpad_core::{
    Framework, ProductConfig, ProjectTarget, RegistryClient, SetupError, Template, TestFramework,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Launchpad product configuration
#[derive(Clone)]
pub struct LaunchpadConfig;

impl ProductConfig for LaunchpadConfig {
    fn name(&self) -> &'static str {
        "launchpad"
    }

    fn display_name(&self) -> &'static str {
        "Launchpad"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://registry.npmjs.org"
    }

    fn registry_url_env(&self) -> &'static str {
        "LAUNCHPAD_REGISTRY_URL"
    }

    fn log_env(&self) -> &'static str {
        "LAUNCHPAD_LOG"
    }

    fn cli_description(&self) -> &'static str {
        "Interactive setup for TypeScript/JavaScript projects and web framework apps"
    }

    fn next_steps(&self, target: &ProjectTarget, template: Template) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&target.path) {
            steps.push(format!("cd {}", target.path.display()));
        }

        // Step 2: Start the dev server
        let start = match template {
            Template::Framework(Framework::Angular) => "npm start",
            Template::Framework(Framework::NestJs) => "npm run start:dev",
            _ => "npm run dev",
        };
        steps.push(start.to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "launchpad")]
#[command(about = "Interactive setup for TypeScript/JavaScript projects and web framework apps")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a new project
    Create(CliCreateArgs),
    /// List the versions offered for a framework
    Versions {
        /// Framework id (next, nuxt, angular, vue, nest)
        #[arg(value_enum)]
        framework: Framework,
    },
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Template to set up (ts, js, next, nuxt, angular, vue, nest)
    #[arg(short, long)]
    pub template: Option<Template>,

    /// Framework version to install instead of choosing from the registry
    #[arg(long = "framework-version")]
    pub framework_version: Option<String>,

    /// Project directory
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Installation strategy when the directory does not exist yet
    #[arg(long, value_enum)]
    pub strategy: Option<InstallationStrategy>,

    /// Testing framework to configure
    #[arg(long = "test-framework", value_enum)]
    pub test_framework: Option<TestFramework>,

    /// Skip linting and testing setup
    #[arg(long = "skip-post-setup")]
    pub skip_post_setup: bool,

    /// Skip the Node.js/npm installation check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template: args.template,
            version: args.framework_version,
            directory: args.directory,
            strategy: args.strategy,
            test_framework: args.test_framework,
            skip_post_setup: args.skip_post_setup,
            skip_runtime_check: args.skip_runtime_check,
            yes: args.yes,
        }
    }
}

/// Initialize tracing; the product's log env var wins over `--verbose`
fn init_tracing<C: ProductConfig>(config: &C, verbose: u8) {
    let filter = EnvFilter::try_from_env(config.log_env()).unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn print_versions<C: ProductConfig>(config: &C, framework: Framework) -> Result<ExitCode> {
    let package = framework.descriptor().package;
    let client = RegistryClient::from_config(config)?;
    let records = resolve_versions(&client, package).await;
    let versions = select_recent_versions(&records);

    if versions.is_empty() {
        eprintln!(
            "{}",
            error_line(&anyhow::anyhow!("no versions available for {}", package))
        );
        return Ok(ExitCode::FAILURE);
    }

    for line in version_listing(framework, &versions) {
        println!("{}", line);
    }
    Ok(ExitCode::SUCCESS)
}

/// Header, source repository and one line per version, newest first
fn version_listing(framework: Framework, versions: &[String]) -> Vec<String> {
    let descriptor = framework.descriptor();
    let mut lines = vec![
        format!(
            "{} {}",
            descriptor.display_name.bold(),
            format!("({})", descriptor.package).dimmed()
        ),
        format!("  {}", descriptor.repository.dimmed()),
    ];
    for (i, version) in versions.iter().enumerate() {
        if i == 0 {
            lines.push(format!("  {} {}", version.green(), "latest".dimmed()));
        } else {
            lines.push(format!("  {}", version));
        }
    }
    lines
}

/// One-line report for an error that ends the process
fn error_line(err: &anyhow::Error) -> String {
    // setup errors already spell out their cause
    let text = match err.downcast_ref::<SetupError>() {
        Some(setup) => setup.to_string(),
        None => format!("{:#}", err),
    };
    format!("{} {}", "error:".red().bold(), text)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = LaunchpadConfig;
    init_tracing(&config, args.verbose);

    let create_args = match args.command {
        Some(Command::Versions { framework }) => return print_versions(&config, framework).await,
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to the interactive menu
        None => CreateArgs::default(),
    };

    let result = launchpad_core::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(outcome) => {
            tracing::debug!(?outcome, "setup finished");
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Err(e) => {
            eprintln!("{}", error_line(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
