//! Launchpad Core - Library behind the `launchpad` project setup CLI
//!
//! This library sets up TypeScript/JavaScript projects and framework apps
//! (Next.js, Nuxt, Angular, Vue, NestJS) by driving their generators and
//! package managers, then patches the resulting config files.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Registry lookups and version selection,
//!   install scripts and strategy selection, command execution, config writing
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and [`Workflow`],
//!   which reports every run as an [`Outcome`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use launchpad_core::registry::{resolve_versions, select_recent_versions, RegistryClient};
//!
//! let client = RegistryClient::from_config(&MyConfig)?;
//! let records = resolve_versions(&client, "create-next-app").await;
//! for version in select_recent_versions(&records) {
//!     println!("{version}");
//! }
//! ```

pub mod error;
pub mod frameworks;
pub mod install;
pub mod postsetup;
pub mod product;
pub mod prompt;
pub mod registry;
pub mod runtime;
pub mod templates;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, SetupError};
pub use frameworks::Framework;
pub use install::{InstallationStrategy, ProjectTarget};
pub use postsetup::TestFramework;
pub use product::ProductConfig;
pub use prompt::Prompter;
pub use registry::RegistryClient;
pub use templates::{Language, Template};
pub use workflow::{Outcome, SetupOptions, Workflow};

#[cfg(feature = "tui")]
pub use tui::run;
