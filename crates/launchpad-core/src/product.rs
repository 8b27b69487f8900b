//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to brand the tool and to point the
//! registry client at the right endpoint.

use crate::install::ProjectTarget;
use crate::templates::Template;

/// Configuration trait for the CLI product
///
/// Defines:
/// - Product identity (name, display name)
/// - Package registry endpoint and its environment override
/// - Log filter environment variable
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default package registry base URL
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// Environment variable holding the tracing filter directive
    fn log_env(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, target: &ProjectTarget, template: Template) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
