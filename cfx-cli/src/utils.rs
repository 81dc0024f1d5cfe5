//! Utility functions for CLI operations.
//!
//! Shared by every command: global options, context and config loading,
//! and rendering values in the selected output format.

use std::io::Write;

use cfx::{ConfigContainer, ConfigLoader, EnvironmentContext};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Environment variable prefix; empty means the library default.
    pub prefix: String,

    /// Output format for structured results.
    pub format: OutputFormat,
}

/// Output format for structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML (human-readable)
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Resolve the environment context for the configured prefix.
pub fn build_context(global: &GlobalOptions) -> Result<EnvironmentContext, CliError> {
    Ok(EnvironmentContext::from_env(&global.prefix)?)
}

/// Resolve the environment context and load its configuration.
pub fn load_configuration(
    global: &GlobalOptions,
) -> Result<(EnvironmentContext, ConfigContainer), CliError> {
    let ctx = build_context(global)?;
    let config = ConfigLoader::load(&ctx)?;
    Ok((ctx, config))
}

/// Render `value` in `format`.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| CliError::Output(e.to_string())),
    }
}

/// Render `value` and write it to stdout.
pub fn print_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<(), CliError> {
    let rendered = render(value, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
