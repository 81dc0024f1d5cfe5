//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use clap::{Parser, Subcommand};

use crate::commands::{CheckCommand, CompletionsCommand, EnvCommand, GetCommand, LocateCommand};
use crate::utils::{GlobalOptions, OutputFormat};

/// Inspect a service's environment identity and layered YAML configuration.
#[derive(Parser)]
#[command(name = "cfx")]
#[command(
    version,
    about = "Inspect environment identity and layered configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Environment variable prefix (default CFX)
    #[arg(
        long,
        value_name = "PREFIX",
        global = true,
        env = "CFX_PREFIX",
        default_value = ""
    )]
    pub prefix: String,

    /// Output format for structured results
    #[arg(
        long,
        value_enum,
        global = true,
        default_value = "yaml",
        env = "CFX_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Options shared by every command.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            prefix: self.prefix.clone(),
            format: self.format,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved environment context
    Env(EnvCommand),

    /// Print a value from the merged configuration
    Get(GetCommand),

    /// Print the config file path for a logical name
    Locate(LocateCommand),

    /// Resolve the environment and load its configuration
    Check(CheckCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
