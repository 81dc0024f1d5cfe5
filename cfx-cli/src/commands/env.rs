//! Env command implementation.
//!
//! Prints the resolved environment context, or one section of it.

use clap::{Args, ValueEnum};

use crate::error::CliError;
use crate::utils::{build_context, print_value, GlobalOptions};

/// Print the resolved environment context.
#[derive(Args)]
pub struct EnvCommand {
    /// Print only one section
    #[arg(long, value_enum)]
    pub section: Option<Section>,
}

/// A section of the environment context.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Section {
    /// Hostname, machine id and timezone
    Host,
    /// OS, architecture and compiler version
    Runtime,
    /// Deployment identifiers
    Deployment,
    /// OS user
    User,
    /// Process identifiers
    Process,
}

impl EnvCommand {
    /// Execute the env command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = build_context(global)?;

        match self.section {
            None => print_value(&ctx, global.format),
            Some(Section::Host) => print_value(ctx.host(), global.format),
            Some(Section::Runtime) => print_value(ctx.runtime(), global.format),
            Some(Section::Deployment) => print_value(ctx.deployment(), global.format),
            Some(Section::User) => print_value(ctx.user(), global.format),
            Some(Section::Process) => print_value(&ctx.process(), global.format),
        }
    }
}
