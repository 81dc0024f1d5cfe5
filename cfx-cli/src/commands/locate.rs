//! Locate command implementation.
//!
//! Shows which files back a logical config name, or the current environment.

use clap::Args;

use cfx::config::{locate_config_file, ConfigLoader};

use crate::error::CliError;
use crate::utils::{build_context, GlobalOptions};

/// Print the config file path for a logical name.
#[derive(Args)]
pub struct LocateCommand {
    /// Logical config name, e.g. `base` (defaults to the files of the
    /// current environment, base first)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

impl LocateCommand {
    /// Execute the locate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = build_context(global)?;

        let files = match self.name {
            Some(name) => vec![locate_config_file(ctx.config_path(), &name)?],
            None => ConfigLoader::discover(ctx.config_path(), ctx.environment())?,
        };

        for file in files {
            println!("{}", file.display());
        }
        Ok(())
    }
}
