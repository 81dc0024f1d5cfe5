//! Check command implementation.
//!
//! Runs the full startup sequence and reports what was loaded.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::utils::{load_configuration, print_value, GlobalOptions};

/// Resolve the environment and load its configuration.
#[derive(Args)]
pub struct CheckCommand {}

/// What a successful check found.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// The deployment tier.
    pub environment: String,
    /// Where config files were looked up.
    pub config_dir: PathBuf,
    /// Loaded files, lowest precedence first.
    pub sources: Vec<PathBuf>,
    /// Top-level keys of the merged document.
    pub keys: Vec<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (ctx, config) = load_configuration(global)?;

        if global.quiet {
            return Ok(());
        }

        let document = config.snapshot()?;
        let keys = document
            .as_mapping()
            .map(|mapping| {
                mapping
                    .keys()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let report = CheckReport {
            environment: ctx.environment().to_string(),
            config_dir: ctx.config_path().to_path_buf(),
            sources: config.sources().to_vec(),
            keys,
        };
        print_value(&report, global.format)
    }
}
