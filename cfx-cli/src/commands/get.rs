//! Get command implementation.
//!
//! Loads the merged configuration and prints the subtree at a dotted key.

use clap::Args;
use serde_yaml::Value;

use crate::error::CliError;
use crate::utils::{load_configuration, print_value, GlobalOptions};

/// Print a value from the merged configuration.
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key to print (the whole document if omitted)
    #[arg(value_name = "KEY", default_value = "")]
    pub key: String,

    /// Print string values without quoting or document markers
    #[arg(long)]
    pub raw: bool,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_, config) = load_configuration(global)?;
        let value: Value = config.extract(&self.key)?;

        if self.raw {
            if let Some(scalar) = raw_scalar(&value) {
                println!("{scalar}");
                return Ok(());
            }
        }

        print_value(&value, global.format)
    }
}

/// Plain text form of a scalar, if `value` is one.
fn raw_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
