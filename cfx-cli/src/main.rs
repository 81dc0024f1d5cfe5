//! Main entry point for the cfx CLI.
//!
//! Commands:
//! - `env`: Print the resolved environment context
//! - `get`: Print a value from the merged configuration
//! - `locate`: Print the file backing a logical config name
//! - `check`: Run the startup sequence and report what was loaded
//! - `completions`: Generate shell completion scripts

use cfx_cli::{Cli, Command};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let global = cli.global_options();

    if let Err(e) = cfx::init_logger(global.verbose, global.quiet).install() {
        eprintln!("warning: logging unavailable: {e}");
    }

    log::debug!("prefix '{}', format {:?}", global.prefix, global.format);

    let result = match cli.command {
        Command::Env(cmd) => cmd.execute(&global),
        Command::Get(cmd) => cmd.execute(&global),
        Command::Locate(cmd) => cmd.execute(&global),
        Command::Check(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
