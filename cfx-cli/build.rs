//! Build script for cfx-cli.
//!
//! Generates the `cfx.1` man page into `OUT_DIR` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is restated here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("cfx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect environment identity and layered configuration")
        .long_about(
            "Resolve a service's environment identity and inspect its base plus \
             environment-specific YAML configuration",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Environment variable prefix (default CFX)")
                .value_name("PREFIX")
                .global(true)
                .env("CFX_PREFIX"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format for structured results")
                .value_parser(["yaml", "json"])
                .default_value("yaml")
                .global(true)
                .env("CFX_OUTPUT_FORMAT"),
        )
        .subcommands(vec![
            Command::new("env")
                .about("Print the resolved environment context")
                .long_about("Print environment tier, directories, host, runtime, deployment, user and process metadata"),
            Command::new("get")
                .about("Print a value from the merged configuration")
                .long_about("Load base and environment YAML and print the subtree at a dotted key"),
            Command::new("locate")
                .about("Print the config file path for a logical name")
                .long_about("Find <name>.yaml or <name>.yml in the config directory, case-insensitively"),
            Command::new("check")
                .about("Resolve the environment and load its configuration")
                .long_about("Run the startup sequence and report the loaded files"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("cfx.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
