//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Name of the installed binary.
const BIN_NAME: &str = "cfx";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => eprintln!("#   eval \"$(cfx completions bash)\""),
                Shell::Zsh => eprintln!("#   cfx completions zsh > ~/.zsh/completions/_cfx"),
                Shell::Fish => {
                    eprintln!("#   cfx completions fish > ~/.config/fish/completions/cfx.fish");
                }
                Shell::PowerShell => {
                    eprintln!("#   cfx completions powershell | Out-String | Invoke-Expression");
                }
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
