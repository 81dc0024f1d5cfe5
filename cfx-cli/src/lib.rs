//! Library exports for cfx-cli.
//!
//! The binary in `main.rs` is a thin wrapper over these modules; keeping
//! them in a library lets unit tests reach the CLI definition directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::{Cli, Command};
pub use error::CliError;
