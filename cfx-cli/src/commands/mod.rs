//! CLI command implementations.
//!
//! - `env`: Print the resolved environment context
//! - `get`: Print a value from the merged configuration
//! - `locate`: Print the file backing a logical config name
//! - `check`: Run the startup sequence and report what was loaded
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod env;
pub mod get;
pub mod locate;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use env::EnvCommand;
pub use get::GetCommand;
pub use locate::LocateCommand;
