//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and maps each failure class to a
//! stable exit code, so scripts can tell a missing key from a broken
//! deployment.

use std::fmt;

use cfx::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// I/O error writing output.
    Io(std::io::Error),

    /// A value could not be rendered in the requested format.
    Output(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Requested key not found
    /// - 2: Invalid environment identifier or prefix
    /// - 3: Application or config directory missing or unusable
    /// - 4: Config file not found or ambiguous
    /// - 5: Config file could not be read, expanded, parsed or merged
    /// - 6: Hostname, machine id or user could not be resolved
    /// - 7: Other error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::KeyNotFound { .. } => 1,
                LibError::InvalidIdentifier { .. } => 2,
                e if e.is_directory_error() => 3,
                LibError::ConfigNotFound { .. } | LibError::AmbiguousConfig { .. } => 4,
                LibError::ProviderConstruction { .. } => 5,
                LibError::HostResolution { .. } | LibError::UserResolution { .. } => 6,
                _ => 7,
            },
            CliError::Io(_) | CliError::Output(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Output(msg) => write!(f, "Output error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Output(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
