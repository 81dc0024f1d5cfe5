//! Error types for the cfx library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`Error`] enum defined here. Construction-time errors (environment context
//! and configuration loading) are meant to abort startup; query-time errors
//! (`populate`, `extract`) are per-call and recoverable.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::identifier::{IdentifierIssue, IdentifierKind};

/// Result type alias for operations that may fail with a cfx error.
///
/// # Examples
///
/// ```
/// use cfx::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("development")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Which directory of the environment context a path error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryRole {
    /// The application working directory (`<PREFIX>_APP_DIR`).
    AppDir,
    /// The configuration directory (`<PREFIX>_CONFIG_DIR`).
    ConfigDir,
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppDir => write!(f, "application directory"),
            Self::ConfigDir => write!(f, "config directory"),
        }
    }
}

/// The main error type for the cfx library.
#[derive(Debug, Error)]
pub enum Error {
    /// An environment identifier or environment variable prefix was malformed.
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        /// Which identifier was being parsed.
        kind: IdentifierKind,
        /// The rejected input.
        value: String,
        /// The rule the input broke.
        reason: IdentifierIssue,
    },

    /// The current working directory could not be determined.
    #[error("cannot determine current working directory: {source}")]
    WorkingDirectory {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required directory does not exist.
    #[error("{role} {} does not exist", path.display())]
    DirectoryNotFound {
        /// The directory's role.
        role: DirectoryRole,
        /// The offending path.
        path: PathBuf,
    },

    /// A required directory exists but cannot be read.
    #[error("{role} {} has too restrictive permissions", path.display())]
    DirectoryPermissionDenied {
        /// The directory's role.
        role: DirectoryRole,
        /// The offending path.
        path: PathBuf,
    },

    /// A path that must be a directory points at something else.
    #[error("{role} {} points to a file, not a directory", path.display())]
    NotADirectory {
        /// The directory's role.
        role: DirectoryRole,
        /// The offending path.
        path: PathBuf,
    },

    /// Any other OS error while inspecting a directory.
    #[error("{role} {} could not be accessed: {source}", path.display())]
    DirectoryInaccessible {
        /// The directory's role.
        role: DirectoryRole,
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The hostname or machine identifier could not be determined.
    #[error("could not determine the {what}: {source}")]
    HostResolution {
        /// What was being resolved ("hostname", "machine id").
        what: &'static str,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The current OS user could not be determined.
    #[error("could not determine the current user: {reason}")]
    UserResolution {
        /// Why resolution failed.
        reason: String,
    },

    /// No YAML file with the requested logical name exists.
    #[error("could not find config '{name}' (.yaml/.yml) in {}", directory.display())]
    ConfigNotFound {
        /// The logical config name.
        name: String,
        /// The directory that was searched.
        directory: PathBuf,
    },

    /// More than one YAML file matches the same logical name.
    #[error("config '{name}' is ambiguous, found: {}", display_paths(candidates))]
    AmbiguousConfig {
        /// The logical config name.
        name: String,
        /// All matching files, sorted.
        candidates: Vec<PathBuf>,
    },

    /// A config layer could not be read, expanded or parsed.
    #[error("error constructing yaml configuration from {}: {reason}", path.display())]
    ProviderConstruction {
        /// The file that failed.
        path: PathBuf,
        /// The failure.
        reason: String,
    },

    /// A query was made against a container that never loaded a document.
    #[error("no configuration files were loaded into the container")]
    NoConfigLoaded,

    /// The requested key is absent from the merged document.
    #[error("configuration key '{key}' not found")]
    KeyNotFound {
        /// The dotted key.
        key: String,
    },

    /// A subtree could not be deserialized into the requested type.
    #[error("failed to populate '{key}': {source}")]
    Populate {
        /// The dotted key.
        key: String,
        /// The deserialization error.
        #[source]
        source: serde_yaml::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<crate::identifier::InvalidIdentifierError> for Error {
    fn from(err: crate::identifier::InvalidIdentifierError) -> Self {
        Self::InvalidIdentifier {
            kind: err.kind,
            value: err.value,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Check if the error is the expected "no such config file" outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfx::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ConfigNotFound {
    ///     name: "base".into(),
    ///     directory: PathBuf::from("/etc/app"),
    /// };
    /// assert!(err.is_config_not_found());
    /// ```
    #[must_use]
    pub fn is_config_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }

    /// Check if the error concerns a missing or unusable directory.
    #[must_use]
    pub fn is_directory_error(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. }
                | Self::DirectoryPermissionDenied { .. }
                | Self::NotADirectory { .. }
                | Self::DirectoryInaccessible { .. }
                | Self::WorkingDirectory { .. }
        )
    }

    /// Check if the error is an identifier validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }

    /// The directory role for path errors, if any.
    #[must_use]
    pub fn directory_role(&self) -> Option<DirectoryRole> {
        match self {
            Self::DirectoryNotFound { role, .. }
            | Self::DirectoryPermissionDenied { role, .. }
            | Self::NotADirectory { role, .. }
            | Self::DirectoryInaccessible { role, .. } => Some(*role),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_error() {
        let err = Error::DirectoryNotFound {
            role: DirectoryRole::ConfigDir,
            path: PathBuf::from("/srv/app/config"),
        };
        let display = format!("{err}");
        assert!(display.contains("config directory"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/srv/app/config"));
        assert!(display.contains("does not exist"));
        assert!(err.is_directory_error());
        assert_eq!(err.directory_role(), Some(DirectoryRole::ConfigDir));
    }

    #[test]
    fn test_not_a_directory_error() {
        let err = Error::NotADirectory {
            role: DirectoryRole::AppDir,
            path: PathBuf::from("/srv/app/main.rs"),
        };
        let display = format!("{err}");
        assert!(display.contains("application directory"));
        assert!(display.contains("not a directory"));
    }

    #[test]
    fn test_invalid_identifier_error() {
        let err = Error::InvalidIdentifier {
            kind: IdentifierKind::Environment,
            value: "Prod".to_string(),
            reason: IdentifierIssue::InvalidCharacters,
        };
        let display = format!("{err}");
        assert!(display.contains("environment identifier"));
        assert!(display.contains("Prod"));
        assert!(err.is_validation());
        assert!(!err.is_directory_error());
    }

    #[test]
    fn test_config_not_found_error() {
        let err = Error::ConfigNotFound {
            name: "staging".to_string(),
            directory: PathBuf::from("/srv/app/config"),
        };
        assert!(format!("{err}").contains("staging"));
        assert!(err.is_config_not_found());
    }

    #[test]
    fn test_ambiguous_config_lists_candidates() {
        let err = Error::AmbiguousConfig {
            name: "base".to_string(),
            candidates: vec![PathBuf::from("/c/Base.yaml"), PathBuf::from("/c/base.yml")],
        };
        let display = format!("{err}");
        assert!(display.contains("Base.yaml"));
        assert!(display.contains("base.yml"));
        assert!(!err.is_config_not_found());
    }

    #[test]
    fn test_no_config_loaded_error() {
        let display = format!("{}", Error::NoConfigLoaded);
        assert!(display.contains("no configuration files were loaded"));
    }

    #[test]
    fn test_host_resolution_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no machine-id");
        let err = Error::HostResolution {
            what: "machine id",
            source: Box::new(io_err),
        };
        let display = format!("{err}");
        assert!(display.contains("machine id"));
        assert!(display.contains("no machine-id"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::NoConfigLoaded)
        }

        assert!(returns_result().is_err());
    }
}
