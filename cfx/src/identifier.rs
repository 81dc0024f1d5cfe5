//! Environment identifier and environment variable prefix types.
//!
//! Both are validated newtypes: once constructed they are known to satisfy
//! their character and length rules, so the rest of the crate never
//! re-checks them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum length of a non-default identifier or prefix.
pub const MIN_LEN: usize = 2;

/// Maximum length of an identifier or prefix.
pub const MAX_LEN: usize = 64;

/// The deployment tier a process runs in, e.g. `development` or `staging`.
///
/// Valid identifiers are 2-64 characters of lowercase ASCII letters and
/// digits. The empty string parses to the default, `development`.
///
/// # Examples
///
/// ```
/// use cfx::EnvId;
///
/// let env = EnvId::parse("staging").unwrap();
/// assert_eq!(env.as_str(), "staging");
///
/// // Empty input yields the default
/// assert_eq!(EnvId::parse("").unwrap(), EnvId::default());
///
/// // Uppercase is rejected
/// assert!(EnvId::parse("Staging").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnvId(String);

impl EnvId {
    /// The identifier used when none is configured.
    pub const DEFAULT: &'static str = "development";

    /// Parse and validate an environment identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is longer than 64 or shorter than 2
    /// characters, or contains anything other than `[a-z0-9]`.
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifierError> {
        if value.is_empty() {
            return Ok(Self::default());
        }

        check_length(IdentifierKind::Environment, value)?;

        if !value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(InvalidIdentifierError::new(
                IdentifierKind::Environment,
                value,
                IdentifierIssue::InvalidCharacters,
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the default identifier.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for EnvId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Prefix that namespaces every environment variable lookup.
///
/// A variable suffix `X` is looked up as `PREFIX_X`. Valid prefixes are 2-64
/// characters of uppercase ASCII letters, digits and `_`, and may not start or
/// end with `_`. The empty string parses to the default, `CFX`.
///
/// # Examples
///
/// ```
/// use cfx::EnvKeyPrefix;
///
/// let prefix = EnvKeyPrefix::parse("MY_APP").unwrap();
/// assert_eq!(prefix.key("REGION"), "MY_APP_REGION");
///
/// assert_eq!(EnvKeyPrefix::parse("").unwrap().key("REGION"), "CFX_REGION");
/// assert!(EnvKeyPrefix::parse("_APP").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnvKeyPrefix(String);

impl EnvKeyPrefix {
    /// The prefix used when none is configured.
    pub const DEFAULT: &'static str = "CFX";

    /// Separator placed between the prefix and a variable suffix.
    pub const SEPARATOR: char = '_';

    /// Parse and validate an environment variable prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has an invalid length, starts or ends
    /// with `_`, or contains anything other than `[A-Z0-9_]`.
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifierError> {
        if value.is_empty() {
            return Ok(Self::default());
        }

        check_length(IdentifierKind::EnvPrefix, value)?;

        if value.starts_with(Self::SEPARATOR) || value.ends_with(Self::SEPARATOR) {
            return Err(InvalidIdentifierError::new(
                IdentifierKind::EnvPrefix,
                value,
                IdentifierIssue::InvalidBoundary,
            ));
        }

        if !value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        {
            return Err(InvalidIdentifierError::new(
                IdentifierKind::EnvPrefix,
                value,
                IdentifierIssue::InvalidCharacters,
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the namespaced variable name for `suffix`.
    #[must_use]
    pub fn key(&self, suffix: &str) -> String {
        format!("{}{}{suffix}", self.0, Self::SEPARATOR)
    }
}

impl Default for EnvKeyPrefix {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

fn check_length(kind: IdentifierKind, value: &str) -> Result<(), InvalidIdentifierError> {
    if value.len() > MAX_LEN || value.len() < MIN_LEN {
        return Err(InvalidIdentifierError::new(
            kind,
            value,
            IdentifierIssue::InvalidLength { len: value.len() },
        ));
    }
    Ok(())
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl FromStr for $ty {
            type Err = InvalidIdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = InvalidIdentifierError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = InvalidIdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype_impls!(EnvId);
string_newtype_impls!(EnvKeyPrefix);

/// Which kind of identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// An environment identifier ([`EnvId`]).
    Environment,
    /// An environment variable prefix ([`EnvKeyPrefix`]).
    EnvPrefix,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment identifier"),
            Self::EnvPrefix => write!(f, "env key prefix"),
        }
    }
}

/// The validation rule an identifier broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierIssue {
    /// Length outside `2..=64`.
    InvalidLength {
        /// The length of the rejected input, in bytes.
        len: usize,
    },
    /// A prefix starting or ending with `_`.
    InvalidBoundary,
    /// A character outside the allowed set.
    InvalidCharacters,
}

impl fmt::Display for IdentifierIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => write!(
                f,
                "must be between {MIN_LEN} and {MAX_LEN} characters long (got {len})"
            ),
            Self::InvalidBoundary => write!(f, "cannot start or end with an underscore"),
            Self::InvalidCharacters => write!(f, "contains invalid characters"),
        }
    }
}

/// Error type for rejected identifiers and prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifierError {
    /// Which identifier was being parsed.
    pub kind: IdentifierKind,
    /// The rejected input.
    pub value: String,
    /// The rule the input broke.
    pub reason: IdentifierIssue,
}

impl InvalidIdentifierError {
    fn new(kind: IdentifierKind, value: &str, reason: IdentifierIssue) -> Self {
        Self {
            kind,
            value: value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for InvalidIdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} '{}': {}", self.kind, self.value, self.reason)
    }
}

impl std::error::Error for InvalidIdentifierError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_id_default() {
        let env = EnvId::parse("").unwrap();
        assert_eq!(env.as_str(), "development");
        assert!(env.is_default());
    }

    #[test]
    fn test_env_id_valid() {
        for value in ["qa", "staging", "prod2", "12", &"a".repeat(64)] {
            assert_eq!(EnvId::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_env_id_length_checked_before_characters() {
        let err = EnvId::parse(&"A".repeat(65)).unwrap_err();
        assert_eq!(err.reason, IdentifierIssue::InvalidLength { len: 65 });

        let err = EnvId::parse("A").unwrap_err();
        assert_eq!(err.reason, IdentifierIssue::InvalidLength { len: 1 });
    }

    #[test]
    fn test_env_id_invalid_characters() {
        for value in ["Prod", "dev-1", "dev_1", "dév", "qa "] {
            let err = EnvId::parse(value).unwrap_err();
            assert_eq!(err.reason, IdentifierIssue::InvalidCharacters, "{value}");
            assert_eq!(err.kind, IdentifierKind::Environment);
        }
    }

    #[test]
    fn test_prefix_default_and_key() {
        let prefix = EnvKeyPrefix::parse("").unwrap();
        assert_eq!(prefix.as_str(), "CFX");
        assert_eq!(prefix.key("APP_DIR"), "CFX_APP_DIR");
    }

    #[test]
    fn test_prefix_valid() {
        for value in ["AB", "MY_APP", "APP2", "A_B_C"] {
            assert_eq!(EnvKeyPrefix::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_prefix_boundary_underscore() {
        for value in ["_APP", "APP_", "__"] {
            let err = EnvKeyPrefix::parse(value).unwrap_err();
            assert_eq!(err.reason, IdentifierIssue::InvalidBoundary, "{value}");
        }
    }

    #[test]
    fn test_prefix_invalid_characters() {
        for value in ["app", "MY-APP", "MY APP", "Ab"] {
            let err = EnvKeyPrefix::parse(value).unwrap_err();
            assert_eq!(err.reason, IdentifierIssue::InvalidCharacters, "{value}");
        }
    }

    #[test]
    fn test_prefix_length() {
        assert!(EnvKeyPrefix::parse("A").is_err());
        assert!(EnvKeyPrefix::parse(&"A".repeat(65)).is_err());
        assert!(EnvKeyPrefix::parse(&"A".repeat(64)).is_ok());
    }

    #[test]
    fn test_from_str_and_display() {
        let env: EnvId = "qa".parse().unwrap();
        assert_eq!(format!("{env}"), "qa");
        let prefix: EnvKeyPrefix = "SVC".parse().unwrap();
        assert_eq!(prefix.to_string(), "SVC");
    }

    #[test]
    fn test_serde_validates() {
        let env: EnvId = serde_yaml::from_str("staging").unwrap();
        assert_eq!(env.as_str(), "staging");
        assert!(serde_yaml::from_str::<EnvId>("Staging").is_err());
        assert_eq!(serde_yaml::to_string(&env).unwrap().trim(), "staging");
    }

    #[test]
    fn test_error_display() {
        let err = EnvKeyPrefix::parse("_X").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("env key prefix"));
        assert!(display.contains("underscore"));
    }
}
