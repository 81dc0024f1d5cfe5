//! `${VAR}` expansion of raw configuration text.
//!
//! Expansion runs over the file contents before YAML parsing:
//!
//! - `${NAME}` is replaced by the value of `NAME`; an unset `NAME` is an error
//! - `${NAME:default}` falls back to `default` (which may be empty)
//! - `$$` is a literal `$`
//! - any other `$` is copied through unchanged
//!
//! Variables are looked up without the environment prefix.

use std::fmt;

use crate::source::EnvSource;

/// Why expansion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// `${NAME}` with `NAME` unset and no default.
    MissingVariable {
        /// The variable name.
        name: String,
    },
    /// `${` without a closing `}`.
    Unterminated {
        /// Byte offset of the `$`.
        offset: usize,
    },
    /// `${}` or `${:default}`.
    EmptyName {
        /// Byte offset of the `$`.
        offset: usize,
    },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable { name } => write!(
                f,
                "environment variable {name} is not set and has no default (use ${{{name}:}} for an empty default)"
            ),
            Self::Unterminated { offset } => {
                write!(f, "unterminated variable reference at byte {offset}")
            }
            Self::EmptyName { offset } => {
                write!(f, "empty variable name at byte {offset}")
            }
        }
    }
}

impl std::error::Error for ExpandError {}

/// Expand variable references in `input` using `source`.
///
/// # Errors
///
/// Returns an error for an unset variable without default, an unterminated
/// `${`, or an empty variable name.
///
/// # Examples
///
/// ```
/// use cfx::config::expand_variables;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("DB_HOST".to_string(), "db.internal".to_string())]);
///
/// let out = expand_variables("host: ${DB_HOST}\nport: ${DB_PORT:5432}\n", &vars).unwrap();
/// assert_eq!(out, "host: db.internal\nport: 5432\n");
///
/// assert_eq!(expand_variables("price: $$5", &vars).unwrap(), "price: $5");
/// assert!(expand_variables("pw: ${DB_PASSWORD}", &vars).is_err());
/// ```
pub fn expand_variables(input: &str, source: &dyn EnvSource) -> Result<String, ExpandError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut offset = 0;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let at = offset + pos;

        if tail.starts_with("$$") {
            out.push('$');
            rest = &tail[2..];
            offset = at + 2;
        } else if let Some(body) = tail.strip_prefix("${") {
            let end = body.find('}').ok_or(ExpandError::Unterminated { offset: at })?;
            let reference = &body[..end];
            let (name, default) = match reference.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (reference, None),
            };
            if name.is_empty() {
                return Err(ExpandError::EmptyName { offset: at });
            }

            match source.var(name) {
                Some(value) => out.push_str(&value),
                None => match default {
                    Some(default) => out.push_str(default),
                    None => {
                        return Err(ExpandError::MissingVariable {
                            name: name.to_string(),
                        })
                    }
                },
            }

            let consumed = 2 + end + 1;
            rest = &tail[consumed..];
            offset = at + consumed;
        } else {
            out.push('$');
            rest = &tail[1..];
            offset = at + 1;
        }
    }

    out.push_str(rest);
    Ok(out)
}
