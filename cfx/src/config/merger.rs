//! Deep merging of YAML documents.
//!
//! Layers are merged in order, later layers overriding earlier ones:
//!
//! - mapping onto mapping: keys merge recursively
//! - scalar onto scalar, sequence onto sequence: the later value replaces
//!   the earlier one (sequences are not concatenated)
//! - explicit `null`: clears the earlier value
//! - anything onto `null` or a missing key: taken as-is
//! - mismatched kinds (e.g. a scalar onto a mapping): an error

use std::fmt;

use serde_yaml::{Mapping, Value};

/// Two values of incompatible kinds met at the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Dotted path of the conflicting key (empty for the document root).
    pub path: String,
    /// Kind of the earlier value.
    pub existing: &'static str,
    /// Kind of the overriding value.
    pub incoming: &'static str,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.path.is_empty() {
            "document root"
        } else {
            self.path.as_str()
        };
        write!(
            f,
            "can't merge a {} and a {} at {at}",
            self.existing, self.incoming
        )
    }
}

impl std::error::Error for MergeConflict {}

/// Merges YAML documents by precedence.
///
/// # Examples
///
/// ```
/// use cfx::config::ConfigMerger;
///
/// let base: serde_yaml::Value = serde_yaml::from_str("a: {x: 1, y: 2}").unwrap();
/// let env: serde_yaml::Value = serde_yaml::from_str("a: {y: 3, z: 4}").unwrap();
///
/// let merged = ConfigMerger::merge(vec![base, env]).unwrap();
/// let expected: serde_yaml::Value = serde_yaml::from_str("a: {x: 1, y: 3, z: 4}").unwrap();
/// assert_eq!(merged, expected);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge layers ordered from lowest to highest precedence.
    ///
    /// An empty list yields `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeConflict`] if two layers disagree on a value's kind.
    pub fn merge(layers: Vec<Value>) -> Result<Value, MergeConflict> {
        let mut result = Value::Null;
        for layer in layers {
            Self::merge_into(&mut result, layer)?;
        }
        Ok(result)
    }

    /// Merge `source` into `target`, `source` winning.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeConflict`] if the kinds of `target` and `source` (or
    /// of any nested pair) are incompatible.
    pub fn merge_into(target: &mut Value, source: Value) -> Result<(), MergeConflict> {
        merge_at(target, source, &mut Vec::new())
    }
}

fn merge_at(target: &mut Value, source: Value, path: &mut Vec<String>) -> Result<(), MergeConflict> {
    let existing = kind(target);
    let incoming = kind(&source);

    match (target, source) {
        (Value::Mapping(into), Value::Mapping(from)) => merge_mapping(into, from, path),
        (target, source) if existing == incoming || existing == "null" || incoming == "null" => {
            *target = source;
            Ok(())
        }
        _ => Err(MergeConflict {
            path: path.join("."),
            existing,
            incoming,
        }),
    }
}

fn merge_mapping(
    into: &mut Mapping,
    from: Mapping,
    path: &mut Vec<String>,
) -> Result<(), MergeConflict> {
    for (key, value) in from {
        match into.get_mut(&key) {
            Some(existing) => {
                path.push(key_label(&key));
                let merged = merge_at(existing, value, path);
                path.pop();
                merged?;
            }
            None => {
                into.insert(key, value);
            }
        }
    }
    Ok(())
}

/// Human-readable kind of a YAML value.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Tagged(_) => "scalar",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "?".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_nested_override() {
        let merged =
            ConfigMerger::merge(vec![yaml("a: {x: 1, y: 2}"), yaml("a: {y: 3, z: 4}")]).unwrap();
        assert_eq!(merged, yaml("a: {x: 1, y: 3, z: 4}"));
    }

    #[test]
    fn test_disjoint_top_level_keys() {
        let merged = ConfigMerger::merge(vec![
            yaml("service: {name: widget}"),
            yaml("logging: {level: debug}"),
        ])
        .unwrap();
        assert_eq!(
            merged,
            yaml("service: {name: widget}\nlogging: {level: debug}")
        );
    }

    #[test]
    fn test_sequences_replace() {
        let merged =
            ConfigMerger::merge(vec![yaml("hosts: [a, b, c]"), yaml("hosts: [d]")]).unwrap();
        assert_eq!(merged, yaml("hosts: [d]"));
    }

    #[test]
    fn test_scalars_replace_across_types() {
        let merged = ConfigMerger::merge(vec![yaml("port: 80"), yaml("port: \"8080\"")]).unwrap();
        assert_eq!(merged, yaml("port: \"8080\""));
    }

    #[test]
    fn test_null_clears() {
        let merged = ConfigMerger::merge(vec![yaml("a: {x: 1}"), yaml("a: ~")]).unwrap();
        assert_eq!(merged, yaml("a: ~"));
    }

    #[test]
    fn test_value_onto_null() {
        let merged = ConfigMerger::merge(vec![yaml("a: ~"), yaml("a: {x: 1}")]).unwrap();
        assert_eq!(merged, yaml("a: {x: 1}"));
    }

    #[test]
    fn test_kind_mismatch_reports_path() {
        let err = ConfigMerger::merge(vec![yaml("db: {pool: {size: 5}}"), yaml("db: {pool: 10}")])
            .unwrap_err();
        assert_eq!(err.path, "db.pool");
        assert_eq!(err.existing, "mapping");
        assert_eq!(err.incoming, "scalar");
        assert!(err.to_string().contains("db.pool"));
    }

    #[test]
    fn test_sequence_onto_scalar_conflicts() {
        let err = ConfigMerger::merge(vec![yaml("a: 1"), yaml("a: [1]")]).unwrap_err();
        assert_eq!(err.existing, "scalar");
        assert_eq!(err.incoming, "sequence");
    }

    #[test]
    fn test_empty_layers() {
        assert_eq!(ConfigMerger::merge(Vec::new()).unwrap(), Value::Null);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let layer = yaml("a: {x: 1, y: [1, 2]}\nb: text");
        let once = ConfigMerger::merge(vec![layer.clone()]).unwrap();
        let twice = ConfigMerger::merge(vec![layer.clone(), layer]).unwrap();
        assert_eq!(once, twice);
    }
}
