//! Thread-safe query surface over the merged configuration document.
//!
//! # Field Mapping
//!
//! Subtrees are deserialized with serde, so the target type's derive
//! attributes define the mapping:
//!
//! - field names match YAML keys verbatim; use `#[serde(rename = "...")]` or
//!   `#[serde(rename_all = "...")]` to change that
//! - [`ConfigContainer::populate`] overlays the subtree on the target, so
//!   fields the document omits keep their current values; `extract` builds a
//!   fresh value and relies on `#[serde(default)]` for omitted keys
//! - `#[serde(deny_unknown_fields)]` turns stray keys into errors
//!
//! # Keys
//!
//! Keys are dotted paths into nested mappings: `"db.pool"` addresses
//! `pool` inside `db`. The empty key addresses the whole document.
//!
//! # Examples
//!
//! ```
//! use cfx::ConfigContainer;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Service {
//!     name: String,
//!     #[serde(default)]
//!     port: u16,
//! }
//!
//! let doc = serde_yaml::from_str("service: {name: widget, port: 8080}").unwrap();
//! let container = ConfigContainer::new(doc);
//!
//! let mut service = Service::default();
//! container.populate("service", &mut service).unwrap();
//! assert_eq!(service.name, "widget");
//! assert_eq!(service.port, 8080);
//!
//! let port: u16 = container.extract("service.port").unwrap();
//! assert_eq!(port, 8080);
//! ```

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;

use super::merger::ConfigMerger;
use crate::error::{Error, Result};

/// Read-mostly holder of the merged configuration document.
///
/// The document is an immutable snapshot behind a read/write lock. Queries
/// take the read side and may run concurrently; the only writer swaps the
/// whole snapshot. A default-constructed container holds no document and
/// every query fails with [`Error::NoConfigLoaded`].
///
/// Cloning is cheap and clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct ConfigContainer {
    document: Arc<RwLock<Option<Arc<Value>>>>,
    sources: Arc<[PathBuf]>,
}

impl ConfigContainer {
    /// Wrap an already merged document.
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self::with_sources(document, Vec::new())
    }

    /// Wrap a merged document, recording the files it came from.
    #[must_use]
    pub fn with_sources(document: Value, sources: Vec<PathBuf>) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(Arc::new(document)))),
            sources: sources.into(),
        }
    }

    /// Files merged into this container, lowest precedence first.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Returns `true` if a document has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// The current document snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoConfigLoaded`] if no document was loaded.
    pub fn snapshot(&self) -> Result<Arc<Value>> {
        self.read().ok_or(Error::NoConfigLoaded)
    }

    /// Write the subtree at `key` onto `target`.
    ///
    /// Keys present in the subtree replace the matching fields of `target`,
    /// nested mappings field by field. Fields the subtree omits keep their
    /// current values. If `key` is absent, `target` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoConfigLoaded`] if no document was loaded, or
    /// [`Error::Populate`] if the subtree does not fit `T`. On error `target`
    /// is unchanged.
    pub fn populate<T>(&self, key: &str, target: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let document = self.snapshot()?;
        let Some(value) = lookup(&document, key) else {
            log::debug!("config key '{key}' not present, keeping defaults");
            return Ok(());
        };

        let mut current = serde_yaml::to_value(&*target).map_err(|source| Error::Populate {
            key: key.to_string(),
            source,
        })?;
        let overlay = match ConfigMerger::merge_into(&mut current, value.clone()) {
            Ok(()) => current,
            // a kind clash is reported by deserializing the subtree alone
            Err(conflict) => {
                log::debug!("config key '{key}' does not overlay target: {conflict}");
                value.clone()
            }
        };

        *target = deserialize(key, &overlay)?;
        Ok(())
    }

    /// Deserialize and return the subtree at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoConfigLoaded`] if no document was loaded,
    /// [`Error::KeyNotFound`] if `key` is absent, or [`Error::Populate`] if
    /// the subtree does not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let document = self.snapshot()?;
        let value = lookup(&document, key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })?;
        deserialize(key, value)
    }

    /// Returns `true` if `key` is present in the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoConfigLoaded`] if no document was loaded.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let document = self.snapshot()?;
        Ok(lookup(&document, key).is_some())
    }

    /// Swap in a new document. Readers holding the old snapshot keep it.
    #[allow(dead_code)]
    pub(crate) fn replace(&self, document: Value) {
        let mut guard = self
            .document
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(Arc::new(document));
    }

    fn read(&self) -> Option<Arc<Value>> {
        // the guarded value is an immutable snapshot, so a poisoned lock is still sound
        self.document
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

/// Walk `key`'s dotted segments through nested mappings.
fn lookup<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return Some(document);
    }

    key.split('.')
        .try_fold(document, |node, segment| node.as_mapping()?.get(segment))
}

fn deserialize<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    T::deserialize(value.clone()).map_err(|source| Error::Populate {
        key: key.to_string(),
        source,
    })
}
