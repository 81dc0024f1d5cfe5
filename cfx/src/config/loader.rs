//! Two-tier configuration loading.
//!
//! The config directory holds an optional `base` file and a required file
//! named after the environment. Both are expanded, parsed and merged, the
//! environment file winning.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::container::ConfigContainer;
use crate::config::expand::expand_variables;
use crate::config::locator::locate_config_file;
use crate::config::merger::{kind, ConfigMerger};
use crate::context::EnvironmentContext;
use crate::error::{Error, Result};
use crate::identifier::EnvId;
use crate::source::{EnvSource, ProcessEnv};

/// Logical name of the optional shared layer.
pub const BASE_CONFIG_NAME: &str = "base";

/// Loads the merged configuration for an environment.
///
/// # Examples
///
/// ```
/// use cfx::config::ConfigLoader;
/// use cfx::EnvId;
/// use std::collections::HashMap;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("base.yaml"), "service: {name: widget}\n").unwrap();
/// std::fs::write(dir.path().join("staging.yml"), "service: {port: 8080}\n").unwrap();
///
/// let env = EnvId::parse("staging").unwrap();
/// let config = ConfigLoader::load_from(dir.path(), &env, &HashMap::new()).unwrap();
///
/// let port: u16 = config.extract("service.port").unwrap();
/// let name: String = config.extract("service.name").unwrap();
/// assert_eq!((name.as_str(), port), ("widget", 8080));
/// assert_eq!(config.sources().len(), 2);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `ctx`, expanding `${NAME}` references from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_from`].
    pub fn load(ctx: &EnvironmentContext) -> Result<ConfigContainer> {
        Self::load_with(ctx, &ProcessEnv)
    }

    /// Load configuration for `ctx`, expanding references from `source`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_from`].
    pub fn load_with(ctx: &EnvironmentContext, source: &dyn EnvSource) -> Result<ConfigContainer> {
        Self::load_from(ctx.config_path(), ctx.environment(), source)
    }

    /// Load and merge `base` and `<environment>` from `config_dir`.
    ///
    /// # Errors
    ///
    /// - a directory error if `config_dir` is unusable
    /// - [`Error::ConfigNotFound`] if the environment file is missing
    /// - [`Error::AmbiguousConfig`] if either name matches several files
    /// - [`Error::ProviderConstruction`] if a file cannot be read, expanded,
    ///   parsed or merged
    pub fn load_from(
        config_dir: &Path,
        environment: &EnvId,
        source: &dyn EnvSource,
    ) -> Result<ConfigContainer> {
        let files = Self::discover(config_dir, environment)?;

        let mut merged = Value::Null;
        for path in &files {
            let Some(layer) = Self::load_file(path, source)? else {
                log::debug!("{} is empty, skipping", path.display());
                continue;
            };
            ConfigMerger::merge_into(&mut merged, layer).map_err(|conflict| {
                Error::ProviderConstruction {
                    path: path.clone(),
                    reason: conflict.to_string(),
                }
            })?;
        }

        if merged.is_null() {
            merged = Value::Mapping(serde_yaml::Mapping::new());
        }

        log::info!(
            "loaded configuration for '{environment}' from {} file(s)",
            files.len()
        );
        Ok(ConfigContainer::with_sources(merged, files))
    }

    /// The files that make up `environment`'s configuration, lowest
    /// precedence first.
    ///
    /// # Errors
    ///
    /// Same as the locating part of [`ConfigLoader::load_from`].
    pub fn discover(config_dir: &Path, environment: &EnvId) -> Result<Vec<PathBuf>> {
        let mut files = Vec::with_capacity(2);

        match locate_config_file(config_dir, BASE_CONFIG_NAME) {
            Ok(path) => files.push(path),
            Err(e) if e.is_config_not_found() => {
                log::debug!("no base config in {}", config_dir.display());
            }
            Err(e) => return Err(e),
        }

        let env_file = locate_config_file(config_dir, environment.as_str())?;
        if !files.contains(&env_file) {
            files.push(env_file);
        }

        Ok(files)
    }

    /// Read, expand and parse one layer. Returns `None` for an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderConstruction`] if the file cannot be read,
    /// references an unset variable, is not valid YAML, or is not a mapping.
    pub fn load_file(path: &Path, source: &dyn EnvSource) -> Result<Option<Value>> {
        let fail = |reason: String| Error::ProviderConstruction {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| fail(format!("failed to read file: {e}")))?;
        let expanded = expand_variables(&raw, source).map_err(|e| fail(e.to_string()))?;

        let mut document: Value =
            serde_yaml::from_str(&expanded).map_err(|e| fail(format!("invalid YAML: {e}")))?;
        document
            .apply_merge()
            .map_err(|e| fail(format!("invalid merge key: {e}")))?;

        match document {
            Value::Null => Ok(None),
            Value::Mapping(_) => Ok(Some(document)),
            other => Err(fail(format!(
                "top level must be a mapping, found a {}",
                kind(&other)
            ))),
        }
    }
}
