//! Two-tier YAML configuration.
//!
//! Configuration lives in the environment context's config directory:
//!
//! - `base.yaml` (or `.yml`): optional shared defaults
//! - `<environment>.yaml` (or `.yml`): required overrides for the tier
//!
//! File names match case-insensitively. Before parsing, `${NAME}` and
//! `${NAME:default}` references are expanded from the unprefixed process
//! environment. The environment layer is deep-merged over the base layer and
//! the result is exposed through a [`ConfigContainer`].
//!
//! # Examples
//!
//! ```no_run
//! use cfx::config::ConfigLoader;
//! use cfx::EnvironmentContext;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Http {
//!     port: u16,
//! }
//!
//! let ctx = EnvironmentContext::from_env("").unwrap();
//! let config = ConfigLoader::load(&ctx).unwrap();
//!
//! let mut http = Http::default();
//! config.populate("http", &mut http).unwrap();
//! ```

pub mod container;
pub mod expand;
pub mod loader;
pub mod locator;
pub mod merger;

#[cfg(test)]
mod proptests;

pub use container::ConfigContainer;
pub use expand::{expand_variables, ExpandError};
pub use loader::{ConfigLoader, BASE_CONFIG_NAME};
pub use locator::{locate_config_file, YAML_EXTENSIONS};
pub use merger::{ConfigMerger, MergeConflict};
