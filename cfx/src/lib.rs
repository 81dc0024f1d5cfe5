#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cfx
//!
//! Environment identity and two-tier YAML configuration for services.
//!
//! At startup a process resolves its [`EnvironmentContext`] (deployment
//! tier, application and config directories, host, user and process
//! metadata), then loads `base.yaml` merged with `<environment>.yaml` from
//! the config directory into a [`ConfigContainer`]. Subsystems pull their
//! own typed subtree out of the container, concurrently if they like.
//!
//! ## Core Types
//!
//! - [`EnvId`] and [`EnvKeyPrefix`]: validated identifiers
//! - [`EnvironmentContext`]: resolved process identity
//! - [`ConfigLoader`] and [`ConfigContainer`]: loading and querying
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: stderr backend for the `log` facade
//!
//! ## Examples
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Service {
//!     name: String,
//!     port: u16,
//! }
//!
//! let (ctx, config) = cfx::bootstrap("").unwrap();
//! println!("running in {}", ctx.environment());
//!
//! let mut service = Service::default();
//! config.populate("service", &mut service).unwrap();
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod path;
pub mod source;

// Re-export key types at crate root for convenience
pub use config::{ConfigContainer, ConfigLoader};
pub use context::{
    DeploymentContext, EnvironmentContext, EnvironmentContextBuilder, HostContext, OsProbe,
    ProcessContext, RuntimeContext, SystemProbe, UserContext,
};
pub use error::{DirectoryRole, Error, Result};
pub use identifier::{EnvId, EnvKeyPrefix, IdentifierIssue, IdentifierKind, InvalidIdentifierError};
pub use logging::{init_logger, LogLevel, Logger};
pub use source::{EnvSource, EnvVar, ProcessEnv};

/// Resolve the environment context and load its configuration.
///
/// `prefix` namespaces the environment variables; an empty string means
/// `CFX`. Any error here should abort startup.
///
/// # Errors
///
/// Returns the first error from [`EnvironmentContext::from_env`] or
/// [`ConfigLoader::load`].
pub fn bootstrap(prefix: &str) -> Result<(EnvironmentContext, ConfigContainer)> {
    let ctx = EnvironmentContext::from_env(prefix)?;
    let config = ConfigLoader::load(&ctx)?;
    Ok((ctx, config))
}
