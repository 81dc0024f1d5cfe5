//! Process environment identity.
//!
//! An [`EnvironmentContext`] is a snapshot of where and as what the process
//! runs: its deployment tier, application and configuration directories,
//! and host, runtime, deployment, user and process metadata. It is built once
//! at startup and never mutated.
//!
//! Construction is all-or-nothing: if any directory, host or user lookup
//! fails, no context is returned.
//!
//! # Environment Variables
//!
//! All variables are namespaced by the [`EnvKeyPrefix`] (default `CFX`):
//!
//! | Variable | Effect |
//! |---|---|
//! | `CFX_ENVIRONMENT` | deployment tier, default `development` |
//! | `CFX_APP_DIR` | application directory, default working directory |
//! | `CFX_CONFIG_DIR` | configuration directory, default `<app dir>/config` |
//! | `CFX_APP_ID`, `CFX_SERVICE_ID`, `CFX_INSTANCE_ID` | deployment identifiers |
//! | `CFX_REGION`, `CFX_AVAILABILITY_ZONE` | location |
//! | `CFX_NETWORK_ID`, `CFX_DATACENTER_ID` | network and datacenter tags |
//!
//! The unprefixed `TZ` variable, when set, names the timezone.
//!
//! # Examples
//!
//! ```
//! use cfx::{EnvironmentContext, SystemProbe, UserContext};
//! use std::collections::HashMap;
//! use std::io;
//! use std::path::PathBuf;
//!
//! struct Fixed(PathBuf);
//!
//! impl SystemProbe for Fixed {
//!     fn hostname(&self) -> io::Result<String> { Ok("web-1".into()) }
//!     fn machine_id(&self) -> io::Result<String> { Ok("abc123".into()) }
//!     fn current_user(&self) -> io::Result<Option<UserContext>> {
//!         Ok(Some(UserContext { username: "svc".into(), uid: "1000".into(), gid: "1000".into() }))
//!     }
//!     fn parent_pid(&self) -> u32 { 1 }
//!     fn current_dir(&self) -> io::Result<PathBuf> { Ok(self.0.clone()) }
//!     fn timezone(&self) -> String { "UTC".into() }
//! }
//!
//! let app = tempfile::tempdir().unwrap();
//! std::fs::create_dir(app.path().join("config")).unwrap();
//!
//! let vars = HashMap::from([("CFX_ENVIRONMENT".to_string(), "staging".to_string())]);
//! let ctx = EnvironmentContext::builder()
//!     .env_source(vars)
//!     .probe(Fixed(app.path().to_path_buf()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(ctx.environment().as_str(), "staging");
//! assert_eq!(ctx.config_path(), app.path().join("config"));
//! assert_eq!(ctx.host().hostname, "web-1");
//! ```

pub mod probe;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryRole, Error, Result};
use crate::identifier::{EnvId, EnvKeyPrefix};
use crate::path;
use crate::source::{EnvSource, EnvVar, ProcessEnv};

pub use probe::{OsProbe, SystemProbe};

/// Subdirectory of the application directory used when no config directory
/// is configured.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Compiler version captured at build time.
pub const RUSTC_VERSION: &str = match option_env!("CFX_RUSTC_VERSION") {
    Some(version) => version,
    None => "unknown",
};

/// Information about the underlying host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Name of the machine running the process.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    /// Stable identifier of the OS installation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Local timezone.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timezone: String,
}

/// Platform and toolchain of the running binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeContext {
    /// Operating system (`std::env::consts::OS`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os: String,
    /// CPU architecture (`std::env::consts::ARCH`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arch: String,
    /// Compiler version the binary was built with.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl RuntimeContext {
    /// The platform of the current binary.
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            version: RUSTC_VERSION.to_string(),
        }
    }
}

/// Free-form deployment identifiers, all read from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentContext {
    /// Application identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_id: String,
    /// Service identifier grouping related apps.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    /// Instance identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_id: String,
    /// Region.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    /// Zone within the region.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub availability_zone: String,
    /// Network classification.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_id: String,
    /// Datacenter classification.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter_id: String,
}

impl DeploymentContext {
    fn from_source(prefix: &EnvKeyPrefix, source: &dyn EnvSource) -> Self {
        Self {
            app_id: EnvVar::AppId.read(prefix, source),
            service_id: EnvVar::ServiceId.read(prefix, source),
            instance_id: EnvVar::InstanceId.read(prefix, source),
            region: EnvVar::Region.read(prefix, source),
            availability_zone: EnvVar::AvailabilityZone.read(prefix, source),
            network_id: EnvVar::NetworkId.read(prefix, source),
            datacenter_id: EnvVar::DatacenterId.read(prefix, source),
        }
    }
}

/// The OS user the process runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Login name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Numeric user ID, as a string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    /// Numeric primary group ID, as a string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gid: String,
}

/// Process identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessContext {
    /// This process.
    pub pid: u32,
    /// The parent process.
    pub ppid: u32,
}

/// Snapshot of the running process's environment identity.
///
/// Only [`EnvironmentContextBuilder::build`] creates one, so a context always
/// carries validated identifiers and existing directories. It serializes for
/// display but does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentContext {
    environment: EnvId,
    env_prefix: EnvKeyPrefix,
    app_path: PathBuf,
    config_path: PathBuf,
    host: HostContext,
    runtime: RuntimeContext,
    deployment: DeploymentContext,
    user: UserContext,
    process: ProcessContext,
}

impl EnvironmentContext {
    /// Build a context from the process environment and the running OS.
    ///
    /// `prefix` namespaces every variable lookup; empty means `CFX`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix or `ENVIRONMENT` value is invalid, the
    /// hostname, machine id or user cannot be resolved, or either directory
    /// is missing, unreadable or not a directory.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::builder().prefix(prefix).build()
    }

    /// Start building a context with injected lookups.
    #[must_use]
    pub fn builder() -> EnvironmentContextBuilder {
        EnvironmentContextBuilder::new()
    }

    /// The deployment tier.
    #[must_use]
    pub fn environment(&self) -> &EnvId {
        &self.environment
    }

    /// The prefix used for environment variable lookups.
    #[must_use]
    pub fn env_prefix(&self) -> &EnvKeyPrefix {
        &self.env_prefix
    }

    /// Absolute application directory.
    #[must_use]
    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    /// Absolute configuration directory.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Host block.
    #[must_use]
    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Runtime block.
    #[must_use]
    pub fn runtime(&self) -> &RuntimeContext {
        &self.runtime
    }

    /// Deployment block.
    #[must_use]
    pub fn deployment(&self) -> &DeploymentContext {
        &self.deployment
    }

    /// User block.
    #[must_use]
    pub fn user(&self) -> &UserContext {
        &self.user
    }

    /// Process block.
    #[must_use]
    pub fn process(&self) -> ProcessContext {
        self.process
    }
}

/// Builder for [`EnvironmentContext`].
///
/// Defaults to the `CFX` prefix, the process environment and [`OsProbe`].
pub struct EnvironmentContextBuilder {
    prefix: String,
    source: Arc<dyn EnvSource>,
    probe: Arc<dyn SystemProbe>,
}

impl Default for EnvironmentContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentContextBuilder {
    /// A builder with default lookups.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            source: Arc::new(ProcessEnv),
            probe: Arc::new(OsProbe),
        }
    }

    /// Set the environment variable prefix (validated in `build`).
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Read environment variables from `source` instead of the process.
    #[must_use]
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Query host and user identity from `probe` instead of the OS.
    #[must_use]
    pub fn probe(mut self, probe: impl SystemProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Resolve and validate the context.
    ///
    /// # Errors
    ///
    /// See [`EnvironmentContext::from_env`].
    pub fn build(self) -> Result<EnvironmentContext> {
        let source = self.source.as_ref();
        let probe = self.probe.as_ref();

        let env_prefix = EnvKeyPrefix::parse(&self.prefix)?;

        let config_dir = EnvVar::ConfigDir.read(&env_prefix, source);
        let app_dir = EnvVar::AppDir.read(&env_prefix, source);
        let deployment = DeploymentContext::from_source(&env_prefix, source);

        let timezone = source
            .var("TZ")
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| probe.timezone());
        let process = ProcessContext {
            pid: std::process::id(),
            ppid: probe.parent_pid(),
        };

        let hostname = probe.hostname().map_err(|e| Error::HostResolution {
            what: "hostname",
            source: Box::new(e),
        })?;
        let uuid = probe.machine_id().map_err(|e| Error::HostResolution {
            what: "machine id",
            source: Box::new(e),
        })?;

        let user = probe
            .current_user()
            .map_err(|e| Error::UserResolution {
                reason: e.to_string(),
            })?
            .ok_or_else(|| Error::UserResolution {
                reason: "current user lookup not supported on this system".to_string(),
            })?;

        let environment = match EnvVar::Environment.read(&env_prefix, source) {
            value if value.is_empty() => EnvId::default(),
            value => EnvId::parse(&value)?,
        };
        log::debug!(
            "environment is '{environment}' ({})",
            EnvVar::Environment.key(&env_prefix)
        );

        // only consulted for an unset or relative directory
        let working_dir = || {
            probe
                .current_dir()
                .map_err(|source| Error::WorkingDirectory { source })
        };

        let app_path = if app_dir.is_empty() {
            working_dir()?
        } else {
            PathBuf::from(app_dir)
        };
        let app_path = resolve_against(DirectoryRole::AppDir, &app_path, working_dir)?;

        let config_path = if config_dir.is_empty() {
            app_path.join(DEFAULT_CONFIG_DIR)
        } else {
            PathBuf::from(config_dir)
        };
        let config_path = resolve_against(DirectoryRole::ConfigDir, &config_path, working_dir)?;

        let ctx = EnvironmentContext {
            environment,
            env_prefix,
            app_path,
            config_path,
            host: HostContext {
                hostname,
                uuid,
                timezone,
            },
            runtime: RuntimeContext::current(),
            deployment,
            user,
            process,
        };

        log::info!(
            "environment context ready: env={} config={}",
            ctx.environment,
            ctx.config_path.display()
        );

        Ok(ctx)
    }
}

fn resolve_against(
    role: DirectoryRole,
    dir: &Path,
    working_dir: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    let base = if dir.is_absolute() {
        PathBuf::new()
    } else {
        working_dir()?
    };
    path::resolve_directory(role, dir, &base)
}
