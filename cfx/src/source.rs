//! Environment variable lookup.
//!
//! Nothing in this crate reads `std::env` directly. Lookups go through an
//! [`EnvSource`], so tests can hand in a fixed map instead of mutating the
//! process environment.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fmt;

use crate::identifier::EnvKeyPrefix;

/// A key-value lookup for environment variables.
pub trait EnvSource: Send + Sync {
    /// Look up `key`, returning `None` if it is unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvSource`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// The namespaced environment variables recognised by the environment context.
///
/// Each variant is read as `<PREFIX>_<SUFFIX>`, e.g. `CFX_CONFIG_DIR`.
///
/// # Examples
///
/// ```
/// use cfx::{EnvKeyPrefix, EnvVar};
/// use std::collections::HashMap;
///
/// let prefix = EnvKeyPrefix::parse("SHOP").unwrap();
/// assert_eq!(EnvVar::Region.key(&prefix), "SHOP_REGION");
///
/// let vars = HashMap::from([("SHOP_REGION".to_string(), "eu-west-1".to_string())]);
/// assert_eq!(EnvVar::Region.read(&prefix, &vars), "eu-west-1");
/// assert_eq!(EnvVar::NetworkId.read(&prefix, &vars), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVar {
    /// Deployment tier, selects the override file.
    Environment,
    /// Application working directory.
    AppDir,
    /// Directory holding the YAML files.
    ConfigDir,
    /// Application identifier.
    AppId,
    /// Service identifier grouping related apps.
    ServiceId,
    /// Instance identifier.
    InstanceId,
    /// Region.
    Region,
    /// Availability zone within the region.
    AvailabilityZone,
    /// Network identifier.
    NetworkId,
    /// Datacenter identifier.
    DatacenterId,
}

impl EnvVar {
    /// Every recognised variable.
    pub const ALL: [Self; 10] = [
        Self::Environment,
        Self::AppDir,
        Self::ConfigDir,
        Self::AppId,
        Self::ServiceId,
        Self::InstanceId,
        Self::Region,
        Self::AvailabilityZone,
        Self::NetworkId,
        Self::DatacenterId,
    ];

    /// The unprefixed variable name.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Environment => "ENVIRONMENT",
            Self::AppDir => "APP_DIR",
            Self::ConfigDir => "CONFIG_DIR",
            Self::AppId => "APP_ID",
            Self::ServiceId => "SERVICE_ID",
            Self::InstanceId => "INSTANCE_ID",
            Self::Region => "REGION",
            Self::AvailabilityZone => "AVAILABILITY_ZONE",
            Self::NetworkId => "NETWORK_ID",
            Self::DatacenterId => "DATACENTER_ID",
        }
    }

    /// The full variable name under `prefix`.
    #[must_use]
    pub fn key(self, prefix: &EnvKeyPrefix) -> String {
        prefix.key(self.suffix())
    }

    /// Read the variable under `prefix`; unset reads as the empty string.
    #[must_use]
    pub fn read(self, prefix: &EnvKeyPrefix, source: &dyn EnvSource) -> String {
        source.var(&self.key(prefix)).unwrap_or_default()
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
