//! Common test utilities for CLI integration tests.
//!
//! Every command runs against an isolated application directory, with the
//! `CFX_*` variables of the calling shell stripped.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables cleared from every spawned command.
const INHERITED_VARS: [&str; 13] = [
    "CFX_PREFIX",
    "CFX_OUTPUT_FORMAT",
    "CFX_LOG_MODE",
    "CFX_ENVIRONMENT",
    "CFX_APP_DIR",
    "CFX_CONFIG_DIR",
    "CFX_APP_ID",
    "CFX_SERVICE_ID",
    "CFX_INSTANCE_ID",
    "CFX_REGION",
    "CFX_AVAILABILITY_ZONE",
    "CFX_NETWORK_ID",
    "CFX_DATACENTER_ID",
];

/// An application directory with a `config/` subdirectory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    pub app_dir: PathBuf,
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let app_dir = temp_dir.path().to_path_buf();
        let config_dir = app_dir.join("config");
        fs::create_dir(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            app_dir,
            config_dir,
        }
    }

    /// The cfx binary with a scrubbed environment, run from the app dir.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cfx").expect("Failed to find cfx binary");
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.app_dir);
        cmd.env("CFX_APP_DIR", &self.app_dir);
        cmd
    }

    /// Like [`TestEnv::command`], with `CFX_ENVIRONMENT` set.
    pub fn command_in(&self, environment: &str) -> Command {
        let mut cmd = self.command();
        cmd.env("CFX_ENVIRONMENT", environment);
        cmd
    }

    pub fn path(&self) -> &Path {
        &self.app_dir
    }

    /// Write `contents` to `config/<name>`.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.config_dir.join(name);
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }
}
