//! Common test utilities for integration tests.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cfx::{SystemProbe, UserContext};
use tempfile::TempDir;

/// RAII guard for setting and restoring environment variables.
///
/// Tests using it must be `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear every `CFX_*` variable the environment context reads.
#[allow(dead_code)]
pub fn clear_cfx_env_vars() -> Vec<EnvGuard> {
    cfx::EnvVar::ALL
        .iter()
        .map(|var| EnvGuard::remove(&var.key(&cfx::EnvKeyPrefix::default())))
        .collect()
}

/// Probe with fixed answers, rooted at a given working directory.
#[allow(dead_code)]
pub struct FixedProbe {
    pub cwd: PathBuf,
}

impl SystemProbe for FixedProbe {
    fn hostname(&self) -> io::Result<String> {
        Ok("test-host".to_string())
    }

    fn machine_id(&self) -> io::Result<String> {
        Ok("0123456789abcdef".to_string())
    }

    fn current_user(&self) -> io::Result<Option<UserContext>> {
        Ok(Some(UserContext {
            username: "tester".to_string(),
            uid: "1000".to_string(),
            gid: "1000".to_string(),
        }))
    }

    fn parent_pid(&self) -> u32 {
        1
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn timezone(&self) -> String {
        "UTC".to_string()
    }
}

/// An application directory with an empty `config/` subdirectory.
#[allow(dead_code)]
pub struct AppFixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl AppFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write `contents` to `config/<name>`.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.config_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn probe(&self) -> FixedProbe {
        FixedProbe {
            cwd: self.path().to_path_buf(),
        }
    }
}
