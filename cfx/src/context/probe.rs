//! Host and user identity queries.
//!
//! [`SystemProbe`] is the seam between the environment context and the
//! operating system. [`OsProbe`] answers from the running machine; tests
//! substitute their own implementation.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::UserContext;

/// Files consulted, in order, for a stable machine identifier.
const MACHINE_ID_FILES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Operating system queries needed to build an environment context.
pub trait SystemProbe: Send + Sync {
    /// The machine's hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname cannot be read.
    fn hostname(&self) -> io::Result<String>;

    /// A stable identifier unique to the OS installation.
    ///
    /// # Errors
    ///
    /// Returns an error if no identifier source is available.
    fn machine_id(&self) -> io::Result<String>;

    /// The user the process runs as, or `None` if the platform cannot say.
    ///
    /// # Errors
    ///
    /// Returns an error if the user database lookup fails.
    fn current_user(&self) -> io::Result<Option<UserContext>>;

    /// The parent process ID.
    fn parent_pid(&self) -> u32;

    /// The process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is gone or unreadable.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Name of the local system timezone, or its UTC offset if unnamed.
    fn timezone(&self) -> String;
}

/// [`SystemProbe`] that queries the running operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProbe;

impl SystemProbe for OsProbe {
    #[cfg(unix)]
    fn hostname(&self) -> io::Result<String> {
        nix::unistd::gethostname()?.into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("hostname is not valid UTF-8: {raw:?}"),
            )
        })
    }

    #[cfg(not(unix))]
    fn hostname(&self) -> io::Result<String> {
        env::var("COMPUTERNAME").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))
    }

    fn machine_id(&self) -> io::Result<String> {
        for file in MACHINE_ID_FILES {
            match fs::read_to_string(file) {
                Ok(contents) if !contents.trim().is_empty() => {
                    return Ok(contents.trim().to_string());
                }
                Ok(_) => log::debug!("{file} is empty"),
                Err(e) => log::debug!("cannot read {file}: {e}"),
            }
        }

        platform_machine_id()
    }

    #[cfg(unix)]
    fn current_user(&self) -> io::Result<Option<UserContext>> {
        let uid = nix::unistd::getuid();
        let user = nix::unistd::User::from_uid(uid)?;
        Ok(user.map(|u| UserContext {
            username: u.name,
            uid: u.uid.to_string(),
            gid: u.gid.to_string(),
        }))
    }

    #[cfg(not(unix))]
    fn current_user(&self) -> io::Result<Option<UserContext>> {
        Ok(env::var("USERNAME").ok().map(|username| UserContext {
            username,
            ..UserContext::default()
        }))
    }

    #[cfg(unix)]
    fn parent_pid(&self) -> u32 {
        u32::try_from(nix::unistd::getppid().as_raw()).unwrap_or_default()
    }

    #[cfg(not(unix))]
    fn parent_pid(&self) -> u32 {
        0
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn timezone(&self) -> String {
        zoneinfo_name().unwrap_or_else(|| chrono::Local::now().format("%:z").to_string())
    }
}

#[cfg(target_os = "macos")]
fn platform_machine_id() -> io::Result<String> {
    let output = std::process::Command::new("ioreg")
        .args(["-rd1", "-c", "IOPlatformExpertDevice"])
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    stdout
        .lines()
        .find(|line| line.contains("IOPlatformUUID"))
        .and_then(|line| line.split('"').nth(3))
        .map(str::to_string)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "IOPlatformUUID not reported"))
}

#[cfg(windows)]
fn platform_machine_id() -> io::Result<String> {
    let output = std::process::Command::new("reg")
        .args([
            "query",
            r"HKLM\SOFTWARE\Microsoft\Cryptography",
            "/v",
            "MachineGuid",
        ])
        .output()?;

    machine_guid(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "MachineGuid not reported"))
}

/// The `MachineGuid` value from `reg query` output.
#[cfg(any(windows, test))]
fn machine_guid(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("MachineGuid"))
        .and_then(|line| line.split_whitespace().nth(2))
        .map(str::to_string)
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_machine_id() -> io::Result<String> {
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no machine id found in {}", MACHINE_ID_FILES.join(" or ")),
    ))
}

/// Timezone name from the `/etc/localtime` symlink, e.g. `Europe/Berlin`.
fn zoneinfo_name() -> Option<String> {
    let target = fs::read_link("/etc/localtime").ok()?;
    let target = target.to_str()?;
    let (_, name) = target.split_once("zoneinfo/")?;
    (!name.is_empty()).then(|| name.to_string())
}
