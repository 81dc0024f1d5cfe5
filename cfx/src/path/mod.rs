//! Path handling for the application and configuration directories.
//!
//! Two steps are applied to every configured directory:
//!
//! 1. [`normalize::absolutize`] turns a relative path into an absolute one,
//!    rooted at the working directory, without following symlinks.
//! 2. [`ensure_directory`] verifies the result exists, is a directory and can
//!    be listed.
//!
//! [`resolve_directory`] combines both.
//!
//! # Examples
//!
//! ```
//! use cfx::path::resolve_directory;
//! use cfx::DirectoryRole;
//! use std::path::Path;
//!
//! let temp = tempfile::tempdir().unwrap();
//! std::fs::create_dir(temp.path().join("config")).unwrap();
//!
//! let resolved = resolve_directory(DirectoryRole::ConfigDir, Path::new("config"), temp.path())
//!     .unwrap();
//! assert!(resolved.is_absolute());
//! assert!(resolved.ends_with("config"));
//! ```

mod directory;
pub mod normalize;

use std::path::{Path, PathBuf};

use crate::error::{DirectoryRole, Result};

pub use directory::ensure_directory;
pub(crate) use directory::classify;

/// Absolutize `path` against `base` and validate it as a directory.
///
/// # Errors
///
/// Returns the errors of [`ensure_directory`].
pub fn resolve_directory(role: DirectoryRole, path: &Path, base: &Path) -> Result<PathBuf> {
    let absolute = normalize::absolutize(path, base);
    log::debug!("resolved {role} to {}", absolute.display());
    ensure_directory(role, &absolute)?;
    Ok(absolute)
}
