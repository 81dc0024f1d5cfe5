//! Lexical path normalization.
//!
//! Turns a possibly relative path into an absolute one by joining it onto a
//! base directory and resolving `.` and `..` components. No filesystem access
//! is performed and symlinks are preserved.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// A `..` at the root stays at the root, so `/..` resolves to `/`.
///
/// # Examples
///
/// ```
/// use cfx::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c"));
/// assert_eq!(resolved, PathBuf::from("/a/c"));
///
/// let resolved = resolve_components(Path::new("/a/../../c"));
/// assert_eq!(resolved, PathBuf::from("/c"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                // Windows prefix
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                // relative path climbing above its start keeps the ".."
                _ => result.push(".."),
            },
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

/// Make `path` absolute against `base` and resolve its components.
///
/// Absolute inputs ignore `base`. `base` is expected to be absolute.
///
/// # Examples
///
/// ```
/// use cfx::path::normalize::absolutize;
/// use std::path::{Path, PathBuf};
///
/// # #[cfg(unix)]
/// # {
/// let abs = absolutize(Path::new("../shared/config"), Path::new("/srv/app"));
/// assert_eq!(abs, PathBuf::from("/srv/shared/config"));
///
/// let abs = absolutize(Path::new("/etc/app"), Path::new("/srv/app"));
/// assert_eq!(abs, PathBuf::from("/etc/app"));
/// # }
/// ```
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        resolve_components(path)
    } else {
        resolve_components(&base.join(path))
    }
}
