//! Directory existence and readability checks.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DirectoryRole, Error, Result};

/// Verify that `path` exists, is a directory and can be listed.
///
/// Each failure maps to its own error variant carrying `role` and the
/// offending path.
///
/// # Errors
///
/// - [`Error::DirectoryNotFound`] if nothing exists at `path`
/// - [`Error::DirectoryPermissionDenied`] if it cannot be inspected or listed
/// - [`Error::NotADirectory`] if it is a file
/// - [`Error::DirectoryInaccessible`] for any other OS error
///
/// # Examples
///
/// ```
/// use cfx::path::ensure_directory;
/// use cfx::DirectoryRole;
///
/// let dir = tempfile::tempdir().unwrap();
/// assert!(ensure_directory(DirectoryRole::ConfigDir, dir.path()).is_ok());
///
/// let missing = dir.path().join("missing");
/// let err = ensure_directory(DirectoryRole::ConfigDir, &missing).unwrap_err();
/// assert!(err.is_directory_error());
/// ```
pub fn ensure_directory(role: DirectoryRole, path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| classify(role, path, e))?;

    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            role,
            path: path.to_path_buf(),
        });
    }

    // metadata succeeds on unreadable directories, listing does not
    fs::read_dir(path).map_err(|e| classify(role, path, e))?;

    Ok(())
}

/// Map an I/O error on `path` to the matching directory error.
pub(crate) fn classify(role: DirectoryRole, path: &Path, err: io::Error) -> Error {
    let path = path.to_path_buf();
    match err.kind() {
        io::ErrorKind::NotFound => Error::DirectoryNotFound { role, path },
        io::ErrorKind::PermissionDenied => Error::DirectoryPermissionDenied { role, path },
        _ => Error::DirectoryInaccessible {
            role,
            path,
            source: err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory() {
        let temp = TempDir::new().unwrap();
        ensure_directory(DirectoryRole::AppDir, temp.path()).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = ensure_directory(DirectoryRole::AppDir, &missing).unwrap_err();
        assert!(matches!(
            err,
            Error::DirectoryNotFound { role: DirectoryRole::AppDir, ref path } if *path == missing
        ));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.yaml");
        fs::write(&file, "a: 1\n").unwrap();

        let err = ensure_directory(DirectoryRole::ConfigDir, &file).unwrap_err();
        assert!(matches!(
            err,
            Error::NotADirectory { role: DirectoryRole::ConfigDir, .. }
        ));
    }

    #[test]
    fn test_classify_other_error() {
        let err = classify(
            DirectoryRole::ConfigDir,
            Path::new("/x"),
            io::Error::new(io::ErrorKind::Other, "boom"),
        );
        assert!(matches!(err, Error::DirectoryInaccessible { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = ensure_directory(DirectoryRole::ConfigDir, &locked);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root ignores directory permissions
        if nix::unistd::geteuid().is_root() {
            assert!(result.is_ok());
        } else {
            assert!(matches!(
                result,
                Err(Error::DirectoryPermissionDenied { .. })
            ));
        }
    }
}
