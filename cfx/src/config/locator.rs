//! Configuration file discovery.
//!
//! Finds `<name>.yaml` or `<name>.yml` inside a single directory. Both the
//! name and the extension are matched case-insensitively, so `Base.YML`
//! satisfies a lookup for `base`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryRole, Error, Result};
use crate::path::{classify, ensure_directory};

/// File extensions accepted as YAML, compared case-insensitively.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Find the YAML file for `logical_name` in `directory`.
///
/// Only regular files directly inside `directory` are considered;
/// subdirectories are skipped.
///
/// # Errors
///
/// - a directory error if `directory` is missing, unreadable or a file
/// - [`Error::ConfigNotFound`] if no file matches
/// - [`Error::AmbiguousConfig`] if several files match, e.g. `Base.yaml`
///   next to `base.yml`
///
/// # Examples
///
/// ```
/// use cfx::config::locate_config_file;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("Base.YML"), "a: 1\n").unwrap();
///
/// let found = locate_config_file(dir.path(), "base").unwrap();
/// assert_eq!(found, dir.path().join("Base.YML"));
///
/// let missing = locate_config_file(dir.path(), "staging").unwrap_err();
/// assert!(missing.is_config_not_found());
/// ```
pub fn locate_config_file(directory: &Path, logical_name: &str) -> Result<PathBuf> {
    ensure_directory(DirectoryRole::ConfigDir, directory)?;

    let entries =
        fs::read_dir(directory).map_err(|e| classify(DirectoryRole::ConfigDir, directory, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| classify(DirectoryRole::ConfigDir, directory, e))?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !matches_config_name(&file_name, logical_name) {
            continue;
        }

        // follows symlinks, so a link to a YAML file counts as a file
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => candidates.push(path),
            Ok(_) => {}
            Err(e) => log::debug!("skipping {}: {e}", path.display()),
        }
    }

    match candidates.len() {
        0 => Err(Error::ConfigNotFound {
            name: logical_name.to_string(),
            directory: directory.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => {
            candidates.sort();
            Err(Error::AmbiguousConfig {
                name: logical_name.to_string(),
                candidates,
            })
        }
    }
}

/// Check whether `file_name` is a YAML file named `logical_name`.
///
/// # Examples
///
/// ```
/// use cfx::config::locator::matches_config_name;
///
/// assert!(matches_config_name("staging.yaml", "staging"));
/// assert!(matches_config_name("STAGING.Yml", "staging"));
/// assert!(!matches_config_name("staging.json", "staging"));
/// assert!(!matches_config_name("staging.old.yaml", "staging"));
/// ```
#[must_use]
pub fn matches_config_name(file_name: &str, logical_name: &str) -> bool {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };

    YAML_EXTENSIONS
        .iter()
        .any(|ext| extension.eq_ignore_ascii_case(ext))
        && eq_fold(stem, logical_name)
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
