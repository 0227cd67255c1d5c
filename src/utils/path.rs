//! Path resolution for config-supplied paths.

use std::path::{Path, PathBuf};

/// Resolve a config path: expand `~`, then join relative paths onto `root`.
///
/// The result is canonicalized when it exists; otherwise it is returned
/// as joined, so output directories that are created later still resolve.
pub fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    let full = if expanded.is_relative() {
        root.join(expanded)
    } else {
        expanded
    };
    full.canonicalize().unwrap_or(full)
}

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first, then falls back to joining with cwd.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
