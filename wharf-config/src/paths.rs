//! Path normalization for workspace documents.
//!
//! Relative paths in a document always resolve against the directory
//! containing that document, never against the process's current directory.

use std::path::{Path, PathBuf};

/// Resolve `path` against the directory containing `document_path`.
///
/// Absolute paths pass through unchanged. A document path with no parent
/// component leaves `path` as-is.
pub fn rebase_path(path: &Path, document_path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match document_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(path),
        _ => path.to_path_buf(),
    }
}

/// Expand a leading `~`/`~/` to the caller's home directory.
///
/// Paths without the shorthand, and `~user` forms, pass through unchanged;
/// so does everything when no home directory can be determined.
pub fn expand_user(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if text == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
