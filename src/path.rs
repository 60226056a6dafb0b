//! Path utilities for command-line arguments

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Expand a leading `~` to the user's home directory.
///
/// `~user` forms are left untouched, as is everything when no home directory
/// can be determined.
pub fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~` and resolve `path` against the current directory.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_user(path);
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(env::current_dir()?.join(expanded))
    }
}
