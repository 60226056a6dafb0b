//! Descriptor discovery and extension name filtering

use std::path::{Path, PathBuf};

use glob::Pattern;
use regex::Regex;

use crate::error::{Error, Result};

/// File suffix of extension descriptors in an extensions index.
pub const DESCRIPTOR_SUFFIX: &str = "s4ext";

/// Filter pattern selecting every extension.
pub const MATCH_ALL: &str = ".*";

/// A descriptor file found in the extensions index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorEntry {
    /// Base name of the descriptor without its suffix. Names the checkout
    /// directory and the stats entry.
    pub identity: String,
    pub path: PathBuf,
}

/// List the `*.<suffix>` files of `index_dir`.
///
/// Entries come back in the alphabetical order `glob` yields them in.
pub fn discover(index_dir: &Path, suffix: &str) -> Result<Vec<DescriptorEntry>> {
    if !index_dir.is_dir() {
        return Err(Error::IndexNotFound {
            path: index_dir.to_path_buf(),
        });
    }

    // Escape the directory so brackets or stars in it are taken literally
    let escaped_dir = Pattern::escape(&index_dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join(format!("*.{}", suffix));

    let mut entries = Vec::new();
    for path in glob::glob(&pattern.to_string_lossy())? {
        let path = path.map_err(|e| Error::Io(e.into_error()))?;
        if !path.is_file() {
            continue;
        }
        let Some(identity) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
        else {
            continue;
        };
        entries.push(DescriptorEntry { identity, path });
    }

    Ok(entries)
}

/// Selects extensions whose name matches a regular expression at its start.
///
/// The match is anchored at the beginning of the name only: `Slicer` selects
/// `SlicerRT` as well as `Slicer`.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    pattern: String,
    regex: Regex,
}

impl ExtensionFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `identity` is selected.
    pub fn matches(&self, identity: &str) -> bool {
        self.regex.is_match(identity)
    }

    /// The pattern as given by the user.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
