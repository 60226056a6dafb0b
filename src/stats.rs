//! # Checkout Times
//!
//! Keeps track of how long the first checkout of each extension took. The
//! times live in a single JSON object (`ExtensionsCheckoutTimes.json` by
//! default) at the top of the checkout tree:
//!
//! ```json
//! {
//!   "Foo": 12.5,
//!   "Bar": 3.25
//! }
//! ```
//!
//! The whole mapping is read once at startup and rewritten after every
//! change. Writes go to a temporary file in the same directory which is then
//! renamed over the previous file, so an interrupted write never destroys
//! history that was already recorded.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Default name of the checkout times file.
pub const STATS_FILE_NAME: &str = "ExtensionsCheckoutTimes.json";

/// Mapping of extension identity to the seconds its first checkout took.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutStats {
    times: BTreeMap<String, f64>,
}

impl CheckoutStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the checkout times from `path`.
    ///
    /// A missing file is an empty mapping, not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read(path)?;
        let times: BTreeMap<String, f64> =
            serde_json::from_slice(&content).map_err(|e| Error::CorruptStatsFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self { times })
    }

    /// Write the full mapping to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut contents =
            serde_json::to_string_pretty(&self.times).map_err(|e| Error::Serialization {
                message: e.to_string(),
            })?;
        contents.push('\n');

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;

        tmp.persist(path).map_err(|err| {
            Error::Io(std::io::Error::new(
                err.error.kind(),
                format!(
                    "Failed to persist stats file to {}: {}",
                    path.display(),
                    err.error
                ),
            ))
        })?;

        Ok(())
    }

    /// Record `seconds` for `extension` unless a time is already known.
    ///
    /// Returns `true` if the time was recorded. Negative durations are
    /// stored as zero.
    pub fn record_first(&mut self, extension: &str, seconds: f64) -> Result<bool> {
        if !seconds.is_finite() {
            return Err(Error::InvalidDuration {
                extension: extension.to_string(),
                value: seconds,
            });
        }
        if self.times.contains_key(extension) {
            return Ok(false);
        }
        self.times.insert(extension.to_string(), seconds.max(0.0));
        Ok(true)
    }

    /// Forget the recorded time of `extension`, returning it if there was one.
    pub fn remove(&mut self, extension: &str) -> Option<f64> {
        self.times.remove(extension)
    }

    pub fn get(&self, extension: &str) -> Option<f64> {
        self.times.get(extension).copied()
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.times.contains_key(extension)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates over the recorded times in extension name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.times.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
