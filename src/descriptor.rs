//! # Extension Descriptor Parsing
//!
//! An extension descriptor (`<Name>.s4ext`) is a plain-text file of
//! `key value` lines:
//!
//! ```text
//! # This is a comment
//! scm git
//! scmurl https://github.com/example/SlicerFoo.git
//! scmrevision main
//! description A value may contain spaces
//! ```
//!
//! Each non-blank, non-comment line is split on its first whitespace run.
//! A key without a value is recorded with an absent value. When a key repeats,
//! the last value wins.
//!
//! The parsed [`Descriptor`] knows how to turn itself into a [`RepoSpec`],
//! the input of the version-control collaborator.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::vcs::VcsKind;

/// Key-value metadata read from one descriptor file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    entries: Vec<(String, Option<String>)>,
}

impl Descriptor {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    ///
    /// A repeated key keeps its original position but takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value of `key`, or `None` if the key is absent or has no value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns true if `key` appeared in the descriptor, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in the order they first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Builds the repository specification for the extension `extension`,
    /// checked out into `destination`.
    ///
    /// Credentials are only taken from `svnusername`/`svnpassword` when the
    /// descriptor's `scm` is `svn`. A revision starting with `-` is rejected,
    /// since it would be parsed as an option by the version-control client.
    pub fn repo_spec(&self, extension: &str, destination: PathBuf) -> Result<RepoSpec> {
        let required = |field: &str| {
            self.get(field)
                .map(str::to_string)
                .ok_or_else(|| Error::MissingRequiredField {
                    extension: extension.to_string(),
                    field: field.to_string(),
                })
        };

        let system = VcsKind::from(required("scm")?.as_str());
        let url = required("scmurl")?;
        let revision = required("scmrevision")?;
        if revision.starts_with('-') {
            return Err(Error::InvalidField {
                extension: extension.to_string(),
                field: "scmrevision".to_string(),
                message: format!("'{}' must not start with '-'", revision),
            });
        }

        let credentials = if system == VcsKind::Svn {
            let username = self.get("svnusername").map(str::to_string);
            let password = self.get("svnpassword").map(str::to_string);
            (username.is_some() || password.is_some())
                .then_some(Credentials { username, password })
        } else {
            None
        };

        Ok(RepoSpec {
            name: extension.to_string(),
            system,
            url,
            revision,
            destination,
            credentials,
        })
    }
}

/// Username and password handed to the version-control client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Everything the version-control collaborator needs to checkout or update
/// one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Extension identity, used in error messages.
    pub name: String,
    pub system: VcsKind,
    pub url: String,
    /// Revision, branch or tag to pin the working copy to.
    pub revision: String,
    pub destination: PathBuf,
    pub credentials: Option<Credentials>,
}

/// Parse a descriptor file from disk.
pub fn parse_file(path: &Path) -> Result<Descriptor> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read descriptor {}: {}", path.display(), e),
        ))
    })?;
    parse_str(&content, path)
}

/// Parse descriptor text. `path` is only used for error reporting.
pub fn parse_str(content: &str, path: &Path) -> Result<Descriptor> {
    let mut descriptor = Descriptor::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .splitn(2, char::is_whitespace)
            .map(str::trim)
            .collect();

        let (key, value) = match fields.as_slice() {
            [key] => (*key, None),
            [key, value] => (*key, Some(*value).filter(|v| !v.is_empty())),
            _ => {
                return Err(Error::MalformedDescriptor {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message: format!("expected 'key value', got {} fields", fields.len()),
                })
            }
        };

        descriptor.insert(key, value.map(str::to_string));
    }

    Ok(descriptor)
}
