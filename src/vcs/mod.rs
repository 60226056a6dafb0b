//! # Version-Control Collaborator
//!
//! The orchestrator never talks to a version-control system directly. It hands
//! a [`RepoSpec`] to an implementation of [`VcsOperations`], whose single job is
//! to make `spec.destination` a working copy of `spec.url` at `spec.revision`:
//! clone it if it is absent, update it in place otherwise. A destination only
//! counts as present when it holds the system's metadata directory (`.git`,
//! `.svn`, `.hg`); an empty or foreign directory is cloned into.
//!
//! Descriptor values reach the command line after a `--` separator, so a
//! `scmurl` can never be read as an option.
//!
//! [`DefaultVcsOperations`] drives the system `git`, `svn` and `hg` executables,
//! which pick up whatever authentication the user has configured (SSH keys,
//! credential helpers, cached svn credentials). Tests swap it for a fake.

pub mod git;
pub mod hg;
pub mod svn;

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::descriptor::RepoSpec;
use crate::error::{Error, Result};

/// Version-control system named by a descriptor's `scm` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Svn,
    Hg,
    /// Anything else. Kept so the error can name it.
    Other(String),
}

impl From<&str> for VcsKind {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "git" => VcsKind::Git,
            "svn" => VcsKind::Svn,
            "hg" => VcsKind::Hg,
            _ => VcsKind::Other(value.to_string()),
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsKind::Git => f.write_str("git"),
            VcsKind::Svn => f.write_str("svn"),
            VcsKind::Hg => f.write_str("hg"),
            VcsKind::Other(name) => f.write_str(name),
        }
    }
}

/// Trait for version-control operations - allows faking in tests
pub trait VcsOperations: Send + Sync {
    /// Checkout `spec.url` at `spec.revision` into `spec.destination`, or
    /// update the existing working copy there.
    fn sync_repository(&self, spec: &RepoSpec) -> Result<()>;
}

/// The default implementation of `VcsOperations`, which uses the system's
/// version-control commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultVcsOperations;

impl VcsOperations for DefaultVcsOperations {
    fn sync_repository(&self, spec: &RepoSpec) -> Result<()> {
        if let Some(parent) = spec.destination.parent() {
            fs::create_dir_all(parent)?;
        }

        match &spec.system {
            VcsKind::Git => git::sync(spec),
            VcsKind::Svn => svn::sync(spec),
            VcsKind::Hg => hg::sync(spec),
            VcsKind::Other(name) => Err(Error::VcsOperation {
                extension: spec.name.clone(),
                system: name.clone(),
                command: "sync".to_string(),
                message: format!("unsupported version-control system '{}'", name),
                hint: Some("Supported systems are git, svn and hg".to_string()),
            }),
        }
    }
}

/// Run `cmd` to completion, failing with a `VcsOperation` error on a non-zero
/// exit status. `command` names the sub-command in errors and logs; the full
/// argument list is never logged because it may carry credentials.
pub(crate) fn run_command(spec: &RepoSpec, command: &str, mut cmd: Command) -> Result<()> {
    debug!("[{}] ({}) {}", spec.name, spec.system, command);

    let output = cmd
        .output()
        .map_err(|e| vcs_error(spec, command, e.to_string()))?;

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!("[{}] ({}) {}", spec.name, spec.system, line);
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr.trim().to_string()
        };
        return Err(vcs_error(spec, command, message));
    }

    Ok(())
}

/// Returns true if `destination` is the root of a working copy, i.e. holds
/// the `marker` metadata directory.
pub(crate) fn is_working_copy(destination: &Path, marker: &str) -> bool {
    destination.join(marker).exists()
}

/// Run `cmd` and report whether it succeeded, discarding its output.
pub(crate) fn probe(mut cmd: Command) -> bool {
    cmd.output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn vcs_error(spec: &RepoSpec, command: &str, message: String) -> Error {
    let hint = if is_auth_failure(&message) {
        Some(match spec.system {
            VcsKind::Svn => "Check the svnusername and svnpassword fields of the descriptor, or cached svn credentials".to_string(),
            _ => "Make sure you have access to the repository: SSH key added to ssh-agent, credentials configured, or a personal access token set up".to_string(),
        })
    } else {
        None
    };

    Error::VcsOperation {
        extension: spec.name.clone(),
        system: spec.system.to_string(),
        command: command.to_string(),
        message,
        hint,
    }
}

fn is_auth_failure(message: &str) -> bool {
    [
        "Authentication failed",
        "Permission denied",
        "Could not read from remote repository",
        "Authorization failed",
        "authorization failed",
    ]
    .iter()
    .any(|needle| message.contains(needle))
}
