//! # Checkout Orchestration
//!
//! The orchestrator walks an extensions index and brings a source tree in line
//! with it, one extension at a time:
//!
//! 1.  **Discover**: list the `*.s4ext` descriptors of the index directory.
//! 2.  **Filter**: skip extensions whose name does not match the filter.
//! 3.  **Parse**: read the descriptor and build a [`RepoSpec`]. A descriptor
//!     missing `scm`, `scmurl` or `scmrevision` is an error.
//! 4.  **Delete**: with `delete` set, remove an existing checkout. Its recorded
//!     checkout time is dropped and saved *before* the directory is removed.
//! 5.  **Sync**: hand the repository spec to the [`VcsOperations`] collaborator, timing
//!     the call.
//! 6.  **Record**: store the duration if the extension had no time recorded,
//!     so the stats always describe the first checkout.
//! 7.  **Persist**: rewrite the stats file after every extension.
//!
//! Processing is strictly sequential. Nothing guards the source tree against
//! a second process working on it at the same time.
//!
//! With [`FailurePolicy::Abort`] (the default) the first error ends the run.
//! With [`FailurePolicy::Continue`] the error is logged, recorded in the
//! [`RunSummary`] and the next extension is processed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::descriptor::{self, RepoSpec};
use crate::discovery::{self, DescriptorEntry, ExtensionFilter, DESCRIPTOR_SUFFIX};
use crate::error::{Error, Result};
use crate::stats::{CheckoutStats, STATS_FILE_NAME};
use crate::vcs::VcsOperations;

/// What to do when one extension fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failure.
    #[default]
    Abort,
    /// Log the failure and carry on with the next extension.
    Continue,
}

/// Settings for one checkout run
#[derive(Debug, Clone)]
pub struct CheckoutOptions {
    /// Directory holding the extension descriptors
    pub index_dir: PathBuf,
    /// Directory receiving one checkout per extension, and the stats file
    pub source_dir: PathBuf,
    pub filter: ExtensionFilter,
    /// Remove existing checkouts before syncing them again
    pub delete: bool,
    pub failure_policy: FailurePolicy,
    pub descriptor_suffix: String,
    pub stats_file_name: String,
}

impl CheckoutOptions {
    pub fn new(index_dir: PathBuf, source_dir: PathBuf, filter: ExtensionFilter) -> Self {
        Self {
            index_dir,
            source_dir,
            filter,
            delete: false,
            failure_policy: FailurePolicy::default(),
            descriptor_suffix: DESCRIPTOR_SUFFIX.to_string(),
            stats_file_name: STATS_FILE_NAME.to_string(),
        }
    }

    pub fn stats_path(&self) -> PathBuf {
        self.source_dir.join(&self.stats_file_name)
    }
}

/// An extension that could not be processed under [`FailurePolicy::Continue`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedExtension {
    pub identity: String,
    pub message: String,
}

/// What happened during a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Extensions checked out or updated
    pub synced: Vec<String>,
    /// Extensions not selected by the filter
    pub skipped: Vec<String>,
    /// Extensions whose previous checkout was removed
    pub deleted: Vec<String>,
    pub failed: Vec<FailedExtension>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Log context of one extension: every line is prefixed with the extension
/// name and its version-control system.
pub struct ExtensionLog<'a> {
    name: &'a str,
    system: &'a str,
}

impl<'a> ExtensionLog<'a> {
    pub fn new(name: &'a str, system: &'a str) -> Self {
        Self { name, system }
    }

    pub fn debug(&self, message: fmt::Arguments<'_>) {
        debug!("[{}] ({}) {}", self.name, self.system, message);
    }

    pub fn info(&self, message: fmt::Arguments<'_>) {
        info!("[{}] ({}) {}", self.name, self.system, message);
    }

    pub fn warn(&self, message: fmt::Arguments<'_>) {
        warn!("[{}] ({}) {}", self.name, self.system, message);
    }
}

/// Drives a checkout run against a version-control collaborator.
pub struct Orchestrator {
    vcs: Box<dyn VcsOperations>,
    options: CheckoutOptions,
}

impl Orchestrator {
    pub fn new(vcs: Box<dyn VcsOperations>, options: CheckoutOptions) -> Self {
        Self { vcs, options }
    }

    /// Process every descriptor of the index directory.
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let options = &self.options;

        info!("extensions_source_dir is [{}]", options.source_dir.display());
        info!("extensions_index_dir is [{}]", options.index_dir.display());

        let stats_path = options.stats_path();
        let mut stats = CheckoutStats::load(&stats_path)?;
        let entries = discovery::discover(&options.index_dir, &options.descriptor_suffix)?;
        debug!("Found {} descriptor(s)", entries.len());

        let mut summary = RunSummary::default();
        for entry in entries {
            if !options.filter.matches(&entry.identity) {
                debug!(
                    "Skipping {} (does not match '{}')",
                    entry.identity,
                    options.filter.pattern()
                );
                summary.skipped.push(entry.identity);
                continue;
            }

            if let Err(e) = self.process(&entry, &mut stats, &stats_path, &mut summary) {
                match options.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(Error::Extension {
                            extension: entry.identity,
                            source: Box::new(e),
                        })
                    }
                    FailurePolicy::Continue => {
                        error!("[{}] {}", entry.identity, e);
                        summary.failed.push(FailedExtension {
                            identity: entry.identity,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    fn process(
        &self,
        entry: &DescriptorEntry,
        stats: &mut CheckoutStats,
        stats_path: &Path,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let identity = entry.identity.as_str();
        let destination = self.options.source_dir.join(identity);

        let descriptor = descriptor::parse_file(&entry.path)?;
        let log = ExtensionLog::new(identity, descriptor.get("scm").unwrap_or("unknown"));
        let spec = descriptor.repo_spec(identity, destination)?;

        if self.options.delete && spec.destination.exists() {
            self.delete_checkout(&spec, &log, stats, stats_path)?;
            summary.deleted.push(identity.to_string());
        }

        log.info(format_args!("Begin timed call"));
        let start = Instant::now();
        self.vcs.sync_repository(&spec)?;
        let duration = start.elapsed().as_secs_f64();
        log.info(format_args!("Elapsed time: {:.2}s", duration));

        if stats.record_first(identity, duration)? {
            log.debug(format_args!("Recorded first checkout time"));
        }
        stats.save(stats_path)?;

        summary.synced.push(identity.to_string());
        Ok(())
    }

    /// Remove a previous checkout. The stats entry goes first so the stats
    /// file never lists a time for a checkout that is gone.
    fn delete_checkout(
        &self,
        spec: &RepoSpec,
        log: &ExtensionLog<'_>,
        stats: &mut CheckoutStats,
        stats_path: &Path,
    ) -> Result<()> {
        log.warn(format_args!("Deleting {}", spec.destination.display()));

        if stats.remove(&spec.name).is_some() {
            stats.save(stats_path)?;
        }
        fs::remove_dir_all(&spec.destination)?;
        Ok(())
    }
}
