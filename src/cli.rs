//! CLI argument parsing and run dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use extensions_checkout::discovery::{ExtensionFilter, MATCH_ALL};
use extensions_checkout::orchestrator::{CheckoutOptions, FailurePolicy, Orchestrator};
use extensions_checkout::output::{render_summary, OutputConfig};
use extensions_checkout::path::absolutize;
use extensions_checkout::vcs::DefaultVcsOperations;

/// Checkout and update extension sources
#[derive(Parser, Debug)]
#[command(name = "extensions-checkout")]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Directory containing the extension descriptor (*.s4ext) files
    #[arg(value_name = "INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Directory receiving one source checkout per extension
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Regular expression selecting extensions by name (e.g. 'ABC|Slicer.+').
    /// Matched at the start of the name.
    #[arg(
        long,
        value_name = "REGEX",
        default_value = MATCH_ALL,
        env = "EXTENSIONS_CHECKOUT_FILTER"
    )]
    pub filter: String,

    /// Delete previous source checkout
    #[arg(long)]
    pub delete: bool,

    /// Log failures and continue with the next extension instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = parse_log_level,
        env = "EXTENSIONS_CHECKOUT_LOG"
    )]
    pub log_level: LevelFilter,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary printed at the end of the run
    #[arg(short, long)]
    pub quiet: bool,
}

const LONG_ABOUT: &str = "\
Checkout and update extension sources.

Each <INDEX_DIR>/<Name>.s4ext descriptor is checked out or updated into
<SOURCE_DIR>/<Name> with git, svn or hg. The time taken by the first checkout
of each extension is recorded in <SOURCE_DIR>/ExtensionsCheckoutTimes.json.

Running two instances against the same SOURCE_DIR at once is not supported.";

impl Cli {
    /// Execute the checkout run
    pub fn execute(self) -> Result<()> {
        init_logger(self.log_level);

        let index_dir = absolutize(&self.index_dir)
            .with_context(|| format!("Invalid index directory {}", self.index_dir.display()))?;
        let source_dir = absolutize(&self.source_dir)
            .with_context(|| format!("Invalid source directory {}", self.source_dir.display()))?;
        let filter = ExtensionFilter::new(&self.filter)
            .with_context(|| format!("Invalid --filter '{}'", self.filter))?;

        let mut options = CheckoutOptions::new(index_dir, source_dir, filter);
        options.delete = self.delete;
        if self.keep_going {
            options.failure_policy = FailurePolicy::Continue;
        }

        let orchestrator = Orchestrator::new(Box::new(DefaultVcsOperations), options);
        let summary = orchestrator.run()?;

        if !self.quiet {
            let config = OutputConfig::from_env_and_flag(&self.color);
            println!("{}", render_summary(&config, &summary));
        }

        if summary.has_failures() {
            anyhow::bail!(
                "{} extension(s) failed to checkout: {}",
                summary.failed.len(),
                summary
                    .failed
                    .iter()
                    .map(|f| f.identity.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(())
    }
}

/// Parse a log level, also accepting the `WARNING` and `CRITICAL` spellings.
fn parse_log_level(value: &str) -> std::result::Result<LevelFilter, String> {
    match value.to_ascii_lowercase().as_str() {
        "warning" => Ok(LevelFilter::Warn),
        "critical" => Ok(LevelFilter::Error),
        other => other.parse::<LevelFilter>().map_err(|_| {
            format!(
                "invalid log level '{}' (expected error, warn, info, debug or trace)",
                value
            )
        }),
    }
}

fn init_logger(level: LevelFilter) {
    // A logger may already be installed when running under tests
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init();
}
