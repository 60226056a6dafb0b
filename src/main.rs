//! # Extensions Checkout CLI
//!
//! This is the binary entry point for the `extensions-checkout` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Configuring logging from `--log-level`.
//! - Running the checkout and translating errors into a non-zero exit status.
//!
//! The checkout logic lives in the `lib.rs` library crate; the binary is a thin
//! wrapper around it.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
