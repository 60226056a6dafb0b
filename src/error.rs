//! # Error Handling
//!
//! This module defines the centralized error type for the `extensions-checkout`
//! library. It uses the `thiserror` library to build a single `Error` enum that
//! covers every anticipated failure mode, each variant carrying enough context
//! (which file, which extension, which command) to be reported as-is.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The checkout-specific variants are:
//!   - `MalformedDescriptor`: a descriptor line violates the `key value` shape.
//!   - `MissingRequiredField`: a descriptor lacks `scm`, `scmurl` or `scmrevision`.
//!   - `InvalidField`: a descriptor value would be read as a command-line option.
//!   - `CorruptStatsFile`: the checkout times file is not a JSON object of numbers.
//!   - `VcsOperation`: the version-control collaborator failed (network,
//!     authentication, conflict, disk).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! All of these abort a run by default. The orchestrator wraps them in
//! `Error::Extension` to name the extension being processed, and the binary
//! reports the whole chain through `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for extensions-checkout operations
#[derive(Error, Debug)]
pub enum Error {
    /// A descriptor line could not be split into a key and an optional value.
    #[error("Malformed descriptor {}:{line}: {message}", path.display())]
    MalformedDescriptor {
        path: PathBuf,
        /// 1-based line number of the offending line
        line: usize,
        message: String,
    },

    /// A descriptor is missing a field needed to build a repository specification.
    #[error("Extension {extension} is missing required field '{field}'")]
    MissingRequiredField { extension: String, field: String },

    /// A descriptor field holds a value that cannot be handed to the
    /// version-control client.
    #[error("Extension {extension} has invalid field '{field}': {message}")]
    InvalidField {
        extension: String,
        field: String,
        message: String,
    },

    /// The checkout times file exists but cannot be read as a mapping of
    /// extension names to seconds.
    #[error("Corrupt stats file {}: {message}", path.display())]
    CorruptStatsFile { path: PathBuf, message: String },

    /// The version-control collaborator failed to checkout or update a
    /// working copy.
    #[error("{system} {command} failed for {extension}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    VcsOperation {
        extension: String,
        system: String,
        command: String,
        message: String,
        /// Optional hint for how to resolve the failure
        hint: Option<String>,
    },

    /// A measured duration cannot be stored in the stats file.
    #[error("Invalid checkout duration for {extension}: {value}")]
    InvalidDuration { extension: String, value: f64 },

    /// The extensions index directory does not exist.
    #[error("Extensions index directory not found: {}", path.display())]
    IndexNotFound { path: PathBuf },

    /// Processing of one extension failed; `source` holds the reason.
    #[error("Failed to process extension {extension}")]
    Extension {
        extension: String,
        #[source]
        source: Box<Error>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
