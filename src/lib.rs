//! # Extensions Checkout Library
//!
//! This library checks out and updates the sources of the extensions listed in
//! an extensions index, and keeps track of how long each extension's first
//! checkout took. It backs the `extensions-checkout` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use extensions_checkout::descriptor;
//!
//! let descriptor = descriptor::parse_str(
//!     "# Foo extension\nscm svn\nscmurl http://example/repo\nscmrevision 42\n",
//!     Path::new("Foo.s4ext"),
//! )
//! .unwrap();
//!
//! let spec = descriptor
//!     .repo_spec("Foo", Path::new("/sources").join("Foo"))
//!     .unwrap();
//! assert_eq!(spec.revision, "42");
//! ```
//!
//! ## Core Concepts
//!
//! - **Descriptors (`descriptor`)**: `key value` files declaring where an
//!   extension's sources live and which revision to use.
//! - **Discovery (`discovery`)**: finds descriptors in the index directory and
//!   selects extensions by name.
//! - **Checkout times (`stats`)**: the JSON file recording the duration of each
//!   extension's first checkout.
//! - **Version control (`vcs`)**: the `VcsOperations` trait and its default
//!   implementation driving `git`, `svn` and `hg`.
//! - **Orchestration (`orchestrator`)**: the per-extension loop tying the
//!   above together.

pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod path;
pub mod stats;
pub mod vcs;

#[cfg(test)]
mod descriptor_proptest;
