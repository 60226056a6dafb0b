//! Shared test utilities for integration and E2E tests.
//!
//! This module provides the fixtures and helpers used across test files:
//! an index/sources directory pair, descriptor snippets, and helpers to build
//! throwaway git repositories to check out from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_descriptor("Foo", descriptors::MISSING_URL);
//!     fixture.command().assert().failure();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    #[allow(unused_imports)]
    pub use super::{git_available, GitRepo};
    pub use super::TestFixture;
}

/// Common descriptor snippets for testing.
#[allow(dead_code)]
pub mod descriptors {
    /// Descriptor without `scmurl`.
    pub const MISSING_URL: &str = "scm git\nscmrevision main\n";

    /// Descriptor naming a version-control system that is not supported.
    pub const UNSUPPORTED_SCM: &str =
        "scm cvs\nscmurl :pserver:anonymous@example.com:/cvsroot\nscmrevision HEAD\n";

    /// Build a git descriptor pointing at `url` pinned to `revision`.
    pub fn git(url: &str, revision: &str) -> String {
        format!(
            "# Generated for tests\nscm git\nscmurl {}\nscmrevision {}\ncategory Testing\n",
            url, revision
        )
    }
}

/// Stats file written at the top of the sources directory.
#[allow(dead_code)]
pub const STATS_FILE: &str = "ExtensionsCheckoutTimes.json";

/// Returns `true` if a usable `git` executable is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A local git repository with a `main` branch, usable as a clone source.
#[allow(dead_code)]
pub struct GitRepo {
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Initialize a repository at `path` with one commit.
    pub fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repository directory");
        let repo = Self {
            path: path.to_path_buf(),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.commit_file("README.md", "# Test extension\n");
        repo
    }

    /// Write `name` and commit it, returning the new commit hash.
    pub fn commit_file(&self, name: &str, content: &str) -> String {
        std::fs::write(self.path.join(name), content).expect("Failed to write file");
        self.git(&["add", name]);
        self.git(&[
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "--quiet",
            "-m",
            &format!("Add {}", name),
        ]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// URL to clone this repository from.
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

/// A test fixture providing an extensions index directory and an empty
/// sources directory inside one temporary directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new fixture with empty `index/` and `sources/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("index")
            .create_dir_all()
            .expect("Failed to create index directory");
        temp_dir
            .child("sources")
            .create_dir_all()
            .expect("Failed to create sources directory");
        Self { temp_dir }
    }

    /// Add `index/<name>.s4ext` with the given content.
    pub fn with_descriptor(self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child("index")
            .child(format!("{}.s4ext", name))
            .write_str(content)
            .expect("Failed to write descriptor");
        self
    }

    /// Add a file to the sources directory.
    pub fn with_source_file(self, path: &str, content: &str) -> Self {
        self.sources()
            .child(path)
            .write_str(content)
            .expect("Failed to write source file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn index(&self) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("index")
    }

    pub fn sources(&self) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("sources")
    }

    /// Parsed content of the stats file.
    pub fn stats(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.sources().child(STATS_FILE).path())
            .expect("Failed to read stats file");
        serde_json::from_str(&content).expect("Stats file should be valid JSON")
    }

    /// Create a command running the binary on this fixture's index and
    /// sources directories, with the summary rendered in plain text.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("extensions-checkout");
        cmd.current_dir(self.path())
            .env_remove("EXTENSIONS_CHECKOUT_FILTER")
            .env_remove("EXTENSIONS_CHECKOUT_LOG")
            .args(["--color", "never", "index", "sources"]);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
