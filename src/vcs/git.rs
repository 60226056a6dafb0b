use std::process::Command;

use crate::descriptor::RepoSpec;
use crate::error::Result;

use super::{is_working_copy, probe, run_command};

/// Clone or update a git working copy and check out `spec.revision`
///
/// A fresh destination is cloned in full (not shallow) so that any commit,
/// tag or branch can be checked out. An existing working copy is fetched;
/// when the revision names a branch, the local branch is fast-forwarded to
/// the remote one. A destination without `.git` is cloned into, never
/// treated as a working copy, so git cannot fall back to an enclosing
/// repository.
pub fn sync(spec: &RepoSpec) -> Result<()> {
    if is_working_copy(&spec.destination, ".git") {
        update(spec)
    } else {
        run_command(spec, "clone", clone_command(spec))?;
        checkout(spec)
    }
}

fn update(spec: &RepoSpec) -> Result<()> {
    let mut cmd = git_in(spec);
    cmd.args(["fetch", "--quiet", "--tags", "origin"]);
    run_command(spec, "fetch", cmd)?;

    checkout(spec)?;

    if is_remote_branch(spec) {
        let mut cmd = git_in(spec);
        cmd.args(["merge", "--ff-only", "--quiet"])
            .arg(format!("origin/{}", spec.revision));
        run_command(spec, "merge", cmd)?;
    }

    Ok(())
}

fn checkout(spec: &RepoSpec) -> Result<()> {
    run_command(spec, "checkout", checkout_command(spec))
}

fn clone_command(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--quiet", "--", spec.url.as_str()])
        .arg(&spec.destination);
    cmd
}

fn checkout_command(spec: &RepoSpec) -> Command {
    let mut cmd = git_in(spec);
    cmd.args(["checkout", "--quiet", spec.revision.as_str()]);
    cmd
}

fn is_remote_branch(spec: &RepoSpec) -> bool {
    let mut cmd = git_in(spec);
    cmd.args(["rev-parse", "--verify", "--quiet"])
        .arg(format!("refs/remotes/origin/{}", spec.revision));
    probe(cmd)
}

fn git_in(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(&spec.destination);
    cmd
}
