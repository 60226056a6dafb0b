use std::process::Command;

use crate::descriptor::RepoSpec;
use crate::error::Result;

use super::{is_working_copy, run_command};

/// Clone or pull a Mercurial repository and update it to `spec.revision`
///
/// Only a destination holding `.hg` is pulled; anything else is cloned into.
pub fn sync(spec: &RepoSpec) -> Result<()> {
    if is_working_copy(&spec.destination, ".hg") {
        let mut cmd = hg_in(spec);
        cmd.args(["pull", "--quiet"]);
        run_command(spec, "pull", cmd)?;
    } else {
        run_command(spec, "clone", clone_command(spec))?;
    }

    run_command(spec, "update", update_command(spec))
}

fn clone_command(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("hg");
    cmd.args(["clone", "--quiet", "--noupdate", "--", spec.url.as_str()])
        .arg(&spec.destination);
    cmd
}

fn update_command(spec: &RepoSpec) -> Command {
    let mut cmd = hg_in(spec);
    cmd.args(["update", "--quiet", "--rev", spec.revision.as_str()]);
    cmd
}

fn hg_in(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("hg");
    cmd.arg("--cwd").arg(&spec.destination);
    cmd
}
