use std::process::Command;

use crate::descriptor::RepoSpec;
use crate::error::Result;

use super::{is_working_copy, run_command};

/// Check out or update a Subversion working copy pinned to `spec.revision`
///
/// Only a destination holding `.svn` is updated; anything else is checked
/// out into.
pub fn sync(spec: &RepoSpec) -> Result<()> {
    if is_working_copy(&spec.destination, ".svn") {
        run_command(spec, "update", update_command(spec))
    } else {
        run_command(spec, "checkout", checkout_command(spec))
    }
}

fn checkout_command(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("svn");
    cmd.args(["checkout", "--non-interactive", "--quiet"]);
    add_credentials(&mut cmd, spec);
    cmd.args(["-r", spec.revision.as_str(), "--", spec.url.as_str()])
        .arg(&spec.destination);
    cmd
}

fn update_command(spec: &RepoSpec) -> Command {
    let mut cmd = Command::new("svn");
    cmd.args(["update", "--non-interactive", "--quiet"]);
    add_credentials(&mut cmd, spec);
    cmd.args(["-r", spec.revision.as_str(), "--"])
        .arg(&spec.destination);
    cmd
}

fn add_credentials(cmd: &mut Command, spec: &RepoSpec) {
    if let Some(credentials) = &spec.credentials {
        if let Some(username) = &credentials.username {
            cmd.args(["--username", username.as_str()]);
        }
        if let Some(password) = &credentials.password {
            cmd.args(["--password", password.as_str()]);
        }
    }
}
