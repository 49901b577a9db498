//! Build subprocess runner

use crate::error::{DeployError, DeployResult};
use std::path::Path;
use tokio::process::Command;

/// Run a build command in `dir` through the platform shell.
///
/// Standard streams are inherited so build output lands in the deploy log,
/// and the call blocks until the command exits. There is no timeout; a hung
/// build hangs the run. A non-zero exit aborts the deploy.
pub async fn run_build(command: &str, dir: &Path) -> DeployResult<()> {
    tracing::info!(command = %command, dir = %dir.display(), "Running build command");

    let status = shell_command(command)
        .current_dir(dir)
        .status()
        .await
        .map_err(|source| DeployError::BuildSpawn {
            command: command.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(DeployError::Build {
            command: command.to_string(),
            status,
        });
    }

    Ok(())
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
