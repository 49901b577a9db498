//! Worker publication
//!
//! Publishes the companion Worker under its branch-scoped deployment
//! identity. Publication either completes fully or fails with no partial
//! state claimed; skipping (no Worker declared, or previews disabled for
//! the branch) is a normal outcome, not an error.

use crate::build::run_build;
use crate::error::{DeployError, DeployResult};
use skiff_api::{CloudflareClient, WorkerUpload};
use skiff_types::{deployment_identity, BindingSet, WorkerConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of a completed Worker publication
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Deployment identity the script was published under
    pub name: String,
    /// URL the Worker serves from
    pub url: String,
}

/// Publishes the companion Worker for a branch
pub struct ArtifactPublisher<'a> {
    client: &'a CloudflareClient,
    working_dir: PathBuf,
}

impl<'a> ArtifactPublisher<'a> {
    /// `working_dir` is where the build command runs and script paths
    /// resolve from; callers pass it explicitly rather than this component
    /// reading process state.
    pub fn new(client: &'a CloudflareClient, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            working_dir: working_dir.into(),
        }
    }

    /// Publish `worker` for `branch`, or return `None` when there is
    /// nothing to do.
    ///
    /// `project_name` is the naming fallback when the Worker declares no
    /// base name of its own. Build failure, a missing entry point and
    /// upload failure are all fatal; nothing is retried.
    pub async fn publish(
        &self,
        worker: Option<&WorkerConfig>,
        project_name: &str,
        branch: &str,
        production_branch: &str,
        secrets: &BTreeMap<String, String>,
    ) -> DeployResult<Option<PublishOutcome>> {
        let Some(worker) = worker else {
            tracing::debug!("No worker configured, skipping publication");
            return Ok(None);
        };

        let is_production = branch == production_branch;
        if !is_production && worker.deploy_previews == Some(false) {
            tracing::info!(branch = %branch, "Preview publication disabled, skipping worker");
            return Ok(None);
        }

        let base = worker.name.as_deref().unwrap_or(project_name);
        let name = deployment_identity(base, branch, production_branch);

        if let Some(command) = &worker.build_command {
            run_build(command, &self.working_dir).await?;
        }

        let script_path = self.working_dir.join(&worker.script);
        let script = tokio::fs::read_to_string(&script_path)
            .await
            .map_err(|source| DeployError::ScriptRead {
                path: script_path.display().to_string(),
                source,
            })?;

        let upload = WorkerUpload {
            main_module: entry_file_name(&worker.script),
            script,
            compatibility_date: worker.compatibility_date.clone(),
            compatibility_flags: worker.compatibility_flags.clone(),
            bindings: BindingSet::translate(worker, secrets),
        };

        tracing::info!(worker = %name, production = is_production, "Uploading worker script");
        self.client.upload_worker(&name, &upload).await?;

        let subdomain = self.client.workers_subdomain().await?;
        let url = format!("https://{name}.{subdomain}.workers.dev");

        tracing::info!(worker = %name, url = %url, "Worker published");

        Ok(Some(PublishOutcome { name, url }))
    }
}

fn entry_file_name(script: &str) -> String {
    Path::new(script)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| script.to_string())
}
