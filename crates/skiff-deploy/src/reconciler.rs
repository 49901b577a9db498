//! Pages project reconciliation
//!
//! Compares the declared project configuration against the remote record
//! and issues the minimal mutation that converges them. The only
//! irreversible action, deleting a project to replace its source
//! integration, is gated behind the `allow_recreate` flag.

use crate::error::{DeployError, DeployResult};
use skiff_api::{ApiError, BuildConfig, CloudflareClient, PagesProject, ProjectRequest, ProjectSource, SourceConfig};
use skiff_types::PagesConfig;

/// Mutation the reconciler performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No project existed; one was created
    Created,
    /// The existing GitHub-integrated project was edited in place
    Updated,
    /// The existing project was deleted and recreated with a GitHub source
    Recreated,
}

impl ReconcileAction {
    /// Past-tense label for summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileAction::Created => "created",
            ReconcileAction::Updated => "updated",
            ReconcileAction::Recreated => "recreated",
        }
    }
}

/// Result of a successful reconciliation
#[derive(Debug, Clone)]
pub struct ProjectOutcome {
    /// URL the production deployment serves from
    pub url: String,
    /// What the reconciler did
    pub action: ReconcileAction,
}

/// Converges a Pages project toward its declared configuration
pub struct ProjectReconciler<'a> {
    client: &'a CloudflareClient,
}

impl<'a> ProjectReconciler<'a> {
    pub fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// Reconcile the remote project against `desired`.
    ///
    /// Any lookup failure other than not-found propagates unchanged; there
    /// is no retry here. An existing project whose source is not a GitHub
    /// integration fails with [`DeployError::RecreateRequired`] unless
    /// `allow_recreate` authorizes the destructive path.
    pub async fn reconcile(&self, desired: &PagesConfig) -> DeployResult<ProjectOutcome> {
        let request = project_request(desired);

        let existing = match self.client.get_project(&desired.name).await {
            Ok(project) => Some(project),
            Err(ApiError::NotFound(_)) => None,
            Err(error) => return Err(error.into()),
        };

        let action = match existing {
            None => {
                tracing::info!(project = %desired.name, "Project not found, creating");
                self.client.create_project(&request).await?;
                ReconcileAction::Created
            }
            Some(ref project) if project.has_github_source() => {
                tracing::info!(project = %desired.name, "Updating project in place");
                self.client.update_project(&desired.name, &request).await?;
                ReconcileAction::Updated
            }
            Some(ref project) => {
                if !desired.allow_recreate {
                    return Err(DeployError::RecreateRequired {
                        name: desired.name.clone(),
                        source_kind: project.source_kind().to_string(),
                    });
                }

                tracing::warn!(
                    project = %desired.name,
                    source = %project.source_kind(),
                    "Deleting project to recreate it with a GitHub source"
                );
                self.client.delete_project(&desired.name).await?;
                self.client.create_project(&request).await?;
                ReconcileAction::Recreated
            }
        };

        // The platform assigns the pages.dev subdomain on its own schedule;
        // re-read the record after mutating for the authoritative value.
        let record = self.client.get_project(&desired.name).await?;
        let url = project_url(&record, &desired.name);

        tracing::info!(project = %desired.name, action = action.as_str(), url = %url, "Project reconciled");

        Ok(ProjectOutcome { url, action })
    }
}

/// Map the declared configuration onto the platform's request shape.
///
/// The deployment toggles are not user-configurable: an integration-sourced
/// project always deploys production and previews for all branches.
fn project_request(desired: &PagesConfig) -> ProjectRequest {
    ProjectRequest {
        name: desired.name.clone(),
        production_branch: desired.production_branch.clone(),
        source: ProjectSource {
            kind: "github".to_string(),
            config: Some(SourceConfig {
                owner: desired.repo_owner.clone(),
                repo_name: desired.repo_name.clone(),
                production_branch: desired.production_branch.clone(),
                deployments_enabled: true,
                production_deployments_enabled: true,
                preview_deployment_setting: "all".to_string(),
                preview_branch_includes: desired
                    .preview_branch_includes
                    .clone()
                    .unwrap_or_else(|| vec!["*".to_string()]),
                preview_branch_excludes: desired.preview_branch_excludes.clone().unwrap_or_default(),
            }),
        },
        build_config: BuildConfig {
            build_command: desired.build.command.clone().unwrap_or_default(),
            destination_dir: desired
                .build
                .output_dir
                .clone()
                .unwrap_or_else(|| ".".to_string()),
            root_dir: desired.build.root_dir.clone().unwrap_or_default(),
        },
    }
}

fn project_url(record: &PagesProject, name: &str) -> String {
    match record.subdomain.as_deref() {
        Some(subdomain) if !subdomain.is_empty() => format!("https://{subdomain}"),
        _ => format!("https://{name}.pages.dev"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_types::BuildSettings;

    fn desired() -> PagesConfig {
        PagesConfig {
            name: "marketing-site".to_string(),
            repo_owner: "acme".to_string(),
            repo_name: "marketing-site".to_string(),
            production_branch: "main".to_string(),
            build: BuildSettings {
                command: Some("npm run build".to_string()),
                output_dir: Some("dist".to_string()),
                root_dir: Some(String::new()),
            },
            preview_branch_includes: None,
            preview_branch_excludes: None,
            allow_recreate: false,
        }
    }

    #[test]
    fn test_build_config_mapping() {
        let request = project_request(&desired());

        assert_eq!(
            request.build_config,
            BuildConfig {
                build_command: "npm run build".to_string(),
                destination_dir: "dist".to_string(),
                root_dir: String::new(),
            }
        );
    }

    #[test]
    fn test_build_config_defaults_when_unset() {
        let mut config = desired();
        config.build = BuildSettings::default();

        let request = project_request(&config);

        assert_eq!(
            request.build_config,
            BuildConfig {
                build_command: String::new(),
                destination_dir: ".".to_string(),
                root_dir: String::new(),
            }
        );
    }

    #[test]
    fn test_deployment_toggles_are_forced_on() {
        let request = project_request(&desired());
        let source = request.source.config.unwrap();

        assert!(source.deployments_enabled);
        assert!(source.production_deployments_enabled);
        assert_eq!(source.preview_deployment_setting, "all");
        assert_eq!(source.preview_branch_includes, ["*"]);
        assert!(source.preview_branch_excludes.is_empty());
    }

    #[test]
    fn test_preview_patterns_map_directly() {
        let mut config = desired();
        config.preview_branch_includes = Some(vec!["feature/*".to_string()]);
        config.preview_branch_excludes = Some(vec!["wip/*".to_string()]);

        let source = project_request(&config).source.config.unwrap();

        assert_eq!(source.preview_branch_includes, ["feature/*"]);
        assert_eq!(source.preview_branch_excludes, ["wip/*"]);
    }

    #[test]
    fn test_url_falls_back_to_project_name() {
        let record: PagesProject =
            serde_json::from_value(serde_json::json!({ "name": "marketing-site" })).unwrap();

        assert_eq!(project_url(&record, "marketing-site"), "https://marketing-site.pages.dev");
    }

    #[test]
    fn test_url_uses_assigned_subdomain() {
        let record: PagesProject = serde_json::from_value(serde_json::json!({
            "name": "marketing-site",
            "subdomain": "marketing-site-abc.pages.dev",
        }))
        .unwrap();

        assert_eq!(project_url(&record, "marketing-site"), "https://marketing-site-abc.pages.dev");
    }
}
