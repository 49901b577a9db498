//! Wire models for the v4 API
//!
//! Response types mirror what the platform returns; request types carry only
//! the fields this tool manages.

use crate::error::ApiMessage;
use serde::{Deserialize, Serialize};
use skiff_types::BindingSet;

/// The v4 response envelope wrapping every endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the call succeeded
    #[serde(default)]
    pub success: bool,

    /// Structured errors, populated on failure
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Endpoint-specific payload
    pub result: Option<T>,
}

/// A Pages project as reported by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesProject {
    /// Project name, the platform-wide identity
    pub name: String,

    /// Assigned `<project>.pages.dev` host, present once provisioning
    /// completed
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Source integration, absent for direct-upload projects
    #[serde(default)]
    pub source: Option<ProjectSource>,

    /// Branch that produces production deployments
    #[serde(default)]
    pub production_branch: Option<String>,
}

impl PagesProject {
    /// Whether this project is driven by a GitHub source integration
    pub fn has_github_source(&self) -> bool {
        self.source.as_ref().is_some_and(|source| source.kind == "github")
    }

    /// Source type tag for diagnostics, `direct_upload` when no source
    /// integration is attached
    pub fn source_kind(&self) -> &str {
        self.source
            .as_ref()
            .map(|source| source.kind.as_str())
            .unwrap_or("direct_upload")
    }
}

/// Source integration block of a Pages project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSource {
    /// Integration type tag, `github` for the integration this tool manages
    #[serde(rename = "type")]
    pub kind: String,

    /// Integration configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SourceConfig>,
}

/// GitHub source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo_name: String,

    /// Branch that produces production deployments
    pub production_branch: String,

    /// Master toggle for integration-driven deployments
    pub deployments_enabled: bool,

    /// Whether pushes to the production branch deploy
    pub production_deployments_enabled: bool,

    /// Preview policy, `all` / `custom` / `none`
    pub preview_deployment_setting: String,

    /// Branch patterns that produce previews
    pub preview_branch_includes: Vec<String>,

    /// Branch patterns excluded from previews
    pub preview_branch_excludes: Vec<String>,
}

/// Request body for project create and update calls
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRequest {
    /// Project name
    pub name: String,

    /// Branch that produces production deployments
    pub production_branch: String,

    /// GitHub source block
    pub source: ProjectSource,

    /// Remote build configuration
    pub build_config: BuildConfig,
}

/// Remote build configuration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Command the platform runs to build the site
    pub build_command: String,

    /// Directory holding the deployable output
    pub destination_dir: String,

    /// Directory the build runs in
    pub root_dir: String,
}

/// A Worker script upload: module source plus its metadata
#[derive(Debug, Clone)]
pub struct WorkerUpload {
    /// Entry-point file name, referenced by the metadata as the main module
    pub main_module: String,

    /// Module source text
    pub script: String,

    /// Workers runtime compatibility date
    pub compatibility_date: String,

    /// Workers runtime compatibility flags
    pub compatibility_flags: Vec<String>,

    /// Bindings injected into the Worker
    pub bindings: BindingSet,
}

/// Metadata part of the multipart script upload
#[derive(Debug, Serialize)]
pub(crate) struct WorkerMetadata<'a> {
    pub main_module: &'a str,
    pub compatibility_date: &'a str,
    pub compatibility_flags: &'a [String],
    pub bindings: &'a BindingSet,
}

impl WorkerUpload {
    pub(crate) fn metadata(&self) -> WorkerMetadata<'_> {
        WorkerMetadata {
            main_module: &self.main_module,
            compatibility_date: &self.compatibility_date,
            compatibility_flags: &self.compatibility_flags,
            bindings: &self.bindings,
        }
    }
}

/// Account-level workers.dev subdomain
#[derive(Debug, Clone, Deserialize)]
pub struct WorkersSubdomain {
    pub subdomain: String,
}
