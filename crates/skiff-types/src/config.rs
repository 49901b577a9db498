//! Declarative deployment configuration
//!
//! These types are the deserialized form of the `skiff.json` project file.
//! The loader in `skiff-cli` applies defaults and boundary validation; the
//! deploy engine assumes well-formed input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired state for a Pages project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Project name on the platform. The name is a stable identity:
    /// changing it addresses a different project, it never renames this one.
    pub name: String,

    /// GitHub repository owner
    pub repo_owner: String,

    /// GitHub repository name
    pub repo_name: String,

    /// Branch that produces production deployments
    pub production_branch: String,

    /// Build pipeline settings
    #[serde(default)]
    pub build: BuildSettings,

    /// Preview branch include patterns (all branches when unset)
    #[serde(default)]
    pub preview_branch_includes: Option<Vec<String>>,

    /// Preview branch exclude patterns (no exclusions when unset)
    #[serde(default)]
    pub preview_branch_excludes: Option<Vec<String>>,

    /// Authorize deleting and recreating a project whose source cannot be
    /// edited in place. Recreation permanently discards deployment history,
    /// so this is never inferred.
    #[serde(default)]
    pub allow_recreate: bool,
}

/// Build settings for a Pages project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Build command, if the site needs one
    #[serde(default)]
    pub command: Option<String>,

    /// Directory the build writes deployable assets to
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Directory the build runs in, relative to the repository root
    #[serde(default)]
    pub root_dir: Option<String>,
}

/// Desired state for the companion Worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Base name for the deployment identity. Falls back to the Pages
    /// project name when unset.
    #[serde(default)]
    pub name: Option<String>,

    /// Entry-point module path
    pub script: String,

    /// Command to run before reading the entry point
    #[serde(default)]
    pub build_command: Option<String>,

    /// Workers runtime compatibility date
    pub compatibility_date: String,

    /// Workers runtime compatibility flags
    #[serde(default)]
    pub compatibility_flags: Vec<String>,

    /// Whether non-production branches publish a preview Worker. Only an
    /// explicit `false` skips preview publication.
    #[serde(default)]
    pub deploy_previews: Option<bool>,

    /// Plain-text environment variables
    #[serde(default)]
    pub vars: BTreeMap<String, VarValue>,

    /// KV namespace bindings, binding name to namespace id
    #[serde(default)]
    pub kv_namespaces: BTreeMap<String, String>,

    /// D1 database bindings, binding name to database id
    #[serde(default)]
    pub d1_databases: BTreeMap<String, String>,

    /// R2 bucket bindings, binding name to bucket name
    #[serde(default)]
    pub r2_buckets: BTreeMap<String, String>,
}

/// A plain environment-variable value
///
/// JSON numbers and booleans are accepted and coerced to their string
/// representation when the binding set is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl VarValue {
    /// String representation sent to the platform
    pub fn as_text(&self) -> String {
        match self {
            VarValue::String(text) => text.clone(),
            VarValue::Number(number) => number.to_string(),
            VarValue::Bool(flag) => flag.to_string(),
        }
    }
}
