//! Configuration file loading and boundary validation
//!
//! The engine assumes well-formed input, so everything user-supplied is
//! checked here: required fields, and binding-name uniqueness across the
//! five binding categories (the platform's behavior for a duplicated name
//! is undefined, so the collision is rejected before any remote call).

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use skiff_types::{PagesConfig, WorkerConfig};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level deploy configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Pages project desired state
    #[serde(flatten)]
    pub pages: PagesConfig,

    /// Optional companion Worker
    #[serde(default)]
    pub worker: Option<WorkerConfig>,
}

impl DeployConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|error| CliError::Config(format!("cannot read {}: {error}", path.display())))?;
        let config: DeployConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.pages.name.trim().is_empty() {
            return Err(CliError::Config("project name must not be empty".to_string()));
        }
        if self.pages.production_branch.trim().is_empty() {
            return Err(CliError::Config("production_branch must not be empty".to_string()));
        }

        if let Some(worker) = &self.worker {
            if worker.script.trim().is_empty() {
                return Err(CliError::Config("worker.script must not be empty".to_string()));
            }
            if worker.compatibility_date.trim().is_empty() {
                return Err(CliError::Config(
                    "worker.compatibility_date must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Reject binding names declared in more than one category
    pub fn check_binding_names(&self, secrets: &BTreeMap<String, String>) -> CliResult<()> {
        let Some(worker) = &self.worker else {
            return Ok(());
        };

        let categories: [(&str, Vec<&String>); 5] = [
            ("vars", worker.vars.keys().collect()),
            ("secrets", secrets.keys().collect()),
            ("kv_namespaces", worker.kv_namespaces.keys().collect()),
            ("d1_databases", worker.d1_databases.keys().collect()),
            ("r2_buckets", worker.r2_buckets.keys().collect()),
        ];

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (category, names) in &categories {
            for name in names {
                if let Some(previous) = seen.insert(name.as_str(), *category) {
                    return Err(CliError::Config(format!(
                        "binding name '{name}' is declared in both {previous} and {category}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Parse a `--secret` argument: `NAME=VALUE`, or a bare `NAME` whose value
/// is read from the process environment here at the CLI boundary.
pub fn parse_secret(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, _)) if name.trim().is_empty() => Err("secret name must not be empty".to_string()),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => match std::env::var(raw) {
            Ok(value) => Ok((raw.to_string(), value)),
            Err(_) => Err(format!("environment variable '{raw}' is not set")),
        },
    }
}
