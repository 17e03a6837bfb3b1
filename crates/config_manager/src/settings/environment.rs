//! Deployment environment settings.
//!
//! GitHub reports environment protection as a list of heterogeneous
//! protection rules. Here the relevant values are flattened onto the
//! environment itself.

use crate::descriptor::{setting_enum, Describe, FieldDescriptor, FieldKind, TypeDescriptor};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;

/// Longest wait timer GitHub accepts, in minutes (30 days).
pub const MAX_WAIT_TIMER_MINUTES: i64 = 43_200;

setting_enum! {
    /// Which refs may deploy to an environment.
    DeploymentPolicyType {
        /// Only branches with branch protection rules
        ProtectedBranches => "protected_branches",
        /// Only branches and tags matching the listed patterns
        SelectedBranchesAndTags => "selected_branches_and_tags",
    }
}

/// A deployment environment.
///
/// # Examples
///
/// ```yaml
/// environments:
///   - environment: production
///     wait_timer: 30
///     prevent_self_review: true
///     reviewers:
///       teams: [platform-team]
///     deployment_policy:
///       policy_type: selected_branches_and_tags
///       branch_patterns: ["release/*"]
///       tag_patterns: ["v*"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    pub environment: String,

    /// Minutes to wait before a deployment may proceed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_timer: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_admins_bypass: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_self_review: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<EnvironmentReviewers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_policy: Option<DeploymentPolicy>,
}

impl Describe for Environment {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "Environment",
            vec![
                F::required("environment", K::String),
                F::optional("wait_timer", K::bounded_integer(0, MAX_WAIT_TIMER_MINUTES))
                    .with_description("Minutes to wait before a deployment may proceed"),
                F::optional("can_admins_bypass", K::Boolean),
                F::optional("prevent_self_review", K::Boolean),
                F::optional("reviewers", K::object::<EnvironmentReviewers>()),
                F::optional("deployment_policy", K::object::<DeploymentPolicy>()),
            ],
        )
    }
}

/// Users and teams that must approve a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentReviewers {
    /// Team slugs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,

    /// User logins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

impl EnvironmentReviewers {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.users.is_empty()
    }
}

impl Describe for EnvironmentReviewers {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "EnvironmentReviewers",
            vec![
                FieldDescriptor::optional("teams", FieldKind::strings()),
                FieldDescriptor::optional("users", FieldKind::strings()),
            ],
        )
    }
}

/// The refs allowed to deploy to an environment.
///
/// Patterns are only meaningful for `selected_branches_and_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentPolicy {
    pub policy_type: DeploymentPolicyType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_patterns: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_patterns: Vec<String>,
}

impl Describe for DeploymentPolicy {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "DeploymentPolicy",
            vec![
                FieldDescriptor::required(
                    "policy_type",
                    FieldKind::enumeration::<DeploymentPolicyType>(),
                ),
                FieldDescriptor::optional("branch_patterns", FieldKind::strings()),
                FieldDescriptor::optional("tag_patterns", FieldKind::strings()),
            ],
        )
    }
}
