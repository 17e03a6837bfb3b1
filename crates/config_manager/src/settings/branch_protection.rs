//! Pattern-based branch protection settings.
//!
//! Mirrors a GitHub branch protection rule as exposed by the GraphQL API.
//! Actor references use the forms `"<owner>/<team-slug>"` for teams,
//! `"/<login>"` for users and `"<app-slug>"` for apps.

use crate::descriptor::{Describe, FieldDescriptor, FieldKind, TypeDescriptor};
use serde::{Deserialize, Serialize};

/// A branch protection rule, keyed by its branch name pattern.
///
/// # Examples
///
/// ```rust
/// use config_manager::settings::BranchProtectionV4;
///
/// let protection = BranchProtectionV4 {
///     pattern: "main".to_string(),
///     enforce_admins: Some(true),
///     push_restrictions: vec!["my-org/release-managers".to_string()],
///     ..Default::default()
/// };
/// assert!(protection.required_status_checks.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchProtectionV4 {
    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_deletions: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_force_pushes: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_signed_commits: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_linear_history: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_conversation_resolution: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_branch: Option<bool>,

    /// Actors allowed to push to matching branches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub push_restrictions: Vec<String>,

    /// Actors allowed to force push to matching branches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub force_push_bypassers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<RequiredStatusChecksV4>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_pull_request_reviews: Option<RequiredPullRequestReviewsV4>,
}

impl Describe for BranchProtectionV4 {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "BranchProtectionV4",
            vec![
                F::required("pattern", K::String),
                F::optional("enforce_admins", K::Boolean),
                F::optional("allows_deletions", K::Boolean),
                F::optional("allows_force_pushes", K::Boolean),
                F::optional("require_signed_commits", K::Boolean),
                F::optional("required_linear_history", K::Boolean),
                F::optional("require_conversation_resolution", K::Boolean),
                F::optional("lock_branch", K::Boolean),
                F::optional("push_restrictions", K::strings()),
                F::optional("force_push_bypassers", K::strings()),
                F::optional(
                    "required_status_checks",
                    K::object::<RequiredStatusChecksV4>(),
                ),
                F::optional(
                    "required_pull_request_reviews",
                    K::object::<RequiredPullRequestReviewsV4>(),
                ),
            ],
        )
    }
}

/// Status checks required by a branch protection rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredStatusChecksV4 {
    /// Require branches to be up to date before merging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
}

impl Describe for RequiredStatusChecksV4 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredStatusChecksV4",
            vec![
                FieldDescriptor::optional("strict", FieldKind::Boolean),
                FieldDescriptor::optional("contexts", FieldKind::strings()),
            ],
        )
    }
}

/// Pull request review requirements of a branch protection rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredPullRequestReviewsV4 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_dismissals: Option<bool>,

    /// Actors allowed to dismiss reviews
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dismissal_restrictions: Vec<String>,

    /// Actors allowed to bypass pull request requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pull_request_bypassers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    /// 0 to 6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
}

impl Describe for RequiredPullRequestReviewsV4 {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "RequiredPullRequestReviewsV4",
            vec![
                F::optional("dismiss_stale_reviews", K::Boolean),
                F::optional("restrict_dismissals", K::Boolean),
                F::optional("dismissal_restrictions", K::strings()),
                F::optional("pull_request_bypassers", K::strings()),
                F::optional("require_code_owner_reviews", K::Boolean),
                F::optional("required_approving_review_count", K::bounded_integer(0, 6)),
                F::optional("require_last_push_approval", K::Boolean),
            ],
        )
    }
}
