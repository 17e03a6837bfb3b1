//! Branch protection rule payloads.
//!
//! Branch protection rules are read through the GraphQL API because the REST
//! API only exposes protection per concrete branch, not per pattern.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// GraphQL query listing the branch protection rules of a repository, one page at a time.
pub(crate) const BRANCH_PROTECTION_RULES_QUERY: &str = r#"
query($owner: String!, $name: String!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    branchProtectionRules(first: 100, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes {
        pattern
        isAdminEnforced
        allowsDeletions
        allowsForcePushes
        requiresCommitSignatures
        requiresLinearHistory
        requiresConversationResolution
        lockBranch
        requiresStatusChecks
        requiresStrictStatusChecks
        requiredStatusCheckContexts
        requiresApprovingReviews
        requiredApprovingReviewCount
        dismissesStaleReviews
        requiresCodeOwnerReviews
        restrictsReviewDismissals
        requireLastPushApproval
        restrictsPushes
        pushAllowances(first: 100) { nodes { actor { ...ActorFields } } }
        bypassForcePushAllowances(first: 100) { nodes { actor { ...ActorFields } } }
        reviewDismissalAllowances(first: 100) { nodes { actor { ...ActorFields } } }
        bypassPullRequestAllowances(first: 100) { nodes { actor { ...ActorFields } } }
      }
    }
  }
}

fragment ActorFields on Node {
  __typename
  ... on Team { slug }
  ... on User { login }
  ... on App { slug }
}
"#;

/// Generic GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BranchProtectionRulesData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryNode {
    pub branch_protection_rules: Connection<BranchProtectionRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A branch protection rule, keyed by its branch name pattern.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BranchProtectionRule {
    pub pattern: String,
    #[serde(default)]
    pub is_admin_enforced: Option<bool>,
    #[serde(default)]
    pub allows_deletions: Option<bool>,
    #[serde(default)]
    pub allows_force_pushes: Option<bool>,
    #[serde(default)]
    pub requires_commit_signatures: Option<bool>,
    #[serde(default)]
    pub requires_linear_history: Option<bool>,
    #[serde(default)]
    pub requires_conversation_resolution: Option<bool>,
    #[serde(default)]
    pub lock_branch: Option<bool>,
    #[serde(default)]
    pub requires_status_checks: Option<bool>,
    #[serde(default)]
    pub requires_strict_status_checks: Option<bool>,
    #[serde(default)]
    pub required_status_check_contexts: Vec<String>,
    #[serde(default)]
    pub requires_approving_reviews: Option<bool>,
    #[serde(default)]
    pub required_approving_review_count: Option<u32>,
    #[serde(default)]
    pub dismisses_stale_reviews: Option<bool>,
    #[serde(default)]
    pub requires_code_owner_reviews: Option<bool>,
    #[serde(default)]
    pub restricts_review_dismissals: Option<bool>,
    #[serde(default)]
    pub require_last_push_approval: Option<bool>,
    #[serde(default)]
    pub restricts_pushes: Option<bool>,
    #[serde(default)]
    pub push_allowances: ActorConnection,
    #[serde(default)]
    pub bypass_force_push_allowances: ActorConnection,
    #[serde(default)]
    pub review_dismissal_allowances: ActorConnection,
    #[serde(default)]
    pub bypass_pull_request_allowances: ActorConnection,
}

/// A list of allowance entries, each naming an actor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ActorConnection {
    #[serde(default)]
    pub nodes: Vec<ActorAllowance>,
}

impl ActorConnection {
    /// Returns the actors of this connection, skipping entries GitHub could not resolve.
    pub fn actors(&self) -> impl Iterator<Item = &ProtectionActor> {
        self.nodes.iter().filter_map(|n| n.actor.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ActorAllowance {
    #[serde(default)]
    pub actor: Option<ProtectionActor>,
}

/// The actor of an allowance entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum ProtectionActor {
    Team { slug: String },
    User { login: String },
    App { slug: String },
    #[serde(other)]
    Unknown,
}
