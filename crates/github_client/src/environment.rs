//! Deployment environment payloads.
//!
//! Types returned by the GitHub environments API. Protection settings arrive as
//! a heterogeneous `protection_rules` list; the importer is responsible for
//! flattening it into the declarative environment settings.
//!
//! See: https://docs.github.com/en/rest/deployments/environments

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;

/// Envelope returned by `GET /repos/{owner}/{repo}/environments`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EnvironmentList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// A deployment environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Environment {
    /// Environment name
    pub name: String,

    /// Whether administrators may bypass the protection rules
    #[serde(default)]
    pub can_admins_bypass: Option<bool>,

    /// Protection rules (wait timer, required reviewers, branch policy)
    #[serde(default)]
    pub protection_rules: Vec<ProtectionRule>,

    /// Which refs may deploy to this environment; `null` means any ref
    #[serde(default)]
    pub deployment_branch_policy: Option<DeploymentBranchPolicy>,
}

/// A single protection rule of an environment.
///
/// `rule_type` is one of `wait_timer`, `required_reviewers` or `branch_policy`;
/// only the fields belonging to that type are populated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProtectionRule {
    #[serde(rename = "type")]
    pub rule_type: String,

    /// Minutes to wait before a deployment may proceed (`wait_timer`)
    #[serde(default)]
    pub wait_timer: Option<u32>,

    /// Whether the deployer may approve their own deployment (`required_reviewers`)
    #[serde(default)]
    pub prevent_self_review: Option<bool>,

    /// Users and teams that must approve a deployment (`required_reviewers`)
    #[serde(default)]
    pub reviewers: Vec<EnvironmentReviewer>,
}

/// A required reviewer of an environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EnvironmentReviewer {
    /// `User` or `Team`
    #[serde(rename = "type")]
    pub reviewer_type: String,

    pub reviewer: ReviewerIdentity,
}

/// The identity of a reviewer. Users carry a `login`, teams a `slug`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReviewerIdentity {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Deployment branch policy flags of an environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeploymentBranchPolicy {
    /// Only branches with branch protection rules can deploy
    pub protected_branches: bool,

    /// Only refs matching the custom policies can deploy
    pub custom_branch_policies: bool,
}

/// Envelope returned by
/// `GET /repos/{owner}/{repo}/environments/{environment}/deployment-branch-policies`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DeploymentBranchPolicyList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub branch_policies: Vec<DeploymentBranchPolicyPattern>,
}

/// A name pattern allowed to deploy to an environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeploymentBranchPolicyPattern {
    /// Glob pattern, e.g. `release/*`
    pub name: String,

    /// `branch` or `tag`; GitHub omits it for policies created before tag support
    #[serde(rename = "type", default)]
    pub ref_type: Option<String>,
}
