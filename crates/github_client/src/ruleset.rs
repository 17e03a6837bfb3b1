//! Repository ruleset payloads.
//!
//! This module contains the raw types returned by the GitHub rulesets API.
//! Rulesets provide a way to enforce repository governance policies on branches
//! and tags.
//!
//! Enum-like values (`target`, `enforcement`, `bypass_mode`, rule `type`) are kept
//! as strings here. Deciding which values are supported is the importer's job,
//! so an unexpected value surfaces as a mapping error naming the offending field
//! instead of a generic deserialization failure.
//!
//! See: https://docs.github.com/en/rest/repos/rules

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;

/// Represents a repository ruleset.
///
/// # Examples
///
/// ```rust
/// use github_client::RepositoryRuleset;
///
/// let ruleset: RepositoryRuleset = serde_json::from_str(r#"{
///     "id": 42,
///     "name": "main-protection",
///     "target": "branch",
///     "enforcement": "active"
/// }"#).unwrap();
///
/// assert!(ruleset.rules.is_empty());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepositoryRuleset {
    /// Ruleset ID
    pub id: u64,

    /// Ruleset name
    pub name: String,

    /// Target type (`branch`, `tag` or `push`)
    #[serde(default)]
    pub target: Option<String>,

    /// Enforcement level (`disabled`, `active` or `evaluate`)
    pub enforcement: String,

    /// Actors who can bypass this ruleset
    #[serde(default)]
    pub bypass_actors: Vec<BypassActor>,

    /// Conditions for when this ruleset applies
    #[serde(default)]
    pub conditions: Option<RulesetConditions>,

    /// Rules in this ruleset
    ///
    /// Note: GitHub's LIST rulesets endpoint does not include rules in the response.
    /// Use GET /repos/{owner}/{repo}/rulesets/{ruleset_id} to fetch full ruleset details.
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Type of source (`Repository` or `Organization`)
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Actor who can bypass a ruleset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BypassActor {
    /// Actor ID. Absent for `OrganizationAdmin` and `DeployKey` actors.
    #[serde(default)]
    pub actor_id: Option<u64>,

    /// Actor type: `OrganizationAdmin`, `RepositoryRole`, `Team`, `Integration` or `DeployKey`
    pub actor_type: String,

    /// Bypass mode: `always` or `pull_request`
    #[serde(default)]
    pub bypass_mode: Option<String>,
}

/// Conditions for when a ruleset applies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesetConditions {
    /// Reference name patterns
    #[serde(default)]
    pub ref_name: Option<RefNameCondition>,
}

/// Reference name condition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefNameCondition {
    /// Patterns to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Patterns to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// A rule within a ruleset.
///
/// The `parameters` payload depends on `rule_type`; use the typed parameter
/// structs in this module to decode it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Rule type, e.g. `deletion` or `pull_request`
    #[serde(rename = "type")]
    pub rule_type: String,

    /// Rule-specific parameters, when the rule type has any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Parameters for pull request rules.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestParameters {
    /// Dismiss stale reviews when new commits are pushed
    #[serde(default)]
    pub dismiss_stale_reviews_on_push: Option<bool>,

    /// Require code owner review
    #[serde(default)]
    pub require_code_owner_review: Option<bool>,

    /// Require last push approval
    #[serde(default)]
    pub require_last_push_approval: Option<bool>,

    /// Required approving review count
    #[serde(default)]
    pub required_approving_review_count: Option<u32>,

    /// Require all review threads to be resolved
    #[serde(default)]
    pub required_review_thread_resolution: Option<bool>,
}

/// Parameters for required status check rules.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredStatusChecksParameters {
    /// Required status checks
    #[serde(default)]
    pub required_status_checks: Vec<StatusCheck>,

    /// Require branches to be up to date before merging
    #[serde(default)]
    pub strict_required_status_checks_policy: Option<bool>,
}

/// A required status check.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCheck {
    /// Status check context
    pub context: String,

    /// Integration ID of the app that must provide the check
    #[serde(default)]
    pub integration_id: Option<u64>,
}

/// Parameters for required deployment rules.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredDeploymentsParameters {
    /// Environments that must be successfully deployed to
    #[serde(default)]
    pub required_deployment_environments: Vec<String>,
}

/// Parameters for the name and commit metadata pattern rules.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternParameters {
    /// `starts_with`, `ends_with`, `contains` or `regex`
    pub operator: String,

    /// The pattern to match
    pub pattern: String,

    /// Display name of the rule
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the rule matches when the pattern does not
    #[serde(default)]
    pub negate: Option<bool>,
}

/// Parameters for the `update` rule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateParameters {
    /// Branch can pull changes from its upstream repository
    #[serde(default)]
    pub update_allows_fetch_and_merge: Option<bool>,
}

/// Parameters for the `code_scanning` rule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeScanningParameters {
    /// Tools that must provide code scanning results
    #[serde(default)]
    pub code_scanning_tools: Vec<CodeScanningTool>,
}

/// A code scanning tool requirement.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeScanningTool {
    /// Name of the tool
    pub tool: String,

    /// `none`, `errors`, `errors_and_warnings` or `all`
    pub alerts_threshold: String,

    /// `none`, `critical`, `high_or_higher`, `medium_or_higher` or `all`
    pub security_alerts_threshold: String,
}
