//! Repository ruleset settings.
//!
//! A ruleset carries exactly one [`Rule`] value whose sub-rules are all
//! optional; a sub-rule that is absent is simply not enforced.
//!
//! # Examples
//!
//! ```yaml
//! rulesets:
//!   - name: main-protection
//!     enforcement: active
//!     target: branch
//!     rules:
//!       deletion: true
//!       pull_request:
//!         required_approving_review_count: 2
//!     bypass_actors:
//!       - name: maintain
//!         bypass_mode: always
//!     conditions:
//!       ref_name:
//!         include: ["~DEFAULT_BRANCH"]
//! ```

use crate::descriptor::{setting_enum, Describe, FieldDescriptor, FieldKind, TypeDescriptor};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;

setting_enum! {
    /// Enforcement level of a ruleset.
    RulesetEnforcement {
        Disabled => "disabled",
        Active => "active",
        Evaluate => "evaluate",
    }
}

setting_enum! {
    /// The kind of ref a ruleset applies to.
    RulesetTarget {
        Branch => "branch",
        Tag => "tag",
    }
}

setting_enum! {
    /// When a bypass actor may bypass a ruleset.
    BypassMode {
        Always => "always",
        PullRequest => "pull_request",
    }
}

setting_enum! {
    /// How a pattern rule matches.
    PatternOperator {
        StartsWith => "starts_with",
        EndsWith => "ends_with",
        Contains => "contains",
        Regex => "regex",
    }
}

setting_enum! {
    /// Code scanning alert severity that blocks a ref update.
    AlertsThreshold {
        None => "none",
        Errors => "errors",
        ErrorsAndWarnings => "errors_and_warnings",
        All => "all",
    }
}

setting_enum! {
    /// Code scanning security alert severity that blocks a ref update.
    SecurityAlertsThreshold {
        None => "none",
        Critical => "critical",
        HighOrHigher => "high_or_higher",
        MediumOrHigher => "medium_or_higher",
        All => "all",
    }
}

/// A repository ruleset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ruleset {
    /// Platform-assigned ID; kept for log context only
    #[serde(skip)]
    pub id: u64,

    pub enforcement: RulesetEnforcement,

    pub name: String,

    pub rules: Rule,

    pub target: RulesetTarget,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bypass_actors: Vec<BypassActor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
}

impl Describe for Ruleset {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "Ruleset",
            vec![
                F::required("enforcement", K::enumeration::<RulesetEnforcement>()),
                F::required("name", K::String),
                F::required("rules", K::object::<Rule>()),
                F::required("target", K::enumeration::<RulesetTarget>()),
                F::optional("bypass_actors", K::object_list::<BypassActor>(None)),
                F::optional("conditions", K::object::<Conditions>()),
            ],
        )
    }
}

/// The rules of a ruleset.
///
/// `branch_name_pattern` and `tag_name_pattern` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name_pattern: Option<PatternRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_author_email_pattern: Option<PatternRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message_pattern: Option<PatternRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer_email_pattern: Option<PatternRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_fast_forward: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_deployments: Option<RequiredDeployments>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_linear_history: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_signatures: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<RequiredStatusChecks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name_pattern: Option<PatternRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_code_scanning: Option<RequiredCodeScanning>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_allows_fetch_and_merge: Option<bool>,
}

impl Describe for Rule {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "Rule",
            vec![
                F::optional("branch_name_pattern", K::object::<PatternRule>()),
                F::optional("commit_author_email_pattern", K::object::<PatternRule>()),
                F::optional("commit_message_pattern", K::object::<PatternRule>()),
                F::optional("committer_email_pattern", K::object::<PatternRule>()),
                F::optional("creation", K::Boolean),
                F::optional("deletion", K::Boolean),
                F::optional("non_fast_forward", K::Boolean),
                F::optional("pull_request", K::object::<PullRequestRule>()),
                F::optional("required_deployments", K::object::<RequiredDeployments>()),
                F::optional("required_linear_history", K::Boolean),
                F::optional("required_signatures", K::Boolean),
                F::optional("required_status_checks", K::object::<RequiredStatusChecks>()),
                F::optional("tag_name_pattern", K::object::<PatternRule>()),
                F::optional("required_code_scanning", K::object::<RequiredCodeScanning>()),
                F::optional("update", K::Boolean),
                F::optional("update_allows_fetch_and_merge", K::Boolean),
            ],
        )
    }
}

/// A name or metadata pattern restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRule {
    pub operator: PatternOperator,

    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

impl Describe for PatternRule {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "PatternRule",
            vec![
                FieldDescriptor::required("operator", FieldKind::enumeration::<PatternOperator>()),
                FieldDescriptor::required("pattern", FieldKind::String),
                FieldDescriptor::optional("name", FieldKind::String),
                FieldDescriptor::optional("negate", FieldKind::Boolean),
            ],
        )
    }
}

/// Pull request requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PullRequestRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews_on_push: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_review: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,

    /// 0 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_review_thread_resolution: Option<bool>,
}

impl Describe for PullRequestRule {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "PullRequestRule",
            vec![
                F::optional("dismiss_stale_reviews_on_push", K::Boolean),
                F::optional("require_code_owner_review", K::Boolean),
                F::optional("require_last_push_approval", K::Boolean),
                F::optional("required_approving_review_count", K::bounded_integer(0, 10)),
                F::optional("required_review_thread_resolution", K::Boolean),
            ],
        )
    }
}

/// Environments a ref must be deployed to before it can be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredDeployments {
    pub required_deployment_environments: Vec<String>,
}

impl Describe for RequiredDeployments {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredDeployments",
            vec![FieldDescriptor::required(
                "required_deployment_environments",
                FieldKind::StringList { min_items: Some(1) },
            )],
        )
    }
}

/// Status checks that must pass before a ref can be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredStatusChecks {
    pub required_check: Vec<RequiredCheck>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_required_status_checks_policy: Option<bool>,
}

impl Describe for RequiredStatusChecks {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredStatusChecks",
            vec![
                FieldDescriptor::required(
                    "required_check",
                    FieldKind::object_list::<RequiredCheck>(Some(1)),
                ),
                FieldDescriptor::optional("strict_required_status_checks_policy", FieldKind::Boolean),
            ],
        )
    }
}

/// A single required status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredCheck {
    pub context: String,

    /// The GitHub App expected to report the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<u64>,
}

impl Describe for RequiredCheck {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredCheck",
            vec![
                FieldDescriptor::required("context", FieldKind::String),
                FieldDescriptor::optional(
                    "integration_id",
                    FieldKind::Integer {
                        min: Some(0),
                        max: None,
                    },
                ),
            ],
        )
    }
}

/// Code scanning results required before a ref can be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredCodeScanning {
    pub required_code_scanning_tool: Vec<RequiredCodeScanningTool>,
}

impl Describe for RequiredCodeScanning {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredCodeScanning",
            vec![FieldDescriptor::required(
                "required_code_scanning_tool",
                FieldKind::object_list::<RequiredCodeScanningTool>(Some(1)),
            )],
        )
    }
}

/// A code scanning tool and the alert levels that block an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredCodeScanningTool {
    pub alerts_threshold: AlertsThreshold,

    pub security_alerts_threshold: SecurityAlertsThreshold,

    pub tool: String,
}

impl Describe for RequiredCodeScanningTool {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RequiredCodeScanningTool",
            vec![
                FieldDescriptor::required(
                    "alerts_threshold",
                    FieldKind::enumeration::<AlertsThreshold>(),
                ),
                FieldDescriptor::required(
                    "security_alerts_threshold",
                    FieldKind::enumeration::<SecurityAlertsThreshold>(),
                ),
                FieldDescriptor::required("tool", FieldKind::String),
            ],
        )
    }
}

/// An actor allowed to bypass a ruleset.
///
/// `name` is a role (`maintain`, `write`, `admin`), `organization_admin`,
/// `deploy_key`, a team slug or `app:<id>` for GitHub Apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BypassActor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_mode: Option<BypassMode>,
}

impl Describe for BypassActor {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "BypassActor",
            vec![
                FieldDescriptor::required("name", FieldKind::String),
                FieldDescriptor::optional("bypass_mode", FieldKind::enumeration::<BypassMode>()),
            ],
        )
    }
}

/// Conditions selecting the refs a ruleset applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Conditions {
    pub ref_name: RefNameCondition,
}

impl Describe for Conditions {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "Conditions",
            vec![FieldDescriptor::required(
                "ref_name",
                FieldKind::object::<RefNameCondition>(),
            )],
        )
    }
}

/// Ref name globs to include and exclude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefNameCondition {
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Describe for RefNameCondition {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RefNameCondition",
            vec![
                FieldDescriptor::required("include", FieldKind::StringList { min_items: Some(1) }),
                FieldDescriptor::optional("exclude", FieldKind::strings()),
            ],
        )
    }
}
