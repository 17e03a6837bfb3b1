//! Declarative repository model.
//!
//! These types make up a repository configuration document. They are built
//! fresh for each imported repository and rendered to YAML; hand-edited
//! documents deserialize back into them. Unknown fields are rejected at
//! every level, matching the closed schema.

pub mod branch_protection;
pub mod environment;
pub mod pages;
pub mod repository;
pub mod ruleset;

// Re-export all types for convenient access
pub use branch_protection::{
    BranchProtectionV4, RequiredPullRequestReviewsV4, RequiredStatusChecksV4,
};
pub use environment::{
    DeploymentPolicy, DeploymentPolicyType, Environment, EnvironmentReviewers,
    MAX_WAIT_TIMER_MINUTES,
};
pub use pages::{Pages, PagesBuildType};
pub use repository::{
    MergeCommitMessage, MergeCommitTitle, Repository, RepositoryTemplate,
    SquashMergeCommitMessage, SquashMergeCommitTitle, Visibility,
};
pub use ruleset::{
    AlertsThreshold, BypassActor, BypassMode, Conditions, PatternOperator, PatternRule,
    PullRequestRule, RefNameCondition, RequiredCheck, RequiredCodeScanning,
    RequiredCodeScanningTool, RequiredDeployments, RequiredStatusChecks, Rule, Ruleset,
    RulesetEnforcement, RulesetTarget, SecurityAlertsThreshold,
};
