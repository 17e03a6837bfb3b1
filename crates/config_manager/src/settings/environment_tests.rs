//! Tests for deployment environment settings.

use super::*;

#[test]
fn test_environment_yaml_shape() {
    let env = Environment {
        environment: "production".to_string(),
        wait_timer: Some(30),
        prevent_self_review: Some(true),
        reviewers: Some(EnvironmentReviewers {
            teams: vec!["platform-team".to_string()],
            users: vec![],
        }),
        deployment_policy: Some(DeploymentPolicy {
            policy_type: DeploymentPolicyType::SelectedBranchesAndTags,
            branch_patterns: vec!["release/*".to_string()],
            tag_patterns: vec!["v*".to_string()],
        }),
        ..Default::default()
    };

    let value = serde_json::to_value(&env).unwrap();

    assert_eq!(value["environment"], "production");
    assert_eq!(value["wait_timer"], 30);
    assert!(value.get("can_admins_bypass").is_none());
    assert!(value["reviewers"].get("users").is_none());
    assert_eq!(
        value["deployment_policy"]["policy_type"],
        "selected_branches_and_tags"
    );
}

#[test]
fn test_protected_branches_policy_has_no_patterns() {
    let policy: DeploymentPolicy =
        serde_yaml::from_str("policy_type: protected_branches\n").unwrap();

    assert_eq!(policy.policy_type, DeploymentPolicyType::ProtectedBranches);
    assert!(policy.branch_patterns.is_empty());
    assert!(policy.tag_patterns.is_empty());
}

#[test]
fn test_environment_requires_name() {
    let result = serde_yaml::from_str::<Environment>("wait_timer: 5\n");

    assert!(result.is_err());
}

#[test]
fn test_reviewers_is_empty() {
    assert!(EnvironmentReviewers::default().is_empty());
    assert!(!EnvironmentReviewers {
        teams: vec![],
        users: vec!["octocat".to_string()],
    }
    .is_empty());
}

#[test]
fn test_wait_timer_bounds_in_descriptor() {
    let descriptor = Environment::describe();
    let field = descriptor.field("wait_timer").unwrap();

    match field.kind {
        FieldKind::Integer { min, max } => {
            assert_eq!(min, Some(0));
            assert_eq!(max, Some(MAX_WAIT_TIMER_MINUTES));
        }
        ref other => panic!("unexpected kind {:?}", other),
    }
}
