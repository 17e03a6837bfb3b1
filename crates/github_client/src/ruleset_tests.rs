//! Tests for repository ruleset payload types.

use super::*;
use serde_json::{from_str, from_value, json};

// ============================================================================
// RepositoryRuleset Tests
// ============================================================================

/// Test the shape returned by the LIST rulesets endpoint (no rules).
#[test]
fn test_ruleset_list_entry_deserialization() {
    let json = r#"{
        "id": 123,
        "name": "main-protection",
        "target": "branch",
        "source_type": "Repository",
        "source": "my-org/my-repo",
        "enforcement": "active",
        "node_id": "RRS_lACqUmVwb3NpdG9yec4",
        "_links": {"self": {"href": "https://api.github.com/repos/my-org/my-repo/rulesets/123"}}
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert_eq!(ruleset.id, 123);
    assert_eq!(ruleset.name, "main-protection");
    assert_eq!(ruleset.target.as_deref(), Some("branch"));
    assert_eq!(ruleset.enforcement, "active");
    assert_eq!(ruleset.source_type.as_deref(), Some("Repository"));
    assert!(ruleset.bypass_actors.is_empty());
    assert!(ruleset.rules.is_empty());
}

/// Test the shape returned by the GET ruleset endpoint.
#[test]
fn test_ruleset_detail_deserialization() {
    let ruleset: RepositoryRuleset = from_value(json!({
        "id": 456,
        "name": "release-protection",
        "target": "branch",
        "enforcement": "evaluate",
        "bypass_actors": [
            {"actor_id": 5, "actor_type": "RepositoryRole", "bypass_mode": "always"},
            {"actor_id": null, "actor_type": "OrganizationAdmin", "bypass_mode": "pull_request"}
        ],
        "conditions": {
            "ref_name": {
                "include": ["refs/heads/release/*", "~DEFAULT_BRANCH"],
                "exclude": ["refs/heads/release/temp*"]
            }
        },
        "rules": [
            {"type": "deletion"},
            {"type": "pull_request", "parameters": {"required_approving_review_count": 2}}
        ]
    }))
    .expect("Failed to deserialize");

    assert_eq!(ruleset.bypass_actors.len(), 2);
    assert_eq!(ruleset.bypass_actors[0].actor_id, Some(5));
    assert_eq!(ruleset.bypass_actors[1].actor_id, None);

    let ref_name = ruleset.conditions.unwrap().ref_name.unwrap();
    assert_eq!(ref_name.include.len(), 2);
    assert_eq!(ref_name.exclude, vec!["refs/heads/release/temp*".to_string()]);

    assert_eq!(ruleset.rules[0].rule_type, "deletion");
    assert!(ruleset.rules[0].parameters.is_none());
    assert_eq!(ruleset.rules[1].rule_type, "pull_request");
}

// ============================================================================
// Rule parameter Tests
// ============================================================================

#[test]
fn test_pull_request_parameters_decode() {
    let params: PullRequestParameters = from_value(json!({
        "dismiss_stale_reviews_on_push": true,
        "require_code_owner_review": false,
        "require_last_push_approval": false,
        "required_approving_review_count": 1,
        "required_review_thread_resolution": true,
        "allowed_merge_methods": ["squash"]
    }))
    .unwrap();

    assert_eq!(params.dismiss_stale_reviews_on_push, Some(true));
    assert_eq!(params.required_approving_review_count, Some(1));
}

#[test]
fn test_status_check_parameters_decode() {
    let params: RequiredStatusChecksParameters = from_value(json!({
        "strict_required_status_checks_policy": true,
        "required_status_checks": [
            {"context": "ci/build", "integration_id": 15368},
            {"context": "ci/lint"}
        ]
    }))
    .unwrap();

    assert_eq!(params.required_status_checks.len(), 2);
    assert_eq!(params.required_status_checks[0].integration_id, Some(15368));
    assert_eq!(params.required_status_checks[1].integration_id, None);
}

#[test]
fn test_pattern_parameters_require_operator() {
    let result = from_value::<PatternParameters>(json!({"pattern": "release/"}));

    assert!(result.is_err());
}

#[test]
fn test_code_scanning_parameters_decode() {
    let params: CodeScanningParameters = from_value(json!({
        "code_scanning_tools": [
            {"tool": "CodeQL", "alerts_threshold": "errors", "security_alerts_threshold": "high_or_higher"}
        ]
    }))
    .unwrap();

    assert_eq!(params.code_scanning_tools[0].tool, "CodeQL");
}
