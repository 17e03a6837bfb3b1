//! Tests for ruleset settings.

use super::*;

fn sample_ruleset() -> Ruleset {
    Ruleset {
        id: 42,
        enforcement: RulesetEnforcement::Active,
        name: "main-protection".to_string(),
        rules: Rule {
            deletion: Some(true),
            pull_request: Some(PullRequestRule {
                required_approving_review_count: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        },
        target: RulesetTarget::Branch,
        bypass_actors: vec![BypassActor {
            name: "maintain".to_string(),
            bypass_mode: Some(BypassMode::PullRequest),
        }],
        conditions: Some(Conditions {
            ref_name: RefNameCondition {
                include: vec!["~DEFAULT_BRANCH".to_string()],
                exclude: vec![],
            },
        }),
    }
}

#[test]
fn test_ruleset_id_is_not_serialized() {
    let yaml = serde_yaml::to_string(&sample_ruleset()).unwrap();

    assert!(!yaml.contains("id:"));
    assert!(!yaml.contains("42"));
}

#[test]
fn test_ruleset_yaml_shape() {
    let value = serde_json::to_value(sample_ruleset()).unwrap();

    assert_eq!(value["enforcement"], "active");
    assert_eq!(value["target"], "branch");
    assert_eq!(value["rules"]["deletion"], true);
    assert_eq!(
        value["rules"]["pull_request"]["required_approving_review_count"],
        2
    );
    assert_eq!(value["bypass_actors"][0]["bypass_mode"], "pull_request");
    assert!(value["conditions"]["ref_name"].get("exclude").is_none());
    assert!(value["rules"].get("creation").is_none());
}

#[test]
fn test_ruleset_round_trip() {
    let original = sample_ruleset();
    let yaml = serde_yaml::to_string(&original).unwrap();

    let parsed: Ruleset = serde_yaml::from_str(&yaml).unwrap();

    // The ID is not part of the document.
    assert_eq!(parsed, Ruleset { id: 0, ..original });
}

#[test]
fn test_unknown_rule_is_rejected() {
    let yaml = r#"
enforcement: active
name: x
target: branch
rules:
  merge_queue: true
"#;

    assert!(serde_yaml::from_str::<Ruleset>(yaml).is_err());
}

#[test]
fn test_pattern_operator_values() {
    let rule: PatternRule =
        serde_yaml::from_str("operator: starts_with\npattern: release/\n").unwrap();

    assert_eq!(rule.operator, PatternOperator::StartsWith);
    assert!(serde_yaml::from_str::<PatternRule>("operator: glob\npattern: x\n").is_err());
}

#[test]
fn test_code_scanning_thresholds() {
    let tool: RequiredCodeScanningTool = serde_yaml::from_str(
        "tool: CodeQL\nalerts_threshold: errors_and_warnings\nsecurity_alerts_threshold: high_or_higher\n",
    )
    .unwrap();

    assert_eq!(tool.alerts_threshold, AlertsThreshold::ErrorsAndWarnings);
    assert_eq!(
        tool.security_alerts_threshold,
        SecurityAlertsThreshold::HighOrHigher
    );
}

#[test]
fn test_rule_descriptor_covers_every_sub_rule() {
    let descriptor = Rule::describe();

    assert_eq!(descriptor.fields.len(), 16);
    assert!(descriptor.required_fields().is_empty());
    assert!(descriptor.field("branch_name_pattern").is_some());
    assert!(descriptor.field("tag_name_pattern").is_some());
}
