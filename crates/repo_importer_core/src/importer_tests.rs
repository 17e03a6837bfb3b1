//! Tests for the feature-gated single repository import.

use super::*;
use crate::test_support::MockRepositoryClient;
use serde_json::json;

fn config(yaml: &str) -> ImportConfig {
    ImportConfig::from_yaml_str(yaml).unwrap()
}

fn client() -> MockRepositoryClient {
    let mut client = MockRepositoryClient::with_repositories(&["api"]);
    client.rulesets = vec![serde_json::from_value(json!({
        "id": 1,
        "name": "main",
        "target": "branch",
        "enforcement": "active",
        "rules": [{"type": "deletion"}]
    }))
    .unwrap()];
    client.environments = vec![
        serde_json::from_value(json!({
            "name": "production",
            "deployment_branch_policy": {"protected_branches": false, "custom_branch_policies": true}
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "name": "staging",
            "deployment_branch_policy": {"protected_branches": true, "custom_branch_policies": false}
        }))
        .unwrap(),
    ];
    client.branch_policies = vec![github_client::DeploymentBranchPolicyPattern {
        name: "v*".to_string(),
        ref_type: Some("tag".to_string()),
    }];
    client.pages = Some(github_client::Pages {
        cname: None,
        build_type: Some("workflow".to_string()),
        source: None,
    });
    client
}

#[tokio::test]
async fn test_disabled_features_make_no_calls() {
    let client = client();

    let repository = import_repository(&client, &config(""), "my-org", "api")
        .await
        .unwrap();

    assert_eq!(
        client.calls(),
        vec![
            "get_repository my-org/api",
            "list_collaborators my-org/api",
            "list_teams my-org/api",
            "get_vulnerability_alerts my-org/api",
        ]
    );
    assert_eq!(client.call_count("list_rulesets"), 0);
    assert!(repository.rulesets.is_empty());
    assert!(repository.environments.is_empty());
    assert!(repository.pages.is_none());
    assert_eq!(repository.vulnerability_alerts_enabled, Some(true));
}

#[tokio::test]
async fn test_explicitly_disabled_ruleset_feature() {
    let client = client();

    let repository = import_repository(
        &client,
        &config("rulesets: false\npages: true\n"),
        "my-org",
        "api",
    )
    .await
    .unwrap();

    assert_eq!(client.call_count("list_rulesets"), 0);
    assert!(repository.rulesets.is_empty());
    assert!(repository.pages.is_some());
}

#[tokio::test]
async fn test_enabled_rulesets_are_fetched_and_mapped() {
    let client = client();

    let repository = import_repository(&client, &config("rulesets: true\n"), "my-org", "api")
        .await
        .unwrap();

    assert_eq!(client.call_count("list_rulesets"), 1);
    assert_eq!(repository.rulesets.len(), 1);
    assert_eq!(repository.rulesets[0].rules.deletion, Some(true));
}

#[tokio::test]
async fn test_custom_policies_fetched_only_when_used() {
    let client = client();

    let repository = import_repository(&client, &config("environments: true\n"), "my-org", "api")
        .await
        .unwrap();

    assert_eq!(client.call_count("list_environments"), 1);
    assert_eq!(
        client
            .calls()
            .iter()
            .filter(|c| c.starts_with("list_deployment_branch_policies"))
            .collect::<Vec<_>>(),
        vec!["list_deployment_branch_policies my-org/api/production"]
    );
    assert_eq!(
        repository.environments[0]
            .deployment_policy
            .as_ref()
            .unwrap()
            .tag_patterns,
        vec!["v*"]
    );
}

#[tokio::test]
async fn test_pages_skipped_when_repository_has_no_site() {
    let mut client = client();
    if let Some(details) = client.details.get_mut("api") {
        details.has_pages = Some(false);
    }

    let repository = import_repository(&client, &config("pages: true\n"), "my-org", "api")
        .await
        .unwrap();

    assert_eq!(client.call_count("get_pages"), 0);
    assert!(repository.pages.is_none());
}

#[tokio::test]
async fn test_fetch_failure_names_resource() {
    let client = client();

    let error = import_repository(&client, &config(""), "my-org", "missing")
        .await
        .unwrap_err();

    match error {
        ImportError::Fetch {
            repository,
            resource,
            source,
        } => {
            assert_eq!(repository, "my-org/missing");
            assert_eq!(resource, "repository settings");
            assert!(matches!(source, github_client::Error::NotFound));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_mapping_failure_aborts_repository() {
    let mut client = client();
    if let Some(details) = client.details.get_mut("api") {
        details.visibility = Some("internal".to_string());
    }

    let error = import_repository(&client, &config(""), "my-org", "api")
        .await
        .unwrap_err();

    match error {
        ImportError::Mapping(e) => {
            assert_eq!(e.repository, "my-org/api");
            assert_eq!(e.field, "visibility");
        }
        other => panic!("unexpected error {:?}", other),
    }
}
