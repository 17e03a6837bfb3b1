//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate}; // For constructing mock bodies

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = create_token_client("test-token", Some(&mock_server.uri()))
        .expect("Failed to build test client");
    GitHubClient::new(octocrab)
}

fn repo_json(name: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": name,
        "owner": {"id": 7, "login": "test-org"},
        "private": false,
        "archived": false
    })
}

fn not_found_json() -> serde_json::Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}

#[tokio::test]
async fn test_list_repositories_pages_until_short_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/test-org/repos"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .and(query_param("type", "public"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([repo_json("alpha"), repo_json("beta")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/test-org/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json("gamma")])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let options = ListRepositoriesOptions {
        page_size: 2,
        is_public: Some(true),
    };

    let repos = client
        .list_repositories("test-org", &options)
        .await
        .expect("listing should succeed");

    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    assert_eq!(repos[0].full_name(), "test-org/alpha");
}

#[tokio::test]
async fn test_get_repository_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_repository("test-org", "missing").await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/busy"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for user ID 1.",
            "documentation_url": "https://docs.github.com/rest/rate-limit"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_repository("test-org", "busy").await;

    assert!(matches!(result, Err(Error::RateLimitExceeded)));
}

#[tokio::test]
async fn test_get_pages_returns_none_when_not_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/pages"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let pages = client.get_pages("test-org", "test-repo").await.unwrap();

    assert!(pages.is_none());
}

#[tokio::test]
async fn test_get_pages_returns_configuration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://api.github.com/repos/test-org/test-repo/pages",
            "status": "built",
            "cname": "docs.example.com",
            "build_type": "legacy",
            "source": {"branch": "gh-pages", "path": "/"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let pages = client
        .get_pages("test-org", "test-repo")
        .await
        .unwrap()
        .expect("pages should be present");

    assert_eq!(pages.build_type.as_deref(), Some("legacy"));
    assert_eq!(pages.source.unwrap().branch, "gh-pages");
}

#[tokio::test]
async fn test_vulnerability_alerts_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/enabled/vulnerability-alerts"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/disabled/vulnerability-alerts"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    assert!(client
        .get_vulnerability_alerts("test-org", "enabled")
        .await
        .unwrap());
    assert!(!client
        .get_vulnerability_alerts("test-org", "disabled")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_list_rulesets_fetches_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/rulesets"))
        .and(query_param("includes_parents", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "name": "main", "target": "branch", "enforcement": "active"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/rulesets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "main",
            "target": "branch",
            "enforcement": "active",
            "conditions": {"ref_name": {"include": ["~DEFAULT_BRANCH"], "exclude": []}},
            "rules": [{"type": "deletion"}, {"type": "non_fast_forward"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let rulesets = client.list_rulesets("test-org", "test-repo").await.unwrap();

    assert_eq!(rulesets.len(), 1);
    assert_eq!(rulesets[0].rules.len(), 2);
    assert_eq!(rulesets[0].rules[1].rule_type, "non_fast_forward");
}

#[tokio::test]
async fn test_list_branch_protections_follows_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(wiremock::matchers::body_partial_json(json!({
            "variables": {"cursor": null}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "branchProtectionRules": {
                        "pageInfo": {"hasNextPage": true, "endCursor": "abc"},
                        "nodes": [{"pattern": "main", "isAdminEnforced": true}]
                    }
                }
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(wiremock::matchers::body_partial_json(json!({
            "variables": {"cursor": "abc"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "branchProtectionRules": {
                        "pageInfo": {"hasNextPage": false, "endCursor": null},
                        "nodes": [{"pattern": "release/*"}]
                    }
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let rules = client
        .list_branch_protections("test-org", "test-repo")
        .await
        .unwrap();

    let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["main", "release/*"]);
    assert_eq!(rules[0].is_admin_enforced, Some(true));
}

#[tokio::test]
async fn test_list_branch_protections_reports_graphql_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Could not resolve to a Repository with the name 'test-org/gone'."}]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.list_branch_protections("test-org", "gone").await;

    match result {
        Err(Error::GraphQl(message)) => assert!(message.contains("Could not resolve")),
        other => panic!("expected a GraphQL error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_environments_and_policies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "environments": [{
                "name": "production",
                "deployment_branch_policy": {"protected_branches": false, "custom_branch_policies": true}
            }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/test-org/test-repo/environments/production/deployment-branch-policies",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "branch_policies": [
                {"id": 1, "name": "main", "type": "branch"},
                {"id": 2, "name": "v*", "type": "tag"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let environments = client
        .list_environments("test-org", "test-repo")
        .await
        .unwrap();
    assert_eq!(environments.len(), 1);

    let policies = client
        .list_deployment_branch_policies("test-org", "test-repo", "production")
        .await
        .unwrap();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[1].ref_type.as_deref(), Some("tag"));
}

#[test]
fn test_encode_path_segment() {
    assert_eq!(encode_path_segment("production").unwrap(), "production");
    assert_eq!(encode_path_segment("my env").unwrap(), "my%20env");
    assert_eq!(encode_path_segment("a/b").unwrap(), "a%2Fb");
}

#[test]
fn test_create_token_client_rejects_empty_token() {
    let result = create_token_client("  ", None);

    assert!(matches!(result, Err(Error::AuthError(_))));
}

#[test]
fn test_list_repositories_options_default() {
    let options = ListRepositoriesOptions::default();

    assert_eq!(options.page_size, MAX_PAGE_SIZE);
    assert_eq!(options.repository_type(), "all");
    assert_eq!(
        ListRepositoriesOptions {
            page_size: 10,
            is_public: Some(false)
        }
        .repository_type(),
        "private"
    );
}
