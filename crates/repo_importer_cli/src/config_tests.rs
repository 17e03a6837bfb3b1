use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_load_import_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&path, "selected_repos: [api]\nrulesets: true\n").unwrap();

    let config = load_import_config(&path).unwrap();

    assert_eq!(config.selected_repos, vec!["api"]);
    assert!(config.is_feature_enabled("rulesets"));
    assert_eq!(config.page_size(), 100);
}

#[test]
fn test_load_rejects_conflicting_selection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&path, "selected_repos: [api]\nignored_repos: [web]\n").unwrap();

    let result = load_import_config(&path);

    assert!(matches!(
        result,
        Err(Error::Config(
            config_manager::ConfigurationError::ConflictingSelection { .. }
        ))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();

    let result = load_import_config(&dir.path().join("missing.yaml"));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_settings_require_token() {
    let result = GitHubSettings::from_lookup(lookup(&[]));
    assert!(matches!(result, Err(Error::Auth(_))));

    let result = GitHubSettings::from_lookup(lookup(&[(TOKEN_ENV_VAR, "   ")]));
    assert!(matches!(result, Err(Error::Auth(_))));
}

#[test]
fn test_settings_from_lookup() {
    let settings = GitHubSettings::from_lookup(lookup(&[
        (TOKEN_ENV_VAR, "ghp_example\n"),
        (API_URL_ENV_VAR, "https://github.example.com/api/v3"),
    ]))
    .unwrap();

    assert_eq!(settings.token, "ghp_example");
    assert_eq!(
        settings.api_url.as_deref(),
        Some("https://github.example.com/api/v3")
    );
}

#[test]
fn test_settings_debug_redacts_token() {
    let settings = GitHubSettings {
        token: "ghp_secret".to_string(),
        api_url: None,
    };

    assert!(!format!("{:?}", settings).contains("ghp_secret"));
}

#[tokio::test]
async fn test_create_client_builds_against_default_and_custom_api() {
    let settings = GitHubSettings {
        token: "ghp_example".to_string(),
        api_url: None,
    };
    assert!(settings.create_client().is_ok());

    let settings = GitHubSettings {
        token: "ghp_example".to_string(),
        api_url: Some("https://github.example.com/api/v3".to_string()),
    };
    assert!(settings.create_client().is_ok());
}
