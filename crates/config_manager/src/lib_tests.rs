//! Crate-level tests combining configuration loading, selection and the schema.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_loaded_config_drives_selection() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"ignored_repos:\n  - sandbox\nenvironments: true\n")
        .unwrap();

    let config = ImportConfig::load(file.path()).unwrap();
    config.validate().unwrap();

    assert!(is_in_scope("api", &config));
    assert!(!is_in_scope("sandbox", &config));
    assert!(config.is_feature_enabled(features::ENVIRONMENTS));
    assert_eq!(config.enabled_features(), vec![features::ENVIRONMENTS]);
}

#[test]
fn test_serialized_repository_validates_against_schema() {
    let repository = settings::Repository {
        name: "api".to_string(),
        owner: "my-org".to_string(),
        visibility: settings::Visibility::Public,
        default_branch: "main".to_string(),
        description: Some("Public API".to_string()),
        ..Default::default()
    };

    let document = serde_json::to_value(&repository).unwrap();
    let result = build_repository_schema()
        .unwrap()
        .validate(&document)
        .unwrap();

    assert!(result.is_valid(), "{:?}", result.issues());
}
