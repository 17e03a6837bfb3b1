//! Tests for configuration error types.

use super::*;

#[test]
fn test_configuration_error_messages() {
    let err = ConfigurationError::FileNotFound {
        path: "import-config.yaml".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Configuration file not found: import-config.yaml"
    );

    let err = ConfigurationError::ParseError {
        reason: "invalid type".to_string(),
    };
    assert_eq!(err.to_string(), "Failed to parse configuration: invalid type");
}

#[test]
fn test_conflicting_selection_message_names_both_lists() {
    let err = ConfigurationError::ConflictingSelection {
        ignored: 2,
        selected: 1,
    };

    let message = err.to_string();
    assert!(message.contains("ignored_repos"));
    assert!(message.contains("selected_repos"));
}

#[test]
fn test_schema_build_error_messages() {
    let err = SchemaBuildError::UnknownField {
        type_name: "Pages".to_string(),
        field: "bogus".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Schema rule names unknown field 'bogus' on type 'Pages'"
    );

    let err = SchemaBuildError::UnknownType {
        type_name: "Missing".to_string(),
    };
    assert_eq!(err.to_string(), "Schema rule targets unknown type 'Missing'");
}
