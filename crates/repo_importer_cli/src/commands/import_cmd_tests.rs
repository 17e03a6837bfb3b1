//! Tests for the import command.

use super::*;

#[test]
fn test_parse_repository_name() {
    assert_eq!(parse_repository_name("my-org/api").unwrap(), ("my-org", "api"));
}

#[test]
fn test_parse_repository_name_rejects_malformed_values() {
    for value in ["api", "/api", "my-org/", "my-org/api/extra", ""] {
        assert!(
            matches!(parse_repository_name(value), Err(Error::InvalidArguments(_))),
            "accepted '{}'",
            value
        );
    }
}
