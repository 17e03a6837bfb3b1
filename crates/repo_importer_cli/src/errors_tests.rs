use super::*;

#[test]
fn test_error_messages() {
    let error = Error::Validation {
        invalid: 2,
        total: 3,
    };
    assert_eq!(error.to_string(), "2 of 3 document(s) failed validation");

    let error = Error::Output {
        path: PathBuf::from("out/api.yaml"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.to_string().contains("out/api.yaml"));
}

#[test]
fn test_configuration_error_converts() {
    let error: Error = ConfigurationError::ConflictingSelection {
        ignored: 1,
        selected: 2,
    }
    .into();

    assert!(matches!(error, Error::Config(_)));
}

#[test]
fn test_exit_codes() {
    assert_eq!(Error::Auth("missing token".to_string()).exit_code(), 1);
    assert_eq!(
        Error::BulkImport {
            failed: 1,
            skipped: 0
        }
        .exit_code(),
        1
    );
    assert_eq!(
        Error::BulkImport {
            failed: 0,
            skipped: 3
        }
        .exit_code(),
        130
    );
    assert_eq!(
        Error::InvalidArguments("repository".to_string()).exit_code(),
        2
    );
}
