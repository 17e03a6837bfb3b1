//! Tests for the bulk-import command.

use super::*;
use repo_importer_core::{ImportError, MappingError};

fn report() -> BulkImportReport {
    BulkImportReport {
        imported: vec!["my-org/api".to_string(), "my-org/web".to_string()],
        failures: vec![ImportError::Mapping(MappingError::new(
            "my-org/legacy",
            "visibility",
            "internal",
            "expected one of: public, private",
        ))],
        skipped: vec![],
        out_of_scope: 3,
    }
}

#[test]
fn test_summary_lists_failures() {
    colored::control::set_override(false);

    let summary = summarize(&report());

    assert!(summary.starts_with("2 imported, 1 failed, 0 skipped, 3 out of scope"));
    assert!(summary.contains("my-org/legacy"));
}

#[test]
fn test_outcome_fails_when_any_repository_failed() {
    assert!(matches!(
        outcome(&report()),
        Err(Error::BulkImport {
            failed: 1,
            skipped: 0
        })
    ));
}

#[test]
fn test_outcome_fails_when_interrupted() {
    let report = BulkImportReport {
        imported: vec!["my-org/api".to_string()],
        skipped: vec!["my-org/web".to_string()],
        ..Default::default()
    };

    let error = outcome(&report).unwrap_err();

    assert_eq!(error.exit_code(), 130);
}

#[test]
fn test_outcome_succeeds_for_complete_run() {
    let report = BulkImportReport {
        imported: vec!["my-org/api".to_string()],
        ..Default::default()
    };

    assert!(outcome(&report).is_ok());
}

#[test]
fn test_default_concurrency() {
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: BulkImportArgs,
    }

    let parsed = Wrapper::try_parse_from(["test", "my-org"]).unwrap();

    assert_eq!(parsed.args.org, "my-org");
    assert_eq!(parsed.args.concurrency, DEFAULT_CONCURRENCY);
    assert_eq!(parsed.args.config, PathBuf::from("import-config.yaml"));
}
