//! The `validate` command: checks repository documents against the schema.
//!
//! ```bash
//! github-repo-importer validate repos/api.yaml repos/web.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use config_manager::{build_repository_schema, SchemaValidator, ValidationIssue, ValidationResult};
use tracing::{instrument, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "validate_cmd_tests.rs"]
mod tests;

/// Arguments of the `validate` command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Repository documents to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Parses the YAML document at `path` and validates it.
///
/// A document that is not valid YAML is reported as a single issue at the
/// document root.
pub fn validate_file(validator: &SchemaValidator, path: &Path) -> Result<ValidationResult, Error> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_yaml::from_str::<serde_json::Value>(&contents) {
        Ok(document) => Ok(validator.validate(&document)),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.add_issue(ValidationIssue::new(
                String::new(),
                format!("not a valid YAML document: {}", e),
            ));
            Ok(result)
        }
    }
}

/// Execute the validate command
#[instrument]
pub async fn execute(args: &ValidateArgs) -> Result<(), Error> {
    let validator = build_repository_schema()?.compile()?;

    let mut invalid = 0;
    for path in &args.files {
        let result = validate_file(&validator, path)?;
        if result.is_valid() {
            println!("{} {}", "✓".green(), path.display());
            continue;
        }

        invalid += 1;
        warn!(path = ?path, issues = result.error_count(), "Document failed validation");
        println!("{} {}", "✗".red(), path.display().to_string().bold());
        for issue in result.issues() {
            println!("    {}", issue.to_string().dimmed());
        }
    }

    if invalid > 0 {
        return Err(Error::Validation {
            invalid,
            total: args.files.len(),
        });
    }
    Ok(())
}
