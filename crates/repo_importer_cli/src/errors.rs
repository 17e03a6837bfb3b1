use std::io;
use std::path::PathBuf;

use config_manager::{ConfigurationError, SchemaBuildError};
use repo_importer_core::ImportError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the importer CLI.
///
/// Each variant maps to a failed command; `main` logs it and exits with a
/// non-zero status.
#[derive(Error, Debug)]
pub enum Error {
    /// The GitHub token is missing or the client could not be built.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The import configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// Importing a repository failed.
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// A bulk import finished, but not every repository was imported.
    #[error("Bulk import incomplete: {failed} failed, {skipped} skipped")]
    BulkImport { failed: usize, skipped: usize },

    /// The schema could not be generated.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaBuildError),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading or writing a file failed.
    #[error("Failed to access '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more documents violate the schema.
    #[error("{invalid} of {total} document(s) failed validation")]
    Validation { invalid: usize, total: usize },
}

impl Error {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Interrupted before every repository was started.
            Error::BulkImport { failed: 0, .. } => 130,
            Error::InvalidArguments(_) => 2,
            _ => 1,
        }
    }
}
