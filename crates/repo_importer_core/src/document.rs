//! Rendering of repository configuration documents.

use crate::errors::{ImportError, ImportResult};
use config_manager::settings::Repository;

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Renders a repository as a YAML configuration document.
///
/// Fields that are not set are omitted entirely.
pub fn to_yaml(repository: &Repository) -> ImportResult<String> {
    serde_yaml::to_string(repository).map_err(|e| ImportError::Serialization {
        repository: repository.full_name(),
        reason: e.to_string(),
    })
}

/// Returns the file name of a repository's configuration document.
pub fn document_file_name(repository: &Repository) -> String {
    format!("{}.yaml", repository.name)
}
