//! Error types for repository imports.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// A value reported by GitHub that has no representation in the declarative model.
///
/// Raised for unknown enum values, unsupported collaborator roles, malformed
/// rule parameters and contradictory deployment policies. Aborts the import of
/// the affected repository only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot map field '{field}' of repository '{repository}' (value '{value}'): {reason}")]
pub struct MappingError {
    /// Full name (`owner/name`) of the repository being mapped
    pub repository: String,

    /// Path of the offending field in the declarative model
    pub field: String,

    /// The raw value reported by GitHub
    pub value: String,

    pub reason: String,
}

impl MappingError {
    pub fn new(
        repository: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort the import of a repository (or, for listing failures,
/// of a whole organization).
#[derive(Error, Debug)]
pub enum ImportError {
    /// A GitHub API call failed.
    #[error("Failed to fetch {resource} for '{repository}': {source}")]
    Fetch {
        repository: String,
        resource: &'static str,
        #[source]
        source: github_client::Error,
    },

    /// The fetched state could not be mapped onto the declarative model.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The declarative model could not be rendered.
    #[error("Failed to render repository '{repository}': {reason}")]
    Serialization { repository: String, reason: String },

    /// The import task ended without producing a result.
    #[error("Import task for '{repository}' did not complete: {reason}")]
    Task { repository: String, reason: String },
}

impl ImportError {
    /// Returns the repository (or organization, for listing failures) the error relates to.
    pub fn repository(&self) -> &str {
        match self {
            ImportError::Fetch { repository, .. } => repository,
            ImportError::Mapping(e) => &e.repository,
            ImportError::Serialization { repository, .. } => repository,
            ImportError::Task { repository, .. } => repository,
        }
    }
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
