//! Configuration system error types.
//!
//! Domain-specific errors for loading and validating the import configuration
//! and for building the repository configuration schema.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Import configuration errors.
///
/// These errors occur when loading, parsing, or validating the import
/// configuration document. They are raised before any repository is fetched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },

    #[error("Only one of ignored_repos or selected_repos may be provided (ignored: {ignored}, selected: {selected})")]
    ConflictingSelection { ignored: usize, selected: usize },
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Errors raised while building the constraint schema.
///
/// These indicate a defect in the type descriptors or in the schema rules,
/// never a problem with user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaBuildError {
    /// A schema rule targets a type that does not appear in the schema.
    #[error("Schema rule targets unknown type '{type_name}'")]
    UnknownType { type_name: String },

    /// A schema rule names a field the target type does not declare.
    #[error("Schema rule names unknown field '{field}' on type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// The schema document could not be compiled into a validator.
    #[error("Schema compilation failed: {message}")]
    Compilation { message: String },

    /// The schema or an instance could not be converted to JSON.
    #[error("JSON serialization failed: {message}")]
    Serialization { message: String },
}
