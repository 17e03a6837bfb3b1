//! Configuration management for the GitHub repository importer.
//!
//! This crate owns everything that describes *what* gets imported and *what
//! shape* the result has:
//!
//! - [`ImportConfig`]: the import configuration document and its validation,
//! - [`is_in_scope`]: the repository selection filter for bulk imports,
//! - [`settings`]: the declarative repository model rendered per repository,
//! - [`descriptor`] and [`schema`]: the type descriptors of that model and the
//!   JSON Schema derived from them.

pub mod descriptor;
pub mod errors;
pub mod import_config;
pub mod schema;
pub mod selection;
pub mod settings;

// Re-export for convenient access
pub use descriptor::{Describe, FieldDescriptor, FieldKind, SettingEnum, TypeDescriptor};
pub use errors::{ConfigurationError, ConfigurationResult, SchemaBuildError};
pub use import_config::{features, ImportConfig, DEFAULT_PAGE_SIZE};
pub use schema::{
    build_repository_schema, SchemaBuilder, SchemaDocument, SchemaRule, SchemaValidator,
    ValidationIssue, ValidationResult,
};
pub use selection::is_in_scope;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
