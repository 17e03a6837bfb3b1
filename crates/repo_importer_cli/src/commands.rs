//! Command modules for the importer CLI.
//!
//! - `import_cmd`: import a single repository
//! - `bulk_import_cmd`: import every in-scope repository of an organization
//! - `schema_cmd`: generate the repository configuration schema
//! - `validate_cmd`: validate hand-edited documents against the schema

pub mod bulk_import_cmd;
pub mod import_cmd;
pub mod schema_cmd;
pub mod validate_cmd;
