//! # Repository Importer Core
//!
//! This crate turns the live configuration of GitHub repositories into
//! declarative configuration documents.
//!
//! ## Overview
//!
//! An import runs in three steps:
//! 1. Fetch the raw repository state through a [`RepositoryClient`], limited to
//!    the features enabled in the [`ImportConfig`]
//! 2. Map the raw payloads onto the declarative [`Repository`] model
//! 3. Render the model as a YAML document
//!
//! ## Main Functions
//!
//! - [`import_repository`] imports a single repository
//! - [`bulk_import`] imports every in-scope repository of an organization
//!   concurrently, delivering results in listing order
//! - [`map_repository`] is the pure conversion step, usable without a client
//! - [`to_yaml`] renders a document
//!
//! ## Examples
//!
//! ```no_run
//! use config_manager::ImportConfig;
//! use github_client::{create_token_client, GitHubClient};
//! use repo_importer_core::{import_repository, to_yaml};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("ghp_example", None)?);
//! let config = ImportConfig::from_yaml_str("rulesets: true\n")?;
//!
//! let repository = import_repository(&client, &config, "my-org", "my-repo").await?;
//! println!("{}", to_yaml(&repository)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A value that has no representation in the model raises a [`MappingError`]
//! and aborts the import of that repository only. Bulk runs collect these
//! failures in the [`BulkImportReport`] and continue with the other
//! repositories.

pub mod bulk;
pub mod convert;
pub mod document;
pub mod errors;
pub mod importer;

pub use bulk::{bulk_import, BulkImportOptions, BulkImportReport, DEFAULT_CONCURRENCY};
pub use config_manager::settings::Repository;
pub use config_manager::ImportConfig;
pub use convert::{map_repository, EnvironmentSnapshot, RepositorySnapshot};
pub use document::{document_file_name, to_yaml};
pub use errors::{ImportError, ImportResult, MappingError};
pub use github_client::RepositoryClient;
pub use importer::{fetch_snapshot, import_repository};

#[cfg(test)]
pub(crate) mod test_support;
