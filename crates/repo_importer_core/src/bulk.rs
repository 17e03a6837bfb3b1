//! Concurrent import of every in-scope repository of an organization.
//!
//! One tokio task is spawned per repository, bounded by a semaphore. Task
//! handles are awaited in listing order, so results are delivered in the order
//! GitHub listed the repositories no matter which task finishes first.

use crate::errors::{ImportError, ImportResult};
use crate::importer::import_repository;
use config_manager::settings::Repository;
use config_manager::{is_in_scope, ImportConfig};
use github_client::{ListRepositoriesOptions, RepositoryClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};

#[cfg(test)]
#[path = "bulk_tests.rs"]
mod tests;

/// Number of repositories imported at the same time unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Options for a bulk import run.
#[derive(Debug, Clone)]
pub struct BulkImportOptions {
    /// Maximum number of repositories imported at the same time
    pub concurrency: usize,

    /// Once raised, repositories that have not started yet are skipped
    pub shutdown: Arc<AtomicBool>,
}

impl Default for BulkImportOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl BulkImportOptions {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            ..Self::default()
        }
    }

    /// Shares an externally owned shutdown flag, e.g. one raised by a Ctrl+C handler.
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }
}

/// Outcome of a bulk import run.
#[derive(Debug, Default)]
pub struct BulkImportReport {
    /// Full names of the imported repositories, in listing order
    pub imported: Vec<String>,

    /// Repositories whose import failed, in listing order
    pub failures: Vec<ImportError>,

    /// Full names of the repositories not started because of a shutdown
    pub skipped: Vec<String>,

    /// Number of listed repositories excluded by the selection lists
    pub out_of_scope: usize,
}

impl BulkImportReport {
    /// Returns true if every started repository was imported.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if the run was cut short by a shutdown.
    pub fn is_interrupted(&self) -> bool {
        !self.skipped.is_empty()
    }
}

enum Outcome {
    Finished(ImportResult<Repository>),
    Skipped,
}

/// Imports every in-scope repository of `org`.
///
/// `on_imported` is called for each successfully imported repository, in
/// listing order, as soon as all repositories listed before it have been
/// handled. A failure in one repository does not stop the others.
///
/// # Errors
///
/// Returns `ImportError::Fetch` only if the repositories of `org` cannot be
/// listed; per-repository failures are collected in the report.
#[instrument(skip(client, config, options, on_imported), fields(org = %org))]
pub async fn bulk_import<F>(
    client: Arc<dyn RepositoryClient>,
    config: Arc<ImportConfig>,
    org: &str,
    options: &BulkImportOptions,
    mut on_imported: F,
) -> ImportResult<BulkImportReport>
where
    F: FnMut(&Repository),
{
    let listing = ListRepositoriesOptions {
        page_size: config.page_size(),
        is_public: config.is_public,
    };
    let repositories = client
        .list_repositories(org, &listing)
        .await
        .map_err(|source| ImportError::Fetch {
            repository: org.to_string(),
            resource: "repositories",
            source,
        })?;

    let listed = repositories.len();
    let in_scope: Vec<_> = repositories
        .into_iter()
        .filter(|r| is_in_scope(&r.name, &config))
        .collect();

    let mut report = BulkImportReport {
        out_of_scope: listed - in_scope.len(),
        ..Default::default()
    };
    info!(
        listed,
        in_scope = in_scope.len(),
        concurrency = options.concurrency,
        "Importing repositories"
    );

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut handles = Vec::with_capacity(in_scope.len());
    for summary in in_scope {
        let client = Arc::clone(&client);
        let config = Arc::clone(&config);
        let semaphore = Arc::clone(&semaphore);
        let shutdown = Arc::clone(&options.shutdown);
        let full_name = summary.full_name();

        let handle = tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return Outcome::Skipped;
            };
            if shutdown.load(Ordering::SeqCst) {
                return Outcome::Skipped;
            }
            Outcome::Finished(
                import_repository(
                    client.as_ref(),
                    &config,
                    &summary.owner.login,
                    &summary.name,
                )
                .await,
            )
        });
        handles.push((full_name, handle));
    }

    for (full_name, handle) in handles {
        match handle.await {
            Ok(Outcome::Finished(Ok(repository))) => {
                on_imported(&repository);
                report.imported.push(full_name);
            }
            Ok(Outcome::Finished(Err(e))) => {
                warn!(repository = %full_name, error = %e, "Repository import failed");
                report.failures.push(e);
            }
            Ok(Outcome::Skipped) => report.skipped.push(full_name),
            Err(e) => {
                error!(repository = %full_name, error = %e, "Repository import task failed");
                report.failures.push(ImportError::Task {
                    repository: full_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        imported = report.imported.len(),
        failed = report.failures.len(),
        skipped = report.skipped.len(),
        "Bulk import finished"
    );
    Ok(report)
}
