//! The `bulk-import` command: imports every in-scope repository of an organization.
//!
//! Repositories are imported concurrently and their documents are written in
//! listing order. Ctrl+C stops new repositories from starting; documents of
//! repositories already imported are kept.
//!
//! ```bash
//! github-repo-importer bulk-import my-org -c import-config.yaml -o repos --concurrency 8
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use github_client::RepositoryClient;
use repo_importer_core::{
    bulk_import, BulkImportOptions, BulkImportReport, ImportConfig, ImportError,
    DEFAULT_CONCURRENCY,
};
use tracing::{error, instrument, warn};

use crate::config::{load_import_config, GitHubSettings, DEFAULT_CONFIG_FILENAME, DEFAULT_OUTPUT_DIR};
use crate::errors::Error;
use crate::output::write_document;

#[cfg(test)]
#[path = "bulk_import_cmd_tests.rs"]
mod tests;

/// Arguments of the `bulk-import` command
#[derive(Args, Debug, Clone)]
pub struct BulkImportArgs {
    /// Organization whose repositories are imported
    pub org: String,

    /// Path to the import configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Directory the repository documents are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum number of repositories imported at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = clap::value_parser!(usize))]
    pub concurrency: usize,
}

/// Execute the bulk-import command
#[instrument]
pub async fn execute(args: &BulkImportArgs) -> Result<(), Error> {
    let config = Arc::new(load_import_config(&args.config)?);
    let client: Arc<dyn RepositoryClient> = Arc::new(GitHubSettings::from_env()?.create_client()?);

    let shutdown = Arc::new(AtomicBool::new(false));
    let signal_flag = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing repositories already started");
            signal_flag.store(true, Ordering::SeqCst);
        }
    });

    let report = run(client, config, args, shutdown).await?;
    println!("{}", summarize(&report));
    outcome(&report)
}

/// Runs the bulk import and writes each document as soon as its turn comes.
pub async fn run(
    client: Arc<dyn RepositoryClient>,
    config: Arc<ImportConfig>,
    args: &BulkImportArgs,
    shutdown: Arc<AtomicBool>,
) -> Result<BulkImportReport, Error> {
    let options = BulkImportOptions::new(args.concurrency).with_shutdown(shutdown);

    let mut write_failures = Vec::new();
    let mut report = bulk_import(client, config, &args.org, &options, |repository| {
        if let Err(e) = write_document(&args.output_dir, repository) {
            error!(repository = %repository.full_name(), error = %e, "Failed to write repository document");
            write_failures.push(repository.full_name());
        }
    })
    .await?;

    // A repository whose document could not be written was not imported.
    for full_name in write_failures {
        report.imported.retain(|name| name != &full_name);
        report.failures.push(ImportError::Serialization {
            repository: full_name,
            reason: "document could not be written".to_string(),
        });
    }
    Ok(report)
}

/// Renders a human-readable summary of a bulk import.
pub fn summarize(report: &BulkImportReport) -> String {
    let mut output = format!(
        "{} imported, {} failed, {} skipped, {} out of scope",
        report.imported.len().to_string().green(),
        report.failures.len().to_string().red(),
        report.skipped.len().to_string().yellow(),
        report.out_of_scope
    );
    for failure in &report.failures {
        output.push_str(&format!("\n  {} {}", "✗".red(), failure));
    }
    output
}

/// Maps a report onto the command result.
pub fn outcome(report: &BulkImportReport) -> Result<(), Error> {
    if report.is_success() && !report.is_interrupted() {
        Ok(())
    } else {
        Err(Error::BulkImport {
            failed: report.failures.len(),
            skipped: report.skipped.len(),
        })
    }
}
