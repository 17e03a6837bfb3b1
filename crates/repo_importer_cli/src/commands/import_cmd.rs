//! The `import` command: imports a single repository.
//!
//! ```bash
//! github-repo-importer import my-org/api -c import-config.yaml -o repos
//! ```

use std::path::PathBuf;

use clap::Args;
use github_client::RepositoryClient;
use repo_importer_core::{import_repository, ImportConfig};
use tracing::instrument;

use crate::config::{load_import_config, GitHubSettings, DEFAULT_CONFIG_FILENAME, DEFAULT_OUTPUT_DIR};
use crate::errors::Error;
use crate::output::write_document;

#[cfg(test)]
#[path = "import_cmd_tests.rs"]
mod tests;

/// Arguments of the `import` command
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Repository to import, as `owner/name`
    pub repository: String,

    /// Path to the import configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Directory the repository document is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Splits an `owner/name` argument.
pub fn parse_repository_name(value: &str) -> Result<(&str, &str), Error> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(Error::InvalidArguments(format!(
            "expected a repository as 'owner/name', got '{}'",
            value
        ))),
    }
}

/// Execute the import command
#[instrument]
pub async fn execute(args: &ImportArgs) -> Result<(), Error> {
    let (owner, name) = parse_repository_name(&args.repository)?;
    let config = load_import_config(&args.config)?;
    let client = GitHubSettings::from_env()?.create_client()?;

    let path = run(&client, &config, owner, name, args).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Imports `owner/name` with `client` and writes the document.
pub async fn run(
    client: &dyn RepositoryClient,
    config: &ImportConfig,
    owner: &str,
    name: &str,
    args: &ImportArgs,
) -> Result<PathBuf, Error> {
    let repository = import_repository(client, config, owner, name).await?;
    write_document(&args.output_dir, &repository)
}
