//! Configuration for the importer CLI.
//!
//! The import configuration is a YAML file (`import-config.yaml` by default).
//! GitHub credentials never live in that file: the token is read from
//! `GITHUB_TOKEN` and an optional API base URL from `GITHUB_API_URL`.

use std::path::Path;

use config_manager::ImportConfig;
use github_client::{create_token_client, GitHubClient};
use tracing::{debug, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default import configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "import-config.yaml";

/// Default directory the repository documents are written to
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default location of the generated schema
pub const DEFAULT_SCHEMA_PATH: &str = ".schemas/repository-config.schema.json";

/// Environment variable holding the GitHub token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Environment variable holding an alternative GitHub API base URL
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "GITHUB_REPO_IMPORTER_LOG";

/// Loads and validates the import configuration at `path`.
///
/// # Errors
///
/// Returns `Error::Config` if the file cannot be read or parsed, or if it
/// selects and ignores repositories at the same time.
pub fn load_import_config(path: &Path) -> Result<ImportConfig, Error> {
    debug!(message = "Loading import configuration", path = ?path);
    let config = ImportConfig::load(path)?;
    config.validate()?;

    info!(
        message = "Loaded import configuration",
        path = ?path,
        features = ?config.enabled_features(),
        page_size = config.page_size()
    );
    Ok(config)
}

/// Credentials and endpoint of the GitHub API.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    pub token: String,
    pub api_url: Option<String>,
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl GitHubSettings {
    /// Reads the settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let token = lookup(TOKEN_ENV_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Auth(format!("{} is not set", TOKEN_ENV_VAR)))?;
        let api_url = lookup(API_URL_ENV_VAR).filter(|u| !u.trim().is_empty());

        Ok(Self { token, api_url })
    }

    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a GitHub client from these settings.
    pub fn create_client(&self) -> Result<GitHubClient, Error> {
        let client = create_token_client(&self.token, self.api_url.as_deref())
            .map_err(|e| Error::Auth(e.to_string()))?;
        Ok(GitHubClient::new(client))
    }
}
