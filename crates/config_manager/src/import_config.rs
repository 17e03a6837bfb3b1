//! Import configuration document.
//!
//! The import configuration is a small YAML document that scopes a bulk import
//! and switches optional sub-resources on or off:
//!
//! ```yaml
//! is_public: true
//! ignored_repos:
//!   - sandbox
//! page_size: 50
//! rulesets: true
//! environments: true
//! ```
//!
//! Every top-level key that is not one of the known fields is read as a
//! feature toggle. A toggle that is absent is disabled.

use crate::errors::{ConfigurationError, ConfigurationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
#[path = "import_config_tests.rs"]
mod tests;

/// Page size used when the configuration does not set one.
///
/// This is the largest page size the GitHub API accepts.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Names of the feature toggles the importer understands.
///
/// The set is open: any other name can be stored in a configuration, it just
/// has no effect.
pub mod features {
    /// Import repository rulesets.
    pub const RULESETS: &str = "rulesets";

    /// Import pattern-based branch protection rules.
    pub const BRANCH_PROTECTIONS: &str = "branch_protections";

    /// Import deployment environments.
    pub const ENVIRONMENTS: &str = "environments";

    /// Import the GitHub Pages configuration.
    pub const PAGES: &str = "pages";
}

/// The import configuration.
///
/// Built once per run, validated, then shared read-only between import tasks.
///
/// # Examples
///
/// ```rust
/// use config_manager::{features, ImportConfig};
///
/// let config = ImportConfig::from_yaml_str("selected_repos: [api]\nrulesets: true\n").unwrap();
///
/// assert!(config.is_feature_enabled(features::RULESETS));
/// assert!(!config.is_feature_enabled(features::PAGES));
/// assert_eq!(config.page_size(), 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Listing hint: only public (`true`) or only private (`false`) repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    /// Repositories to leave out of a bulk import
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_repos: Vec<String>,

    /// Repositories to include in a bulk import; when set, nothing else is imported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_repos: Vec<String>,

    /// Number of repositories requested per listing page; clamped to `1..=100` when read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Feature toggles, keyed by feature name
    #[serde(flatten)]
    pub features: BTreeMap<String, bool>,
}

impl ImportConfig {
    /// Loads the import configuration from a YAML file.
    ///
    /// The page size default is applied once, here.
    ///
    /// # Errors
    ///
    /// * `ConfigurationError::FileNotFound` if the file does not exist
    /// * `ConfigurationError::FileAccessError` if the file cannot be read
    /// * `ConfigurationError::ParseError` if the file is not a valid configuration
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::FileAccessError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let config = Self::from_yaml_str(&text)?;
        info!(
            path = %path.display(),
            features = ?config.enabled_features(),
            "Loaded import configuration"
        );
        Ok(config)
    }

    /// Parses the import configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ParseError` if the text is not a valid
    /// configuration document.
    pub fn from_yaml_str(text: &str) -> ConfigurationResult<Self> {
        let mut config: ImportConfig = if text.trim().is_empty() {
            ImportConfig::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?
        };

        config.page_size.get_or_insert(u32::from(DEFAULT_PAGE_SIZE));
        Ok(config)
    }

    /// Checks the structural rules of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ConflictingSelection` when both
    /// `ignored_repos` and `selected_repos` are non-empty.
    pub fn validate(&self) -> ConfigurationResult<()> {
        if !self.ignored_repos.is_empty() && !self.selected_repos.is_empty() {
            return Err(ConfigurationError::ConflictingSelection {
                ignored: self.ignored_repos.len(),
                selected: self.selected_repos.len(),
            });
        }

        debug!("Import configuration is valid");
        Ok(())
    }

    /// Returns whether the named feature is switched on. Unknown names are off.
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Returns the listing page size, clamped to what the GitHub API accepts.
    pub fn page_size(&self) -> u8 {
        let max = u32::from(DEFAULT_PAGE_SIZE);
        let size = self.page_size.unwrap_or(max).clamp(1, max);
        u8::try_from(size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Returns the names of all enabled features, in name order.
    pub fn enabled_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
