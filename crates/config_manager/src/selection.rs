//! Repository selection for bulk imports.

use crate::ImportConfig;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

/// Decides whether a repository takes part in a bulk import.
///
/// A non-empty `selected_repos` list wins: only listed names are in scope.
/// Otherwise a non-empty `ignored_repos` list excludes the listed names.
/// With neither list every repository is in scope. Names are compared exactly.
///
/// # Examples
///
/// ```rust
/// use config_manager::{is_in_scope, ImportConfig};
///
/// let config = ImportConfig {
///     ignored_repos: vec!["b".to_string()],
///     ..Default::default()
/// };
///
/// assert!(is_in_scope("a", &config));
/// assert!(!is_in_scope("b", &config));
/// ```
pub fn is_in_scope(repo_name: &str, config: &ImportConfig) -> bool {
    if !config.selected_repos.is_empty() {
        return config.selected_repos.iter().any(|name| name == repo_name);
    }

    if !config.ignored_repos.is_empty() {
        return !config.ignored_repos.iter().any(|name| name == repo_name);
    }

    true
}
