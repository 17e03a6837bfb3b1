//! # Models
//!
//! Raw payloads returned by the GitHub REST API for repositories and the
//! resources attached to them (collaborators, teams, pages).
//!
//! These types mirror the wire format closely and keep every field the API
//! may omit as an `Option`. Interpreting the values (which ones are meaningful,
//! how enum-like strings map onto typed settings) is left to the importer.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub account (user or organization) as embedded in other payloads.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Account {
    /// The unique ID of the account
    #[serde(default)]
    pub id: u64,
    /// The login name of the account
    pub login: String,
}

/// A repository as returned by the organization listing endpoint.
///
/// Only the fields needed to decide whether a repository is in scope for a bulk
/// import are kept; the full settings are fetched separately per repository.
///
/// # Examples
///
/// ```rust
/// use github_client::models::{Account, RepositorySummary};
///
/// let summary = RepositorySummary {
///     name: "my-repo".to_string(),
///     owner: Account { id: 1, login: "my-org".to_string() },
///     private: false,
///     archived: false,
/// };
///
/// assert_eq!(summary.full_name(), "my-org/my-repo");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RepositorySummary {
    /// The name of the repository
    pub name: String,
    /// The owner of the repository
    pub owner: Account,
    /// Whether the repository is private
    #[serde(default)]
    pub private: bool,
    /// Whether the repository is archived
    #[serde(default)]
    pub archived: bool,
}

impl RepositorySummary {
    /// Returns the `owner/name` form of the repository identity.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// License information attached to a repository.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct License {
    /// License key, e.g. `mit` or `apache-2.0`
    pub key: String,
    /// SPDX identifier, when GitHub recognises the license
    pub spdx_id: Option<String>,
}

/// The template a repository was generated from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TemplateRepository {
    /// Name of the template repository
    pub name: String,
    /// Owner of the template repository
    pub owner: Account,
}

/// The full settings of a single repository, as returned by `GET /repos/{owner}/{repo}`.
///
/// Merge-policy fields (`allow_*`, `*_commit_title`, `*_commit_message`) are only
/// returned by GitHub when the caller has admin access to the repository, which
/// is why every one of them is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RepositoryDetails {
    pub id: u64,
    pub name: String,
    pub owner: Account,
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    /// `public`, `private` or `internal`
    pub visibility: Option<String>,
    pub homepage: Option<String>,
    pub default_branch: Option<String>,
    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_downloads: Option<bool>,
    pub has_discussions: Option<bool>,
    pub has_pages: Option<bool>,
    pub allow_merge_commit: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub allow_squash_merge: Option<bool>,
    pub allow_auto_merge: Option<bool>,
    pub allow_update_branch: Option<bool>,
    pub squash_merge_commit_title: Option<String>,
    pub squash_merge_commit_message: Option<String>,
    pub merge_commit_title: Option<String>,
    pub merge_commit_message: Option<String>,
    pub web_commit_signoff_required: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
    pub is_template: Option<bool>,
    pub archived: Option<bool>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub template_repository: Option<Box<TemplateRepository>>,
}

/// A direct collaborator on a repository.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Collaborator {
    /// Login of the collaborator
    pub login: String,
    /// Role name: `read`, `triage`, `write`, `maintain`, `admin` or a custom role
    pub role_name: Option<String>,
}

/// A team with access to a repository.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Team {
    /// Team ID
    pub id: u64,
    /// Team slug, e.g. `platform-team`
    pub slug: String,
    /// Permission: `pull`, `triage`, `push`, `maintain` or `admin`
    pub permission: String,
}

/// Source branch and folder of a Pages site.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PagesSource {
    pub branch: String,
    pub path: Option<String>,
}

/// The GitHub Pages site of a repository, as returned by `GET /repos/{owner}/{repo}/pages`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Pages {
    pub cname: Option<String>,
    /// `legacy` or `workflow`
    pub build_type: Option<String>,
    pub source: Option<PagesSource>,
}
