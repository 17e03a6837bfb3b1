//! Declarative repository settings.
//!
//! The root of a repository configuration document. Every optional setting is
//! an `Option` so that "not set" and an explicit `false` stay distinguishable
//! in the rendered YAML.

use crate::descriptor::{setting_enum, Describe, FieldDescriptor, FieldKind, TypeDescriptor};
use crate::settings::{BranchProtectionV4, Environment, Pages, Ruleset};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

setting_enum! {
    /// Repository visibility.
    Visibility {
        Public => "public",
        Private => "private",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

setting_enum! {
    /// Default title of squash merge commits.
    SquashMergeCommitTitle {
        PrTitle => "PR_TITLE",
        CommitOrPrTitle => "COMMIT_OR_PR_TITLE",
    }
}

setting_enum! {
    /// Default message of squash merge commits.
    SquashMergeCommitMessage {
        PrBody => "PR_BODY",
        CommitMessages => "COMMIT_MESSAGES",
        Blank => "BLANK",
    }
}

setting_enum! {
    /// Default title of merge commits.
    MergeCommitTitle {
        PrTitle => "PR_TITLE",
        MergeMessage => "MERGE_MESSAGE",
    }
}

setting_enum! {
    /// Default message of merge commits.
    MergeCommitMessage {
        PrBody => "PR_BODY",
        PrTitle => "PR_TITLE",
        Blank => "BLANK",
    }
}

/// The declarative configuration of a single repository.
///
/// # Examples
///
/// ```rust
/// use config_manager::settings::{Repository, Visibility};
///
/// let repo = Repository {
///     name: "api".to_string(),
///     owner: "my-org".to_string(),
///     visibility: Visibility::Public,
///     default_branch: "main".to_string(),
///     has_issues: Some(true),
///     ..Default::default()
/// };
///
/// let yaml = serde_yaml::to_string(&repo).unwrap();
/// assert!(yaml.contains("has_issues: true"));
/// assert!(!yaml.contains("has_wiki"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repository {
    /// Repository name; identifies the document, never rendered
    #[serde(skip)]
    pub name: String,

    /// Repository owner; identifies the document, never rendered
    #[serde(skip)]
    pub owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub visibility: Visibility,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,

    pub default_branch: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_update_branch: Option<bool>,

    /// Only meaningful when squash merging is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_title: Option<SquashMergeCommitTitle>,

    /// Only meaningful when squash merging is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_message: Option<SquashMergeCommitMessage>,

    /// Only meaningful when merge commits are allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit_title: Option<MergeCommitTitle>,

    /// Only meaningful when merge commits are allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit_message: Option<MergeCommitMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_commit_signoff_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pull_collaborators: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triage_collaborators: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub push_collaborators: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintain_collaborators: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_collaborators: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pull_teams: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triage_teams: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub push_teams: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintain_teams: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_teams: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<RepositoryTemplate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Pages>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rulesets: Vec<Ruleset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_alerts_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_protections_v4: Vec<BranchProtectionV4>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Environment>,
}

impl Repository {
    /// Returns the `owner/name` identity of the repository.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl Describe for Repository {
    fn describe() -> TypeDescriptor {
        use FieldDescriptor as F;
        use FieldKind as K;

        TypeDescriptor::new(
            "Repository",
            vec![
                F::optional("description", K::String),
                F::required("visibility", K::enumeration::<Visibility>()),
                F::optional("homepage_url", K::String),
                F::required("default_branch", K::String),
                F::optional("has_issues", K::Boolean),
                F::optional("has_projects", K::Boolean),
                F::optional("has_wiki", K::Boolean),
                F::optional("has_downloads", K::Boolean),
                F::optional("allow_merge_commit", K::Boolean),
                F::optional("allow_rebase_merge", K::Boolean),
                F::optional("allow_squash_merge", K::Boolean),
                F::optional("allow_auto_merge", K::Boolean),
                F::optional("allow_update_branch", K::Boolean),
                F::optional(
                    "squash_merge_commit_title",
                    K::enumeration::<SquashMergeCommitTitle>(),
                ),
                F::optional(
                    "squash_merge_commit_message",
                    K::enumeration::<SquashMergeCommitMessage>(),
                ),
                F::optional("merge_commit_title", K::enumeration::<MergeCommitTitle>()),
                F::optional("merge_commit_message", K::enumeration::<MergeCommitMessage>()),
                F::optional("web_commit_signoff_required", K::Boolean),
                F::optional("delete_branch_on_merge", K::Boolean),
                F::optional("is_template", K::Boolean),
                F::optional("archived", K::Boolean),
                F::optional("has_discussions", K::Boolean),
                F::optional("topics", K::strings()),
                F::optional("pull_collaborators", K::strings()),
                F::optional("triage_collaborators", K::strings()),
                F::optional("push_collaborators", K::strings()),
                F::optional("maintain_collaborators", K::strings()),
                F::optional("admin_collaborators", K::strings()),
                F::optional("pull_teams", K::strings()),
                F::optional("triage_teams", K::strings()),
                F::optional("push_teams", K::strings()),
                F::optional("maintain_teams", K::strings()),
                F::optional("admin_teams", K::strings()),
                F::optional("license_template", K::String)
                    .with_description("License keyword, e.g. mit or apache-2.0"),
                F::optional("gitignore_template", K::String),
                F::optional("template", K::object::<RepositoryTemplate>()),
                F::optional("pages", K::object::<Pages>()),
                F::optional("rulesets", K::object_list::<Ruleset>(None)),
                F::optional("vulnerability_alerts_enabled", K::Boolean),
                F::optional(
                    "branch_protections_v4",
                    K::object_list::<BranchProtectionV4>(None),
                ),
                F::optional("environments", K::object_list::<Environment>(None)),
            ],
        )
        .with_description("Declarative configuration of a GitHub repository")
    }
}

/// The template repository a repository was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryTemplate {
    pub owner: String,
    pub repository: String,
}

impl Describe for RepositoryTemplate {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "RepositoryTemplate",
            vec![
                FieldDescriptor::required("owner", FieldKind::String),
                FieldDescriptor::required("repository", FieldKind::String),
            ],
        )
    }
}
