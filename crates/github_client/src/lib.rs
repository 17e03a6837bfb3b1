//! Crate for reading repository configuration from the GitHub API.
//!
//! This crate provides a read-only client for the GitHub REST and GraphQL APIs,
//! authenticated with a personal access token. It returns the raw API payloads
//! (see [`models`], [`ruleset`], [`environment`] and [`branch_protection`]) and
//! leaves interpreting them to the importer.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod branch_protection;
pub use branch_protection::{ActorAllowance, ActorConnection, BranchProtectionRule, ProtectionActor};

pub mod environment;
pub use environment::{
    DeploymentBranchPolicy, DeploymentBranchPolicyPattern, Environment, EnvironmentReviewer,
    ProtectionRule,
};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{
    Account, Collaborator, License, Pages, PagesSource, RepositoryDetails, RepositorySummary,
    Team, TemplateRepository,
};

pub mod ruleset;
pub use ruleset::{BypassActor, RepositoryRuleset, Rule};

use branch_protection::{BranchProtectionRulesData, GraphQlResponse, BRANCH_PROTECTION_RULES_QUERY};
use environment::{DeploymentBranchPolicyList, EnvironmentList};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The largest page size the GitHub REST API accepts.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Options controlling how the repositories of an organization are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRepositoriesOptions {
    /// Number of repositories requested per page, capped at [`MAX_PAGE_SIZE`].
    pub page_size: u8,

    /// `Some(true)` lists only public repositories, `Some(false)` only private
    /// ones, `None` lists all of them.
    pub is_public: Option<bool>,
}

impl Default for ListRepositoriesOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            is_public: None,
        }
    }
}

impl ListRepositoriesOptions {
    fn repository_type(&self) -> &'static str {
        match self.is_public {
            Some(true) => "public",
            Some(false) => "private",
            None => "all",
        }
    }
}

/// Read access to the configuration of GitHub repositories.
///
/// Every listing method pages through the API internally and returns the full
/// collection. Implementations must be shareable across tasks.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Lists the repositories of an organization, in the order GitHub returns them.
    async fn list_repositories(
        &self,
        org: &str,
        options: &ListRepositoriesOptions,
    ) -> Result<Vec<RepositorySummary>, Error>;

    /// Fetches the settings of a single repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the repository does not exist or is not
    /// visible to the token.
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryDetails, Error>;

    /// Lists the direct collaborators of a repository with their role names.
    async fn list_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<Collaborator>, Error>;

    /// Lists the teams with access to a repository.
    async fn list_teams(&self, owner: &str, repo: &str) -> Result<Vec<Team>, Error>;

    /// Returns whether Dependabot vulnerability alerts are enabled.
    async fn get_vulnerability_alerts(&self, owner: &str, repo: &str) -> Result<bool, Error>;

    /// Lists the rulesets defined on the repository itself, each with its full
    /// rule, condition and bypass details.
    async fn list_rulesets(&self, owner: &str, repo: &str) -> Result<Vec<RepositoryRuleset>, Error>;

    /// Lists the pattern-based branch protection rules of a repository.
    async fn list_branch_protections(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<BranchProtectionRule>, Error>;

    /// Lists the deployment environments of a repository.
    async fn list_environments(&self, owner: &str, repo: &str) -> Result<Vec<Environment>, Error>;

    /// Lists the custom deployment branch and tag policies of an environment.
    async fn list_deployment_branch_policies(
        &self,
        owner: &str,
        repo: &str,
        environment: &str,
    ) -> Result<Vec<DeploymentBranchPolicyPattern>, Error>;

    /// Fetches the GitHub Pages configuration.
    ///
    /// Returns `Ok(None)` when Pages is not configured for the repository.
    async fn get_pages(&self, owner: &str, repo: &str) -> Result<Option<Pages>, Error>;
}

/// A client for reading repository configuration through the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` around an authenticated `Octocrab` instance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{create_token_client, GitHubClient};
    ///
    /// # fn example() -> Result<(), github_client::Error> {
    /// let octocrab = create_token_client("ghp_example", None)?;
    /// let client = GitHubClient::new(octocrab);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every page of a REST listing that returns a bare JSON array.
    ///
    /// Paging stops at the first page that holds fewer than `per_page` items.
    async fn get_all_pages<T>(
        &self,
        route: &str,
        query: &[(&str, String)],
        per_page: u8,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let params = page_query(query, per_page, page);
            let batch: Vec<T> = self.get_json(route, Some(&params)).await?;
            let count = batch.len();
            items.extend(batch);

            debug!(route = route, page = page, count = count, "Fetched page");

            if count < usize::from(per_page) {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn get_json<T, P>(&self, route: &str, params: Option<&P>) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        P: Serialize + ?Sized + Sync,
    {
        self.client
            .get(route, params)
            .await
            .map_err(|e| map_octocrab_error(route, e))
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self, options), fields(org = %org))]
    async fn list_repositories(
        &self,
        org: &str,
        options: &ListRepositoriesOptions,
    ) -> Result<Vec<RepositorySummary>, Error> {
        let route = format!("/orgs/{}/repos", org);
        let query = [("type", options.repository_type().to_string())];
        let repositories = self
            .get_all_pages(&route, &query, options.page_size)
            .await?;

        info!(
            org = org,
            count = repositories.len(),
            "Listed organization repositories"
        );
        Ok(repositories)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryDetails, Error> {
        let route = format!("/repos/{}/{}", owner, repo);
        self.get_json(&route, None::<&()>).await
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<Collaborator>, Error> {
        let route = format!("/repos/{}/{}/collaborators", owner, repo);
        let query = [("affiliation", "direct".to_string())];
        self.get_all_pages(&route, &query, MAX_PAGE_SIZE).await
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_teams(&self, owner: &str, repo: &str) -> Result<Vec<Team>, Error> {
        let route = format!("/repos/{}/{}/teams", owner, repo);
        self.get_all_pages(&route, &[], MAX_PAGE_SIZE).await
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_vulnerability_alerts(&self, owner: &str, repo: &str) -> Result<bool, Error> {
        // 204 when enabled, 404 when disabled; neither carries a JSON body.
        let route = format!("/repos/{}/{}/vulnerability-alerts", owner, repo);
        let response = self.client._get(&route).await.map_err(|e| {
            log_octocrab_error("Failed to read vulnerability alert status", &e);
            Error::RequestFailed {
                route: route.clone(),
                message: e.to_string(),
            }
        })?;

        match response.status() {
            http::StatusCode::NO_CONTENT => Ok(true),
            http::StatusCode::NOT_FOUND => Ok(false),
            status => {
                error!(
                    route = route.as_str(),
                    status = status.as_u16(),
                    "Unexpected status reading vulnerability alert status"
                );
                Err(Error::RequestFailed {
                    route,
                    message: format!("unexpected status {}", status),
                })
            }
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_rulesets(&self, owner: &str, repo: &str) -> Result<Vec<RepositoryRuleset>, Error> {
        let route = format!("/repos/{}/{}/rulesets", owner, repo);
        let query = [("includes_parents", "false".to_string())];
        let summaries: Vec<RepositoryRuleset> =
            self.get_all_pages(&route, &query, MAX_PAGE_SIZE).await?;

        // The listing omits rules, conditions and bypass actors.
        let mut rulesets = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let detail_route = format!("{}/{}", route, summary.id);
            let detail: RepositoryRuleset = self.get_json(&detail_route, None::<&()>).await?;
            rulesets.push(detail);
        }

        debug!(count = rulesets.len(), "Fetched ruleset details");
        Ok(rulesets)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_branch_protections(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<BranchProtectionRule>, Error> {
        let mut rules = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let payload = serde_json::json!({
                "query": BRANCH_PROTECTION_RULES_QUERY,
                "variables": {
                    "owner": owner,
                    "name": repo,
                    "cursor": cursor,
                },
            });

            let response: GraphQlResponse<BranchProtectionRulesData> = self
                .client
                .graphql(&payload)
                .await
                .map_err(|e| map_octocrab_error("/graphql", e))?;

            if !response.errors.is_empty() {
                let messages: Vec<String> =
                    response.errors.into_iter().map(|e| e.message).collect();
                error!(
                    owner = owner,
                    repo = repo,
                    errors = ?messages,
                    "GraphQL query for branch protection rules failed"
                );
                return Err(Error::GraphQl(messages.join("; ")));
            }

            let connection = response
                .data
                .and_then(|d| d.repository)
                .map(|r| r.branch_protection_rules)
                .ok_or(Error::NotFound)?;

            rules.extend(connection.nodes);

            match connection.page_info.end_cursor {
                Some(next) if connection.page_info.has_next_page => cursor = Some(next),
                _ => break,
            }
        }

        debug!(count = rules.len(), "Fetched branch protection rules");
        Ok(rules)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_environments(&self, owner: &str, repo: &str) -> Result<Vec<Environment>, Error> {
        let route = format!("/repos/{}/{}/environments", owner, repo);
        let mut environments = Vec::new();
        let mut page: u32 = 1;

        loop {
            let params = page_query(&[], MAX_PAGE_SIZE, page);
            let batch: EnvironmentList = self.get_json(&route, Some(&params)).await?;
            let count = batch.environments.len();
            environments.extend(batch.environments);

            if count < usize::from(MAX_PAGE_SIZE) || environments.len() as u64 >= batch.total_count
            {
                break;
            }
            page += 1;
        }

        Ok(environments)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, environment = %environment))]
    async fn list_deployment_branch_policies(
        &self,
        owner: &str,
        repo: &str,
        environment: &str,
    ) -> Result<Vec<DeploymentBranchPolicyPattern>, Error> {
        let route = format!(
            "/repos/{}/{}/environments/{}/deployment-branch-policies",
            owner,
            repo,
            encode_path_segment(environment)?
        );
        let mut policies = Vec::new();
        let mut page: u32 = 1;

        loop {
            let params = page_query(&[], MAX_PAGE_SIZE, page);
            let batch: DeploymentBranchPolicyList = self.get_json(&route, Some(&params)).await?;
            let count = batch.branch_policies.len();
            policies.extend(batch.branch_policies);

            if count < usize::from(MAX_PAGE_SIZE) || policies.len() as u64 >= batch.total_count {
                break;
            }
            page += 1;
        }

        Ok(policies)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_pages(&self, owner: &str, repo: &str) -> Result<Option<Pages>, Error> {
        let route = format!("/repos/{}/{}/pages", owner, repo);
        match self.get_json(&route, None::<&()>).await {
            Ok(pages) => Ok(Some(pages)),
            Err(Error::NotFound) => {
                debug!("Pages is not configured");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token.
/// * `base_uri` - Optional API base URL, e.g. for GitHub Enterprise Server.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the token is empty, the base URL cannot be
/// parsed or the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    if token.trim().is_empty() {
        return Err(Error::AuthError("the GitHub token is empty".to_string()));
    }

    let mut builder = Octocrab::builder().personal_token(token.to_string());
    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URL");
            Error::AuthError(format!("invalid GitHub API base URL '{}': {}", uri, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = %e, "Failed to build Octocrab client");
        Error::AuthError(e.to_string())
    })
}

fn page_query(query: &[(&str, String)], per_page: u8, page: u32) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    params.push(("per_page".to_string(), per_page.to_string()));
    params.push(("page".to_string(), page.to_string()));
    params
}

/// Percent-encodes a single URL path segment.
fn encode_path_segment(segment: &str) -> Result<String, Error> {
    let mut url = Url::parse("https://api.github.com/").map_err(|_| Error::InvalidResponse)?;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidResponse)?
        .clear()
        .push(segment);

    Ok(url.path().trim_start_matches('/').to_string())
}

fn map_octocrab_error(route: &str, e: octocrab::Error) -> Error {
    if let octocrab::Error::GitHub { source, .. } = &e {
        let status = source.status_code;
        if status == http::StatusCode::NOT_FOUND {
            debug!(route = route, "GitHub returned 404");
            return Error::NotFound;
        }

        if status == http::StatusCode::TOO_MANY_REQUESTS
            || (status == http::StatusCode::FORBIDDEN
                && source.message.to_lowercase().contains("rate limit"))
        {
            warn!(route = route, "GitHub rate limit exceeded");
            return Error::RateLimitExceeded;
        }
    }

    log_octocrab_error(&format!("Request to '{}' failed", route), &e);
    Error::RequestFailed {
        route: route.to_string(),
        message: e.to_string(),
    }
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            error_message = source.message.as_str(),
            status = source.status_code.as_u16(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Serde { source, .. } => error!(
            error_message = source.to_string(),
            "{}. The response could not be deserialized.",
            message
        ),
        _ => error!(error_message = e.to_string(), "{}", message),
    };
}
