//! Shared test doubles.

use async_trait::async_trait;
use github_client::{
    Account, BranchProtectionRule, Collaborator, DeploymentBranchPolicyPattern, Environment,
    Error, ListRepositoriesOptions, Pages, RepositoryClient, RepositoryDetails,
    RepositoryRuleset, RepositorySummary, Team,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory `RepositoryClient` that records every call it receives.
#[derive(Default)]
pub struct MockRepositoryClient {
    pub repositories: Vec<RepositorySummary>,
    pub details: HashMap<String, RepositoryDetails>,
    pub rulesets: Vec<RepositoryRuleset>,
    pub environments: Vec<Environment>,
    pub branch_policies: Vec<DeploymentBranchPolicyPattern>,
    pub pages: Option<Pages>,
    /// Delay before `get_repository` answers, per repository name
    pub delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<String>>,
    pub listing_options: Mutex<Option<ListRepositoriesOptions>>,
}

impl MockRepositoryClient {
    pub fn with_repositories(names: &[&str]) -> Self {
        let mut client = Self::default();
        for name in names {
            client.add_repository(name);
        }
        client
    }

    pub fn add_repository(&mut self, name: &str) {
        self.repositories.push(RepositorySummary {
            name: name.to_string(),
            owner: owner(),
            private: false,
            archived: false,
        });
        self.details.insert(name.to_string(), details(name));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(' ').next() == Some(method))
            .count()
    }

    fn record(&self, method: &str, target: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", method, target));
    }
}

pub fn owner() -> Account {
    Account {
        id: 10,
        login: "my-org".to_string(),
    }
}

pub fn details(name: &str) -> RepositoryDetails {
    RepositoryDetails {
        id: 1,
        name: name.to_string(),
        owner: owner(),
        visibility: Some("private".to_string()),
        private: true,
        default_branch: Some("main".to_string()),
        has_pages: Some(true),
        ..Default::default()
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn list_repositories(
        &self,
        org: &str,
        options: &ListRepositoriesOptions,
    ) -> Result<Vec<RepositorySummary>, Error> {
        self.record("list_repositories", org);
        *self.listing_options.lock().unwrap() = Some(*options);
        Ok(self.repositories.clone())
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryDetails, Error> {
        self.record("get_repository", &format!("{}/{}", owner, repo));
        if let Some(delay) = self.delays.get(repo) {
            tokio::time::sleep(*delay).await;
        }
        self.details.get(repo).cloned().ok_or(Error::NotFound)
    }

    async fn list_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<Collaborator>, Error> {
        self.record("list_collaborators", &format!("{}/{}", owner, repo));
        Ok(Vec::new())
    }

    async fn list_teams(&self, owner: &str, repo: &str) -> Result<Vec<Team>, Error> {
        self.record("list_teams", &format!("{}/{}", owner, repo));
        Ok(Vec::new())
    }

    async fn get_vulnerability_alerts(&self, owner: &str, repo: &str) -> Result<bool, Error> {
        self.record("get_vulnerability_alerts", &format!("{}/{}", owner, repo));
        Ok(true)
    }

    async fn list_rulesets(&self, owner: &str, repo: &str) -> Result<Vec<RepositoryRuleset>, Error> {
        self.record("list_rulesets", &format!("{}/{}", owner, repo));
        Ok(self.rulesets.clone())
    }

    async fn list_branch_protections(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<BranchProtectionRule>, Error> {
        self.record("list_branch_protections", &format!("{}/{}", owner, repo));
        Ok(Vec::new())
    }

    async fn list_environments(&self, owner: &str, repo: &str) -> Result<Vec<Environment>, Error> {
        self.record("list_environments", &format!("{}/{}", owner, repo));
        Ok(self.environments.clone())
    }

    async fn list_deployment_branch_policies(
        &self,
        owner: &str,
        repo: &str,
        environment: &str,
    ) -> Result<Vec<DeploymentBranchPolicyPattern>, Error> {
        self.record(
            "list_deployment_branch_policies",
            &format!("{}/{}/{}", owner, repo, environment),
        );
        Ok(self.branch_policies.clone())
    }

    async fn get_pages(&self, owner: &str, repo: &str) -> Result<Option<Pages>, Error> {
        self.record("get_pages", &format!("{}/{}", owner, repo));
        Ok(self.pages.clone())
    }
}
