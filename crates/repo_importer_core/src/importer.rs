//! Feature-gated import of a single repository.
//!
//! [`import_repository`] fetches everything the enabled features need and
//! hands the resulting [`RepositorySnapshot`] to [`map_repository`]. A
//! disabled feature short-circuits before any call is made on the client.

use crate::convert::{map_repository, EnvironmentSnapshot, RepositorySnapshot};
use crate::errors::{ImportError, ImportResult};
use config_manager::settings::Repository;
use config_manager::{features, ImportConfig};
use github_client::{Error as GitHubError, RepositoryClient};
use tracing::{debug, info, instrument};

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;

/// Imports the configuration of `owner/repo`.
///
/// Repository settings, collaborators, teams and the vulnerability alert flag
/// are always fetched. Rulesets, branch protections, environments and Pages
/// are fetched only when the matching feature is enabled in `config`; Pages
/// is also skipped when GitHub reports that the repository has no site.
///
/// # Errors
///
/// * `ImportError::Fetch` if any GitHub call fails
/// * `ImportError::Mapping` if a fetched value has no representation in the model
#[instrument(skip(client, config), fields(owner = %owner, repo = %repo))]
pub async fn import_repository(
    client: &dyn RepositoryClient,
    config: &ImportConfig,
    owner: &str,
    repo: &str,
) -> ImportResult<Repository> {
    let snapshot = fetch_snapshot(client, config, owner, repo).await?;
    let repository = map_repository(&snapshot)?;

    info!(
        rulesets = repository.rulesets.len(),
        branch_protections = repository.branch_protections_v4.len(),
        environments = repository.environments.len(),
        pages = repository.pages.is_some(),
        "Imported repository configuration"
    );
    Ok(repository)
}

/// Fetches the raw state of `owner/repo` for the enabled features.
pub async fn fetch_snapshot(
    client: &dyn RepositoryClient,
    config: &ImportConfig,
    owner: &str,
    repo: &str,
) -> ImportResult<RepositorySnapshot> {
    let full_name = format!("{}/{}", owner, repo);

    let details = client
        .get_repository(owner, repo)
        .await
        .map_err(fetch_failed(&full_name, "repository settings"))?;
    let collaborators = client
        .list_collaborators(owner, repo)
        .await
        .map_err(fetch_failed(&full_name, "collaborators"))?;
    let teams = client
        .list_teams(owner, repo)
        .await
        .map_err(fetch_failed(&full_name, "teams"))?;
    let vulnerability_alerts_enabled = client
        .get_vulnerability_alerts(owner, repo)
        .await
        .map_err(fetch_failed(&full_name, "vulnerability alerts"))?;

    let rulesets = if is_enabled(config, features::RULESETS) {
        Some(
            client
                .list_rulesets(owner, repo)
                .await
                .map_err(fetch_failed(&full_name, "rulesets"))?,
        )
    } else {
        None
    };

    let branch_protections = if is_enabled(config, features::BRANCH_PROTECTIONS) {
        Some(
            client
                .list_branch_protections(owner, repo)
                .await
                .map_err(fetch_failed(&full_name, "branch protections"))?,
        )
    } else {
        None
    };

    let environments = if is_enabled(config, features::ENVIRONMENTS) {
        Some(fetch_environments(client, owner, repo, &full_name).await?)
    } else {
        None
    };

    let pages = if !is_enabled(config, features::PAGES) {
        None
    } else if details.has_pages == Some(false) {
        debug!("Repository has no Pages site, skipping");
        None
    } else {
        client
            .get_pages(owner, repo)
            .await
            .map_err(fetch_failed(&full_name, "pages"))?
    };

    Ok(RepositorySnapshot {
        details,
        collaborators,
        teams,
        vulnerability_alerts_enabled: Some(vulnerability_alerts_enabled),
        rulesets,
        branch_protections,
        environments,
        pages,
    })
}

async fn fetch_environments(
    client: &dyn RepositoryClient,
    owner: &str,
    repo: &str,
    full_name: &str,
) -> ImportResult<Vec<EnvironmentSnapshot>> {
    let environments = client
        .list_environments(owner, repo)
        .await
        .map_err(fetch_failed(full_name, "environments"))?;

    let mut snapshots = Vec::with_capacity(environments.len());
    for environment in environments {
        let uses_custom_policies = environment
            .deployment_branch_policy
            .as_ref()
            .is_some_and(|p| p.custom_branch_policies);

        let branch_policies = if uses_custom_policies {
            client
                .list_deployment_branch_policies(owner, repo, &environment.name)
                .await
                .map_err(fetch_failed(full_name, "deployment branch policies"))?
        } else {
            Vec::new()
        };

        snapshots.push(EnvironmentSnapshot {
            environment,
            branch_policies,
        });
    }
    Ok(snapshots)
}

fn is_enabled(config: &ImportConfig, feature: &str) -> bool {
    let enabled = config.is_feature_enabled(feature);
    if !enabled {
        debug!(feature, "Feature disabled, skipping");
    }
    enabled
}

fn fetch_failed(
    repository: &str,
    resource: &'static str,
) -> impl FnOnce(GitHubError) -> ImportError {
    let repository = repository.to_string();
    move |source| ImportError::Fetch {
        repository,
        resource,
        source,
    }
}
