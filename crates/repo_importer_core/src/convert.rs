//! Conversion of fetched GitHub payloads into the declarative repository model.
//!
//! Everything in this module is pure: the importer fetches a
//! [`RepositorySnapshot`] and [`map_repository`] turns it into a
//! [`Repository`](model::Repository) without touching the network.
//!
//! Raw string values are coerced through [`SettingEnum::from_wire`], the same
//! value lists the schema is built from. A value outside those lists is a
//! [`MappingError`]. Ruleset rule types and environment protection rules the
//! model has no slot for are skipped with a warning instead.

use crate::errors::MappingError;
use config_manager::settings as model;
use config_manager::SettingEnum;
use github_client as gh;
use github_client::ruleset::{
    CodeScanningParameters, PatternParameters, PullRequestParameters,
    RequiredDeploymentsParameters, RequiredStatusChecksParameters, UpdateParameters,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;

/// The raw GitHub state of one repository.
///
/// Feature-gated resources are `None` when they were not fetched, which maps
/// to an empty (omitted) section in the model.
#[derive(Debug, Clone, Default)]
pub struct RepositorySnapshot {
    pub details: gh::RepositoryDetails,
    pub collaborators: Vec<gh::Collaborator>,
    pub teams: Vec<gh::Team>,
    pub vulnerability_alerts_enabled: Option<bool>,
    pub rulesets: Option<Vec<gh::RepositoryRuleset>>,
    pub branch_protections: Option<Vec<gh::BranchProtectionRule>>,
    pub environments: Option<Vec<EnvironmentSnapshot>>,
    pub pages: Option<gh::Pages>,
}

impl RepositorySnapshot {
    /// Returns the `owner/name` identity of the repository.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.details.owner.login, self.details.name)
    }
}

/// A deployment environment together with its custom branch and tag policies.
#[derive(Debug, Clone)]
pub struct EnvironmentSnapshot {
    pub environment: gh::Environment,

    /// Empty unless the environment uses custom branch policies
    pub branch_policies: Vec<gh::DeploymentBranchPolicyPattern>,
}

/// Maps a fetched repository onto the declarative model.
///
/// # Errors
///
/// Returns a [`MappingError`] naming the repository and field when a value
/// cannot be represented in the model.
pub fn map_repository(snapshot: &RepositorySnapshot) -> Result<model::Repository, MappingError> {
    Mapper {
        repository: snapshot.full_name(),
        snapshot,
    }
    .repository()
}

struct Mapper<'a> {
    repository: String,
    snapshot: &'a RepositorySnapshot,
}

impl Mapper<'_> {
    fn error(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> MappingError {
        MappingError::new(self.repository.clone(), field, value, reason)
    }

    fn coerce<E: SettingEnum>(&self, field: &str, value: &str) -> Result<E, MappingError> {
        E::from_wire(value).ok_or_else(|| {
            self.error(
                field,
                value,
                format!("expected one of: {}", E::VALUES.join(", ")),
            )
        })
    }

    fn optional_enum<E: SettingEnum>(
        &self,
        field: &str,
        value: Option<&str>,
    ) -> Result<Option<E>, MappingError> {
        value.map(|v| self.coerce(field, v)).transpose()
    }

    fn parameters<T: DeserializeOwned>(
        &self,
        field: &str,
        rule: &gh::Rule,
    ) -> Result<T, MappingError> {
        let parameters = rule
            .parameters
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        serde_json::from_value(parameters.clone())
            .map_err(|e| self.error(field, parameters.to_string(), e.to_string()))
    }

    fn repository(&self) -> Result<model::Repository, MappingError> {
        let details = &self.snapshot.details;
        let squash_allowed = details.allow_squash_merge == Some(true);
        let merge_allowed = details.allow_merge_commit == Some(true);

        let mut repository = model::Repository {
            name: details.name.clone(),
            owner: details.owner.login.clone(),
            description: details.description.clone().filter(|d| !d.is_empty()),
            visibility: self.visibility()?,
            homepage_url: details.homepage.clone().filter(|h| !h.is_empty()),
            default_branch: self.default_branch()?,
            has_issues: details.has_issues,
            has_projects: details.has_projects,
            has_wiki: details.has_wiki,
            has_downloads: details.has_downloads,
            allow_merge_commit: details.allow_merge_commit,
            allow_rebase_merge: details.allow_rebase_merge,
            allow_squash_merge: details.allow_squash_merge,
            allow_auto_merge: details.allow_auto_merge,
            allow_update_branch: details.allow_update_branch,
            web_commit_signoff_required: details.web_commit_signoff_required,
            delete_branch_on_merge: details.delete_branch_on_merge,
            is_template: details.is_template,
            archived: details.archived,
            has_discussions: details.has_discussions,
            topics: details.topics.clone(),
            license_template: details
                .license
                .as_ref()
                .map(|l| l.key.as_str())
                .filter(|key| *key != "other")
                .map(str::to_string),
            template: details
                .template_repository
                .as_ref()
                .map(|t| model::RepositoryTemplate {
                    owner: t.owner.login.clone(),
                    repository: t.name.clone(),
                }),
            vulnerability_alerts_enabled: self.snapshot.vulnerability_alerts_enabled,
            ..Default::default()
        };

        if squash_allowed {
            repository.squash_merge_commit_title = self.optional_enum(
                "squash_merge_commit_title",
                details.squash_merge_commit_title.as_deref(),
            )?;
            repository.squash_merge_commit_message = self.optional_enum(
                "squash_merge_commit_message",
                details.squash_merge_commit_message.as_deref(),
            )?;
        }
        if merge_allowed {
            repository.merge_commit_title = self.optional_enum(
                "merge_commit_title",
                details.merge_commit_title.as_deref(),
            )?;
            repository.merge_commit_message = self.optional_enum(
                "merge_commit_message",
                details.merge_commit_message.as_deref(),
            )?;
        }

        self.collaborators(&mut repository)?;
        self.teams(&mut repository)?;

        if let Some(rulesets) = &self.snapshot.rulesets {
            repository.rulesets = rulesets
                .iter()
                .filter(|r| self.has_ref_target(r))
                .map(|r| self.ruleset(r))
                .collect::<Result<_, _>>()?;
        }
        if let Some(rules) = &self.snapshot.branch_protections {
            repository.branch_protections_v4 =
                rules.iter().map(|r| self.branch_protection(r)).collect();
        }
        if let Some(environments) = &self.snapshot.environments {
            repository.environments = environments
                .iter()
                .map(|e| self.environment(e))
                .collect::<Result<_, _>>()?;
        }
        if let Some(pages) = &self.snapshot.pages {
            repository.pages = Some(self.pages(pages)?);
        }

        Ok(repository)
    }

    fn visibility(&self) -> Result<model::Visibility, MappingError> {
        match self.snapshot.details.visibility.as_deref() {
            Some(value) => self.coerce("visibility", value),
            None if self.snapshot.details.private => Ok(model::Visibility::Private),
            None => Ok(model::Visibility::Public),
        }
    }

    fn default_branch(&self) -> Result<String, MappingError> {
        self.snapshot
            .details
            .default_branch
            .clone()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| self.error("default_branch", "", "GitHub reported no default branch"))
    }

    fn collaborators(&self, repository: &mut model::Repository) -> Result<(), MappingError> {
        for collaborator in &self.snapshot.collaborators {
            let role = collaborator.role_name.as_deref().unwrap_or_default();
            let list = match role {
                "read" | "pull" => &mut repository.pull_collaborators,
                "triage" => &mut repository.triage_collaborators,
                "write" | "push" => &mut repository.push_collaborators,
                "maintain" => &mut repository.maintain_collaborators,
                "admin" => &mut repository.admin_collaborators,
                other => {
                    return Err(self.error(
                        format!("collaborators[{}]", collaborator.login),
                        other,
                        "only the built-in repository roles are supported",
                    ))
                }
            };
            list.push(collaborator.login.clone());
        }
        Ok(())
    }

    fn teams(&self, repository: &mut model::Repository) -> Result<(), MappingError> {
        for team in &self.snapshot.teams {
            let list = match team.permission.as_str() {
                "pull" => &mut repository.pull_teams,
                "triage" => &mut repository.triage_teams,
                "push" => &mut repository.push_teams,
                "maintain" => &mut repository.maintain_teams,
                "admin" => &mut repository.admin_teams,
                other => {
                    return Err(self.error(
                        format!("teams[{}]", team.slug),
                        other,
                        "only the built-in repository roles are supported",
                    ))
                }
            };
            list.push(team.slug.clone());
        }
        Ok(())
    }

    /// Push rulesets restrict file contents rather than refs; the model has no slot for them.
    fn has_ref_target(&self, ruleset: &gh::RepositoryRuleset) -> bool {
        if ruleset.target.as_deref() != Some("push") {
            return true;
        }
        warn!(
            repository = %self.repository,
            ruleset = %ruleset.name,
            "Skipping push ruleset without a counterpart in the repository model"
        );
        false
    }

    fn ruleset(&self, ruleset: &gh::RepositoryRuleset) -> Result<model::Ruleset, MappingError> {
        let field = |name: &str| format!("rulesets[{}].{}", ruleset.name, name);

        let bypass_actors = ruleset
            .bypass_actors
            .iter()
            .map(|actor| self.bypass_actor(&field("bypass_actors"), actor))
            .collect::<Result<_, _>>()?;

        let conditions = ruleset
            .conditions
            .as_ref()
            .and_then(|c| c.ref_name.as_ref())
            .filter(|ref_name| !ref_name.include.is_empty())
            .map(|ref_name| model::Conditions {
                ref_name: model::RefNameCondition {
                    include: ref_name.include.clone(),
                    exclude: ref_name.exclude.clone(),
                },
            });

        Ok(model::Ruleset {
            id: ruleset.id,
            enforcement: self.coerce(&field("enforcement"), &ruleset.enforcement)?,
            name: ruleset.name.clone(),
            rules: self.rules(ruleset)?,
            target: self.coerce(
                &field("target"),
                ruleset.target.as_deref().unwrap_or("branch"),
            )?,
            bypass_actors,
            conditions,
        })
    }

    fn bypass_actor(
        &self,
        field: &str,
        actor: &gh::BypassActor,
    ) -> Result<model::BypassActor, MappingError> {
        let id = actor.actor_id.unwrap_or_default();
        let name = match actor.actor_type.as_str() {
            "OrganizationAdmin" => "organization_admin".to_string(),
            "RepositoryRole" => match id {
                2 => "maintain".to_string(),
                4 => "write".to_string(),
                5 => "admin".to_string(),
                _ => {
                    return Err(self.error(
                        field,
                        format!("RepositoryRole {}", id),
                        "unknown repository role id",
                    ))
                }
            },
            "Team" => self
                .snapshot
                .teams
                .iter()
                .find(|team| team.id == id)
                .map(|team| team.slug.clone())
                .unwrap_or_else(|| id.to_string()),
            "Integration" => format!("app:{}", id),
            "DeployKey" => "deploy_key".to_string(),
            other => return Err(self.error(field, other, "unknown bypass actor type")),
        };

        Ok(model::BypassActor {
            name,
            bypass_mode: self.optional_enum(
                &format!("{}.bypass_mode", field),
                actor.bypass_mode.as_deref(),
            )?,
        })
    }

    fn rules(&self, ruleset: &gh::RepositoryRuleset) -> Result<model::Rule, MappingError> {
        let mut rules = model::Rule::default();

        for rule in &ruleset.rules {
            let field = format!("rulesets[{}].rules.{}", ruleset.name, rule.rule_type);
            match rule.rule_type.as_str() {
                "creation" => rules.creation = Some(true),
                "deletion" => rules.deletion = Some(true),
                "non_fast_forward" => rules.non_fast_forward = Some(true),
                "required_linear_history" => rules.required_linear_history = Some(true),
                "required_signatures" => rules.required_signatures = Some(true),
                "update" => {
                    let params: UpdateParameters = self.parameters(&field, rule)?;
                    rules.update = Some(true);
                    rules.update_allows_fetch_and_merge = params.update_allows_fetch_and_merge;
                }
                "pull_request" => {
                    let params: PullRequestParameters = self.parameters(&field, rule)?;
                    rules.pull_request = Some(model::PullRequestRule {
                        dismiss_stale_reviews_on_push: params.dismiss_stale_reviews_on_push,
                        require_code_owner_review: params.require_code_owner_review,
                        require_last_push_approval: params.require_last_push_approval,
                        required_approving_review_count: params.required_approving_review_count,
                        required_review_thread_resolution: params
                            .required_review_thread_resolution,
                    });
                }
                "required_deployments" => {
                    let params: RequiredDeploymentsParameters = self.parameters(&field, rule)?;
                    let environments = params.required_deployment_environments;
                    rules.required_deployments =
                        (!environments.is_empty()).then(|| model::RequiredDeployments {
                            required_deployment_environments: environments,
                        });
                }
                "required_status_checks" => {
                    let params: RequiredStatusChecksParameters = self.parameters(&field, rule)?;
                    let required_check: Vec<_> = params
                        .required_status_checks
                        .into_iter()
                        .map(|check| model::RequiredCheck {
                            context: check.context,
                            integration_id: check.integration_id,
                        })
                        .collect();
                    rules.required_status_checks =
                        (!required_check.is_empty()).then(|| model::RequiredStatusChecks {
                            required_check,
                            strict_required_status_checks_policy: params
                                .strict_required_status_checks_policy,
                        });
                }
                "code_scanning" => {
                    let params: CodeScanningParameters = self.parameters(&field, rule)?;
                    let tools = params
                        .code_scanning_tools
                        .iter()
                        .map(|tool| {
                            Ok(model::RequiredCodeScanningTool {
                                alerts_threshold: self.coerce(
                                    &format!("{}.alerts_threshold", field),
                                    &tool.alerts_threshold,
                                )?,
                                security_alerts_threshold: self.coerce(
                                    &format!("{}.security_alerts_threshold", field),
                                    &tool.security_alerts_threshold,
                                )?,
                                tool: tool.tool.clone(),
                            })
                        })
                        .collect::<Result<Vec<_>, MappingError>>()?;
                    rules.required_code_scanning =
                        (!tools.is_empty()).then(|| model::RequiredCodeScanning {
                            required_code_scanning_tool: tools,
                        });
                }
                "branch_name_pattern" => {
                    rules.branch_name_pattern = Some(self.pattern(&field, rule)?)
                }
                "tag_name_pattern" => rules.tag_name_pattern = Some(self.pattern(&field, rule)?),
                "commit_author_email_pattern" => {
                    rules.commit_author_email_pattern = Some(self.pattern(&field, rule)?)
                }
                "commit_message_pattern" => {
                    rules.commit_message_pattern = Some(self.pattern(&field, rule)?)
                }
                "committer_email_pattern" => {
                    rules.committer_email_pattern = Some(self.pattern(&field, rule)?)
                }
                other => warn!(
                    repository = %self.repository,
                    ruleset = %ruleset.name,
                    rule_type = other,
                    "Skipping ruleset rule without a counterpart in the repository model"
                ),
            }
        }

        Ok(rules)
    }

    fn pattern(&self, field: &str, rule: &gh::Rule) -> Result<model::PatternRule, MappingError> {
        let params: PatternParameters = self.parameters(field, rule)?;
        Ok(model::PatternRule {
            operator: self.coerce(&format!("{}.operator", field), &params.operator)?,
            pattern: params.pattern,
            name: params.name.filter(|n| !n.is_empty()),
            negate: params.negate,
        })
    }

    fn branch_protection(&self, rule: &gh::BranchProtectionRule) -> model::BranchProtectionV4 {
        let owner = self.snapshot.details.owner.login.as_str();
        let actors = |connection: &gh::ActorConnection| -> Vec<String> {
            connection
                .actors()
                .filter_map(|actor| render_actor(owner, actor))
                .collect()
        };

        let push_restrictions = if rule.restricts_pushes == Some(true) {
            actors(&rule.push_allowances)
        } else {
            Vec::new()
        };

        let required_status_checks =
            (rule.requires_status_checks == Some(true)).then(|| model::RequiredStatusChecksV4 {
                strict: rule.requires_strict_status_checks,
                contexts: rule.required_status_check_contexts.clone(),
            });

        let required_pull_request_reviews = (rule.requires_approving_reviews == Some(true))
            .then(|| model::RequiredPullRequestReviewsV4 {
                dismiss_stale_reviews: rule.dismisses_stale_reviews,
                restrict_dismissals: rule.restricts_review_dismissals,
                dismissal_restrictions: actors(&rule.review_dismissal_allowances),
                pull_request_bypassers: actors(&rule.bypass_pull_request_allowances),
                require_code_owner_reviews: rule.requires_code_owner_reviews,
                required_approving_review_count: rule.required_approving_review_count,
                require_last_push_approval: rule.require_last_push_approval,
            });

        model::BranchProtectionV4 {
            pattern: rule.pattern.clone(),
            enforce_admins: rule.is_admin_enforced,
            allows_deletions: rule.allows_deletions,
            allows_force_pushes: rule.allows_force_pushes,
            require_signed_commits: rule.requires_commit_signatures,
            required_linear_history: rule.requires_linear_history,
            require_conversation_resolution: rule.requires_conversation_resolution,
            lock_branch: rule.lock_branch,
            push_restrictions,
            force_push_bypassers: actors(&rule.bypass_force_push_allowances),
            required_status_checks,
            required_pull_request_reviews,
        }
    }

    fn environment(
        &self,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<model::Environment, MappingError> {
        let raw = &snapshot.environment;
        let field = |name: &str| format!("environments[{}].{}", raw.name, name);

        let mut environment = model::Environment {
            environment: raw.name.clone(),
            can_admins_bypass: raw.can_admins_bypass,
            ..Default::default()
        };

        for rule in &raw.protection_rules {
            match rule.rule_type.as_str() {
                "wait_timer" => {
                    let Some(minutes) = rule.wait_timer else {
                        continue;
                    };
                    if i64::from(minutes) > model::MAX_WAIT_TIMER_MINUTES {
                        return Err(self.error(
                            field("wait_timer"),
                            minutes.to_string(),
                            format!("exceeds {} minutes", model::MAX_WAIT_TIMER_MINUTES),
                        ));
                    }
                    environment.wait_timer = Some(minutes);
                }
                "required_reviewers" => {
                    environment.prevent_self_review = rule.prevent_self_review;
                    let mut reviewers = model::EnvironmentReviewers::default();
                    for entry in &rule.reviewers {
                        let identity = &entry.reviewer;
                        match (entry.reviewer_type.as_str(), &identity.slug, &identity.login) {
                            ("Team", Some(slug), _) => reviewers.teams.push(slug.clone()),
                            ("User", _, Some(login)) => reviewers.users.push(login.clone()),
                            (other, _, _) => {
                                return Err(self.error(
                                    field("reviewers"),
                                    other,
                                    "reviewer is neither a team with a slug nor a user with a login",
                                ))
                            }
                        }
                    }
                    if !reviewers.is_empty() {
                        environment.reviewers = Some(reviewers);
                    }
                }
                // Carried by the deployment branch policy.
                "branch_policy" => {}
                other => warn!(
                    repository = %self.repository,
                    environment = %raw.name,
                    rule_type = other,
                    "Skipping environment protection rule without a counterpart in the repository model"
                ),
            }
        }

        environment.deployment_policy = self.deployment_policy(snapshot)?;
        Ok(environment)
    }

    fn deployment_policy(
        &self,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<Option<model::DeploymentPolicy>, MappingError> {
        let raw = &snapshot.environment;
        let Some(policy) = &raw.deployment_branch_policy else {
            return Ok(None);
        };

        match (policy.protected_branches, policy.custom_branch_policies) {
            (true, true) => Err(self.error(
                format!("environments[{}].deployment_policy", raw.name),
                "protected_branches+custom_branch_policies",
                "protected branches and custom branch policies are mutually exclusive",
            )),
            (true, false) => Ok(Some(model::DeploymentPolicy {
                policy_type: model::DeploymentPolicyType::ProtectedBranches,
                branch_patterns: Vec::new(),
                tag_patterns: Vec::new(),
            })),
            (false, true) => {
                let (tags, branches): (Vec<_>, Vec<_>) = snapshot
                    .branch_policies
                    .iter()
                    .partition(|p| p.ref_type.as_deref() == Some("tag"));
                Ok(Some(model::DeploymentPolicy {
                    policy_type: model::DeploymentPolicyType::SelectedBranchesAndTags,
                    branch_patterns: branches.into_iter().map(|p| p.name.clone()).collect(),
                    tag_patterns: tags.into_iter().map(|p| p.name.clone()).collect(),
                }))
            }
            (false, false) => Ok(None),
        }
    }

    fn pages(&self, pages: &gh::Pages) -> Result<model::Pages, MappingError> {
        let build_type = match pages.build_type.as_deref() {
            Some(value) => self.coerce("pages.build_type", value)?,
            None => model::PagesBuildType::Legacy,
        };
        let branch = pages.source.as_ref().map(|s| s.branch.clone());

        if build_type == model::PagesBuildType::Legacy && branch.is_none() {
            return Err(self.error(
                "pages.branch",
                "",
                "legacy Pages builds must name a source branch",
            ));
        }

        Ok(model::Pages {
            cname: pages.cname.clone().filter(|c| !c.is_empty()),
            branch,
            path: pages.source.as_ref().and_then(|s| s.path.clone()),
            build_type,
        })
    }
}

/// Renders a branch protection actor as `owner/team`, `/login` or `app-slug`.
fn render_actor(owner: &str, actor: &gh::ProtectionActor) -> Option<String> {
    match actor {
        gh::ProtectionActor::Team { slug } => Some(format!("{}/{}", owner, slug)),
        gh::ProtectionActor::User { login } => Some(format!("/{}", login)),
        gh::ProtectionActor::App { slug } => Some(slug.clone()),
        gh::ProtectionActor::Unknown => None,
    }
}
