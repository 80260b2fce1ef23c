//! Launchpad implementation of the tracker boundary

use super::{SourcePackage, TaskQuery, TaskRef, TaskTarget, Team, Tracker};
use crate::bug::{AffectedTask, BugRecord};
use crate::{Result, TriageError};
use async_trait::async_trait;
use launchpad::{Launchpad, SearchTasks};
use tracing::debug;

/// Tracker backed by the Launchpad web service, scoped to one distribution
pub struct LaunchpadTracker {
    client: Launchpad,
    distribution: String,
    distribution_link: String,
}

impl LaunchpadTracker {
    pub fn new(client: Launchpad, distribution: impl Into<String>) -> Self {
        let distribution = distribution.into();
        let distribution_link = client.link(&distribution);
        Self {
            client,
            distribution,
            distribution_link,
        }
    }

    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    fn search_params(query: &TaskQuery) -> SearchTasks {
        let mut search = SearchTasks::new();
        if let Some(ref date) = query.modified_since {
            search = search.modified_since(date.as_str());
        }
        if let Some(ref team) = query.bug_subscriber {
            search = search.bug_subscriber(team.link.as_str());
        }
        if let Some(ref team) = query.structural_subscriber {
            search = search.structural_subscriber(team.link.as_str());
        }
        search
    }

    fn target_link<'a>(&'a self, target: TaskTarget<'a>) -> &'a str {
        match target {
            TaskTarget::Distribution => &self.distribution_link,
            TaskTarget::Package(package) => &package.link,
        }
    }
}

#[async_trait]
impl Tracker for LaunchpadTracker {
    async fn team(&self, name: &str) -> Result<Team> {
        match self.client.person(name).await {
            Ok(person) => Ok(Team {
                name: person.name,
                link: person.self_link,
            }),
            Err(launchpad::Error::NotFound(_)) => Err(TriageError::TeamNotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_package(&self, name: &str) -> Result<Option<SourcePackage>> {
        let package = self.client.source_package(&self.distribution, name).await?;
        Ok(package.map(|p| SourcePackage {
            name: p.name,
            link: p.self_link,
        }))
    }

    async fn search_tasks(&self, target: TaskTarget<'_>, query: &TaskQuery) -> Result<Vec<TaskRef>> {
        let tasks = self
            .client
            .search_tasks(self.target_link(target), &Self::search_params(query))
            .await?;

        Ok(tasks
            .into_iter()
            .map(|t| TaskRef::new(t.bug_link, t.bug_target_name))
            .collect())
    }

    async fn count_tasks(&self, target: TaskTarget<'_>, query: &TaskQuery) -> Result<usize> {
        Ok(self
            .client
            .count_tasks(self.target_link(target), &Self::search_params(query))
            .await?)
    }

    async fn bug(&self, id: &str) -> Result<BugRecord> {
        let bug = self.client.bug(id).await?;
        let tasks: Vec<AffectedTask> = self
            .client
            .bug_tasks(&bug)
            .await?
            .into_iter()
            .map(|t| {
                AffectedTask::new(
                    t.source_package_name().map(String::from),
                    t.bug_target_name.clone(),
                    t.bug_link.clone(),
                )
            })
            .collect();

        if tasks.is_empty() {
            return Err(TriageError::Other(format!("bug {} has no tasks", id)));
        }

        debug!(bug_id = %id, tasks = tasks.len(), "Fetched bug");
        Ok(BugRecord::new(bug.id.to_string(), bug.title, tasks))
    }
}
