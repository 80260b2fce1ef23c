//! Remote tracker boundary
//!
//! The triage strategies talk to the bug tracker only through the
//! [`Tracker`] trait. [`LaunchpadTracker`] is the production implementation;
//! tests substitute an in-memory one.

mod launchpad_tracker;

pub use launchpad_tracker::LaunchpadTracker;

use crate::bug::BugRecord;
use crate::Result;
use async_trait::async_trait;

/// A resolved team (or person)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub link: String,
}

/// A resolved source package of the triaged distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePackage {
    pub name: String,
    pub link: String,
}

/// One row of a task search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub bug_link: String,
    pub bug_target_name: String,
}

impl TaskRef {
    pub fn new(bug_link: impl Into<String>, bug_target_name: impl Into<String>) -> Self {
        Self {
            bug_link: bug_link.into(),
            bug_target_name: bug_target_name.into(),
        }
    }
}

/// What a task search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTarget<'a> {
    /// Every task of the distribution
    Distribution,
    /// Tasks of one source package
    Package(&'a SourcePackage),
}

/// Filters of a task search
///
/// `modified_since` is an inclusive `YYYY-MM-DD` lower bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub modified_since: Option<String>,
    pub bug_subscriber: Option<Team>,
    pub structural_subscriber: Option<Team>,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modified_since(mut self, date: impl Into<String>) -> Self {
        self.modified_since = Some(date.into());
        self
    }

    pub fn bug_subscriber(mut self, team: &Team) -> Self {
        self.bug_subscriber = Some(team.clone());
        self
    }

    pub fn structural_subscriber(mut self, team: &Team) -> Self {
        self.structural_subscriber = Some(team.clone());
        self
    }
}

/// Capabilities the triage core needs from the bug tracker
///
/// Calls are awaited one at a time; implementations need not be reentrant
/// beyond `Send + Sync`.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Resolve a team by name; a missing team is `TeamNotFound`
    async fn team(&self, name: &str) -> Result<Team>;

    /// Resolve a source package by name; `None` when it does not exist
    async fn resolve_package(&self, name: &str) -> Result<Option<SourcePackage>>;

    /// Open tasks on `target` matching `query`
    async fn search_tasks(&self, target: TaskTarget<'_>, query: &TaskQuery) -> Result<Vec<TaskRef>>;

    /// Number of tasks `search_tasks` would return
    async fn count_tasks(&self, target: TaskTarget<'_>, query: &TaskQuery) -> Result<usize> {
        Ok(self.search_tasks(target, query).await?.len())
    }

    /// Fetch a bug with its full task list
    async fn bug(&self, id: &str) -> Result<BugRecord>;
}
