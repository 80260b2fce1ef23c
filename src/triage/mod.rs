//! Triage strategies
//!
//! A triage run looks at the bugs of one scope (a team or a source package)
//! that changed during a lookback window. Both strategies share the same
//! shape:
//!
//! 1. search tasks modified on or after [`TriageContext::threshold`]
//! 2. reduce the tasks to unique bug ids ([`tasks_to_bug_ids`])
//! 3. fetch each bug, in ascending id order
//!
//! [`TeamTriage`] additionally hides bugs that only touch packages on the
//! team's blacklist.

mod package;
mod team;

pub use package::PackageTriage;
pub use team::TeamTriage;

use crate::auth::Session;
use crate::bug::{bug_id_from_link, BugRecord};
use crate::config::Blacklist;
use crate::tracker::{TaskRef, Tracker};
use crate::{Result, TriageError};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;

/// Parameters fixed at the start of a triage run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageContext {
    date: NaiveDate,
    scope: String,
    anonymous: bool,
}

impl TriageContext {
    /// Context whose window ends today (local time)
    pub fn new(scope: impl Into<String>, days: u32, anonymous: bool) -> Result<Self> {
        Self::starting_from(Local::now().date_naive(), scope, days, anonymous)
    }

    /// Context whose window ends on `today`
    ///
    /// Fails when the window would start before the earliest representable
    /// date.
    pub fn starting_from(
        today: NaiveDate,
        scope: impl Into<String>,
        days: u32,
        anonymous: bool,
    ) -> Result<Self> {
        let date = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| TriageError::Config(format!("lookback of {} days is out of range", days)))?;

        Ok(Self {
            date,
            scope: scope.into(),
            anonymous,
        })
    }

    /// First day of the window (inclusive)
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// First day of the window as `YYYY-MM-DD`
    pub fn threshold(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }
}

/// What a run triages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Team,
    Package,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Team => write!(f, "team"),
            ScopeKind::Package => write!(f, "package"),
        }
    }
}

/// The two operations every triage mode provides
#[async_trait]
pub trait TriageStrategy: Send + Sync {
    fn context(&self) -> &TriageContext;

    /// Open tasks in scope, without any date filter
    async fn current_backlog_count(&self) -> Result<usize>;

    /// Bugs in scope updated since the threshold, ascending by id
    async fn updated_bugs(&self) -> Result<Vec<BugRecord>>;
}

/// Unique bug ids of `tasks`, sorted
///
/// Ids are compared as strings, so `"10"` sorts before `"3"`.
pub fn tasks_to_bug_ids(tasks: &[TaskRef]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| bug_id_from_link(&task.bug_link).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch bugs one at a time, in the given order
async fn fetch_bugs(tracker: &dyn Tracker, ids: &[String]) -> Result<Vec<BugRecord>> {
    let mut bugs = Vec::with_capacity(ids.len());
    for id in ids {
        bugs.push(tracker.bug(id).await?);
    }
    Ok(bugs)
}

/// Build the strategy for `kind`, resolving the scope through the session
pub async fn open(
    kind: ScopeKind,
    session: Session,
    context: TriageContext,
    blacklist: Blacklist,
) -> Result<Box<dyn TriageStrategy>> {
    match kind {
        ScopeKind::Team => Ok(Box::new(
            TeamTriage::connect(session, context, blacklist).await?,
        )),
        ScopeKind::Package => Ok(Box::new(PackageTriage::connect(session, context).await?)),
    }
}
