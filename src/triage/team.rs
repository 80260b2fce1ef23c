//! Triage of the bugs a team is subscribed to

use super::{fetch_bugs, tasks_to_bug_ids, TriageContext, TriageStrategy};
use crate::auth::Session;
use crate::bug::BugRecord;
use crate::config::Blacklist;
use crate::tracker::{TaskQuery, TaskTarget, Team};
use crate::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Distribution-wide triage for one team
pub struct TeamTriage {
    session: Session,
    context: TriageContext,
    team: Team,
    blacklist: Blacklist,
}

impl TeamTriage {
    /// Resolve the team named by the context's scope
    ///
    /// Fails with `TeamNotFound` when the team does not exist.
    pub async fn connect(session: Session, context: TriageContext, blacklist: Blacklist) -> Result<Self> {
        debug!(team = %context.scope(), "finding bugs for team");
        let team = session.tracker().team(context.scope()).await?;

        Ok(Self {
            session,
            context,
            team,
            blacklist,
        })
    }

    pub fn team(&self) -> &Team {
        &self.team
    }
}

#[async_trait]
impl TriageStrategy for TeamTriage {
    fn context(&self) -> &TriageContext {
        &self.context
    }

    async fn current_backlog_count(&self) -> Result<usize> {
        let query = TaskQuery::new().bug_subscriber(&self.team);
        self.session
            .tracker()
            .count_tasks(TaskTarget::Distribution, &query)
            .await
    }

    async fn updated_bugs(&self) -> Result<Vec<BugRecord>> {
        let query = TaskQuery::new()
            .modified_since(self.context.threshold())
            .structural_subscriber(&self.team);
        let tasks = self
            .session
            .tracker()
            .search_tasks(TaskTarget::Distribution, &query)
            .await?;

        let ids = tasks_to_bug_ids(&tasks);
        let fetched = fetch_bugs(self.session.tracker(), &ids).await?;

        let bugs: Vec<BugRecord> = fetched
            .into_iter()
            .filter(|bug| {
                let hidden = self.blacklist.suppresses(&self.team.name, bug);
                if hidden {
                    debug!(bug_id = %bug.id(), team = %self.team.name, "skipping bug");
                }
                !hidden
            })
            .collect();

        info!(
            team = %self.team.name,
            since = %self.context.threshold(),
            tasks = tasks.len(),
            bugs = bugs.len(),
            "Team triage complete"
        );
        Ok(bugs)
    }
}
