//! Triage of a single source package

use super::{fetch_bugs, tasks_to_bug_ids, TriageContext, TriageStrategy};
use crate::auth::Session;
use crate::bug::BugRecord;
use crate::tracker::{SourcePackage, TaskQuery, TaskTarget};
use crate::{Result, TriageError};
use async_trait::async_trait;
use tracing::{debug, error, info};

/// Triage of every task against one source package
///
/// No blacklist applies here: asking for a package means wanting its bugs.
pub struct PackageTriage {
    session: Session,
    context: TriageContext,
    package: Option<SourcePackage>,
}

impl PackageTriage {
    /// Resolve the package named by the context's scope
    ///
    /// An unknown package is not an error yet; it is reported when the
    /// package is first queried.
    pub async fn connect(session: Session, context: TriageContext) -> Result<Self> {
        debug!(package = %context.scope(), "finding bugs for package");
        let package = session.tracker().resolve_package(context.scope()).await?;

        Ok(Self {
            session,
            context,
            package,
        })
    }

    pub fn package(&self) -> Option<&SourcePackage> {
        self.package.as_ref()
    }

    fn resolved(&self) -> Result<&SourcePackage> {
        self.package.as_ref().ok_or_else(|| {
            error!("Oops: No package with that name exists");
            TriageError::PackageNotFound(self.context.scope().to_string())
        })
    }
}

#[async_trait]
impl TriageStrategy for PackageTriage {
    fn context(&self) -> &TriageContext {
        &self.context
    }

    async fn current_backlog_count(&self) -> Result<usize> {
        let package = self.resolved()?;
        self.session
            .tracker()
            .count_tasks(TaskTarget::Package(package), &TaskQuery::new())
            .await
    }

    async fn updated_bugs(&self) -> Result<Vec<BugRecord>> {
        let package = self.resolved()?;
        let query = TaskQuery::new().modified_since(self.context.threshold());
        let tasks = self
            .session
            .tracker()
            .search_tasks(TaskTarget::Package(package), &query)
            .await?;

        let ids = tasks_to_bug_ids(&tasks);
        let bugs = fetch_bugs(self.session.tracker(), &ids).await?;

        info!(
            package = %package.name,
            since = %self.context.threshold(),
            tasks = tasks.len(),
            bugs = bugs.len(),
            "Package triage complete"
        );
        Ok(bugs)
    }
}
