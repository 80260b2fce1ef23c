//! Normalized view of a Launchpad bug
//!
//! A [`BugRecord`] is built once per unique bug id found during a search and
//! never changes afterwards.

use serde::{Deserialize, Serialize};

/// Id of the bug owning a task: the last path segment of its bug link
pub fn bug_id_from_link(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

/// One task of a bug: the bug as it affects one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedTask {
    /// Source package name; `None` for non-distribution tasks (projects)
    pub src_pkg: Option<String>,
    /// Display string, e.g. `"cloud-init (Ubuntu)"`
    pub bug_target_name: String,
    pub bug_link: String,
}

impl AffectedTask {
    pub fn new(
        src_pkg: Option<String>,
        bug_target_name: impl Into<String>,
        bug_link: impl Into<String>,
    ) -> Self {
        Self {
            src_pkg,
            bug_target_name: bug_target_name.into(),
            bug_link: bug_link.into(),
        }
    }

    pub fn bug_id(&self) -> &str {
        bug_id_from_link(&self.bug_link)
    }
}

/// A bug and every task it has
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugRecord {
    id: String,
    title: String,
    tasks: Vec<AffectedTask>,
}

impl BugRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tasks: Vec<AffectedTask>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tasks(&self) -> &[AffectedTask] {
        &self.tasks
    }

    /// Display string of every task, in task order
    pub fn affects(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .map(|t| t.bug_target_name.as_str())
            .collect()
    }

    /// Web page of the bug under `bug_web_root`
    /// (e.g. [`launchpad::BUG_WEB_ROOT`])
    pub fn web_link(&self, bug_web_root: &str) -> String {
        format!("{}/{}", bug_web_root.trim_end_matches('/'), self.id)
    }

    pub fn to_summary(&self) -> BugSummary {
        BugSummary {
            id: self.id.clone(),
            affects: self.affects().into_iter().map(String::from).collect(),
            title: self.title.clone(),
        }
    }
}

/// Serialized shape of a bug in JSON output
///
/// Field names and order are part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugSummary {
    pub id: String,
    pub affects: Vec<String>,
    pub title: String,
}
