//! Wire representations of Launchpad entries and collections

use serde::{Deserialize, Serialize};

/// A page of a Launchpad collection
///
/// Large collections are split across pages linked by
/// `next_collection_link`. Launchpad reports the size either inline
/// (`total_size`) or, for expensive queries, behind `total_size_link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default)]
    pub total_size: Option<usize>,
    #[serde(default)]
    pub total_size_link: Option<String>,
    #[serde(default)]
    pub start: usize,
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    #[serde(default)]
    pub next_collection_link: Option<String>,
}

/// A person or team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub self_link: String,
    #[serde(default)]
    pub is_team: bool,
}

/// A source package within a distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePackage {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub self_link: String,
}

/// A bug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    pub id: u64,
    pub title: String,
    pub self_link: String,
    pub bug_tasks_collection_link: String,
    #[serde(default)]
    pub date_last_updated: Option<String>,
}

/// A bug task: one bug as it affects one target (package, project, series)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugTask {
    pub bug_link: String,
    pub bug_target_name: String,
    #[serde(default)]
    pub target_link: Option<String>,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub date_last_updated: Option<String>,
}

impl BugTask {
    /// Id of the owning bug: the last path segment of `bug_link`
    pub fn bug_id(&self) -> &str {
        self.bug_link.rsplit('/').next().unwrap_or(&self.bug_link)
    }

    /// Source package name when the task targets a distribution package
    ///
    /// Distribution tasks target `.../<distro>/+source/<name>` (or the
    /// series variant `.../<distro>/<series>/+source/<name>`). Project
    /// tasks have no source package.
    pub fn source_package_name(&self) -> Option<&str> {
        let link = self.target_link.as_deref()?;
        let (_, rest) = link.split_once("/+source/")?;
        let name = rest.split('/').next()?;
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(bug_link: &str, target_link: Option<&str>) -> BugTask {
        BugTask {
            bug_link: bug_link.to_string(),
            bug_target_name: "foo (Ubuntu)".to_string(),
            target_link: target_link.map(String::from),
            self_link: None,
            status: None,
            importance: None,
            date_last_updated: None,
        }
    }

    #[test]
    fn test_bug_id_is_last_segment() {
        let t = task("https://api.launchpad.net/devel/bugs/1234567", None);
        assert_eq!(t.bug_id(), "1234567");

        let t = task("1234567", None);
        assert_eq!(t.bug_id(), "1234567");
    }

    #[test]
    fn test_source_package_name() {
        let t = task(
            "https://api.launchpad.net/devel/bugs/1",
            Some("https://api.launchpad.net/devel/ubuntu/+source/cloud-init"),
        );
        assert_eq!(t.source_package_name(), Some("cloud-init"));

        let series = task(
            "https://api.launchpad.net/devel/bugs/1",
            Some("https://api.launchpad.net/devel/ubuntu/jammy/+source/lxd"),
        );
        assert_eq!(series.source_package_name(), Some("lxd"));

        let project = task(
            "https://api.launchpad.net/devel/bugs/1",
            Some("https://api.launchpad.net/devel/cloud-init"),
        );
        assert_eq!(project.source_package_name(), None);

        let untargeted = task("https://api.launchpad.net/devel/bugs/1", None);
        assert_eq!(untargeted.source_package_name(), None);
    }

    #[test]
    fn test_collection_defaults() {
        let page: Collection<BugTask> = serde_json::from_str(r#"{"start": 0}"#).unwrap();
        assert!(page.entries.is_empty());
        assert!(page.total_size.is_none());
        assert!(page.next_collection_link.is_none());
    }
}
