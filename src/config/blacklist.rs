//! Per-team exclusion lists
//!
//! Some teams are structurally subscribed to packages whose bugs they do not
//! want to see (another team triages them). A team's blacklist names those
//! source packages.

use crate::bug::BugRecord;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping of team name to the source packages it does not want surfaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a team's entry
    pub fn with_entry<I, S>(mut self, team: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(team.into(), packages.into_iter().map(Into::into).collect());
        self
    }

    pub fn entry(&self, team: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(team)
    }

    pub fn has_entry(&self, team: &str) -> bool {
        self.entries.contains_key(team)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `bug` is hidden from `team`
    ///
    /// True only when the team has an entry and every task of the bug is
    /// against a listed source package. A task without a source package is
    /// never listed, so it keeps the bug visible.
    pub fn suppresses(&self, team: &str, bug: &BugRecord) -> bool {
        let Some(packages) = self.entry(team) else {
            return false;
        };

        bug.tasks().iter().all(|task| {
            task.src_pkg
                .as_deref()
                .is_some_and(|pkg| packages.contains(pkg))
        })
    }
}

/// A blacklist entry as written in the config file
///
/// Anything that is not a list of package names is ignored.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Packages(Vec<String>),
    Malformed(IgnoredAny),
}

impl From<BTreeMap<String, RawEntry>> for Blacklist {
    fn from(raw: BTreeMap<String, RawEntry>) -> Self {
        let mut entries = BTreeMap::new();
        for (team, entry) in raw {
            match entry {
                RawEntry::Packages(packages) => {
                    entries.insert(team, packages.into_iter().collect());
                }
                RawEntry::Malformed(_) => {
                    tracing::warn!(team = %team, "Ignoring malformed blacklist entry");
                }
            }
        }
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for Blacklist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawEntry>::deserialize(deserializer)?;
        Ok(raw.into())
    }
}

impl Serialize for Blacklist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bug::AffectedTask;

    fn bug(packages: &[Option<&str>]) -> BugRecord {
        let tasks = packages
            .iter()
            .map(|pkg| {
                let name = pkg.unwrap_or("some-project");
                AffectedTask::new(pkg.map(String::from), format!("{} (Ubuntu)", name), "bugs/1")
            })
            .collect();
        BugRecord::new("1", "title", tasks)
    }

    fn foo_blacklist() -> Blacklist {
        Blacklist::new().with_entry("foo", ["pkgA", "pkgB"])
    }

    #[test]
    fn test_all_tasks_blacklisted_is_suppressed() {
        let blacklist = foo_blacklist();
        assert!(blacklist.suppresses("foo", &bug(&[Some("pkgA"), Some("pkgB")])));
        assert!(blacklist.suppresses("foo", &bug(&[Some("pkgA")])));
    }

    #[test]
    fn test_one_visible_task_keeps_bug() {
        let blacklist = foo_blacklist();
        assert!(!blacklist.suppresses("foo", &bug(&[Some("pkgA"), Some("pkgC")])));
    }

    #[test]
    fn test_task_without_package_keeps_bug() {
        let blacklist = foo_blacklist();
        assert!(!blacklist.suppresses("foo", &bug(&[Some("pkgA"), None])));
    }

    #[test]
    fn test_team_without_entry_suppresses_nothing() {
        let blacklist = foo_blacklist();
        assert!(!blacklist.suppresses("bar", &bug(&[Some("pkgA"), Some("pkgB")])));
        assert!(!Blacklist::new().suppresses("foo", &bug(&[Some("pkgA")])));
    }

    #[test]
    fn test_deserialize_skips_malformed_entries() {
        let yaml = "foo: [pkgA, pkgB]\nbar: not-a-list\nbaz: {nested: true}\n";
        let blacklist: Blacklist = serde_yaml::from_str(yaml).unwrap();

        assert!(blacklist.has_entry("foo"));
        assert!(!blacklist.has_entry("bar"));
        assert!(!blacklist.has_entry("baz"));
        assert_eq!(blacklist.entry("foo").unwrap().len(), 2);
    }

    #[test]
    fn test_serialize_round_trip() {
        let blacklist = foo_blacklist();
        let yaml = serde_yaml::to_string(&blacklist).unwrap();
        assert!(yaml.contains("foo:"));

        let loaded: Blacklist = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded, blacklist);
    }
}
