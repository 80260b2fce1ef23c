//! Launchpad web service client

use crate::oauth::authorization_header;
use crate::types::{Bug, BugTask, Collection, Person, SourcePackage};
use crate::{Credentials, Error, Result};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Per-request timeout for all web service calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters of the `searchTasks` named operation
///
/// Subscribers are given as the person's `self_link`, which is how the web
/// service expects entry references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTasks {
    pub modified_since: Option<String>,
    pub bug_subscriber: Option<String>,
    pub structural_subscriber: Option<String>,
}

impl SearchTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modified_since(mut self, date: impl Into<String>) -> Self {
        self.modified_since = Some(date.into());
        self
    }

    pub fn bug_subscriber(mut self, person_link: impl Into<String>) -> Self {
        self.bug_subscriber = Some(person_link.into());
        self
    }

    pub fn structural_subscriber(mut self, person_link: impl Into<String>) -> Self {
        self.structural_subscriber = Some(person_link.into());
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("ws.op", "searchTasks".to_string())];
        if let Some(ref date) = self.modified_since {
            query.push(("modified_since", date.clone()));
        }
        if let Some(ref link) = self.bug_subscriber {
            query.push(("bug_subscriber", link.clone()));
        }
        if let Some(ref link) = self.structural_subscriber {
            query.push(("structural_subscriber", link.clone()));
        }
        query
    }
}

/// Launchpad web service client
///
/// Anonymous clients can read public data only. Authenticated clients sign
/// every request with the stored OAuth credentials.
pub struct Launchpad {
    client: Client,
    service_root: String,
    realm: String,
    credentials: Option<Credentials>,
}

impl Launchpad {
    /// Create a read-only client that sends no credentials
    pub fn anonymous(service_root: &str) -> Result<Self> {
        Self::build(service_root, None)
    }

    /// Create a client that signs requests with `credentials`
    pub fn with_credentials(service_root: &str, credentials: Credentials) -> Result<Self> {
        Self::build(service_root, Some(credentials))
    }

    fn build(service_root: &str, credentials: Option<Credentials>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let service_root = format!("{}/", service_root.trim_end_matches('/'));
        let url = Url::parse(&service_root)
            .map_err(|e| Error::InvalidLink(format!("{}: {}", service_root, e)))?;
        let realm = format!("{}/", url.origin().ascii_serialization());

        Ok(Self {
            client,
            service_root,
            realm,
            credentials,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn service_root(&self) -> &str {
        &self.service_root
    }

    /// Absolute link for a resource path relative to the service root
    pub fn link(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.service_root, path.trim_start_matches('/'))
        }
    }

    /// Look up a person or team by name (`people[name]`)
    pub async fn person(&self, name: &str) -> Result<Person> {
        let url = self.link(&format!("~{}", name));
        debug!(name = %name, "Fetching Launchpad person");
        self.get(&url, &[]).await
    }

    /// Look up a source package in a distribution (`getSourcePackage`)
    ///
    /// Launchpad answers `null` for names it does not know, which is
    /// reported as `Ok(None)`.
    pub async fn source_package(
        &self,
        distribution: &str,
        name: &str,
    ) -> Result<Option<SourcePackage>> {
        let url = self.link(distribution);
        debug!(distribution = %distribution, name = %name, "Fetching source package");
        let query = [
            ("ws.op", "getSourcePackage".to_string()),
            ("name", name.to_string()),
        ];
        self.get(&url, &query).await
    }

    /// Run `searchTasks` on a target (distribution or source package) and
    /// collect every page
    pub async fn search_tasks(&self, target_link: &str, search: &SearchTasks) -> Result<Vec<BugTask>> {
        let url = self.link(target_link);
        debug!(target = %url, ?search, "Searching bug tasks");

        let first: Collection<BugTask> = self.get(&url, &search.to_query()).await?;
        let tasks = self.collect_pages(first).await?;

        info!(target = %url, returned = tasks.len(), "Bug task search complete");
        Ok(tasks)
    }

    /// Number of tasks `searchTasks` would return
    pub async fn count_tasks(&self, target_link: &str, search: &SearchTasks) -> Result<usize> {
        let url = self.link(target_link);
        debug!(target = %url, ?search, "Counting bug tasks");

        let first: Collection<BugTask> = self.get(&url, &search.to_query()).await?;
        if let Some(total) = first.total_size {
            return Ok(total);
        }
        if let Some(ref link) = first.total_size_link {
            return self.get(link, &[]).await;
        }

        Ok(self.collect_pages(first).await?.len())
    }

    /// Look up a bug by id (`bugs[id]`)
    pub async fn bug(&self, id: &str) -> Result<Bug> {
        let url = self.link(&format!("bugs/{}", id));
        debug!(bug_id = %id, "Fetching bug");
        self.get(&url, &[]).await
    }

    /// Every task of a bug, in Launchpad's order
    pub async fn bug_tasks(&self, bug: &Bug) -> Result<Vec<BugTask>> {
        let first: Collection<BugTask> = self.get(&bug.bug_tasks_collection_link, &[]).await?;
        self.collect_pages(first).await
    }

    async fn collect_pages<T: DeserializeOwned>(&self, first: Collection<T>) -> Result<Vec<T>> {
        let mut entries = first.entries;
        let mut next = first.next_collection_link;

        while let Some(link) = next {
            let page: Collection<T> = self.get(&link, &[]).await?;
            entries.extend(page.entries);
            next = page.next_collection_link;
        }

        Ok(entries)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref credentials) = self.credentials {
            request = request.header("Authorization", authorization_header(credentials, &self.realm));
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(Error::NotFound(url.to_string())),
            StatusCode::UNAUTHORIZED => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Unauthorized(body))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
