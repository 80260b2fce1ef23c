//! Launchpad REST API client for Rust
//!
//! A small, typed, async interface to the parts of the Launchpad web service
//! needed to triage bugs: task search, bug lookup, people/team lookup and
//! source package lookup, plus the OAuth 1.0 PLAINTEXT handshake used to
//! obtain credentials.
//!
//! # Example
//!
//! ```no_run
//! use launchpad::{Launchpad, SearchTasks, PRODUCTION_SERVICE_ROOT};
//!
//! # async fn demo() -> launchpad::Result<()> {
//! let lp = Launchpad::anonymous(PRODUCTION_SERVICE_ROOT)?;
//!
//! let team = lp.person("ubuntu-server").await?;
//! let query = SearchTasks::new()
//!     .modified_since("2024-01-01")
//!     .structural_subscriber(&team.self_link);
//! let tasks = lp.search_tasks(&lp.link("ubuntu"), &query).await?;
//!
//! for task in &tasks {
//!     println!("{} {}", task.bug_id(), task.bug_target_name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod credentials;
mod oauth;
mod types;

pub use client::{Launchpad, SearchTasks};
pub use credentials::Credentials;
pub use oauth::{Authorizer, RequestToken};
pub use types::{Bug, BugTask, Collection, Person, SourcePackage};

use thiserror::Error;

/// Service root of the production Launchpad web service (devel API)
pub const PRODUCTION_SERVICE_ROOT: &str = "https://api.launchpad.net/devel/";

/// Root of the production Launchpad website, used for authorization
pub const PRODUCTION_WEB_ROOT: &str = "https://launchpad.net";

/// Root of the production bug pages
pub const BUG_WEB_ROOT: &str = "https://bugs.launchpad.net/bugs";

/// Errors that can occur when talking to Launchpad
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Launchpad rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Launchpad API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid credentials file: {0}")]
    Credentials(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Launchpad operations
pub type Result<T> = std::result::Result<T, Error>;

/// Root of the bug pages for the Launchpad site at `web_root`
///
/// Bug pages live on the `bugs.` subdomain, so `https://qastaging.launchpad.net`
/// maps to `https://bugs.qastaging.launchpad.net/bugs`.
pub fn bug_web_root(web_root: &str) -> Result<String> {
    let url = reqwest::Url::parse(web_root)
        .map_err(|e| Error::InvalidLink(format!("{}: {}", web_root, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidLink(web_root.to_string()))?;
    let host = if host.starts_with("bugs.") {
        host.to_string()
    } else {
        format!("bugs.{}", host)
    };
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();

    Ok(format!("{}://{}{}/bugs", url.scheme(), host, port))
}
