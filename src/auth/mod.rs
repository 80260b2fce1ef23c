//! Authentication against Launchpad
//!
//! A triage run logs in once and reuses the resulting [`Session`] for every
//! call. Two ways of logging in exist:
//!
//! - [`AnonymousLogin`]: no local state, read-only access to public bugs.
//! - [`CredentialFileLogin`]: OAuth credentials stored unencrypted in
//!   `~/.lp_creds`. When the file is missing the user is walked through
//!   Launchpad's authorization page once and the credentials are saved.

use crate::config::TriageConfig;
use crate::tracker::{LaunchpadTracker, Tracker};
use crate::{Result, TriageError};
use anyhow::Context;
use async_trait::async_trait;
use dialoguer::Confirm;
use launchpad::{Authorizer, Credentials, Launchpad};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Logged-in handle to the tracker, shared by everything in one run
#[derive(Clone)]
pub struct Session {
    tracker: Arc<dyn Tracker>,
    anonymous: bool,
}

impl Session {
    pub fn new(tracker: Arc<dyn Tracker>, anonymous: bool) -> Self {
        Self { tracker, anonymous }
    }

    pub fn tracker(&self) -> &dyn Tracker {
        self.tracker.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("anonymous", &self.anonymous)
            .finish_non_exhaustive()
    }
}

/// Produces the session a triage run works with
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self) -> Result<Session>;
}

/// Read-only access without credentials
pub struct AnonymousLogin {
    service_root: String,
    distribution: String,
}

impl AnonymousLogin {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            service_root: config.service_root.clone(),
            distribution: config.distribution.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for AnonymousLogin {
    async fn login(&self) -> Result<Session> {
        tracing::debug!("logging into Launchpad anonymously");
        let client = Launchpad::anonymous(&self.service_root)?;
        let tracker = LaunchpadTracker::new(client, self.distribution.clone());
        Ok(Session::new(Arc::new(tracker), true))
    }
}

/// Access with OAuth credentials kept in a file
pub struct CredentialFileLogin {
    service_root: String,
    web_root: String,
    distribution: String,
    consumer_key: String,
    credentials_path: PathBuf,
}

impl CredentialFileLogin {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            service_root: config.service_root.clone(),
            web_root: config.web_root.clone(),
            distribution: config.distribution.clone(),
            consumer_key: config.consumer_key.clone(),
            credentials_path: config.credentials_path.clone(),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    async fn credentials(&self) -> Result<Credentials> {
        if self.credentials_path.exists() {
            return Ok(Credentials::load(&self.credentials_path)?);
        }

        tracing::info!(
            path = %self.credentials_path.display(),
            "No stored credentials, starting Launchpad authorization"
        );
        let credentials = authorize_interactively(&self.web_root, &self.consumer_key).await?;
        credentials.save(&self.credentials_path)?;
        Ok(credentials)
    }
}

#[async_trait]
impl Authenticator for CredentialFileLogin {
    async fn login(&self) -> Result<Session> {
        tracing::debug!("logging into Launchpad");
        let credentials = self.credentials().await?;
        let client = Launchpad::with_credentials(&self.service_root, credentials)?;
        let tracker = LaunchpadTracker::new(client, self.distribution.clone());
        Ok(Session::new(Arc::new(tracker), false))
    }
}

/// Pick the login flavour for a run
pub fn authenticator_for(anonymous: bool, config: &TriageConfig) -> Box<dyn Authenticator> {
    if anonymous {
        Box::new(AnonymousLogin::new(config))
    } else {
        Box::new(CredentialFileLogin::new(config))
    }
}

/// Walk the user through Launchpad's authorization page
///
/// Prompts go to stderr so they never mix with CSV or JSON on stdout.
async fn authorize_interactively(web_root: &str, consumer_key: &str) -> Result<Credentials> {
    let authorizer = Authorizer::new(web_root, consumer_key)?;
    let request = authorizer.request_token().await?;
    let url = authorizer.authorize_url(&request);

    eprintln!();
    eprintln!("  ubuntu-bug-triage needs access to your Launchpad account.");
    eprintln!("  Please visit: \x1b[36m{}\x1b[0m", url);
    eprintln!();

    if let Err(e) = open::that(&url) {
        tracing::debug!("Failed to open browser: {}", e);
    }

    let confirmed = Confirm::new()
        .with_prompt("Have you authorized access in your browser?")
        .default(true)
        .interact()
        .context("Failed to read authorization confirmation")?;
    if !confirmed {
        return Err(TriageError::Auth("authorization cancelled".to_string()));
    }

    match authorizer.access_token(&request).await {
        Ok(credentials) => Ok(credentials),
        Err(launchpad::Error::Unauthorized(_)) => Err(TriageError::Auth(
            "Launchpad has not granted access; run again and authorize the request".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_anonymous_login() {
        let config = TriageConfig::new();
        let session = authenticator_for(true, &config).login().await.unwrap();
        assert!(session.is_anonymous());
    }

    #[tokio::test]
    async fn test_credential_file_login_reuses_stored_credentials() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lp_creds");
        Credentials::new("ubuntu-bug-triage", "tok", "sec")
            .save(&path)
            .unwrap();

        let mut config = TriageConfig::new();
        config.credentials_path = path;

        let session = authenticator_for(false, &config).login().await.unwrap();
        assert!(!session.is_anonymous());
    }

    #[tokio::test]
    async fn test_corrupt_credentials_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lp_creds");
        std::fs::write(&path, "garbage").unwrap();

        let mut config = TriageConfig::new();
        config.credentials_path = path;

        let err = authenticator_for(false, &config).login().await.unwrap_err();
        assert!(matches!(err, TriageError::Tracker(launchpad::Error::Credentials(_))));
    }

    #[test]
    fn test_credentials_path_from_config() {
        let config = TriageConfig::new();
        let login = CredentialFileLogin::new(&config);
        assert!(login.credentials_path().ends_with(".lp_creds"));
    }
}
