//! ubuntu-bug-triage configuration file handling
//!
//! Loads the optional ~/.config/ubuntu-bug-triage/config.yaml file. Every
//! field has a default, so the tool runs without one.

use super::blacklist::Blacklist;
use crate::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for the config directory and as OAuth consumer key
pub const APP_NAME: &str = "ubuntu-bug-triage";

fn default_service_root() -> String {
    launchpad::PRODUCTION_SERVICE_ROOT.to_string()
}

fn default_web_root() -> String {
    launchpad::PRODUCTION_WEB_ROOT.to_string()
}

fn default_distribution() -> String {
    "ubuntu".to_string()
}

fn default_consumer_key() -> String {
    APP_NAME.to_string()
}

fn default_credentials_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".lp_creds");
    path
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// ubuntu-bug-triage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Launchpad web service root
    #[serde(default = "default_service_root")]
    pub service_root: String,

    /// Launchpad website root, used for the authorization handshake
    #[serde(default = "default_web_root")]
    pub web_root: String,

    /// Distribution whose bugs are triaged
    #[serde(default = "default_distribution")]
    pub distribution: String,

    /// OAuth consumer key presented to Launchpad
    #[serde(default = "default_consumer_key")]
    pub consumer_key: String,

    /// Stored OAuth credentials (unencrypted)
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Packages each team does not want surfaced
    #[serde(default)]
    pub blacklist: Blacklist,
}

impl TriageConfig {
    pub fn new() -> Self {
        Self {
            service_root: default_service_root(),
            web_root: default_web_root(),
            distribution: default_distribution(),
            consumer_key: default_consumer_key(),
            credentials_path: default_credentials_path(),
            blacklist: Blacklist::default(),
        }
    }

    /// Load the default config file, falling back to defaults
    ///
    /// A missing file is normal. A file that cannot be read or parsed is
    /// reported at warn level and ignored.
    pub fn load_default() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::new();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                Self::new()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::TriageError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading configuration");

        let content = fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content)?;
        config.credentials_path = expand_home(&config.credentials_path);

        tracing::debug!(
            distribution = %config.distribution,
            blacklisted_teams = config.blacklist.teams().count(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Root of the bug pages on the configured site
    pub fn bug_web_root(&self) -> Result<String> {
        launchpad::bug_web_root(&self.web_root)
            .map_err(|e| TriageError::Config(format!("web_root: {}", e)))
    }

    /// Get the default config path (~/.config/ubuntu-bug-triage/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push(APP_NAME);
        path.push("config.yaml");
        path
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self::new()
    }
}
