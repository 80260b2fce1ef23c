//! OAuth access credentials and their on-disk store
//!
//! The store uses the same unencrypted INI layout as launchpadlib's
//! `UnencryptedFileCredentialStore`, so an existing `~/.lp_creds` keeps
//! working:
//!
//! ```text
//! [1]
//! consumer_key = ubuntu-bug-triage
//! consumer_secret =
//! access_token = ...
//! access_secret = ...
//! ```

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// OAuth 1.0 access credentials for one consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: String::new(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Load credentials from a credentials file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading Launchpad credentials");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the INI credentials format
    pub fn parse(content: &str) -> Result<Self> {
        let mut consumer_key = None;
        let mut consumer_secret = None;
        let mut access_token = None;
        let mut access_secret = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('[') || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::Credentials(format!("unexpected line: {}", line)));
            };
            let value = value.trim().to_string();
            match key.trim() {
                "consumer_key" => consumer_key = Some(value),
                "consumer_secret" => consumer_secret = Some(value),
                "access_token" => access_token = Some(value),
                "access_secret" => access_secret = Some(value),
                _ => {}
            }
        }

        let require = |field: Option<String>, name: &str| {
            field
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Credentials(format!("missing {}", name)))
        };

        Ok(Self {
            consumer_key: require(consumer_key, "consumer_key")?,
            consumer_secret: consumer_secret.unwrap_or_default(),
            access_token: require(access_token, "access_token")?,
            access_secret: require(access_secret, "access_secret")?,
        })
    }

    /// Render the INI credentials format
    pub fn to_ini(&self) -> String {
        format!(
            "[1]\nconsumer_key = {}\nconsumer_secret = {}\naccess_token = {}\naccess_secret = {}\n\n",
            self.consumer_key, self.consumer_secret, self.access_token, self.access_secret
        )
    }

    /// Write credentials to a file readable only by the current user
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(path = %path.display(), "Saving Launchpad credentials");
        fs::write(path, self.to_ini())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_launchpadlib_file() {
        let content = "[1]\nconsumer_key = ubuntu-bug-triage\nconsumer_secret = \naccess_token = tok\naccess_secret = sec\n\n";
        let creds = Credentials::parse(content).unwrap();
        assert_eq!(creds.consumer_key, "ubuntu-bug-triage");
        assert_eq!(creds.consumer_secret, "");
        assert_eq!(creds.access_token, "tok");
        assert_eq!(creds.access_secret, "sec");
    }

    #[test]
    fn test_parse_missing_token() {
        let content = "[1]\nconsumer_key = ubuntu-bug-triage\naccess_secret = sec\n";
        let err = Credentials::parse(content).unwrap_err();
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Credentials::parse("not an ini file").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds");

        let creds = Credentials::new("ubuntu-bug-triage", "tok", "sec");
        creds.save(&path).unwrap();

        let loaded = Credentials::load(&path).unwrap();
        assert_eq!(loaded, creds);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
