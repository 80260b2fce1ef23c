//! Configuration system
//!
//! Loads ~/.config/ubuntu-bug-triage/config.yaml with support for:
//! - Alternative Launchpad instances (service and web roots)
//! - The triaged distribution
//! - Credential file location
//! - Per-team blacklists

mod blacklist;
mod triage_config;

pub use blacklist::Blacklist;
pub use triage_config::{TriageConfig, APP_NAME};
