//! ubuntu-bug-triage - Triage Launchpad bugs for an Ubuntu team or package
//!
//! Finds the bugs of a team (or a single source package) that changed
//! during the last few days, hides the ones a team has opted out of, and
//! renders them as a table, CSV or JSON.
//!
//! # Architecture
//!
//! - **tracker**: the remote tracker boundary (Launchpad adapter)
//! - **auth**: anonymous and stored-credential logins
//! - **triage**: team and package strategies
//! - **config**: configuration file and per-team blacklists
//! - **view**: table, CSV and JSON renderers

// Core modules
pub mod bug;
pub mod config;
pub mod error;
pub mod tracker;
pub mod triage;

// Components
pub mod auth;
pub mod commands;
pub mod logging;
pub mod view;

// Re-exports
pub use error::{Result, TriageError};
