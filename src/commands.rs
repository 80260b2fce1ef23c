//! CLI definition

use crate::triage::ScopeKind;
use crate::view::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Triage Launchpad bugs of an Ubuntu team or source package
#[derive(Parser, Debug)]
#[command(name = "ubuntu-bug-triage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Team (or, with --package, source package) to triage
    #[arg(default_value = "ubuntu-server")]
    pub scope: String,

    /// Number of days back to look for updated bugs
    #[arg(default_value_t = 1)]
    pub days: u32,

    /// Treat the scope as a source package instead of a team
    #[arg(short, long)]
    pub package: bool,

    /// Log in anonymously (read-only, no stored credentials)
    #[arg(long)]
    pub anon: bool,

    /// Output in CSV format
    #[arg(long, conflicts_with = "json")]
    pub csv: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Open every bug found in the web browser
    #[arg(long)]
    pub open: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file (default: ~/.config/ubuntu-bug-triage/config.yaml)
    #[arg(short, long, env = "UBUNTU_BUG_TRIAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn scope_kind(&self) -> ScopeKind {
        if self.package {
            ScopeKind::Package
        } else {
            ScopeKind::Team
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}
