//! ubuntu-bug-triage - Triage Launchpad bugs
//!
//! Main entry point for the ubuntu-bug-triage CLI.

use clap::Parser;
use std::process;
use ubuntu_bug_triage::auth;
use ubuntu_bug_triage::bug::BugRecord;
use ubuntu_bug_triage::commands::Cli;
use ubuntu_bug_triage::config::TriageConfig;
use ubuntu_bug_triage::triage::{self, TriageContext, TriageStrategy};
use ubuntu_bug_triage::view::{self, OutputFormat};
use ubuntu_bug_triage::TriageError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = ubuntu_bug_triage::logging::init(cli.debug) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => {}
        // Already reported by the package strategy
        Err(TriageError::PackageNotFound(_)) => process::exit(1),
        Err(e) => {
            tracing::debug!(error = ?e, "Triage run failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> ubuntu_bug_triage::Result<()> {
    let config = match cli.config {
        Some(ref path) => TriageConfig::load(path)?,
        None => TriageConfig::load_default(),
    };

    let context = TriageContext::new(cli.scope.clone(), cli.days, cli.anon)?;
    tracing::debug!(
        scope = %context.scope(),
        kind = %cli.scope_kind(),
        since = %context.threshold(),
        "Starting triage"
    );

    let session = auth::authenticator_for(context.anonymous(), &config)
        .login()
        .await?;
    let strategy = triage::open(cli.scope_kind(), session, context, config.blacklist.clone()).await?;

    let bugs = strategy.updated_bugs().await?;
    let format = cli.output_format();
    print!("{}", view::render(format, &bugs, view::terminal_columns())?);

    if format == OutputFormat::Table {
        print_summary(strategy.as_ref(), &bugs).await?;
    }

    if cli.open {
        open_in_browser(&bugs, &config.bug_web_root()?);
    }

    Ok(())
}

async fn print_summary(strategy: &dyn TriageStrategy, bugs: &[BugRecord]) -> ubuntu_bug_triage::Result<()> {
    let backlog = strategy.current_backlog_count().await?;
    println!(
        "Found {} updated bug(s) since {} (current backlog: {})",
        bugs.len(),
        strategy.context().threshold(),
        backlog
    );
    Ok(())
}

fn open_in_browser(bugs: &[BugRecord], bug_web_root: &str) {
    for bug in bugs {
        let link = bug.web_link(bug_web_root);
        if let Err(e) = open::that(&link) {
            tracing::warn!(bug_id = %bug.id(), error = %e, "Failed to open bug in browser");
        }
    }
}
