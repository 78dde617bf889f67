use crate::commands::open_session;
use crate::config::Config;
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use pulse_editor::Mutation;
use pulse_feeds::{hydrate_document, ProxyFetcher};
use std::path::Path;

#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Fetch and report without saving the issue
    #[arg(long)]
    pub dry_run: bool,
}

/// Re-fetch feed-backed blocks and store the new snapshots in the issue
pub fn refresh(args: RefreshArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(cwd, &config)?;
    let fetcher = ProxyFetcher::new(config.feed_proxy.clone(), config.feed_timeout())?;

    println!("{}", "📡 Refreshing feeds...".bright_blue().bold());
    let mut doc = session.document().clone();
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(hydrate_document(&mut doc, &fetcher, Utc::now()));
    tracing::debug!(
        refreshed = outcome.refreshed.len(),
        failed = outcome.failures.len(),
        "feed hydration finished"
    );

    for failure in &outcome.failures {
        eprintln!(
            "  {} {} - {}",
            "✗".red(),
            failure.url,
            failure.message.red()
        );
    }
    for id in &outcome.refreshed {
        let label = doc
            .block(id)
            .map(|b| b.block_type().label())
            .unwrap_or_default();
        println!("  {} {} {}", "✓".green(), label, id.dimmed());
    }

    println!();
    if !outcome.changed() {
        println!("{} No feed-backed block was refreshed", "⚠️".yellow());
        return Ok(());
    }
    if args.dry_run {
        println!("Dry run, {} left untouched", config.issue_file);
        return Ok(());
    }

    session.apply(&Mutation::Load {
        document: Box::new(doc),
    });
    session.save_now()?;
    println!(
        "{} Refreshed {} blocks, {} feeds skipped",
        "✅".green(),
        outcome.refreshed.len(),
        outcome.failures.len()
    );
    Ok(())
}
