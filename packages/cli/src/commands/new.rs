use crate::config::Config;
use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use pulse_schema::{Newsletter, UuidIds};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Issue title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Issue number, e.g. 042
    #[arg(short, long)]
    pub issue: Option<String>,

    /// Start without the default sections
    #[arg(long)]
    pub empty: bool,

    /// Replace an existing issue file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let issue_path = config.issue_path(cwd);

    if issue_path.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to replace it, or `pulse versions save` to keep a copy first.",
            issue_path.display()
        );
    }

    let mut doc = if args.empty {
        Newsletter::empty(&mut UuidIds, Utc::now())
    } else {
        Newsletter::with_defaults(&mut UuidIds, Utc::now())
    };
    if let Some(title) = args.title {
        doc.meta.title = title;
    }
    if let Some(issue) = args.issue {
        doc.meta.issue_number = issue;
    }

    if let Some(parent) = issue_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&issue_path, doc.to_json_pretty()?)?;

    println!(
        "{} Created {} - {} ({} blocks)",
        "✓".green(),
        config.issue_file,
        doc.meta.title.bright_white(),
        doc.block_order.len()
    );
    Ok(())
}
