use crate::commands::open_session;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    #[command(subcommand)]
    pub command: VersionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum VersionsCommand {
    /// Keep the current issue as a named version
    Save { label: String },

    /// List saved versions, newest first
    List,

    /// Replace the issue with a saved version
    Restore { id: String },
}

pub fn versions(args: VersionsArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(cwd, &config)?;

    match args.command {
        VersionsCommand::Save { label } => {
            let version = session.save_version(&label)?;
            println!(
                "{} Saved {} {}",
                "✓".green(),
                version.label.bright_white(),
                version.id.dimmed()
            );
        }
        VersionsCommand::List => {
            if session.versions().is_empty() {
                println!("No saved versions");
            }
            for version in session.versions() {
                println!(
                    "  {}  {:<32} {}  {} blocks",
                    version.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    version.label.bright_white(),
                    version.id.dimmed(),
                    version.newsletter.block_order.len()
                );
            }
        }
        VersionsCommand::Restore { id } => {
            session.restore_version(&id)?;
            session.save_now()?;
            println!(
                "{} Restored {} into {}",
                "✓".green(),
                id,
                config.issue_file
            );
        }
    }
    Ok(())
}
