//! Commands that apply one mutation to the issue file.

use crate::commands::open_session;
use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use pulse_editor::{EditSession, Mutation, Patch};
use pulse_schema::{presets, BlockType, Newsletter, Theme};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Block type tag, see `pulse blocks`
    pub block_type: BlockType,

    /// Insert after this block instead of at the end
    #[arg(short, long)]
    pub after: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Current position (0-based)
    pub from: usize,
    /// New position (0-based)
    pub to: usize,
}

#[derive(Debug, Args)]
pub struct DuplicateArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Preset id; lists the presets when omitted
    pub preset: Option<String>,
}

#[derive(Debug, Args)]
pub struct MetaArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    /// Issue number, e.g. 042
    #[arg(short, long)]
    pub issue: Option<String>,
}

/// Open the session, apply `mutation`, save the issue
fn commit(
    cwd: &Path,
    check: impl FnOnce(&Newsletter) -> Result<()>,
    mutation: Mutation,
) -> Result<EditSession> {
    let config = Config::load(cwd)?;
    let mut session = open_session(cwd, &config)?;
    check(session.document())?;
    session.apply(&mutation);
    session.save_now()?;
    Ok(session)
}

fn require_block(doc: &Newsletter, id: &str) -> Result<()> {
    match doc.block(id) {
        Some(_) => Ok(()),
        None => bail!("No block with id {}. See `pulse blocks --current`.", id),
    }
}

pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let mut before = Vec::new();
    let session = commit(
        cwd,
        |doc| {
            before = doc.block_order.clone();
            if let Some(after) = &args.after {
                if doc.block(after).is_none() {
                    println!("{} No block {}, appending at the end", "⚠️".yellow(), after);
                }
            }
            Ok(())
        },
        Mutation::AddBlock {
            block_type: args.block_type,
            after_id: args.after.clone(),
        },
    )?;

    let doc = session.document();
    let (index, id) = doc
        .block_order
        .iter()
        .enumerate()
        .find(|(_, id)| !before.contains(id))
        .ok_or_else(|| anyhow!("Block was not added"))?;
    println!(
        "{} Added {} {} at position {}",
        "✓".green(),
        args.block_type.label(),
        id.dimmed(),
        index
    );
    Ok(())
}

pub fn remove(args: RemoveArgs, cwd: &Path) -> Result<()> {
    commit(
        cwd,
        |doc| require_block(doc, &args.id),
        Mutation::DeleteBlock { id: args.id.clone() },
    )?;
    println!("{} Removed {}", "✓".green(), args.id);
    Ok(())
}

pub fn move_block(args: MoveArgs, cwd: &Path) -> Result<()> {
    commit(
        cwd,
        |doc| {
            let len = doc.block_order.len();
            if args.from >= len || args.to >= len {
                bail!("Positions must be below {} (the issue has {} blocks)", len, len);
            }
            Ok(())
        },
        Mutation::MoveBlock {
            from: args.from,
            to: args.to,
        },
    )?;
    println!("{} Moved block {} → {}", "✓".green(), args.from, args.to);
    Ok(())
}

pub fn duplicate(args: DuplicateArgs, cwd: &Path) -> Result<()> {
    let session = commit(
        cwd,
        |doc| require_block(doc, &args.id),
        Mutation::DuplicateBlock { id: args.id.clone() },
    )?;

    let doc = session.document();
    let copy = doc
        .index_of(&args.id)
        .and_then(|i| doc.block_order.get(i + 1))
        .ok_or_else(|| anyhow!("Block was not duplicated"))?;
    println!("{} Duplicated {} as {}", "✓".green(), args.id, copy.bright_white());
    Ok(())
}

pub fn theme(args: ThemeArgs, cwd: &Path) -> Result<()> {
    let Some(id) = args.preset else {
        for preset in presets() {
            println!("  {:<14} {}", preset.id.bright_white(), preset.name);
        }
        return Ok(());
    };

    let theme = Theme::preset(&id).ok_or_else(|| {
        let known: Vec<String> = presets().into_iter().map(|t| t.id).collect();
        anyhow!("Unknown theme preset '{}'. Available: {}", id, known.join(", "))
    })?;
    let name = theme.name.clone();
    commit(cwd, |_| Ok(()), Mutation::UpdateTheme { theme })?;
    println!("{} Theme set to {}", "✓".green(), name);
    Ok(())
}

pub fn meta(args: MetaArgs, cwd: &Path) -> Result<()> {
    let mut patch = Patch::new();
    if let Some(title) = args.title {
        patch.insert("title".into(), Value::String(title));
    }
    if let Some(issue) = args.issue {
        patch.insert("issueNumber".into(), Value::String(issue));
    }
    if patch.is_empty() {
        bail!("Nothing to change. Pass --title and/or --issue.");
    }

    let session = commit(cwd, |_| Ok(()), Mutation::UpdateMeta { patch })?;
    let meta = &session.document().meta;
    println!(
        "{} {} {}",
        "✓".green(),
        meta.title.bright_white(),
        format!("#{}", meta.issue_number).dimmed()
    );
    Ok(())
}
