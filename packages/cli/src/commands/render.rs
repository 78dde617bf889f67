use crate::commands::load_issue;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use pulse_render::{render_block, RenderMode};
use std::path::Path;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Block id, see `pulse blocks --current`
    pub id: String,

    /// interactive, static-page, email or viewer-runtime
    #[arg(short, long, default_value = "interactive")]
    pub mode: RenderMode,
}

/// Print a block's render tree as JSON
pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = load_issue(&config.issue_path(cwd))?;
    let block = doc
        .block(&args.id)
        .ok_or_else(|| anyhow!("No block with id {}", args.id))?;

    let tree = render_block(block, args.mode);
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
