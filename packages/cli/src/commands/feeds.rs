use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pulse_feeds::{presets, presets_tagged};
use std::path::Path;

#[derive(Debug, Args)]
pub struct FeedsArgs {
    /// Only presets with this tag (ai, neurology, journal, news, ...)
    #[arg(short, long)]
    pub tag: Option<String>,
}

pub fn feeds(args: FeedsArgs, _cwd: &Path) -> Result<()> {
    let list = match &args.tag {
        Some(tag) => presets_tagged(tag),
        None => presets().iter().collect(),
    };
    if list.is_empty() {
        bail!("No feed presets tagged '{}'", args.tag.unwrap_or_default());
    }

    for preset in list {
        println!(
            "  {} {}",
            preset.label.bright_white(),
            format!("[{}]", preset.tags.join(", ")).dimmed()
        );
        println!("      {}", preset.url);
    }
    Ok(())
}
