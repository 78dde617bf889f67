use crate::commands::load_issue;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pulse_schema::BlockType;
use std::path::Path;

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// List the blocks of the current issue instead of the available types
    #[arg(short, long)]
    pub current: bool,
}

pub fn blocks(args: BlocksArgs, cwd: &Path) -> Result<()> {
    if !args.current {
        println!("{}", "Block types".bright_blue().bold());
        for block_type in BlockType::ALL {
            println!("  {:<28} {}", block_type.tag().bright_white(), block_type.label());
        }
        return Ok(());
    }

    let config = Config::load(cwd)?;
    let doc = load_issue(&config.issue_path(cwd))?;
    println!(
        "{} {}",
        doc.meta.title.bright_blue().bold(),
        format!("#{}", doc.meta.issue_number).dimmed()
    );
    for (index, (id, block)) in doc.ordered_blocks().enumerate() {
        let label = block
            .map(|b| b.block_type().label().to_string())
            .unwrap_or_else(|| "(missing)".red().to_string());
        println!("  {:>3}  {:<38} {}", index, id.dimmed(), label);
    }
    Ok(())
}
