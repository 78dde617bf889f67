use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use pulse_schema::{Newsletter, UuidIds};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Issue file to create
    #[arg(short, long, default_value = "newsletter.json")]
    pub issue_file: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pulse project...".bright_blue().bold());

    let config = Config {
        issue_file: args.issue_file.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let issue_path = config.issue_path(cwd);
    if issue_path.exists() {
        println!("  {} Kept existing {}", "•".dimmed(), args.issue_file);
    } else {
        if let Some(parent) = issue_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = Newsletter::with_defaults(&mut UuidIds, Utc::now());
        fs::write(&issue_path, doc.to_json_pretty()?)?;
        println!(
            "  {} Created {} ({} blocks)",
            "✓".green(),
            args.issue_file,
            doc.block_order.len()
        );
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pulse blocks --current");
    println!("  2. Run: pulse export --target html");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_issue;

    #[test]
    fn test_init_writes_config_and_issue() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                issue_file: "issues/001.json".into(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.issue_file, "issues/001.json");
        let doc = load_issue(&config.issue_path(dir.path())).unwrap();
        assert_eq!(doc.block_order.len(), 18);
    }
}
