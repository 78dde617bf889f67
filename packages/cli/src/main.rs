mod commands;
mod config;
mod watch;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, blocks, duplicate, export, feeds, init, meta, move_block, new, refresh, remove, render,
    theme, versions, AddArgs, BlocksArgs, DuplicateArgs, ExportArgs, FeedsArgs, InitArgs,
    MetaArgs, MoveArgs, NewArgs, RefreshArgs, RemoveArgs, RenderArgs, ThemeArgs, VersionsArgs,
};
use tracing_subscriber::EnvFilter;

/// Pulse CLI - build, edit and export newsletter issues
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log diagnostics at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pulse project
    Init(InitArgs),

    /// Start a fresh issue
    New(NewArgs),

    /// List block types, or the blocks of the current issue
    Blocks(BlocksArgs),

    /// Add a block
    Add(AddArgs),

    /// Remove a block
    Remove(RemoveArgs),

    /// Move a block to another position
    Move(MoveArgs),

    /// Duplicate a block right after itself
    Duplicate(DuplicateArgs),

    /// Switch the theme preset
    Theme(ThemeArgs),

    /// Change the title or issue number
    Meta(MetaArgs),

    /// Print a block's render tree as JSON
    Render(RenderArgs),

    /// Export the issue
    Export(ExportArgs),

    /// Re-fetch feed-backed blocks
    Refresh(RefreshArgs),

    /// Save, list and restore named versions
    Versions(VersionsArgs),

    /// List curated feed presets
    Feeds(FeedsArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::New(args) => new(args, &cwd),
            Command::Blocks(args) => blocks(args, &cwd),
            Command::Add(args) => add(args, &cwd),
            Command::Remove(args) => remove(args, &cwd),
            Command::Move(args) => move_block(args, &cwd),
            Command::Duplicate(args) => duplicate(args, &cwd),
            Command::Theme(args) => theme(args, &cwd),
            Command::Meta(args) => meta(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Refresh(args) => refresh(args, &cwd),
            Command::Versions(args) => versions(args, &cwd),
            Command::Feeds(args) => feeds(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
