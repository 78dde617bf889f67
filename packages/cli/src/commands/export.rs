use crate::commands::load_issue;
use crate::config::Config;
use crate::watch::FileWatcher;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use pulse_common::RealFileSystem;
use pulse_compiler_html::CompileOptions;
use pulse_export::{
    export as export_issue, export_web, export_web_zip, single_file, write_artifacts, Artifact,
    ExportOptions, ExportTarget, ViewerMode,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Standalone page (see --mode)
    Html,
    /// Table-based email
    Email,
    /// Pretty-printed issue JSON
    Json,
    /// Offline viewer (see --embedded)
    Viewer,
    /// Built app plus the issue, routed to the preview
    Web,
    /// Built app and issue inlined into one page
    Single,
    /// Web bundle as a zip archive
    Zip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageMode {
    Static,
    Interactive,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to produce
    #[arg(short, long, value_enum, default_value = "html")]
    pub target: Target,

    /// Page flavor for the html target
    #[arg(short, long, value_enum, default_value = "static")]
    pub mode: PageMode,

    /// Inline the snapshot into the viewer page instead of a sidecar file
    #[arg(long)]
    pub embedded: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Export again whenever the issue file changes
    #[arg(short, long)]
    pub watch: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let out_dir = match &args.out_dir {
        Some(dir) => cwd.join(dir),
        None => config.out_path(cwd),
    };

    println!("{}", "🔨 Exporting issue...".bright_blue().bold());
    report(export_once(&args, &config, cwd, &out_dir)?);

    if args.watch {
        let issue_path = config.issue_path(cwd);
        let watcher = FileWatcher::new(&issue_path)?;
        println!("\n{}", "👀 Watching for changes...".bright_blue());

        while watcher.next_change().is_some() {
            tracing::debug!(path = %issue_path.display(), "issue changed");
            match export_once(&args, &config, cwd, &out_dir) {
                Ok(paths) => report(paths),
                Err(e) => eprintln!("  {} {}", "✗".red(), e.to_string().red()),
            }
        }
    }

    Ok(())
}

fn report(paths: Vec<PathBuf>) {
    for path in &paths {
        println!("  {} {}", "✓".green(), path.display());
    }
    println!("{} Exported {} files", "✅".green(), paths.len());
}

fn export_once(
    args: &ExportArgs,
    config: &Config,
    cwd: &Path,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let issue_path = config.issue_path(cwd);
    let build_dir = config.build_path(cwd);
    let web_dir = out_dir.join("export_web");

    let target = match args.target {
        Target::Web => {
            let web = export_web(&build_dir, &issue_path, &web_dir)?;
            return Ok(vec![web.out_dir]);
        }
        Target::Zip => {
            let zip_path = out_dir.join("export_web.zip");
            export_web_zip(&build_dir, &issue_path, &web_dir, &zip_path)?;
            return Ok(vec![zip_path]);
        }
        Target::Single => {
            let html = single_file(&RealFileSystem, &build_dir, &issue_path)?;
            let doc = load_issue(&issue_path)?;
            let artifact = Artifact::new(
                format!("newsletter_issue{}_single.html", doc.issue_slug()),
                html,
            );
            return Ok(write_artifacts(out_dir, &[artifact])?);
        }
        Target::Html => match args.mode {
            PageMode::Static => ExportTarget::StaticPage,
            PageMode::Interactive => ExportTarget::Interactive,
        },
        Target::Email => ExportTarget::Email,
        Target::Json => ExportTarget::Json,
        Target::Viewer if args.embedded => ExportTarget::Viewer(ViewerMode::Embedded),
        Target::Viewer => ExportTarget::Viewer(ViewerMode::Sidecar),
    };

    let doc = load_issue(&issue_path)?;
    tracing::info!(kind = %target, out = %out_dir.display(), "exporting issue");
    let options = ExportOptions {
        html: CompileOptions {
            feed_proxy: config.feed_proxy.clone(),
            ..CompileOptions::default()
        },
        ..ExportOptions::default()
    };
    let artifacts = export_issue(&doc, target, &options)?;
    Ok(write_artifacts(out_dir, &artifacts)?)
}
