pub mod blocks;
pub mod edit;
pub mod export;
pub mod feeds;
pub mod init;
pub mod new;
pub mod refresh;
pub mod render;
pub mod versions;

pub use blocks::{blocks, BlocksArgs};
pub use edit::{
    add, duplicate, meta, move_block, remove, theme, AddArgs, DuplicateArgs, MetaArgs, MoveArgs,
    RemoveArgs, ThemeArgs,
};
pub use export::{export, ExportArgs};
pub use feeds::{feeds, FeedsArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use refresh::{refresh, RefreshArgs};
pub use render::{render, RenderArgs};
pub use versions::{versions, VersionsArgs};

use crate::config::Config;
use anyhow::{bail, Context, Result};
use pulse_editor::{EditSession, FileStorage, SessionOptions, SystemClock};
use pulse_schema::{Newsletter, UuidIds};
use std::fs;
use std::path::Path;

/// Read an issue through the strict import path
pub fn load_issue(path: &Path) -> Result<Newsletter> {
    if !path.is_file() {
        bail!(
            "Issue file not found: {}. Run `pulse init` or `pulse new` first.",
            path.display()
        );
    }
    let json = fs::read_to_string(path)?;
    Newsletter::import_json(&json).with_context(|| format!("Invalid issue {}", path.display()))
}

/// Session over the configured issue; saving writes the issue file back
pub fn open_session(cwd: &Path, config: &Config) -> Result<EditSession> {
    let issue_path = config.issue_path(cwd);
    let document = load_issue(&issue_path)?;
    let storage = FileStorage::new(issue_path, config.versions_path(cwd));
    let options = SessionOptions {
        max_versions: config.max_versions,
        ..SessionOptions::default()
    };
    let session = EditSession::with_collaborators(
        document,
        Box::new(storage),
        Box::new(UuidIds),
        Box::new(SystemClock),
        options,
    )?;
    Ok(session)
}
