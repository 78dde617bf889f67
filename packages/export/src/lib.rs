//! # Pulse Export
//!
//! Turns an issue into files.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────┐
//!   Newsletter ────→ │ export(doc, target, ..)  │ ──→ Vec<Artifact>
//!                    └──────────────────────────┘
//!                      │ static / interactive → compiler-html
//!                      │ email                → compiler-email
//!                      │ json                 → schema
//!                      │ viewer               → compiler-html fragments + viewer.js
//!
//!   build/ + issue ──→ bundle: export_web, single_file, zip_dir ──→ disk
//! ```
//!
//! Issue exports are pure and return [`Artifact`]s; [`write_artifacts`] puts
//! them on disk. Bundles work on an existing app build and fail early with a
//! precondition error when the build or the issue file is missing.

mod artifact;
mod bundle;
mod error;
mod orchestrator;
mod pages;
mod viewer;

pub use artifact::{write_artifacts, Artifact};
pub use bundle::{
    check_inputs, export_web, export_web_zip, first_asset, force_preview_route, single_file,
    zip_dir, WebExport, BUNDLED_ISSUE, ISSUE_GLOBAL, PREVIEW_ROUTE_SCRIPT,
};
pub use error::{ExportError, ExportResult};
pub use orchestrator::{export, ExportOptions, ExportTarget};
pub use pages::{
    email_page, interactive_page, interactive_page_filename, json_document, json_filename,
    static_page, static_page_filename,
};
pub use viewer::{
    sidecar_filename, viewer_artifacts, viewer_snapshot, RenderedBlock, RenderedIssue,
    ViewerMode, ViewerSnapshot, VIEWER_FILENAME,
};
