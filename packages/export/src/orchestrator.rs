use crate::artifact::Artifact;
use crate::error::ExportResult;
use crate::pages::{email_page, interactive_page, json_document, static_page};
use crate::viewer::{viewer_artifacts, ViewerMode};
use pulse_compiler_email::EmailOptions;
use pulse_compiler_html::CompileOptions;
use pulse_schema::Newsletter;
use std::fmt;
use tracing::{info, instrument};

/// Artifacts that can be produced from the issue alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    StaticPage,
    Interactive,
    Email,
    Json,
    Viewer(ViewerMode),
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportTarget::StaticPage => "static page",
            ExportTarget::Interactive => "interactive page",
            ExportTarget::Email => "email",
            ExportTarget::Json => "json",
            ExportTarget::Viewer(ViewerMode::Embedded) => "viewer (embedded)",
            ExportTarget::Viewer(ViewerMode::Sidecar) => "viewer (sidecar)",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub html: CompileOptions,
    pub email: EmailOptions,
}

/// Produce the artifacts of `target`. Nothing is written to disk.
#[instrument(skip(doc, options), fields(issue = %doc.meta.issue_number, %target))]
pub fn export(
    doc: &Newsletter,
    target: ExportTarget,
    options: &ExportOptions,
) -> ExportResult<Vec<Artifact>> {
    let artifacts = match target {
        ExportTarget::StaticPage => vec![static_page(doc, &options.html)?],
        ExportTarget::Interactive => vec![interactive_page(doc, &options.html)?],
        ExportTarget::Email => vec![email_page(doc, &options.email)?],
        ExportTarget::Json => vec![json_document(doc)?],
        ExportTarget::Viewer(mode) => viewer_artifacts(doc, mode, &options.html)?,
    };
    info!(files = artifacts.len(), "Exported issue");
    Ok(artifacts)
}
