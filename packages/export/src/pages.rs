//! Single-file artifacts: the two web pages, the email and the JSON snapshot.

use crate::artifact::Artifact;
use crate::error::ExportResult;
use pulse_compiler_email::{compile_email, email_filename, EmailOptions};
use pulse_compiler_html::{compile_document, CompileOptions};
use pulse_schema::Newsletter;
use pulse_theme::RenderMode;

pub fn static_page_filename(doc: &Newsletter) -> String {
    format!("newsletter_issue{}.html", doc.issue_slug())
}

pub fn interactive_page_filename(doc: &Newsletter) -> String {
    format!("newsletter_issue{}_interactive.html", doc.issue_slug())
}

pub fn json_filename(doc: &Newsletter) -> String {
    format!("newsletter_issue{}.json", doc.issue_slug())
}

/// Markup and theme CSS inlined, no script
pub fn static_page(doc: &Newsletter, options: &CompileOptions) -> ExportResult<Artifact> {
    let html = compile_document(doc, RenderMode::StaticPage, options)?;
    Ok(Artifact::new(static_page_filename(doc), html))
}

/// Same page with controls and the runtime shim
pub fn interactive_page(doc: &Newsletter, options: &CompileOptions) -> ExportResult<Artifact> {
    let html = compile_document(doc, RenderMode::Interactive, options)?;
    Ok(Artifact::new(interactive_page_filename(doc), html))
}

pub fn email_page(doc: &Newsletter, options: &EmailOptions) -> ExportResult<Artifact> {
    let html = compile_email(doc, options)?;
    Ok(Artifact::new(email_filename(doc), html))
}

/// Pretty-printed issue JSON
pub fn json_document(doc: &Newsletter) -> ExportResult<Artifact> {
    Ok(Artifact::new(json_filename(doc), doc.to_json_pretty()?))
}
