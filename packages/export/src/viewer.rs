//! The offline viewer.
//!
//! The viewer page carries no issue markup of its own. It paints a snapshot:
//! the issue JSON plus every block pre-rendered for the `viewer-runtime`
//! target and the theme stylesheet. The snapshot either rides inside the page
//! (`Embedded`, openable from disk) or ships next to it (`Sidecar`) and is
//! fetched when the page loads.

use crate::artifact::Artifact;
use crate::error::ExportResult;
use pulse_common::{escape_html, escape_script_close, Markup};
use pulse_compiler_html::{compile_block, page_css, runtime_scripts, CompileOptions};
use pulse_render::render_document;
use pulse_schema::Newsletter;
use pulse_theme::{resolve, RenderMode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub const VIEWER_FILENAME: &str = "newsletter_viewer.html";

const VIEWER_JS: &str = include_str!("../assets/viewer.js");
const VIEWER_CSS: &str = include_str!("../assets/viewer.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerMode {
    /// Snapshot inlined as `window.__NEWSLETTER__`
    #[default]
    Embedded,
    /// Snapshot written beside the page
    Sidecar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub id: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedIssue {
    pub title: String,
    pub css: String,
    pub blocks: Vec<RenderedBlock>,
}

/// What the viewer page paints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub document: Newsletter,
    pub render: RenderedIssue,
}

/// `newsletter_viewer_issue<N>.json`
pub fn sidecar_filename(doc: &Newsletter) -> String {
    let stem = VIEWER_FILENAME.trim_end_matches(".html");
    format!("{}_issue{}.json", stem, doc.issue_slug())
}

pub fn viewer_snapshot(doc: &Newsletter) -> ExportResult<ViewerSnapshot> {
    let tokens = resolve(&doc.theme, RenderMode::ViewerRuntime)?;
    let blocks = render_document(doc, RenderMode::ViewerRuntime)
        .iter()
        .map(|tree| RenderedBlock {
            id: tree.id.clone(),
            html: compile_block(tree, &tokens, false),
        })
        .collect();

    Ok(ViewerSnapshot {
        document: doc.clone(),
        render: RenderedIssue {
            title: doc.meta.title.trim().to_string(),
            css: page_css(&tokens),
            blocks,
        },
    })
}

/// The viewer page, plus the snapshot file in sidecar mode
#[instrument(skip(doc, options), fields(issue = %doc.meta.issue_number))]
pub fn viewer_artifacts(
    doc: &Newsletter,
    mode: ViewerMode,
    options: &CompileOptions,
) -> ExportResult<Vec<Artifact>> {
    let snapshot = viewer_snapshot(doc)?;
    let title = if snapshot.render.title.is_empty() {
        "Newsletter Viewer".to_string()
    } else {
        format!("{} - Viewer", snapshot.render.title)
    };

    let mut out = Markup::new(true);
    out.add_line("<!DOCTYPE html>");
    out.add_line("<html lang=\"en\">");
    out.indent();

    out.add_line("<head>");
    out.indent();
    out.add_line("<meta charset=\"UTF-8\">");
    out.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    out.add_line(&format!("<title>{}</title>", escape_html(&title)));
    if mode == ViewerMode::Sidecar {
        out.add_line(&format!(
            "<meta name=\"pulse-snapshot-file\" content=\"{}\">",
            escape_html(&sidecar_filename(doc))
        ));
    }
    out.add_line("<style>");
    out.add(VIEWER_CSS);
    out.add_line("</style>");
    out.add_line("<style id=\"pulse-viewer-theme\"></style>");
    out.dedent();
    out.add_line("</head>");

    out.add_line("<body>");
    out.indent();
    write_chrome(&mut out);

    let mut artifacts = Vec::new();
    match mode {
        ViewerMode::Embedded => {
            let json = serde_json::to_string(&snapshot)?;
            out.add_line(&format!(
                "<script>window.__NEWSLETTER__ = {};</script>",
                escape_script_close(&json)
            ));
        }
        ViewerMode::Sidecar => {
            artifacts.push(Artifact::new(
                sidecar_filename(doc),
                serde_json::to_string_pretty(&snapshot)?,
            ));
        }
    }

    out.add(&runtime_scripts(options));
    out.add_line("<script>");
    out.add(&escape_script_close(VIEWER_JS));
    out.add_line("</script>");
    out.dedent();
    out.add_line("</body>");
    out.dedent();
    out.add_line("</html>");

    artifacts.insert(0, Artifact::new(VIEWER_FILENAME, out.into_string()));
    info!(
        blocks = snapshot.render.blocks.len(),
        embedded = mode == ViewerMode::Embedded,
        "Built viewer"
    );
    Ok(artifacts)
}

fn write_chrome(out: &mut Markup) {
    out.add_line("<header class=\"viewer-toolbar\">");
    out.indent();
    out.add_line("<span class=\"viewer-title\" id=\"viewer-title\">Newsletter Viewer</span>");
    out.add_line("<div class=\"viewer-widths\" role=\"group\" aria-label=\"Preview width\">");
    out.indent();
    for (width, label) in [("desktop", "Desktop"), ("tablet", "Tablet"), ("phone", "Phone")] {
        out.add_line(&format!(
            "<button type=\"button\" data-width=\"{}\">{}</button>",
            width, label
        ));
    }
    out.dedent();
    out.add_line("</div>");
    out.add_line("<label class=\"viewer-button\">Load Issue<input type=\"file\" id=\"viewer-file\" accept=\".json,application/json\" hidden></label>");
    out.add_line("<button type=\"button\" class=\"viewer-button\" id=\"viewer-print\">Print</button>");
    out.dedent();
    out.add_line("</header>");

    out.add_line("<div class=\"viewer-status\" id=\"viewer-status\" hidden></div>");
    out.add_line("<div class=\"viewer-frame\" id=\"viewer-frame\" data-width=\"desktop\">");
    out.indent();
    out.add_line("<main class=\"pulse-issue\" id=\"viewer-root\"></main>");
    out.dedent();
    out.add_line("</div>");
    out.add_line("<div class=\"viewer-drop\" id=\"viewer-drop\" hidden>Drop a newsletter viewer JSON file to open it</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use pulse_schema::{Block, BlockType, SequentialIds};

    fn doc() -> Newsletter {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap();
        let mut ids = SequentialIds::new("v");
        let mut doc = Newsletter::empty(&mut ids, now);
        doc.push_block(BlockType::Header.create(&mut ids, now));
        doc.push_block(BlockType::QuickHits.create(&mut ids, now));
        doc
    }

    #[test]
    fn test_snapshot_follows_block_order() {
        let doc = doc();
        let snapshot = viewer_snapshot(&doc).unwrap();
        let ids: Vec<&str> = snapshot.render.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, doc.block_order.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(snapshot.render.blocks[0].html.contains("data-block-id"));
        assert!(snapshot.render.css.contains("var(--"));
    }

    #[test]
    fn test_embedded_viewer_is_one_file() {
        let artifacts =
            viewer_artifacts(&doc(), ViewerMode::Embedded, &CompileOptions::default()).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, VIEWER_FILENAME);
        assert!(artifacts[0].contents.contains("window.__NEWSLETTER__ = {"));
        assert!(artifacts[0].contents.contains("window.PulseRuntime"));
        assert!(!artifacts[0]
            .contents
            .contains("<meta name=\"pulse-snapshot-file\""));
    }

    #[test]
    fn test_viewer_defers_first_hydration_to_runtime() {
        let artifacts =
            viewer_artifacts(&doc(), ViewerMode::Embedded, &CompileOptions::default()).unwrap();
        let page = &artifacts[0].contents;

        // The runtime starts after the viewer script, so a paint during parsing
        // must not hydrate on its own.
        let runtime = page.find("window.PulseRuntime = {").unwrap();
        let viewer = page.find("runtimeStarted").unwrap();
        assert!(runtime < viewer);
        assert!(page.contains("var runtimeStarted = document.readyState !== \"loading\";"));
        assert!(page.contains("if (runtimeStarted && window.PulseRuntime"));
        assert_eq!(page.matches("window.PulseRuntime.hydrateAll();").count(), 1);
    }

    #[test]
    fn test_sidecar_viewer_points_at_snapshot() {
        let doc = doc();
        let artifacts =
            viewer_artifacts(&doc, ViewerMode::Sidecar, &CompileOptions::default()).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[1].filename, "newsletter_viewer_issue001.json");
        assert!(artifacts[0]
            .contents
            .contains("content=\"newsletter_viewer_issue001.json\""));
        assert!(!artifacts[0].contents.contains("window.__NEWSLETTER__ ="));

        let snapshot: ViewerSnapshot = serde_json::from_str(&artifacts[1].contents).unwrap();
        assert_eq!(snapshot.document, doc);
    }

    #[test]
    fn test_html_embed_is_rendered_verbatim_in_snapshot() {
        let mut doc = doc();
        let now = doc.meta.created_at;
        let mut ids = SequentialIds::new("e");
        let mut embed = BlockType::HtmlEmbed.create(&mut ids, now);
        if let Block::HtmlEmbed(b) = &mut embed {
            b.html = "<iframe src=\"https://poll.example\"></iframe>".into();
        }
        doc.push_block(embed);

        let snapshot = viewer_snapshot(&doc).unwrap();
        let last = snapshot.render.blocks.last().unwrap();
        assert!(last.html.contains("<iframe src=\"https://poll.example\"></iframe>"));
    }
}
