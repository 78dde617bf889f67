//! Per-variant tree builders.
//!
//! Every builder includes the same text in every mode. Mode only decides
//! whether interactive affordances (copy buttons, collapsibles, live feeds)
//! wrap that text.

mod articles;
mod features;
mod masthead;
mod media;
mod prompts;
mod safety;

use crate::node::{Frame, Nodes, Paint, RNode, Spacing, TextRole};
use pulse_schema::{Block, ColorToken};
use pulse_theme::RenderMode;

pub(crate) fn build(block: &Block, mode: RenderMode) -> RNode {
    match block {
        Block::Header(b) => masthead::header(b),
        Block::Ticker(b) => masthead::ticker(b, mode),
        Block::SectionDivider(b) => masthead::section_divider(b),
        Block::Footer(b) => masthead::footer(b),
        Block::ArticleGrid(b) => articles::article_grid(b),
        Block::Spotlight(b) => articles::spotlight(b),
        Block::QuickHits(b) => articles::quick_hits(b),
        Block::EthicsSplit(b) => safety::ethics_split(b),
        Block::AiSafety(b) => safety::ai_safety(b),
        Block::SafetyReminders(b) => safety::safety_reminders(b),
        Block::PromptMasterclass(b) => prompts::masterclass(b),
        Block::SbarPrompt(b) => prompts::sbar(b, mode),
        Block::PromptTemplate(b) => prompts::prompt_template(b, mode),
        Block::ClinicalPromptTemplates(b) => prompts::clinical_templates(b, mode),
        Block::TermOfMonth(b) => features::term_of_month(b),
        Block::AiCaseFile(b) => features::ai_case_file(b),
        Block::Humor(b) => features::humor(b),
        Block::InstitutionalSpotlight(b) => features::institutional_spotlight(b),
        Block::RssSidebar(b) => features::rss_sidebar(b, mode),
        Block::Image(b) => media::image(b),
        Block::Text(b) => media::text(b),
        Block::HtmlEmbed(b) => media::html_embed(b),
        Block::Spacer(b) => media::spacer(b),
    }
}

/// Wrap `node` in a link when `href` is set
fn linked(href: &str, node: RNode) -> RNode {
    if href.trim().is_empty() {
        node
    } else {
        RNode::link(href.trim(), vec![node])
    }
}

/// Trailing "read more" style link, omitted without a target
fn read_more(href: &str, label: &str) -> Option<RNode> {
    (!href.trim().is_empty())
        .then(|| RNode::link(href.trim(), vec![RNode::text(label, TextRole::Strong).with_color(ColorToken::Accent)]))
}

/// First non-blank source: uploaded data URL before remote URL
fn image_source<'a>(data_url: &'a str, url: &'a str) -> Option<&'a str> {
    [data_url, url].into_iter().map(str::trim).find(|s| !s.is_empty())
}

/// Banner image with a fixed height
fn cover_image(src: &str, alt: &str, height: u32) -> Option<RNode> {
    image_source("", src).map(|src| {
        RNode::image(src, alt)
            .with_size(None, Some(height))
            .with_fit(pulse_schema::ImageFit::Cover)
    })
}

/// `icon text`, empty when `text` is blank
fn prefixed(icon: &str, text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("{} {}", icon, text.trim())
    }
}

/// Non-blank parts joined by `sep`
fn join_nonempty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Label over body text inside `frame`, omitted when the body is blank
fn labelled_box(label: &str, body: &str, frame: Frame) -> Option<RNode> {
    if body.trim().is_empty() {
        return None;
    }
    Some(
        RNode::stack(
            Nodes::new()
                .text(label, TextRole::Label)
                .text(body, TextRole::Body)
                .build(),
        )
        .with_frame(frame),
    )
}

/// Soft inset panel on the page background
fn inset() -> Frame {
    Frame::padded(Spacing::Small)
        .background(ColorToken::Background)
        .rounded()
}

fn badges<'a>(labels: impl IntoIterator<Item = &'a String>, paint: Paint) -> Option<RNode> {
    let nodes: Vec<RNode> = labels
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| RNode::text(l.trim(), TextRole::Badge).with_color(paint.clone()))
        .collect();
    (!nodes.is_empty()).then(|| RNode::row(nodes))
}

fn copy_button(payload: &str) -> Option<RNode> {
    (!payload.trim().is_empty()).then(|| RNode::CopyButton {
        label: "Copy prompt".to_string(),
        payload: payload.to_string(),
    })
}

/// Feed URLs with blanks dropped
fn feed_list(urls: &[String]) -> Vec<String> {
    urls.iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_nonempty() {
        assert_eq!(join_nonempty(&["7", " ", "May 2025"], " · "), "7 · May 2025");
        assert_eq!(join_nonempty(&["", ""], " · "), "");
    }

    #[test]
    fn test_image_source_prefers_data_url() {
        assert_eq!(image_source("data:image/png;base64,AA", "https://x/a.png"), Some("data:image/png;base64,AA"));
        assert_eq!(image_source(" ", "https://x/a.png"), Some("https://x/a.png"));
        assert_eq!(image_source("", ""), None);
    }

    #[test]
    fn test_linked_skips_blank_href() {
        let node = RNode::text("t", TextRole::Body);
        assert_eq!(linked("  ", node.clone()), node);
        assert!(matches!(linked("https://a", node), RNode::Link { .. }));
    }
}
