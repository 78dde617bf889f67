use crate::{compile_email, email_filename, EmailError, EmailOptions};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_schema::{Article, Block, BlockType, HtmlEmbedBlock, Newsletter, SequentialIds};

fn every_block_type() -> Newsletter {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut ids = SequentialIds::new("m");
    let mut doc = Newsletter::empty(&mut ids, now);
    for block_type in BlockType::ALL {
        doc.push_block(block_type.create(&mut ids, now));
    }
    doc
}

fn single(block: Block) -> Newsletter {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut doc = Newsletter::empty(&mut SequentialIds::new("s"), now);
    doc.push_block(block);
    doc
}

#[test]
fn test_email_has_no_indirection_or_scripts() {
    let html = compile_email(&every_block_type(), &EmailOptions::default()).unwrap();

    println!("Generated email:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("var("));
    assert!(!html.contains("<script"));
    assert!(!html.contains("data-copy"));
    assert!(!html.contains("pulse-expand-btn"));
    assert!(!html.contains("pulse-feed"));
    assert!(!html.contains("display:grid"));
    assert!(html.contains("class=\"pulse-email-shell\""));
    assert!(html.contains("width=\"600\""));
    assert!(html.contains("<!--[if mso]>"));
    assert!(html.contains("fonts.googleapis.com/css2?family=DM+Serif+Display"));
}

#[test]
fn test_one_row_per_block() {
    let doc = every_block_type();
    let html = compile_email(&doc, &EmailOptions::default()).unwrap();
    for id in &doc.block_order {
        assert_eq!(
            html.matches(&format!("data-block-id=\"{}\"", id)).count(),
            1,
            "{}",
            id
        );
    }
}

#[test]
fn test_two_article_grid_is_stacked() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut block = BlockType::ArticleGrid.create(&mut SequentialIds::new("g"), now);
    if let Block::ArticleGrid(grid) = &mut block {
        grid.columns = 2;
        grid.articles = vec![
            Article {
                title: "Sepsis prediction".into(),
                source: "NEJM AI".into(),
                summary: "Earlier alerts in the ED.".into(),
                ..Article::blank("a1".into())
            },
            Article {
                title: "Ambient scribes".into(),
                source: "JAMA".into(),
                summary: "Less time on notes.".into(),
                ..Article::blank("a2".into())
            },
        ];
    }

    let html = compile_email(&single(block), &EmailOptions::default()).unwrap();
    let order = [
        "NEJM AI",
        "Sepsis prediction",
        "Earlier alerts in the ED.",
        "JAMA",
        "Ambient scribes",
        "Less time on notes.",
    ];
    let mut last = 0;
    for text in order {
        let at = html[last..]
            .find(text)
            .map(|i| i + last)
            .unwrap_or_else(|| panic!("{} missing or out of order", text));
        last = at;
    }
}

#[test]
fn test_html_embed_becomes_placeholder() {
    let block = Block::HtmlEmbed(HtmlEmbedBlock {
        id: "e1".into(),
        html: "<iframe src=\"https://example.com/poll\"></iframe><script>track()</script>".into(),
        label: "Poll".into(),
    });
    let html = compile_email(&single(block), &EmailOptions::default()).unwrap();

    assert!(html.contains("[Poll: view the web version for full rendering]"));
    assert!(!html.contains("<iframe"));
    assert!(!html.contains("<script"));
}

#[test]
fn test_text_is_escaped() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut header = BlockType::Header.create(&mut SequentialIds::new("e"), now);
    if let Block::Header(h) = &mut header {
        h.title = "Risks & <Benefits>".into();
    }
    let html = compile_email(&single(header), &EmailOptions::default()).unwrap();
    assert!(html.contains("Risks &amp; &lt;Benefits&gt;"));
}

#[test]
fn test_theme_references_are_made_literal() {
    let mut doc = every_block_type();
    doc.theme.accent = "var(--c-primary)".into();
    let html = compile_email(&doc, &EmailOptions::default()).unwrap();
    assert!(!html.contains("var("));
}

#[test]
fn test_unresolvable_theme_fails() {
    let mut doc = every_block_type();
    doc.theme.accent = "var(--c-nowhere)".into();
    let result = compile_email(&doc, &EmailOptions::default());
    assert!(matches!(result, Err(EmailError::Theme(_))));
}

#[test]
fn test_web_fonts_can_be_left_out() {
    let options = EmailOptions {
        web_fonts: false,
        ..Default::default()
    };
    let html = compile_email(&every_block_type(), &options).unwrap();
    assert!(!html.contains("fonts.googleapis.com"));
}

#[test]
fn test_email_filename_uses_issue_slug() {
    let mut doc = every_block_type();
    doc.meta.issue_number = "Issue 7".into();
    assert_eq!(email_filename(&doc), "newsletter_issueIssue7_email.html");
    doc.meta.issue_number = "  ".into();
    assert_eq!(email_filename(&doc), "newsletter_issuedraft_email.html");
}
