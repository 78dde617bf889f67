use crate::{compile_block, compile_document, CompileError, CompileOptions};
use chrono::{TimeZone, Utc};
use pulse_render::{render_block, BlockTree};
use pulse_schema::{Article, Block, BlockType, Newsletter, SequentialIds, Theme};
use pulse_theme::{resolve, RenderMode};

fn issue() -> Newsletter {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    Newsletter::with_defaults(&mut SequentialIds::new("h"), now)
}

fn single(block: Block) -> Newsletter {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut doc = Newsletter::empty(&mut SequentialIds::new("s"), now);
    doc.push_block(block);
    doc
}

fn fragment(block: &Block, mode: RenderMode) -> String {
    let tokens = resolve(&Theme::default(), mode).unwrap();
    let tree = BlockTree {
        id: block.id().to_string(),
        block_type: Some(block.block_type()),
        node: render_block(block, mode),
    };
    compile_block(&tree, &tokens, true)
}

#[test]
fn test_static_page_has_no_runtime() {
    let html = compile_document(&issue(), RenderMode::StaticPage, &CompileOptions::default()).unwrap();

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(":root {"));
    assert!(html.contains("class=\"pulse-block pulse-block--header\""));
    assert!(!html.contains("PULSE_RUNTIME"));
    assert!(!html.contains("class=\"pulse-copy-btn\""));
    assert!(!html.contains("class=\"pulse-expand-btn\""));
    assert!(!html.contains("class=\"pulse-feed\""));
}

#[test]
fn test_interactive_page_wires_controls() {
    let html = compile_document(&issue(), RenderMode::Interactive, &CompileOptions::default()).unwrap();

    assert!(html.contains("window.PULSE_RUNTIME = {"));
    assert!(html.contains("\"refreshMs\":3600000"));
    assert!(html.contains("window.PulseRuntime"));
    assert!(html.contains("class=\"pulse-copy-btn\" data-copy=\""));
    assert!(html.contains("class=\"pulse-expand-btn\" data-target=\"tpl-"));
    assert!(html.contains("data-feed-kind=\"sidebar\""));
    assert_eq!(html.matches("</script>").count(), 2);
}

#[test]
fn test_email_is_not_a_page_mode() {
    let result = compile_document(&issue(), RenderMode::Email, &CompileOptions::default());
    assert!(matches!(result, Err(CompileError::UnsupportedMode(RenderMode::Email))));
}

#[test]
fn test_two_article_grid_has_two_columns() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut block = BlockType::ArticleGrid.create(&mut SequentialIds::new("g"), now);
    if let Block::ArticleGrid(grid) = &mut block {
        grid.columns = 2;
        grid.articles = vec![
            Article {
                title: "First paper".into(),
                ..Article::blank("a1".into())
            },
            Article {
                title: "Second paper".into(),
                ..Article::blank("a2".into())
            },
        ];
    }

    for mode in [RenderMode::StaticPage, RenderMode::Interactive] {
        let html = fragment(&block, mode);
        assert_eq!(html.matches("pulse-grid pulse-cols-2").count(), 1);
        let first = html.find("First paper").unwrap();
        let second = html.find("Second paper").unwrap();
        assert!(first < second);
    }
}

#[test]
fn test_text_is_escaped_but_rich_text_is_not() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut ids = SequentialIds::new("e");
    let mut header = BlockType::Header.create(&mut ids, now);
    if let Block::Header(h) = &mut header {
        h.title = "<script>alert('x')</script> & co".into();
    }
    let mut text = BlockType::Text.create(&mut ids, now);
    if let Block::Text(t) = &mut text {
        t.html = "<p>Hello <strong>team</strong></p>".into();
    }

    let header_html = fragment(&header, RenderMode::StaticPage);
    assert!(header_html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    assert!(!header_html.contains("<script>"));

    let text_html = fragment(&text, RenderMode::StaticPage);
    assert!(text_html.contains("<p>Hello <strong>team</strong></p>"));
}

#[test]
fn test_script_links_are_neutralized() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let mut block = BlockType::QuickHits.create(&mut SequentialIds::new("q"), now);
    if let Block::QuickHits(q) = &mut block {
        for hit in &mut q.hits {
            hit.url = "javascript:alert(1)".into();
        }
    }
    let html = fragment(&block, RenderMode::StaticPage);
    assert!(!html.contains("javascript:"));
    assert!(html.contains("href=\"#\""));
}

#[test]
fn test_page_title_is_escaped() {
    let mut doc = single(BlockType::Spacer.create(
        &mut SequentialIds::new("t"),
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
    ));
    doc.meta.title = "AI & Medicine <Issue 4>".into();
    let html = compile_document(&doc, RenderMode::StaticPage, &CompileOptions::default()).unwrap();
    assert!(html.contains("<title>AI &amp; Medicine &lt;Issue 4&gt;</title>"));
}

#[test]
fn test_compact_output() {
    let doc = single(BlockType::Spacer.create(
        &mut SequentialIds::new("c"),
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
    ));
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    let html = compile_document(&doc, RenderMode::StaticPage, &options).unwrap();
    assert!(html.contains("</head><body><main class=\"pulse-issue\">"));
}
