//! Cross-mode guarantees of the canonical tree

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_render::{render_block, render_document, Layout, RNode, RenderMode, TextRole};
use pulse_schema::{Article, Block, BlockType, Newsletter, QuickHit, SequentialIds};

fn every_block_type() -> Newsletter {
    let now = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
    let mut ids = SequentialIds::new("r");
    let mut doc = Newsletter::empty(&mut ids, now);
    for block_type in BlockType::ALL {
        doc.push_block(block_type.create(&mut ids, now));
    }
    doc
}

fn grids(node: &RNode) -> Vec<(u8, usize)> {
    let mut out = Vec::new();
    node.walk(&mut |n| {
        if let RNode::Container {
            layout: Layout::Grid { columns },
            children,
            ..
        } = n
        {
            out.push((*columns, children.len()));
        }
    });
    out
}

#[test]
fn test_two_article_grid() {
    let now = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
    let mut ids = SequentialIds::new("g");
    let mut block = BlockType::ArticleGrid.create(&mut ids, now);
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

    for mode in RenderMode::ALL {
        let tree = render_block(&block, mode);
        assert_eq!(grids(&tree), vec![(2, 2)], "{}", mode);

        let texts = tree.texts();
        let position = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(position("Sepsis prediction") < position("Ambient scribes"));
        for text in ["NEJM AI", "Earlier alerts in the ED.", "JAMA", "Less time on notes."] {
            assert!(texts.contains(&text), "{} missing in {}", text, mode);
        }
    }
}

#[test]
fn test_static_and_email_trees_match() {
    let doc = every_block_type();
    let page = render_document(&doc, RenderMode::StaticPage);
    let email = render_document(&doc, RenderMode::Email);

    for (page, email) in page.iter().zip(&email) {
        if page.block_type == Some(BlockType::HtmlEmbed) {
            assert!(matches!(email.node, RNode::Placeholder { .. }));
        } else {
            assert_eq!(page.node, email.node, "{:?}", page.block_type);
        }
    }
}

#[test]
fn test_interactive_keeps_all_static_text() {
    let doc = every_block_type();
    let page = render_document(&doc, RenderMode::StaticPage);
    let live = render_document(&doc, RenderMode::Interactive);

    for (page, live) in page.iter().zip(&live) {
        let live_texts = live.node.texts();
        for text in page.node.texts() {
            assert!(live_texts.contains(&text), "{:?} lost {:?}", page.block_type, text);
        }
    }
}

#[test]
fn test_interactive_nodes_only_in_interactive_modes() {
    let doc = every_block_type();
    let interactive = |n: &RNode| {
        matches!(
            n,
            RNode::CopyButton { .. } | RNode::Collapsible { .. } | RNode::Feed { .. }
        )
    };

    for mode in [RenderMode::StaticPage, RenderMode::Email] {
        for tree in render_document(&doc, mode) {
            assert!(!tree.node.any(interactive), "{:?} in {}", tree.block_type, mode);
        }
    }
    for mode in [RenderMode::Interactive, RenderMode::ViewerRuntime] {
        let trees = render_document(&doc, mode);
        assert!(trees.iter().any(|t| t.node.any(interactive)), "{}", mode);
    }
}

#[test]
fn test_missing_block_renders_placeholder() {
    let mut doc = every_block_type();
    doc.block_order.push("ghost".into());

    let trees = render_document(&doc, RenderMode::StaticPage);
    let last = trees.last().unwrap();
    assert_eq!(last.block_type, None);
    assert_eq!(last.node, RNode::placeholder("Missing block ghost"));
}

#[test]
fn test_quick_hit_numbering_is_one_based() {
    let now = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
    let mut ids = SequentialIds::new("q");
    let mut block = BlockType::QuickHits.create(&mut ids, now);
    if let Block::QuickHits(q) = &mut block {
        q.hits = (0..3)
            .map(|i| QuickHit {
                title: format!("Hit {}", i),
                ..QuickHit::blank(format!("h{}", i))
            })
            .collect();
    }

    for mode in RenderMode::ALL {
        let mut numerals = Vec::new();
        render_block(&block, mode).walk(&mut |n| {
            if let RNode::Text {
                content,
                role: TextRole::Numeral,
                ..
            } = n
            {
                numerals.push(content.clone());
            }
        });
        assert_eq!(numerals, vec!["01", "02", "03"]);
    }
}

#[test]
fn test_block_tree_json_shape() {
    let doc = every_block_type();
    let trees = render_document(&doc, RenderMode::ViewerRuntime);
    let json = serde_json::to_value(&trees[0]).unwrap();
    assert_eq!(json["type"], "header");
    assert_eq!(json["node"]["kind"], "container");
}
