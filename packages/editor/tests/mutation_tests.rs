//! Reducer behavior, one operation at a time

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_editor::{patch, Clock, FixedClock, Mutation, MutationContext};
use pulse_schema::{Block, BlockType, EvidenceLevel, Newsletter, SequentialIds, Theme};
use std::collections::HashSet;

struct Harness {
    ids: SequentialIds,
    clock: FixedClock,
}

impl Harness {
    fn new() -> Self {
        Self {
            ids: SequentialIds::new("m"),
            clock: FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap()),
        }
    }

    fn document(&mut self) -> Newsletter {
        Newsletter::with_defaults(&mut self.ids, self.clock.now())
    }

    fn apply(&mut self, doc: &Newsletter, mutation: Mutation) -> Newsletter {
        self.clock.advance(Duration::seconds(1));
        let mut cx = MutationContext::new(&mut self.ids, &self.clock);
        mutation.apply(doc, &mut cx)
    }
}

fn first_of(doc: &Newsletter, block_type: BlockType) -> String {
    doc.ordered_blocks()
        .find(|(_, b)| b.map(|b| b.block_type()) == Some(block_type))
        .map(|(id, _)| id.to_string())
        .unwrap()
}

fn grid_titles(doc: &Newsletter, id: &str) -> Vec<String> {
    match doc.block(id) {
        Some(Block::ArticleGrid(grid)) => grid.articles.iter().map(|a| a.title.clone()).collect(),
        other => panic!("expected article grid, got {:?}", other),
    }
}

#[test]
fn test_add_block_appends_by_default() {
    let mut h = Harness::new();
    let doc = h.document();
    let next = h.apply(
        &doc,
        Mutation::AddBlock {
            block_type: BlockType::Text,
            after_id: None,
        },
    );

    assert_eq!(next.block_order.len(), doc.block_order.len() + 1);
    let last = next.block_order.last().unwrap();
    assert_eq!(next.block(last).unwrap().block_type(), BlockType::Text);
    next.validate().unwrap();
}

#[test]
fn test_add_block_after_id() {
    let mut h = Harness::new();
    let doc = h.document();
    let anchor = doc.block_order[0].clone();

    let next = h.apply(
        &doc,
        Mutation::AddBlock {
            block_type: BlockType::Image,
            after_id: Some(anchor),
        },
    );
    assert_eq!(next.block(&next.block_order[1]).unwrap().block_type(), BlockType::Image);
}

#[test]
fn test_add_block_after_missing_id_appends() {
    let mut h = Harness::new();
    let doc = h.document();
    let next = h.apply(
        &doc,
        Mutation::AddBlock {
            block_type: BlockType::Humor,
            after_id: Some("ghost".into()),
        },
    );
    let last = next.block_order.last().unwrap();
    assert_eq!(next.block(last).unwrap().block_type(), BlockType::Humor);
}

#[test]
fn test_delete_block_is_idempotent() {
    let mut h = Harness::new();
    let doc = h.document();
    let id = doc.block_order[3].clone();

    let once = h.apply(&doc, Mutation::DeleteBlock { id: id.clone() });
    let twice = h.apply(&once, Mutation::DeleteBlock { id: id.clone() });

    assert!(once.block(&id).is_none());
    assert_eq!(once.block_order, twice.block_order);
    assert_eq!(once.blocks, twice.blocks);
    twice.validate().unwrap();
}

#[test]
fn test_update_block_merges_fields_and_protects_id() {
    let mut h = Harness::new();
    let doc = h.document();
    let id = first_of(&doc, BlockType::Header);

    let next = h.apply(
        &doc,
        Mutation::UpdateBlock {
            id: id.clone(),
            patch: patch! { "title" => "Renamed", "id" => "hijack", "type" => "footer" },
        },
    );

    match next.block(&id) {
        Some(Block::Header(header)) => {
            assert_eq!(header.title, "Renamed");
            assert_eq!(header.id, id);
        }
        other => panic!("expected header, got {:?}", other),
    }
    next.validate().unwrap();
}

#[test]
fn test_update_block_with_bad_patch_is_noop() {
    let mut h = Harness::new();
    let doc = h.document();
    let id = first_of(&doc, BlockType::Spacer);

    let next = h.apply(
        &doc,
        Mutation::UpdateBlock {
            id: id.clone(),
            patch: patch! { "height" => "tall" },
        },
    );
    assert_eq!(next.block(&id), doc.block(&id));
}

#[test]
fn test_move_block_out_of_range_is_noop() {
    let mut h = Harness::new();
    let doc = h.document();
    let len = doc.block_order.len();

    let next = h.apply(&doc, Mutation::MoveBlock { from: len, to: 0 });
    assert_eq!(next.block_order, doc.block_order);
}

#[test]
fn test_duplicate_block_gets_fresh_nested_ids() {
    let mut h = Harness::new();
    let doc = h.document();
    let source_id = first_of(&doc, BlockType::ArticleGrid);

    let next = h.apply(&doc, Mutation::DuplicateBlock { id: source_id.clone() });

    let position = next.index_of(&source_id).unwrap();
    let clone_id = next.block_order[position + 1].clone();
    assert_ne!(clone_id, source_id);
    assert!(doc.block(&clone_id).is_none(), "clone id must be new");

    let existing: HashSet<String> = doc
        .blocks
        .values()
        .flat_map(|b| {
            let mut all = vec![b.id().to_string()];
            all.extend(b.nested_ids().into_iter().map(str::to_string));
            all
        })
        .collect();

    let clone = next.block(&clone_id).unwrap();
    for nested in clone.nested_ids() {
        assert!(!existing.contains(nested), "nested id {} was reused", nested);
    }
    assert_eq!(grid_titles(&next, &clone_id), grid_titles(&doc, &source_id));
    next.validate().unwrap();
}

#[test]
fn test_article_crud() {
    let mut h = Harness::new();
    let doc = h.document();
    let grid = first_of(&doc, BlockType::ArticleGrid);

    let added = h.apply(&doc, Mutation::AddArticle { block_id: grid.clone() });
    assert_eq!(grid_titles(&added, &grid).len(), 3);
    assert_eq!(grid_titles(&added, &grid)[2], "New Article");

    let new_id = match added.block(&grid) {
        Some(Block::ArticleGrid(g)) => g.articles[2].id.clone(),
        _ => unreachable!(),
    };

    let updated = h.apply(
        &added,
        Mutation::UpdateArticle {
            block_id: grid.clone(),
            article_id: new_id.clone(),
            patch: patch! { "title" => "Sepsis alerts", "evidenceLevel" => "High" },
        },
    );
    match updated.block(&grid) {
        Some(Block::ArticleGrid(g)) => {
            assert_eq!(g.articles[2].title, "Sepsis alerts");
            assert_eq!(g.articles[2].evidence_level, EvidenceLevel::High);
        }
        _ => unreachable!(),
    }

    let moved = h.apply(
        &updated,
        Mutation::MoveArticle {
            block_id: grid.clone(),
            from: 2,
            to: 0,
        },
    );
    assert_eq!(grid_titles(&moved, &grid)[0], "Sepsis alerts");

    let deleted = h.apply(
        &moved,
        Mutation::DeleteArticle {
            block_id: grid.clone(),
            article_id: new_id,
        },
    );
    assert_eq!(grid_titles(&deleted, &grid), grid_titles(&doc, &grid));
}

#[test]
fn test_update_article_reaches_spotlight() {
    let mut h = Harness::new();
    let doc = h.document();
    let spotlight = first_of(&doc, BlockType::Spotlight);
    let article_id = match doc.block(&spotlight) {
        Some(Block::Spotlight(s)) => s.article.id.clone(),
        _ => unreachable!(),
    };

    let next = h.apply(
        &doc,
        Mutation::UpdateArticle {
            block_id: spotlight.clone(),
            article_id,
            patch: patch! { "myTake" => "Worth reading" },
        },
    );
    match next.block(&spotlight) {
        Some(Block::Spotlight(s)) => assert_eq!(s.article.my_take, "Worth reading"),
        _ => unreachable!(),
    }
}

#[test]
fn test_sub_entity_ops_on_wrong_block_are_noops() {
    let mut h = Harness::new();
    let doc = h.document();
    let header = first_of(&doc, BlockType::Header);

    for mutation in [
        Mutation::AddArticle {
            block_id: header.clone(),
        },
        Mutation::AddQuickHit {
            block_id: header.clone(),
        },
        Mutation::MoveArticle {
            block_id: header.clone(),
            from: 0,
            to: 1,
        },
        Mutation::DeleteQuickHit {
            block_id: header.clone(),
            hit_id: "x".into(),
        },
        Mutation::AddArticle {
            block_id: "ghost".into(),
        },
    ] {
        let next = h.apply(&doc, mutation);
        assert_eq!(next.blocks, doc.blocks);
        assert_eq!(next.block_order, doc.block_order);
    }
}

#[test]
fn test_quick_hit_crud() {
    let mut h = Harness::new();
    let mut doc = h.document();
    doc = h.apply(
        &doc,
        Mutation::AddBlock {
            block_type: BlockType::QuickHits,
            after_id: None,
        },
    );
    let block_id = doc.block_order.last().unwrap().clone();

    let hits = |doc: &Newsletter| match doc.block(&block_id) {
        Some(Block::QuickHits(q)) => q.hits.clone(),
        _ => unreachable!(),
    };

    let initial = hits(&doc).len();
    doc = h.apply(&doc, Mutation::AddQuickHit { block_id: block_id.clone() });
    assert_eq!(hits(&doc).len(), initial + 1);

    let hit_id = hits(&doc).last().unwrap().id.clone();
    doc = h.apply(
        &doc,
        Mutation::UpdateQuickHit {
            block_id: block_id.clone(),
            hit_id: hit_id.clone(),
            patch: patch! { "summary" => "Short take" },
        },
    );
    assert_eq!(hits(&doc).last().unwrap().summary, "Short take");

    doc = h.apply(
        &doc,
        Mutation::MoveQuickHit {
            block_id: block_id.clone(),
            from: initial,
            to: 0,
        },
    );
    assert_eq!(hits(&doc)[0].id, hit_id);

    doc = h.apply(
        &doc,
        Mutation::DeleteQuickHit {
            block_id: block_id.clone(),
            hit_id,
        },
    );
    assert_eq!(hits(&doc).len(), initial);
}

#[test]
fn test_theme_and_meta() {
    let mut h = Harness::new();
    let doc = h.document();

    let midnight = Theme::preset("midnight").unwrap();
    let themed = h.apply(&doc, Mutation::UpdateTheme { theme: midnight.clone() });
    assert_eq!(themed.theme, midnight);

    let renamed = h.apply(
        &themed,
        Mutation::UpdateMeta {
            patch: patch! { "title" => "Issue 7", "issueNumber" => "007" },
        },
    );
    assert_eq!(renamed.meta.title, "Issue 7");
    assert_eq!(renamed.issue_slug(), "007");
}

#[test]
fn test_every_mutation_but_load_stamps_updated_at() {
    let mut h = Harness::new();
    let doc = h.document();
    let created = doc.meta.updated_at;

    let next = h.apply(&doc, Mutation::DeleteBlock { id: "ghost".into() });
    assert!(next.meta.updated_at > created);
    assert_eq!(next.meta.updated_at, h.clock.now());

    let loaded = h.apply(
        &next,
        Mutation::Load {
            document: Box::new(doc.clone()),
        },
    );
    assert_eq!(loaded, doc);
}

#[test]
fn test_load_replaces_document_wholesale() {
    let mut h = Harness::new();
    let current = h.document();
    let imported_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut incoming = Newsletter::empty(&mut h.ids, imported_at);
    incoming.meta.title = "Imported".into();

    let loaded = h.apply(
        &current,
        Mutation::Load {
            document: Box::new(incoming.clone()),
        },
    );
    assert_eq!(loaded, incoming);
    assert!(loaded.block_order.is_empty());
    assert!(loaded.meta.updated_at < h.clock.now());
}

#[test]
fn test_input_snapshot_is_untouched() {
    let mut h = Harness::new();
    let doc = h.document();
    let copy = doc.clone();
    let id = doc.block_order[0].clone();

    let _ = h.apply(&doc, Mutation::DeleteBlock { id });
    assert_eq!(doc, copy);
}
