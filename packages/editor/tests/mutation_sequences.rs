//! Tests for long mutation sequences
//!
//! This tests:
//! - Order/map permutation after arbitrary operation chains
//! - Move inverse law
//! - Undo/redo across mixed operations
//! - Draft persistence through a session

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_editor::{
    patch, EditSession, FileStorage, FixedClock, Mutation, MutationContext, SessionOptions, Storage,
};
use pulse_schema::{BlockType, Newsletter, SequentialIds};
use std::collections::HashSet;

/// Small deterministic generator so sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

fn random_mutation(rng: &mut Lcg, doc: &Newsletter) -> Mutation {
    let len = doc.block_order.len();
    let pick = |rng: &mut Lcg| -> String {
        if len == 0 || rng.next(10) == 0 {
            "ghost".to_string()
        } else {
            doc.block_order[rng.next(len)].clone()
        }
    };

    match rng.next(8) {
        0 | 1 => Mutation::AddBlock {
            block_type: BlockType::ALL[rng.next(BlockType::ALL.len())],
            after_id: Some(pick(rng)),
        },
        2 => Mutation::DeleteBlock { id: pick(rng) },
        3 | 4 => Mutation::MoveBlock {
            from: rng.next(len + 2),
            to: rng.next(len + 2),
        },
        5 => Mutation::DuplicateBlock { id: pick(rng) },
        6 => Mutation::AddArticle { block_id: pick(rng) },
        _ => Mutation::UpdateBlock {
            id: pick(rng),
            patch: patch! { "heading" => "Edited" },
        },
    }
}

fn assert_permutation(doc: &Newsletter) {
    let order: HashSet<&String> = doc.block_order.iter().collect();
    assert_eq!(order.len(), doc.block_order.len(), "duplicate order entry");
    let keys: HashSet<&String> = doc.blocks.keys().collect();
    assert_eq!(order, keys);
    doc.validate().unwrap();
}

#[test]
fn test_block_order_stays_a_permutation() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let clock = FixedClock::new(now);

    for seed in 0..20u64 {
        let mut rng = Lcg(seed);
        let mut ids = SequentialIds::new(&format!("s{}", seed));
        let mut doc = Newsletter::with_defaults(&mut ids, now);

        for _ in 0..60 {
            let mutation = random_mutation(&mut rng, &doc);
            let mut cx = MutationContext::new(&mut ids, &clock);
            doc = mutation.apply(&doc, &mut cx);
            assert_permutation(&doc);
        }
    }
}

#[test]
fn test_move_inverse_law() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let clock = FixedClock::new(now);
    let mut ids = SequentialIds::new("mv");

    let mut doc = Newsletter::empty(&mut ids, now);
    for _ in 0..5 {
        doc.push_block(BlockType::Spacer.create(&mut ids, now));
    }
    let original = doc.block_order.clone();

    let mut cx = MutationContext::new(&mut ids, &clock);
    let moved = Mutation::MoveBlock { from: 2, to: 0 }.apply(&doc, &mut cx);
    assert_eq!(moved.block_order[0], original[2]);

    let restored = Mutation::MoveBlock { from: 0, to: 2 }.apply(&moved, &mut cx);
    assert_eq!(restored.block_order, original);
}

#[test]
fn test_undo_walks_back_through_mixed_operations() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("draft.json"), dir.path().join("versions.json"));
    let mut ids = SequentialIds::new("u");
    let doc = Newsletter::with_defaults(&mut ids, now);

    let mut session = EditSession::with_collaborators(
        doc,
        Box::new(storage.clone()),
        Box::new(ids),
        Box::new(FixedClock::new(now)),
        SessionOptions::default(),
    )
    .unwrap();

    let mut states = vec![session.document().clone()];
    let first = session.document().block_order[0].clone();
    let grid = session
        .document()
        .ordered_blocks()
        .find(|(_, b)| b.map(|b| b.block_type()) == Some(BlockType::ArticleGrid))
        .map(|(id, _)| id.to_string())
        .unwrap();

    for mutation in [
        Mutation::DuplicateBlock { id: first.clone() },
        Mutation::MoveBlock { from: 0, to: 4 },
        Mutation::AddArticle { block_id: grid },
        Mutation::DeleteBlock { id: first },
    ] {
        session.apply(&mutation);
        states.push(session.document().clone());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(session.undo());
        assert_eq!(session.document(), expected);
    }
    assert!(!session.undo());

    while session.redo() {}
    assert_eq!(session.document(), states.last().unwrap());

    session.save_now().unwrap();
    assert_eq!(storage.load().unwrap().as_ref(), Some(session.document()));
}
