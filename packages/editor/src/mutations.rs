//! # Document Mutations
//!
//! Every edit to a newsletter is a [`Mutation`]. Applying one is a pure
//! reduction: the input snapshot is left untouched and a new snapshot is
//! returned.
//!
//! ## Semantics
//!
//! - Missing identifiers and out-of-range indices make an operation a no-op.
//!   A stale reference from the editing surface must never crash a session.
//! - Article and quick-hit operations only act on blocks that own such a list.
//! - Every operation except `Load` stamps `meta.updatedAt`.
//! - Patches replace whole top-level fields. `id` and `type` are never patched.

use crate::clock::Clock;
use crate::patch::{merge, Patch};
use pulse_schema::{Article, Block, BlockType, IdSource, Newsletter, QuickHit, Theme};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Semantic document operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Replace the whole document
    Load { document: Box<Newsletter> },

    /// Insert a default block after `after_id`, or at the end
    AddBlock {
        block_type: BlockType,
        after_id: Option<String>,
    },

    DeleteBlock { id: String },

    UpdateBlock { id: String, patch: Patch },

    /// Remove the entry at `from` and reinsert it at `to`
    MoveBlock { from: usize, to: usize },

    /// Deep clone with fresh identifiers, inserted right after the source
    DuplicateBlock { id: String },

    UpdateTheme { theme: Theme },

    UpdateMeta { patch: Patch },

    AddArticle { block_id: String },

    UpdateArticle {
        block_id: String,
        article_id: String,
        patch: Patch,
    },

    DeleteArticle { block_id: String, article_id: String },

    MoveArticle {
        block_id: String,
        from: usize,
        to: usize,
    },

    AddQuickHit { block_id: String },

    UpdateQuickHit {
        block_id: String,
        hit_id: String,
        patch: Patch,
    },

    DeleteQuickHit { block_id: String, hit_id: String },

    MoveQuickHit {
        block_id: String,
        from: usize,
        to: usize,
    },
}

/// Collaborators a reduction may draw on
pub struct MutationContext<'a> {
    pub ids: &'a mut dyn IdSource,
    pub clock: &'a dyn Clock,
}

impl<'a> MutationContext<'a> {
    pub fn new(ids: &'a mut dyn IdSource, clock: &'a dyn Clock) -> Self {
        Self { ids, clock }
    }
}

const PROTECTED_BLOCK_KEYS: &[&str] = &["id", "type"];
const PROTECTED_ENTITY_KEYS: &[&str] = &["id"];

impl Mutation {
    /// Short label used for undo history
    pub fn describe(&self) -> &'static str {
        match self {
            Mutation::Load { .. } => "Load document",
            Mutation::AddBlock { .. } => "Add block",
            Mutation::DeleteBlock { .. } => "Delete block",
            Mutation::UpdateBlock { .. } => "Edit block",
            Mutation::MoveBlock { .. } => "Move block",
            Mutation::DuplicateBlock { .. } => "Duplicate block",
            Mutation::UpdateTheme { .. } => "Change theme",
            Mutation::UpdateMeta { .. } => "Edit issue details",
            Mutation::AddArticle { .. } => "Add article",
            Mutation::UpdateArticle { .. } => "Edit article",
            Mutation::DeleteArticle { .. } => "Delete article",
            Mutation::MoveArticle { .. } => "Move article",
            Mutation::AddQuickHit { .. } => "Add quick hit",
            Mutation::UpdateQuickHit { .. } => "Edit quick hit",
            Mutation::DeleteQuickHit { .. } => "Delete quick hit",
            Mutation::MoveQuickHit { .. } => "Move quick hit",
        }
    }

    /// Reduce `doc` by this mutation into a new snapshot
    pub fn apply(&self, doc: &Newsletter, cx: &mut MutationContext<'_>) -> Newsletter {
        let mut next = doc.clone();

        match self {
            Mutation::Load { document } => return (**document).clone(),

            Mutation::AddBlock {
                block_type,
                after_id,
            } => Self::apply_add_block(&mut next, *block_type, after_id.as_deref(), cx),

            Mutation::DeleteBlock { id } => Self::apply_delete_block(&mut next, id),

            Mutation::UpdateBlock { id, patch } => Self::apply_update_block(&mut next, id, patch),

            Mutation::MoveBlock { from, to } => {
                if !move_within(&mut next.block_order, *from, *to) {
                    debug!(from, to, "MoveBlock out of range, ignored");
                }
            }

            Mutation::DuplicateBlock { id } => Self::apply_duplicate(&mut next, id, cx),

            Mutation::UpdateTheme { theme } => next.theme = theme.clone(),

            Mutation::UpdateMeta { patch } => match merge(&next.meta, patch, &[]) {
                Ok(meta) => next.meta = meta,
                Err(e) => warn!(error = %e, "UpdateMeta patch rejected"),
            },

            Mutation::AddArticle { block_id } => {
                if let Some(articles) = next.block_mut(block_id).and_then(Block::articles_mut) {
                    articles.push(Article::blank(cx.ids.next_id()));
                }
            }

            Mutation::UpdateArticle {
                block_id,
                article_id,
                patch,
            } => Self::apply_update_article(&mut next, block_id, article_id, patch),

            Mutation::DeleteArticle {
                block_id,
                article_id,
            } => {
                if let Some(articles) = next.block_mut(block_id).and_then(Block::articles_mut) {
                    articles.retain(|a| &a.id != article_id);
                }
            }

            Mutation::MoveArticle { block_id, from, to } => {
                if let Some(articles) = next.block_mut(block_id).and_then(Block::articles_mut) {
                    move_within(articles, *from, *to);
                }
            }

            Mutation::AddQuickHit { block_id } => {
                if let Some(hits) = next.block_mut(block_id).and_then(Block::quick_hits_mut) {
                    hits.push(QuickHit::blank(cx.ids.next_id()));
                }
            }

            Mutation::UpdateQuickHit {
                block_id,
                hit_id,
                patch,
            } => {
                if let Some(hits) = next.block_mut(block_id).and_then(Block::quick_hits_mut) {
                    if let Some(hit) = hits.iter_mut().find(|h| &h.id == hit_id) {
                        patch_in_place(hit, patch, PROTECTED_ENTITY_KEYS);
                    }
                }
            }

            Mutation::DeleteQuickHit { block_id, hit_id } => {
                if let Some(hits) = next.block_mut(block_id).and_then(Block::quick_hits_mut) {
                    hits.retain(|h| &h.id != hit_id);
                }
            }

            Mutation::MoveQuickHit { block_id, from, to } => {
                if let Some(hits) = next.block_mut(block_id).and_then(Block::quick_hits_mut) {
                    move_within(hits, *from, *to);
                }
            }
        }

        next.meta.updated_at = cx.clock.now();
        next
    }

    fn apply_add_block(
        doc: &mut Newsletter,
        block_type: BlockType,
        after_id: Option<&str>,
        cx: &mut MutationContext<'_>,
    ) {
        let block = block_type.create(cx.ids, cx.clock.now());
        let id = block.id().to_string();

        let position = after_id
            .and_then(|after| doc.index_of(after))
            .map(|index| index + 1)
            .unwrap_or(doc.block_order.len());

        debug!(block_type = %block_type, id = %id, position, "Adding block");
        doc.block_order.insert(position, id.clone());
        doc.blocks.insert(id, block);
    }

    fn apply_delete_block(doc: &mut Newsletter, id: &str) {
        doc.block_order.retain(|b| b != id);
        if doc.blocks.remove(id).is_none() {
            debug!(id, "DeleteBlock on missing block, ignored");
        }
    }

    fn apply_update_block(doc: &mut Newsletter, id: &str, patch: &Patch) {
        match doc.block_mut(id) {
            Some(block) => patch_in_place(block, patch, PROTECTED_BLOCK_KEYS),
            None => debug!(id, "UpdateBlock on missing block, ignored"),
        }
    }

    fn apply_duplicate(doc: &mut Newsletter, id: &str, cx: &mut MutationContext<'_>) {
        let Some(source) = doc.block(id) else {
            debug!(id, "DuplicateBlock on missing block, ignored");
            return;
        };

        let mut clone = source.clone();
        clone.reassign_ids(cx.ids);
        let clone_id = clone.id().to_string();

        let position = doc
            .index_of(id)
            .map(|index| index + 1)
            .unwrap_or(doc.block_order.len());
        doc.block_order.insert(position, clone_id.clone());
        doc.blocks.insert(clone_id, clone);
    }

    fn apply_update_article(doc: &mut Newsletter, block_id: &str, article_id: &str, patch: &Patch) {
        let Some(block) = doc.block_mut(block_id) else {
            return;
        };

        if let Some(articles) = block.articles_mut() {
            if let Some(article) = articles.iter_mut().find(|a| a.id == article_id) {
                patch_in_place(article, patch, PROTECTED_ENTITY_KEYS);
            }
        } else if let Some(article) = block.spotlight_article_mut() {
            if article.id == article_id {
                patch_in_place(article, patch, PROTECTED_ENTITY_KEYS);
            }
        }
    }
}

fn patch_in_place<T>(target: &mut T, patch: &Patch, protected: &[&str])
where
    T: Serialize + serde::de::DeserializeOwned,
{
    match merge(target, patch, protected) {
        Ok(merged) => *target = merged,
        Err(e) => warn!(error = %e, "Patch does not fit target, ignored"),
    }
}

/// Splice-style move. Returns false (and leaves `items` alone) when either
/// index is out of range.
fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
