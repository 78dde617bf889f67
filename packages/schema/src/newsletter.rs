//! The root aggregate.

use crate::block::Block;
use crate::error::{SchemaError, SchemaResult};
use crate::ids::IdSource;
use crate::registry::BlockType;
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub id: String,
    pub title: String,
    pub issue_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A newsletter issue.
///
/// `block_order` is a permutation of the keys of `blocks`. Blocks are kept in
/// a sorted map so the JSON form has a stable key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    pub meta: Meta,
    pub theme: Theme,
    pub block_order: Vec<String>,
    pub blocks: BTreeMap<String, Block>,
}

/// Sections of the default issue, in document order
const DEFAULT_LAYOUT: [(BlockType, Option<(&str, u32)>); 18] = [
    (BlockType::Header, None),
    (BlockType::Ticker, None),
    (BlockType::SectionDivider, Some(("TOP CLINICAL AI NEWS", 1))),
    (BlockType::ArticleGrid, None),
    (BlockType::Spotlight, None),
    (BlockType::SectionDivider, Some(("AI SAFETY & ETHICS", 2))),
    (BlockType::EthicsSplit, None),
    (BlockType::AiSafety, None),
    (BlockType::SectionDivider, Some(("CLINICAL AI SKILLS", 3))),
    (BlockType::SbarPrompt, None),
    (BlockType::ClinicalPromptTemplates, None),
    (BlockType::TermOfMonth, None),
    (BlockType::SectionDivider, Some(("INSTITUTION & COMMUNITY", 4))),
    (BlockType::InstitutionalSpotlight, None),
    (BlockType::RssSidebar, None),
    (BlockType::Humor, None),
    (BlockType::Spacer, None),
    (BlockType::Footer, None),
];

impl Newsletter {
    /// Empty issue with the default theme
    pub fn empty(ids: &mut dyn IdSource, now: DateTime<Utc>) -> Self {
        Self {
            meta: Meta {
                id: ids.next_id(),
                title: "Clinical AI Pulse - Issue 001".to_string(),
                issue_number: "001".to_string(),
                created_at: now,
                updated_at: now,
            },
            theme: Theme::default(),
            block_order: Vec::new(),
            blocks: BTreeMap::new(),
        }
    }

    /// The default-document factory: an issue seeded with the standard sections
    pub fn with_defaults(ids: &mut dyn IdSource, now: DateTime<Utc>) -> Self {
        let mut newsletter = Self::empty(ids, now);

        for (block_type, divider) in DEFAULT_LAYOUT {
            let mut block = block_type.create(ids, now);
            if let (Block::SectionDivider(d), Some((label, number))) = (&mut block, divider) {
                d.label = label.to_string();
                d.number = number;
            }
            newsletter.push_block(block);
        }

        newsletter
    }

    /// Append a block to the end of the document
    pub fn push_block(&mut self, block: Block) {
        let id = block.id().to_string();
        self.block_order.push(id.clone());
        self.blocks.insert(id, block);
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    /// Position of a block in document order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.block_order.iter().position(|b| b == id)
    }

    /// Blocks in document order. Dangling order entries yield `(id, None)`.
    pub fn ordered_blocks(&self) -> impl Iterator<Item = (&str, Option<&Block>)> {
        self.block_order
            .iter()
            .map(move |id| (id.as_str(), self.blocks.get(id)))
    }

    /// Check the order/map permutation invariant and key/id agreement
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for id in &self.block_order {
            if !seen.insert(id.as_str()) {
                return Err(SchemaError::DuplicateOrderEntry(id.clone()));
            }
            if !self.blocks.contains_key(id) {
                return Err(SchemaError::DanglingBlock(id.clone()));
            }
        }

        for (key, block) in &self.blocks {
            if !seen.contains(key.as_str()) {
                return Err(SchemaError::OrphanBlock(key.clone()));
            }
            if block.id() != key {
                return Err(SchemaError::MismatchedKey {
                    key: key.clone(),
                    id: block.id().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Pretty-printed JSON with a two-space indent
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse without invariant checks (the `Load` path)
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and validate (the strict import path)
    pub fn import_json(json: &str) -> SchemaResult<Self> {
        let newsletter = Self::from_json(json)?;
        newsletter.validate()?;
        Ok(newsletter)
    }

    /// Issue number with whitespace removed, `draft` when empty
    pub fn issue_slug(&self) -> String {
        let slug: String = self
            .meta
            .issue_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if slug.is_empty() {
            "draft".to_string()
        } else {
            slug
        }
    }
}
