use crate::blocks;
use crate::node::RNode;
use pulse_schema::{Block, BlockType, Newsletter};
use pulse_theme::RenderMode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Canonical tree of one block, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTree {
    pub id: String,
    /// `None` when the order names a block the map lacks
    #[serde(rename = "type")]
    pub block_type: Option<BlockType>,
    pub node: RNode,
}

/// Whether `mode` can show `block_type` faithfully.
///
/// Raw HTML is the only content email clients cannot be trusted with.
pub fn supports(block_type: BlockType, mode: RenderMode) -> bool {
    !(block_type == BlockType::HtmlEmbed && mode == RenderMode::Email)
}

/// Tree for one block, or a labeled placeholder where the mode cannot show it
pub fn render_block(block: &Block, mode: RenderMode) -> RNode {
    if !supports(block.block_type(), mode) {
        debug!(block = block.id(), %mode, "Block not supported in mode, using placeholder");
        return RNode::placeholder(format!(
            "[{}: view the web version for full rendering]",
            unsupported_label(block)
        ));
    }
    blocks::build(block, mode)
}

/// Trees for every block of `doc`, in `block_order`
#[instrument(skip(doc), fields(blocks = doc.block_order.len()))]
pub fn render_document(doc: &Newsletter, mode: RenderMode) -> Vec<BlockTree> {
    doc.ordered_blocks()
        .map(|(id, block)| match block {
            Some(block) => BlockTree {
                id: id.to_string(),
                block_type: Some(block.block_type()),
                node: render_block(block, mode),
            },
            None => {
                warn!(block = id, "Block order names a missing block");
                BlockTree {
                    id: id.to_string(),
                    block_type: None,
                    node: RNode::placeholder(format!("Missing block {}", id)),
                }
            }
        })
        .collect()
}

fn unsupported_label(block: &Block) -> &str {
    match block {
        Block::HtmlEmbed(embed) if !embed.label.trim().is_empty() => embed.label.trim(),
        Block::HtmlEmbed(_) => "Custom HTML",
        other => other.block_type().label(),
    }
}
