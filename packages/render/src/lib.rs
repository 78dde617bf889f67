//! # Pulse Render
//!
//! Projects blocks into one target-agnostic tree that every output format
//! serializes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  render_block(block, mode)  ┌──────────────────┐
//! │ schema Block │ ──────────────────────────→ │ RNode tree       │
//! └──────────────┘                             └──────────────────┘
//!                                                  ↓        ↓        ↓
//!                                   ┌──────────────┐ ┌─────────┐ ┌─────────────┐
//!                                   │ html: classes│ │ email:  │ │ viewer:     │
//!                                   │ + stylesheet │ │ tables  │ │ JSON + JS   │
//!                                   └──────────────┘ └─────────┘ └─────────────┘
//! ```
//!
//! ## Principles
//!
//! 1. **One place per variant**: content decisions live in the tree builders,
//!    serializers only handle their dialect.
//! 2. **Same text everywhere**: a mode only decides whether interactive
//!    controls wrap the content, never whether the content appears.
//! 3. **Tokens, not colors**: nodes carry theme tokens or the user's own
//!    values; each target resolves them.
//! 4. **Visible fallbacks**: anything a target cannot show becomes a labeled
//!    placeholder.

mod blocks;
mod contract;
mod node;

pub use contract::{render_block, render_document, supports, BlockTree};
pub use node::{ordinal, text_if, FeedVariant, Frame, Layout, Nodes, Paint, RNode, Spacing, TextRole};
pub use pulse_theme::RenderMode;
