//! # Pulse Schema
//!
//! The newsletter document model and the block schema registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: Newsletter, Block, Theme            │
//! │  - registry: tags, labels, default factory  │
//! │  - JSON shape (camelCase, `type` tags)      │
//! └─────────────────────────────────────────────┘
//!          ↓ seeds                  ↓ read by
//! ┌──────────────────┐    ┌──────────────────────┐
//! │ editor: reducers │    │ theme / render / ... │
//! └──────────────────┘    └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_schema::{Newsletter, UuidIds};
//!
//! let doc = Newsletter::with_defaults(&mut UuidIds, chrono::Utc::now());
//! let json = doc.to_json_pretty()?;
//! assert_eq!(Newsletter::import_json(&json)?, doc);
//! ```

mod block;
mod entities;
mod error;
mod ids;
mod newsletter;
mod registry;
mod theme;

pub use block::*;
pub use entities::*;
pub use error::{SchemaError, SchemaResult};
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use newsletter::{Meta, Newsletter};
pub use registry::{block_tags, create_block, BlockType};
pub use theme::{presets, ColorToken, FontToken, Theme};
