//! # Pulse Feeds
//!
//! Fetches syndication feeds and folds them into feed-backed blocks.
//!
//! ```text
//! feed urls ──FeedFetcher──► xml ──parse_feed──► items ─┐
//!     (one task per feed, failures isolated)            ├─ aggregate ──► block snapshot
//!                                                       ┘  (dedupe, newest first, cap)
//! ```
//!
//! The fetcher is a trait so hydration can run against canned responses in
//! tests and against the proxy in the CLI.

mod aggregate;
mod error;
mod fetch;
mod hydrate;
mod item;
mod parse;
mod presets;

pub use aggregate::{aggregate, filter_items};
pub use error::{FeedError, FeedResult};
pub use fetch::{FeedFetcher, MemoryFetcher, ProxyFetcher, DEFAULT_TIMEOUT};
pub use hydrate::{collect, hydrate_document, DocumentRefresh, FeedFailure, HydrationReport};
pub use item::FeedItem;
pub use parse::{parse_date, parse_feed};
pub use presets::{preset, presets, presets_tagged, FeedPreset};
pub use pulse_common::runtime::{DEFAULT_FEED_PROXY, FEED_REFRESH_INTERVAL};
