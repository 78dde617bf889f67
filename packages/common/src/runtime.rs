//! Settings shared between the Rust side and the scripts shipped in artifacts.

use std::time::Duration;

/// Proxy that returns a remote feed body as plain text; the feed URL is
/// appended percent-encoded.
pub const DEFAULT_FEED_PROXY: &str = "https://api.allorigins.win/raw?url=";

/// How often live feeds are refreshed
pub const FEED_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);
