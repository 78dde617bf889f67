//! Refreshing feed-backed blocks.
//!
//! Every feed is fetched concurrently and fails on its own: a dead or
//! unparseable feed is logged, reported, and left out of the snapshot.

use crate::aggregate::aggregate;
use crate::fetch::FeedFetcher;
use crate::item::FeedItem;
use crate::parse::parse_feed;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::join_all;
use pulse_schema::{Block, Newsletter, TickerSource};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Largest snapshot a block may ask for
const MAX_ITEMS: usize = 50;

/// A feed left out of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedFailure {
    pub url: String,
    pub message: String,
}

/// Outcome of hydrating one set of feeds
#[derive(Debug, Clone, Default, Serialize)]
pub struct HydrationReport {
    pub items: Vec<FeedItem>,
    pub failures: Vec<FeedFailure>,
    /// Feeds that answered with a parseable body
    pub succeeded: usize,
}

/// Fetch `urls` concurrently and aggregate whatever succeeded
#[instrument(skip(fetcher), fields(feeds = urls.len()))]
pub async fn collect(fetcher: &dyn FeedFetcher, urls: &[String], limit: usize) -> HydrationReport {
    let urls: Vec<&str> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();

    let results = join_all(urls.iter().map(|url| async move {
        let body = fetcher.fetch(url).await?;
        parse_feed(&body, url)
    }))
    .await;

    let mut report = HydrationReport::default();
    let mut lists = Vec::new();
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(items) => {
                report.succeeded += 1;
                lists.push(items);
            }
            Err(err) => {
                warn!(url = *url, %err, "Skipping feed");
                report.failures.push(FeedFailure {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    report.items = aggregate(lists, limit.clamp(1, MAX_ITEMS));
    report
}

/// What a document refresh changed
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentRefresh {
    /// Blocks whose snapshot was replaced
    pub refreshed: Vec<String>,
    pub failures: Vec<FeedFailure>,
}

impl DocumentRefresh {
    pub fn changed(&self) -> bool {
        !self.refreshed.is_empty()
    }
}

enum Target {
    Sidebar,
    Ticker,
}

/// Refresh every feed-backed block of `doc`: `rss-sidebar` blocks with feed
/// URLs and tickers in `rss` source mode.
///
/// A block keeps its previous snapshot when none of its feeds succeeded.
/// Anything refreshed stamps the sidebar's `lastFetched` and the document's
/// `updatedAt` with `now`.
pub async fn hydrate_document(
    doc: &mut Newsletter,
    fetcher: &dyn FeedFetcher,
    now: DateTime<Utc>,
) -> DocumentRefresh {
    let jobs: Vec<(String, Target, Vec<String>, usize)> = doc
        .block_order
        .iter()
        .filter_map(|id| match doc.block(id)? {
            Block::RssSidebar(b) if !b.feed_urls.is_empty() => Some((
                id.clone(),
                Target::Sidebar,
                b.feed_urls.clone(),
                b.max_items as usize,
            )),
            Block::Ticker(b) if b.source_mode == TickerSource::Rss && !b.rss_urls.is_empty() => {
                Some((
                    id.clone(),
                    Target::Ticker,
                    b.rss_urls.clone(),
                    b.rss_max_items as usize,
                ))
            }
            _ => None,
        })
        .collect();

    let reports = join_all(
        jobs.iter()
            .map(|(_, _, urls, limit)| collect(fetcher, urls, *limit)),
    )
    .await;

    let mut refresh = DocumentRefresh::default();
    for ((id, target, _, _), report) in jobs.into_iter().zip(reports) {
        refresh.failures.extend(report.failures);
        if report.succeeded == 0 {
            continue;
        }

        match (target, doc.block_mut(&id)) {
            (Target::Sidebar, Some(Block::RssSidebar(b))) => {
                b.items = report.items.iter().map(FeedItem::to_sidebar_item).collect();
                b.last_fetched = now.to_rfc3339_opts(SecondsFormat::Millis, true);
            }
            (Target::Ticker, Some(Block::Ticker(b))) => {
                b.items = report
                    .items
                    .iter()
                    .map(|i| i.display_title().to_string())
                    .collect();
                b.links = report.items.iter().map(FeedItem::to_ticker_link).collect();
            }
            _ => continue,
        }
        refresh.refreshed.push(id);
    }

    if refresh.changed() {
        doc.meta.updated_at = now;
    }
    info!(
        refreshed = refresh.refreshed.len(),
        failures = refresh.failures.len(),
        "Hydrated feed blocks"
    );
    refresh
}
