use crate::item::FeedItem;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Merge per-feed lists into one snapshot.
///
/// Items without a link are dropped and the first occurrence of a link wins.
/// The result is newest first with undated items last (in feed order), capped
/// at `limit`.
pub fn aggregate(lists: Vec<Vec<FeedItem>>, limit: usize) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    let mut merged: Vec<FeedItem> = lists
        .into_iter()
        .flatten()
        .filter(|item| !item.link.is_empty() && seen.insert(item.link.clone()))
        .collect();

    // Stable, so equal dates keep their feed order
    merged.sort_by_key(|item| Reverse(item.published_at()));
    merged.truncate(limit);
    merged
}

/// Items whose title or description contains `query`, ignoring case
pub fn filter_items<'a>(items: &'a [FeedItem], query: &str) -> Vec<&'a FeedItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            query.is_empty()
                || format!("{} {}", item.title, item.description)
                    .to_lowercase()
                    .contains(&query)
        })
        .collect()
}
