//! RSS and Atom parsing.
//!
//! Elements are matched by local name, so namespaced variants (`dc:date`,
//! `media:thumbnail`, RSS 1.0 under `rdf:RDF`) are picked up without a
//! namespace table.

use crate::error::{FeedError, FeedResult};
use crate::item::FeedItem;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use roxmltree::{Document, Node};
use tracing::debug;

const FEED_ROOTS: [&str; 3] = ["rss", "feed", "RDF"];

/// Parse a feed body into items, in document order.
///
/// `feed_url` names the feed in errors and stands in as the source when the
/// feed has no title of its own.
pub fn parse_feed(xml: &str, feed_url: &str) -> FeedResult<Vec<FeedItem>> {
    let doc = Document::parse(xml.trim_start_matches('\u{feff}')).map_err(|err| {
        FeedError::Parse {
            url: feed_url.to_string(),
            message: err.to_string(),
        }
    })?;

    let root = doc.root_element();
    if !FEED_ROOTS.contains(&root.tag_name().name()) {
        return Err(FeedError::Parse {
            url: feed_url.to_string(),
            message: format!("<{}> is not an RSS or Atom document", root.tag_name().name()),
        });
    }

    let fallback = host_label(feed_url);
    let items: Vec<FeedItem> = if root.tag_name().name() == "feed" {
        let source = child_text(root, &["title"]).unwrap_or(fallback);
        elements(root, "entry")
            .map(|entry| atom_entry(entry, &source))
            .collect()
    } else {
        let channel_title = root
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "channel")
            .and_then(|channel| child_text(channel, &["title"]));
        let source = channel_title.unwrap_or(fallback);
        elements(root, "item")
            .map(|item| rss_item(item, &source))
            .collect()
    };

    debug!(url = feed_url, items = items.len(), "Parsed feed");
    Ok(items)
}

/// Publish date in any of the formats feeds use in practice
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

fn rss_item(item: Node, source: &str) -> FeedItem {
    FeedItem {
        title: child_text(item, &["title"]).unwrap_or_default(),
        link: child_text(item, &["link", "guid"]).unwrap_or_default(),
        pub_date: child_text(item, &["pubDate", "date"]).unwrap_or_default(),
        source: child_text(item, &["source"]).unwrap_or_else(|| source.to_string()),
        description: child_text(item, &["description", "summary"]).unwrap_or_default(),
        image_url: rss_image(item).unwrap_or_default(),
    }
}

fn atom_entry(entry: Node, source: &str) -> FeedItem {
    FeedItem {
        title: child_text(entry, &["title"]).unwrap_or_default(),
        link: atom_link(entry).unwrap_or_default(),
        pub_date: child_text(entry, &["published", "updated"]).unwrap_or_default(),
        source: source.to_string(),
        description: child_text(entry, &["summary", "content"]).unwrap_or_default(),
        image_url: String::new(),
    }
}

/// `rel="alternate"` (or rel-less) link first, any href after that
fn atom_link(entry: Node) -> Option<String> {
    let links: Vec<Node> = children(entry, "link").collect();
    links
        .iter()
        .find(|l| matches!(l.attribute("rel"), None | Some("alternate")) && l.has_attribute("href"))
        .or_else(|| links.iter().find(|l| l.has_attribute("href")))
        .and_then(|l| l.attribute("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .or_else(|| links.iter().find_map(|l| text_of(*l)))
}

fn rss_image(item: Node) -> Option<String> {
    children(item, "enclosure")
        .find(|e| e.attribute("type").is_some_and(|t| t.starts_with("image")))
        .or_else(|| children(item, "thumbnail").next())
        .and_then(|e| e.attribute("url"))
        .map(str::to_string)
}

fn elements<'a, 'input>(
    root: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    root.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of the first named child that has any
fn child_text(node: Node, names: &[&'static str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| children(node, *name).find_map(text_of))
}

fn text_of(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn host_label(feed_url: &str) -> String {
    url::Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| feed_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Neuro AI Weekly</title>
    <item>
      <title>Seizure detection with wearables</title>
      <link>https://example.org/a</link>
      <pubDate>Tue, 04 Mar 2025 10:00:00 GMT</pubDate>
      <description><![CDATA[<p>Small cohort.</p>]]></description>
      <enclosure url="https://example.org/a.jpg" type="image/jpeg" length="1"/>
    </item>
    <item>
      <title>Stroke triage</title>
      <guid>https://example.org/b</guid>
      <dc:date>2025-03-01</dc:date>
      <source url="https://j.example">Journal B</source>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Digital Medicine</title>
  <entry>
    <title>LLM discharge summaries</title>
    <link rel="self" href="https://example.org/self"/>
    <link rel="alternate" href="https://example.org/c"/>
    <updated>2025-03-05T08:00:00Z</updated>
    <summary>Evaluated on 400 notes.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let items = parse_feed(RSS, "https://feeds.example.org/rss").unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Seizure detection with wearables");
        assert_eq!(items[0].link, "https://example.org/a");
        assert_eq!(items[0].source, "Neuro AI Weekly");
        assert_eq!(items[0].description, "<p>Small cohort.</p>");
        assert_eq!(items[0].image_url, "https://example.org/a.jpg");
        assert!(items[0].published_at().is_some());

        assert_eq!(items[1].link, "https://example.org/b");
        assert_eq!(items[1].pub_date, "2025-03-01");
        assert_eq!(items[1].source, "Journal B");
    }

    #[test]
    fn test_parse_atom() {
        let items = parse_feed(ATOM, "https://feeds.example.org/atom").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://example.org/c");
        assert_eq!(items[0].source, "Digital Medicine");
        assert_eq!(items[0].description, "Evaluated on 400 notes.");
        assert_eq!(
            items[0].published_at(),
            Some(Utc.with_ymd_and_hms(2025, 3, 5, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_untitled_feed_uses_host() {
        let xml = r#"<rss><channel><item><link>https://x.org/1</link></item></channel></rss>"#;
        let items = parse_feed(xml, "https://www.news.example.com/feed").unwrap();
        assert_eq!(items[0].source, "news.example.com");
    }

    #[test]
    fn test_malformed_xml_is_a_parse_error() {
        let err = parse_feed("<rss><channel>", "https://bad.example").unwrap_err();
        assert!(matches!(err, FeedError::Parse { ref url, .. } if url == "https://bad.example"));
    }

    #[test]
    fn test_non_feed_document_is_rejected() {
        let err = parse_feed("<html><body>Rate limited</body></html>", "https://p.example").unwrap_err();
        assert!(err.to_string().contains("not an RSS or Atom document"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
        assert_eq!(parse_date("Tue, 04 Mar 2025 10:00:00 GMT"), Some(expected));
        assert_eq!(parse_date("2025-03-04T10:00:00Z"), Some(expected));
        assert_eq!(parse_date("2025-03-04T12:00:00+02:00"), Some(expected));
        assert_eq!(
            parse_date("2025-03-04"),
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("last week"), None);
        assert_eq!(parse_date(""), None);
    }
}
