//! Recurring features: term of the month, case file, humor, institutional
//! news and the feed sidebar.

use super::{badges, cover_image, feed_list, image_source, inset, labelled_box, linked, prefixed, read_more};
use crate::node::{ordinal, text_if, FeedVariant, Frame, Nodes, RNode, Spacing, TextRole};
use pulse_schema::{
    AiCaseFileBlock, Alignment, ColorToken, HumorBlock, ImageFit, InstitutionalSpotlightBlock,
    RssSidebarBlock, SidebarPosition, TermOfMonthBlock,
};
use pulse_theme::RenderMode;

pub(super) fn term_of_month(b: &TermOfMonthBlock) -> RNode {
    let boxes = [
        ("Definition", &b.definition),
        ("Relevance to Medicine", &b.relevance),
        ("Clinical Application", &b.clinical_application),
    ]
    .into_iter()
    .filter_map(|(label, body)| labelled_box(label, body, inset()))
    .collect();

    let related = badges(&b.related_terms, ColorToken::Primary.into())
        .map(|tags| RNode::row(vec![RNode::text("Related:", TextRole::Strong), tags]));

    RNode::stack(
        Nodes::new()
            .colored("📖 AI Term of the Month", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.term, TextRole::Title)
            .node(RNode::grid(3, boxes))
            .maybe(related)
            .build(),
    )
}

pub(super) fn ai_case_file(b: &AiCaseFileBlock) -> RNode {
    let image = image_source(&b.image_data_url, &b.image_url).map(|src| {
        RNode::image(src, b.title.trim())
            .with_size(Some(100), Some(80))
            .with_fit(ImageFit::Cover)
    });
    let badge = RNode::stack(
        Nodes::new()
            .text(&b.year, TextRole::Numeral)
            .text("AI Case File", TextRole::Eyebrow)
            .maybe(image)
            .build(),
    )
    .with_frame(Frame::inverse(ColorToken::Primary).align(Alignment::Center));

    let label = [b.source_label.trim(), b.source_url.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default();
    let source = text_if(label, TextRole::Small).map(|text| linked(&b.source_url, text));

    let detail = RNode::stack(
        Nodes::new()
            .text(&b.title, TextRole::Title)
            .text(&b.content, TextRole::Body)
            .maybe(labelled_box("Significance:", &b.significance, inset()))
            .maybe(source)
            .build(),
    );

    RNode::row(vec![badge, detail]).with_frame(Frame::card())
}

pub(super) fn humor(b: &HumorBlock) -> RNode {
    let picture = match image_source(&b.image_data_url, &b.image_url) {
        Some(src) => Some(
            RNode::image(src, b.heading.trim())
                .with_size(None, Some(b.image_height.unwrap_or(200)))
                .with_fit(b.image_fit.unwrap_or(ImageFit::Contain)),
        ),
        None => text_if(&b.emoji_decor, TextRole::Masthead),
    };
    let attribution = prefixed("—", &b.attribution);

    RNode::stack(
        Nodes::new()
            .node(RNode::row(
                Nodes::new()
                    .node(RNode::text("😄", TextRole::Title))
                    .text(&b.heading, TextRole::Title)
                    .build(),
            ))
            .maybe(picture)
            .text(&b.content, TextRole::Quote)
            .colored(&attribution, TextRole::Small, ColorToken::Muted)
            .maybe(read_more(&b.source_url, "Source ↗"))
            .build(),
    )
    .with_frame(Frame::card().align(Alignment::Center))
}

pub(super) fn institutional_spotlight(b: &InstitutionalSpotlightBlock) -> RNode {
    let limit = match b.max_items {
        0 => b.items.len(),
        n => n as usize,
    };
    let cards = b.items.iter().take(limit).map(|item| {
        RNode::stack(
            Nodes::new()
                .maybe(cover_image(&item.image_url, &item.title, 140))
                .colored(&item.category, TextRole::Eyebrow, ColorToken::Accent)
                .maybe(text_if(&item.title, TextRole::Strong).map(|t| linked(&item.url, t)))
                .text(&item.summary, TextRole::Body)
                .colored(&item.pub_date, TextRole::Small, ColorToken::Muted)
                .maybe(read_more(&item.url, "Read more →"))
                .build(),
        )
        .with_frame(Frame::card())
    });

    let updated = if b.last_fetched.trim().is_empty() {
        String::new()
    } else {
        format!("Updated {}", b.last_fetched.trim())
    };

    RNode::stack(
        Nodes::new()
            .colored("🏥 Institutional Spotlight", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .colored(&b.subheading, TextRole::Subheading, ColorToken::Muted)
            .colored(&updated, TextRole::Small, ColorToken::Muted)
            .node(RNode::grid(3, cards.collect()))
            .build(),
    )
}

pub(super) fn rss_sidebar(b: &RssSidebarBlock, mode: RenderMode) -> RNode {
    let limit = b.max_items.clamp(1, 50);
    let feeds = feed_list(&b.feed_urls);

    let status = if b.last_fetched.trim().is_empty() {
        "Snapshot".to_string()
    } else {
        format!("Updated {}", b.last_fetched.trim())
    };
    let header = RNode::row(
        Nodes::new()
            .node(RNode::text("📰", TextRole::Body))
            .text(&b.heading, TextRole::Eyebrow)
            .node(RNode::text(status, TextRole::Small))
            .build(),
    )
    .with_frame(
        Frame::padded(Spacing::Small)
            .background(ColorToken::Primary)
            .ink(ColorToken::Surface),
    );

    let mut items: Vec<RNode> = b
        .items
        .iter()
        .take(limit as usize)
        .enumerate()
        .map(|(i, item)| {
            let meta = Nodes::new()
                .colored(&item.source, TextRole::Small, ColorToken::Muted)
                .colored(&item.pub_date, TextRole::Small, ColorToken::Muted)
                .build();
            RNode::row(vec![
                RNode::text(ordinal(i), TextRole::Numeral).with_color(ColorToken::Accent),
                RNode::stack(
                    Nodes::new()
                        .maybe(text_if(&item.title, TextRole::Strong).map(|t| linked(&item.url, t)))
                        .maybe((!meta.is_empty()).then(|| RNode::row(meta)))
                        .build(),
                ),
            ])
        })
        .collect();
    if items.is_empty() {
        let empty = if feeds.is_empty() {
            "No feeds configured."
        } else {
            "Snapshot not available yet."
        };
        items.push(RNode::text(empty, TextRole::Small).with_color(ColorToken::Muted));
    }

    let list = RNode::stack(items).with_frame(Frame::padded(Spacing::Small));
    let list = if mode.is_interactive() && !feeds.is_empty() {
        RNode::Feed {
            variant: FeedVariant::Sidebar,
            key: b.id.clone(),
            feeds,
            limit,
            children: vec![list],
        }
    } else {
        list
    };

    let frame = Frame::default().border(ColorToken::Border).rounded();
    let frame = match b.position {
        SidebarPosition::SidebarRight => frame.max_width(320),
        SidebarPosition::Inline => frame,
    };
    RNode::stack(vec![header, list]).with_frame(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_schema::SidebarItem;

    fn sidebar(feeds: &[&str], items: usize, max_items: u32) -> RssSidebarBlock {
        RssSidebarBlock {
            id: "rss".into(),
            heading: "Latest".into(),
            feed_urls: feeds.iter().map(|s| s.to_string()).collect(),
            items: (0..items)
                .map(|i| SidebarItem {
                    title: format!("Item {}", i),
                    url: format!("https://example.org/{}", i),
                    source: "Feed".into(),
                    pub_date: String::new(),
                })
                .collect(),
            max_items,
            last_fetched: String::new(),
            position: SidebarPosition::Inline,
            refresh_on_view: true,
            enable_scroll: None,
        }
    }

    fn numerals(node: &RNode) -> Vec<String> {
        let mut out = Vec::new();
        node.walk(&mut |n| {
            if let RNode::Text { content, role: TextRole::Numeral, .. } = n {
                out.push(content.clone());
            }
        });
        out
    }

    #[test]
    fn test_sidebar_caps_items() {
        let tree = rss_sidebar(&sidebar(&["https://a/rss"], 12, 5), RenderMode::StaticPage);
        assert_eq!(numerals(&tree), vec!["01", "02", "03", "04", "05"]);
    }

    #[test]
    fn test_sidebar_empty_states() {
        let none = rss_sidebar(&sidebar(&[], 0, 8), RenderMode::StaticPage);
        assert!(none.texts().contains(&"No feeds configured."));

        let pending = rss_sidebar(&sidebar(&["https://a/rss"], 0, 8), RenderMode::StaticPage);
        assert!(pending.texts().contains(&"Snapshot not available yet."));
    }

    #[test]
    fn test_sidebar_is_live_only_when_interactive() {
        let block = sidebar(&["https://a/rss"], 2, 8);
        let live = rss_sidebar(&block, RenderMode::Interactive);
        assert!(live.any(|n| matches!(n, RNode::Feed { limit: 8, .. })));
        let email = rss_sidebar(&block, RenderMode::Email);
        assert!(!email.any(|n| matches!(n, RNode::Feed { .. })));
    }
}
