//! Issue chrome: masthead, ticker, section dividers and footer.

use super::{feed_list, image_source, join_nonempty, linked};
use crate::node::{text_if, FeedVariant, Frame, Layout, Nodes, Paint, RNode, Spacing, TextRole};
use pulse_schema::{
    Alignment, ColorToken, DividerStyle, FooterBlock, HeaderBackground, HeaderBlock, LineStyle,
    SectionDividerBlock, TickerBlock, TickerSource,
};
use pulse_theme::RenderMode;

pub(super) fn header(b: &HeaderBlock) -> RNode {
    let background = match b.background_style {
        HeaderBackground::Solid => Paint::Token(ColorToken::Primary),
        _ => Paint::Gradient(ColorToken::Primary, ColorToken::Secondary),
    };
    let logo = image_source(&b.logo_data_url, &b.logo_url)
        .map(|src| RNode::image(src, format!("{} logo", b.title.trim())).with_size(None, Some(60)));

    RNode::stack(
        Nodes::new()
            .maybe(logo)
            .text(&join_nonempty(&[&b.issue_number, &b.issue_date], " · "), TextRole::Eyebrow)
            .text(&b.title, TextRole::Masthead)
            .text(&b.subtitle, TextRole::Subheading)
            .node(RNode::Rule {
                color: Paint::custom_or(&b.accent_color, ColorToken::Surface),
                style: LineStyle::Solid,
            })
            .text(&b.tagline, TextRole::Small)
            .build(),
    )
    .with_frame(Frame::inverse(background).align(Alignment::Center))
}

pub(super) fn ticker(b: &TickerBlock, mode: RenderMode) -> RNode {
    let live = b.source_mode == TickerSource::Rss;

    let entries: Vec<RNode> = if live || b.use_links {
        b.links
            .iter()
            .filter_map(|l| text_if(&l.text, TextRole::Strong).map(|t| linked(&l.url, t)))
            .collect()
    } else {
        b.items
            .iter()
            .filter_map(|item| text_if(item, TextRole::Strong))
            .collect()
    };

    let strip = RNode::container(
        Layout::Marquee {
            seconds: b.speed.loop_seconds(),
        },
        entries,
    )
    .with_frame(
        Frame::padded(Spacing::Small)
            .background(Paint::custom_or(&b.background_color, ColorToken::Primary))
            .ink(Paint::custom_or(&b.text_color, ColorToken::Surface)),
    );

    if live && mode.is_interactive() {
        RNode::Feed {
            variant: FeedVariant::Ticker,
            key: b.id.clone(),
            feeds: feed_list(&b.rss_urls),
            limit: b.rss_max_items.clamp(1, 50),
            children: vec![strip],
        }
    } else {
        strip
    }
}

pub(super) fn section_divider(b: &SectionDividerBlock) -> RNode {
    let number = (b.number > 0).then(|| format!("{:02}", b.number));

    if b.style == DividerStyle::Bold {
        let title = RNode::stack(
            Nodes::new()
                .text("Section", TextRole::Eyebrow)
                .text(&b.label, TextRole::Title)
                .text(&b.description, TextRole::Body)
                .build(),
        );
        return RNode::row(
            Nodes::new()
                .maybe(number.map(|n| RNode::text(n, TextRole::Numeral)))
                .node(title)
                .build(),
        )
        .with_frame(Frame::inverse(ColorToken::Primary));
    }

    let label = b.label.trim().to_uppercase();
    let eyebrow = match number {
        Some(n) if !label.is_empty() => format!("{} —— {}", n, label),
        Some(n) => n,
        None => label,
    };
    let rule = match b.style {
        DividerStyle::Gradient => ColorToken::Accent,
        _ => ColorToken::Border,
    };

    RNode::stack(
        Nodes::new()
            .colored(&eyebrow, TextRole::Eyebrow, ColorToken::Muted)
            .node(RNode::Rule {
                color: rule.into(),
                style: LineStyle::Solid,
            })
            .colored(&b.description, TextRole::Body, ColorToken::Muted)
            .build(),
    )
    .with_frame(Frame::padded(Spacing::Medium))
}

pub(super) fn footer(b: &FooterBlock) -> RNode {
    let next_issue = join_nonempty(&[&b.next_issue_date, &b.next_issue_teaser], " · ");
    let next_issue = (!next_issue.is_empty()).then(|| {
        RNode::stack(vec![
            RNode::text("Next Issue", TextRole::Eyebrow),
            RNode::text(next_issue, TextRole::Body),
        ])
        .with_frame(Frame::padded(Spacing::Small).border(ColorToken::Surface).rounded())
    });

    let mut links: Vec<RNode> = [
        ("Website", &b.website_url),
        ("Subscribe", &b.subscribe_url),
        ("Unsubscribe", &b.unsubscribe_url),
    ]
    .into_iter()
    .filter(|(_, url)| !url.trim().is_empty())
    .map(|(label, url)| RNode::link(url.trim(), vec![RNode::text(label, TextRole::Small)]))
    .collect();
    if !b.contact_email.trim().is_empty() {
        links.push(RNode::link(
            format!("mailto:{}", b.contact_email.trim()),
            vec![RNode::text("Contact Us", TextRole::Small)],
        ));
    }

    let socials: Vec<RNode> = if b.show_socials {
        b.socials
            .iter()
            .filter(|s| !s.url.trim().is_empty())
            .map(|s| {
                let label = join_nonempty(&[&s.icon, &s.platform], " ");
                RNode::link(s.url.trim(), vec![RNode::text(label, TextRole::Small)])
            })
            .collect()
    } else {
        Vec::new()
    };

    let copyright = join_nonempty(&[&b.copyright_year, &b.institution], " ");

    RNode::stack(
        Nodes::new()
            .maybe(next_issue)
            .text(&b.institution, TextRole::Title)
            .text(&b.department, TextRole::Body)
            .text(&b.editors, TextRole::Small)
            .maybe((!links.is_empty()).then(|| RNode::row(links)))
            .maybe((!socials.is_empty()).then(|| RNode::row(socials)))
            .text(&b.disclaimer, TextRole::Small)
            .maybe((!copyright.is_empty()).then(|| RNode::text(format!("© {}", copyright), TextRole::Caption)))
            .build(),
    )
    .with_frame(Frame::inverse(ColorToken::Primary).align(Alignment::Center))
}
