//! Research coverage: article grids, the spotlight and quick hits.

use super::{badges, cover_image, inset, join_nonempty, labelled_box, linked, prefixed, read_more};
use crate::node::{ordinal, text_if, Frame, Nodes, Paint, RNode, Spacing, TextRole};
use pulse_schema::{
    Article, ArticleGridBlock, ArticleLayout, ColorToken, EvidenceLevel, QuickHitsBlock,
    SpotlightBlock, SpotlightLayout,
};

/// Badge color for a grade of evidence
pub(crate) fn evidence_token(level: EvidenceLevel) -> ColorToken {
    match level {
        EvidenceLevel::High => ColorToken::Accent,
        EvidenceLevel::Moderate => ColorToken::Secondary,
        EvidenceLevel::Low | EvidenceLevel::Unrated => ColorToken::Muted,
        EvidenceLevel::ExpertOpinion => ColorToken::Primary,
    }
}

fn evidence_badge(level: EvidenceLevel) -> Option<RNode> {
    level
        .label()
        .map(|label| RNode::text(label, TextRole::Badge).with_color(evidence_token(level)))
}

fn my_take(article: &Article, edge: Paint) -> Option<RNode> {
    text_if(&article.my_take, TextRole::Quote)
        .map(|quote| RNode::stack(vec![quote]).with_frame(Frame::padded(Spacing::Small).accent_edge(edge)))
}

fn article_card(article: &Article, layout: ArticleLayout) -> RNode {
    let padding = match layout {
        ArticleLayout::Compact => Spacing::Small,
        _ => Spacing::Medium,
    };
    let meta = Nodes::new()
        .colored(&article.source, TextRole::Eyebrow, ColorToken::Muted)
        .maybe(evidence_badge(article.evidence_level))
        .build();

    RNode::stack(
        Nodes::new()
            .maybe(cover_image(&article.image_url, &article.title, 160))
            .maybe((!meta.is_empty()).then(|| RNode::row(meta)))
            .maybe(text_if(&article.title, TextRole::Title).map(|t| linked(&article.url, t)))
            .colored(&article.summary, TextRole::Body, ColorToken::Muted)
            .maybe(labelled_box("Clinical Context", &article.clinical_context, inset()))
            .maybe(my_take(article, ColorToken::Accent.into()))
            .maybe(badges(&article.tags, ColorToken::Primary.into()))
            .colored(&article.pub_date, TextRole::Small, ColorToken::Muted)
            .maybe(read_more(&article.url, "Read full paper →"))
            .build(),
    )
    .with_frame(Frame {
        padding,
        ..Frame::card()
    })
}

pub(super) fn article_grid(b: &ArticleGridBlock) -> RNode {
    let cards = b.articles.iter().map(|a| article_card(a, b.layout)).collect();

    RNode::stack(
        Nodes::new()
            .text(&b.section_title, TextRole::Heading)
            .node(RNode::grid(b.columns.clamp(1, 3), cards))
            .build(),
    )
}

pub(super) fn spotlight(b: &SpotlightBlock) -> RNode {
    let article = &b.article;
    let accent = Paint::custom_or(&b.accent_color, ColorToken::Accent);

    let inner = RNode::stack(
        Nodes::new()
            .colored(
                &join_nonempty(&["✦ Spotlight", &article.source], " · "),
                TextRole::Eyebrow,
                accent.clone(),
            )
            .maybe(text_if(&article.title, TextRole::Title).map(|t| linked(&article.url, t)))
            .maybe(evidence_badge(article.evidence_level))
            .text(&article.summary, TextRole::Body)
            .maybe(labelled_box("Clinical Context", &article.clinical_context, inset()))
            .maybe(my_take(article, accent.clone()))
            .maybe(badges(&article.tags, ColorToken::Primary.into()))
            .colored(&article.pub_date, TextRole::Small, ColorToken::Muted)
            .maybe(read_more(&article.url, "Read the paper →"))
            .build(),
    );

    let image = cover_image(&article.image_url, &article.title, 240);
    let body = match (b.layout, image) {
        (SpotlightLayout::NoImage, _) | (_, None) => inner,
        (SpotlightLayout::TopImage, Some(image)) => RNode::stack(vec![image, inner]),
        (SpotlightLayout::LeftImage, Some(image)) => RNode::grid(2, vec![image, inner]),
        (SpotlightLayout::RightImage, Some(image)) => RNode::grid(2, vec![inner, image]),
    };

    RNode::stack(vec![body]).with_frame(Frame::card().accent_edge(accent))
}

pub(super) fn quick_hits(b: &QuickHitsBlock) -> RNode {
    let rows = b.hits.iter().enumerate().map(|(i, hit)| {
        let detail = RNode::stack(
            Nodes::new()
                .maybe(text_if(&hit.title, TextRole::Strong).map(|t| linked(&hit.url, t)))
                .colored(&hit.source, TextRole::Eyebrow, ColorToken::Muted)
                .text(&hit.summary, TextRole::Body)
                .build(),
        );
        RNode::row(
            Nodes::new()
                .node(RNode::text(ordinal(i), TextRole::Numeral).with_color(ColorToken::Accent))
                .node(detail)
                .maybe(read_more(&hit.url, "Read →"))
                .build(),
        )
    });

    RNode::stack(
        Nodes::new()
            .text(&prefixed("⚡", &b.heading), TextRole::Heading)
            .node(RNode::stack(rows.collect()))
            .build(),
    )
}
