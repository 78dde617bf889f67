//! Free-form content: images, rich text, raw HTML, spacing.

use super::{image_source, linked, prefixed};
use crate::node::{Frame, Nodes, RNode, TextRole};
use pulse_schema::{ColorToken, HtmlEmbedBlock, ImageBlock, SpacerBlock, TextBlock, TextWidth};

pub(super) fn image(b: &ImageBlock) -> RNode {
    let picture = image_source(&b.data_url, &b.url).map(|src| {
        let node = RNode::Image {
            src: src.to_string(),
            alt: b.alt.clone(),
            width: None,
            height: None,
            fit: None,
            scale: Some(b.width.percent()),
            radius: b.border_radius,
        };
        linked(&b.link_url, node)
    });

    RNode::stack(
        Nodes::new()
            .maybe(picture)
            .colored(&b.caption, TextRole::Caption, ColorToken::Muted)
            .build(),
    )
    .with_frame(Frame::default().align(b.alignment))
}

pub(super) fn text(b: &TextBlock) -> RNode {
    let frame = Frame::default().align(b.alignment);
    let frame = match b.max_width {
        TextWidth::Reading => frame.max_width(720),
        TextWidth::Narrow => frame.max_width(560),
        TextWidth::Full => frame,
    };
    RNode::stack(vec![RNode::RichText { html: b.html.clone() }]).with_frame(frame)
}

pub(super) fn html_embed(b: &HtmlEmbedBlock) -> RNode {
    RNode::stack(
        Nodes::new()
            .colored(&prefixed("💻", &b.label), TextRole::Eyebrow, ColorToken::Muted)
            .node(RNode::RichText { html: b.html.clone() })
            .build(),
    )
}

pub(super) fn spacer(b: &SpacerBlock) -> RNode {
    let line = b.show_line.then(|| RNode::Rule {
        color: ColorToken::Border.into(),
        style: b.line_style,
    });
    RNode::stack(
        Nodes::new()
            .maybe(line)
            .node(RNode::Spacer { height: b.height })
            .build(),
    )
}
