//! Ethics, safety monitoring and safety reminders.

use super::{labelled_box, linked, prefixed, read_more};
use crate::node::{text_if, Frame, Nodes, RNode, Spacing, TextRole};
use pulse_schema::{AiSafetyBlock, ColorToken, EthicsSplitBlock, SafetyRemindersBlock, Severity};

pub(crate) fn severity_token(severity: Severity) -> ColorToken {
    match severity {
        Severity::Critical | Severity::High => ColorToken::Accent,
        Severity::Medium => ColorToken::Secondary,
        Severity::Informational => ColorToken::Muted,
    }
}

pub(super) fn ethics_split(b: &EthicsSplitBlock) -> RNode {
    let side = |title: &str, content: &str, token: ColorToken| {
        RNode::stack(
            Nodes::new()
                .colored(title, TextRole::Label, token)
                .text(content, TextRole::Body)
                .build(),
        )
        .with_frame(Frame::padded(Spacing::Medium).border(token).rounded())
    };

    let source = (!b.source.trim().is_empty())
        .then(|| linked(&b.url, RNode::text(format!("Source: {}", b.source.trim()), TextRole::Small)));

    RNode::stack(
        Nodes::new()
            .colored("⚖ AI Ethics & Governance", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .colored(&b.subheading, TextRole::Subheading, ColorToken::Muted)
            .maybe(source)
            .node(RNode::grid(
                2,
                vec![
                    side(&b.left_title, &b.left_content, ColorToken::Primary),
                    side(&b.right_title, &b.right_content, ColorToken::Accent),
                ],
            ))
            .maybe(labelled_box(
                "Clinical Perspective",
                &b.clinical_perspective,
                Frame::padded(Spacing::Medium)
                    .background(ColorToken::Background)
                    .accent_edge(ColorToken::Accent),
            ))
            .build(),
    )
}

pub(super) fn ai_safety(b: &AiSafetyBlock) -> RNode {
    // Newest update date rather than the wall clock keeps output reproducible
    let last_updated = b
        .updates
        .iter()
        .map(|u| u.date.trim())
        .filter(|d| !d.is_empty())
        .max()
        .filter(|_| b.show_last_updated)
        .map(|d| RNode::text(format!("Last updated {}", d), TextRole::Small).with_color(ColorToken::Muted));

    let cards = b.updates.iter().map(|update| {
        let token = severity_token(update.severity);
        let tags = RNode::row(
            Nodes::new()
                .node(RNode::text(update.severity.label(), TextRole::Badge).with_color(token))
                .node(RNode::text(update.category.label(), TextRole::Badge).with_color(ColorToken::Muted))
                .colored(&update.date, TextRole::Small, ColorToken::Muted)
                .build(),
        );
        RNode::stack(
            Nodes::new()
                .node(tags)
                .maybe(text_if(&update.title, TextRole::Strong).map(|t| linked(&update.url, t)))
                .text(&update.summary, TextRole::Body)
                .maybe(read_more(&update.url, "View full guidance →"))
                .build(),
        )
        .with_frame(Frame::card().accent_edge(token))
    });

    RNode::stack(
        Nodes::new()
            .colored("🛡️ AI Safety Monitor", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .colored(&b.subheading, TextRole::Subheading, ColorToken::Muted)
            .maybe(last_updated)
            .node(RNode::stack(cards.collect()))
            .build(),
    )
}

pub(super) fn safety_reminders(b: &SafetyRemindersBlock) -> RNode {
    let items: Vec<RNode> = b
        .items
        .iter()
        .filter_map(|item| text_if(item, TextRole::Body))
        .map(|body| RNode::row(vec![RNode::text("▶", TextRole::Body).with_color(ColorToken::Accent), body]))
        .collect();
    let columns = if items.len() <= 2 { 1 } else { 2 };

    RNode::stack(
        Nodes::new()
            .colored(&prefixed("⚠️", &b.heading), TextRole::Label, ColorToken::Accent)
            .node(RNode::grid(columns, items))
            .build(),
    )
    .with_frame(
        Frame::padded(Spacing::Medium)
            .background(ColorToken::Background)
            .border(ColorToken::Accent)
            .rounded(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Layout;
    use pulse_schema::SafetyRemindersBlock;

    fn reminders(items: &[&str]) -> SafetyRemindersBlock {
        SafetyRemindersBlock {
            id: "r".into(),
            heading: "Before you paste".into(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn grid_columns(node: &RNode) -> Option<u8> {
        let mut found = None;
        node.walk(&mut |n| {
            if let RNode::Container { layout: Layout::Grid { columns }, .. } = n {
                found = Some(*columns);
            }
        });
        found
    }

    #[test]
    fn test_reminder_columns() {
        assert_eq!(grid_columns(&safety_reminders(&reminders(&["a", "b"]))), Some(1));
        assert_eq!(grid_columns(&safety_reminders(&reminders(&["a", "b", "c"]))), Some(2));
    }

    #[test]
    fn test_reminder_heading_has_icon() {
        let tree = safety_reminders(&reminders(&["a"]));
        assert_eq!(tree.texts()[0], "⚠️ Before you paste");
    }
}
