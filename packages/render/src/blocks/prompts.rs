//! Prompting skills: masterclass, SBAR-P, templates.

use super::{copy_button, inset, join_nonempty, labelled_box};
use crate::node::{text_if, Frame, Nodes, RNode, Spacing, TextRole};
use pulse_schema::{
    ClinicalPromptTemplatesBlock, ColorToken, PromptMasterclassBlock, PromptTemplateBlock,
    SbarPromptBlock,
};
use pulse_theme::RenderMode;

/// Step colors, cycled
const SBAR_PALETTE: [ColorToken; 5] = [
    ColorToken::Primary,
    ColorToken::Secondary,
    ColorToken::Accent,
    ColorToken::Text,
    ColorToken::Muted,
];

pub(super) fn masterclass(b: &PromptMasterclassBlock) -> RNode {
    let framework = if b.framework.trim().is_empty() {
        String::new()
    } else {
        format!("Framework: {}", b.framework.trim())
    };

    let bad = RNode::stack(
        Nodes::new()
            .colored("❌ Bad Prompt", TextRole::Label, ColorToken::Muted)
            .text(&b.bad_prompt, TextRole::Quote)
            .build(),
    )
    .with_frame(Frame::padded(Spacing::Medium).border(ColorToken::Muted).rounded());

    let good = RNode::stack(
        Nodes::new()
            .colored("✓ Good Prompt", TextRole::Label, ColorToken::Accent)
            .text(&b.good_prompt, TextRole::Body)
            .build(),
    )
    .with_frame(Frame::padded(Spacing::Medium).border(ColorToken::Accent).rounded());

    RNode::stack(
        Nodes::new()
            .colored("🤖 Prompt Like a Rockstar", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .colored(&join_nonempty(&[&b.step, &framework], " · "), TextRole::Small, ColorToken::Muted)
            .node(RNode::grid(2, vec![bad, good]))
            .maybe(labelled_box("Why this matters:", &b.explanation, inset()))
            .build(),
    )
}

pub(super) fn sbar(b: &SbarPromptBlock, mode: RenderMode) -> RNode {
    let cards: Vec<RNode> = b
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let token = SBAR_PALETTE[i % SBAR_PALETTE.len()];
            RNode::stack(
                Nodes::new()
                    .colored(&step.letter.to_uppercase(), TextRole::Numeral, token)
                    .colored(&step.name, TextRole::Label, token)
                    .text(&step.description, TextRole::Body)
                    .text(&step.example, TextRole::Quote)
                    .build(),
            )
            .with_frame(Frame::card().accent_edge(token))
        })
        .collect();
    let columns = b.steps.len().clamp(1, 5) as u8;

    let template = text_if(&b.template_prompt, TextRole::Code).map(|code| {
        let mut head = Nodes::new().text("Template Prompt", TextRole::Label);
        if mode.is_interactive() {
            head = head.maybe(copy_button(&b.template_prompt));
        }
        RNode::stack(head.node(code).build()).with_frame(inset())
    });

    let tips: Vec<RNode> = b
        .safety_tips
        .iter()
        .filter_map(|tip| text_if(tip, TextRole::Body))
        .collect();
    let tips = (!tips.is_empty()).then(|| {
        RNode::stack(vec![
            RNode::text("Safety Tips", TextRole::Label).with_color(ColorToken::Accent),
            RNode::List {
                ordered: false,
                items: tips,
            },
        ])
    });

    RNode::stack(
        Nodes::new()
            .colored("📋 Clinical AI Prompting", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .node(RNode::grid(columns, cards))
            .maybe(template)
            .maybe(tips)
            .build(),
    )
}

pub(super) fn prompt_template(b: &PromptTemplateBlock, mode: RenderMode) -> RNode {
    let head = Nodes::new()
        .colored("🧩 Template Prompt", TextRole::Eyebrow, ColorToken::Accent)
        .text(&b.heading, TextRole::Title)
        .build();
    let code = text_if(&b.prompt, TextRole::Code);

    let children = if mode.is_interactive() {
        let toolbar = RNode::row(
            Nodes::new()
                .node(RNode::stack(head))
                .maybe(copy_button(&b.prompt))
                .build(),
        );
        vec![
            toolbar,
            RNode::Collapsible {
                target: format!("tpl-{}", b.id),
                summary: "Show prompt".to_string(),
                children: code.into_iter().collect(),
            },
        ]
    } else {
        Nodes::new().all(head).maybe(code).build()
    };

    RNode::stack(children).with_frame(Frame::card())
}

pub(super) fn clinical_templates(b: &ClinicalPromptTemplatesBlock, mode: RenderMode) -> RNode {
    let cards = b.templates.iter().map(|template| {
        let code = text_if(&template.prompt, TextRole::Code);
        let prompt = if mode.is_interactive() {
            Nodes::new().maybe(copy_button(&template.prompt)).node(RNode::Collapsible {
                target: format!("tpl-{}", template.id),
                summary: "Preview".to_string(),
                children: code.into_iter().collect(),
            })
        } else {
            Nodes::new().maybe(code)
        };

        RNode::stack(
            Nodes::new()
                .colored(&template.category, TextRole::Badge, ColorToken::Primary)
                .text(&template.title, TextRole::Strong)
                .colored(&template.use_case, TextRole::Small, ColorToken::Muted)
                .all(prompt.build())
                .build(),
        )
        .with_frame(Frame::card())
    });

    RNode::stack(
        Nodes::new()
            .colored("📎 Ready-to-Use Prompts", TextRole::Eyebrow, ColorToken::Accent)
            .text(&b.heading, TextRole::Heading)
            .colored(&b.description, TextRole::Body, ColorToken::Muted)
            .node(RNode::grid(2, cards.collect()))
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> PromptTemplateBlock {
        PromptTemplateBlock {
            id: "p1".into(),
            heading: "Discharge summary".into(),
            prompt: "Summarize the admission for the patient.".into(),
        }
    }

    #[test]
    fn test_template_is_collapsible_when_interactive() {
        let tree = prompt_template(&template(), RenderMode::Interactive);
        assert!(tree.any(|n| matches!(n, RNode::Collapsible { target, .. } if target == "tpl-p1")));
        assert!(tree.any(|n| matches!(n, RNode::CopyButton { .. })));
    }

    #[test]
    fn test_template_is_expanded_for_static_targets() {
        for mode in [RenderMode::StaticPage, RenderMode::Email] {
            let tree = prompt_template(&template(), mode);
            assert!(!tree.any(|n| matches!(n, RNode::Collapsible { .. } | RNode::CopyButton { .. })));
            assert!(tree.texts().contains(&"Summarize the admission for the patient."));
        }
    }
}
