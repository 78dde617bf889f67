//! The page stylesheet.
//!
//! Theme values enter only through [`ResolvedTokens`], so the same rules work
//! with `var()` references on pages and literals wherever those are required.

use pulse_render::TextRole;
use pulse_schema::{ColorToken, FontToken};
use pulse_theme::{CssRule, ResolvedTokens, StyleSheet};

/// Widest grid the serializer emits
pub const MAX_COLUMNS: u8 = 6;

/// Below this width every grid collapses to one column
pub const NARROW_SCREEN: &str = "(max-width: 640px)";

const MARQUEE_KEYFRAMES: &str = "@keyframes pulse-marquee {\n  from { transform: translateX(0); }\n  to { transform: translateX(-100%); }\n}\n";

/// Full stylesheet for a page
pub fn stylesheet(tokens: &ResolvedTokens) -> StyleSheet {
    let color = |t: ColorToken| tokens.color(t).to_string();
    let font = |t: FontToken| tokens.font(t).to_string();

    let mut sheet = StyleSheet::new();
    if let Some(root) = tokens.root_rule() {
        sheet.add_rule(root);
    }

    sheet.add_rule(
        CssRule::new("body")
            .decl("margin", "0")
            .decl("background", color(ColorToken::Background))
            .decl("color", color(ColorToken::Text))
            .decl("font-family", font(FontToken::Body)),
    );
    sheet.add_rule(CssRule::new("a").decl("color", "inherit"));
    sheet.add_rule(
        CssRule::new(".pulse-issue")
            .decl("max-width", "760px")
            .decl("margin", "0 auto")
            .decl("padding", "24px 16px"),
    );
    sheet.add_rule(CssRule::new(".pulse-block").decl("margin", "0 0 24px"));

    // Layout
    sheet.add_rule(
        CssRule::new(".pulse-stack")
            .decl("display", "flex")
            .decl("flex-direction", "column")
            .decl("gap", "8px"),
    );
    sheet.add_rule(
        CssRule::new(".pulse-row")
            .decl("display", "flex")
            .decl("flex-wrap", "wrap")
            .decl("align-items", "flex-start")
            .decl("gap", "12px"),
    );
    sheet.add_rule(CssRule::new(".pulse-grid").decl("display", "grid").decl("gap", "16px"));
    for columns in 1..=MAX_COLUMNS {
        sheet.add_rule(
            CssRule::new(format!(".pulse-cols-{}", columns))
                .decl("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns)),
        );
    }
    sheet.add_rule(
        CssRule::new(".pulse-grid")
            .decl("grid-template-columns", "1fr")
            .within(NARROW_SCREEN),
    );
    sheet.add_rule(
        CssRule::new(".pulse-marquee")
            .decl("overflow", "hidden")
            .decl("white-space", "nowrap"),
    );
    sheet.add_rule(
        CssRule::new(".pulse-marquee-track")
            .decl("display", "inline-flex")
            .decl("gap", "48px")
            .decl("padding-left", "100%")
            .decl("animation", "pulse-marquee var(--pulse-marquee-seconds, 40s) linear infinite"),
    );
    sheet.add_rule(CssRule::new(".pulse-pad-sm").decl("padding", "8px 12px"));
    sheet.add_rule(CssRule::new(".pulse-pad-md").decl("padding", "16px"));
    sheet.add_rule(CssRule::new(".pulse-pad-lg").decl("padding", "32px 24px"));
    sheet.add_rule(CssRule::new(".pulse-rounded").decl("border-radius", "10px"));

    // Text
    for role in TextRole::ALL {
        sheet.add_rule(role_rule(role, tokens));
    }

    // Media and controls
    sheet.add_rule(
        CssRule::new(".pulse-img")
            .decl("display", "inline-block")
            .decl("max-width", "100%"),
    );
    sheet.add_rule(
        CssRule::new(".pulse-rule")
            .decl("border", "0")
            .decl("margin", "8px 0")
            .decl("width", "100%"),
    );
    sheet.add_rule(CssRule::new(".pulse-list").decl("margin", "0").decl("padding-left", "20px"));
    sheet.add_rule(CssRule::new(".pulse-rich img").decl("max-width", "100%"));
    for selector in [".pulse-copy-btn", ".pulse-expand-btn"] {
        sheet.add_rule(
            CssRule::new(selector)
                .decl("align-self", "flex-start")
                .decl("cursor", "pointer")
                .decl("font-family", font(FontToken::Mono))
                .decl("font-size", "11px")
                .decl("text-transform", "uppercase")
                .decl("padding", "6px 12px")
                .decl("border-radius", "6px")
                .decl("border", format!("1px solid {}", color(ColorToken::Accent)))
                .decl("background", color(ColorToken::Surface))
                .decl("color", color(ColorToken::Accent)),
        );
    }
    sheet.add_rule(CssRule::new(".pulse-collapse[hidden]").decl("display", "none"));
    sheet.add_rule(
        CssRule::new(".pulse-placeholder")
            .decl("padding", "16px")
            .decl("border", format!("1px dashed {}", color(ColorToken::Muted)))
            .decl("color", color(ColorToken::Muted))
            .decl("font-style", "italic")
            .decl("text-align", "center"),
    );

    sheet
}

/// Stylesheet text including the marquee animation
pub fn page_css(tokens: &ResolvedTokens) -> String {
    let mut css = stylesheet(tokens).to_css();
    css.push_str(MARQUEE_KEYFRAMES);
    css
}

fn role_rule(role: TextRole, tokens: &ResolvedTokens) -> CssRule {
    let display = tokens.font(FontToken::Display);
    let body = tokens.font(FontToken::Body);
    let mono = tokens.font(FontToken::Mono);

    let rule = CssRule::new(format!(".pulse-t-{}", role.name())).decl("margin", "0");
    match role {
        TextRole::Masthead => rule
            .decl("font-family", display)
            .decl("font-size", "44px")
            .decl("line-height", "1.1"),
        TextRole::Heading => rule
            .decl("font-family", display)
            .decl("font-size", "28px")
            .decl("line-height", "1.2"),
        TextRole::Title => rule
            .decl("font-family", display)
            .decl("font-size", "21px")
            .decl("line-height", "1.25"),
        TextRole::Subheading => rule
            .decl("font-family", body)
            .decl("font-size", "16px")
            .decl("line-height", "1.5"),
        TextRole::Eyebrow => rule
            .decl("font-family", mono)
            .decl("font-size", "11px")
            .decl("letter-spacing", "0.18em")
            .decl("text-transform", "uppercase"),
        TextRole::Label => rule
            .decl("font-family", mono)
            .decl("font-size", "11px")
            .decl("font-weight", "700")
            .decl("letter-spacing", "0.14em")
            .decl("text-transform", "uppercase"),
        TextRole::Strong => rule
            .decl("font-family", body)
            .decl("font-size", "15px")
            .decl("font-weight", "700"),
        TextRole::Body => rule
            .decl("font-family", body)
            .decl("font-size", "15px")
            .decl("line-height", "1.6"),
        TextRole::Small => rule.decl("font-family", body).decl("font-size", "12px"),
        TextRole::Caption => rule
            .decl("font-family", body)
            .decl("font-size", "12px")
            .decl("font-style", "italic"),
        TextRole::Quote => rule
            .decl("font-family", body)
            .decl("font-size", "15px")
            .decl("font-style", "italic")
            .decl("line-height", "1.6"),
        TextRole::Code => rule
            .decl("font-family", mono)
            .decl("font-size", "13px")
            .decl("white-space", "pre-wrap")
            .decl("padding", "12px")
            .decl("border-radius", "8px")
            .decl("background", tokens.color(ColorToken::Surface))
            .decl("border", format!("1px solid {}", tokens.color(ColorToken::Border))),
        TextRole::Badge => rule
            .decl("display", "inline-block")
            .decl("font-family", mono)
            .decl("font-size", "10px")
            .decl("text-transform", "uppercase")
            .decl("padding", "2px 8px")
            .decl("border", "1px solid currentColor")
            .decl("border-radius", "999px"),
        TextRole::Numeral => rule
            .decl("font-family", display)
            .decl("font-size", "28px")
            .decl("font-weight", "700")
            .decl("line-height", "1"),
    }
}
