//! Theme token sets and the built-in presets.

use serde::{Deserialize, Serialize};

/// A named token set: eight colors and three font stacks.
///
/// Values are usually literals (`#003087`, `"DM Sans", sans-serif`) but a value
/// may reference another token through `var(--c-<name>)` / `var(--f-<name>)`.
/// Targets that cannot follow indirection resolve those references first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub border: String,
    pub text: String,
    pub muted: String,
    pub font_display: String,
    pub font_body: String,
    pub font_mono: String,
}

/// Color tokens of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Primary,
    Secondary,
    Accent,
    Background,
    Surface,
    Border,
    Text,
    Muted,
}

/// Font-family tokens of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontToken {
    Display,
    Body,
    Mono,
}

impl ColorToken {
    pub const ALL: [ColorToken; 8] = [
        ColorToken::Primary,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::Border,
        ColorToken::Text,
        ColorToken::Muted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Primary => "primary",
            ColorToken::Secondary => "secondary",
            ColorToken::Accent => "accent",
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::Border => "border",
            ColorToken::Text => "text",
            ColorToken::Muted => "muted",
        }
    }

    /// CSS custom property bound to this token
    pub fn css_var(self) -> String {
        format!("--c-{}", self.name())
    }
}

impl FontToken {
    pub const ALL: [FontToken; 3] = [FontToken::Display, FontToken::Body, FontToken::Mono];

    pub fn name(self) -> &'static str {
        match self {
            FontToken::Display => "display",
            FontToken::Body => "body",
            FontToken::Mono => "mono",
        }
    }

    pub fn css_var(self) -> String {
        format!("--f-{}", self.name())
    }
}

impl Theme {
    pub fn color(&self, token: ColorToken) -> &str {
        match token {
            ColorToken::Primary => &self.primary,
            ColorToken::Secondary => &self.secondary,
            ColorToken::Accent => &self.accent,
            ColorToken::Background => &self.background,
            ColorToken::Surface => &self.surface,
            ColorToken::Border => &self.border,
            ColorToken::Text => &self.text,
            ColorToken::Muted => &self.muted,
        }
    }

    pub fn font(&self, token: FontToken) -> &str {
        match token {
            FontToken::Display => &self.font_display,
            FontToken::Body => &self.font_body,
            FontToken::Mono => &self.font_mono,
        }
    }

    /// Look up a preset by id
    pub fn preset(id: &str) -> Option<Theme> {
        presets().into_iter().find(|t| t.id == id)
    }
}

impl Default for Theme {
    fn default() -> Self {
        professional()
    }
}

const FONT_DISPLAY: &str = r#""DM Serif Display", Georgia, serif"#;
const FONT_BODY: &str = r#""DM Sans", system-ui, sans-serif"#;
const FONT_MONO: &str = r#""DM Mono", ui-monospace, monospace"#;

#[allow(clippy::too_many_arguments)]
fn preset(
    id: &str,
    name: &str,
    primary: &str,
    secondary: &str,
    accent: &str,
    background: &str,
    surface: &str,
    border: &str,
    text: &str,
    muted: &str,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        surface: surface.to_string(),
        border: border.to_string(),
        text: text.to_string(),
        muted: muted.to_string(),
        font_display: FONT_DISPLAY.to_string(),
        font_body: FONT_BODY.to_string(),
        font_mono: FONT_MONO.to_string(),
    }
}

fn professional() -> Theme {
    preset(
        "professional",
        "Professional Blue",
        "#003087",
        "#0057A8",
        "#009CDE",
        "#F0F4FA",
        "#FFFFFF",
        "#C8D9EE",
        "#1A2B4A",
        "#5A789A",
    )
}

/// Built-in presets, first one is the default
pub fn presets() -> Vec<Theme> {
    vec![
        professional(),
        preset(
            "midnight",
            "Midnight Clinical",
            "#0A0F1E",
            "#1A2744",
            "#4FFFB0",
            "#080C18",
            "#0F1628",
            "#1E2E50",
            "#E8F0FF",
            "#6B82AA",
        ),
        preset(
            "editorial",
            "Editorial Print",
            "#1A1A1A",
            "#333333",
            "#C0392B",
            "#F5F0E8",
            "#FEFCF8",
            "#D4CABC",
            "#1A1A1A",
            "#7A6E62",
        ),
        preset(
            "teal",
            "Teal & Sand",
            "#005F6B",
            "#008891",
            "#F4A261",
            "#F7F3EE",
            "#FFFFFF",
            "#D4CFC7",
            "#2C3E3F",
            "#7A8C8D",
        ),
    ]
}
