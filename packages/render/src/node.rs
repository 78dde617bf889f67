//! The canonical render tree.
//!
//! Block builders describe content with a handful of primitives; each target
//! is a serializer over these nodes. Nodes only carry abstract paints and text
//! roles, never concrete colors or sizes.

use pulse_schema::{Alignment, ColorToken, ImageFit, LineStyle};
use pulse_theme::ResolvedTokens;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Render tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RNode {
    /// Box holding other nodes
    Container {
        layout: Layout,
        #[serde(default)]
        frame: Frame,
        children: Vec<RNode>,
    },

    /// Plain text, always escaped on output
    Text {
        content: String,
        role: TextRole,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Paint>,
    },

    /// Trusted markup from the rich-text editor, emitted verbatim
    RichText { html: String },

    Image {
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fit: Option<ImageFit>,
        /// Share of the column width, in percent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<u32>,
        #[serde(default)]
        radius: u32,
    },

    Link { href: String, children: Vec<RNode> },

    List { ordered: bool, items: Vec<RNode> },

    Rule { color: Paint, style: LineStyle },

    Spacer { height: u32 },

    /// Copies `payload` to the clipboard
    CopyButton { label: String, payload: String },

    /// Toggle button plus a body hidden until expanded
    Collapsible {
        target: String,
        summary: String,
        children: Vec<RNode>,
    },

    /// Content the runtime refreshes from syndication feeds
    Feed {
        variant: FeedVariant,
        key: String,
        feeds: Vec<String>,
        limit: u32,
        children: Vec<RNode>,
    },

    /// Visible stand-in for content a target cannot show
    Placeholder { label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Layout {
    /// Children top to bottom
    Stack,
    /// Children side by side
    Row,
    /// Equal columns, collapsing to one on narrow screens and in email
    Grid { columns: u8 },
    /// Horizontally scrolling strip
    Marquee { seconds: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedVariant {
    Ticker,
    Sidebar,
}

/// A color reference. Only theme tokens and values the user typed are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Paint {
    Token(ColorToken),
    Custom(String),
    Gradient(ColorToken, ColorToken),
}

impl Paint {
    /// Custom value when set, the token otherwise
    pub fn custom_or(value: &str, fallback: ColorToken) -> Paint {
        if value.trim().is_empty() {
            Paint::Token(fallback)
        } else {
            Paint::Custom(value.trim().to_string())
        }
    }

    /// CSS value in the target `tokens` were resolved for.
    ///
    /// A custom value that cannot be made literal falls back to the text color.
    pub fn css(&self, tokens: &ResolvedTokens) -> String {
        match self {
            Paint::Token(token) => tokens.color(*token).to_string(),
            Paint::Custom(raw) => match tokens.value(raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(%err, value = raw.as_str(), "Custom color replaced by text color");
                    tokens.color(ColorToken::Text).to_string()
                }
            },
            Paint::Gradient(from, to) if tokens.mode().allows_indirection() => format!(
                "linear-gradient(135deg, {}, {})",
                tokens.color(*from),
                tokens.color(*to)
            ),
            Paint::Gradient(from, _) => tokens.color(*from).to_string(),
        }
    }
}

impl From<ColorToken> for Paint {
    fn from(token: ColorToken) -> Self {
        Paint::Token(token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRole {
    Masthead,
    Title,
    Heading,
    Subheading,
    Eyebrow,
    Label,
    Strong,
    Body,
    Small,
    Caption,
    Quote,
    Code,
    Badge,
    Numeral,
}

impl TextRole {
    pub const ALL: [TextRole; 14] = [
        TextRole::Masthead,
        TextRole::Title,
        TextRole::Heading,
        TextRole::Subheading,
        TextRole::Eyebrow,
        TextRole::Label,
        TextRole::Strong,
        TextRole::Body,
        TextRole::Small,
        TextRole::Caption,
        TextRole::Quote,
        TextRole::Code,
        TextRole::Badge,
        TextRole::Numeral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextRole::Masthead => "masthead",
            TextRole::Title => "title",
            TextRole::Heading => "heading",
            TextRole::Subheading => "subheading",
            TextRole::Eyebrow => "eyebrow",
            TextRole::Label => "label",
            TextRole::Strong => "strong",
            TextRole::Body => "body",
            TextRole::Small => "small",
            TextRole::Caption => "caption",
            TextRole::Quote => "quote",
            TextRole::Code => "code",
            TextRole::Badge => "badge",
            TextRole::Numeral => "numeral",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    #[default]
    None,
    Small,
    Medium,
    Large,
}

/// Visual box around a container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Paint>,
    /// Thick left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_edge: Option<Paint>,
    /// Text color inherited by children without their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink: Option<Paint>,
    #[serde(default)]
    pub padding: Spacing,
    #[serde(default)]
    pub rounded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    /// In pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

impl Frame {
    pub fn padded(padding: Spacing) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    /// Bordered, rounded card on the surface color
    pub fn card() -> Self {
        Self::padded(Spacing::Medium)
            .background(ColorToken::Surface)
            .border(ColorToken::Border)
            .rounded()
    }

    /// Filled band with surface-colored text
    pub fn inverse(background: impl Into<Paint>) -> Self {
        Self::padded(Spacing::Large)
            .background(background)
            .ink(ColorToken::Surface)
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn border(mut self, paint: impl Into<Paint>) -> Self {
        self.border = Some(paint.into());
        self
    }

    pub fn accent_edge(mut self, paint: impl Into<Paint>) -> Self {
        self.accent_edge = Some(paint.into());
        self
    }

    pub fn ink(mut self, paint: impl Into<Paint>) -> Self {
        self.ink = Some(paint.into());
        self
    }

    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn max_width(mut self, px: u32) -> Self {
        self.max_width = Some(px);
        self
    }
}

impl RNode {
    pub fn container(layout: Layout, children: Vec<RNode>) -> Self {
        RNode::Container {
            layout,
            frame: Frame::default(),
            children,
        }
    }

    pub fn stack(children: Vec<RNode>) -> Self {
        Self::container(Layout::Stack, children)
    }

    pub fn row(children: Vec<RNode>) -> Self {
        Self::container(Layout::Row, children)
    }

    pub fn grid(columns: u8, children: Vec<RNode>) -> Self {
        Self::container(Layout::Grid { columns }, children)
    }

    pub fn text(content: impl Into<String>, role: TextRole) -> Self {
        RNode::Text {
            content: content.into(),
            role,
            color: None,
        }
    }

    pub fn link(href: impl Into<String>, children: Vec<RNode>) -> Self {
        RNode::Link {
            href: href.into(),
            children,
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        RNode::Image {
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            fit: None,
            scale: None,
            radius: 0,
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        RNode::Placeholder {
            label: label.into(),
        }
    }

    /// Replace the frame of a container
    pub fn with_frame(mut self, new_frame: Frame) -> Self {
        if let RNode::Container { ref mut frame, .. } = self {
            *frame = new_frame;
        }
        self
    }

    /// Set the color of a text node
    pub fn with_color(mut self, paint: impl Into<Paint>) -> Self {
        if let RNode::Text { ref mut color, .. } = self {
            *color = Some(paint.into());
        }
        self
    }

    /// Set the pixel size of an image
    pub fn with_size(mut self, w: Option<u32>, h: Option<u32>) -> Self {
        if let RNode::Image {
            ref mut width,
            ref mut height,
            ..
        } = self
        {
            *width = w;
            *height = h;
        }
        self
    }

    pub fn with_fit(mut self, value: ImageFit) -> Self {
        if let RNode::Image { ref mut fit, .. } = self {
            *fit = Some(value);
        }
        self
    }

    pub fn children(&self) -> &[RNode] {
        match self {
            RNode::Container { children, .. }
            | RNode::Link { children, .. }
            | RNode::Collapsible { children, .. }
            | RNode::Feed { children, .. } => children,
            RNode::List { items, .. } => items,
            _ => &[],
        }
    }

    /// Depth-first, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Every text payload in the subtree, in document order
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| match node {
            RNode::Text { content, .. } => out.push(content.as_str()),
            RNode::Collapsible { summary, .. } => out.push(summary.as_str()),
            RNode::Placeholder { label } => out.push(label.as_str()),
            _ => {}
        });
        out
    }

    /// Whether any node in the subtree matches
    pub fn any(&self, predicate: impl Fn(&RNode) -> bool) -> bool {
        let mut found = false;
        self.walk(&mut |node| found |= predicate(node));
        found
    }
}

/// Child list builder that drops empty text
#[derive(Debug, Default)]
pub struct Nodes(Vec<RNode>);

impl Nodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: RNode) -> Self {
        self.0.push(node);
        self
    }

    pub fn maybe(mut self, node: Option<RNode>) -> Self {
        self.0.extend(node);
        self
    }

    pub fn all(mut self, nodes: impl IntoIterator<Item = RNode>) -> Self {
        self.0.extend(nodes);
        self
    }

    /// Text child, skipped when blank
    pub fn text(self, content: &str, role: TextRole) -> Self {
        self.maybe(text_if(content, role))
    }

    pub fn colored(self, content: &str, role: TextRole, paint: impl Into<Paint>) -> Self {
        self.maybe(text_if(content, role).map(|n| n.with_color(paint)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn build(self) -> Vec<RNode> {
        self.0
    }
}

/// Text node unless `content` is blank
pub fn text_if(content: &str, role: TextRole) -> Option<RNode> {
    if content.trim().is_empty() {
        None
    } else {
        Some(RNode::text(content, role))
    }
}

/// 1-based, zero-padded list badge: `01`, `02`, ...
pub fn ordinal(index: usize) -> String {
    format!("{:02}", index + 1)
}
