use crate::styles::page_css;
use pulse_common::runtime::{DEFAULT_FEED_PROXY, FEED_REFRESH_INTERVAL};
use pulse_common::{escape_html, escape_script_close, is_self_closing, sanitize_href, Markup};
use pulse_render::{
    render_document, BlockTree, FeedVariant, Frame, Layout, RNode, Spacing, TextRole,
};
use pulse_schema::{Alignment, ImageFit, LineStyle, Newsletter};
use pulse_theme::{resolve, RenderMode, ResolvedTokens, ThemeError};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

/// The script wiring copy buttons, collapsibles and live feeds
pub const RUNTIME_JS: &str = include_str!("../assets/runtime.js");

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Render mode '{0}' does not produce an HTML page")]
    UnsupportedMode(RenderMode),

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Proxy the runtime fetches feeds through
    pub feed_proxy: String,
    /// Period of the runtime's feed refresh
    pub refresh_interval: Duration,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            feed_proxy: DEFAULT_FEED_PROXY.to_string(),
            refresh_interval: FEED_REFRESH_INTERVAL,
        }
    }
}

struct Context<'a> {
    tokens: &'a ResolvedTokens,
    out: Markup,
}

/// Compile an issue to a standalone HTML page.
///
/// `static-page` output is plain markup; `interactive` and `viewer-runtime`
/// also carry the runtime script.
#[instrument(skip(doc, options), fields(blocks = doc.block_order.len()))]
pub fn compile_document(
    doc: &Newsletter,
    mode: RenderMode,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    if mode == RenderMode::Email {
        return Err(CompileError::UnsupportedMode(mode));
    }

    let tokens = resolve(&doc.theme, mode)?;
    let trees = render_document(doc, mode);
    let mut out = Markup::new(options.pretty);

    out.add_line("<!DOCTYPE html>");
    out.add_line("<html lang=\"en\">");
    out.indent();

    out.add_line("<head>");
    out.indent();
    out.add_line("<meta charset=\"UTF-8\">");
    out.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    out.add_line(&format!("<title>{}</title>", escape_html(page_title(doc))));
    out.add_line("<style>");
    out.add(&page_css(&tokens));
    out.add_line("</style>");
    out.dedent();
    out.add_line("</head>");

    out.add_line("<body>");
    out.indent();
    out.add_line("<main class=\"pulse-issue\">");
    out.indent();

    let mut cx = Context { tokens: &tokens, out };
    for tree in &trees {
        write_block(tree, &mut cx);
    }
    let mut out = cx.out;

    out.dedent();
    out.add_line("</main>");
    if mode.is_interactive() {
        out.add(&runtime_scripts(options));
    }
    out.dedent();
    out.add_line("</body>");

    out.dedent();
    out.add_line("</html>");

    info!(blocks = trees.len(), %mode, "Compiled HTML page");
    Ok(out.into_string())
}

/// Markup of one block, wrapped in its `<section>`
pub fn compile_block(tree: &BlockTree, tokens: &ResolvedTokens, pretty: bool) -> String {
    let mut cx = Context {
        tokens,
        out: Markup::new(pretty),
    };
    write_block(tree, &mut cx);
    cx.out.into_string()
}

/// Runtime configuration followed by the runtime itself
pub fn runtime_scripts(options: &CompileOptions) -> String {
    let config = serde_json::json!({
        "feedProxy": options.feed_proxy,
        "refreshMs": options.refresh_interval.as_millis() as u64,
    });
    format!(
        "<script>window.PULSE_RUNTIME = {};</script>\n<script>\n{}</script>\n",
        escape_script_close(&config.to_string()),
        escape_script_close(RUNTIME_JS)
    )
}

pub(crate) fn page_title(doc: &Newsletter) -> &str {
    if doc.meta.title.trim().is_empty() {
        "Newsletter"
    } else {
        doc.meta.title.trim()
    }
}

fn write_block(tree: &BlockTree, cx: &mut Context) {
    let tag = tree.block_type.map(|t| t.tag()).unwrap_or("missing");
    cx.out.add_line(&format!(
        "<section class=\"pulse-block pulse-block--{}\" data-block-id=\"{}\">",
        tag,
        escape_html(&tree.id)
    ));
    cx.out.indent();
    write_node(&tree.node, cx);
    cx.out.dedent();
    cx.out.add_line("</section>");
}

fn write_node(node: &RNode, cx: &mut Context) {
    match node {
        RNode::Container {
            layout,
            frame,
            children,
        } => {
            let mut classes = vec![layout_class(*layout)];
            classes.extend(frame_classes(frame));
            let mut style = frame_style(frame, *layout, cx.tokens);
            if let Layout::Marquee { seconds } = layout {
                style.push(("--pulse-marquee-seconds", format!("{}s", seconds)));
            }

            cx.out.add_line(&open_tag(
                "div",
                &[("class", classes.join(" ")), ("style", inline_style(&style))],
            ));
            cx.out.indent();
            if matches!(layout, Layout::Marquee { .. }) {
                cx.out.add_line("<div class=\"pulse-marquee-track\">");
                cx.out.indent();
                write_children(children, cx);
                cx.out.dedent();
                cx.out.add_line("</div>");
            } else {
                write_children(children, cx);
            }
            cx.out.dedent();
            cx.out.add_line("</div>");
        }

        RNode::Text {
            content,
            role,
            color,
        } => {
            let tag = role_tag(*role);
            let style = color
                .as_ref()
                .map(|paint| inline_style(&[("color", paint.css(cx.tokens))]))
                .unwrap_or_default();
            cx.out.add_line(&format!(
                "{}{}</{}>",
                open_tag(tag, &[("class", format!("pulse-t-{}", role.name())), ("style", style)]),
                escape_html(content),
                tag
            ));
        }

        RNode::RichText { html } => {
            cx.out.add_line("<div class=\"pulse-rich\">");
            cx.out.indent();
            cx.out.add_line(html);
            cx.out.dedent();
            cx.out.add_line("</div>");
        }

        RNode::Image {
            src,
            alt,
            width,
            height,
            fit,
            scale,
            radius,
        } => {
            let mut style = Vec::new();
            if let Some(scale) = scale {
                style.push(("width", format!("{}%", scale)));
            }
            if let Some(h) = height {
                style.push(("height", format!("{}px", h)));
            }
            if let Some(fit) = fit {
                style.push(("object-fit", fit_css(*fit).to_string()));
            }
            if *radius > 0 {
                style.push(("border-radius", format!("{}px", radius)));
            }
            cx.out.add_line(&open_tag(
                "img",
                &[
                    ("class", "pulse-img".to_string()),
                    ("src", src.clone()),
                    ("alt", alt.clone()),
                    ("width", width.map(|w| w.to_string()).unwrap_or_default()),
                    ("height", height.map(|h| h.to_string()).unwrap_or_default()),
                    ("style", inline_style(&style)),
                ],
            ));
        }

        RNode::Link { href, children } => {
            cx.out.add_line(&open_tag(
                "a",
                &[
                    ("class", "pulse-link".to_string()),
                    ("href", sanitize_href(href).to_string()),
                    ("target", "_blank".to_string()),
                    ("rel", "noopener noreferrer".to_string()),
                ],
            ));
            cx.out.indent();
            write_children(children, cx);
            cx.out.dedent();
            cx.out.add_line("</a>");
        }

        RNode::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            cx.out.add_line(&format!("<{} class=\"pulse-list\">", tag));
            cx.out.indent();
            for item in items {
                cx.out.add_line("<li>");
                cx.out.indent();
                write_node(item, cx);
                cx.out.dedent();
                cx.out.add_line("</li>");
            }
            cx.out.dedent();
            cx.out.add_line(&format!("</{}>", tag));
        }

        RNode::Rule { color, style } => {
            let border = format!("1px {} {}", line_css(*style), color.css(cx.tokens));
            cx.out.add_line(&open_tag(
                "hr",
                &[
                    ("class", "pulse-rule".to_string()),
                    ("style", inline_style(&[("border-top", border)])),
                ],
            ));
        }

        RNode::Spacer { height } => {
            cx.out.add_line(&format!(
                "<div class=\"pulse-spacer\" style=\"height: {}px\"></div>",
                height
            ));
        }

        RNode::CopyButton { label, payload } => {
            cx.out.add_line(&format!(
                "{}{}</button>",
                open_tag(
                    "button",
                    &[
                        ("type", "button".to_string()),
                        ("class", "pulse-copy-btn".to_string()),
                        ("data-copy", payload.clone()),
                    ],
                ),
                escape_html(label)
            ));
        }

        RNode::Collapsible {
            target,
            summary,
            children,
        } => {
            cx.out.add_line(&format!(
                "{}{}</button>",
                open_tag(
                    "button",
                    &[
                        ("type", "button".to_string()),
                        ("class", "pulse-expand-btn".to_string()),
                        ("data-target", target.clone()),
                        ("aria-expanded", "false".to_string()),
                    ],
                ),
                escape_html(summary)
            ));
            cx.out.add_line(&format!(
                "<div id=\"{}\" class=\"pulse-collapse\" hidden>",
                escape_html(target)
            ));
            cx.out.indent();
            write_children(children, cx);
            cx.out.dedent();
            cx.out.add_line("</div>");
        }

        RNode::Feed {
            variant,
            key,
            feeds,
            limit,
            children,
        } => {
            let kind = match variant {
                FeedVariant::Ticker => "ticker",
                FeedVariant::Sidebar => "sidebar",
            };
            let feeds = serde_json::to_string(feeds).unwrap_or_else(|_| "[]".to_string());
            cx.out.add_line(&open_tag(
                "div",
                &[
                    ("class", "pulse-feed".to_string()),
                    ("data-feed-kind", kind.to_string()),
                    ("data-feed-key", key.clone()),
                    ("data-feeds", feeds),
                    ("data-limit", limit.to_string()),
                ],
            ));
            cx.out.indent();
            write_children(children, cx);
            cx.out.dedent();
            cx.out.add_line("</div>");
        }

        RNode::Placeholder { label } => {
            cx.out.add_line(&format!(
                "<div class=\"pulse-placeholder\">{}</div>",
                escape_html(label)
            ));
        }
    }
}

fn write_children(children: &[RNode], cx: &mut Context) {
    for child in children {
        write_node(child, cx);
    }
}

/// `<tag a="b">`, skipping attributes with empty values
fn open_tag(tag: &str, attributes: &[(&str, String)]) -> String {
    let mut html = format!("<{}", tag);
    for (name, value) in attributes {
        if value.is_empty() && *name != "alt" {
            continue;
        }
        html.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    html.push_str(if is_self_closing(tag) { " />" } else { ">" });
    html
}

fn inline_style(declarations: &[(&str, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}: {}", property, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn layout_class(layout: Layout) -> String {
    match layout {
        Layout::Stack => "pulse-stack".to_string(),
        Layout::Row => "pulse-row".to_string(),
        Layout::Grid { columns } => format!("pulse-grid pulse-cols-{}", columns.clamp(1, 6)),
        Layout::Marquee { .. } => "pulse-marquee".to_string(),
    }
}

fn frame_classes(frame: &Frame) -> Vec<String> {
    let mut classes = Vec::new();
    match frame.padding {
        Spacing::None => {}
        Spacing::Small => classes.push("pulse-pad-sm".to_string()),
        Spacing::Medium => classes.push("pulse-pad-md".to_string()),
        Spacing::Large => classes.push("pulse-pad-lg".to_string()),
    }
    if frame.rounded {
        classes.push("pulse-rounded".to_string());
    }
    classes
}

fn frame_style(frame: &Frame, layout: Layout, tokens: &ResolvedTokens) -> Vec<(&'static str, String)> {
    let mut style = Vec::new();
    if let Some(paint) = &frame.background {
        style.push(("background", paint.css(tokens)));
    }
    if let Some(paint) = &frame.border {
        style.push(("border", format!("1px solid {}", paint.css(tokens))));
    }
    if let Some(paint) = &frame.accent_edge {
        style.push(("border-left", format!("4px solid {}", paint.css(tokens))));
    }
    if let Some(paint) = &frame.ink {
        style.push(("color", paint.css(tokens)));
    }
    if let Some(align) = frame.align {
        style.push(("text-align", align.as_css().to_string()));
        if layout == Layout::Stack && align != Alignment::Left {
            let items = if align == Alignment::Center { "center" } else { "flex-end" };
            style.push(("align-items", items.to_string()));
        }
    }
    if let Some(max) = frame.max_width {
        style.push(("max-width", format!("{}px", max)));
        if frame.align == Some(Alignment::Center) {
            style.push(("margin", "0 auto".to_string()));
        }
    }
    style
}

fn role_tag(role: TextRole) -> &'static str {
    match role {
        TextRole::Masthead => "h1",
        TextRole::Heading => "h2",
        TextRole::Title => "h3",
        TextRole::Body | TextRole::Subheading | TextRole::Caption => "p",
        TextRole::Quote => "blockquote",
        TextRole::Code => "pre",
        TextRole::Badge | TextRole::Numeral => "span",
        TextRole::Eyebrow | TextRole::Label | TextRole::Strong | TextRole::Small => "div",
    }
}

pub(crate) fn fit_css(fit: ImageFit) -> &'static str {
    match fit {
        ImageFit::Cover => "cover",
        ImageFit::Contain => "contain",
        ImageFit::Fill => "fill",
    }
}

pub(crate) fn line_css(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dashed => "dashed",
        LineStyle::Dotted => "dotted",
    }
}
