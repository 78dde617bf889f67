use crate::inline::{fonts_link, role_style, to_style, Declarations};
use pulse_common::{escape_html, is_self_closing, sanitize_href, Markup};
use pulse_render::{render_document, BlockTree, Frame, Layout, RNode, Spacing, TextRole};
use pulse_schema::{Alignment, ColorToken, FontToken, ImageFit, LineStyle, Newsletter};
use pulse_theme::{resolve, RenderMode, ResolvedTokens, ThemeError};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Width of the email shell in pixels
pub const EMAIL_WIDTH: u32 = 600;

/// Horizontal padding of every block row
const GUTTER: u32 = 32;

/// Errors that can occur during email compilation
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Email compilation error: {0}")]
    Generic(String),
}

impl From<String> for EmailError {
    fn from(s: String) -> Self {
        EmailError::Generic(s)
    }
}

impl From<&str> for EmailError {
    fn from(s: &str) -> Self {
        EmailError::Generic(s.to_string())
    }
}

/// Options for email compilation
#[derive(Debug, Clone)]
pub struct EmailOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Link the theme's web fonts from Google Fonts
    pub web_fonts: bool,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            web_fonts: true,
        }
    }
}

/// Download name of an issue's email file
pub fn email_filename(doc: &Newsletter) -> String {
    format!("newsletter_issue{}_email.html", doc.issue_slug())
}

struct Context<'a> {
    tokens: &'a ResolvedTokens,
    out: Markup,
    /// Text colors inherited from enclosing frames, innermost last
    ink: Vec<String>,
}

impl<'a> Context<'a> {
    fn ink(&self) -> String {
        self.ink
            .last()
            .cloned()
            .unwrap_or_else(|| self.tokens.color(ColorToken::Text).to_string())
    }
}

/// Compile an issue to a self-contained email document.
///
/// Every value is a literal; a theme that cannot be made literal fails here
/// rather than leaking a `var()` into the output.
#[instrument(skip(doc, options), fields(blocks = doc.block_order.len()))]
pub fn compile_email(doc: &Newsletter, options: &EmailOptions) -> Result<String, EmailError> {
    let tokens = resolve(&doc.theme, RenderMode::Email)?;
    let trees = render_document(doc, RenderMode::Email);

    let background = tokens.color(ColorToken::Background).to_string();
    let surface = tokens.color(ColorToken::Surface).to_string();
    let mut out = Markup::new(options.pretty);

    out.add_line("<!DOCTYPE html>");
    out.add_line("<html lang=\"en\" xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:o=\"urn:schemas-microsoft-com:office:office\">");
    out.indent();

    out.add_line("<head>");
    out.indent();
    out.add_line("<meta charset=\"UTF-8\">");
    out.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    out.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    out.add_line("<meta name=\"x-apple-disable-message-reformatting\">");
    out.add_line(&format!("<title>{}</title>", escape_html(email_title(doc))));
    out.add_line("<!--[if mso]>");
    out.add_line("<noscript><xml><o:OfficeDocumentSettings><o:PixelsPerInch>96</o:PixelsPerInch></o:OfficeDocumentSettings></xml></noscript>");
    out.add_line("<![endif]-->");
    if options.web_fonts {
        if let Some(href) = fonts_link(&tokens) {
            out.add_line("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">");
            out.add_line(&format!(
                "<link href=\"{}\" rel=\"stylesheet\">",
                escape_html(&href)
            ));
        }
    }
    out.add_line("<style>");
    out.add_line(&format!(
        "body {{ margin: 0; padding: 0; background: {}; -webkit-text-size-adjust: 100%; -ms-text-size-adjust: 100%; }}",
        background
    ));
    out.add_line("table { border-spacing: 0; mso-table-lspace: 0; mso-table-rspace: 0; }");
    out.add_line("img { border: 0; outline: none; text-decoration: none; }");
    out.add_line("@media only screen and (max-width: 620px) { .pulse-email-shell { width: 100% !important; } .pulse-email-col { display: block !important; width: 100% !important; } }");
    out.add_line("</style>");
    out.dedent();
    out.add_line("</head>");

    out.add_line(&format!(
        "<body style=\"margin:0;padding:0;background:{}\">",
        escape_html(&background)
    ));
    out.indent();
    out.add_line(&format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" bgcolor=\"{bg}\" style=\"background:{bg};padding:20px 0\">",
        bg = escape_html(&background)
    ));
    out.indent();
    out.add_line("<tr><td align=\"center\">");
    out.indent();
    out.add_line(&format!(
        "<table class=\"pulse-email-shell\" role=\"presentation\" width=\"{w}\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" bgcolor=\"{bg}\" style=\"width:{w}px;max-width:{w}px;background:{bg};border-radius:12px;overflow:hidden\">",
        w = EMAIL_WIDTH,
        bg = escape_html(&surface)
    ));
    out.indent();

    let mut cx = Context {
        tokens: &tokens,
        out,
        ink: Vec::new(),
    };
    for tree in &trees {
        write_block(tree, &mut cx);
    }
    let mut out = cx.out;

    out.dedent();
    out.add_line("</table>");
    out.dedent();
    out.add_line("</td></tr>");
    out.dedent();
    out.add_line("</table>");
    out.dedent();
    out.add_line("</body>");
    out.dedent();
    out.add_line("</html>");

    info!(blocks = trees.len(), "Compiled email");
    Ok(out.into_string())
}

fn email_title(doc: &Newsletter) -> &str {
    if doc.meta.title.trim().is_empty() {
        "Newsletter"
    } else {
        doc.meta.title.trim()
    }
}

/// A block is one shell row. A framed root container paints the whole row.
fn write_block(tree: &BlockTree, cx: &mut Context) {
    let (frame, inner): (Option<&Frame>, Vec<&RNode>) = match &tree.node {
        RNode::Container {
            layout: Layout::Stack,
            frame,
            children,
        } if frame.max_width.is_none() => (Some(frame), children.iter().collect()),
        node => (None, vec![node]),
    };

    let mut style: Declarations = Vec::new();
    let mut attributes = vec![("data-block-id", tree.id.clone())];
    let pushed_ink = if let Some(frame) = frame {
        let vertical = if frame.padding == Spacing::Large { 40 } else { 20 };
        style.push(("padding", format!("{}px {}px", vertical, GUTTER)));
        frame_declarations(frame, cx.tokens, &mut attributes, &mut style);
        push_ink(frame, cx)
    } else {
        style.push(("padding", format!("20px {}px", GUTTER)));
        false
    };
    attributes.push(("style", to_style(&style)));

    cx.out.add_line("<tr>");
    cx.out.indent();
    cx.out.add_line(&open_tag("td", &attributes));
    cx.out.indent();
    write_rows(&inner, 8, cx);
    cx.out.dedent();
    cx.out.add_line("</td>");
    cx.out.dedent();
    cx.out.add_line("</tr>");

    if pushed_ink {
        cx.ink.pop();
    }
}

fn push_ink(frame: &Frame, cx: &mut Context) -> bool {
    match &frame.ink {
        Some(paint) => {
            let ink = paint.css(cx.tokens);
            cx.ink.push(ink);
            true
        }
        None => false,
    }
}

/// Backgrounds, borders and alignment of a frame, as `td` attributes plus
/// inline declarations. Padding is left to the caller.
fn frame_declarations(
    frame: &Frame,
    tokens: &ResolvedTokens,
    attributes: &mut Vec<(&'static str, String)>,
    style: &mut Declarations,
) {
    if let Some(paint) = &frame.background {
        let value = paint.css(tokens);
        attributes.push(("bgcolor", value.clone()));
        style.push(("background", value));
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
    if frame.rounded {
        style.push(("border-radius", "10px".to_string()));
    }
    if let Some(align) = frame.align {
        attributes.push(("align", align.as_css().to_string()));
        style.push(("text-align", align.as_css().to_string()));
    }
}

fn padding_px(padding: Spacing) -> Option<&'static str> {
    match padding {
        Spacing::None => None,
        Spacing::Small => Some("8px 12px"),
        Spacing::Medium => Some("16px"),
        Spacing::Large => Some("32px 24px"),
    }
}

/// Children stacked as table rows, `gap` pixels apart
fn write_rows(children: &[&RNode], gap: u32, cx: &mut Context) {
    match children {
        [] => {}
        [only] => write_node(only, cx),
        _ => {
            cx.out.add_line(&presentation_table(&[]));
            cx.out.indent();
            let last = children.len() - 1;
            for (i, child) in children.iter().enumerate() {
                let style = if i == last || gap == 0 {
                    String::new()
                } else {
                    format!("padding:0 0 {}px", gap)
                };
                cx.out.add_line("<tr>");
                cx.out.indent();
                cx.out.add_line(&open_tag("td", &[("style", style)]));
                cx.out.indent();
                write_node(child, cx);
                cx.out.dedent();
                cx.out.add_line("</td>");
                cx.out.dedent();
                cx.out.add_line("</tr>");
            }
            cx.out.dedent();
            cx.out.add_line("</table>");
        }
    }
}

/// Children side by side in one table row
fn write_columns(children: &[&RNode], cx: &mut Context) {
    cx.out.add_line(&presentation_table(&[]));
    cx.out.indent();
    cx.out.add_line("<tr>");
    cx.out.indent();
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        let style = if i == last {
            "vertical-align:top".to_string()
        } else {
            "vertical-align:top;padding-right:12px".to_string()
        };
        cx.out.add_line(&open_tag(
            "td",
            &[
                ("class", "pulse-email-col".to_string()),
                ("valign", "top".to_string()),
                ("style", style),
            ],
        ));
        cx.out.indent();
        write_node(child, cx);
        cx.out.dedent();
        cx.out.add_line("</td>");
    }
    cx.out.dedent();
    cx.out.add_line("</tr>");
    cx.out.dedent();
    cx.out.add_line("</table>");
}

fn presentation_table(extra: &[(&'static str, String)]) -> String {
    let mut attributes = vec![
        ("role", "presentation".to_string()),
        ("width", "100%".to_string()),
        ("cellpadding", "0".to_string()),
        ("cellspacing", "0".to_string()),
        ("border", "0".to_string()),
    ];
    attributes.extend(extra.iter().cloned());
    open_tag("table", &attributes)
}

fn write_node(node: &RNode, cx: &mut Context) {
    match node {
        RNode::Container {
            layout,
            frame,
            children,
        } => write_container(*layout, frame, children, cx),

        RNode::Text {
            content,
            role,
            color,
        } => {
            let tag = role_tag(*role);
            let mut style = role_style(*role, cx.tokens);
            let ink = match color {
                Some(paint) => paint.css(cx.tokens),
                None => cx.ink(),
            };
            style.push(("color", ink));
            cx.out.add_line(&format!(
                "{}{}</{}>",
                open_tag(tag, &[("style", to_style(&style))]),
                escape_html(content),
                tag
            ));
        }

        RNode::RichText { html } => {
            let style = to_style(&[
                ("font-family", cx.tokens.font(FontToken::Body).to_string()),
                ("font-size", "15px".to_string()),
                ("line-height", "1.7".to_string()),
                ("color", cx.ink()),
            ]);
            cx.out.add_line(&open_tag("div", &[("style", style)]));
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
            let width_attr = match (width, scale) {
                (Some(w), _) => w.to_string(),
                (None, Some(scale)) => format!("{}%", scale),
                (None, None) => "100%".to_string(),
            };
            let mut style: Declarations = vec![("display", "block".to_string())];
            match (width, scale) {
                (Some(w), _) => style.push(("width", format!("{}px", w))),
                (None, Some(scale)) => style.push(("width", format!("{}%", scale))),
                (None, None) => style.push(("width", "100%".to_string())),
            }
            style.push(("max-width", "100%".to_string()));
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
                    ("src", src.clone()),
                    ("alt", alt.clone()),
                    ("width", width_attr),
                    ("height", height.map(|h| h.to_string()).unwrap_or_default()),
                    ("style", to_style(&style)),
                ],
            ));
        }

        RNode::Link { href, children } => {
            let style = to_style(&[
                ("color", cx.ink()),
                ("text-decoration", "none".to_string()),
            ]);
            cx.out.add_line(&open_tag(
                "a",
                &[
                    ("href", sanitize_href(href).to_string()),
                    ("target", "_blank".to_string()),
                    ("style", style),
                ],
            ));
            cx.out.indent();
            for child in children {
                write_node(child, cx);
            }
            cx.out.dedent();
            cx.out.add_line("</a>");
        }

        RNode::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            cx.out.add_line(&open_tag(
                tag,
                &[("style", "margin:0;padding-left:20px".to_string())],
            ));
            cx.out.indent();
            for item in items {
                cx.out.add_line("<li style=\"margin:0 0 6px\">");
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
            cx.out.add_line(&presentation_table(&[]));
            cx.out.add_line(&format!(
                "<tr><td style=\"{}\">&nbsp;</td></tr>",
                escape_html(&to_style(&[
                    ("border-top", border),
                    ("font-size", "0".to_string()),
                    ("line-height", "0".to_string()),
                ]))
            ));
            cx.out.add_line("</table>");
        }

        RNode::Spacer { height } => {
            cx.out.add_line(&format!(
                "<div style=\"height:{h}px;line-height:{h}px;font-size:0\">&nbsp;</div>",
                h = height
            ));
        }

        // Email trees carry no controls; anything that slips through keeps
        // only its readable content.
        RNode::CopyButton { label, .. } => {
            debug!(label = label.as_str(), "Dropping copy control from email");
        }
        RNode::Collapsible { children, .. } | RNode::Feed { children, .. } => {
            let children: Vec<&RNode> = children.iter().collect();
            write_rows(&children, 8, cx);
        }

        RNode::Placeholder { label } => {
            let style = to_style(&[
                ("padding", "16px".to_string()),
                (
                    "border",
                    format!("1px dashed {}", cx.tokens.color(ColorToken::Muted)),
                ),
                ("color", cx.tokens.color(ColorToken::Muted).to_string()),
                ("font-family", cx.tokens.font(FontToken::Body).to_string()),
                ("font-size", "13px".to_string()),
                ("font-style", "italic".to_string()),
                ("text-align", "center".to_string()),
            ]);
            cx.out.add_line(&format!(
                "{}{}</p>",
                open_tag("p", &[("style", style)]),
                escape_html(label)
            ));
        }
    }
}

fn write_container(layout: Layout, frame: &Frame, children: &[RNode], cx: &mut Context) {
    let children: Vec<&RNode> = children.iter().collect();
    let framed = *frame != Frame::default();

    let mut table_extra: Vec<(&'static str, String)> = Vec::new();
    if let Some(max) = frame.max_width {
        table_extra.push(("style", format!("max-width:{}px", max)));
        if frame.align == Some(Alignment::Center) {
            table_extra.push(("align", "center".to_string()));
        }
    }

    let pushed_ink = push_ink(frame, cx);
    if framed {
        let mut attributes = Vec::new();
        let mut style: Declarations = Vec::new();
        if let Some(padding) = padding_px(frame.padding) {
            style.push(("padding", padding.to_string()));
        }
        frame_declarations(frame, cx.tokens, &mut attributes, &mut style);
        attributes.push(("style", to_style(&style)));

        cx.out.add_line(&presentation_table(&table_extra));
        cx.out.indent();
        cx.out.add_line("<tr>");
        cx.out.indent();
        cx.out.add_line(&open_tag("td", &attributes));
        cx.out.indent();
    }

    match layout {
        Layout::Row => write_columns(&children, cx),
        Layout::Stack => write_rows(&children, 8, cx),
        // Multi-column grids read top to bottom in mail clients
        Layout::Grid { .. } => write_rows(&children, 16, cx),
        Layout::Marquee { .. } => write_rows(&children, 4, cx),
    }

    if framed {
        cx.out.dedent();
        cx.out.add_line("</td>");
        cx.out.dedent();
        cx.out.add_line("</tr>");
        cx.out.dedent();
        cx.out.add_line("</table>");
    }
    if pushed_ink {
        cx.ink.pop();
    }
}

fn role_tag(role: TextRole) -> &'static str {
    match role {
        TextRole::Masthead => "h1",
        TextRole::Heading => "h2",
        TextRole::Title => "h3",
        TextRole::Code => "pre",
        TextRole::Badge | TextRole::Numeral => "span",
        _ => "p",
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

fn fit_css(fit: ImageFit) -> &'static str {
    match fit {
        ImageFit::Cover => "cover",
        ImageFit::Contain => "contain",
        ImageFit::Fill => "fill",
    }
}

fn line_css(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dashed => "dashed",
        LineStyle::Dotted => "dotted",
    }
}
