//! Markup helpers shared by every HTML-producing back end.

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Neutralize every closing script tag (any letter case) so the text can be
/// inlined inside a `<script>` element. `</script>` becomes `<\/script>`,
/// which is the same string to a JavaScript parser.
pub fn escape_script_close(text: &str) -> String {
    const NEEDLE: &[u8] = b"</script";

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;

    while i + NEEDLE.len() <= bytes.len() {
        if bytes[i..i + NEEDLE.len()].eq_ignore_ascii_case(NEEDLE) {
            out.push_str(&text[last..i]);
            out.push_str("<\\/");
            last = i + 2;
            i += NEEDLE.len();
        } else {
            i += 1;
        }
    }

    out.push_str(&text[last..]);
    out
}

/// Link target safe to emit: script URLs are replaced by `#`
pub fn sanitize_href(url: &str) -> &str {
    let trimmed = url.trim();
    let scheme: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(11)
        .collect::<String>()
        .to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") {
        "#"
    } else {
        trimmed
    }
}

pub fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "col" | "source" | "wbr"
    )
}

/// Indentation-aware output buffer
#[derive(Debug, Clone)]
pub struct Markup {
    pretty: bool,
    indent: String,
    depth: usize,
    buffer: String,
}

impl Markup {
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            indent: "  ".to_string(),
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_covers_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_script_close_any_case() {
        let input = r#"{"html":"<script>x()</script><SCRIPT></ScRiPt >"}"#;
        let escaped = escape_script_close(input);
        assert!(!escaped.to_ascii_lowercase().contains("</script"));
        assert!(escaped.contains(r"<\/script>"));
        assert!(escaped.contains(r"<\/ScRiPt >"));
    }

    #[test]
    fn test_escape_script_close_leaves_other_text() {
        assert_eq!(escape_script_close("</div></scrip"), "</div></scrip");
        assert_eq!(escape_script_close(""), "");
    }

    #[test]
    fn test_sanitize_href() {
        assert_eq!(sanitize_href(" https://example.org "), "https://example.org");
        assert_eq!(sanitize_href("JavaScript:alert(1)"), "#");
        assert_eq!(sanitize_href("java script:alert(1)"), "#");
        assert_eq!(sanitize_href("mailto:ed@example.org"), "mailto:ed@example.org");
    }

    #[test]
    fn test_markup_pretty_indentation() {
        let mut m = Markup::new(true);
        m.add_line("<div>");
        m.indent();
        m.add_line("<p>hi</p>");
        m.dedent();
        m.dedent();
        m.add_line("</div>");
        assert_eq!(m.into_string(), "<div>\n  <p>hi</p>\n</div>\n");
    }

    #[test]
    fn test_markup_compact() {
        let mut m = Markup::new(false);
        m.indent();
        m.add_line("<a>");
        m.add_line("</a>");
        assert_eq!(m.into_string(), "<a></a>");
    }
}
