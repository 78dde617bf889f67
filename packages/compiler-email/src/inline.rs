//! Inline declarations for the email dialect.

use pulse_render::TextRole;
use pulse_schema::{ColorToken, FontToken};
use pulse_theme::ResolvedTokens;

pub(crate) type Declarations = Vec<(&'static str, String)>;

/// Typography of a text role, as inline declarations
pub(crate) fn role_style(role: TextRole, tokens: &ResolvedTokens) -> Declarations {
    let display = tokens.font(FontToken::Display).to_string();
    let body = tokens.font(FontToken::Body).to_string();
    let mono = tokens.font(FontToken::Mono).to_string();

    let mut style: Declarations = vec![("margin", "0".to_string())];
    match role {
        TextRole::Masthead => style.extend([
            ("font-family", display),
            ("font-size", "38px".to_string()),
            ("font-weight", "400".to_string()),
            ("line-height", "1.1".to_string()),
        ]),
        TextRole::Heading => style.extend([
            ("font-family", display),
            ("font-size", "24px".to_string()),
            ("font-weight", "400".to_string()),
            ("line-height", "1.2".to_string()),
        ]),
        TextRole::Title => style.extend([
            ("font-family", display),
            ("font-size", "19px".to_string()),
            ("font-weight", "400".to_string()),
            ("line-height", "1.25".to_string()),
        ]),
        TextRole::Subheading => style.extend([
            ("font-family", body),
            ("font-size", "15px".to_string()),
            ("line-height", "1.5".to_string()),
        ]),
        TextRole::Eyebrow => style.extend([
            ("font-family", mono),
            ("font-size", "11px".to_string()),
            ("letter-spacing", "0.18em".to_string()),
            ("text-transform", "uppercase".to_string()),
        ]),
        TextRole::Label => style.extend([
            ("font-family", mono),
            ("font-size", "11px".to_string()),
            ("font-weight", "700".to_string()),
            ("letter-spacing", "0.14em".to_string()),
            ("text-transform", "uppercase".to_string()),
        ]),
        TextRole::Strong => style.extend([
            ("font-family", body),
            ("font-size", "15px".to_string()),
            ("font-weight", "700".to_string()),
        ]),
        TextRole::Body => style.extend([
            ("font-family", body),
            ("font-size", "14px".to_string()),
            ("line-height", "1.6".to_string()),
        ]),
        TextRole::Small => style.extend([("font-family", body), ("font-size", "12px".to_string())]),
        TextRole::Caption => style.extend([
            ("font-family", body),
            ("font-size", "12px".to_string()),
            ("font-style", "italic".to_string()),
        ]),
        TextRole::Quote => style.extend([
            ("font-family", body),
            ("font-size", "14px".to_string()),
            ("font-style", "italic".to_string()),
            ("line-height", "1.6".to_string()),
        ]),
        TextRole::Code => style.extend([
            ("font-family", mono),
            ("font-size", "12px".to_string()),
            ("white-space", "pre-wrap".to_string()),
            ("padding", "12px".to_string()),
            ("background", tokens.color(ColorToken::Background).to_string()),
            ("border", format!("1px solid {}", tokens.color(ColorToken::Border))),
        ]),
        TextRole::Badge => style.extend([
            ("display", "inline-block".to_string()),
            ("font-family", mono),
            ("font-size", "10px".to_string()),
            ("text-transform", "uppercase".to_string()),
            ("padding", "2px 8px".to_string()),
            ("border", "1px solid currentColor".to_string()),
            ("border-radius", "999px".to_string()),
        ]),
        TextRole::Numeral => style.extend([
            ("font-family", display),
            ("font-size", "26px".to_string()),
            ("font-weight", "700".to_string()),
            ("line-height", "1".to_string()),
        ]),
    }
    style
}

/// `a: b; c: d`
pub(crate) fn to_style(declarations: &[(&str, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}:{}", property, value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Quoted family names of the theme's font stacks, in token order, without
/// duplicates. Generic and unquoted families are left to the client.
pub fn font_families(tokens: &ResolvedTokens) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    for token in FontToken::ALL {
        let stack = tokens.font(token);
        let Some(first) = stack.split(',').next() else {
            continue;
        };
        let first = first.trim();
        let quoted = first.len() > 2
            && ((first.starts_with('"') && first.ends_with('"'))
                || (first.starts_with('\'') && first.ends_with('\'')));
        if !quoted {
            continue;
        }
        let name = first[1..first.len() - 1].trim().to_string();
        if !name.is_empty() && !families.contains(&name) {
            families.push(name);
        }
    }
    families
}

/// Web-font stylesheet link for the theme's named families, if any
pub fn fonts_link(tokens: &ResolvedTokens) -> Option<String> {
    let families = font_families(tokens);
    if families.is_empty() {
        return None;
    }
    let query = families
        .iter()
        .map(|f| format!("family={}", f.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&");
    Some(format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        query
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_schema::Theme;
    use pulse_theme::{resolve, RenderMode};

    #[test]
    fn test_fonts_link_lists_quoted_families() {
        let tokens = resolve(&Theme::default(), RenderMode::Email).unwrap();
        assert_eq!(
            font_families(&tokens),
            vec!["DM Serif Display", "DM Sans", "DM Mono"]
        );
        assert_eq!(
            fonts_link(&tokens).unwrap(),
            "https://fonts.googleapis.com/css2?family=DM+Serif+Display&family=DM+Sans&family=DM+Mono&display=swap"
        );
    }

    #[test]
    fn test_system_fonts_need_no_link() {
        let mut theme = Theme::default();
        theme.font_display = "Georgia, serif".into();
        theme.font_body = "system-ui, sans-serif".into();
        theme.font_mono = "monospace".into();
        let tokens = resolve(&theme, RenderMode::Email).unwrap();
        assert!(fonts_link(&tokens).is_none());
    }

    #[test]
    fn test_role_styles_are_literal() {
        let tokens = resolve(&Theme::default(), RenderMode::Email).unwrap();
        for role in TextRole::ALL {
            let style = to_style(&role_style(role, &tokens));
            assert!(style.starts_with("margin:0"));
            assert!(!style.contains("var("), "{}", style);
        }
    }
}
