//! Theme resolution per render target.
//!
//! Targets that understand CSS custom properties get `var(--c-*)` references
//! and a single `:root` block binding them. The email target gets literals
//! only: every `var(...)`, including ones buried in a font stack, is followed
//! to a concrete value or the whole resolution fails.

use crate::css::{sanitize_value, CssRule};
use crate::error::{ThemeError, ThemeResult};
use crate::mode::RenderMode;
use pulse_schema::{ColorToken, FontToken, Theme};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Theme values ready to be written into a target
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTokens {
    mode: RenderMode,
    colors: HashMap<ColorToken, String>,
    fonts: HashMap<FontToken, String>,
    literals: Literals,
}

#[derive(Debug, Clone, PartialEq)]
struct Literals {
    colors: HashMap<ColorToken, String>,
    fonts: HashMap<FontToken, String>,
}

impl ResolvedTokens {
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Value to write wherever a color token is used
    pub fn color(&self, token: ColorToken) -> &str {
        self.colors.get(&token).map(String::as_str).unwrap_or_default()
    }

    pub fn font(&self, token: FontToken) -> &str {
        self.fonts.get(&token).map(String::as_str).unwrap_or_default()
    }

    /// `:root` rule binding every token, `None` for literal-only targets
    pub fn root_rule(&self) -> Option<CssRule> {
        if !self.mode.allows_indirection() {
            return None;
        }

        let mut rule = CssRule::new(":root");
        for token in ColorToken::ALL {
            rule = rule.decl(token.css_var(), self.literals.colors[&token].clone());
        }
        for token in FontToken::ALL {
            rule = rule.decl(token.css_var(), self.literals.fonts[&token].clone());
        }
        Some(rule)
    }

    /// Bring a free-form value (a block's custom color) into this target.
    ///
    /// Literal-only targets get every token reference substituted.
    pub fn value(&self, raw: &str) -> ThemeResult<String> {
        if self.mode.allows_indirection() {
            return Ok(sanitize_value(raw));
        }
        let lookup = |name: &str| -> Option<String> {
            ColorToken::ALL
                .iter()
                .find(|t| t.css_var() == name)
                .map(|t| self.literals.colors[t].clone())
                .or_else(|| {
                    FontToken::ALL
                        .iter()
                        .find(|t| t.css_var() == name)
                        .map(|t| self.literals.fonts[t].clone())
                })
        };
        substitute(raw, &lookup, &mut Vec::new()).map(|v| sanitize_value(&v))
    }
}

/// Resolve `theme` for `mode`
#[instrument(skip(theme), fields(theme = %theme.id))]
pub fn resolve(theme: &Theme, mode: RenderMode) -> ThemeResult<ResolvedTokens> {
    let literals = resolve_literals(theme)?;

    let (colors, fonts) = if mode.allows_indirection() {
        (
            ColorToken::ALL
                .iter()
                .map(|t| (*t, format!("var({})", t.css_var())))
                .collect(),
            FontToken::ALL
                .iter()
                .map(|t| (*t, format!("var({})", t.css_var())))
                .collect(),
        )
    } else {
        (literals.colors.clone(), literals.fonts.clone())
    };

    debug!(?mode, "Resolved theme tokens");
    Ok(ResolvedTokens {
        mode,
        colors,
        fonts,
        literals,
    })
}

fn resolve_literals(theme: &Theme) -> ThemeResult<Literals> {
    let lookup = |name: &str| -> Option<String> { raw_token(theme, name).map(str::to_string) };

    let mut colors = HashMap::new();
    for token in ColorToken::ALL {
        let mut stack = vec![token.css_var()];
        let value = substitute(theme.color(token), &lookup, &mut stack)?;
        colors.insert(token, sanitize_value(&value));
    }

    let mut fonts = HashMap::new();
    for token in FontToken::ALL {
        let mut stack = vec![token.css_var()];
        let value = substitute(theme.font(token), &lookup, &mut stack)?;
        fonts.insert(token, sanitize_value(&value));
    }

    Ok(Literals { colors, fonts })
}

/// Unresolved theme value behind a custom property name
fn raw_token<'a>(theme: &'a Theme, name: &str) -> Option<&'a str> {
    if let Some(token) = ColorToken::ALL.iter().find(|t| t.css_var() == name) {
        return Some(theme.color(*token));
    }
    FontToken::ALL
        .iter()
        .find(|t| t.css_var() == name)
        .map(|t| theme.font(*t))
}

/// Replace every `var(--name[, fallback])` in `value`.
///
/// `stack` holds the names currently being expanded; meeting one again is a
/// cycle.
fn substitute(
    value: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
    stack: &mut Vec<String>,
) -> ThemeResult<String> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 4..];
        let end = matching_paren(after).ok_or_else(|| ThemeError::Malformed(value.to_string()))?;
        let inner = &after[..end];

        let (name, fallback) = match split_top_level_comma(inner) {
            Some(comma) => (inner[..comma].trim(), Some(inner[comma + 1..].trim())),
            None => (inner.trim(), None),
        };

        let replacement = match lookup(name) {
            Some(raw) => {
                if stack.iter().any(|n| n == name) {
                    return Err(ThemeError::CyclicToken(name.to_string()));
                }
                stack.push(name.to_string());
                let resolved = substitute(&raw, lookup, stack)?;
                stack.pop();
                resolved
            }
            None => match fallback {
                Some(fallback) => substitute(fallback, lookup, stack)?,
                None => return Err(ThemeError::UnresolvedToken(name.to_string())),
            },
        };

        out.push_str(&replacement);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Index of the `)` closing an already-opened paren
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        let mut theme = Theme::default();
        theme.font_body = "var(--f-display), Arial, sans-serif".to_string();
        theme.border = "var(--c-muted)".to_string();
        theme
    }

    #[test]
    fn test_indirect_modes_use_variables() {
        for mode in [RenderMode::Interactive, RenderMode::StaticPage, RenderMode::ViewerRuntime] {
            let tokens = resolve(&theme(), mode).unwrap();
            assert_eq!(tokens.color(ColorToken::Primary), "var(--c-primary)");
            assert_eq!(tokens.font(FontToken::Body), "var(--f-body)");
            assert!(tokens.root_rule().is_some());
        }
    }

    #[test]
    fn test_email_substitutes_nested_references() {
        let theme = theme();
        let tokens = resolve(&theme, RenderMode::Email).unwrap();
        assert_eq!(
            tokens.font(FontToken::Body),
            format!("{}, Arial, sans-serif", theme.font_display)
        );
        assert_eq!(tokens.color(ColorToken::Border), theme.muted);
        assert!(tokens.root_rule().is_none());
    }

    #[test]
    fn test_unknown_reference_uses_fallback() {
        let mut theme = Theme::default();
        theme.accent = "var(--brand, var(--c-primary))".to_string();
        let tokens = resolve(&theme, RenderMode::Email).unwrap();
        assert_eq!(tokens.color(ColorToken::Accent), Theme::default().primary);
    }

    #[test]
    fn test_unknown_reference_without_fallback_fails() {
        let mut theme = Theme::default();
        theme.accent = "var(--brand)".to_string();
        assert!(matches!(
            resolve(&theme, RenderMode::Email),
            Err(ThemeError::UnresolvedToken(name)) if name == "--brand"
        ));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut theme = Theme::default();
        theme.primary = "var(--c-accent)".to_string();
        theme.accent = "var(--c-primary)".to_string();
        assert!(matches!(
            resolve(&theme, RenderMode::Email),
            Err(ThemeError::CyclicToken(_))
        ));
    }

    #[test]
    fn test_custom_value_for_email() {
        let tokens = resolve(&Theme::default(), RenderMode::Email).unwrap();
        assert_eq!(tokens.value("var(--c-text)").unwrap(), Theme::default().text);
        assert_eq!(tokens.value("#ff0000").unwrap(), "#ff0000");
        assert!(tokens.value("var(--nope)").is_err());
    }
}
