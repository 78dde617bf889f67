//! Minimal CSS object model used for generated stylesheets.

/// CSS rule with selector and ordered declarations
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
    pub media_query: Option<String>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
            media_query: None,
        }
    }

    pub fn decl(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn within(mut self, media_query: impl Into<String>) -> Self {
        self.media_query = Some(media_query.into());
        self
    }

    fn write_body(&self, css: &mut String, indent: &str) {
        css.push_str(indent);
        css.push_str(&self.selector);
        css.push_str(" {\n");
        for (property, value) in &self.declarations {
            css.push_str(indent);
            css.push_str("  ");
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push_str(indent);
        css.push_str("}\n");
    }
}

/// Collection of CSS rules, emitted in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub rules: Vec<CssRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: StyleSheet) {
        self.rules.extend(other.rules);
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for rule in &self.rules {
            match &rule.media_query {
                Some(query) => {
                    css.push_str("@media ");
                    css.push_str(query);
                    css.push_str(" {\n");
                    rule.write_body(&mut css, "  ");
                    css.push_str("}\n");
                }
                None => rule.write_body(&mut css, ""),
            }
        }

        css
    }
}

/// Strip characters that could end a declaration or the enclosing `<style>`
pub fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_to_css() {
        let mut sheet = StyleSheet::new();
        sheet.add_rule(CssRule::new(".a").decl("color", "red").decl("padding", "4px"));
        sheet.add_rule(
            CssRule::new(".cols")
                .decl("grid-template-columns", "1fr")
                .within("(max-width: 640px)"),
        );

        let css = sheet.to_css();
        assert_eq!(
            css,
            ".a {\n  color: red;\n  padding: 4px;\n}\n@media (max-width: 640px) {\n  .cols {\n    grid-template-columns: 1fr;\n  }\n}\n"
        );
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value("#fff</style><script>"), "#fff/stylescript");
        assert_eq!(sanitize_value("\"DM Sans\", sans-serif"), "\"DM Sans\", sans-serif");
    }
}
