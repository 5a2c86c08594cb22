#![forbid(unsafe_code)]

//! Shared stylesheets.
//!
//! A [`StyleSheet`] is parsed and minified once; hosts adopt it by
//! reference (`Arc<StyleSheet>`) so every widget instance shares the same
//! object. The minified text is what a browser host hands to
//! `CSSStyleSheet.replaceSync`.
//!
//! The rule index is built from the parsed rule list, not from the
//! printed text. Style rules nested in `@media` and `@supports` blocks are
//! indexed with their enclosing conditions.

use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet as CssSheet};
use lightningcss::traits::ToCss;

use crate::error::StyleError;

/// A style rule of a minified stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// One entry per selector in the rule's selector list.
    pub selectors: Vec<String>,
    /// Minified declarations without the surrounding braces.
    pub declarations: String,
    /// Enclosing conditional at-rules, outermost first
    /// (e.g. `@media (width>=1px)`). Empty for top-level rules.
    pub conditions: Vec<String>,
}

/// A parsed, immutable stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    css_text: String,
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Parse and minify `css`.
    pub fn parse(css: &str) -> Result<Self, StyleError> {
        let sheet = CssSheet::parse(css, ParserOptions::default()).map_err(|err| {
            StyleError::Parse {
                message: err.to_string(),
            }
        })?;
        let mut rules = Vec::new();
        index_rules(&sheet.rules.0, &mut Vec::new(), &mut rules)?;
        let printed = sheet.to_css(minified()).map_err(print_error)?;
        Ok(Self {
            css_text: printed.code,
            rules,
        })
    }

    /// Minified stylesheet text.
    #[must_use]
    pub fn css_text(&self) -> &str {
        &self.css_text
    }

    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Whether any rule, conditional or not, lists `selector`.
    #[must_use]
    pub fn has_selector(&self, selector: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.selectors.iter().any(|s| s == selector))
    }
}

fn minified() -> PrinterOptions<'static> {
    PrinterOptions {
        minify: true,
        ..PrinterOptions::default()
    }
}

fn print_error(err: impl std::fmt::Display) -> StyleError {
    StyleError::Print {
        message: err.to_string(),
    }
}

fn to_minified<T: ToCss>(value: &T) -> Result<String, StyleError> {
    value.to_css_string(minified()).map_err(print_error)
}

fn index_rules(
    list: &[CssRule<'_>],
    conditions: &mut Vec<String>,
    out: &mut Vec<StyleRule>,
) -> Result<(), StyleError> {
    for rule in list {
        match rule {
            CssRule::Style(style) => {
                let selectors = style
                    .selectors
                    .0
                    .iter()
                    .map(to_minified)
                    .collect::<Result<Vec<_>, _>>()?;
                out.push(StyleRule {
                    selectors,
                    declarations: to_minified(&style.declarations)?,
                    conditions: conditions.clone(),
                });
            }
            CssRule::Media(media) => {
                conditions.push(format!("@media {}", to_minified(&media.query)?));
                index_rules(&media.rules.0, conditions, out)?;
                conditions.pop();
            }
            CssRule::Supports(supports) => {
                conditions.push(format!("@supports {}", to_minified(&supports.condition)?));
                index_rules(&supports.rules.0, conditions, out)?;
                conditions.pop();
            }
            _ => {}
        }
    }
    Ok(())
}
