#![forbid(unsafe_code)]

//! Pre-parsed markup fragments.
//!
//! A [`Fragment`] is parsed once from static markup (HTML5 fragment rules,
//! so stray tokens such as `</br>` recover the way a browser would) and is
//! never mutated afterwards. Hosts deep-copy it into an isolated root on
//! every render; each copy gets fresh node identities. Attributes are kept
//! sorted by name.

use scraper::{ElementRef, Html};

use crate::error::TemplateError;

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<TemplateNode>,
    },
    Text(String),
}

impl TemplateNode {
    /// Tag name for element nodes.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }
}

/// An immutable markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<TemplateNode>,
}

impl Fragment {
    /// Parse static markup into a fragment.
    ///
    /// Whitespace-only text between elements is dropped.
    pub fn parse(markup: &str) -> Result<Self, TemplateError> {
        let html = Html::parse_fragment(markup);
        if !html.errors.is_empty() {
            tracing::debug!(
                message = "template.parse.recovered",
                errors = html.errors.len()
            );
        }
        let nodes = collect_children(html.root_element());
        if nodes.is_empty() {
            return Err(TemplateError::Empty);
        }
        Ok(Self { nodes })
    }

    /// Top-level nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// Tag names of the top-level elements, in order.
    #[must_use]
    pub fn top_level_tags(&self) -> Vec<&str> {
        self.nodes.iter().filter_map(TemplateNode::tag).collect()
    }
}

fn collect_children(parent: ElementRef<'_>) -> Vec<TemplateNode> {
    let mut out = Vec::new();
    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            let value = element.value();
            // Attribute storage order is not guaranteed by the parser.
            let mut attributes: Vec<(String, String)> = value
                .attrs()
                .map(|(name, val)| (name.to_string(), val.to_string()))
                .collect();
            attributes.sort();
            out.push(TemplateNode::Element {
                tag: value.name().to_string(),
                attributes,
                children: collect_children(element),
            });
        } else if let Some(text) = child.value().as_text() {
            let text: &str = text;
            if !text.trim().is_empty() {
                out.push(TemplateNode::Text(text.to_string()));
            }
        }
    }
    out
}
