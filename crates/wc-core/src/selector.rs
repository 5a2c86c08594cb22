#![forbid(unsafe_code)]

//! Minimal element selectors: `tag`, `#id`, and `tag#id`.
//!
//! Widgets only ever look up their own fixed children, so compound and
//! combinator selectors are rejected rather than half-supported.

use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let unsupported = || SelectorError::Unsupported {
            selector: input.to_string(),
        };
        if input
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | '[' | ':' | '>' | '+' | '~' | ','))
        {
            return Err(unsupported());
        }

        let (tag, id) = match input.split_once('#') {
            Some((tag, id)) => (tag, Some(id)),
            None => (input, None),
        };
        if id.is_some_and(|id| id.is_empty() || id.contains('#')) {
            return Err(unsupported());
        }

        Ok(Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            id: id.map(str::to_string),
        })
    }

    /// Selector matching any element with the given tag name.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            id: None,
        }
    }

    /// Selector matching the element with the given id.
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self {
            tag: None,
            id: Some(id.to_string()),
        }
    }

    /// Whether an element with `tag` and attribute list `attributes` matches.
    #[must_use]
    pub fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        match &self.id {
            Some(expected) => attributes
                .iter()
                .any(|(name, value)| name == "id" && value == expected),
            None => true,
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}
