use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template markup produced no nodes")]
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("stylesheet parse error: {message}")]
    Parse { message: String },

    #[error("stylesheet print error: {message}")]
    Print { message: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported selector: {selector}")]
    Unsupported { selector: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid custom element name: {name} ({reason})")]
    InvalidTagName { name: String, reason: &'static str },
}

impl RegistryError {
    #[must_use]
    pub fn invalid(name: &str, reason: &'static str) -> Self {
        Self::InvalidTagName {
            name: name.to_string(),
            reason,
        }
    }
}
