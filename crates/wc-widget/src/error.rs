use std::path::PathBuf;

use thiserror::Error;
use wc_core::{RegistryError, SelectorError, StyleError, TemplateError};

pub type Result<T> = std::result::Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("isolated root has not been initialized")]
    NotInitialized,

    #[error("element \"{selector}\" not found in isolated root")]
    ElementNotFound { selector: String },

    #[error("unknown widget preset: {name}")]
    UnknownPreset { name: String },

    #[error("tag is not defined: {tag}")]
    UndefinedTag { tag: String },

    #[error("invalid widget config: {message}")]
    InvalidConfig { message: String },

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl WidgetError {
    #[must_use]
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
