#![forbid(unsafe_code)]

//! Widget configuration and the two built-in presets.
//!
//! Configs are plain JSON documents; every field has a default, so a file
//! only needs the fields it changes:
//!
//! ```json
//! { "tag_name": "my-widget", "observed_attribute": "label" }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wc_core::validate_tag_name;

use crate::error::{Result, WidgetError};

pub const DEFAULT_MARKUP: &str = r#"
 <h1>MEU COMPONENT</h1>
 <button id="action-btn" type="button">ACTION</button>
 </br>
 <span></span>
"#;

pub const DEFAULT_CSS: &str = ":host{color:red;} button{padding: 2rem;cursor: pointer;}";

pub const DEFAULT_LOCALE: &str = "pt-BR";
pub const DEFAULT_MESSAGE_PREFIX: &str = "EVENTO DISPARADO: TIPO CLICK";
pub const DEFAULT_EVENT_ORIGIN: &str = "click interno";

/// Built-in widget presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// `<wc-component titulo="...">`
    Component,
    /// `<wc-componentname attribute="...">`
    ComponentName,
}

impl Preset {
    pub const ALL: [Self; 2] = [Self::Component, Self::ComponentName];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::ComponentName => "component-name",
        }
    }

    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Component => "wc-component",
            Self::ComponentName => "wc-componentname",
        }
    }

    #[must_use]
    pub const fn observed_attribute(self) -> &'static str {
        match self {
            Self::Component => "titulo",
            Self::ComponentName => "attribute",
        }
    }

    #[must_use]
    pub fn config(self) -> WidgetConfig {
        WidgetConfig {
            tag_name: self.tag_name().to_string(),
            observed_attribute: self.observed_attribute().to_string(),
            ..WidgetConfig::default()
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s || preset.tag_name() == s)
            .ok_or_else(|| WidgetError::UnknownPreset {
                name: s.to_string(),
            })
    }
}

/// Configuration of one widget type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub tag_name: String,
    pub observed_attribute: String,
    pub markup: String,
    pub css: String,
    /// Only used for diagnostics; times are always formatted `HH:MM`.
    pub locale: String,
    pub message_prefix: String,
    pub event_origin: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tag_name: Preset::ComponentName.tag_name().to_string(),
            observed_attribute: Preset::ComponentName.observed_attribute().to_string(),
            markup: DEFAULT_MARKUP.to_string(),
            css: DEFAULT_CSS.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            message_prefix: DEFAULT_MESSAGE_PREFIX.to_string(),
            event_origin: DEFAULT_EVENT_ORIGIN.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| WidgetError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        validate_tag_name(&self.tag_name)?;
        if self.observed_attribute.trim().is_empty() {
            return Err(WidgetError::invalid("observed_attribute must not be empty"));
        }
        if self.markup.trim().is_empty() {
            return Err(WidgetError::invalid("markup must not be empty"));
        }
        Ok(())
    }
}
