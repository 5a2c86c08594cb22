#![forbid(unsafe_code)]

//! Widget definitions and process-wide shared state.
//!
//! A [`WidgetDefinition`] bundles a config with its parsed template and
//! stylesheet. Built-in presets are parsed once, on first use, and every
//! instance of a preset holds the same `Arc`s afterwards.
//!
//! The process-wide element registry lives behind [`registry`]; it is
//! created on first access and never replaced. Defining a tag that is
//! already registered is a no-op.

use std::sync::{Arc, OnceLock};

use wc_core::{ElementRegistry, Fragment, Registration, StyleSheet};

use crate::config::{Preset, WidgetConfig};
use crate::error::Result;

#[derive(Debug)]
pub struct WidgetDefinition {
    config: WidgetConfig,
    template: Arc<Fragment>,
    style_sheet: Arc<StyleSheet>,
}

impl WidgetDefinition {
    /// Validate `config` and parse its markup and stylesheet.
    pub fn from_config(config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        let template = Arc::new(Fragment::parse(&config.markup)?);
        let style_sheet = Arc::new(StyleSheet::parse(&config.css)?);
        Ok(Self {
            config,
            template,
            style_sheet,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.config.tag_name
    }

    #[must_use]
    pub fn observed_attributes(&self) -> &[String] {
        std::slice::from_ref(&self.config.observed_attribute)
    }

    #[must_use]
    pub fn template(&self) -> &Arc<Fragment> {
        &self.template
    }

    #[must_use]
    pub fn style_sheet(&self) -> &Arc<StyleSheet> {
        &self.style_sheet
    }
}

static COMPONENT: OnceLock<Arc<WidgetDefinition>> = OnceLock::new();
static COMPONENT_NAME: OnceLock<Arc<WidgetDefinition>> = OnceLock::new();
static REGISTRY: OnceLock<ElementRegistry<WidgetDefinition>> = OnceLock::new();

/// Shared definition of a built-in preset, parsed on first call.
pub fn shared(preset: Preset) -> Result<Arc<WidgetDefinition>> {
    let cell = match preset {
        Preset::Component => &COMPONENT,
        Preset::ComponentName => &COMPONENT_NAME,
    };
    if let Some(definition) = cell.get() {
        return Ok(Arc::clone(definition));
    }
    let parsed = Arc::new(WidgetDefinition::from_config(preset.config())?);
    Ok(Arc::clone(cell.get_or_init(|| parsed)))
}

/// The process-wide element registry.
pub fn registry() -> &'static ElementRegistry<WidgetDefinition> {
    REGISTRY.get_or_init(ElementRegistry::new)
}

/// Register `definition` in the process-wide registry under its tag name.
pub fn define(definition: Arc<WidgetDefinition>) -> Result<Registration> {
    let tag = definition.tag_name().to_string();
    Ok(registry().define(&tag, definition)?)
}

/// Register a built-in preset in the process-wide registry.
pub fn define_preset(preset: Preset) -> Result<Registration> {
    define(shared(preset)?)
}
