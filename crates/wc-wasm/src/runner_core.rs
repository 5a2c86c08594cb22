//! Platform-independent element runner.
//!
//! [`RunnerCore`] wraps one [`WidgetComponent`] over a [`MemoryHost`] and
//! exposes the calls a JS custom-element shim forwards: lifecycle hooks,
//! clicks, and read-back of the serialized shadow content, stylesheet text,
//! emitted events, and log lines. The wasm module is a thin shell over it.

use wc_core::{MemoryHost, Selector, UiHost};
use wc_widget::{AttributeChange, Preset, Result, WidgetComponent, WidgetError, create, define_preset};

pub struct RunnerCore {
    widget: WidgetComponent<MemoryHost>,
}

impl RunnerCore {
    /// Define the built-in presets (idempotent) and construct an instance
    /// of `tag`.
    pub fn new(tag: &str) -> Result<Self> {
        for preset in Preset::ALL {
            define_preset(preset)?;
        }
        Ok(Self {
            widget: create(tag, MemoryHost::new())?,
        })
    }

    /// Attribute names the shim lists in `observedAttributes`.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.widget.definition().observed_attributes().to_vec()
    }

    pub fn connected(&mut self) -> Result<()> {
        self.widget.connected()
    }

    pub fn disconnected(&mut self) {
        self.widget.disconnected();
    }

    pub fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> AttributeChange {
        self.widget.attribute_changed(name, old, new)
    }

    pub fn adopted(&mut self) {
        self.widget.adopted();
    }

    /// Click the first element matching `selector`. Returns handlers run.
    pub fn click(&mut self, selector: &str) -> Result<usize> {
        let parsed = Selector::parse(selector)?;
        let node = self
            .widget
            .host()
            .query(&parsed)
            .ok_or_else(|| WidgetError::not_found(selector))?;
        self.widget.dispatch(wc_core::DomEvent::click(node))
    }

    /// Shadow root content for `shadowRoot.innerHTML`.
    pub fn shadow_html(&self) -> String {
        self.widget.host().to_html()
    }

    /// Text for `CSSStyleSheet.replaceSync`.
    pub fn style_text(&self) -> String {
        self.widget
            .host()
            .adopted_style_sheets()
            .iter()
            .map(|sheet| sheet.css_text())
            .collect()
    }

    /// Emitted events as a JSON array, for re-dispatch on the real element.
    pub fn take_emitted_json(&mut self) -> String {
        let events = self.widget.take_emitted();
        serde_json::to_string(&events).unwrap_or_else(|err| {
            tracing::warn!(message = "runner.emitted.serialize_failed", error = %err);
            "[]".to_string()
        })
    }

    pub fn take_logs(&mut self) -> Vec<String> {
        self.widget.take_logs()
    }

    pub fn is_connected(&self) -> bool {
        self.widget.is_connected()
    }
}
