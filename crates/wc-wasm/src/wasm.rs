//! `wasm-bindgen` exports.
//!
//! A JS shim defines the custom element and forwards each callback:
//!
//! ```js
//! class WcComponent extends HTMLElement {
//!   static observedAttributes = new WidgetElement("wc-component").observedAttributes();
//!   constructor() { super(); this.attachShadow({ mode: "open" }); this.core = new WidgetElement("wc-component"); }
//!   connectedCallback() { this.core.connected(); this.sync(); }
//!   disconnectedCallback() { this.core.disconnected(); this.sync(); }
//!   sync() {
//!     for (const e of JSON.parse(this.core.takeEmitted())) this.dispatchEvent(new CustomEvent(e.event_type, { bubbles: e.bubbles, composed: e.composed, detail: e.detail }));
//!     for (const line of this.core.takeLogs()) console.debug(line);
//!   }
//! }
//! ```
//!
//! `sync` drains both queues after every callback; undrained entries beyond
//! the widget's buffer capacity are dropped oldest first.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::runner_core::RunnerCore;

fn to_js(err: wc_widget::WidgetError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WidgetElement {
    core: RunnerCore,
}

#[wasm_bindgen]
impl WidgetElement {
    #[wasm_bindgen(constructor)]
    pub fn new(tag: &str) -> Result<WidgetElement, JsValue> {
        RunnerCore::new(tag).map(|core| Self { core }).map_err(to_js)
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes(&self) -> Array {
        self.core
            .observed_attributes()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    pub fn connected(&mut self) -> Result<(), JsValue> {
        self.core.connected().map_err(to_js)
    }

    pub fn disconnected(&mut self) {
        self.core.disconnected();
    }

    /// Returns true when the value was recorded.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<String>,
        new: Option<String>,
    ) -> bool {
        !matches!(
            self.core
                .attribute_changed(name, old.as_deref(), new.as_deref()),
            wc_widget::AttributeChange::Unchanged | wc_widget::AttributeChange::Unobserved
        )
    }

    pub fn adopted(&mut self) {
        self.core.adopted();
    }

    /// Click the element matching `selector`; returns handlers run.
    pub fn click(&mut self, selector: &str) -> Result<u32, JsValue> {
        self.core
            .click(selector)
            .map(|handled| u32::try_from(handled).unwrap_or(u32::MAX))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = shadowHtml)]
    pub fn shadow_html(&self) -> String {
        self.core.shadow_html()
    }

    #[wasm_bindgen(js_name = styleText)]
    pub fn style_text(&self) -> String {
        self.core.style_text()
    }

    #[wasm_bindgen(js_name = takeEmitted)]
    pub fn take_emitted(&mut self) -> String {
        self.core.take_emitted_json()
    }

    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        self.core
            .take_logs()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.core.is_connected()
    }
}
