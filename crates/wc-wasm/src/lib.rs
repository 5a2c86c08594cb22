#![forbid(unsafe_code)]

//! WASM element runner for shadow widgets.
//!
//! This crate provides [`WidgetElement`], a `wasm-bindgen`-exported struct
//! that wraps one widget instance and exposes its lifecycle hooks to a JS
//! custom-element shim for host-driven execution. The shim mirrors
//! `shadowHtml()` into its shadow root, adopts `styleText()` through a
//! constructed stylesheet, and re-dispatches `takeEmitted()` events on the
//! real element.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::WidgetElement;

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;

#[cfg(test)]
mod tests {
    use crate::runner_core::RunnerCore;
    use pretty_assertions::assert_eq;
    use wc_widget::AttributeChange;

    fn emitted_types(json: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(json).expect("emitted json");
        value
            .as_array()
            .map(|events| {
                events
                    .iter()
                    .filter_map(|event| event.get("event_type")?.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn runner_core_creates_each_preset() {
        for (tag, attribute) in [("wc-component", "titulo"), ("wc-componentname", "attribute")] {
            let core = RunnerCore::new(tag).unwrap();
            assert_eq!(core.observed_attributes(), vec![attribute.to_string()]);
            assert!(!core.is_connected());
        }
    }

    #[test]
    fn runner_core_unknown_tag_fails() {
        assert!(RunnerCore::new("wc-missing").is_err());
    }

    #[test]
    fn runner_core_connected_renders_shadow_html_and_style() {
        let mut core = RunnerCore::new("wc-component").unwrap();
        assert_eq!(core.shadow_html(), "");
        core.connected().unwrap();
        assert_eq!(
            core.shadow_html(),
            r#"<h1>MEU COMPONENT</h1><button id="action-btn" type="button">ACTION</button><br><span></span>"#
        );
        assert!(core.style_text().contains(":host"));
        assert!(core.style_text().contains("button"));
    }

    #[test]
    fn runner_core_click_emits_custom_event_json() {
        let mut core = RunnerCore::new("wc-componentname").unwrap();
        core.connected().unwrap();
        assert_eq!(core.click("#action-btn").unwrap(), 1);
        assert!(core.shadow_html().contains("EVENTO DISPARADO: TIPO CLICK"));
        assert_eq!(
            emitted_types(&core.take_emitted_json()),
            vec!["custom-event".to_string(), "click".to_string()]
        );
        assert_eq!(emitted_types(&core.take_emitted_json()), Vec::<String>::new());
    }

    #[test]
    fn runner_core_click_on_missing_selector_fails() {
        let mut core = RunnerCore::new("wc-component").unwrap();
        assert!(core.click("#action-btn").is_err());
        core.connected().unwrap();
        assert!(core.click("div span").is_err());
        assert!(core.click("#nope").is_err());
    }

    #[test]
    fn runner_core_lifecycle_logs_are_drained() {
        let mut core = RunnerCore::new("wc-component").unwrap();
        core.connected().unwrap();
        assert_eq!(
            core.attribute_changed("titulo", None, Some("Olá")),
            AttributeChange::RecordedConnected
        );
        core.adopted();
        core.disconnected();

        let logs = core.take_logs();
        assert!(logs[0].starts_with("lifecycle=connected"));
        assert!(logs.iter().any(|line| line.contains("attribute_changed name=titulo")));
        assert!(logs.last().is_some_and(|line| line.starts_with("lifecycle=disconnected")));
        assert!(core.take_logs().is_empty());
    }
}
