use regex::Regex;
use wc_core::{MemoryHost, Registration, UiHost};
use wc_widget::bridge::event_detail;
use wc_widget::{
    AttributeChange, CUSTOM_EVENT, LifecycleState, Preset, WidgetComponent, create,
    define_preset, registry, shared,
};

fn mounted(preset: Preset) -> WidgetComponent<MemoryHost> {
    let mut widget = WidgetComponent::new(shared(preset).unwrap(), MemoryHost::new());
    widget.connected().unwrap();
    widget
}

fn custom_events_received(logs: &[String]) -> usize {
    logs.iter()
        .filter(|line| line.starts_with("custom_event received"))
        .count()
}

#[test]
fn mounted_widget_resolves_both_nodes() {
    for preset in Preset::ALL {
        let widget = mounted(preset);
        let message = widget.message_node().expect("message node cached");
        let button = widget.button_node().expect("button node cached");
        assert!(widget.host().contains(message));
        assert!(widget.host().contains(button));
    }
}

#[test]
fn registering_twice_keeps_one_definition() {
    let first = define_preset(Preset::Component).unwrap();
    let second = define_preset(Preset::Component).unwrap();
    assert!(matches!(
        first,
        Registration::Defined | Registration::AlreadyDefined
    ));
    assert_eq!(second, Registration::AlreadyDefined);
    assert!(registry().is_defined("wc-component"));

    let widget = create("wc-component", MemoryHost::new()).unwrap();
    assert_eq!(widget.tag_name(), "wc-component");
    assert!(create("wc-undefined", MemoryHost::new()).is_err());
}

#[test]
fn click_updates_text_with_time() {
    let mut widget = mounted(Preset::Component);
    widget.click().unwrap();
    let pattern = Regex::new(r"^EVENTO DISPARADO: TIPO CLICK \d{2}:\d{2}hs$").unwrap();
    let text = widget.message_text().unwrap();
    assert!(pattern.is_match(&text), "unexpected text: {text}");
}

#[test]
fn one_click_is_observed_once_by_own_listener() {
    let mut widget = mounted(Preset::ComponentName);
    widget.take_logs();
    widget.click().unwrap();

    assert_eq!(custom_events_received(&widget.take_logs()), 1);
    let custom: Vec<_> = widget
        .take_emitted()
        .into_iter()
        .filter(|event| event.event_type == CUSTOM_EVENT)
        .collect();
    assert_eq!(custom.len(), 1);
    assert!(custom[0].bubbles && custom[0].composed);
    assert_eq!(event_detail(&custom[0]).unwrap().origin, "click interno");
}

#[test]
fn equal_attribute_values_change_nothing() {
    let mut widget = mounted(Preset::Component);
    widget.attribute_changed("titulo", None, Some("Olá"));
    let html_before = widget.host().to_html();
    let logs_before = widget.take_logs().len();

    assert_eq!(
        widget.attribute_changed("titulo", Some("Olá"), Some("Olá")),
        AttributeChange::Unchanged
    );
    assert_eq!(widget.attribute("titulo"), Some("Olá"));
    assert_eq!(widget.host().to_html(), html_before);
    assert!(widget.take_logs().is_empty());
    assert!(logs_before > 0);
}

#[test]
fn unmount_before_mount_is_safe() {
    let mut widget = WidgetComponent::new(shared(Preset::Component).unwrap(), MemoryHost::new());
    widget.disconnected();
    widget.disconnected();
    assert_eq!(widget.state(), LifecycleState::Disconnected);
    assert_eq!(widget.host().listener_count(), 0);
}

#[test]
fn unmounted_widget_ignores_clicks() {
    let mut widget = mounted(Preset::Component);
    widget.disconnected();
    assert_eq!(widget.host().listener_count(), 0);
    assert_eq!(widget.click().unwrap(), 0);
    assert_eq!(widget.message_text().as_deref(), Some(""));
    assert_eq!(custom_events_received(&widget.take_logs()), 0);
}

#[test]
fn remount_recaches_and_fires_once_per_click() {
    let mut widget = mounted(Preset::ComponentName);
    let first_button = widget.button_node().unwrap();
    widget.disconnected();
    widget.connected().unwrap();

    let second_button = widget.button_node().unwrap();
    assert_ne!(first_button, second_button);
    assert!(!widget.host().contains(first_button));
    assert_eq!(widget.host().listener_count(), 2);

    widget.take_logs();
    assert_eq!(widget.click().unwrap(), 1);
    assert_eq!(custom_events_received(&widget.take_logs()), 1);
}

#[test]
fn double_mount_does_not_duplicate_handlers() {
    let mut widget = mounted(Preset::Component);
    widget.connected().unwrap();
    assert_eq!(widget.host().listener_count(), 2);
    assert_eq!(widget.host().top_level_tags(), vec!["h1", "button", "br", "span"]);

    widget.take_logs();
    widget.click().unwrap();
    assert_eq!(custom_events_received(&widget.take_logs()), 1);
}

#[test]
fn instances_share_stylesheet_but_not_nodes() {
    let mut first = mounted(Preset::Component);
    let second = mounted(Preset::Component);
    assert!(std::sync::Arc::ptr_eq(
        &first.host().adopted_style_sheets()[0],
        &second.host().adopted_style_sheets()[0]
    ));

    first.click().unwrap();
    assert_ne!(first.message_text(), second.message_text());
    assert_eq!(second.message_text().as_deref(), Some(""));
}
