#![forbid(unsafe_code)]

//! Click → text update → `custom-event` bridge.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use wc_core::DomEvent;

/// Name of the event the widget both emits and listens for.
pub const CUSTOM_EVENT: &str = "custom-event";

/// Payload carried by `custom-event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    pub origin: String,
}

/// `HH:MM` in 24-hour form followed by `hs`.
#[must_use]
pub fn format_click_time(time: NaiveTime) -> String {
    format!("{}hs", time.format("%H:%M"))
}

/// Text written into the display node after a click.
#[must_use]
pub fn click_message(prefix: &str, time: NaiveTime) -> String {
    format!("{prefix} {}", format_click_time(time))
}

/// The bubbling, composed `custom-event` dispatched on the host element.
#[must_use]
pub fn custom_event(origin: &str) -> DomEvent {
    let detail = serde_json::json!({ "origin": origin });
    DomEvent::custom(CUSTOM_EVENT, detail)
        .bubbling(true)
        .composed(true)
}

/// Decode the detail of a `custom-event`, if it has the expected shape.
#[must_use]
pub fn event_detail(event: &DomEvent) -> Option<EventDetail> {
    event
        .detail
        .as_ref()
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
