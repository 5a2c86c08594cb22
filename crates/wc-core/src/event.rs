#![forbid(unsafe_code)]

//! DOM-style events routed between a host and a widget.

use serde::{Deserialize, Serialize};

use crate::host::NodeId;

/// Event type of pointer clicks.
pub const CLICK: &str = "click";

/// Where an event is dispatched: the widget's own host element, or a node
/// inside its isolated root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    Host,
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomEvent {
    pub event_type: String,
    pub target: EventTarget,
    pub bubbles: bool,
    /// Crosses the isolation boundary when bubbling.
    pub composed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl DomEvent {
    /// A user click on `node`. Clicks bubble and are composed.
    #[must_use]
    pub fn click(node: NodeId) -> Self {
        Self {
            event_type: CLICK.to_string(),
            target: EventTarget::Node(node),
            bubbles: true,
            composed: true,
            detail: None,
        }
    }

    /// A custom event dispatched on the host element.
    #[must_use]
    pub fn custom(event_type: &str, detail: serde_json::Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: EventTarget::Host,
            bubbles: false,
            composed: false,
            detail: Some(detail),
        }
    }

    #[must_use]
    pub fn bubbling(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    #[must_use]
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Whether ancestors outside the widget observe this event.
    #[must_use]
    pub fn escapes_host(&self) -> bool {
        self.bubbles && (self.composed || self.target == EventTarget::Host)
    }
}
