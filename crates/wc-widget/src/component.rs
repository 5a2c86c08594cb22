#![forbid(unsafe_code)]

//! The widget lifecycle controller.
//!
//! [`WidgetComponent`] owns its host handle (the isolated root) and reacts
//! to the four lifecycle hooks a hosting environment fires:
//!
//! - [`connected`](WidgetComponent::connected): render the shared template
//!   and stylesheet, cache the display and button nodes, attach listeners.
//! - [`disconnected`](WidgetComponent::disconnected): detach listeners.
//! - [`attribute_changed`](WidgetComponent::attribute_changed): record an
//!   observed attribute.
//! - [`adopted`](WidgetComponent::adopted): moved to another document.
//!
//! Events are host-driven: the owner calls
//! [`dispatch`](WidgetComponent::dispatch) and the component runs whatever
//! handlers its host has registered for the target. Events that leave the
//! element are queued for ancestors and drained with
//! [`take_emitted`](WidgetComponent::take_emitted). The emitted queue and
//! the diagnostic log each keep at most [`BUFFER_CAPACITY`] entries; the
//! oldest are dropped when the owner does not drain them.
//!
//! # Invariants
//!
//! 1. Cached node references are set only by a successful `connected` and
//!    are read only by handlers, which are attached after caching. A failed
//!    `connected` leaves them unset.
//! 2. Listener keys are stable, so re-mounting never duplicates handlers.
//! 3. `disconnected` never fails, even before the first `connected`.

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;
use wc_core::event::CLICK;
use wc_core::{DomEvent, EventTarget, HandlerId, ListenerKey, NodeId, Selector, UiHost};

use crate::bridge::{self, CUSTOM_EVENT};
use crate::clock::{Clock, SystemClock};
use crate::definition::WidgetDefinition;
use crate::error::{Result, WidgetError};

/// Selector of the text-display node.
pub const MESSAGE_SELECTOR: &str = "span";
/// Selector of the action button.
pub const BUTTON_SELECTOR: &str = "#action-btn";
/// Maximum number of undrained emitted events, and of undrained log lines.
pub const BUFFER_CAPACITY: usize = 256;

const BUTTON_CLICK_HANDLER: HandlerId = HandlerId::new("widget.button_click");
const CUSTOM_EVENT_HANDLER: HandlerId = HandlerId::new("widget.custom_event");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Created,
    Connected,
    Disconnected,
}

/// Result of an attribute change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeChange {
    /// Old and new values are equal; nothing happened.
    Unchanged,
    /// The attribute is not observed by this widget.
    Unobserved,
    /// The value was recorded while disconnected.
    Recorded,
    /// The value was recorded while connected; parts depending on it may
    /// refresh.
    RecordedConnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CachedNodes {
    message: NodeId,
    button: NodeId,
}

pub struct WidgetComponent<H, C = SystemClock> {
    definition: Arc<WidgetDefinition>,
    host: H,
    clock: C,
    state: LifecycleState,
    nodes: Option<CachedNodes>,
    attributes: AHashMap<String, String>,
    emitted: VecDeque<DomEvent>,
    logs: VecDeque<String>,
}

impl<H: UiHost> WidgetComponent<H> {
    /// Construct an instance reading the system clock. Attaches the
    /// isolated root.
    pub fn new(definition: Arc<WidgetDefinition>, host: H) -> Self {
        Self::with_clock(definition, host, SystemClock)
    }
}

impl<H: UiHost, C: Clock> WidgetComponent<H, C> {
    pub fn with_clock(definition: Arc<WidgetDefinition>, mut host: H, clock: C) -> Self {
        host.attach_root();
        Self {
            definition,
            host,
            clock,
            state: LifecycleState::Created,
            nodes: None,
            attributes: AHashMap::new(),
            emitted: VecDeque::new(),
            logs: VecDeque::new(),
        }
    }

    // --- lifecycle hooks ---

    /// Mount: render, cache node references, attach listeners.
    pub fn connected(&mut self) -> Result<()> {
        tracing::info!(message = "widget.connected", tag = self.tag_name());
        self.log(format!("lifecycle=connected tag={}", self.tag_name()));
        self.state = LifecycleState::Connected;
        self.nodes = None;

        self.render();
        self.cache_nodes()?;
        self.add_listeners();
        Ok(())
    }

    /// Unmount: detach listeners. Never fails.
    pub fn disconnected(&mut self) {
        tracing::info!(message = "widget.disconnected", tag = self.tag_name());
        self.log(format!("lifecycle=disconnected tag={}", self.tag_name()));
        self.remove_listeners();
        self.state = LifecycleState::Disconnected;
    }

    /// An attribute changed from `old` to `new` (`None` = absent).
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> AttributeChange {
        if old == new {
            return AttributeChange::Unchanged;
        }
        if !self.observes(name) {
            return AttributeChange::Unobserved;
        }

        tracing::info!(
            message = "widget.attribute_changed",
            tag = self.tag_name(),
            name,
            old = old.unwrap_or_default(),
            new = new.unwrap_or_default()
        );
        self.log(format!(
            "lifecycle=attribute_changed name={name} old={old:?} new={new:?}"
        ));

        match new {
            Some(value) => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                self.attributes.remove(name);
            }
        }

        if self.is_connected() {
            // Partial re-render point: nothing in the template reads
            // attributes yet.
            AttributeChange::RecordedConnected
        } else {
            AttributeChange::Recorded
        }
    }

    /// Moved to a new hosting document.
    pub fn adopted(&mut self) {
        tracing::info!(message = "widget.adopted", tag = self.tag_name());
        self.log(format!("lifecycle=adopted tag={}", self.tag_name()));
    }

    // --- events ---

    /// Deliver `event` to the handlers registered for its target, then to
    /// the host element's handlers if it bubbles out of the isolated root.
    /// Returns the number of handlers run.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<usize> {
        let mut handled = self.run_handlers(event.target, &event)?;
        if matches!(event.target, EventTarget::Node(_)) && event.bubbles && event.composed {
            handled += self.run_handlers(EventTarget::Host, &event)?;
        }
        if event.escapes_host() {
            push_bounded(&mut self.emitted, event);
        }
        Ok(handled)
    }

    /// Simulate a user click on the action button.
    pub fn click(&mut self) -> Result<usize> {
        let selector = Selector::parse(BUTTON_SELECTOR)?;
        let button = self
            .host
            .query(&selector)
            .ok_or_else(|| WidgetError::not_found(BUTTON_SELECTOR))?;
        self.dispatch(DomEvent::click(button))
    }

    /// Drain events that left the element, in the order ancestors saw them.
    pub fn take_emitted(&mut self) -> Vec<DomEvent> {
        self.emitted.drain(..).collect()
    }

    /// Drain diagnostic log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }

    // --- accessors ---

    #[must_use]
    pub fn definition(&self) -> &Arc<WidgetDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.definition.tag_name()
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == LifecycleState::Connected
    }

    #[must_use]
    pub fn observes(&self, name: &str) -> bool {
        self.definition
            .observed_attributes()
            .iter()
            .any(|observed| observed == name)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Cached text-display node, if mounted.
    #[must_use]
    pub fn message_node(&self) -> Option<NodeId> {
        self.nodes.map(|nodes| nodes.message)
    }

    /// Cached button node, if mounted.
    #[must_use]
    pub fn button_node(&self) -> Option<NodeId> {
        self.nodes.map(|nodes| nodes.button)
    }

    /// Current text of the display node.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        self.host.text(self.message_node()?)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // --- private helpers ---

    fn render(&mut self) {
        if !self.host.has_root() {
            return;
        }
        self.host
            .adopt_style_sheets(vec![Arc::clone(self.definition.style_sheet())]);
        self.host.clear();
        let template = Arc::clone(self.definition.template());
        self.host.append_fragment(&template);
    }

    fn element(&self, selector: &str) -> Result<NodeId> {
        if !self.host.has_root() {
            return Err(WidgetError::NotInitialized);
        }
        let parsed = Selector::parse(selector)?;
        self.host
            .query(&parsed)
            .ok_or_else(|| WidgetError::not_found(selector))
    }

    fn cache_nodes(&mut self) -> Result<()> {
        let message = self.element(MESSAGE_SELECTOR)?;
        let button = self.element(BUTTON_SELECTOR)?;
        self.nodes = Some(CachedNodes { message, button });
        Ok(())
    }

    fn add_listeners(&mut self) {
        if let Some(nodes) = self.nodes {
            self.host.add_listener(ListenerKey::new(
                EventTarget::Node(nodes.button),
                CLICK,
                BUTTON_CLICK_HANDLER,
            ));
        }
        self.host.add_listener(ListenerKey::new(
            EventTarget::Host,
            CUSTOM_EVENT,
            CUSTOM_EVENT_HANDLER,
        ));
    }

    fn remove_listeners(&mut self) {
        if let Some(nodes) = self.nodes {
            self.host.remove_listener(&ListenerKey::new(
                EventTarget::Node(nodes.button),
                CLICK,
                BUTTON_CLICK_HANDLER,
            ));
        }
        self.host.remove_listener(&ListenerKey::new(
            EventTarget::Host,
            CUSTOM_EVENT,
            CUSTOM_EVENT_HANDLER,
        ));
    }

    fn run_handlers(&mut self, target: EventTarget, event: &DomEvent) -> Result<usize> {
        let handlers = self.host.listeners(target, &event.event_type);
        for handler in &handlers {
            match *handler {
                BUTTON_CLICK_HANDLER => self.handle_button_click(event)?,
                CUSTOM_EVENT_HANDLER => self.handle_custom_event(event),
                other => tracing::warn!(message = "widget.unknown_handler", handler = other.name()),
            }
        }
        Ok(handlers.len())
    }

    fn handle_button_click(&mut self, event: &DomEvent) -> Result<()> {
        let Some(nodes) = self.nodes else {
            return Err(WidgetError::NotInitialized);
        };
        let text = bridge::click_message(&self.definition.config().message_prefix, self.clock.now());
        if !self.host.set_text(nodes.message, &text) {
            return Err(WidgetError::not_found(MESSAGE_SELECTOR));
        }
        tracing::debug!(
            message = "widget.click",
            tag = self.tag_name(),
            target = ?event.target,
            text = %text
        );
        self.log(format!("click text={text:?}"));

        let origin = self.definition.config().event_origin.clone();
        self.dispatch(bridge::custom_event(&origin))?;
        Ok(())
    }

    fn handle_custom_event(&mut self, event: &DomEvent) {
        let origin = bridge::event_detail(event).map(|detail| detail.origin);
        tracing::info!(
            message = "widget.custom_event",
            tag = self.tag_name(),
            origin = origin.as_deref().unwrap_or_default()
        );
        self.log(format!(
            "custom_event received origin={}",
            origin.as_deref().unwrap_or("<none>")
        ));
    }

    fn log(&mut self, line: String) {
        push_bounded(&mut self.logs, line);
    }
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, item: T) {
    if buffer.len() == BUFFER_CAPACITY {
        buffer.pop_front();
    }
    buffer.push_back(item);
}

impl<H: std::fmt::Debug, C> std::fmt::Debug for WidgetComponent<H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetComponent")
            .field("tag", &self.definition.tag_name())
            .field("state", &self.state)
            .field("nodes", &self.nodes)
            .field("attributes", &self.attributes)
            .field("host", &self.host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{Preset, WidgetConfig};
    use crate::definition::shared;
    use pretty_assertions::assert_eq;
    use wc_core::MemoryHost;

    fn widget() -> WidgetComponent<MemoryHost, FixedClock> {
        let definition = shared(Preset::ComponentName).unwrap();
        WidgetComponent::with_clock(definition, MemoryHost::new(), FixedClock::at(14, 7))
    }

    /// A host whose isolated root can never be attached.
    #[derive(Debug, Default)]
    struct RootlessHost(MemoryHost);

    impl UiHost for RootlessHost {
        fn attach_root(&mut self) {}
        fn has_root(&self) -> bool {
            self.0.has_root()
        }
        fn clear(&mut self) {
            self.0.clear();
        }
        fn append_fragment(&mut self, fragment: &wc_core::Fragment) {
            self.0.append_fragment(fragment);
        }
        fn adopt_style_sheets(&mut self, sheets: Vec<Arc<wc_core::StyleSheet>>) {
            self.0.adopt_style_sheets(sheets);
        }
        fn adopted_style_sheets(&self) -> &[Arc<wc_core::StyleSheet>] {
            self.0.adopted_style_sheets()
        }
        fn query(&self, selector: &Selector) -> Option<NodeId> {
            self.0.query(selector)
        }
        fn contains(&self, node: NodeId) -> bool {
            self.0.contains(node)
        }
        fn set_text(&mut self, node: NodeId, text: &str) -> bool {
            self.0.set_text(node, text)
        }
        fn text(&self, node: NodeId) -> Option<String> {
            self.0.text(node)
        }
        fn add_listener(&mut self, key: ListenerKey) -> bool {
            self.0.add_listener(key)
        }
        fn remove_listener(&mut self, key: &ListenerKey) -> bool {
            self.0.remove_listener(key)
        }
        fn listeners(&self, target: EventTarget, event_type: &str) -> Vec<HandlerId> {
            self.0.listeners(target, event_type)
        }
    }

    #[test]
    fn connected_renders_and_caches_nodes() {
        let mut widget = widget();
        widget.connected().unwrap();
        assert!(widget.is_connected());
        let message = widget.message_node().unwrap();
        let button = widget.button_node().unwrap();
        assert_eq!(widget.host().tag_of(message), Some("span"));
        assert_eq!(widget.host().tag_of(button), Some("button"));
        assert_eq!(widget.host().adopted_style_sheets().len(), 1);
        assert_eq!(widget.host().listener_count(), 2);
    }

    #[test]
    fn click_writes_time_and_emits_custom_event() {
        let mut widget = widget();
        widget.connected().unwrap();
        let handled = widget.click().unwrap();
        assert_eq!(handled, 1);
        assert_eq!(
            widget.message_text().as_deref(),
            Some("EVENTO DISPARADO: TIPO CLICK 14:07hs")
        );

        let emitted = widget.take_emitted();
        let types: Vec<_> = emitted.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["custom-event", "click"]);
        assert_eq!(
            bridge::event_detail(&emitted[0]).unwrap().origin,
            "click interno"
        );
    }

    #[test]
    fn mount_without_root_reports_not_initialized() {
        let definition = shared(Preset::Component).unwrap();
        let mut widget = WidgetComponent::new(definition, RootlessHost::default());
        assert!(matches!(widget.connected(), Err(WidgetError::NotInitialized)));
        assert_eq!(widget.message_node(), None);
        widget.disconnected();
    }

    #[test]
    fn missing_button_names_selector() {
        let config = WidgetConfig {
            markup: "<h1>x</h1><span></span>".to_string(),
            ..Preset::ComponentName.config()
        };
        let definition = Arc::new(WidgetDefinition::from_config(config).unwrap());
        let mut widget = WidgetComponent::new(definition, MemoryHost::new());
        match widget.connected() {
            Err(WidgetError::ElementNotFound { selector }) => assert_eq!(selector, "#action-btn"),
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
        assert_eq!(widget.host().listener_count(), 0);
    }

    #[test]
    fn missing_display_names_selector() {
        let config = WidgetConfig {
            markup: "<h1>x</h1><button id=\"action-btn\">go</button>".to_string(),
            ..Preset::ComponentName.config()
        };
        let definition = Arc::new(WidgetDefinition::from_config(config).unwrap());
        let mut widget = WidgetComponent::new(definition, MemoryHost::new());
        match widget.connected() {
            Err(WidgetError::ElementNotFound { selector }) => {
                assert_eq!(selector, MESSAGE_SELECTOR);
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
        assert_eq!(widget.message_node(), None);
        assert_eq!(widget.button_node(), None);
    }

    #[test]
    fn failed_remount_drops_previous_node_references() {
        let mut widget = widget();
        widget.connected().unwrap();
        assert!(widget.message_node().is_some());
        widget.disconnected();

        let definition = Arc::new(
            WidgetDefinition::from_config(WidgetConfig {
                markup: "<p>empty</p>".to_string(),
                ..Preset::ComponentName.config()
            })
            .unwrap(),
        );
        widget.definition = definition;
        assert!(matches!(
            widget.connected(),
            Err(WidgetError::ElementNotFound { .. })
        ));
        assert!(widget.is_connected());
        assert_eq!(widget.message_node(), None);
        assert_eq!(widget.button_node(), None);
        assert_eq!(widget.message_text(), None);
    }

    #[test]
    fn undrained_buffers_keep_only_the_newest_entries() {
        let mut widget = widget();
        widget.connected().unwrap();
        widget.take_logs();
        for _ in 0..BUFFER_CAPACITY {
            widget.click().unwrap();
        }
        let emitted = widget.take_emitted();
        assert_eq!(emitted.len(), BUFFER_CAPACITY);
        assert_eq!(emitted[0].event_type, CUSTOM_EVENT);
        assert_eq!(emitted.last().unwrap().event_type, CLICK);
        assert_eq!(widget.take_logs().len(), BUFFER_CAPACITY);

        widget.adopted();
        assert_eq!(widget.take_logs(), vec!["lifecycle=adopted tag=wc-componentname"]);
        assert!(widget.take_emitted().is_empty());
    }

    #[test]
    fn attribute_changes_are_recorded_and_equal_values_ignored() {
        let mut widget = widget();
        assert_eq!(
            widget.attribute_changed("attribute", None, Some("a")),
            AttributeChange::Recorded
        );
        widget.connected().unwrap();
        assert_eq!(
            widget.attribute_changed("attribute", Some("a"), Some("b")),
            AttributeChange::RecordedConnected
        );
        assert_eq!(widget.attribute("attribute"), Some("b"));
        assert_eq!(
            widget.attribute_changed("attribute", Some("b"), Some("b")),
            AttributeChange::Unchanged
        );
        assert_eq!(
            widget.attribute_changed("titulo", None, Some("x")),
            AttributeChange::Unobserved
        );
        assert_eq!(widget.attribute("titulo"), None);
        assert_eq!(
            widget.attribute_changed("attribute", Some("b"), None),
            AttributeChange::RecordedConnected
        );
        assert_eq!(widget.attribute("attribute"), None);
    }

    #[test]
    fn adopted_only_logs() {
        let mut widget = widget();
        widget.adopted();
        assert_eq!(widget.state(), LifecycleState::Created);
        assert_eq!(widget.take_logs(), vec!["lifecycle=adopted tag=wc-componentname"]);
    }
}
