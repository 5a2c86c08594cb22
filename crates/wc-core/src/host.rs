#![forbid(unsafe_code)]

//! The [`UiHost`] capability: an owned, opaque handle on a widget's
//! isolated subtree.
//!
//! A widget never talks to a concrete toolkit. It asks its host to attach
//! the isolated root, replace the root's content with a template copy,
//! adopt stylesheets, resolve selectors to [`NodeId`]s, write text, and
//! keep a listener table. Event delivery is host-driven: whoever owns the
//! host asks it which handlers are registered for a target and calls back
//! into the widget.
//!
//! # Invariants
//!
//! 1. `NodeId`s are never reused within one host; ids from a previous
//!    render resolve to nothing after [`UiHost::clear`].
//! 2. Listener registration is keyed by (target, event type, handler);
//!    registering the same key twice keeps one entry.
//! 3. Clearing the root drops listeners whose target node was removed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::event::EventTarget;
use crate::selector::Selector;
use crate::style::StyleSheet;
use crate::template::Fragment;

/// Identity of a node inside an isolated root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Stable identity of a handler, the counterpart of a function reference
/// passed to `addEventListener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(&'static str);

impl HandlerId {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    pub target: EventTarget,
    pub event_type: String,
    pub handler: HandlerId,
}

impl ListenerKey {
    #[must_use]
    pub fn new(target: EventTarget, event_type: &str, handler: HandlerId) -> Self {
        Self {
            target,
            event_type: event_type.to_string(),
            handler,
        }
    }
}

/// Capability a widget needs from its hosting toolkit.
pub trait UiHost {
    /// Allocate the isolated root. Calling it again keeps the existing root.
    fn attach_root(&mut self);

    fn has_root(&self) -> bool;

    /// Remove every node from the root. No-op without a root.
    fn clear(&mut self);

    /// Append a deep copy of `fragment` to the root. No-op without a root.
    fn append_fragment(&mut self, fragment: &Fragment);

    /// Replace the root's adopted stylesheets. No-op without a root.
    fn adopt_style_sheets(&mut self, sheets: Vec<Arc<StyleSheet>>);

    fn adopted_style_sheets(&self) -> &[Arc<StyleSheet>];

    /// First element in document order matching `selector`.
    fn query(&self, selector: &Selector) -> Option<NodeId>;

    /// Whether `node` is currently part of the root.
    fn contains(&self, node: NodeId) -> bool;

    /// Replace the children of `node` with a single text node.
    /// Returns false when `node` is not part of the root.
    fn set_text(&mut self, node: NodeId, text: &str) -> bool;

    /// Concatenated text content of `node`.
    fn text(&self, node: NodeId) -> Option<String>;

    /// Register a listener. Returns false if the key was already present.
    fn add_listener(&mut self, key: ListenerKey) -> bool;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_listener(&mut self, key: &ListenerKey) -> bool;

    /// Handlers registered for `target` and `event_type`, in registration
    /// order.
    fn listeners(&self, target: EventTarget, event_type: &str) -> Vec<HandlerId>;
}
