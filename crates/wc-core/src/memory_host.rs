#![forbid(unsafe_code)]

//! In-memory [`UiHost`] implementation.
//!
//! `MemoryHost` keeps the isolated root as an arena of nodes and serializes
//! it to HTML on demand, so a browser shim can mirror it into a real shadow
//! root and native tests can inspect it directly.

use std::fmt::Write as _;
use std::sync::Arc;

use ahash::AHashMap;

use crate::event::EventTarget;
use crate::host::{HandlerId, ListenerKey, NodeId, UiHost};
use crate::selector::Selector;
use crate::style::StyleSheet;
use crate::template::{Fragment, TemplateNode};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
}

#[derive(Debug, Default)]
struct ShadowRoot {
    children: Vec<NodeId>,
    nodes: AHashMap<NodeId, NodeData>,
    style_sheets: Vec<Arc<StyleSheet>>,
}

/// Arena-backed isolated root with a listener table.
#[derive(Debug, Default)]
pub struct MemoryHost {
    root: Option<ShadowRoot>,
    listeners: Vec<ListenerKey>,
    next_id: u32,
}

impl MemoryHost {
    /// A host without an isolated root; call [`UiHost::attach_root`] first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes (elements and text) currently in the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.nodes.len())
    }

    /// Total registered listeners across all targets.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_of(&self, node: NodeId) -> Option<&str> {
        match self.root.as_ref()?.nodes.get(&node)? {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    /// Tag names of the root's top-level elements.
    #[must_use]
    pub fn top_level_tags(&self) -> Vec<&str> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        root.children
            .iter()
            .filter_map(|id| match root.nodes.get(id) {
                Some(NodeData::Element { tag, .. }) => Some(tag.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize the root's content as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            for id in &root.children {
                write_node(root, *id, &mut out);
            }
        }
        out
    }

    fn alloc_id(&mut self) -> NodeId {
        self.next_id = self.next_id.wrapping_add(1);
        NodeId::new(self.next_id)
    }

    fn instantiate(&mut self, node: &TemplateNode) -> Option<NodeId> {
        let id = self.alloc_id();
        let data = match node {
            TemplateNode::Text(text) => NodeData::Text(text.clone()),
            TemplateNode::Element {
                tag,
                attributes,
                children,
            } => {
                let children = children
                    .iter()
                    .filter_map(|child| self.instantiate(child))
                    .collect();
                NodeData::Element {
                    tag: tag.clone(),
                    attributes: attributes.clone(),
                    children,
                }
            }
        };
        self.root.as_mut()?.nodes.insert(id, data);
        Some(id)
    }

    fn drop_detached_listeners(&mut self) {
        let root = self.root.as_ref();
        self.listeners.retain(|key| match key.target {
            EventTarget::Host => true,
            EventTarget::Node(node) => root.is_some_and(|root| root.nodes.contains_key(&node)),
        });
    }
}

impl UiHost for MemoryHost {
    fn attach_root(&mut self) {
        if self.root.is_none() {
            self.root = Some(ShadowRoot::default());
        }
    }

    fn has_root(&self) -> bool {
        self.root.is_some()
    }

    fn clear(&mut self) {
        if let Some(root) = &mut self.root {
            root.children.clear();
            root.nodes.clear();
        }
        self.drop_detached_listeners();
    }

    fn append_fragment(&mut self, fragment: &Fragment) {
        if self.root.is_none() {
            return;
        }
        let ids: Vec<NodeId> = fragment
            .nodes()
            .iter()
            .filter_map(|node| self.instantiate(node))
            .collect();
        if let Some(root) = &mut self.root {
            root.children.extend(ids);
        }
    }

    fn adopt_style_sheets(&mut self, sheets: Vec<Arc<StyleSheet>>) {
        if let Some(root) = &mut self.root {
            root.style_sheets = sheets;
        }
    }

    fn adopted_style_sheets(&self) -> &[Arc<StyleSheet>] {
        match &self.root {
            Some(root) => &root.style_sheets,
            None => &[],
        }
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        let root = self.root.as_ref()?;
        root.children
            .iter()
            .find_map(|id| find_in(root, *id, selector))
    }

    fn contains(&self, node: NodeId) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| root.nodes.contains_key(&node))
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        let old_children = match root.nodes.get(&node) {
            Some(NodeData::Element { children, .. }) => children.clone(),
            _ => return false,
        };
        let text_id = self.alloc_id();
        let Some(root) = &mut self.root else {
            return false;
        };
        let mut stack = old_children;
        while let Some(id) = stack.pop() {
            if let Some(NodeData::Element { children, .. }) = root.nodes.remove(&id) {
                stack.extend(children);
            }
        }
        root.nodes.insert(text_id, NodeData::Text(text.to_string()));
        if let Some(NodeData::Element { children, .. }) = root.nodes.get_mut(&node) {
            *children = vec![text_id];
        }
        self.drop_detached_listeners();
        true
    }

    fn text(&self, node: NodeId) -> Option<String> {
        let root = self.root.as_ref()?;
        root.nodes.contains_key(&node).then(|| {
            let mut out = String::new();
            collect_text(root, node, &mut out);
            out
        })
    }

    fn add_listener(&mut self, key: ListenerKey) -> bool {
        if self.listeners.contains(&key) {
            return false;
        }
        self.listeners.push(key);
        true
    }

    fn remove_listener(&mut self, key: &ListenerKey) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|existing| existing != key);
        self.listeners.len() != before
    }

    fn listeners(&self, target: EventTarget, event_type: &str) -> Vec<HandlerId> {
        self.listeners
            .iter()
            .filter(|key| key.target == target && key.event_type == event_type)
            .map(|key| key.handler)
            .collect()
    }
}

fn find_in(root: &ShadowRoot, id: NodeId, selector: &Selector) -> Option<NodeId> {
    match root.nodes.get(&id)? {
        NodeData::Element {
            tag,
            attributes,
            children,
        } => {
            if selector.matches(tag, attributes) {
                return Some(id);
            }
            children
                .iter()
                .find_map(|child| find_in(root, *child, selector))
        }
        NodeData::Text(_) => None,
    }
}

fn collect_text(root: &ShadowRoot, id: NodeId, out: &mut String) {
    match root.nodes.get(&id) {
        Some(NodeData::Text(text)) => out.push_str(text),
        Some(NodeData::Element { children, .. }) => {
            for child in children {
                collect_text(root, *child, out);
            }
        }
        None => {}
    }
}

fn write_node(root: &ShadowRoot, id: NodeId, out: &mut String) {
    match root.nodes.get(&id) {
        Some(NodeData::Text(text)) => {
            let _ = write!(out, "{}", v_htmlescape::escape(text));
        }
        Some(NodeData::Element {
            tag,
            attributes,
            children,
        }) => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                let _ = write!(out, " {name}=\"{}\"", v_htmlescape::escape(value));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            for child in children {
                write_node(root, *child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
        None => {}
    }
}
