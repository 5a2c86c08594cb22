#![forbid(unsafe_code)]

//! Core: host abstraction, markup fragments, stylesheets, events, and the
//! element registry shared by every shadow widget.

pub mod error;
pub mod event;
pub mod host;
pub mod memory_host;
pub mod registry;
pub mod selector;
pub mod style;
pub mod template;

pub use error::{RegistryError, SelectorError, StyleError, TemplateError};
pub use event::{DomEvent, EventTarget};
pub use host::{HandlerId, ListenerKey, NodeId, UiHost};
pub use memory_host::MemoryHost;
pub use registry::{ElementRegistry, Registration, validate_tag_name};
pub use selector::Selector;
pub use style::{StyleRule, StyleSheet};
pub use template::{Fragment, TemplateNode};
