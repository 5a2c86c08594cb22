#![forbid(unsafe_code)]

//! Shadow widget: lifecycle controller and click/custom-event bridge.
//!
//! A widget is registered under a custom tag, constructed with a
//! [`UiHost`](wc_core::UiHost) that owns its isolated root, and driven by
//! the host's lifecycle hooks.
//!
//! ```
//! use wc_core::MemoryHost;
//! use wc_widget::{Preset, create, define_preset};
//!
//! define_preset(Preset::Component).unwrap();
//! let mut widget = create("wc-component", MemoryHost::new()).unwrap();
//! widget.connected().unwrap();
//! widget.click().unwrap();
//! assert!(widget.message_text().unwrap().ends_with("hs"));
//! widget.disconnected();
//! ```

pub mod bridge;
pub mod clock;
pub mod component;
pub mod config;
pub mod definition;
pub mod error;

pub use bridge::{CUSTOM_EVENT, EventDetail};
pub use clock::{Clock, FixedClock, SystemClock};
pub use component::{AttributeChange, LifecycleState, WidgetComponent};
pub use config::{Preset, WidgetConfig};
pub use definition::{WidgetDefinition, define, define_preset, registry, shared};
pub use error::{Result, WidgetError};

/// Construct an instance of a tag defined in the process-wide registry.
pub fn create<H: wc_core::UiHost>(tag: &str, host: H) -> Result<WidgetComponent<H>> {
    let definition = registry()
        .get(tag)
        .ok_or_else(|| WidgetError::UndefinedTag {
            tag: tag.to_string(),
        })?;
    Ok(WidgetComponent::new(definition, host))
}
