//! Simulated host page.
//!
//! Plays the role a browser document plays for a custom element: defines
//! the tag, constructs an instance, fires lifecycle hooks, clicks the
//! button, and collects what ancestors would observe.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use wc_core::{DomEvent, MemoryHost, Registration};
use wc_widget::{Preset, WidgetConfig, WidgetDefinition, create, define, define_preset};

use crate::error::Result;

/// What the page does, in order: define, mount, set attributes, click,
/// optionally remount and click again, unmount.
#[derive(Debug, Clone)]
pub struct PageScript {
    pub preset: Preset,
    pub config: Option<PathBuf>,
    pub attributes: Vec<String>,
    pub clicks: u32,
    pub remount: bool,
    pub keep_mounted: bool,
}

impl Default for PageScript {
    fn default() -> Self {
        Self {
            preset: Preset::Component,
            config: None,
            attributes: Vec::new(),
            clicks: 1,
            remount: false,
            keep_mounted: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub tag: String,
    pub observed_attribute: String,
    pub registration: &'static str,
    pub html: String,
    pub style: String,
    pub message: Option<String>,
    pub attribute: Option<String>,
    pub connected: bool,
    pub emitted: Vec<DomEvent>,
    pub logs: Vec<String>,
}

pub fn run_page(script: &PageScript) -> Result<PageReport> {
    let (tag, registration) = match &script.config {
        Some(path) => {
            let definition = Arc::new(WidgetDefinition::from_config(WidgetConfig::load(path)?)?);
            let tag = definition.tag_name().to_string();
            (tag, define(definition)?)
        }
        None => (
            script.preset.tag_name().to_string(),
            define_preset(script.preset)?,
        ),
    };
    tracing::debug!(message = "page.define", tag = %tag, ?registration);

    let mut widget = create(&tag, MemoryHost::new())?;
    let observed = widget
        .definition()
        .config()
        .observed_attribute
        .clone();
    widget.connected()?;

    let mut previous: Option<String> = None;
    for value in &script.attributes {
        widget.attribute_changed(&observed, previous.as_deref(), Some(value));
        previous = Some(value.clone());
    }

    for _ in 0..script.clicks {
        widget.click()?;
    }

    if script.remount {
        widget.disconnected();
        widget.connected()?;
        widget.click()?;
    }

    let message = widget.message_text();
    let html = widget.host().to_html();
    let style = widget
        .definition()
        .style_sheet()
        .css_text()
        .to_string();

    if !script.keep_mounted {
        widget.disconnected();
    }

    let emitted = widget.take_emitted();
    let logs = widget.take_logs();

    Ok(PageReport {
        attribute: widget.attribute(&observed).map(str::to_string),
        connected: widget.is_connected(),
        tag,
        observed_attribute: observed,
        registration: match registration {
            Registration::Defined => "defined",
            Registration::AlreadyDefined => "already_defined",
        },
        html,
        style,
        message,
        emitted,
        logs,
    })
}

/// Human-readable summary of a report.
#[must_use]
pub fn render_report(report: &PageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<{}> ({})", report.tag, report.registration);
    let _ = writeln!(out, "  observed attribute: {}", report.observed_attribute);
    if let Some(value) = &report.attribute {
        let _ = writeln!(out, "  attribute value:    {value}");
    }
    let _ = writeln!(
        out,
        "  message:            {}",
        report.message.as_deref().unwrap_or("<none>")
    );
    let _ = writeln!(out, "  connected:          {}", report.connected);
    let _ = writeln!(out, "  style:              {}", report.style);
    let _ = writeln!(out, "  shadow html:        {}", report.html);
    out.push_str("  emitted events:\n");
    for event in &report.emitted {
        let detail = event
            .detail
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let _ = writeln!(out, "    {} {detail}", event.event_type);
    }
    out.push_str("  log:\n");
    for line in &report.logs {
        let _ = writeln!(out, "    {line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_clicks_once_and_unmounts() {
        let report = run_page(&PageScript::default()).unwrap();
        assert_eq!(report.tag, "wc-component");
        assert_eq!(report.observed_attribute, "titulo");
        assert!(!report.connected);
        assert!(
            report
                .message
                .as_deref()
                .is_some_and(|m| m.starts_with("EVENTO DISPARADO: TIPO CLICK "))
        );
        let custom = report
            .emitted
            .iter()
            .filter(|e| e.event_type == "custom-event")
            .count();
        assert_eq!(custom, 1);
    }

    #[test]
    fn attributes_and_remount_are_reflected() {
        let script = PageScript {
            preset: Preset::ComponentName,
            attributes: vec!["a".into(), "a".into(), "b".into()],
            clicks: 2,
            remount: true,
            keep_mounted: true,
            ..PageScript::default()
        };
        let report = run_page(&script).unwrap();
        assert!(report.connected);
        assert_eq!(report.attribute.as_deref(), Some("b"));
        let custom = report
            .emitted
            .iter()
            .filter(|e| e.event_type == "custom-event")
            .count();
        assert_eq!(custom, 3);
        let changes = report
            .logs
            .iter()
            .filter(|l| l.contains("attribute_changed"))
            .count();
        assert_eq!(changes, 2);
    }

    #[test]
    fn render_report_lists_events() {
        let report = run_page(&PageScript::default()).unwrap();
        let text = render_report(&report);
        assert!(text.starts_with("<wc-component>"));
        assert!(text.contains("custom-event {\"origin\":\"click interno\"}"));
    }
}
