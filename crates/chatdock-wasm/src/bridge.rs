#![forbid(unsafe_code)]

//! JS-facing conversions shared by the browser binding and native tests.

use chatdock_core::{PanelSize, ResizeDirection, WidgetPhase};
use chatdock_layout::{PanelBox, ResizeHandle};
use chatdock_web::{
    ButtonProps, ConversationProps, ResizeIgnoredReason, ResizeOutcome, TooltipProps,
    WidgetController,
};
use serde::Serialize;

/// Parse a handle label passed from JS (`left`, `top`, `corner`, or the
/// axis aliases `x`, `y`, `both`), case-insensitively.
pub(crate) fn parse_direction(label: &str) -> Option<ResizeDirection> {
    ResizeDirection::from_label(&label.trim().to_ascii_lowercase())
}

pub(crate) fn outcome_label(outcome: ResizeOutcome) -> &'static str {
    match outcome {
        ResizeOutcome::Started {
            superseded: false, ..
        } => "started",
        ResizeOutcome::Started {
            superseded: true, ..
        } => "superseded",
        ResizeOutcome::Updated(_) => "updated",
        ResizeOutcome::Ended => "ended",
        ResizeOutcome::Ignored(reason) => ignored_reason_label(reason),
    }
}

fn ignored_reason_label(reason: ResizeIgnoredReason) -> &'static str {
    match reason {
        ResizeIgnoredReason::NoActiveSession => "no_active_session",
        ResizeIgnoredReason::MissingPointer => "missing_pointer",
        ResizeIgnoredReason::HandleDisabled => "handle_disabled",
        ResizeIgnoredReason::Unmounted => "unmounted",
    }
}

const fn phase_label(phase: WidgetPhase) -> &'static str {
    match phase {
        WidgetPhase::Closed => "closed",
        WidgetPhase::Open => "open",
        WidgetPhase::OpenSplit => "open_split",
    }
}

/// Rendered panel size read from the element's layout box. A zero area
/// means the panel is not laid out yet (detached or `display: none`).
pub(crate) fn rendered_size(width: f64, height: f64) -> Option<PanelSize> {
    (width.is_finite() && height.is_finite() && width * height > 0.0)
        .then(|| PanelSize::new(width, height))
}

/// Everything the surrounding UI needs to render one frame.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WidgetSnapshot {
    pub phase: &'static str,
    pub is_resizing: bool,
    pub panel: PanelBox,
    pub panel_style: String,
    pub handles: [ResizeHandle; 3],
    pub button: ButtonProps,
    pub tooltip: TooltipProps,
    pub conversation: ConversationProps,
    pub custom_css: Option<String>,
}

impl WidgetSnapshot {
    pub(crate) fn capture(widget: &WidgetController) -> Self {
        let panel = widget.panel_box();
        Self {
            phase: phase_label(widget.phase()),
            is_resizing: widget.state().is_resizing,
            panel_style: panel.to_style_attribute(),
            panel,
            handles: widget.resize_handles(),
            button: widget.button_props(),
            tooltip: widget.tooltip_props(),
            conversation: widget.conversation_props(),
            custom_css: widget.custom_css().map(str::to_owned),
        }
    }

    pub(crate) fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::warn!(target: "chatdock.widget", %err, "snapshot serialization failed");
            "{}".to_owned()
        })
    }
}
