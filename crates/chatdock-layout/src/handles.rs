#![forbid(unsafe_code)]

//! Resize handle descriptors.
//!
//! The panel carries three invisible handles along its top-left corner and
//! edges. Whether a handle is live is derived from state and configuration:
//! a docked fixed-width canvas has no user-resizable dimension left.

use chatdock_core::{GeometryState, ResizeDirection, WidgetConfig};
use serde::Serialize;

/// Edge length of the corner handle.
pub const CORNER_HANDLE_PX: f64 = 15.0;
/// Thickness of the edge handles.
pub const EDGE_HANDLE_PX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeHandle {
    pub direction: ResizeDirection,
    pub cursor: &'static str,
    pub top: String,
    pub left: String,
    pub width: String,
    pub height: String,
    pub z_index: u32,
    pub enabled: bool,
}

impl ResizeHandle {
    /// Inline style for the handle element.
    #[must_use]
    pub fn style_attribute(&self) -> String {
        format!(
            "position: absolute; top: {}; left: {}; width: {}; height: {}; cursor: {}; z-index: {};{}",
            self.top,
            self.left,
            self.width,
            self.height,
            self.cursor,
            self.z_index,
            if self.enabled { "" } else { " pointer-events: none;" }
        )
    }
}

/// Whether drags are accepted in the current state.
#[must_use]
pub fn handles_enabled(state: &GeometryState, config: &WidgetConfig) -> bool {
    !(state.is_split_view && config.has_fixed_canvas())
}

/// The corner, left-edge and top-edge handles, in that order.
#[must_use]
pub fn resize_handles(state: &GeometryState, config: &WidgetConfig) -> [ResizeHandle; 3] {
    let enabled = handles_enabled(state, config);
    let rest = format!("calc(100% - {CORNER_HANDLE_PX}px)");
    [
        ResizeHandle {
            direction: ResizeDirection::Corner,
            cursor: "nwse-resize",
            top: "0".into(),
            left: "0".into(),
            width: format!("{CORNER_HANDLE_PX}px"),
            height: format!("{CORNER_HANDLE_PX}px"),
            z_index: 51,
            enabled,
        },
        ResizeHandle {
            direction: ResizeDirection::Left,
            cursor: "ew-resize",
            top: format!("{CORNER_HANDLE_PX}px"),
            left: "0".into(),
            width: format!("{EDGE_HANDLE_PX}px"),
            height: rest.clone(),
            z_index: 50,
            enabled,
        },
        ResizeHandle {
            direction: ResizeDirection::Top,
            cursor: "ns-resize",
            top: "0".into(),
            left: format!("{CORNER_HANDLE_PX}px"),
            width: rest,
            height: format!("{EDGE_HANDLE_PX}px"),
            z_index: 50,
            enabled,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdock_core::{Viewport, ViewportMonitor};
    use pretty_assertions::assert_eq;

    fn open_state(config: &WidgetConfig) -> GeometryState {
        let mut state =
            GeometryState::from_config(config, &ViewportMonitor::new(config, Viewport::default()));
        state.open();
        state
    }

    #[test]
    fn handle_layout() {
        let config = WidgetConfig::default();
        let [corner, left, top] = resize_handles(&open_state(&config), &config);
        assert_eq!(corner.direction, ResizeDirection::Corner);
        assert_eq!(corner.width, "15px");
        assert_eq!(left.height, "calc(100% - 15px)");
        assert_eq!(top.cursor, "ns-resize");
        assert!(corner.enabled && left.enabled && top.enabled);
    }

    #[test]
    fn fixed_canvas_split_view_disables_handles() {
        let config =
            WidgetConfig::from_json(r#"{"theme":{"chatWindow":{"fixedCanvasWidth":"480px"}}}"#)
                .unwrap();
        let mut state = open_state(&config);
        assert!(handles_enabled(&state, &config));
        state.toggle_split_view();
        assert!(!handles_enabled(&state, &config));
        let handles = resize_handles(&state, &config);
        assert!(handles.iter().all(|h| !h.enabled));
        assert!(handles[0].style_attribute().ends_with("pointer-events: none;"));
    }

    #[test]
    fn tracking_split_view_keeps_handles() {
        let config = WidgetConfig::default();
        let mut state = open_state(&config);
        state.toggle_split_view();
        assert!(handles_enabled(&state, &config));
    }
}
