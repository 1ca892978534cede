#![forbid(unsafe_code)]

//! Props handed to the collaborating UI components.
//!
//! The toggle button, its tooltip and the conversation view are rendered
//! elsewhere; they only see these snapshots plus the controller callbacks.

use chatdock_core::config::{AutoWindowOpen, DEFAULT_BUTTON_COLOR, DEFAULT_ICON_COLOR};
use chatdock_core::{Anchor, GeometryState, WidgetConfig};
use serde::Serialize;

const DEFAULT_TOOLTIP_MESSAGE: &str = "Hi There 👋!";
const DEFAULT_TOOLTIP_BACKGROUND: &str = "black";
const DEFAULT_TOOLTIP_TEXT_COLOR: &str = "white";
const DEFAULT_TOOLTIP_FONT_SIZE: f64 = 16.0;

/// Snapshot for the toggle button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonProps {
    pub is_bot_opened: bool,
    pub size: f64,
    pub anchor: Anchor,
    pub background_color: String,
    pub icon_color: String,
    pub drag_and_drop: bool,
    pub auto_window_open: AutoWindowOpen,
}

impl ButtonProps {
    #[must_use]
    pub fn new(state: &GeometryState, config: &WidgetConfig) -> Self {
        let button = &config.theme.button;
        Self {
            is_bot_opened: state.is_open,
            size: config.button_size(),
            anchor: state.anchor,
            background_color: non_empty(button.background_color.as_deref(), DEFAULT_BUTTON_COLOR),
            icon_color: non_empty(button.icon_color.as_deref(), DEFAULT_ICON_COLOR),
            drag_and_drop: button.drag_and_drop,
            auto_window_open: button.auto_window_open.clone(),
        }
    }
}

/// Snapshot for the tooltip next to the button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipProps {
    /// Shown only while enabled and the panel is closed.
    pub visible: bool,
    pub message: String,
    pub background_color: String,
    pub text_color: String,
    pub font_size: f64,
    pub anchor: Anchor,
    pub button_size: f64,
}

impl TooltipProps {
    #[must_use]
    pub fn new(state: &GeometryState, config: &WidgetConfig) -> Self {
        let tooltip = &config.theme.tooltip;
        Self {
            visible: tooltip.show_tooltip && !state.is_open,
            message: non_empty(tooltip.tooltip_message.as_deref(), DEFAULT_TOOLTIP_MESSAGE),
            background_color: non_empty(
                tooltip.tooltip_background_color.as_deref(),
                DEFAULT_TOOLTIP_BACKGROUND,
            ),
            text_color: non_empty(tooltip.tooltip_text_color.as_deref(), DEFAULT_TOOLTIP_TEXT_COLOR),
            font_size: tooltip.tooltip_font_size.unwrap_or(DEFAULT_TOOLTIP_FONT_SIZE),
            anchor: state.anchor,
            button_size: config.button_size(),
        }
    }
}

/// Snapshot for the conversation view inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationProps {
    /// Content is instantiated once the panel has opened at least once and
    /// stays mounted across later closes.
    pub mounted: bool,
    pub is_split_view: bool,
}

impl ConversationProps {
    #[must_use]
    pub const fn new(state: &GeometryState) -> Self {
        Self {
            mounted: state.is_started,
            is_split_view: state.is_split_view,
        }
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback).to_owned()
}
