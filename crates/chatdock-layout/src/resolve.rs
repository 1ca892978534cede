#![forbid(unsafe_code)]

//! Pure layout resolution: geometry state in, panel box out.
//!
//! # Invariants
//!
//! 1. Split view pins the panel to `top = right = bottom = 0` with full
//!    viewport height, independent of the toggle-button anchor.
//! 2. Outside split view the panel sits above the button with a fixed
//!    [`PANEL_GAP`], and `right` never goes negative.
//! 3. Transitions are suppressed exactly while a resize session is active.
//!
//! # Failure Modes
//!
//! None. Degenerate viewports simply produce offsets clamped at zero (right)
//! or below the button (bottom); nothing is rejected.

use chatdock_core::config::PANEL_GAP;
use chatdock_core::{CssLength, GeometryState, WidgetConfig};

use crate::canvas::{SplitWidth, split_view_width};
use crate::panel_box::{BorderRadius, PanelBox, TransitionMode};

/// Resolve the panel box for the given state.
///
/// The viewport is read from `state.viewport`, the same snapshot that
/// classified `state.is_mobile`.
#[must_use]
pub fn resolve(state: &GeometryState, config: &WidgetConfig) -> PanelBox {
    let transition = if state.is_resizing {
        TransitionMode::Suppressed
    } else {
        TransitionMode::Themed
    };
    let background_color = config.background_color().to_owned();
    let background_image = config
        .theme
        .chat_window
        .background_image
        .clone()
        .filter(|url| !url.is_empty());

    if state.is_split_view {
        let width = split_view_width(state, config);
        let border_radius = match width {
            SplitWidth::Fixed(_) => BorderRadius::LeadingEdge,
            SplitWidth::Tracking(_) | SplitWidth::FullViewport => BorderRadius::Square,
        };
        return PanelBox {
            width: width.css(),
            height: CssLength::FULL_HEIGHT,
            top: Some(CssLength::ZERO),
            right: CssLength::ZERO,
            bottom: CssLength::ZERO,
            border_radius,
            transition,
            visible: state.is_open,
            background_color,
            background_image,
        };
    }

    PanelBox {
        width: CssLength::Px(state.panel_size.width),
        height: CssLength::Px(state.panel_size.height),
        top: None,
        right: CssLength::Px(floating_right(state, config)),
        bottom: CssLength::Px(floating_bottom(state, config)),
        border_radius: BorderRadius::Themed,
        transition,
        visible: state.is_open,
        background_color,
        background_image,
    }
}

/// `min(anchor.bottom + button + gap, viewport.height - chat_window_bottom)`.
#[must_use]
pub fn floating_bottom(state: &GeometryState, config: &WidgetConfig) -> f64 {
    let above_button = state.anchor.bottom + config.button_size() + PANEL_GAP;
    above_button.min(state.viewport.height - config.chat_window_bottom())
}

/// `max(0, min(anchor.right, viewport.width - configured_width - gap))`.
#[must_use]
pub fn floating_right(state: &GeometryState, config: &WidgetConfig) -> f64 {
    let max_right = state.viewport.width - config.right_clamp_width() - PANEL_GAP;
    state.anchor.right.min(max_right).max(0.0)
}
