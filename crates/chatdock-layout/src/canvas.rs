#![forbid(unsafe_code)]

//! Split-view canvas width and the host body push it requires.
//!
//! In split view the panel is docked full-height against the right edge and
//! the host page is pushed aside by setting the body's right margin to the
//! panel width. With a fixed canvas width configured, mobile clients get the
//! full viewport width instead, and the body is not pushed at all.

use chatdock_core::{CssLength, GeometryState, WidgetConfig};
use serde::Serialize;

/// Transition applied to the host body while it is pushed.
pub const BODY_MARGIN_TRANSITION: &str = "margin-right 200ms ease-out";

/// How the split-view width is derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum SplitWidth {
    /// Follows the user-resizable panel width.
    Tracking(f64),
    /// Configured fixed canvas width (desktop).
    Fixed(CssLength),
    /// Full viewport width (fixed canvas on mobile).
    FullViewport,
}

impl SplitWidth {
    #[must_use]
    pub fn css(&self) -> CssLength {
        match self {
            Self::Tracking(px) => CssLength::Px(*px),
            Self::Fixed(len) => len.clone(),
            Self::FullViewport => CssLength::FULL_WIDTH,
        }
    }

    /// Whether this width pushes the host body aside.
    #[must_use]
    pub const fn pushes_body(&self) -> bool {
        !matches!(self, Self::FullViewport)
    }
}

/// Resolve the split-view width for the current breakpoint.
#[must_use]
pub fn split_view_width(state: &GeometryState, config: &WidgetConfig) -> SplitWidth {
    match config.fixed_canvas_width() {
        Some(_) if state.is_mobile => SplitWidth::FullViewport,
        Some(width) => SplitWidth::Fixed(width),
        None => SplitWidth::Tracking(state.panel_size.width),
    }
}

/// Body style the host document must carry while split view is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPush {
    pub margin_right: CssLength,
}

impl BodyPush {
    #[must_use]
    pub const fn transition(&self) -> &'static str {
        BODY_MARGIN_TRANSITION
    }
}

/// The body push implied by `state`, or `None` when the body must be left alone.
#[must_use]
pub fn body_push(state: &GeometryState, config: &WidgetConfig) -> Option<BodyPush> {
    if !state.is_split_view {
        return None;
    }
    let width = split_view_width(state, config);
    width.pushes_body().then(|| BodyPush {
        margin_right: width.css(),
    })
}
