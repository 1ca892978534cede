#![forbid(unsafe_code)]

//! Declarative widget geometry state.
//!
//! [`GeometryState`] is a plain record with a single owner (the widget
//! controller). Transition helpers here are pure: they mutate the record and
//! report whether anything changed, leaving side effects to the caller.
//!
//! # Invariants
//!
//! 1. `is_open` implies `is_started` after any call to [`GeometryState::open`].
//! 2. `is_split_view` implies `is_open`: [`GeometryState::close`] always
//!    clears split view and [`GeometryState::toggle_split_view`] is a no-op
//!    while closed.
//! 3. `panel_size` never drops below [`PanelSize::MIN`] when written through
//!    [`GeometryState::set_panel_size`].

use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::geometry::{Anchor, PanelSize, Viewport};
use crate::viewport::ViewportMonitor;

/// Which axes an active drag session resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    /// Left edge: width only.
    Left,
    /// Top edge: height only.
    Top,
    /// Top-left corner: both axes.
    Corner,
}

impl ResizeDirection {
    pub const ALL: [Self; 3] = [Self::Left, Self::Top, Self::Corner];

    #[must_use]
    pub const fn affects_width(self) -> bool {
        matches!(self, Self::Left | Self::Corner)
    }

    #[must_use]
    pub const fn affects_height(self) -> bool {
        matches!(self, Self::Top | Self::Corner)
    }

    /// Parse a handle label. Accepts both the edge names and the axis
    /// names (`x`, `y`, `both`) hosts used in older embeddings.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "left" | "x" => Some(Self::Left),
            "top" | "y" => Some(Self::Top),
            "corner" | "both" => Some(Self::Corner),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Corner => "corner",
        }
    }
}

impl Default for ResizeDirection {
    fn default() -> Self {
        Self::Corner
    }
}

/// Coarse lifecycle state derived from the open and split-view flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetPhase {
    Closed,
    Open,
    OpenSplit,
}

/// Mutable widget geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryState {
    pub is_open: bool,
    pub is_started: bool,
    pub is_split_view: bool,
    pub is_resizing: bool,
    pub panel_size: PanelSize,
    pub anchor: Anchor,
    pub resize_direction: ResizeDirection,
    pub is_mobile: bool,
    pub viewport: Viewport,
}

impl GeometryState {
    /// Initial state for a freshly mounted widget.
    #[must_use]
    pub fn from_config(config: &WidgetConfig, monitor: &ViewportMonitor) -> Self {
        Self {
            is_open: false,
            is_started: false,
            is_split_view: false,
            is_resizing: false,
            panel_size: config.default_panel_size(),
            anchor: config.default_anchor(),
            resize_direction: ResizeDirection::default(),
            is_mobile: monitor.is_mobile(),
            viewport: monitor.viewport(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> WidgetPhase {
        match (self.is_open, self.is_split_view) {
            (false, _) => WidgetPhase::Closed,
            (true, false) => WidgetPhase::Open,
            (true, true) => WidgetPhase::OpenSplit,
        }
    }

    /// `Closed -> Open`, latching `is_started`. Returns `false` if already open.
    pub fn open(&mut self) -> bool {
        self.is_started = true;
        if self.is_open {
            return false;
        }
        self.is_open = true;
        true
    }

    /// `Open | OpenSplit -> Closed`, always leaving split view.
    pub fn close(&mut self) -> bool {
        let changed = self.is_open || self.is_split_view;
        self.is_open = false;
        self.is_split_view = false;
        changed
    }

    /// Flip split view while open. No-op while closed.
    pub fn toggle_split_view(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_split_view = !self.is_split_view;
        true
    }

    /// Write a panel size, clamped to the floor.
    pub fn set_panel_size(&mut self, size: PanelSize) {
        self.panel_size = size.clamped();
    }

    /// Record the latest viewport classification.
    pub fn set_viewport(&mut self, viewport: Viewport, is_mobile: bool) {
        self.viewport = viewport;
        self.is_mobile = is_mobile;
    }

    /// Full teardown: drop the started latch and every transient flag.
    pub fn reset_lifecycle(&mut self) {
        self.is_open = false;
        self.is_split_view = false;
        self.is_resizing = false;
        self.is_started = false;
    }
}
