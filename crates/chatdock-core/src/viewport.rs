#![forbid(unsafe_code)]

//! Responsive viewport classification.
//!
//! [`ViewportMonitor`] is the single place that decides whether the host
//! window is "mobile". Other components query it instead of reading the
//! window size themselves. The host pushes size changes in via
//! [`ViewportMonitor::observe`]; the monitor never reads the window.

use crate::config::WidgetConfig;
use crate::geometry::Viewport;

/// Result of feeding one window-resize signal into the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChange {
    pub viewport: Viewport,
    pub is_mobile: bool,
    /// Whether the classification flipped with this update.
    pub crossed_breakpoint: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMonitor {
    breakpoint: f64,
    viewport: Viewport,
}

impl ViewportMonitor {
    /// Create a monitor using the configured breakpoint.
    #[must_use]
    pub fn new(config: &WidgetConfig, viewport: Viewport) -> Self {
        Self::with_breakpoint(config.mobile_breakpoint(), viewport)
    }

    #[must_use]
    pub const fn with_breakpoint(breakpoint: f64, viewport: Viewport) -> Self {
        Self {
            breakpoint,
            viewport,
        }
    }

    #[must_use]
    pub const fn breakpoint(&self) -> f64 {
        self.breakpoint
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a window of `width` pixels counts as mobile.
    #[must_use]
    pub fn classify(&self, width: f64) -> bool {
        width <= self.breakpoint
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.classify(self.viewport.width)
    }

    /// Record a new window size and reclassify synchronously.
    pub fn observe(&mut self, width: f64, height: f64) -> ViewportChange {
        let was_mobile = self.is_mobile();
        self.viewport = Viewport::new(width, height);
        let is_mobile = self.is_mobile();
        let crossed_breakpoint = was_mobile != is_mobile;
        if crossed_breakpoint {
            tracing::debug!(
                target: "chatdock.viewport",
                width,
                height,
                breakpoint = self.breakpoint,
                is_mobile,
                "viewport crossed mobile breakpoint"
            );
        }
        ViewportChange {
            viewport: self.viewport,
            is_mobile,
            crossed_breakpoint,
        }
    }
}
