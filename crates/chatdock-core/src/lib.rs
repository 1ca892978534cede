#![forbid(unsafe_code)]

//! Core types for the chatdock widget geometry engine.
//!
//! The widget is a floating toggle button that expands into a resizable
//! chat panel, optionally docked full-height against the right viewport edge
//! ("split view"). This crate holds everything that is independent of a
//! browser: geometry primitives, host configuration, the declarative
//! [`GeometryState`] and the [`ViewportMonitor`].

pub mod config;
pub mod geometry;
pub mod state;
pub mod viewport;

pub use config::{ConfigError, WidgetConfig};
pub use geometry::{Anchor, CssLength, PanelSize, PointerPosition, Viewport};
pub use state::{GeometryState, ResizeDirection, WidgetPhase};
pub use viewport::{ViewportChange, ViewportMonitor};
