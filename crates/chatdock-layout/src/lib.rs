#![forbid(unsafe_code)]

//! Layout resolution for the chatdock panel.
//!
//! Everything here is a pure function of [`GeometryState`] (which carries
//! the last observed [`Viewport`]) and the [`WidgetConfig`]. Side effects on the host
//! document are *described* ([`BodyPush`]) but never performed; the web
//! crate owns the scoped guards that apply and revert them.
//!
//! [`GeometryState`]: chatdock_core::GeometryState
//! [`WidgetConfig`]: chatdock_core::WidgetConfig
//! [`Viewport`]: chatdock_core::Viewport

pub mod canvas;
pub mod handles;
pub mod panel_box;
pub mod resolve;

pub use canvas::{BODY_MARGIN_TRANSITION, BodyPush, SplitWidth, body_push, split_view_width};
pub use handles::{ResizeHandle, handles_enabled, resize_handles};
pub use panel_box::{BorderRadius, PanelBox, TransitionMode};
pub use resolve::resolve;
