#![forbid(unsafe_code)]

//! Host-driven controller for the chatdock widget.
//!
//! The embedder owns the event loop. It forwards DOM signals (pointer moves
//! and releases, window resizes) to a [`WidgetController`] and renders the
//! resolved [`PanelBox`](chatdock_layout::PanelBox) it publishes. All
//! host-page mutations flow through a [`HostDocument`] implementation, which
//! keeps the controller deterministic and testable off the browser.
//!
//! # Example
//!
//! ```
//! use chatdock_core::{PanelSize, PointerPosition, ResizeDirection, Viewport, WidgetConfig};
//! use chatdock_web::{MemoryHost, PointerInput, SharedHost, WidgetController};
//!
//! let memory = MemoryHost::new(Viewport::new(1280.0, 900.0)).shared();
//! let host: SharedHost = memory.clone();
//! let mut widget = WidgetController::mount(WidgetConfig::default(), &host);
//!
//! widget.open();
//! let start = PointerInput::Mouse(PointerPosition::new(900.0, 200.0));
//! widget.begin_resize(&start, ResizeDirection::Left, Some(PanelSize::DEFAULT));
//! widget.pointer_move(&PointerInput::Mouse(PointerPosition::new(800.0, 200.0)));
//! widget.pointer_up();
//!
//! assert_eq!(widget.state().panel_size.width, 500.0);
//! assert_eq!(memory.borrow().listener_count(), 1);
//! ```

pub mod collaborators;
pub mod effects;
pub mod host;
pub mod layout_feed;
pub mod resize;
pub mod widget;

pub use collaborators::{ButtonProps, ConversationProps, TooltipProps};
pub use effects::{BodyStyleGuard, ListenerSet, MetaTagGuard, VIEWPORT_META_CONTENT};
pub use host::{HostDocument, HostEvent, ListenerId, ListenerKind, MemoryHost, MetaTagId, SharedHost};
pub use layout_feed::{LayoutFeed, LayoutSubscription};
pub use resize::{DragSession, PointerInput, ResizeController, ResizeIgnoredReason, ResizeOutcome};
pub use widget::WidgetController;
