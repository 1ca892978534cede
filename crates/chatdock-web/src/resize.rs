#![forbid(unsafe_code)]

//! Pointer-driven panel resize sessions.
//!
//! A [`DragSession`] exists only between a resize-start and its matching
//! resize-end. It owns the global move/up listeners for its lifetime, so
//! ending (or dropping) the session is what deregisters them.
//!
//! # Invariants
//!
//! 1. At most one session is active per controller. Beginning a new session
//!    while one is active cancels the old one first (its listeners are
//!    deregistered before the new ones are registered).
//! 2. Sizes are recomputed from the session's fixed origin on every move;
//!    nothing is accumulated between frames, so coalesced, repeated or lost
//!    move events cannot cause drift.
//! 3. Every size produced respects the `300 x 400` floor.
//! 4. Move and up signals with no active session are ignored.

use chatdock_core::geometry::{MIN_PANEL_HEIGHT, MIN_PANEL_WIDTH, floor_axis};
use chatdock_core::{PanelSize, PointerPosition, ResizeDirection};
use web_time::Instant;

use crate::effects::ListenerSet;
use crate::host::{ListenerKind, SharedHost};

/// Pointer sample from either a mouse or a touch event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse(PointerPosition),
    /// Active touch points; only the first one drives the resize.
    Touch(Vec<PointerPosition>),
}

impl PointerInput {
    /// Position that drives the resize, if the event carries one.
    #[must_use]
    pub fn position(&self) -> Option<PointerPosition> {
        match self {
            Self::Mouse(pos) => Some(*pos),
            Self::Touch(points) => points.first().copied(),
        }
    }
}

/// One active resize drag.
#[derive(Debug)]
pub struct DragSession {
    origin: PointerPosition,
    start_size: PanelSize,
    direction: ResizeDirection,
    started_at: Instant,
    listeners: ListenerSet,
}

impl DragSession {
    #[must_use]
    pub const fn origin(&self) -> PointerPosition {
        self.origin
    }

    #[must_use]
    pub const fn start_size(&self) -> PanelSize {
        self.start_size
    }

    #[must_use]
    pub const fn direction(&self) -> ResizeDirection {
        self.direction
    }

    /// Number of global listeners held by this session.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Panel size for a pointer at `pointer`.
    ///
    /// Axes outside the session's direction keep their `current` value. In
    /// split view only the width is resizable, whatever the direction.
    #[must_use]
    pub fn size_at(&self, pointer: PointerPosition, current: PanelSize, split_view: bool) -> PanelSize {
        let (dx, dy) = pointer.growth_from(self.origin);
        let mut next = current;
        if split_view || self.direction.affects_width() {
            next.width = floor_axis(self.start_size.width + dx, MIN_PANEL_WIDTH);
        }
        if !split_view && self.direction.affects_height() {
            next.height = floor_axis(self.start_size.height + dy, MIN_PANEL_HEIGHT);
        }
        next
    }
}

/// Why a resize signal did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeIgnoredReason {
    NoActiveSession,
    /// A touch event arrived without any touch point.
    MissingPointer,
    /// The handle is disabled in the current layout.
    HandleDisabled,
    Unmounted,
}

/// Outcome of one resize signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    Started {
        direction: ResizeDirection,
        /// Whether an active session was cancelled to make room.
        superseded: bool,
    },
    Updated(PanelSize),
    Ended,
    Ignored(ResizeIgnoredReason),
}

/// Owns the drag protocol and the at-most-one active [`DragSession`].
pub struct ResizeController {
    host: SharedHost,
    session: Option<DragSession>,
}

impl ResizeController {
    #[must_use]
    pub fn new(host: &SharedHost) -> Self {
        Self {
            host: SharedHost::clone(host),
            session: None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a drag from a handle.
    ///
    /// `rendered` is the panel's current rendered size; `None` (no panel
    /// element yet) degrades to a zero origin, so the first move yields the
    /// floor.
    pub fn begin(
        &mut self,
        input: &PointerInput,
        direction: ResizeDirection,
        rendered: Option<PanelSize>,
    ) -> ResizeOutcome {
        let Some(origin) = input.position() else {
            tracing::debug!(target: "chatdock.resize", "resize start without pointer ignored");
            return ResizeOutcome::Ignored(ResizeIgnoredReason::MissingPointer);
        };

        let superseded = if let Some(previous) = self.session.take() {
            tracing::warn!(
                target: "chatdock.resize",
                previous = previous.direction.label(),
                next = direction.label(),
                "resize session superseded"
            );
            drop(previous);
            true
        } else {
            false
        };

        let start_size = rendered.unwrap_or(PanelSize::new(0.0, 0.0));
        if rendered.is_none() {
            tracing::debug!(target: "chatdock.resize", "no rendered panel; using zero origin");
        }
        let listeners = ListenerSet::register(&self.host, &ListenerKind::DRAG);
        tracing::debug!(
            target: "chatdock.resize",
            direction = direction.label(),
            x = origin.x,
            y = origin.y,
            start_width = start_size.width,
            start_height = start_size.height,
            "resize session started"
        );
        self.session = Some(DragSession {
            origin,
            start_size,
            direction,
            started_at: Instant::now(),
            listeners,
        });
        ResizeOutcome::Started {
            direction,
            superseded,
        }
    }

    /// Compute the size for a move event against the active session.
    #[must_use]
    pub fn update(&self, input: &PointerInput, current: PanelSize, split_view: bool) -> ResizeOutcome {
        let Some(session) = &self.session else {
            return ResizeOutcome::Ignored(ResizeIgnoredReason::NoActiveSession);
        };
        let Some(pointer) = input.position() else {
            return ResizeOutcome::Ignored(ResizeIgnoredReason::MissingPointer);
        };
        let size = session.size_at(pointer, current, split_view);
        tracing::trace!(
            target: "chatdock.resize",
            width = size.width,
            height = size.height,
            "resize update"
        );
        ResizeOutcome::Updated(size)
    }

    /// End the active session. Idempotent.
    pub fn end(&mut self) -> ResizeOutcome {
        let Some(session) = self.session.take() else {
            return ResizeOutcome::Ignored(ResizeIgnoredReason::NoActiveSession);
        };
        tracing::debug!(
            target: "chatdock.resize",
            direction = session.direction.label(),
            duration_ms = session.started_at.elapsed().as_millis() as u64,
            "resize session ended"
        );
        ResizeOutcome::Ended
    }
}

impl std::fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
