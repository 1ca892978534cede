#![forbid(unsafe_code)]

//! The widget controller.
//!
//! [`WidgetController`] is the single owner of the widget's
//! [`GeometryState`]. Every mutation goes through [`WidgetController::commit`],
//! which resolves the panel box once, publishes it to the [`LayoutFeed`] and
//! then reconciles the host body push with the new state. The host document is only ever touched through the
//! scoped guards in [`crate::effects`].
//!
//! # Lifecycle
//!
//! ```text
//!            open()                toggle_split_view()
//!  Closed ──────────────▶ Open ◀──────────────────────▶ OpenSplit
//!    ▲                     │                               │
//!    └──────── close() ────┴─────────── close() ───────────┘
//! ```
//!
//! Mounting injects the viewport meta tag and registers the window-resize
//! listener. Unmounting (or dropping the controller) ends any drag, restores
//! the body style, removes the meta tag and deregisters every listener.

use chatdock_core::{
    Anchor, GeometryState, PanelSize, ResizeDirection, ViewportChange, ViewportMonitor,
    WidgetConfig, WidgetPhase,
};
use chatdock_layout::{PanelBox, ResizeHandle, body_push, handles_enabled, resize_handles, resolve};

use crate::collaborators::{ButtonProps, ConversationProps, TooltipProps};
use crate::effects::{BodyStyleGuard, ListenerSet, MetaTagGuard};
use crate::host::{HostEvent, ListenerKind, SharedHost};
use crate::layout_feed::{LayoutFeed, LayoutSubscription};
use crate::resize::{PointerInput, ResizeController, ResizeIgnoredReason, ResizeOutcome};

/// Orchestrates lifecycle transitions, resize sessions and host side effects.
pub struct WidgetController {
    config: WidgetConfig,
    host: SharedHost,
    state: GeometryState,
    layout: LayoutFeed,
    monitor: ViewportMonitor,
    resize: ResizeController,
    body: Option<BodyStyleGuard>,
    meta: Option<MetaTagGuard>,
    window_listener: Option<ListenerSet>,
    mounted: bool,
}

impl WidgetController {
    /// Mount the widget into `host`.
    pub fn mount(config: WidgetConfig, host: &SharedHost) -> Self {
        let viewport = host.borrow().viewport();
        let monitor = ViewportMonitor::new(&config, viewport);
        let state = GeometryState::from_config(&config, &monitor);
        let meta = MetaTagGuard::acquire(host);
        let window_listener = ListenerSet::register(host, &[ListenerKind::WindowResize]);
        tracing::info!(
            target: "chatdock.widget",
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            is_mobile = state.is_mobile,
            "widget mounted"
        );
        let layout = LayoutFeed::new(resolve(&state, &config));
        Self {
            config,
            host: SharedHost::clone(host),
            state,
            layout,
            monitor,
            resize: ResizeController::new(host),
            body: None,
            meta: Some(meta),
            window_listener: Some(window_listener),
            mounted: true,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &GeometryState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> WidgetPhase {
        self.state.phase()
    }

    #[must_use]
    pub const fn monitor(&self) -> &ViewportMonitor {
        &self.monitor
    }

    /// The panel box resolved for the current state.
    #[must_use]
    pub fn panel_box(&self) -> PanelBox {
        self.layout.current().clone()
    }

    /// Number of commits that changed the resolved panel box.
    #[must_use]
    pub const fn layout_revision(&self) -> u64 {
        self.layout.revision()
    }

    /// Observe the resolved panel box. Called once per commit that changes it.
    pub fn subscribe(&self, callback: impl Fn(&PanelBox) + 'static) -> LayoutSubscription {
        self.layout.subscribe(callback)
    }

    pub fn open(&mut self) -> bool {
        let changed = self.commit(|s| {
            s.open();
        });
        if changed {
            tracing::debug!(target: "chatdock.widget", "panel opened");
        }
        changed
    }

    pub fn close(&mut self) -> bool {
        let changed = self.commit(|s| {
            s.close();
        });
        if changed {
            tracing::debug!(target: "chatdock.widget", "panel closed");
        }
        changed
    }

    pub fn toggle(&mut self) -> bool {
        if self.state.is_open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Flip split view. No-op while closed.
    pub fn toggle_split_view(&mut self) -> bool {
        let changed = self.commit(|s| {
            s.toggle_split_view();
        });
        if changed {
            tracing::debug!(
                target: "chatdock.widget",
                split_view = self.state.is_split_view,
                "split view toggled"
            );
        }
        changed
    }

    /// Record a new toggle-button position (button drag-and-drop).
    pub fn set_button_position(&mut self, anchor: Anchor) -> bool {
        self.commit(|s| s.anchor = anchor)
    }

    /// Start a resize drag from a handle.
    ///
    /// `rendered` is the panel's current rendered size, or `None` when the
    /// panel element is not available.
    pub fn begin_resize(
        &mut self,
        input: &PointerInput,
        direction: ResizeDirection,
        rendered: Option<PanelSize>,
    ) -> ResizeOutcome {
        if !self.mounted {
            return ResizeOutcome::Ignored(ResizeIgnoredReason::Unmounted);
        }
        if !handles_enabled(&self.state, &self.config) {
            tracing::debug!(
                target: "chatdock.resize",
                direction = direction.label(),
                "resize handle disabled"
            );
            return ResizeOutcome::Ignored(ResizeIgnoredReason::HandleDisabled);
        }
        let outcome = self.resize.begin(input, direction, rendered);
        if matches!(outcome, ResizeOutcome::Started { .. }) {
            self.commit(|s| {
                s.is_resizing = true;
                s.resize_direction = direction;
            });
        }
        outcome
    }

    /// Feed a global pointer move into the active drag.
    pub fn pointer_move(&mut self, input: &PointerInput) -> ResizeOutcome {
        let (current, split_view) = (self.state.panel_size, self.state.is_split_view);
        let outcome = self.resize.update(input, current, split_view);
        if let ResizeOutcome::Updated(size) = outcome {
            self.commit(|s| s.set_panel_size(size));
        }
        outcome
    }

    /// End the active drag. Idempotent.
    pub fn pointer_up(&mut self) -> ResizeOutcome {
        let outcome = self.resize.end();
        self.commit(|s| s.is_resizing = false);
        outcome
    }

    /// Reclassify the viewport after a window resize.
    pub fn window_resized(&mut self, width: f64, height: f64) -> ViewportChange {
        let change = self.monitor.observe(width, height);
        self.commit(|s| s.set_viewport(change.viewport, change.is_mobile));
        change
    }

    /// Dispatch an event delivered by the host.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerMove(input) => {
                self.pointer_move(&input);
            }
            HostEvent::PointerUp => {
                self.pointer_up();
            }
            HostEvent::WindowResize { width, height } => {
                self.window_resized(width, height);
            }
        }
    }

    #[must_use]
    pub fn resize_handles(&self) -> [ResizeHandle; 3] {
        resize_handles(&self.state, &self.config)
    }

    #[must_use]
    pub fn button_props(&self) -> ButtonProps {
        ButtonProps::new(&self.state, &self.config)
    }

    #[must_use]
    pub fn tooltip_props(&self) -> TooltipProps {
        TooltipProps::new(&self.state, &self.config)
    }

    #[must_use]
    pub fn conversation_props(&self) -> ConversationProps {
        ConversationProps::new(&self.state)
    }

    #[must_use]
    pub fn custom_css(&self) -> Option<&str> {
        self.config.custom_css()
    }

    /// Tear the widget down and revert every host side effect. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.resize.end();
        self.body = None;
        self.window_listener = None;
        self.meta = None;
        self.state.reset_lifecycle();
        self.layout.publish(resolve(&self.state, &self.config));
        self.mounted = false;
        tracing::info!(target: "chatdock.widget", "widget unmounted");
    }

    /// Apply `f` to the state, publish the new panel box, then reconcile
    /// host side effects.
    ///
    /// Returns whether the state changed. Ignored after unmount.
    fn commit(&mut self, f: impl FnOnce(&mut GeometryState)) -> bool {
        if !self.mounted {
            tracing::trace!(target: "chatdock.widget", "state change after unmount ignored");
            return false;
        }
        let before = self.state.clone();
        f(&mut self.state);
        if self.state == before {
            return false;
        }
        self.layout.publish(resolve(&self.state, &self.config));
        self.sync_body();
        true
    }

    fn sync_body(&mut self) {
        let push = body_push(&self.state, &self.config);
        match push {
            Some(push) => {
                if let Some(guard) = self.body.as_mut() {
                    guard.apply(&push);
                } else {
                    self.body = Some(BodyStyleGuard::acquire(&self.host, &push));
                }
            }
            None => self.body = None,
        }
    }
}

impl Drop for WidgetController {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for WidgetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetController")
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("resize", &self.resize)
            .field("body", &self.body)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostDocument, MemoryHost};
    use chatdock_core::{CssLength, PointerPosition, Viewport};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mount_with(json: &str, viewport: Viewport) -> (Rc<RefCell<MemoryHost>>, WidgetController) {
        let memory = MemoryHost::new(viewport).shared();
        let shared: SharedHost = memory.clone();
        let config = WidgetConfig::from_json(json).unwrap();
        (memory, WidgetController::mount(config, &shared))
    }

    fn mount() -> (Rc<RefCell<MemoryHost>>, WidgetController) {
        mount_with("{}", Viewport::new(1280.0, 900.0))
    }

    fn mouse(x: f64, y: f64) -> PointerInput {
        PointerInput::Mouse(PointerPosition::new(x, y))
    }

    #[test]
    fn mount_injects_meta_and_resize_listener() {
        let (memory, widget) = mount();
        assert!(widget.is_mounted());
        assert_eq!(memory.borrow().meta_tags().len(), 1);
        assert_eq!(memory.borrow().listener_count_of(ListenerKind::WindowResize), 1);
        assert_eq!(widget.phase(), WidgetPhase::Closed);
    }

    #[test]
    fn toggle_alternates() {
        let (_, mut widget) = mount();
        assert!(widget.toggle());
        assert_eq!(widget.phase(), WidgetPhase::Open);
        assert!(widget.toggle());
        assert_eq!(widget.phase(), WidgetPhase::Closed);
    }

    #[test]
    fn split_view_pushes_body_and_tracks_resizes() {
        let (memory, mut widget) = mount();
        widget.open();
        widget.toggle_split_view();
        assert_eq!(memory.borrow().body_style("margin-right"), "400px");

        widget.begin_resize(&mouse(900.0, 400.0), ResizeDirection::Left, Some(PanelSize::new(400.0, 900.0)));
        widget.pointer_move(&mouse(850.0, 100.0));
        assert_eq!(memory.borrow().body_style("margin-right"), "450px");
        assert_eq!(widget.state().panel_size, PanelSize::new(450.0, 704.0));
        widget.pointer_up();

        widget.toggle_split_view();
        assert_eq!(memory.borrow().body_style("margin-right"), "");
        assert_eq!(memory.borrow().body_style("transition"), "");
    }

    #[test]
    fn resizing_flag_spans_the_drag() {
        let (memory, mut widget) = mount();
        widget.open();
        widget.begin_resize(&mouse(10.0, 10.0), ResizeDirection::Corner, Some(PanelSize::DEFAULT));
        assert!(widget.state().is_resizing);
        assert_eq!(widget.state().resize_direction, ResizeDirection::Corner);
        assert_eq!(widget.panel_box().transition.css(), "none");
        widget.pointer_up();
        assert!(!widget.state().is_resizing);
        assert_eq!(memory.borrow().listener_count(), 1);
    }

    #[test]
    fn fixed_canvas_split_view_rejects_drags() {
        let (memory, mut widget) = mount_with(
            r#"{"theme":{"chatWindow":{"fixedCanvasWidth":500}}}"#,
            Viewport::new(1280.0, 900.0),
        );
        widget.open();
        widget.toggle_split_view();
        let outcome = widget.begin_resize(&mouse(0.0, 0.0), ResizeDirection::Left, None);
        assert_eq!(outcome, ResizeOutcome::Ignored(ResizeIgnoredReason::HandleDisabled));
        assert_eq!(memory.borrow().listener_count(), 1);
        assert!(widget.resize_handles().iter().all(|h| !h.enabled));
    }

    #[test]
    fn crossing_breakpoint_releases_fixed_canvas_push() {
        let (memory, mut widget) = mount_with(
            r#"{"theme":{"chatWindow":{"fixedCanvasWidth":500}}}"#,
            Viewport::new(1280.0, 900.0),
        );
        widget.open();
        widget.toggle_split_view();
        assert_eq!(memory.borrow().body_style("margin-right"), "500px");
        let change = widget.window_resized(700.0, 900.0);
        assert!(change.crossed_breakpoint);
        assert_eq!(widget.panel_box().width, CssLength::FULL_WIDTH);
        assert_eq!(memory.borrow().body_style("margin-right"), "");
    }

    #[test]
    fn subscribers_see_resolved_boxes() {
        let (_, mut widget) = mount();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = widget.subscribe(move |panel| sink.borrow_mut().push(panel.visible));
        widget.open();
        widget.close();
        drop(sub);
        widget.open();
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn layout_observers_skip_commits_without_visual_change() {
        let (_, mut widget) = mount();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let _sub = widget.subscribe(move |_| *sink.borrow_mut() += 1);

        widget.open();
        widget.toggle_split_view();
        assert_eq!(*calls.borrow(), 2);

        // Split view pins the panel, so moving the button is invisible.
        assert!(widget.set_button_position(Anchor::new(200.0, 200.0)));
        assert_eq!(*calls.borrow(), 2);

        widget.begin_resize(&mouse(900.0, 400.0), ResizeDirection::Left, Some(PanelSize::DEFAULT));
        widget.pointer_up();
        widget.pointer_up();
        assert_eq!(*calls.borrow(), 4);
        assert_eq!(widget.layout_revision(), 4);
    }

    #[test]
    fn button_position_moves_panel() {
        let (_, mut widget) = mount();
        widget.set_button_position(Anchor::new(100.0, 60.0));
        let panel = widget.panel_box();
        assert_eq!(panel.right, CssLength::Px(60.0));
        assert_eq!(panel.bottom, CssLength::Px(100.0 + 48.0 + 10.0));
        assert_eq!(widget.button_props().anchor, Anchor::new(100.0, 60.0));
    }

    #[test]
    fn unmount_is_idempotent_and_freezes_state() {
        let (memory, mut widget) = mount();
        widget.open();
        widget.unmount();
        widget.unmount();
        assert!(!widget.is_mounted());
        assert!(!widget.state().is_started);
        assert!(!widget.open());
        assert_eq!(memory.borrow().listener_count(), 0);
        assert!(memory.borrow().meta_tags().is_empty());
    }

    #[test]
    fn handle_event_routes_host_signals() {
        let (memory, mut widget) = mount();
        widget.open();
        widget.begin_resize(&mouse(500.0, 500.0), ResizeDirection::Top, Some(PanelSize::DEFAULT));
        let event = memory.borrow().pointer_move_event(500.0, 450.0).unwrap();
        widget.handle_event(event);
        assert_eq!(widget.state().panel_size.height, 754.0);
        widget.handle_event(HostEvent::PointerUp);
        assert_eq!(memory.borrow().pointer_move_event(500.0, 400.0), None);
        widget.handle_event(HostEvent::WindowResize {
            width: 600.0,
            height: 800.0,
        });
        assert!(widget.state().is_mobile);
    }
}
