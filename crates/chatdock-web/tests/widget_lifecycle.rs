//! End-to-end lifecycle scenarios against the in-memory host.

use std::cell::RefCell;
use std::rc::Rc;

use chatdock_core::{
    Anchor, CssLength, PanelSize, PointerPosition, ResizeDirection, Viewport, WidgetConfig,
    WidgetPhase,
};
use chatdock_web::{
    HostDocument, ListenerKind, MemoryHost, PointerInput, ResizeIgnoredReason, ResizeOutcome,
    SharedHost, VIEWPORT_META_CONTENT, WidgetController,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn mount(json: &str, viewport: Viewport) -> (Rc<RefCell<MemoryHost>>, WidgetController) {
    let memory = MemoryHost::new(viewport).shared();
    let host: SharedHost = memory.clone();
    let config = WidgetConfig::from_json(json).expect("valid config");
    (memory, WidgetController::mount(config, &host))
}

fn desktop() -> (Rc<RefCell<MemoryHost>>, WidgetController) {
    mount("{}", Viewport::new(1280.0, 900.0))
}

fn mouse(x: f64, y: f64) -> PointerInput {
    PointerInput::Mouse(PointerPosition::new(x, y))
}

#[test]
fn basic_open_close_keeps_started_latch() {
    let (_, mut widget) = desktop();
    let state = widget.state();
    assert_eq!(state.phase(), WidgetPhase::Closed);
    assert!(!state.is_started);

    widget.open();
    assert_eq!(widget.phase(), WidgetPhase::Open);
    assert!(widget.state().is_started);

    widget.close();
    assert_eq!(widget.phase(), WidgetPhase::Closed);
    assert!(widget.state().is_started);
    assert!(widget.conversation_props().mounted);
}

#[test]
fn close_exits_split_view() {
    let (memory, mut widget) = desktop();
    widget.open();
    widget.toggle_split_view();
    assert_eq!(widget.phase(), WidgetPhase::OpenSplit);

    widget.close();
    let state = widget.state();
    assert!(!state.is_open);
    assert!(!state.is_split_view);
    assert_eq!(memory.borrow().body_style("margin-right"), "");

    // Reopening lands in the floating layout, not a stale split view.
    widget.open();
    assert_eq!(widget.phase(), WidgetPhase::Open);
}

#[test]
fn split_view_toggle_while_closed_is_noop() {
    let (memory, mut widget) = desktop();
    assert!(!widget.toggle_split_view());
    assert_eq!(widget.phase(), WidgetPhase::Closed);
    assert_eq!(memory.borrow().body_style("margin-right"), "");
}

#[test]
fn body_margin_round_trip_across_resizes() {
    let (memory, mut widget) = desktop();
    widget.open();
    widget.toggle_split_view();

    for (end_x, expected) in [(800.0, "500px"), (1100.0, "300px"), (600.0, "600px")] {
        let rendered = widget.state().panel_size;
        widget.begin_resize(&mouse(900.0, 300.0), ResizeDirection::Corner, Some(rendered));
        widget.pointer_move(&mouse(end_x, 10.0));
        widget.pointer_up();
        assert_eq!(memory.borrow().body_style("margin-right"), expected);
        assert_eq!(memory.borrow().body_style("transition"), "margin-right 200ms ease-out");
    }
    // Split view never changes the height.
    assert_eq!(widget.state().panel_size.height, 704.0);

    widget.toggle_split_view();
    assert_eq!(memory.borrow().body_style("margin-right"), "");
    assert_eq!(memory.borrow().body_style("transition"), "");
}

#[test]
fn end_resize_is_idempotent() {
    let (memory, mut widget) = desktop();
    widget.open();
    let drag_listeners = || {
        ListenerKind::DRAG
            .iter()
            .map(|kind| memory.borrow().listener_count_of(*kind))
            .sum::<usize>()
    };

    assert_eq!(
        widget.pointer_up(),
        ResizeOutcome::Ignored(ResizeIgnoredReason::NoActiveSession)
    );
    assert_eq!(drag_listeners(), 0);

    widget.begin_resize(&mouse(10.0, 10.0), ResizeDirection::Left, Some(PanelSize::DEFAULT));
    assert_eq!(drag_listeners(), 4);
    assert_eq!(widget.pointer_up(), ResizeOutcome::Ended);
    assert_eq!(drag_listeners(), 0);
    assert_eq!(
        widget.pointer_up(),
        ResizeOutcome::Ignored(ResizeIgnoredReason::NoActiveSession)
    );
    assert_eq!(drag_listeners(), 0);
}

#[test]
fn unmount_mid_drag_in_split_view_reverts_everything() {
    let (memory, mut widget) = desktop();
    memory.borrow_mut().set_body_style("transition", "opacity 1s");
    widget.open();
    widget.toggle_split_view();
    widget.begin_resize(&mouse(900.0, 300.0), ResizeDirection::Left, Some(PanelSize::DEFAULT));
    widget.pointer_move(&mouse(700.0, 300.0));
    assert_eq!(memory.borrow().body_style("margin-right"), "600px");
    assert_eq!(memory.borrow().listener_count(), 5);

    drop(widget);

    let host = memory.borrow();
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.body_style("margin-right"), "");
    assert_eq!(host.body_style("transition"), "opacity 1s");
    assert!(host.meta_tags().is_empty());
}

#[test]
fn mount_inserts_viewport_meta_once() {
    let (memory, widget) = desktop();
    assert_eq!(
        memory.borrow().meta_tags(),
        vec![("viewport", VIEWPORT_META_CONTENT)]
    );
    drop(widget);
    assert!(memory.borrow().meta_tags().is_empty());
}

#[test]
fn mobile_canvas_override_at_breakpoint() {
    let json = r#"{"theme":{"chatWindow":{"fixedCanvasWidth":500}}}"#;
    for (viewport_width, expected) in [
        (768.0, CssLength::FULL_WIDTH),
        (769.0, CssLength::Px(500.0)),
    ] {
        let (_, mut widget) = mount(json, Viewport::new(viewport_width, 900.0));
        widget.open();
        widget.toggle_split_view();
        assert_eq!(widget.panel_box().width, expected, "viewport {viewport_width}");
    }
}

#[test]
fn resize_then_clamp() {
    let (_, mut widget) = desktop();
    widget.open();
    assert_eq!(widget.state().panel_size, PanelSize::new(400.0, 704.0));
    widget.begin_resize(&mouse(600.0, 300.0), ResizeDirection::Left, Some(PanelSize::new(400.0, 704.0)));
    // Pointer moved right by 150px.
    widget.pointer_move(&mouse(750.0, 300.0));
    assert_eq!(widget.state().panel_size, PanelSize::new(300.0, 704.0));
    assert_eq!(widget.panel_box().width, CssLength::Px(300.0));
}

#[test]
fn anchor_clamping() {
    let (_, mut widget) = mount(
        r#"{"theme":{"chatWindow":{"width":410}}}"#,
        Viewport::new(800.0, 900.0),
    );
    widget.set_button_position(Anchor::new(20.0, 50.0));
    assert_eq!(widget.panel_box().right, CssLength::Px(50.0));

    widget.set_button_position(Anchor::new(20.0, 600.0));
    assert_eq!(widget.panel_box().right, CssLength::Px(380.0));
}

#[test]
fn missing_panel_reference_yields_floor() {
    let (_, mut widget) = desktop();
    widget.open();
    widget.begin_resize(&mouse(600.0, 300.0), ResizeDirection::Corner, None);
    widget.pointer_move(&mouse(590.0, 290.0));
    assert_eq!(widget.state().panel_size, PanelSize::MIN);
}

#[derive(Debug, Clone)]
enum Step {
    Open,
    Close,
    Toggle,
    ToggleSplit,
    Begin(ResizeDirection, f64, f64),
    Move(f64, f64),
    Up,
    WindowResize(f64),
}

fn step() -> impl Strategy<Value = Step> {
    let direction = prop_oneof![
        Just(ResizeDirection::Left),
        Just(ResizeDirection::Top),
        Just(ResizeDirection::Corner),
    ];
    prop_oneof![
        Just(Step::Open),
        Just(Step::Close),
        Just(Step::Toggle),
        Just(Step::ToggleSplit),
        (direction, 0.0f64..1600.0, 0.0f64..1000.0).prop_map(|(d, x, y)| Step::Begin(d, x, y)),
        (-500.0f64..2000.0, -500.0f64..1500.0).prop_map(|(x, y)| Step::Move(x, y)),
        Just(Step::Up),
        (320.0f64..1920.0).prop_map(Step::WindowResize),
    ]
}

proptest! {
    #[test]
    fn random_sessions_keep_invariants_and_leave_no_trace(
        steps in prop::collection::vec(step(), 1..60),
    ) {
        let (memory, mut widget) = desktop();
        for step in steps {
            match step {
                Step::Open => { widget.open(); }
                Step::Close => { widget.close(); }
                Step::Toggle => { widget.toggle(); }
                Step::ToggleSplit => { widget.toggle_split_view(); }
                Step::Begin(direction, x, y) => {
                    let rendered = Some(widget.state().panel_size);
                    widget.begin_resize(&mouse(x, y), direction, rendered);
                }
                Step::Move(x, y) => { widget.pointer_move(&mouse(x, y)); }
                Step::Up => { widget.pointer_up(); }
                Step::WindowResize(width) => { widget.window_resized(width, 900.0); }
            }

            let state = widget.state();
            prop_assert!(state.panel_size.is_within_floor());
            prop_assert!(!state.is_split_view || state.is_open);
            prop_assert!(!state.is_open || state.is_started);
            let drag = ListenerKind::DRAG
                .iter()
                .map(|kind| memory.borrow().listener_count_of(*kind))
                .sum::<usize>();
            prop_assert_eq!(drag, if state.is_resizing { 4 } else { 0 });
            if !state.is_split_view {
                prop_assert_eq!(memory.borrow().body_style("margin-right"), "");
            }
        }

        drop(widget);
        let host = memory.borrow();
        prop_assert_eq!(host.listener_count(), 0);
        prop_assert_eq!(host.body_style("margin-right"), "");
        prop_assert_eq!(host.body_style("transition"), "");
        prop_assert!(host.meta_tags().is_empty());
    }
}
