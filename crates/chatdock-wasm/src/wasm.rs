#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for [`ChatDock`].
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use chatdock_core::{Anchor, PointerPosition, Viewport, WidgetConfig};
use chatdock_layout::PanelBox;
use chatdock_web::{
    HostDocument, HostEvent, LayoutSubscription, ListenerId, ListenerKind, MetaTagId, PointerInput,
    SharedHost, WidgetController,
};
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, TouchEvent, Window};

use crate::bridge::{WidgetSnapshot, outcome_label, parse_direction, rendered_size};

type EventClosure = Closure<dyn FnMut(Event)>;
type ControllerSlot = RefCell<Option<WidgetController>>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "chatdock panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("chatdock panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn touch_points(event: &TouchEvent) -> Vec<PointerPosition> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| PointerPosition::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

fn pointer_input(event: &Event) -> Option<PointerInput> {
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        return Some(PointerInput::Touch(touch_points(touch)));
    }
    event.dyn_ref::<MouseEvent>().map(|mouse| {
        PointerInput::Mouse(PointerPosition::new(
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        ))
    })
}

fn window_viewport(window: &Window) -> Viewport {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

fn translate(kind: ListenerKind, event: &Event, window: &Window) -> Option<HostEvent> {
    match kind {
        ListenerKind::MouseMove | ListenerKind::TouchMove => {
            pointer_input(event).map(HostEvent::PointerMove)
        }
        ListenerKind::MouseUp | ListenerKind::TouchEnd => Some(HostEvent::PointerUp),
        ListenerKind::WindowResize => {
            let viewport = window_viewport(window);
            Some(HostEvent::WindowResize {
                width: viewport.width,
                height: viewport.height,
            })
        }
    }
}

fn apply_panel_box(panel: &HtmlElement, panel_box: &PanelBox) {
    let style = panel.style();
    for (property, value) in panel_box.declarations() {
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, &value)
        };
        if result.is_err() {
            tracing::warn!(target: "chatdock.effect", property, "panel style rejected");
        }
    }
}

/// [`HostDocument`] over the live browser window.
struct WasmHost {
    window: Window,
    document: Document,
    controller: Weak<ControllerSlot>,
    metas: HashMap<MetaTagId, Element>,
    listeners: HashMap<ListenerId, (ListenerKind, EventClosure)>,
    /// Closures deregistered from inside their own invocation; freed on the
    /// next registration.
    graveyard: Vec<EventClosure>,
    next_id: u64,
}

impl WasmHost {
    fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            controller: Weak::new(),
            metas: HashMap::new(),
            listeners: HashMap::new(),
            graveyard: Vec::new(),
            next_id: 0,
        }
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }
}

impl HostDocument for WasmHost {
    fn append_meta(&mut self, name: &str, content: &str) -> MetaTagId {
        let id = MetaTagId(self.next());
        let inserted = self.document.create_element("meta").ok().and_then(|meta| {
            meta.set_attribute("name", name).ok()?;
            meta.set_attribute("content", content).ok()?;
            self.document.head()?.append_child(&meta).ok()?;
            Some(meta)
        });
        match inserted {
            Some(meta) => {
                self.metas.insert(id, meta);
            }
            None => tracing::warn!(target: "chatdock.effect", name, "meta tag not inserted"),
        }
        id
    }

    fn remove_meta(&mut self, id: MetaTagId) {
        if let Some(meta) = self.metas.remove(&id) {
            meta.remove();
        }
    }

    fn body_style(&self, property: &str) -> String {
        self.body()
            .and_then(|body| body.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if result.is_err() {
            tracing::warn!(target: "chatdock.effect", property, "body style rejected");
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.graveyard.clear();
        let id = ListenerId(self.next());
        let controller = Weak::clone(&self.controller);
        let window = self.window.clone();
        let closure = EventClosure::new(move |event: Event| {
            let Some(slot) = controller.upgrade() else {
                return;
            };
            let Some(host_event) = translate(kind, &event, &window) else {
                return;
            };
            // A reentrant dispatch (the controller is already borrowed) is dropped.
            let Ok(mut guard) = slot.try_borrow_mut() else {
                return;
            };
            if let Some(widget) = guard.as_mut() {
                widget.handle_event(host_event);
            }
        });
        if self
            .window
            .add_event_listener_with_callback(kind.event_type(), closure.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!(target: "chatdock.effect", event = kind.event_type(), "listener not registered");
        }
        self.listeners.insert(id, (kind, closure));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let Some((kind, closure)) = self.listeners.remove(&id) else {
            return;
        };
        let _ = self
            .window
            .remove_event_listener_with_callback(kind.event_type(), closure.as_ref().unchecked_ref());
        self.graveyard.push(closure);
    }

    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }
}

/// The chat widget mounted over a panel element.
#[wasm_bindgen]
pub struct ChatDock {
    slot: Rc<ControllerSlot>,
    host: Rc<RefCell<WasmHost>>,
    panel: HtmlElement,
    layout: Option<LayoutSubscription>,
}

#[wasm_bindgen]
impl ChatDock {
    /// Mount the widget. `config_json` is the host theme configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, panel: HtmlElement) -> Result<ChatDock, JsValue> {
        install_panic_hook();
        let config =
            WidgetConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let slot: Rc<ControllerSlot> = Rc::new(RefCell::new(None));
        let host = Rc::new(RefCell::new(WasmHost::new(window, document)));
        host.borrow_mut().controller = Rc::downgrade(&slot);
        let shared: SharedHost = host.clone();

        let widget = WidgetController::mount(config, &shared);
        apply_panel_box(&panel, &widget.panel_box());
        let target = panel.clone();
        let layout = widget.subscribe(move |panel_box| apply_panel_box(&target, panel_box));
        *slot.borrow_mut() = Some(widget);

        Ok(Self {
            slot,
            host,
            panel,
            layout: Some(layout),
        })
    }

    fn with_widget<R>(&self, f: impl FnOnce(&mut WidgetController) -> R) -> Option<R> {
        let mut guard = self.slot.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    }

    pub fn open(&self) -> bool {
        self.with_widget(WidgetController::open).unwrap_or(false)
    }

    pub fn close(&self) -> bool {
        self.with_widget(WidgetController::close).unwrap_or(false)
    }

    pub fn toggle(&self) -> bool {
        self.with_widget(WidgetController::toggle).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = toggleSplitView)]
    pub fn toggle_split_view(&self) -> bool {
        self.with_widget(WidgetController::toggle_split_view)
            .unwrap_or(false)
    }

    /// Record the toggle button's new offsets after a button drag.
    #[wasm_bindgen(js_name = setButtonPosition)]
    pub fn set_button_position(&self, bottom: f64, right: f64) -> bool {
        self.with_widget(|w| w.set_button_position(Anchor::new(bottom, right)))
            .unwrap_or(false)
    }

    /// Start a resize from a handle's `mousedown`/`touchstart` event.
    ///
    /// Returns the outcome label (`started`, `superseded`, `handle_disabled`, ...).
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&self, event: Event, direction: &str) -> String {
        let Some(direction) = parse_direction(direction) else {
            return "unknown_direction".to_owned();
        };
        event.prevent_default();
        let Some(input) = pointer_input(&event) else {
            return "missing_pointer".to_owned();
        };
        // Layout size, unaffected by the open animation's scale transform.
        let rendered = rendered_size(
            f64::from(self.panel.offset_width()),
            f64::from(self.panel.offset_height()),
        );
        self.with_widget(|w| outcome_label(w.begin_resize(&input, direction, rendered)))
            .unwrap_or("unavailable")
            .to_owned()
    }

    /// JSON snapshot for the button, tooltip, conversation view and handles.
    pub fn snapshot(&self) -> String {
        self.with_widget(|w| WidgetSnapshot::capture(w).to_json())
            .unwrap_or_else(|| "null".to_owned())
    }

    #[wasm_bindgen(js_name = customCss)]
    pub fn custom_css(&self) -> Option<String> {
        self.with_widget(|w| w.custom_css().map(str::to_owned))
            .flatten()
    }

    /// Unmount and revert every host side effect. Idempotent.
    pub fn destroy(&mut self) {
        self.layout = None;
        let widget = self.slot.borrow_mut().take();
        drop(widget);
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.graveyard.clear();
        }
    }
}

impl Drop for ChatDock {
    fn drop(&mut self) {
        self.destroy();
    }
}
