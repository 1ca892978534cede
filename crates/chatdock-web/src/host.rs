#![forbid(unsafe_code)]

//! Host document abstraction.
//!
//! The widget never touches the browser directly. Every read or mutation of
//! the host page (head meta tags, body inline style, global listeners,
//! window size) goes through [`HostDocument`]. The browser binding
//! implements it over `web-sys`; [`MemoryHost`] implements it in memory for
//! native embedders and tests, and counts live listeners so leaks can be
//! asserted.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chatdock_core::{PointerPosition, Viewport};

use crate::resize::PointerInput;

/// Identifier for one registered global listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Identifier for one inserted head meta tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaTagId(pub u64);

/// Global (window-level) signals the widget listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    MouseMove,
    MouseUp,
    TouchMove,
    TouchEnd,
    WindowResize,
}

impl ListenerKind {
    /// Listeners that exist only while a drag session is active.
    pub const DRAG: [Self; 4] = [Self::MouseMove, Self::MouseUp, Self::TouchMove, Self::TouchEnd];

    /// DOM event type name.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::WindowResize => "resize",
        }
    }
}

/// Event delivered by the host to a registered listener.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PointerMove(PointerInput),
    PointerUp,
    WindowResize { width: f64, height: f64 },
}

/// Mutable view of the page embedding the widget.
pub trait HostDocument {
    /// Append `<meta name=.. content=..>` to the document head.
    fn append_meta(&mut self, name: &str, content: &str) -> MetaTagId;

    /// Remove a previously appended meta tag. Unknown ids are ignored.
    fn remove_meta(&mut self, id: MetaTagId);

    /// Current inline value of a body style property (empty when unset).
    fn body_style(&self, property: &str) -> String;

    /// Set a body style property; an empty value clears it.
    fn set_body_style(&mut self, property: &str, value: &str);

    /// Register a global listener of `kind`.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Deregister a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// Current window inner size.
    fn viewport(&self) -> Viewport;
}

/// Shared single-threaded handle to the host document.
pub type SharedHost = Rc<RefCell<dyn HostDocument>>;

/// Deterministic in-memory host.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    viewport: Viewport,
    body_style: BTreeMap<String, String>,
    head_meta: BTreeMap<MetaTagId, (String, String)>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    next_id: u64,
}

impl MemoryHost {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Change the window size. Listeners are not invoked; the embedder
    /// forwards the resize to the controller itself.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    /// Inserted meta tags as `(name, content)` in insertion order.
    #[must_use]
    pub fn meta_tags(&self) -> Vec<(&str, &str)> {
        self.head_meta
            .values()
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect()
    }

    /// Events a real host would deliver to the currently registered
    /// listeners for one pointer move.
    #[must_use]
    pub fn pointer_move_event(&self, x: f64, y: f64) -> Option<HostEvent> {
        let position = PointerPosition::new(x, y);
        (self.listener_count_of(ListenerKind::MouseMove) > 0)
            .then_some(HostEvent::PointerMove(PointerInput::Mouse(position)))
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl HostDocument for MemoryHost {
    fn append_meta(&mut self, name: &str, content: &str) -> MetaTagId {
        let id = MetaTagId(self.next());
        self.head_meta
            .insert(id, (name.to_owned(), content.to_owned()));
        id
    }

    fn remove_meta(&mut self, id: MetaTagId) {
        self.head_meta.remove(&id);
    }

    fn body_style(&self, property: &str) -> String {
        self.body_style.get(property).cloned().unwrap_or_default()
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.body_style.remove(property);
        } else {
            self.body_style.insert(property.to_owned(), value.to_owned());
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
