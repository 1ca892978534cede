#![forbid(unsafe_code)]

//! Publication of resolved panel boxes to renderers.
//!
//! [`LayoutFeed`] caches the last [`PanelBox`] resolved for the widget and
//! the observers that paint it onto the panel element. The controller
//! publishes exactly once per committed state change.
//!
//! # Invariants
//!
//! 1. Observers run at most once per publication, in registration order.
//! 2. A publication whose box equals the cached one is silent. Commits that
//!    only touch non-visual fields (resize direction, `is_started`) never
//!    reach observers.
//! 3. Dropping a [`LayoutSubscription`] removes its observer immediately.
//!    An observer dropped from inside a notification still receives that
//!    notification, but no later one.
//!
//! # Failure Modes
//!
//! - **Observer list busy on drop**: a subscription dropped while the list
//!   is borrowed leaves its entry in place and logs a warning. The list is
//!   never borrowed while observers run, so this only happens if a caller
//!   holds the feed across a drop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chatdock_layout::PanelBox;

type Observer = Rc<dyn Fn(&PanelBox)>;

struct ObserverList {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

/// Last resolved panel box plus the observers that render it.
pub struct LayoutFeed {
    current: PanelBox,
    revision: u64,
    observers: Rc<RefCell<ObserverList>>,
}

impl LayoutFeed {
    #[must_use]
    pub fn new(initial: PanelBox) -> Self {
        Self {
            current: initial,
            revision: 0,
            observers: Rc::new(RefCell::new(ObserverList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// The most recently published box.
    #[must_use]
    pub const fn current(&self) -> &PanelBox {
        &self.current
    }

    /// Number of publications that changed the box.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().entries.len()
    }

    /// Register `observer`. Dropping the returned guard unregisters it.
    pub fn subscribe(&self, observer: impl Fn(&PanelBox) + 'static) -> LayoutSubscription {
        let mut list = self.observers.borrow_mut();
        list.next_id += 1;
        let id = list.next_id;
        list.entries.push((id, Rc::new(observer)));
        LayoutSubscription {
            id,
            list: Rc::downgrade(&self.observers),
        }
    }

    /// Replace the cached box and notify observers if it changed.
    ///
    /// Returns whether observers were notified.
    pub fn publish(&mut self, next: PanelBox) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        self.revision += 1;

        // Snapshot so observers may subscribe or unsubscribe while running.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .entries
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        let _span = tracing::trace_span!(
            "chatdock.layout.notify",
            revision = self.revision,
            observers = observers.len()
        )
        .entered();
        for observer in &observers {
            observer(&self.current);
        }
        true
    }
}

impl std::fmt::Debug for LayoutFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutFeed")
            .field("current", &self.current)
            .field("revision", &self.revision)
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Keeps a [`LayoutFeed`] observer registered while alive.
#[must_use = "dropping the subscription unregisters the observer"]
pub struct LayoutSubscription {
    id: u64,
    list: Weak<RefCell<ObserverList>>,
}

impl Drop for LayoutSubscription {
    fn drop(&mut self) {
        let Some(list) = self.list.upgrade() else {
            return;
        };
        let Ok(mut list) = list.try_borrow_mut() else {
            tracing::warn!(target: "chatdock.widget", id = self.id, "observer list busy, subscription leaked");
            return;
        };
        list.entries.retain(|(id, _)| *id != self.id);
    }
}

impl std::fmt::Debug for LayoutSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
