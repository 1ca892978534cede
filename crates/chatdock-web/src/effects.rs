#![forbid(unsafe_code)]

//! Scoped host-document side effects.
//!
//! Each guard performs its mutation on acquisition and reverts it on drop,
//! so every exit path (explicit release, controller teardown, unwinding)
//! restores the host page. Drops never panic: if the host is already
//! borrowed the reversal is skipped and logged.

use chatdock_layout::BodyPush;

use crate::host::{ListenerId, ListenerKind, MetaTagId, SharedHost};

/// Content of the viewport meta tag injected on mount.
pub const VIEWPORT_META_CONTENT: &str =
    "width=device-width, initial-scale=1.0, interactive-widget=resizes-content";

const MARGIN_RIGHT: &str = "margin-right";
const TRANSITION: &str = "transition";

/// Owns one `<meta name="viewport">` tag in the host head.
pub struct MetaTagGuard {
    host: SharedHost,
    id: MetaTagId,
}

impl MetaTagGuard {
    pub fn acquire(host: &SharedHost) -> Self {
        let id = host
            .borrow_mut()
            .append_meta("viewport", VIEWPORT_META_CONTENT);
        tracing::debug!(target: "chatdock.effect", meta_id = id.0, "viewport meta tag inserted");
        Self {
            host: SharedHost::clone(host),
            id,
        }
    }
}

impl Drop for MetaTagGuard {
    fn drop(&mut self) {
        match self.host.try_borrow_mut() {
            Ok(mut host) => {
                host.remove_meta(self.id);
                tracing::debug!(target: "chatdock.effect", meta_id = self.id.0, "viewport meta tag removed");
            }
            Err(_) => tracing::warn!(
                target: "chatdock.effect",
                meta_id = self.id.0,
                "host busy; viewport meta tag left in place"
            ),
        }
    }
}

impl std::fmt::Debug for MetaTagGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaTagGuard").field("id", &self.id).finish()
    }
}

/// Owns the host body's `margin-right` and `transition` while split view
/// pushes the page aside.
///
/// The values found at acquisition are restored on drop.
pub struct BodyStyleGuard {
    host: SharedHost,
    previous_margin: String,
    previous_transition: String,
    applied_margin: String,
}

impl BodyStyleGuard {
    pub fn acquire(host: &SharedHost, push: &BodyPush) -> Self {
        let (previous_margin, previous_transition) = {
            let host = host.borrow();
            (host.body_style(MARGIN_RIGHT), host.body_style(TRANSITION))
        };
        let mut guard = Self {
            host: SharedHost::clone(host),
            previous_margin,
            previous_transition,
            applied_margin: String::new(),
        };
        guard.apply(push);
        guard
    }

    /// Re-apply the push. Repeating an identical push touches nothing.
    pub fn apply(&mut self, push: &BodyPush) {
        let margin = push.margin_right.to_string();
        if margin == self.applied_margin {
            return;
        }
        {
            let mut host = self.host.borrow_mut();
            host.set_body_style(MARGIN_RIGHT, &margin);
            host.set_body_style(TRANSITION, push.transition());
        }
        tracing::trace!(target: "chatdock.effect", margin_right = %margin, "body pushed");
        self.applied_margin = margin;
    }

    /// Margin currently applied by this guard.
    #[must_use]
    pub fn applied_margin(&self) -> &str {
        &self.applied_margin
    }
}

impl Drop for BodyStyleGuard {
    fn drop(&mut self) {
        match self.host.try_borrow_mut() {
            Ok(mut host) => {
                host.set_body_style(MARGIN_RIGHT, &self.previous_margin);
                host.set_body_style(TRANSITION, &self.previous_transition);
                tracing::debug!(target: "chatdock.effect", "body push released");
            }
            Err(_) => tracing::warn!(
                target: "chatdock.effect",
                margin_right = %self.applied_margin,
                "host busy; body push left in place"
            ),
        }
    }
}

impl std::fmt::Debug for BodyStyleGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyStyleGuard")
            .field("applied_margin", &self.applied_margin)
            .finish_non_exhaustive()
    }
}

/// A set of global listeners deregistered together on drop.
pub struct ListenerSet {
    host: SharedHost,
    ids: Vec<(ListenerKind, ListenerId)>,
}

impl ListenerSet {
    pub fn register(host: &SharedHost, kinds: &[ListenerKind]) -> Self {
        let ids: Vec<_> = {
            let mut h = host.borrow_mut();
            kinds.iter().map(|&kind| (kind, h.add_listener(kind))).collect()
        };
        Self {
            host: SharedHost::clone(host),
            ids,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ListenerKind> + '_ {
        self.ids.iter().map(|(kind, _)| *kind)
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        match self.host.try_borrow_mut() {
            Ok(mut host) => {
                for (_, id) in self.ids.drain(..) {
                    host.remove_listener(id);
                }
            }
            Err(_) => tracing::warn!(
                target: "chatdock.effect",
                leaked = self.ids.len() as u64,
                "host busy; listeners not deregistered"
            ),
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
