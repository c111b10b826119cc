//! Listener registration and event dispatch.
//!
//! Dispatch is synchronous and single-threaded: every listener runs to
//! completion with `&mut Document` before the next one is invoked.

use std::rc::Rc;

use crate::document::{Document, NodeId};
use crate::event::{Event, EventKind, Key};

/// Event listener callback.
pub type Handler = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle for removing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

pub(crate) struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

impl Document {
    /// Register a listener for `kind` events reaching `node`.
    pub fn add_listener<F>(&mut self, node: NodeId, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(node).or_default().push(Listener {
            id,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    /// Returns true if the listener existed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|l| l.id != id);
            removed |= listeners.len() != before;
            !listeners.is_empty()
        });
        removed
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners
            .values()
            .any(|listeners| listeners.iter().any(|l| l.id == id))
    }

    /// Total number of registered listeners across all nodes.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Dispatch `event` at `target`.
    ///
    /// The propagation path (target, then ancestors when the event bubbles)
    /// is fixed before any listener runs. Each node's listeners are
    /// snapshotted when the event reaches it; a listener removed by an
    /// earlier one in the same pass is skipped.
    pub fn dispatch(&mut self, target: NodeId, mut event: Event) -> Event {
        event.set_target(target);
        let path = if event.does_bubble() {
            self.path_to_root(target)
        } else {
            vec![target]
        };

        for node in path {
            let handlers: Vec<(ListenerId, Handler)> = self
                .listeners
                .get(&node)
                .map(|listeners| {
                    listeners
                        .iter()
                        .filter(|l| l.kind == *event.kind())
                        .map(|l| (l.id, Rc::clone(&l.handler)))
                        .collect()
                })
                .unwrap_or_default();

            event.set_current_target(node);
            for (id, handler) in handlers {
                if !self.has_listener(id) {
                    continue;
                }
                handler(self, &mut event);
            }

            if event.propagation_stopped() {
                break;
            }
        }

        event
    }

    pub fn click(&mut self, node: NodeId) -> Event {
        self.dispatch(node, Event::click())
    }

    pub fn key_down(&mut self, node: NodeId, key: Key) -> Event {
        self.dispatch(node, Event::key_down(key))
    }

    /// Key press delivered to the focused element, or the body when nothing
    /// has focus.
    pub fn key_down_focused(&mut self, key: Key) -> Event {
        let target = self.active_element().unwrap_or(self.body());
        self.key_down(target, key)
    }

    pub fn input(&mut self, node: NodeId) -> Event {
        self.dispatch(node, Event::input())
    }

    pub fn change(&mut self, node: NodeId) -> Event {
        self.dispatch(node, Event::change())
    }
}
