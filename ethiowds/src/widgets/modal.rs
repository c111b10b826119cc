//! Modal dialog widget.
//!
//! A trigger carrying `data-modal-target="<id>"` opens the overlay element
//! with that id. The overlay is open while it has the active class.
//!
//! Several triggers may share one overlay. Open-state bookkeeping lives on
//! the document: the overlay records the body `overflow` it replaced and the
//! opening trigger is the one with `aria-expanded="true"`.

use ethiodom::{Document, Event, EventDetail, EventKind, Key, NodeId, Selector, collect_focusable};
use log::{debug, warn};

use super::{Listeners, Widget};
use crate::config::ModalOptions;
use crate::error::{WidgetError, WidgetKind};

pub const TARGET_ATTR: &str = "data-modal-target";
pub const CLOSE_ATTR: &str = "data-modal-close";
pub const ACTIVE_CLASS: &str = "eth-modal--active";
pub const OPEN_EVENT: &str = "modal:open";
pub const CLOSE_EVENT: &str = "modal:close";
pub const SAVED_OVERFLOW_ATTR: &str = "data-modal-saved-overflow";

/// An overlay dialog opened from a trigger element.
#[derive(Debug, Clone)]
pub struct Modal {
    trigger: NodeId,
    modal_id: String,
    overlay: Option<NodeId>,
    options: ModalOptions,
    listeners: Listeners,
}

impl Modal {
    /// Bind to `trigger` and resolve its target overlay by id.
    ///
    /// A missing overlay yields an inert modal.
    pub fn new(
        doc: &mut Document,
        trigger: NodeId,
        options: ModalOptions,
    ) -> Result<Self, WidgetError> {
        let modal_id = doc.attr(trigger, TARGET_ATTR).unwrap_or_default().to_string();
        let overlay = if modal_id.is_empty() {
            None
        } else {
            doc.get_element_by_id(&modal_id)
        };

        let mut modal = Self {
            trigger,
            modal_id,
            overlay,
            options,
            listeners: Listeners::default(),
        };
        modal.initialize(doc);
        Ok(modal)
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    pub fn modal_id(&self) -> &str {
        &self.modal_id
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.overlay
            .is_some_and(|overlay| doc.has_class(overlay, ACTIVE_CLASS))
    }

    /// Show the overlay, lock page scroll and move focus to the first
    /// focusable element inside it.
    pub fn open(&self, doc: &mut Document) {
        let Some(overlay) = self.overlay else {
            return;
        };
        let was_open = self.is_open(doc);

        doc.add_class(overlay, ACTIVE_CLASS);
        let body = doc.body();
        if !was_open {
            match doc.style(body, "overflow").map(str::to_string) {
                Some(previous) => doc.set_attr(overlay, SAVED_OVERFLOW_ATTR, &previous),
                None => {
                    doc.remove_attr(overlay, SAVED_OVERFLOW_ATTR);
                }
            }
            doc.set_attr(self.trigger, "aria-expanded", "true");
        }
        doc.set_style(body, "overflow", "hidden");
        self.trap_focus(doc, overlay);

        if !was_open {
            debug!("modal {:?} opened", self.modal_id);
            doc.dispatch(overlay, Event::custom(OPEN_EVENT, self.detail(overlay)));
        }
    }

    /// Hide the overlay, restore page scroll and return focus to the
    /// trigger that opened it.
    pub fn close(&self, doc: &mut Document) {
        let Some(overlay) = self.overlay else {
            return;
        };
        if !self.is_open(doc) {
            doc.set_attr(self.trigger, "aria-expanded", "false");
            return;
        }

        let triggers = self.sibling_triggers(doc);
        let opener = triggers
            .iter()
            .copied()
            .find(|&t| doc.attr(t, "aria-expanded") == Some("true"))
            .unwrap_or(self.trigger);

        doc.remove_class(overlay, ACTIVE_CLASS);
        let body = doc.body();
        match doc.attr(overlay, SAVED_OVERFLOW_ATTR).map(str::to_string) {
            Some(previous) => doc.set_style(body, "overflow", &previous),
            None => doc.remove_style(body, "overflow"),
        }
        doc.remove_attr(overlay, SAVED_OVERFLOW_ATTR);
        for trigger in triggers {
            doc.set_attr(trigger, "aria-expanded", "false");
        }
        doc.focus(opener);

        debug!("modal {:?} closed", self.modal_id);
        doc.dispatch(overlay, Event::custom(CLOSE_EVENT, self.detail(overlay)));
    }

    /// Every trigger pointing at this overlay, this one included.
    fn sibling_triggers(&self, doc: &Document) -> Vec<NodeId> {
        let mut triggers: Vec<_> = doc
            .find_all(doc.root(), &Selector::attribute(TARGET_ATTR))
            .into_iter()
            .filter(|&t| doc.attr(t, TARGET_ATTR) == Some(self.modal_id.as_str()))
            .collect();
        if !triggers.contains(&self.trigger) {
            triggers.push(self.trigger);
        }
        triggers
    }

    // Single jump on open; Tab is not confined to the overlay afterwards.
    fn trap_focus(&self, doc: &mut Document, overlay: NodeId) {
        if let Some(&first) = collect_focusable(doc, overlay).first() {
            doc.focus(first);
        }
    }

    fn detail(&self, overlay: NodeId) -> EventDetail {
        EventDetail::new()
            .with_node("modal", overlay)
            .with_node("trigger", self.trigger)
    }
}

impl Widget for Modal {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Modal
    }

    fn root(&self) -> NodeId {
        self.trigger
    }

    fn initialize(&mut self, doc: &mut Document) {
        let Some(overlay) = self.overlay else {
            warn!("modal with id {:?} not found", self.modal_id);
            return;
        };
        if !self.listeners.is_empty() {
            return;
        }

        doc.set_attr(self.trigger, "aria-haspopup", "dialog");
        let expanded = if self.is_open(doc) { "true" } else { "false" };
        doc.set_attr(self.trigger, "aria-expanded", expanded);

        let handle = self.clone();
        self.listeners.track(doc.add_listener(
            self.trigger,
            EventKind::Click,
            move |doc, _| handle.open(doc),
        ));

        for button in doc.find_all(overlay, &Selector::attribute(CLOSE_ATTR)) {
            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                button,
                EventKind::Click,
                move |doc, _| handle.close(doc),
            ));
        }

        if self.options.close_on_backdrop {
            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                overlay,
                EventKind::Click,
                move |doc, event| {
                    // Only clicks on the backdrop itself, not its content
                    if event.target() == Some(overlay) {
                        handle.close(doc);
                    }
                },
            ));
        }

        if self.options.close_on_escape {
            let handle = self.clone();
            let root = doc.root();
            self.listeners.track(doc.add_listener(
                root,
                EventKind::KeyDown,
                move |doc, event| {
                    if event.key() == Some(Key::Escape) && handle.is_open(doc) {
                        handle.close(doc);
                    }
                },
            ));
        }
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.listeners.remove_all(doc);
    }

    fn is_inert(&self) -> bool {
        self.overlay.is_none()
    }

    fn is_destroyed(&self) -> bool {
        self.listeners.is_destroyed()
    }
}
