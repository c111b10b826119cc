//! Accordion widget.
//!
//! Markup: a `[data-accordion]` container holding `[data-accordion-item]`
//! elements, each with one `[data-accordion-trigger]` and one
//! `[data-accordion-content]`. An item is expanded when its trigger has
//! `aria-expanded="true"`, its content is not `hidden` and the item carries
//! the active class; every operation updates all three together.

use ethiodom::{Document, Event, EventDetail, EventKind, NodeId};
use log::{debug, warn};

use super::{Listeners, Widget, next_generated_id};
use crate::config::AccordionOptions;
use crate::error::{WidgetError, WidgetKind};

pub const ITEM_SELECTOR: &str = "[data-accordion-item]";
pub const TRIGGER_SELECTOR: &str = "[data-accordion-trigger]";
pub const CONTENT_SELECTOR: &str = "[data-accordion-content]";
pub const ACTIVE_CLASS: &str = "eth-accordion__item--active";
pub const EXPAND_EVENT: &str = "accordion:expand";
pub const COLLAPSE_EVENT: &str = "accordion:collapse";

/// One accordion item and its two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionItem {
    pub item: NodeId,
    pub trigger: NodeId,
    pub content: NodeId,
}

/// A group of collapsible items, optionally allowing several open at once.
#[derive(Debug, Clone)]
pub struct Accordion {
    container: NodeId,
    options: AccordionOptions,
    items: Vec<AccordionItem>,
    inert: bool,
    listeners: Listeners,
}

impl Accordion {
    /// Discover items under `container` and initialize them collapsed.
    ///
    /// A container without items yields an inert accordion. Items missing a
    /// trigger or a content region are skipped.
    pub fn new(
        doc: &mut Document,
        container: NodeId,
        options: AccordionOptions,
    ) -> Result<Self, WidgetError> {
        let found = doc.query_selector_all(container, ITEM_SELECTOR)?;
        let mut items = Vec::with_capacity(found.len());
        for &item in &found {
            let trigger = doc.query_selector(item, TRIGGER_SELECTOR)?;
            let content = doc.query_selector(item, CONTENT_SELECTOR)?;
            match (trigger, content) {
                (Some(trigger), Some(content)) => items.push(AccordionItem {
                    item,
                    trigger,
                    content,
                }),
                _ => debug!("accordion item {item} lacks a trigger or content, skipping"),
            }
        }

        let inert = items.is_empty();
        let mut accordion = Self {
            container,
            options,
            items,
            inert,
            listeners: Listeners::default(),
        };
        accordion.initialize(doc);
        Ok(accordion)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn options(&self) -> &AccordionOptions {
        &self.options
    }

    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    fn find(&self, item: NodeId) -> Option<AccordionItem> {
        self.items.iter().copied().find(|i| i.item == item)
    }

    pub fn is_expanded(&self, doc: &Document, item: NodeId) -> bool {
        self.find(item)
            .is_some_and(|i| doc.attr(i.trigger, "aria-expanded") == Some("true"))
    }

    /// Item elements currently expanded, in document order.
    pub fn expanded_items(&self, doc: &Document) -> Vec<NodeId> {
        self.items
            .iter()
            .filter(|i| doc.attr(i.trigger, "aria-expanded") == Some("true"))
            .map(|i| i.item)
            .collect()
    }

    pub fn toggle_item(&self, doc: &mut Document, item: NodeId) {
        if self.is_expanded(doc, item) {
            self.collapse_item(doc, item);
        } else {
            self.expand_item(doc, item);
        }
    }

    /// Expand `item`. Without `multiple`, every other expanded item is
    /// collapsed first.
    pub fn expand_item(&self, doc: &mut Document, item: NodeId) {
        let Some(target) = self.find(item) else {
            debug!("{item} is not an item of accordion {}", self.container);
            return;
        };

        if !self.options.multiple {
            for other in self.items.iter().filter(|i| i.item != item) {
                self.collapse_item(doc, other.item);
            }
        }

        let was_expanded = self.is_expanded(doc, item);
        self.apply(doc, target, true);
        if !was_expanded {
            self.notify(doc, EXPAND_EVENT, target);
        }
    }

    pub fn collapse_item(&self, doc: &mut Document, item: NodeId) {
        let Some(target) = self.find(item) else {
            debug!("{item} is not an item of accordion {}", self.container);
            return;
        };

        let was_expanded = self.is_expanded(doc, item);
        self.apply(doc, target, false);
        if was_expanded {
            self.notify(doc, COLLAPSE_EVENT, target);
        }
    }

    /// Expand every item. Does nothing unless `multiple` is set.
    pub fn expand_all(&self, doc: &mut Document) {
        if !self.options.multiple {
            debug!("expand_all ignored on single-open accordion {}", self.container);
            return;
        }
        for item in &self.items {
            self.expand_item(doc, item.item);
        }
    }

    pub fn collapse_all(&self, doc: &mut Document) {
        for item in &self.items {
            self.collapse_item(doc, item.item);
        }
    }

    fn apply(&self, doc: &mut Document, item: AccordionItem, expanded: bool) {
        doc.set_attr(item.trigger, "aria-expanded", if expanded { "true" } else { "false" });
        doc.set_hidden(item.content, !expanded);
        doc.toggle_class(item.item, ACTIVE_CLASS, Some(expanded));
    }

    fn notify(&self, doc: &mut Document, name: &str, item: AccordionItem) {
        let detail = EventDetail::new()
            .with_node("item", item.item)
            .with_node("trigger", item.trigger)
            .with_node("content", item.content);
        doc.dispatch(self.container, Event::custom(name, detail));
    }
}

impl Widget for Accordion {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Accordion
    }

    fn root(&self) -> NodeId {
        self.container
    }

    fn initialize(&mut self, doc: &mut Document) {
        if self.inert {
            warn!("no accordion items found in {}", self.container);
            return;
        }
        if !self.listeners.is_empty() {
            return;
        }

        for item in self.items.clone() {
            let existing = doc.id_of(item.content).map(str::to_string);
            let content_id = match existing {
                Some(id) => id,
                None => {
                    let id = next_generated_id("accordion-content");
                    doc.set_id(item.content, &id);
                    id
                }
            };
            doc.set_attr(item.trigger, "aria-controls", &content_id);
            self.apply(doc, item, false);

            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                item.trigger,
                EventKind::Click,
                move |doc, _| handle.toggle_item(doc, item.item),
            ));

            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                item.trigger,
                EventKind::KeyDown,
                move |doc, event| {
                    if event.key().is_some_and(|k| k.is_activation()) {
                        event.prevent_default();
                        handle.toggle_item(doc, item.item);
                    }
                },
            ));
        }
        debug!(
            "accordion {} initialized with {} items",
            self.container,
            self.items.len()
        );
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.listeners.remove_all(doc);
    }

    fn is_inert(&self) -> bool {
        self.inert
    }

    fn is_destroyed(&self) -> bool {
        self.listeners.is_destroyed()
    }
}
