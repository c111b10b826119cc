//! Custom select widget.
//!
//! Replaces a native `<select>` with a synthesized dropdown inserted right
//! after it. The native element stays in the document, hidden, and remains
//! the source of truth for the value: picking an option writes back to it
//! and fires `change` on it, and external changes to it are mirrored into
//! the visible label.

use std::cell::RefCell;
use std::rc::Rc;

use ethiodom::{Document, Element, Event, EventKind, NodeId};
use log::debug;

use super::{Listeners, Widget};
use crate::config::SelectOptions;
use crate::error::{WidgetError, WidgetKind};

pub const WRAPPER_CLASS: &str = "eth-select";
pub const TRIGGER_CLASS: &str = "eth-select__trigger";
pub const TRIGGER_OPEN_CLASS: &str = "eth-select__trigger--open";
pub const VALUE_CLASS: &str = "eth-select__value";
pub const CHEVRON_CLASS: &str = "eth-select__chevron";
pub const DROPDOWN_CLASS: &str = "eth-select__dropdown";
pub const SEARCH_CLASS: &str = "eth-select__search";
pub const SEARCH_INPUT_CLASS: &str = "eth-select__search-input";
pub const OPTIONS_CLASS: &str = "eth-select__options";
pub const OPTION_CLASS: &str = "eth-select__option";
pub const OPTION_SELECTED_CLASS: &str = "eth-select__option--selected";

/// Node ids of the synthesized markup.
#[derive(Debug, Clone)]
struct Parts {
    wrapper: NodeId,
    trigger: NodeId,
    label: NodeId,
    dropdown: NodeId,
    search: Option<NodeId>,
    options: Vec<NodeId>,
}

/// A styled dropdown mirroring a native `<select>`.
#[derive(Debug, Clone)]
pub struct Select {
    native: NodeId,
    options: SelectOptions,
    /// Cleared by `destroy`, for every clone at once.
    parts: Rc<RefCell<Option<Parts>>>,
    listeners: Listeners,
}

impl Select {
    /// Synthesize the dropdown for `native` and hide the native element.
    ///
    /// Fails if `native` is not an attached `<select>` or has no options.
    pub fn new(
        doc: &mut Document,
        native: NodeId,
        options: SelectOptions,
    ) -> Result<Self, WidgetError> {
        if doc.tag(native) != Some("select") {
            return Err(WidgetError::InvalidElement {
                kind: WidgetKind::Select,
                element: native,
                reason: "not a <select> element",
            });
        }
        if doc.parent(native).is_none() {
            return Err(WidgetError::InvalidElement {
                kind: WidgetKind::Select,
                element: native,
                reason: "element is not attached",
            });
        }
        if doc.options(native).is_empty() {
            return Err(WidgetError::NoOptions(native));
        }

        let markup = Self::markup(doc, native, &options);
        let wrapper = doc.mount_after(native, &markup);
        doc.set_style(native, "display", "none");

        let parts = Parts {
            wrapper,
            trigger: Self::part(doc, wrapper, TRIGGER_CLASS)?,
            label: Self::part(doc, wrapper, VALUE_CLASS)?,
            dropdown: Self::part(doc, wrapper, DROPDOWN_CLASS)?,
            search: doc.query_selector(wrapper, &format!(".{SEARCH_INPUT_CLASS}"))?,
            options: doc.query_selector_all(wrapper, &format!(".{OPTION_CLASS}"))?,
        };

        let mut select = Self {
            native,
            options,
            parts: Rc::new(RefCell::new(Some(parts))),
            listeners: Listeners::default(),
        };
        select.initialize(doc);
        Ok(select)
    }

    fn part(doc: &Document, wrapper: NodeId, class: &str) -> Result<NodeId, WidgetError> {
        doc.query_selector(wrapper, &format!(".{class}"))?
            .ok_or(WidgetError::InvalidElement {
                kind: WidgetKind::Select,
                element: wrapper,
                reason: "synthesized markup is incomplete",
            })
    }

    fn markup(doc: &Document, native: NodeId, options: &SelectOptions) -> Element {
        let selected = doc.selected_index(native);
        let mut label = options.placeholder.clone();

        let mut list = Element::ul().class(OPTIONS_CLASS);
        for (index, option) in doc.options(native).into_iter().enumerate() {
            let text = doc.text_content(option);
            let mut item = Element::li()
                .class(OPTION_CLASS)
                .attr("role", "option")
                .attr("data-value", doc.option_value(option));
            if selected == Some(index) {
                item = item
                    .class(OPTION_SELECTED_CLASS)
                    .attr("aria-selected", "true");
                if !text.trim().is_empty() {
                    label = text.clone();
                }
            } else {
                item = item.attr("aria-selected", "false");
            }
            list = list.child(item.text(text));
        }

        let trigger = Element::button()
            .class(TRIGGER_CLASS)
            .attr("aria-haspopup", "listbox")
            .attr("aria-expanded", "false")
            .child(Element::span().class(VALUE_CLASS).text(label))
            .child(Element::span().class(CHEVRON_CLASS).text("▼"));

        let mut dropdown = Element::div()
            .class(DROPDOWN_CLASS)
            .attr("role", "listbox")
            .style("display", "none");
        if options.searchable {
            dropdown = dropdown.child(
                Element::div().class(SEARCH_CLASS).child(
                    Element::input()
                        .attr("type", "text")
                        .attr("placeholder", "Search...")
                        .class(SEARCH_INPUT_CLASS),
                ),
            );
        }

        Element::div()
            .class(WRAPPER_CLASS)
            .child(trigger)
            .child(dropdown.child(list))
    }

    pub fn native(&self) -> NodeId {
        self.native
    }

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    // Cloned out so no borrow is held while listeners run.
    fn parts(&self) -> Option<Parts> {
        self.parts.borrow().clone()
    }

    /// The synthesized wrapper, until the widget is destroyed.
    pub fn wrapper(&self) -> Option<NodeId> {
        self.parts.borrow().as_ref().map(|p| p.wrapper)
    }

    pub fn trigger(&self) -> Option<NodeId> {
        self.parts.borrow().as_ref().map(|p| p.trigger)
    }

    pub fn search_input(&self) -> Option<NodeId> {
        self.parts.borrow().as_ref().and_then(|p| p.search)
    }

    /// Synthesized option elements, index-aligned with the native options.
    pub fn option_elements(&self) -> Vec<NodeId> {
        self.parts
            .borrow()
            .as_ref()
            .map(|p| p.options.clone())
            .unwrap_or_default()
    }

    pub fn selected_value(&self, doc: &Document) -> String {
        doc.value(self.native)
    }

    /// Text currently shown on the trigger.
    pub fn label(&self, doc: &Document) -> String {
        self.parts
            .borrow()
            .as_ref()
            .map(|p| doc.text_content(p.label))
            .unwrap_or_default()
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.parts
            .borrow()
            .as_ref()
            .is_some_and(|p| doc.style(p.dropdown, "display") == Some("block"))
    }

    pub fn toggle_dropdown(&self, doc: &mut Document) {
        if self.is_open(doc) {
            self.close_dropdown(doc);
        } else {
            self.open_dropdown(doc);
        }
    }

    pub fn open_dropdown(&self, doc: &mut Document) {
        self.set_open(doc, true);
    }

    pub fn close_dropdown(&self, doc: &mut Document) {
        self.set_open(doc, false);
    }

    fn set_open(&self, doc: &mut Document, open: bool) {
        let Some(parts) = self.parts() else {
            return;
        };
        doc.set_style(parts.dropdown, "display", if open { "block" } else { "none" });
        doc.toggle_class(parts.trigger, TRIGGER_OPEN_CLASS, Some(open));
        doc.set_attr(parts.trigger, "aria-expanded", if open { "true" } else { "false" });
    }

    /// Make `option` the selection: update the label and marks, write the
    /// value to the native element, fire `change` on it and close.
    pub fn select_option(&self, doc: &mut Document, option: NodeId) {
        let Some(parts) = self.parts() else {
            return;
        };
        if !parts.options.contains(&option) {
            debug!("{option} is not an option of select {}", self.native);
            return;
        }

        let value = doc.attr(option, "data-value").unwrap_or_default().to_string();
        let text = doc.text_content(option);
        doc.set_text_content(parts.label, &text);
        self.mark_selected(doc, &parts, Some(option));

        doc.set_value(self.native, &value);
        doc.dispatch(self.native, Event::change());
        self.close_dropdown(doc);
    }

    fn mark_selected(&self, doc: &mut Document, parts: &Parts, selected: Option<NodeId>) {
        for &option in &parts.options {
            let is_selected = Some(option) == selected;
            doc.toggle_class(option, OPTION_SELECTED_CLASS, Some(is_selected));
            doc.set_attr(option, "aria-selected", if is_selected { "true" } else { "false" });
        }
    }

    /// Mirror the native element's current selection into the label and
    /// option marks.
    pub fn sync_with_native(&self, doc: &mut Document) {
        let Some(parts) = self.parts() else {
            return;
        };
        let Some(index) = doc.selected_index(self.native) else {
            return;
        };
        if let Some(&native_option) = doc.options(self.native).get(index) {
            let text = doc.text_content(native_option);
            doc.set_text_content(parts.label, &text);
        }
        self.mark_selected(doc, &parts, parts.options.get(index).copied());
    }

    /// Hide options whose text does not contain `query` (case-insensitive).
    pub fn filter_options(&self, doc: &mut Document, query: &str) {
        let Some(parts) = self.parts() else {
            return;
        };
        let query = query.trim().to_lowercase();
        for &option in &parts.options {
            let visible = query.is_empty() || doc.text_content(option).to_lowercase().contains(&query);
            doc.set_hidden(option, !visible);
        }
    }
}

impl Widget for Select {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Select
    }

    fn root(&self) -> NodeId {
        self.native
    }

    fn initialize(&mut self, doc: &mut Document) {
        let Some(parts) = self.parts() else {
            return;
        };
        if !self.listeners.is_empty() {
            return;
        }

        let handle = self.clone();
        self.listeners.track(doc.add_listener(
            parts.trigger,
            EventKind::Click,
            move |doc, event| {
                event.stop_propagation();
                handle.toggle_dropdown(doc);
            },
        ));

        let handle = self.clone();
        self.listeners.track(doc.add_listener(
            parts.trigger,
            EventKind::KeyDown,
            move |doc, event| {
                if event.key().is_some_and(|k| k.is_activation()) {
                    event.prevent_default();
                    handle.toggle_dropdown(doc);
                }
            },
        ));

        for &option in &parts.options {
            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                option,
                EventKind::Click,
                move |doc, _| handle.select_option(doc, option),
            ));
        }

        // One document-level listener per instance
        let handle = self.clone();
        let wrapper = parts.wrapper;
        let root = doc.root();
        self.listeners.track(doc.add_listener(
            root,
            EventKind::Click,
            move |doc, event| {
                let inside = event.target().is_some_and(|t| doc.contains(wrapper, t));
                if !inside {
                    handle.close_dropdown(doc);
                }
            },
        ));

        let handle = self.clone();
        self.listeners.track(doc.add_listener(
            self.native,
            EventKind::Change,
            move |doc, _| handle.sync_with_native(doc),
        ));

        if let Some(search) = parts.search {
            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                search,
                EventKind::Input,
                move |doc, _| {
                    let query = doc.value(search);
                    handle.filter_options(doc, &query);
                },
            ));
        }
        debug!(
            "select {} initialized with {} options",
            self.native,
            parts.options.len()
        );
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.listeners.remove_all(doc);
        let parts = self.parts.borrow_mut().take();
        if let Some(parts) = parts {
            doc.remove(parts.wrapper);
            doc.remove_style(self.native, "display");
        }
    }

    fn is_inert(&self) -> bool {
        self.parts.borrow().is_none()
    }

    fn is_destroyed(&self) -> bool {
        self.listeners.is_destroyed()
    }
}
