//! Clear button for `.ethio-search-input` fields.
//!
//! The clear button is a sibling of the input: it is shown while the input
//! has a value, and clicking it empties and refocuses the input.

use ethiodom::{Document, Event, EventKind, NodeId, Selector};

use crate::widgets::Listeners;

pub const INPUT_CLASS: &str = "ethio-search-input";
pub const CLEAR_CLASS: &str = "ethio-search-clear";

/// Attach the document-level input and click listeners.
pub(crate) fn install(doc: &mut Document, listeners: &mut Listeners) {
    let root = doc.root();

    listeners.track(doc.add_listener(root, EventKind::Input, |doc, event| {
        if let Some(target) = event.target().filter(|&t| doc.has_class(t, INPUT_CLASS)) {
            handle_search_input(doc, target);
        }
    }));

    listeners.track(doc.add_listener(root, EventKind::Click, |doc, event| {
        if let Some(target) = event.target().filter(|&t| doc.has_class(t, CLEAR_CLASS)) {
            clear_search(doc, target);
        }
    }));
}

fn sibling_with_class(doc: &Document, node: NodeId, class: &str) -> Option<NodeId> {
    let parent = doc.parent(node)?;
    let selector = Selector::parse(&format!(".{class}")).ok()?;
    doc.find(parent, &selector)
}

/// Show the clear button while `input` has a value.
pub fn handle_search_input(doc: &mut Document, input: NodeId) {
    if let Some(clear) = sibling_with_class(doc, input, CLEAR_CLASS) {
        let display = if doc.value(input).is_empty() { "none" } else { "block" };
        doc.set_style(clear, "display", display);
    }
}

/// Empty the input next to `button`, focus it and notify input listeners.
pub fn clear_search(doc: &mut Document, button: NodeId) {
    let Some(input) = sibling_with_class(doc, button, INPUT_CLASS) else {
        return;
    };
    doc.set_value(input, "");
    doc.focus(input);
    doc.set_style(button, "display", "none");
    doc.dispatch(input, Event::input());
}
