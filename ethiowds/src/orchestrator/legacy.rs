//! Direct class manipulation for markup that predates the widget attributes.
//!
//! Only reachable when `legacy_compat` is enabled. These paths keep no
//! state, fire no notifications and set no ARIA attributes.

use ethiodom::{Document, NodeId, Selector};
use log::debug;

use super::find_by_attr;

pub const ACTIVE_CLASS: &str = "active";
pub const ACCORDION_HEADER_CLASS: &str = "ethio-accordion-header";
pub const ACCORDION_ICON_CLASS: &str = "ethio-accordion-icon";

/// Returns false if no element has `id`.
pub fn open_modal(doc: &mut Document, id: &str) -> bool {
    let Some(modal) = doc.get_element_by_id(id) else {
        return false;
    };
    doc.add_class(modal, ACTIVE_CLASS);
    let body = doc.body();
    doc.set_style(body, "overflow", "hidden");
    debug!("legacy modal {id:?} opened");
    true
}

/// Returns false if no element has `id`.
pub fn close_modal(doc: &mut Document, id: &str) -> bool {
    let Some(modal) = doc.get_element_by_id(id) else {
        return false;
    };
    doc.remove_class(modal, ACTIVE_CLASS);
    let body = doc.body();
    doc.remove_style(body, "overflow");
    debug!("legacy modal {id:?} closed");
    true
}

/// Activate the `[data-tab]`/`[data-panel]` pair named `tab_id` and
/// deactivate the rest of `group`. Returns false, leaving the page untouched,
/// if either half of the pair is missing.
pub fn switch_tab(doc: &mut Document, group: &str, tab_id: &str) -> bool {
    let tab = find_by_attr(doc, "data-tab", tab_id).first().copied();
    let panel = find_by_attr(doc, "data-panel", tab_id).first().copied();
    let (Some(tab), Some(panel)) = (tab, panel) else {
        debug!("legacy tab {tab_id:?} not found in group {group:?}");
        return false;
    };

    for node in find_by_attr(doc, "data-tab-group", group) {
        doc.remove_class(node, ACTIVE_CLASS);
    }
    for node in find_by_attr(doc, "data-panel-group", group) {
        doc.remove_class(node, ACTIVE_CLASS);
    }
    doc.add_class(tab, ACTIVE_CLASS);
    doc.add_class(panel, ACTIVE_CLASS);
    true
}

/// Toggle a header and the content element right after it. Headers sharing
/// a `data-accordion-group` close each other. Returns false if the header
/// has no following content element.
pub fn toggle_accordion(doc: &mut Document, header: NodeId) -> bool {
    let Some(content) = doc.next_element_sibling(header) else {
        debug!("legacy accordion header {header} has no content");
        return false;
    };
    let opening = !doc.has_class(header, ACTIVE_CLASS);

    if let Some(group) = doc.attr(header, "data-accordion-group").map(str::to_string) {
        for other in find_by_attr(doc, "data-accordion-group", &group) {
            if other != header && doc.has_class(other, ACTIVE_CLASS) {
                doc.remove_class(other, ACTIVE_CLASS);
                if let Some(other_content) = doc.next_element_sibling(other) {
                    doc.remove_class(other_content, ACTIVE_CLASS);
                }
            }
        }
    }

    doc.toggle_class(header, ACTIVE_CLASS, Some(opening));
    doc.toggle_class(content, ACTIVE_CLASS, Some(opening));

    let icon_selector = Selector::parse(&format!(".{ACCORDION_ICON_CLASS}"));
    if let Some(icon) = icon_selector.ok().and_then(|s| doc.find(header, &s)) {
        let rotation = if opening { "rotate(180deg)" } else { "rotate(0deg)" };
        doc.set_style(icon, "transform", rotation);
    }
    true
}
