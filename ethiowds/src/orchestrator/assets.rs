//! Document-level side effects applied at init.

use ethiodom::{Document, Element};
use log::debug;

pub const CSS_LINK_ID: &str = "ethiowds-css";
pub const ETHIOPIC_FONT_LINK_ID: &str = "ethiopic-fonts";
pub const SANS_FONT_LINK_ID: &str = "sans-fonts";

/// Set `data-theme` on the root element. The "default" theme leaves it unset.
pub fn apply_theme(doc: &mut Document, theme: &str) {
    if theme != "default" {
        let root = doc.document_element();
        doc.set_attr(root, "data-theme", theme);
    }
}

pub fn set_direction(doc: &mut Document, rtl: bool) {
    if rtl {
        let root = doc.document_element();
        doc.set_attr(root, "dir", "rtl");
    }
}

pub fn set_language(doc: &mut Document, language: &str) {
    if !language.is_empty() {
        let root = doc.document_element();
        doc.set_attr(root, "lang", language);
    }
}

/// Append a stylesheet link with `id` to the head unless an element with
/// that id already exists. Returns true if a link was inserted.
pub fn ensure_stylesheet(doc: &mut Document, id: &str, href: &str) -> bool {
    if doc.get_element_by_id(id).is_some() {
        return false;
    }
    let head = doc.head();
    doc.mount(head, &Element::link("stylesheet", href).id(id));
    debug!("injected stylesheet {id} ({href})");
    true
}
