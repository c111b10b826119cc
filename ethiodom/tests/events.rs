use std::cell::RefCell;
use std::rc::Rc;

use ethiodom::{Document, Element, Event, EventDetail, EventKind, FocusState, Key, NodeId};

fn nested() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let outer = doc.mount(
        body,
        &Element::div().id("outer").child(Element::button().id("inner")),
    );
    let inner = doc.get_element_by_id("inner").unwrap();
    (doc, outer, inner)
}

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_click_bubbles_to_document() {
    let (mut doc, outer, inner) = nested();
    let log = recorder();

    for (node, name) in [(inner, "inner"), (outer, "outer"), (doc.root(), "document")] {
        let log = Rc::clone(&log);
        doc.add_listener(node, EventKind::Click, move |_, _| {
            log.borrow_mut().push(name.to_string());
        });
    }

    doc.click(inner);
    assert_eq!(*log.borrow(), vec!["inner", "outer", "document"]);
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let (mut doc, outer, inner) = nested();
    let log = recorder();
    let l = Rc::clone(&log);
    doc.add_listener(outer, EventKind::Change, move |_, _| l.borrow_mut().push("outer".into()));

    doc.dispatch(inner, Event::change().bubbles(false));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listeners_filter_by_kind() {
    let (mut doc, _, inner) = nested();
    let log = recorder();
    let l = Rc::clone(&log);
    doc.add_listener(inner, EventKind::KeyDown, move |_, event| {
        l.borrow_mut().push(format!("{:?}", event.key()));
    });

    doc.click(inner);
    doc.key_down(inner, Key::Enter);
    assert_eq!(*log.borrow(), vec!["Some(Enter)"]);
}

#[test]
fn test_stop_propagation() {
    let (mut doc, outer, inner) = nested();
    let log = recorder();
    doc.add_listener(inner, EventKind::Click, |_, event| event.stop_propagation());
    let l = Rc::clone(&log);
    doc.add_listener(outer, EventKind::Click, move |_, _| l.borrow_mut().push("outer".into()));

    let event = doc.click(inner);
    assert!(event.propagation_stopped());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_prevent_default_is_reported() {
    let (mut doc, _, inner) = nested();
    doc.add_listener(inner, EventKind::KeyDown, |_, event| event.prevent_default());
    assert!(doc.key_down(inner, Key::SPACE).default_prevented());
}

#[test]
fn test_target_and_current_target() {
    let (mut doc, outer, inner) = nested();
    let seen = Rc::new(RefCell::new(None));
    let s = Rc::clone(&seen);
    doc.add_listener(outer, EventKind::Click, move |_, event| {
        *s.borrow_mut() = Some((event.target(), event.current_target()));
    });

    doc.click(inner);
    assert_eq!(*seen.borrow(), Some((Some(inner), Some(outer))));
}

#[test]
fn test_custom_event_carries_detail() {
    let (mut doc, outer, inner) = nested();
    let seen = Rc::new(RefCell::new(None));
    let s = Rc::clone(&seen);
    doc.add_listener(doc.root(), EventKind::custom("demo:ping"), move |_, event| {
        *s.borrow_mut() = Some(event.detail().clone());
    });

    let detail = EventDetail::new().with_node("item", inner).with_index("index", 3);
    doc.dispatch(outer, Event::custom("demo:ping", detail.clone()));

    let got = seen.borrow().clone().unwrap();
    assert_eq!(got, detail);
    assert_eq!(got.node("item"), Some(inner));
    assert_eq!(got.index("index"), Some(3));
    assert_eq!(got.node("missing"), None);
}

#[test]
fn test_remove_listener() {
    let (mut doc, _, inner) = nested();
    let log = recorder();
    let l = Rc::clone(&log);
    let id = doc.add_listener(inner, EventKind::Click, move |_, _| l.borrow_mut().push("x".into()));
    assert_eq!(doc.listener_count(), 1);

    assert!(doc.remove_listener(id));
    assert!(!doc.remove_listener(id));
    assert_eq!(doc.listener_count(), 0);

    doc.click(inner);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listener_removed_mid_dispatch_is_skipped() {
    let (mut doc, _, inner) = nested();
    let log = recorder();
    let victim = Rc::new(RefCell::new(None));

    let v = Rc::clone(&victim);
    doc.add_listener(inner, EventKind::Click, move |doc, _| {
        if let Some(id) = v.borrow_mut().take() {
            doc.remove_listener(id);
        }
    });
    let l = Rc::clone(&log);
    let id = doc.add_listener(inner, EventKind::Click, move |_, _| l.borrow_mut().push("late".into()));
    *victim.borrow_mut() = Some(id);

    doc.click(inner);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_nested_dispatch_from_listener() {
    let (mut doc, outer, inner) = nested();
    let log = recorder();
    doc.add_listener(inner, EventKind::Click, move |doc, _| {
        doc.dispatch(outer, Event::custom("demo:nested", EventDetail::new()));
    });
    let l = Rc::clone(&log);
    doc.add_listener(outer, EventKind::custom("demo:nested"), move |_, _| {
        l.borrow_mut().push("nested".into());
    });

    doc.click(inner);
    assert_eq!(*log.borrow(), vec!["nested"]);
}

#[test]
fn test_key_down_focused_targets_active_element() {
    let (mut doc, _, inner) = nested();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    doc.add_listener(doc.root(), EventKind::KeyDown, move |_, event| {
        s.borrow_mut().push(event.target());
    });

    doc.key_down_focused(Key::Escape);
    doc.focus(inner);
    doc.key_down_focused(Key::Escape);

    let body = doc.body();
    assert_eq!(*seen.borrow(), vec![Some(body), Some(inner)]);
}

#[test]
fn test_key_activation() {
    assert!(Key::Enter.is_activation());
    assert!(Key::SPACE.is_activation());
    assert!(!Key::Char('a').is_activation());
    assert!(!Key::Escape.is_activation());
}

#[test]
fn test_event_kind_names() {
    assert_eq!(EventKind::Click.to_string(), "click");
    assert_eq!(EventKind::custom("tabs:change").name(), "tabs:change");
}

// ============================================================================
// Focus State
// ============================================================================

#[test]
fn test_focus_state_focus_blur() {
    let (_doc, outer, inner) = nested();
    let mut focus = FocusState::new();

    assert_eq!(focus.focused(), None);

    assert!(focus.focus(outer));
    assert_eq!(focus.focused(), Some(outer));

    // Focus same element - no change
    assert!(!focus.focus(outer));

    assert!(focus.focus(inner));
    assert_eq!(focus.focused(), Some(inner));

    assert!(focus.blur());
    assert_eq!(focus.focused(), None);

    // Blur when nothing focused
    assert!(!focus.blur());
}
