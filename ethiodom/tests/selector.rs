use ethiodom::{collect_focusable, Document, Element, NodeId, Selector, SelectorError, FOCUSABLE_SELECTOR};

fn page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.mount(
        body,
        &Element::div()
            .id("tabs")
            .attr("data-tabs", "main")
            .child(
                Element::div()
                    .attr("role", "tablist")
                    .child(Element::button().id("t1").attr("role", "tab").class("tab active"))
                    .child(Element::button().id("t2").attr("role", "tab").class("tab")),
            )
            .child(Element::div().id("p1").attr("role", "tabpanel"))
            .child(Element::div().id("p2").attr("role", "tabpanel").attr("tabindex", "-1")),
    );
    doc
}

fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|&n| doc.id_of(n).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_attribute_value_selector() {
    let doc = page();
    let found = doc.query_selector_all(doc.root(), r#"[role="tab"]"#).unwrap();
    assert_eq!(ids(&doc, &found), vec!["t1", "t2"]);
}

#[test]
fn test_attribute_presence_selector() {
    let doc = page();
    let found = doc.query_selector(doc.root(), "[data-tabs]").unwrap();
    assert_eq!(found, doc.get_element_by_id("tabs"));
}

#[test]
fn test_compound_tag_class_id() {
    let doc = page();
    let found = doc.query_selector_all(doc.root(), "button.tab.active").unwrap();
    assert_eq!(ids(&doc, &found), vec!["t1"]);

    let found = doc.query_selector(doc.root(), "div#p2").unwrap();
    assert_eq!(found, doc.get_element_by_id("p2"));
}

#[test]
fn test_selector_list_keeps_document_order() {
    let doc = page();
    let found = doc.query_selector_all(doc.root(), "#p1, #t2").unwrap();
    assert_eq!(ids(&doc, &found), vec!["t2", "p1"]);
}

#[test]
fn test_scope_is_excluded() {
    let doc = page();
    let tabs = doc.get_element_by_id("tabs").unwrap();
    assert_eq!(doc.query_selector(tabs, "[data-tabs]").unwrap(), None);
}

#[test]
fn test_closest_is_inclusive() {
    let doc = page();
    let t1 = doc.get_element_by_id("t1").unwrap();
    let tabs = doc.get_element_by_id("tabs");
    assert_eq!(doc.closest(t1, &Selector::attribute("data-tabs")), tabs);
    assert_eq!(doc.closest(t1, &Selector::parse("#t1").unwrap()), Some(t1));
}

#[test]
fn test_not_pseudo_class() {
    let doc = page();
    let found = doc
        .query_selector_all(doc.root(), r#"[role="tabpanel"]:not([tabindex="-1"])"#)
        .unwrap();
    assert_eq!(ids(&doc, &found), vec!["p1"]);
}

#[test]
fn test_focusable_collection() {
    let doc = page();
    assert!(Selector::parse(FOCUSABLE_SELECTOR).is_ok());
    let focusable = collect_focusable(&doc, doc.root());
    assert_eq!(ids(&doc, &focusable), vec!["t1", "t2"]);
}

#[test]
fn test_parse_errors() {
    assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    assert_eq!(Selector::parse("div span"), Err(SelectorError::Combinator(5)));
    assert_eq!(
        Selector::parse(":hover"),
        Err(SelectorError::UnsupportedPseudo("hover".to_string()))
    );
    assert_eq!(Selector::parse("[role="), Err(SelectorError::UnexpectedEnd));
    assert!(matches!(
        Selector::parse("div.a>p"),
        Err(SelectorError::Combinator(_))
    ));
    assert!(matches!(
        Selector::parse("[role=(]"),
        Err(SelectorError::Unexpected { .. })
    ));
    assert!(matches!(
        Selector::parse("div > p"),
        Err(SelectorError::Combinator(_))
    ));
}

#[test]
fn test_from_str() {
    let sel: Selector = "select[data-custom-select]".parse().unwrap();
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.mount(body, &Element::select().flag("data-custom-select"));
    assert!(sel.matches(&doc, select));
    assert!(!sel.matches(&doc, body));
}
