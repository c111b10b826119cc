use ethiodom::{Document, Element, NodeId};
use ethiowds::logging::init_test_logger;
use ethiowds::orchestrator::assets::{CSS_LINK_ID, ETHIOPIC_FONT_LINK_ID, SANS_FONT_LINK_ID};
use ethiowds::orchestrator::search::{CLEAR_CLASS, INPUT_CLASS};
use ethiowds::{
    AccordionOptions, EthioWds, SelectOptions, WdsConfig, Widget, WidgetError, WidgetKind,
};

fn accordion(id: &str, items: usize) -> Element {
    Element::div()
        .id(id)
        .flag("data-accordion")
        .children((0..items).map(|n| {
            Element::div()
                .id(format!("{id}-item-{n}"))
                .flag("data-accordion-item")
                .child(
                    Element::button()
                        .id(format!("{id}-header-{n}"))
                        .flag("data-accordion-trigger")
                        .text(format!("Question {n}")),
                )
                .child(Element::div().flag("data-accordion-content").text("Answer"))
        }))
}

fn tabs() -> Element {
    Element::div()
        .id("tabs")
        .attr("data-tabs", "profile")
        .child(
            Element::div()
                .attr("role", "tablist")
                .child(
                    Element::button()
                        .attr("role", "tab")
                        .attr("data-tab", "info")
                        .text("Info"),
                )
                .child(Element::button().attr("role", "tab").text("  Settings  ")),
        )
        .child(Element::div().attr("role", "tabpanel").text("Info panel"))
        .child(Element::div().attr("role", "tabpanel").text("Settings panel"))
}

/// A page with one of each widget plus a broken select and a search field.
fn page() -> Document {
    init_test_logger();
    let mut doc = Document::new();
    let body = doc.body();
    doc.mount(
        body,
        &Element::div()
            .id("app")
            .child(
                Element::button()
                    .id("open-welcome")
                    .attr("data-modal-target", "welcome"),
            )
            .child(
                Element::div()
                    .id("welcome")
                    .child(Element::button().flag("data-modal-close").text("Close")),
            )
            .child(
                Element::select()
                    .id("lang")
                    .flag("data-custom-select")
                    .child(Element::option("am", "አማርኛ"))
                    .child(Element::option("en", "English")),
            )
            .child(Element::select().id("empty").flag("data-custom-select"))
            .child(tabs())
            .child(accordion("faq", 2))
            .child(
                Element::div()
                    .class("ethio-search")
                    .child(Element::input().id("q").class(INPUT_CLASS))
                    .child(
                        Element::button()
                            .id("clear")
                            .class(CLEAR_CLASS)
                            .style("display", "none"),
                    ),
            ),
    );
    doc
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

// ============================================================================
// Page setup
// ============================================================================

#[test]
fn test_default_config_injects_assets_and_language() {
    let mut doc = page();
    EthioWds::new(&mut doc, WdsConfig::default()).unwrap();

    let css = by_id(&doc, CSS_LINK_ID);
    assert_eq!(doc.parent(css), Some(doc.head()));
    assert_eq!(doc.attr(css, "href"), Some("./css/ethio-wds.css"));
    assert_eq!(doc.attr(css, "rel"), Some("stylesheet"));
    assert!(doc.get_element_by_id(ETHIOPIC_FONT_LINK_ID).is_some());
    assert!(doc.get_element_by_id(SANS_FONT_LINK_ID).is_some());

    let root = doc.document_element();
    assert_eq!(doc.attr(root, "lang"), Some("am"));
    assert!(!doc.has_attr(root, "data-theme"));
    assert!(!doc.has_attr(root, "dir"));
}

#[test]
fn test_theme_direction_and_asset_toggles() {
    let mut doc = Document::new();
    let config = WdsConfig::default()
        .theme("dark")
        .rtl(true)
        .language("ti")
        .load_css(false)
        .load_fonts(false);
    EthioWds::new(&mut doc, config).unwrap();

    let root = doc.document_element();
    assert_eq!(doc.attr(root, "data-theme"), Some("dark"));
    assert_eq!(doc.attr(root, "dir"), Some("rtl"));
    assert_eq!(doc.attr(root, "lang"), Some("ti"));
    assert!(doc.element_children(doc.head()).is_empty());
}

#[test]
fn test_assets_are_injected_once_across_instances() {
    let mut doc = Document::new();
    let config = WdsConfig::default().css_url("/static/wds.css");
    EthioWds::new(&mut doc, config.clone()).unwrap();
    EthioWds::new(&mut doc, config).unwrap();

    assert_eq!(doc.element_children(doc.head()).len(), 3);
}

#[test]
fn test_config_from_json() {
    let mut doc = Document::new();
    let config =
        WdsConfig::from_json(r#"{"theme": "high-contrast", "loadFonts": false}"#).unwrap();
    EthioWds::new(&mut doc, config).unwrap();

    assert_eq!(doc.attr(doc.document_element(), "data-theme"), Some("high-contrast"));
    assert!(doc.get_element_by_id(CSS_LINK_ID).is_some());
    assert!(doc.get_element_by_id(ETHIOPIC_FONT_LINK_ID).is_none());
}

#[test]
fn test_without_auto_init_nothing_happens_until_init() {
    let mut doc = page();
    let mut wds = EthioWds::new(&mut doc, WdsConfig::default().auto_init(false)).unwrap();

    assert!(!wds.is_initialized());
    assert!(wds.registry().is_empty());
    assert!(doc.get_element_by_id(CSS_LINK_ID).is_none());

    wds.init(&mut doc).unwrap();
    assert!(wds.is_initialized());
    assert_eq!(wds.registry().len(), 4);

    let listeners = doc.listener_count();
    wds.init(&mut doc).unwrap();
    assert_eq!(doc.listener_count(), listeners);
}

#[test]
fn test_version() {
    assert_eq!(EthioWds::version(), "1.3.0");
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_scan_registers_each_widget_in_order() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();

    let kinds: Vec<_> = wds.registry().iter().map(|(_, c)| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            WidgetKind::Modal,
            WidgetKind::Select,
            WidgetKind::Tabs,
            WidgetKind::Accordion
        ]
    );

    let empty = by_id(&doc, "empty");
    assert!(wds.get_component(empty).is_none());
    assert!(doc.next_element_sibling(empty).is_some_and(|n| doc.id_of(n) == Some("tabs")));

    let modal = wds.get_component(by_id(&doc, "open-welcome")).unwrap();
    assert!(modal.as_modal().is_some());
    assert!(!modal.is_inert());
}

#[test]
fn test_manual_creation_rejects_bound_elements() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let faq = by_id(&doc, "faq");
    let listeners = doc.listener_count();

    let err = wds
        .create_accordion(&mut doc, faq, AccordionOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        WidgetError::AlreadyRegistered {
            existing: WidgetKind::Accordion,
            ..
        }
    ));
    assert_eq!(doc.listener_count(), listeners);
}

#[test]
fn test_manual_creation_registers() {
    let mut doc = Document::new();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let body = doc.body();
    let container = doc.mount(body, &accordion("late", 1));

    let accordion = wds
        .create_accordion(&mut doc, container, AccordionOptions::default())
        .unwrap();
    assert_eq!(accordion.container(), container);
    assert!(wds.get_component(container).is_some());
}

#[test]
fn test_destroyed_handle_unbinds_and_allows_recreation() {
    let mut doc = Document::new();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let body = doc.body();
    let native = doc.mount(
        body,
        &Element::select()
            .child(Element::option("1", "One"))
            .child(Element::option("2", "Two")),
    );

    let mut select = wds
        .create_select(&mut doc, native, SelectOptions::default())
        .unwrap();
    let registered = wds.get_component(native).unwrap();
    let wrapper = select.wrapper().unwrap();

    select.destroy(&mut doc);
    assert!(registered.is_destroyed());
    assert!(registered.is_inert());
    assert!(wds.get_component(native).is_none());
    assert!(!doc.is_connected(wrapper));

    let stale = registered.as_select().unwrap();
    stale.open_dropdown(&mut doc);
    assert!(!stale.is_open(&doc));
    assert!(stale.wrapper().is_none());

    let fresh = wds
        .create_select(&mut doc, native, SelectOptions::default())
        .unwrap();
    assert!(fresh.wrapper().is_some_and(|w| doc.is_connected(w)));
    assert_eq!(wds.registry().len(), 1);
    assert!(!wds.get_component(native).unwrap().is_destroyed());
}

// ============================================================================
// Convenience operations
// ============================================================================

#[test]
fn test_open_and_close_modal_by_id() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let trigger = by_id(&doc, "open-welcome");
    let modal = wds.get_component(trigger).unwrap().as_modal().cloned().unwrap();

    wds.open_modal(&mut doc, "welcome").unwrap();
    assert!(modal.is_open(&doc));

    wds.close_modal(&mut doc, "welcome").unwrap();
    assert!(!modal.is_open(&doc));
    assert_eq!(doc.active_element(), Some(trigger));
}

#[test]
fn test_unknown_modal_is_not_found() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();

    let err = wds.open_modal(&mut doc, "missing").unwrap_err();
    assert!(matches!(
        err,
        WidgetError::NotFound {
            kind: WidgetKind::Modal,
            ..
        }
    ));
}

#[test]
fn test_switch_tab_by_data_attribute_and_text() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let tabs = wds
        .get_component(by_id(&doc, "tabs"))
        .unwrap()
        .as_tabs()
        .cloned()
        .unwrap();

    wds.switch_tab(&mut doc, "profile", "Settings").unwrap();
    assert_eq!(tabs.selected_index(&doc), Some(1));

    wds.switch_tab(&mut doc, "profile", "info").unwrap();
    assert_eq!(tabs.selected_index(&doc), Some(0));

    assert!(wds.switch_tab(&mut doc, "profile", "nope").is_err());
    assert!(wds.switch_tab(&mut doc, "other", "info").is_err());
}

#[test]
fn test_toggle_accordion_by_header() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let header = by_id(&doc, "faq-header-1");
    let item = by_id(&doc, "faq-item-1");

    wds.toggle_accordion(&mut doc, header).unwrap();
    let accordion = wds
        .get_component(by_id(&doc, "faq"))
        .unwrap()
        .as_accordion()
        .cloned()
        .unwrap();
    assert!(accordion.is_expanded(&doc, item));

    let outside = by_id(&doc, "q");
    assert!(wds.toggle_accordion(&mut doc, outside).is_err());
}

#[test]
fn test_expand_all_only_touches_multiple_accordions() {
    let mut doc = page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let body = doc.body();
    let multi = doc.mount(body, &accordion("multi", 3));
    let multi = wds
        .create_accordion(&mut doc, multi, AccordionOptions::default().multiple(true))
        .unwrap();
    let single = wds
        .get_component(by_id(&doc, "faq"))
        .unwrap()
        .as_accordion()
        .cloned()
        .unwrap();

    wds.expand_all_accordions(&mut doc);
    assert_eq!(multi.expanded_items(&doc).len(), 3);
    assert!(single.expanded_items(&doc).is_empty());

    single.expand_item(&mut doc, single.items()[0].item);
    wds.collapse_all_accordions(&mut doc);
    assert!(multi.expanded_items(&doc).is_empty());
    assert!(single.expanded_items(&doc).is_empty());
}

#[test]
fn test_destroy_tears_everything_down() {
    let mut doc = page();
    let mut wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let lang = by_id(&doc, "lang");
    assert!(doc.listener_count() > 0);

    wds.destroy(&mut doc);

    assert!(wds.registry().is_empty());
    assert!(!wds.is_initialized());
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(doc.style(lang, "display"), None);
    assert!(doc.next_element_sibling(lang).is_some_and(|n| doc.id_of(n) == Some("empty")));
}

// ============================================================================
// Search helper
// ============================================================================

#[test]
fn test_search_clear_button_follows_input() {
    let mut doc = page();
    EthioWds::new(&mut doc, WdsConfig::default()).unwrap();
    let input = by_id(&doc, "q");
    let clear = by_id(&doc, "clear");

    doc.set_value(input, "ቡና");
    doc.input(input);
    assert_eq!(doc.style(clear, "display"), Some("block"));

    doc.click(clear);
    assert_eq!(doc.value(input), "");
    assert_eq!(doc.active_element(), Some(input));
    assert_eq!(doc.style(clear, "display"), Some("none"));
}

// ============================================================================
// Legacy compatibility
// ============================================================================

fn legacy_page() -> Document {
    init_test_logger();
    let mut doc = Document::new();
    let body = doc.body();
    doc.mount(body, &Element::div().id("old-modal").class("ethio-modal"));
    for (tab, panel) in [("a", "A"), ("b", "B")] {
        doc.mount(
            body,
            &Element::button()
                .attr("data-tab-group", "g")
                .attr("data-tab", tab),
        );
        doc.mount(
            body,
            &Element::div()
                .attr("data-panel-group", "g")
                .attr("data-panel", tab)
                .text(panel),
        );
    }
    for n in 0..2 {
        doc.mount(
            body,
            &Element::button()
                .id(format!("header-{n}"))
                .class("ethio-accordion-header")
                .attr("data-accordion-group", "faq")
                .child(Element::span().id(format!("icon-{n}")).class("ethio-accordion-icon")),
        );
        doc.mount(body, &Element::div().id(format!("content-{n}")));
    }
    doc
}

#[test]
fn test_legacy_paths_are_off_by_default() {
    let mut doc = legacy_page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default()).unwrap();

    assert!(wds.open_modal(&mut doc, "old-modal").is_err());
    assert!(!doc.has_class(by_id(&doc, "old-modal"), "active"));

    assert!(wds.switch_tab(&mut doc, "g", "b").is_err());

    let header = by_id(&doc, "header-0");
    doc.click(header);
    assert!(!doc.has_class(header, "active"));
}

#[test]
fn test_legacy_modal() {
    let mut doc = legacy_page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default().legacy_compat(true)).unwrap();
    let modal = by_id(&doc, "old-modal");

    wds.open_modal(&mut doc, "old-modal").unwrap();
    assert!(doc.has_class(modal, "active"));
    assert_eq!(doc.style(doc.body(), "overflow"), Some("hidden"));

    wds.close_modal(&mut doc, "old-modal").unwrap();
    assert!(!doc.has_class(modal, "active"));
    assert_eq!(doc.style(doc.body(), "overflow"), None);

    assert!(wds.open_modal(&mut doc, "missing").is_err());
}

#[test]
fn test_legacy_unknown_tab_leaves_group_untouched() {
    let mut doc = legacy_page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default().legacy_compat(true)).unwrap();
    wds.switch_tab(&mut doc, "g", "a").unwrap();

    let err = wds.switch_tab(&mut doc, "g", "missing").unwrap_err();
    assert!(matches!(err, WidgetError::NotFound { kind: WidgetKind::Tabs, .. }));
    let active = doc
        .descendants(doc.body())
        .into_iter()
        .filter(|&n| doc.has_class(n, "active"))
        .count();
    assert_eq!(active, 2);
}

#[test]
fn test_legacy_tabs() {
    let mut doc = legacy_page();
    let wds = EthioWds::new(&mut doc, WdsConfig::default().legacy_compat(true)).unwrap();

    wds.switch_tab(&mut doc, "g", "b").unwrap();
    let active: Vec<_> = doc
        .descendants(doc.body())
        .into_iter()
        .filter(|&n| doc.has_class(n, "active"))
        .map(|n| {
            let name = doc.attr(n, "data-tab").or(doc.attr(n, "data-panel"));
            name.unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(active, vec!["b", "b"]);
}

#[test]
fn test_legacy_accordion_headers_are_exclusive_within_group() {
    let mut doc = legacy_page();
    EthioWds::new(&mut doc, WdsConfig::default().legacy_compat(true)).unwrap();
    let (h0, h1) = (by_id(&doc, "header-0"), by_id(&doc, "header-1"));
    let (c0, c1) = (by_id(&doc, "content-0"), by_id(&doc, "content-1"));

    doc.click(h0);
    assert!(doc.has_class(h0, "active"));
    assert!(doc.has_class(c0, "active"));
    assert_eq!(doc.style(by_id(&doc, "icon-0"), "transform"), Some("rotate(180deg)"));

    doc.click(h1);
    assert!(!doc.has_class(h0, "active"));
    assert!(!doc.has_class(c0, "active"));
    assert!(doc.has_class(h1, "active"));
    assert!(doc.has_class(c1, "active"));

    doc.click(h1);
    assert!(!doc.has_class(h1, "active"));
    assert_eq!(doc.style(by_id(&doc, "icon-1"), "transform"), Some("rotate(0deg)"));
}

#[test]
fn test_legacy_listener_skips_registered_accordions() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.mount(
        body,
        &Element::div().id("acc").flag("data-accordion").child(
            Element::div()
                .id("item")
                .flag("data-accordion-item")
                .child(
                    Element::button()
                        .id("trigger")
                        .class("ethio-accordion-header")
                        .flag("data-accordion-trigger"),
                )
                .child(Element::div().flag("data-accordion-content")),
        ),
    );
    let wds = EthioWds::new(&mut doc, WdsConfig::default().legacy_compat(true)).unwrap();
    let accordion = wds
        .get_component(by_id(&doc, "acc"))
        .unwrap()
        .as_accordion()
        .cloned()
        .unwrap();
    let trigger = by_id(&doc, "trigger");

    doc.click(trigger);
    assert!(accordion.is_expanded(&doc, by_id(&doc, "item")));
    assert!(!doc.has_class(trigger, "active"));
}
