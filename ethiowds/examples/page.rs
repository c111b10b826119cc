//! Page Example
//!
//! Builds a small page with one of each widget, lets the toolkit discover
//! them, drives a few interactions and prints the resulting state.
//! Log output goes to `page.log`.

use ethiowds::logging::init_file_logger;
use ethiowds::prelude::*;
use log::LevelFilter;

fn build_page(doc: &mut Document) {
    let body = doc.body();

    doc.mount(
        body,
        &Element::button()
            .id("open-signup")
            .attr("data-modal-target", "signup")
            .text("ይመዝገቡ"),
    );
    doc.mount(
        body,
        &Element::div().id("signup").class("eth-modal").child(
            Element::div()
                .class("eth-modal__content")
                .child(Element::input().id("email").attr("type", "email"))
                .child(Element::button().flag("data-modal-close").text("ዝጋ")),
        ),
    );

    doc.mount(
        body,
        &Element::select()
            .id("region")
            .flag("data-custom-select")
            .child(Element::option("aa", "Addis Ababa"))
            .child(Element::option("am", "Amhara").flag("selected"))
            .child(Element::option("or", "Oromia"))
            .child(Element::option("ti", "Tigray")),
    );

    doc.mount(
        body,
        &Element::div()
            .attr("data-tabs", "account")
            .child(
                Element::div()
                    .attr("role", "tablist")
                    .child(Element::button().attr("role", "tab").text("መገለጫ"))
                    .child(Element::button().attr("role", "tab").text("ቅንብሮች")),
            )
            .child(Element::div().attr("role", "tabpanel").text("Profile"))
            .child(Element::div().attr("role", "tabpanel").text("Settings")),
    );

    doc.mount(
        body,
        &Element::div()
            .id("faq")
            .flag("data-accordion")
            .children(["ምንድን ነው?", "እንዴት?"].into_iter().map(|question| {
                Element::div()
                    .flag("data-accordion-item")
                    .child(
                        Element::button()
                            .flag("data-accordion-trigger")
                            .text(question),
                    )
                    .child(Element::div().flag("data-accordion-content").text("..."))
            })),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_file_logger("page.log", LevelFilter::Debug)?;

    let mut doc = Document::new();
    build_page(&mut doc);

    let config = WdsConfig::default()
        .theme("dark")
        .accordion(AccordionOptions::default().multiple(true));
    let wds = EthioWds::new(&mut doc, config)?;
    println!("ethiowds {} bound {} widgets", EthioWds::version(), wds.registry().len());

    // Modal: open through the trigger, dismiss with Escape
    let trigger = doc.get_element_by_id("open-signup").ok_or("missing trigger")?;
    doc.click(trigger);
    println!("modal open, body overflow = {:?}", doc.style(doc.body(), "overflow"));
    doc.key_down_focused(Key::Escape);
    println!("modal closed, focus on trigger = {}", doc.active_element() == Some(trigger));

    // Select: pick the last option
    let region = doc.get_element_by_id("region").ok_or("missing select")?;
    if let Some(select) = wds.get_component(region).as_ref().and_then(Component::as_select) {
        if let Some(&last) = select.option_elements().last() {
            select.select_option(&mut doc, last);
        }
        println!("region = {} ({})", select.selected_value(&doc), select.label(&doc));
    }

    // Tabs: switch by label
    wds.switch_tab(&mut doc, "account", "ቅንብሮች")?;

    // Accordion: expand everything
    wds.expand_all_accordions(&mut doc);
    let faq = doc.get_element_by_id("faq").ok_or("missing accordion")?;
    if let Some(accordion) = wds.get_component(faq).as_ref().and_then(Component::as_accordion) {
        println!("expanded items: {}", accordion.expanded_items(&doc).len());
    }

    Ok(())
}
