//! Tabs widget.
//!
//! A `[data-tabs]` container holding a `[role="tablist"]`, a sequence of
//! `[role="tab"]` elements and an index-aligned sequence of
//! `[role="tabpanel"]` elements. Uses a roving tabindex: only the selected
//! tab has `tabindex="0"`. Arrow keys move focus without activating.

use ethiodom::{Document, Event, EventDetail, EventKind, Key, NodeId};
use log::{debug, warn};

use super::{Listeners, Widget, next_generated_id};
use crate::config::TabsOptions;
use crate::error::{WidgetError, WidgetKind};

pub const TABLIST_SELECTOR: &str = r#"[role="tablist"]"#;
pub const TAB_SELECTOR: &str = r#"[role="tab"]"#;
pub const PANEL_SELECTOR: &str = r#"[role="tabpanel"]"#;
pub const CHANGE_EVENT: &str = "tabs:change";

/// An ARIA tab switcher.
#[derive(Debug, Clone)]
pub struct Tabs {
    container: NodeId,
    options: TabsOptions,
    tablist: Option<NodeId>,
    tabs: Vec<NodeId>,
    panels: Vec<NodeId>,
    listeners: Listeners,
}

impl Tabs {
    /// Discover the tablist, tabs and panels under `container` and activate
    /// the default tab.
    ///
    /// Missing tab structure yields inert tabs. Unequal tab and panel counts
    /// are an error.
    pub fn new(
        doc: &mut Document,
        container: NodeId,
        options: TabsOptions,
    ) -> Result<Self, WidgetError> {
        let tablist = doc.query_selector(container, TABLIST_SELECTOR)?;
        let tabs = doc.query_selector_all(container, TAB_SELECTOR)?;
        let panels = doc.query_selector_all(container, PANEL_SELECTOR)?;

        if tablist.is_some() && !tabs.is_empty() && tabs.len() != panels.len() {
            return Err(WidgetError::TabPanelMismatch {
                container,
                tabs: tabs.len(),
                panels: panels.len(),
            });
        }

        let mut widget = Self {
            container,
            options,
            tablist,
            tabs,
            panels,
            listeners: Listeners::default(),
        };
        widget.initialize(doc);
        Ok(widget)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn options(&self) -> &TabsOptions {
        &self.options
    }

    pub fn tablist(&self) -> Option<NodeId> {
        self.tablist
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    /// Index of the tab with `aria-selected="true"`.
    pub fn selected_index(&self, doc: &Document) -> Option<usize> {
        self.tabs
            .iter()
            .position(|&tab| doc.attr(tab, "aria-selected") == Some("true"))
    }

    pub fn index_of(&self, tab: NodeId) -> Option<usize> {
        self.tabs.iter().position(|&t| t == tab)
    }

    /// Select the tab and show the panel at `index`, focus the tab and emit
    /// `tabs:change`. Returns false, changing nothing, for an invalid index.
    pub fn activate_tab(&self, doc: &mut Document, index: usize) -> bool {
        let (Some(&tab), Some(&panel)) = (self.tabs.get(index), self.panels.get(index)) else {
            warn!("tab index {index} out of range for tabs {}", self.container);
            return false;
        };

        for &other in &self.tabs {
            doc.set_attr(other, "aria-selected", "false");
            doc.set_attr(other, "tabindex", "-1");
        }
        for &other in &self.panels {
            doc.set_hidden(other, true);
        }

        doc.set_attr(tab, "aria-selected", "true");
        doc.set_attr(tab, "tabindex", "0");
        doc.focus(tab);
        doc.set_hidden(panel, false);

        debug!("tabs {} switched to {index}", self.container);
        let detail = EventDetail::new()
            .with_index("index", index)
            .with_node("tab", tab)
            .with_node("panel", panel);
        doc.dispatch(self.container, Event::custom(CHANGE_EVENT, detail));
        true
    }

    // Focused tab if focus is on one, otherwise the selected tab
    fn current_index(&self, doc: &Document) -> Option<usize> {
        doc.active_element()
            .and_then(|focused| self.index_of(focused))
            .or_else(|| self.selected_index(doc))
    }

    fn focus_index(&self, doc: &mut Document, index: usize) {
        if let Some(&tab) = self.tabs.get(index) {
            doc.focus(tab);
        }
    }

    pub fn focus_previous_tab(&self, doc: &mut Document) {
        let len = self.tabs.len();
        if len == 0 {
            return;
        }
        let previous = match self.current_index(doc) {
            Some(0) | None => len - 1,
            Some(current) => current - 1,
        };
        self.focus_index(doc, previous);
    }

    pub fn focus_next_tab(&self, doc: &mut Document) {
        let len = self.tabs.len();
        if len == 0 {
            return;
        }
        let next = match self.current_index(doc) {
            Some(current) if current + 1 < len => current + 1,
            _ => 0,
        };
        self.focus_index(doc, next);
    }

    pub fn focus_first_tab(&self, doc: &mut Document) {
        self.focus_index(doc, 0);
    }

    pub fn focus_last_tab(&self, doc: &mut Document) {
        if let Some(last) = self.tabs.len().checked_sub(1) {
            self.focus_index(doc, last);
        }
    }

    fn handle_key(&self, doc: &mut Document, event: &mut Event, index: usize) {
        match event.key() {
            Some(Key::Left) => self.focus_previous_tab(doc),
            Some(Key::Right) => self.focus_next_tab(doc),
            Some(Key::Home) => self.focus_first_tab(doc),
            Some(Key::End) => self.focus_last_tab(doc),
            Some(key) if key.is_activation() => {
                self.activate_tab(doc, index);
            }
            _ => return,
        }
        event.prevent_default();
    }
}

impl Widget for Tabs {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Tabs
    }

    fn root(&self) -> NodeId {
        self.container
    }

    fn initialize(&mut self, doc: &mut Document) {
        if self.is_inert() {
            warn!("tab structure not found in {}", self.container);
            return;
        }
        if !self.listeners.is_empty() {
            return;
        }

        for (index, (&tab, &panel)) in self.tabs.iter().zip(&self.panels).enumerate() {
            let existing = doc.id_of(tab).map(str::to_string);
            let tab_id = match existing {
                Some(id) => id,
                None => {
                    let id = next_generated_id("tab");
                    doc.set_id(tab, &id);
                    id
                }
            };
            doc.set_attr(tab, "aria-selected", "false");
            doc.set_attr(tab, "tabindex", "-1");
            if let Some(panel_id) = doc.id_of(panel).map(str::to_string) {
                doc.set_attr(tab, "aria-controls", &panel_id);
            }
            doc.set_attr(panel, "aria-labelledby", &tab_id);
            doc.set_hidden(panel, true);

            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                tab,
                EventKind::Click,
                move |doc, _| {
                    handle.activate_tab(doc, index);
                },
            ));

            let handle = self.clone();
            self.listeners.track(doc.add_listener(
                tab,
                EventKind::KeyDown,
                move |doc, event| handle.handle_key(doc, event, index),
            ));
        }

        let mut default_tab = self.options.default_tab;
        if default_tab >= self.tabs.len() {
            warn!(
                "default tab {default_tab} out of range for tabs {}, using 0",
                self.container
            );
            default_tab = 0;
        }
        self.activate_tab(doc, default_tab);
        debug!(
            "tabs {} initialized with {} tabs",
            self.container,
            self.tabs.len()
        );
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.listeners.remove_all(doc);
    }

    fn is_inert(&self) -> bool {
        self.tablist.is_none() || self.tabs.is_empty()
    }

    fn is_destroyed(&self) -> bool {
        self.listeners.is_destroyed()
    }
}
