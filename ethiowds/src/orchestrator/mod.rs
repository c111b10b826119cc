//! Page-level setup and the widget registry.
//!
//! [`EthioWds`] applies theme, direction and asset side effects to the
//! document, discovers widgets from their marker attributes and exposes
//! identifier-based convenience operations over the registered instances.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use ethiodom::{Document, EventKind, NodeId, Selector};
use log::{debug, info, warn};

use crate::config::{AccordionOptions, ModalOptions, SelectOptions, TabsOptions, WdsConfig};
use crate::error::{WidgetError, WidgetKind};
use crate::registry::ComponentRegistry;
use crate::widgets::{Accordion, Component, Listeners, Modal, Select, Tabs, Widget, modal};

pub mod assets;
pub mod legacy;
pub mod search;

pub const MODAL_SELECTOR: &str = "[data-modal-target]";
pub const SELECT_SELECTOR: &str = "select[data-custom-select]";
pub const TABS_SELECTOR: &str = "[data-tabs]";
pub const ACCORDION_SELECTOR: &str = "[data-accordion]";
pub const ACCORDION_ITEM_SELECTOR: &str = "[data-accordion-item]";

/// Elements in the document carrying attribute `name` equal to `value`.
pub(crate) fn find_by_attr(doc: &Document, name: &str, value: &str) -> Vec<NodeId> {
    doc.find_all(doc.root(), &Selector::attribute(name))
        .into_iter()
        .filter(|&node| doc.attr(node, name) == Some(value))
        .collect()
}

/// The toolkit instance for one document.
#[derive(Debug)]
pub struct EthioWds {
    config: WdsConfig,
    registry: Rc<RefCell<ComponentRegistry>>,
    /// Document-level listeners added by the orchestrator itself.
    listeners: Listeners,
    initialized: bool,
}

impl EthioWds {
    /// Create the toolkit, running [`init`](Self::init) when `auto_init` is set.
    pub fn new(doc: &mut Document, config: WdsConfig) -> Result<Self, WidgetError> {
        let mut wds = Self {
            config,
            registry: Rc::new(RefCell::new(ComponentRegistry::new())),
            listeners: Listeners::default(),
            initialized: false,
        };
        if wds.config.auto_init {
            wds.init(doc)?;
        }
        Ok(wds)
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn config(&self) -> &WdsConfig {
        &self.config
    }

    pub fn registry(&self) -> Ref<'_, ComponentRegistry> {
        self.registry.borrow()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Apply theme, direction and language, inject stylesheets, then bind
    /// every marked-up widget. Calling it again does nothing.
    pub fn init(&mut self, doc: &mut Document) -> Result<(), WidgetError> {
        if self.initialized {
            debug!("already initialized");
            return Ok(());
        }

        assets::apply_theme(doc, &self.config.theme);
        assets::set_direction(doc, self.config.rtl);
        assets::set_language(doc, &self.config.language);
        if self.config.load_css {
            assets::ensure_stylesheet(doc, assets::CSS_LINK_ID, &self.config.css_url);
        }
        if self.config.load_fonts {
            assets::ensure_stylesheet(
                doc,
                assets::ETHIOPIC_FONT_LINK_ID,
                &self.config.fonts.ethiopic,
            );
            assets::ensure_stylesheet(doc, assets::SANS_FONT_LINK_ID, &self.config.fonts.sans);
        }

        self.scan(doc)?;

        if self.config.legacy_compat {
            self.install_legacy_accordion(doc);
        }
        search::install(doc, &mut self.listeners);

        self.initialized = true;
        info!(
            "ethiowds {} initialized with {} components",
            Self::version(),
            self.registry.borrow().len()
        );
        Ok(())
    }

    fn scan(&self, doc: &mut Document) -> Result<(), WidgetError> {
        let root = doc.root();

        for trigger in doc.find_all(root, &Selector::parse(MODAL_SELECTOR)?) {
            let options = self.config.modal.clone();
            self.scan_one(trigger, WidgetKind::Modal, || {
                self.create_modal(doc, trigger, options)
            });
        }
        for select in doc.find_all(root, &Selector::parse(SELECT_SELECTOR)?) {
            let options = self.config.select.clone();
            self.scan_one(select, WidgetKind::Select, || {
                self.create_select(doc, select, options)
            });
        }
        for container in doc.find_all(root, &Selector::parse(TABS_SELECTOR)?) {
            let options = self.config.tabs.clone();
            self.scan_one(container, WidgetKind::Tabs, || {
                self.create_tabs(doc, container, options)
            });
        }
        for container in doc.find_all(root, &Selector::parse(ACCORDION_SELECTOR)?) {
            let options = self.config.accordion.clone();
            self.scan_one(container, WidgetKind::Accordion, || {
                self.create_accordion(doc, container, options)
            });
        }
        Ok(())
    }

    fn scan_one<W>(
        &self,
        element: NodeId,
        kind: WidgetKind,
        create: impl FnOnce() -> Result<W, WidgetError>,
    ) {
        if self.registry.borrow().contains(element) {
            debug!("{element} already bound, skipping {kind}");
            return;
        }
        if let Err(err) = create() {
            warn!("skipping {kind} on {element}: {err}");
        }
    }

    fn ensure_unbound(&self, element: NodeId) -> Result<(), WidgetError> {
        match self.registry.borrow().get(element) {
            Some(existing) => Err(WidgetError::AlreadyRegistered {
                element,
                existing: existing.kind(),
            }),
            None => Ok(()),
        }
    }

    fn register(&self, element: NodeId, component: Component) -> Result<(), WidgetError> {
        self.registry.borrow_mut().insert(element, component)
    }

    pub fn create_modal(
        &self,
        doc: &mut Document,
        trigger: NodeId,
        options: ModalOptions,
    ) -> Result<Modal, WidgetError> {
        self.ensure_unbound(trigger)?;
        let modal = Modal::new(doc, trigger, options)?;
        self.register(trigger, modal.clone().into())?;
        Ok(modal)
    }

    pub fn create_select(
        &self,
        doc: &mut Document,
        select: NodeId,
        options: SelectOptions,
    ) -> Result<Select, WidgetError> {
        self.ensure_unbound(select)?;
        let widget = Select::new(doc, select, options)?;
        self.register(select, widget.clone().into())?;
        Ok(widget)
    }

    pub fn create_tabs(
        &self,
        doc: &mut Document,
        container: NodeId,
        options: TabsOptions,
    ) -> Result<Tabs, WidgetError> {
        self.ensure_unbound(container)?;
        let tabs = Tabs::new(doc, container, options)?;
        self.register(container, tabs.clone().into())?;
        Ok(tabs)
    }

    pub fn create_accordion(
        &self,
        doc: &mut Document,
        container: NodeId,
        options: AccordionOptions,
    ) -> Result<Accordion, WidgetError> {
        self.ensure_unbound(container)?;
        let accordion = Accordion::new(doc, container, options)?;
        self.register(container, accordion.clone().into())?;
        Ok(accordion)
    }

    /// The widget bound to `element`, if any.
    pub fn get_component(&self, element: NodeId) -> Option<Component> {
        self.registry.borrow().get(element).cloned()
    }

    fn registered_modal(&self, doc: &Document, id: &str) -> Option<Modal> {
        let registry = self.registry.borrow();
        find_by_attr(doc, modal::TARGET_ATTR, id)
            .into_iter()
            .find_map(|trigger| registry.get(trigger).and_then(Component::as_modal).cloned())
    }

    /// Open the modal whose trigger targets `id`.
    pub fn open_modal(&self, doc: &mut Document, id: &str) -> Result<(), WidgetError> {
        if let Some(modal) = self.registered_modal(doc, id) {
            modal.open(doc);
            return Ok(());
        }
        if self.config.legacy_compat && legacy::open_modal(doc, id) {
            return Ok(());
        }
        Err(WidgetError::NotFound {
            kind: WidgetKind::Modal,
            id: id.to_string(),
        })
    }

    pub fn close_modal(&self, doc: &mut Document, id: &str) -> Result<(), WidgetError> {
        if let Some(modal) = self.registered_modal(doc, id) {
            modal.close(doc);
            return Ok(());
        }
        if self.config.legacy_compat && legacy::close_modal(doc, id) {
            return Ok(());
        }
        Err(WidgetError::NotFound {
            kind: WidgetKind::Modal,
            id: id.to_string(),
        })
    }

    /// Activate the tab in `[data-tabs="<group>"]` whose `data-tab` or
    /// trimmed text equals `tab_id`.
    pub fn switch_tab(
        &self,
        doc: &mut Document,
        group: &str,
        tab_id: &str,
    ) -> Result<(), WidgetError> {
        let tabs = {
            let registry = self.registry.borrow();
            find_by_attr(doc, "data-tabs", group)
                .into_iter()
                .find_map(|container| {
                    registry.get(container).and_then(Component::as_tabs).cloned()
                })
        };

        if let Some(tabs) = tabs {
            let index = tabs.tabs().iter().position(|&tab| {
                doc.attr(tab, "data-tab") == Some(tab_id) || doc.text_content(tab).trim() == tab_id
            });
            if let Some(index) = index {
                tabs.activate_tab(doc, index);
                return Ok(());
            }
        } else if self.config.legacy_compat && legacy::switch_tab(doc, group, tab_id) {
            return Ok(());
        }
        Err(WidgetError::NotFound {
            kind: WidgetKind::Tabs,
            id: format!("{group}/{tab_id}"),
        })
    }

    fn registered_accordion_for(&self, doc: &Document, node: NodeId) -> Option<Accordion> {
        let selector = Selector::attribute("data-accordion");
        let container = doc.closest(node, &selector)?;
        self.registry
            .borrow()
            .get(container)
            .and_then(Component::as_accordion)
            .cloned()
    }

    /// Toggle the accordion item containing `header`.
    pub fn toggle_accordion(&self, doc: &mut Document, header: NodeId) -> Result<(), WidgetError> {
        if let Some(accordion) = self.registered_accordion_for(doc, header) {
            let item_selector = Selector::parse(ACCORDION_ITEM_SELECTOR)?;
            if let Some(item) = doc.closest(header, &item_selector) {
                accordion.toggle_item(doc, item);
                return Ok(());
            }
        } else if self.config.legacy_compat && legacy::toggle_accordion(doc, header) {
            return Ok(());
        }
        Err(WidgetError::NotFound {
            kind: WidgetKind::Accordion,
            id: header.to_string(),
        })
    }

    fn accordions(&self) -> Vec<Accordion> {
        self.registry
            .borrow()
            .iter()
            .filter_map(|(_, component)| component.as_accordion().cloned())
            .collect()
    }

    /// Expand every item of each registered accordion that allows `multiple`.
    pub fn expand_all_accordions(&self, doc: &mut Document) {
        for accordion in self.accordions() {
            if accordion.options().multiple {
                accordion.expand_all(doc);
            }
        }
    }

    pub fn collapse_all_accordions(&self, doc: &mut Document) {
        for accordion in self.accordions() {
            accordion.collapse_all(doc);
        }
    }

    // Clicks on `.ethio-accordion-header` outside registered accordions
    fn install_legacy_accordion(&mut self, doc: &mut Document) {
        let registry = Rc::clone(&self.registry);
        let root = doc.root();
        self.listeners.track(doc.add_listener(root, EventKind::Click, move |doc, event| {
            let Some(header) = event
                .target()
                .filter(|&t| doc.has_class(t, legacy::ACCORDION_HEADER_CLASS))
            else {
                return;
            };
            let bound = doc
                .closest(header, &Selector::attribute("data-accordion"))
                .is_some_and(|container| registry.borrow().contains(container));
            if !bound {
                legacy::toggle_accordion(doc, header);
            }
        }));
    }

    /// Destroy every registered widget, clear the registry and remove the
    /// orchestrator's own listeners. `init` may be called again afterwards.
    pub fn destroy(&mut self, doc: &mut Document) {
        let mut registry = std::mem::take(&mut *self.registry.borrow_mut());
        registry.destroy_all(doc);
        self.listeners.remove_all(doc);
        self.initialized = false;
        debug!("ethiowds destroyed");
    }
}
