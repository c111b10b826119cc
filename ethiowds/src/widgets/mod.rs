//! Widgets bound to document subtrees.
//!
//! Every widget is a cheap-to-clone handle: node ids discovered at
//! construction plus immutable options. Open/expanded/selected state lives
//! in the document's attributes and classes, so event listeners can capture
//! a clone and operate on the same state as the caller's copy. Lifecycle
//! state (listener handles, injected markup) is shared between clones, so
//! destroying any clone tears down all of them.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ethiodom::{Document, ListenerId, NodeId};

use crate::error::WidgetKind;

pub mod accordion;
pub mod modal;
pub mod select;
pub mod tabs;

pub use accordion::{Accordion, AccordionItem};
pub use modal::Modal;
pub use select::Select;
pub use tabs::Tabs;

/// Lifecycle shared by all widgets.
pub trait Widget {
    fn kind(&self) -> WidgetKind;

    /// The element the widget is bound to (its registry key).
    fn root(&self) -> NodeId;

    /// Apply initial ARIA state and attach listeners. Calling it again on
    /// an initialized widget does nothing.
    fn initialize(&mut self, doc: &mut Document);

    /// Remove every listener and any markup the widget injected.
    fn destroy(&mut self, doc: &mut Document);

    /// True when the expected markup was missing and the widget does nothing.
    fn is_inert(&self) -> bool;

    /// True once this widget, or any clone of it, has been destroyed.
    fn is_destroyed(&self) -> bool;
}

/// Any of the four widgets, as stored in the registry.
#[derive(Debug, Clone)]
pub enum Component {
    Accordion(Accordion),
    Modal(Modal),
    Select(Select),
    Tabs(Tabs),
}

impl Component {
    pub fn as_accordion(&self) -> Option<&Accordion> {
        match self {
            Self::Accordion(accordion) => Some(accordion),
            _ => None,
        }
    }

    pub fn as_modal(&self) -> Option<&Modal> {
        match self {
            Self::Modal(modal) => Some(modal),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn as_tabs(&self) -> Option<&Tabs> {
        match self {
            Self::Tabs(tabs) => Some(tabs),
            _ => None,
        }
    }

    fn widget(&self) -> &dyn Widget {
        match self {
            Self::Accordion(w) => w,
            Self::Modal(w) => w,
            Self::Select(w) => w,
            Self::Tabs(w) => w,
        }
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            Self::Accordion(w) => w,
            Self::Modal(w) => w,
            Self::Select(w) => w,
            Self::Tabs(w) => w,
        }
    }
}

impl Widget for Component {
    fn kind(&self) -> WidgetKind {
        self.widget().kind()
    }

    fn root(&self) -> NodeId {
        self.widget().root()
    }

    fn initialize(&mut self, doc: &mut Document) {
        self.widget_mut().initialize(doc)
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.widget_mut().destroy(doc)
    }

    fn is_inert(&self) -> bool {
        self.widget().is_inert()
    }

    fn is_destroyed(&self) -> bool {
        self.widget().is_destroyed()
    }
}

impl From<Accordion> for Component {
    fn from(accordion: Accordion) -> Self {
        Self::Accordion(accordion)
    }
}

impl From<Modal> for Component {
    fn from(modal: Modal) -> Self {
        Self::Modal(modal)
    }
}

impl From<Select> for Component {
    fn from(select: Select) -> Self {
        Self::Select(select)
    }
}

impl From<Tabs> for Component {
    fn from(tabs: Tabs) -> Self {
        Self::Tabs(tabs)
    }
}

/// Listener handles owned by one widget, shared by all of its clones.
#[derive(Debug, Clone, Default)]
pub(crate) struct Listeners(Rc<RefCell<ListenerSet>>);

#[derive(Debug, Default)]
struct ListenerSet {
    ids: Vec<ListenerId>,
    destroyed: bool,
}

impl Listeners {
    pub(crate) fn track(&self, id: ListenerId) {
        let mut set = self.0.borrow_mut();
        set.ids.push(id);
        set.destroyed = false;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.borrow().ids.is_empty()
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.0.borrow().destroyed
    }

    pub(crate) fn remove_all(&self, doc: &mut Document) {
        let ids = {
            let mut set = self.0.borrow_mut();
            set.destroyed = true;
            std::mem::take(&mut set.ids)
        };
        for id in ids {
            doc.remove_listener(id);
        }
    }
}

/// Process-wide counter for generated element ids.
pub(crate) fn next_generated_id(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("{prefix}-{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}
