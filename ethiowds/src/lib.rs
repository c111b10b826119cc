//! Ethiopian design system widgets.
//!
//! Accordion, modal, custom select and tabs behaviors bound to an
//! [`ethiodom::Document`], plus [`EthioWds`], which discovers them from
//! markup attributes and applies page-level theme and asset setup.
//!
//! ```ignore
//! let mut doc = Document::new();
//! // ... build the page ...
//! let wds = EthioWds::new(&mut doc, WdsConfig::default().theme("dark"))?;
//! wds.open_modal(&mut doc, "welcome")?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod registry;
pub mod widgets;

pub use config::{AccordionOptions, FontUrls, ModalOptions, SelectOptions, TabsOptions, WdsConfig};
pub use error::{WidgetError, WidgetKind};
pub use orchestrator::EthioWds;
pub use registry::ComponentRegistry;
pub use widgets::{Accordion, AccordionItem, Component, Modal, Select, Tabs, Widget};

pub mod prelude {
    pub use crate::config::{AccordionOptions, ModalOptions, SelectOptions, TabsOptions, WdsConfig};
    pub use crate::error::{WidgetError, WidgetKind};
    pub use crate::orchestrator::EthioWds;
    pub use crate::widgets::{Accordion, Component, Modal, Select, Tabs, Widget};

    pub use ethiodom::{Document, Element, Event, EventKind, Key, NodeId};
}
