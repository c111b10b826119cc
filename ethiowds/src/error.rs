//! Widget error types.

use ethiodom::{NodeId, SelectorError};
use thiserror::Error;

/// The four widget variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Accordion,
    Modal,
    Select,
    Tabs,
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Accordion => "accordion",
            Self::Modal => "modal",
            Self::Select => "select",
            Self::Tabs => "tabs",
        };
        f.write_str(name)
    }
}

/// Errors surfaced while binding widgets to markup.
///
/// Missing structure (no accordion items, absent modal target, no tablist) is
/// not an error: those widgets are built inert and a warning is logged.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("{kind} cannot bind to {element}: {reason}")]
    InvalidElement {
        kind: WidgetKind,
        element: NodeId,
        reason: &'static str,
    },

    #[error("tabs container {container} has {tabs} tabs but {panels} panels")]
    TabPanelMismatch {
        container: NodeId,
        tabs: usize,
        panels: usize,
    },

    #[error("select {0} has no options")]
    NoOptions(NodeId),

    #[error("{element} is already bound to a {existing} widget")]
    AlreadyRegistered { element: NodeId, existing: WidgetKind },

    #[error("no {kind} found for {id:?}")]
    NotFound { kind: WidgetKind, id: String },

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
