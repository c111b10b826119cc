use std::collections::BTreeMap;

use crate::document::NodeId;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// The space bar.
    pub const SPACE: Key = Key::Char(' ');

    /// Enter or Space, the keys that activate buttons and triggers.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// What an event is, used to match listeners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Input,
    Change,
    /// Named notification such as `accordion:expand`.
    Custom(String),
}

impl EventKind {
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Input => "input",
            Self::Change => "change",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload carried by notification events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDetail {
    nodes: BTreeMap<String, NodeId>,
    indices: BTreeMap<String, usize>,
}

impl EventDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, name: impl Into<String>, node: NodeId) -> Self {
        self.nodes.insert(name.into(), node);
        self
    }

    pub fn with_index(mut self, name: impl Into<String>, index: usize) -> Self {
        self.indices.insert(name.into(), index);
        self
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes.get(name).copied()
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.indices.is_empty()
    }
}

/// An event travelling through the document.
///
/// `target` and `current_target` are filled in by
/// [`Document::dispatch`](crate::Document::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    key: Option<Key>,
    detail: EventDetail,
    bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            key: None,
            detail: EventDetail::default(),
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn click() -> Self {
        Self::new(EventKind::Click)
    }

    pub fn key_down(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown)
        }
    }

    pub fn input() -> Self {
        Self::new(EventKind::Input)
    }

    pub fn change() -> Self {
        Self::new(EventKind::Change)
    }

    pub fn custom(name: impl Into<String>, detail: EventDetail) -> Self {
        Self {
            detail,
            ..Self::new(EventKind::custom(name))
        }
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn key(&self) -> Option<Key> {
        self.key
    }

    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    pub fn does_bubble(&self) -> bool {
        self.bubbles
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_target(&mut self, target: NodeId) {
        self.target = Some(target);
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = Some(node);
    }
}
