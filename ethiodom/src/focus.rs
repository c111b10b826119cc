use std::sync::OnceLock;

use crate::document::{Document, NodeId};
use crate::selector::Selector;

/// Elements that can receive keyboard focus.
pub const FOCUSABLE_SELECTOR: &str =
    r#"button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])"#;

fn focusable_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        // FOCUSABLE_SELECTOR always parses (covered by tests).
        Selector::parse(FOCUSABLE_SELECTOR).unwrap_or_else(|_| Selector::attribute("tabindex"))
    })
}

/// Tracks which node is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus a node. Returns true if focus changed.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if self.focused == Some(node) {
            return false;
        }
        self.focused = Some(node);
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }
}

/// Focusable descendants of `scope` in document order.
pub fn collect_focusable(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    doc.find_all(scope, focusable_selector())
}

impl Document {
    /// Move focus to `node`. Detached nodes cannot take focus.
    /// Returns true if focus changed.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            log::debug!("ignoring focus request for detached {node}");
            return false;
        }
        self.focus.focus(node)
    }

    pub fn blur(&mut self) -> bool {
        self.focus.blur()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Focus the next focusable element in the body (Tab navigation), wrapping
    /// around. Returns the newly focused node if focus changed.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        let focusable = collect_focusable(self, self.body());
        let first = *focusable.first()?;

        let next = match self.focus.focused() {
            None => first,
            Some(current) => match focusable.iter().position(|&n| n == current) {
                Some(i) => focusable[(i + 1) % focusable.len()],
                None => first,
            },
        };

        self.focus.focus(next).then_some(next)
    }

    /// Focus the previous focusable element in the body (Shift+Tab
    /// navigation), wrapping around.
    pub fn focus_prev(&mut self) -> Option<NodeId> {
        let focusable = collect_focusable(self, self.body());
        let last = *focusable.last()?;

        let prev = match self.focus.focused() {
            None => last,
            Some(current) => match focusable.iter().position(|&n| n == current) {
                Some(0) | None => last,
                Some(i) => focusable[i - 1],
            },
        };

        self.focus.focus(prev).then_some(prev)
    }
}
