//! Registry of bound widgets.

use std::collections::HashMap;

use ethiodom::{Document, NodeId};
use log::debug;

use crate::error::WidgetError;
use crate::widgets::{Component, Widget};

/// Maps each bound element to the widget that owns it.
///
/// The registry tracks:
/// - Every registered widget, keyed by its root element
/// - Registration order, used for iteration and teardown
///
/// A widget destroyed through any of its handles no longer counts as bound:
/// lookups skip it and a new widget may take its element.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<NodeId, Component>,

    /// Keys in the order they were inserted.
    order: Vec<NodeId>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `element`.
    ///
    /// An element can own at most one live widget; a second registration is
    /// rejected and the existing widget stays bound.
    pub fn insert(&mut self, element: NodeId, component: Component) -> Result<(), WidgetError> {
        if let Some(existing) = self.components.get(&element) {
            if !existing.is_destroyed() {
                return Err(WidgetError::AlreadyRegistered {
                    element,
                    existing: existing.kind(),
                });
            }
            debug!("replacing destroyed {} on {element}", existing.kind());
            self.remove(element);
        }
        debug!("registered {} for {element}", component.kind());
        self.components.insert(element, component);
        self.order.push(element);
        Ok(())
    }

    pub fn get(&self, element: NodeId) -> Option<&Component> {
        self.components.get(&element).filter(|c| !c.is_destroyed())
    }

    pub fn get_mut(&mut self, element: NodeId) -> Option<&mut Component> {
        self.components
            .get_mut(&element)
            .filter(|c| !c.is_destroyed())
    }

    pub fn contains(&self, element: NodeId) -> bool {
        self.get(element).is_some()
    }

    /// Unregister without destroying. The caller owns the returned widget.
    pub fn remove(&mut self, element: NodeId) -> Option<Component> {
        let component = self.components.remove(&element)?;
        self.order.retain(|&e| e != element);
        Some(component)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live widgets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Component)> + '_ {
        self.order
            .iter()
            .filter_map(|&element| self.get(element).map(|c| (element, c)))
    }

    /// Destroy every widget in registration order and clear the registry.
    pub fn destroy_all(&mut self, doc: &mut Document) {
        for element in std::mem::take(&mut self.order) {
            if let Some(mut component) = self.components.remove(&element) {
                component.destroy(doc);
            }
        }
        debug!("registry cleared");
    }
}
