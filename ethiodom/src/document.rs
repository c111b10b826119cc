use std::collections::HashMap;

use crate::dispatch::Listener;
use crate::element::{Content, Element};
use crate::focus::FocusState;

/// Handle to a node in a [`Document`].
///
/// Equality is identity: two structurally identical elements have
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            style: Vec::new(),
        }
    }
}

/// A live document tree.
///
/// The tree always starts as `#document > html > (head, body)`. Nodes are
/// stored in an arena and never freed; removing a node only detaches it.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    html: NodeId,
    head: NodeId,
    body: NodeId,
    pub(crate) focus: FocusState,
    pub(crate) listeners: HashMap<NodeId, Vec<Listener>>,
    pub(crate) next_listener: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("focused", &self.focus.focused())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new(NodeKind::Document)],
            root: NodeId(0),
            html: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            focus: FocusState::new(),
            listeners: HashMap::new(),
            next_listener: 0,
        };
        doc.html = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.html);
        doc.append_child(doc.html, doc.head);
        doc.append_child(doc.html, doc.body);
        doc
    }

    /// The `#document` node, ancestor of everything connected.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> NodeId {
        self.html
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    /// Lowercase tag name, or `None` for text and document nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, NodeKind::Element(_))
    }

    // -------------------------------------------------------------------------
    // Tree construction
    // -------------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(NodeKind::Element(tag.to_ascii_lowercase())));
        id
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(NodeKind::Text(text.to_string())));
        id
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached somewhere. Returns false if that would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.contains(child, parent) {
            log::warn!("refusing to append {child} inside its own subtree");
            return false;
        }
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        true
    }

    /// Insert `node` right after `reference` in its parent.
    /// Returns false if `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.node(reference).parent else {
            return false;
        };
        if self.contains(node, parent) {
            log::warn!("refusing to insert {node} inside its own subtree");
            return false;
        }
        self.detach(node);
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == reference)
            .map_or(self.node(parent).children.len(), |i| i + 1);
        self.node_mut(node).parent = Some(parent);
        self.node_mut(parent).children.insert(position, node);
        true
    }

    /// Detach a subtree from the document. Clears focus if the focused node
    /// was inside it.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(focused) = self.focus.focused() {
            if self.contains(node, focused) {
                self.focus.blur();
            }
        }
        self.detach(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Build an unmounted [`Element`] tree and append it to `parent`.
    pub fn mount(&mut self, parent: NodeId, element: &Element) -> NodeId {
        let node = self.build(element);
        self.append_child(parent, node);
        node
    }

    /// Build an unmounted [`Element`] tree and insert it after `reference`.
    pub fn mount_after(&mut self, reference: NodeId, element: &Element) -> NodeId {
        let node = self.build(element);
        self.insert_after(reference, node);
        node
    }

    fn build(&mut self, element: &Element) -> NodeId {
        let node = self.create_element(&element.tag);
        self.node_mut(node).attributes = element.attributes.clone();
        self.node_mut(node).style = element.style.clone();
        match &element.content {
            Content::None => {}
            Content::Text(text) => {
                if !text.is_empty() {
                    let text = self.create_text(text);
                    self.append_child(node, text);
                }
            }
            Content::Children(children) => {
                for child in children {
                    let child = self.build(child);
                    self.append_child(node, child);
                }
            }
        }
        node
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        self.children(parent)
            .iter()
            .skip_while(|&&c| c != node)
            .skip(1)
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// `node` followed by each of its ancestors up to the root.
    pub fn path_to_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Whether `node` is attached to this document's root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.path_to_root(node).last() == Some(&self.root)
    }

    /// Inclusive: a node contains itself.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.path_to_root(node).contains(&ancestor)
    }

    /// Element descendants of `scope` in document order, `scope` excluded.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.collect_descendants(scope, &mut result);
        result
    }

    fn collect_descendants(&self, node: NodeId, result: &mut Vec<NodeId>) {
        for &child in self.children(node) {
            if self.is_element(child) {
                result.push(child);
                self.collect_descendants(child, result);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let attributes = &mut self.node_mut(node).attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns true if the attribute was present.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        let attributes = &mut self.node_mut(node).attributes;
        let before = attributes.len();
        attributes.retain(|(n, _)| n != name);
        attributes.len() != before
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id").filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attr(node, "id", id);
    }

    /// First connected element with the given id, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.id_of(n) == Some(id))
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.has_attr(node, "hidden")
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.set_attr(node, "hidden", "");
        } else {
            self.remove_attr(node, "hidden");
        }
    }

    // -------------------------------------------------------------------------
    // Class list
    // -------------------------------------------------------------------------

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut classes: Vec<String> = self.classes(node).into_iter().map(String::from).collect();
        classes.push(class.to_string());
        self.set_attr(node, "class", &classes.join(" "));
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let classes: Vec<String> = self
            .classes(node)
            .into_iter()
            .filter(|&c| c != class)
            .map(String::from)
            .collect();
        self.set_attr(node, "class", &classes.join(" "));
    }

    /// Toggle a class, or force it on/off. Returns whether the class is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.has_class(node, class));
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        present
    }

    // -------------------------------------------------------------------------
    // Inline style
    // -------------------------------------------------------------------------

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)
            .style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property. An empty value removes the property.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if value.is_empty() {
            self.remove_style(node, property);
            return;
        }
        let style = &mut self.node_mut(node).style;
        match style.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }
    }

    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        self.node_mut(node).style.retain(|(p, _)| p != property);
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let NodeKind::Text(text) = &self.node(node).kind {
            out.push_str(text);
        }
        for &child in self.children(node) {
            self.collect_text(child, out);
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in self.node(node).children.clone() {
            self.remove(child);
        }
        if !text.is_empty() {
            let text = self.create_text(text);
            self.append_child(node, text);
        }
    }

    // -------------------------------------------------------------------------
    // Form state
    // -------------------------------------------------------------------------

    /// `<option>` descendants of a `<select>`, in document order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|&n| self.tag(n) == Some("option"))
            .collect()
    }

    /// The `value` attribute of an option, or its trimmed text.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }

    /// Index of the selected option: the last one carrying `selected`,
    /// otherwise the first option. `None` when there are no options.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let options = self.options(select);
        if options.is_empty() {
            return None;
        }
        let marked = options
            .iter()
            .rposition(|&o| self.has_attr(o, "selected"));
        Some(marked.unwrap_or(0))
    }

    /// Current value of a form control. For `<select>`, the selected option's value.
    pub fn value(&self, node: NodeId) -> String {
        if self.tag(node) == Some("select") {
            return self
                .selected_index(node)
                .and_then(|i| self.options(node).get(i).copied())
                .map(|o| self.option_value(o))
                .unwrap_or_default();
        }
        self.attr(node, "value").unwrap_or_default().to_string()
    }

    /// Set the value of a form control. For `<select>`, marks the first option
    /// with a matching value as selected and clears the rest.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if self.tag(node) != Some("select") {
            self.set_attr(node, "value", value);
            return;
        }
        let mut matched = false;
        for option in self.options(node) {
            if !matched && self.option_value(option) == value {
                self.set_attr(option, "selected", "");
                matched = true;
            } else {
                self.remove_attr(option, "selected");
            }
        }
        if !matched {
            log::debug!("no option with value {value:?} in {node}");
        }
    }
}
