use super::Content;

/// Unmounted markup description.
///
/// Built with chained setters and turned into live nodes with
/// [`Document::mount`](crate::Document::mount) or
/// [`Document::mount_after`](crate::Document::mount_after).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub style: Vec<(String, String)>,
    pub content: Content,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// A `<button type="button">`.
    pub fn button() -> Self {
        Self::new("button").attr("type", "button")
    }

    pub fn ul() -> Self {
        Self::new("ul")
    }

    pub fn li() -> Self {
        Self::new("li")
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    /// An `<option>` with an explicit value and a visible label.
    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new("option").attr("value", value).text(label)
    }

    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new("link").attr("rel", rel).attr("href", href)
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute such as `hidden` or `selected`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a class to the `class` attribute.
    pub fn class(self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref();
        let joined = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attr("class", joined)
    }

    // Visual
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.style.push((property, value)),
        }
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => {
                // Replace any text content with children
                self.content = Content::Children(vec![child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => {
                self.content = Content::Children(new_children.into_iter().collect());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_appends_to_existing_list() {
        let el = Element::div().class("a").class("b");
        assert_eq!(el.get_attr("class"), Some("a b"));
    }

    #[test]
    fn attr_overwrites_in_place() {
        let el = Element::div().attr("data-x", "1").attr("data-x", "2");
        assert_eq!(el.attributes, vec![("data-x".to_string(), "2".to_string())]);
    }

    #[test]
    fn child_replaces_text() {
        let el = Element::div().text("hello").child(Element::span());
        assert!(matches!(el.content, Content::Children(ref c) if c.len() == 1));
    }
}
