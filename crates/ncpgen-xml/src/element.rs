//! Mutable element tree.

/// An XML element with its attributes, text content and child elements.
///
/// Attribute order and child order are preserved as read. Character data is
/// kept verbatim: `text` is what precedes the first child, and each child's
/// `tail` is what follows its end tag. Runs that are only whitespace are
/// indentation and are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name of the element.
    pub name: String,
    /// Character data before the first child.
    pub text: String,
    /// Character data after this element's end tag, inside its parent.
    pub tail: String,
    /// Attributes as key-value pairs.
    pub attributes: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the text content of this element.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute to this element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    /// Get the first child element with the given name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Get the first child element with the given name, mutably.
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Get the first child element with the given name, appending an empty
    /// one if there is none.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.children.push(Element::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Iterate over the child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Get the text of the first child element with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find_child(name).map(|c| c.text.as_str())
    }

    /// Set the text of the first child element with the given name, creating
    /// the child if needed.
    pub fn set_child_text(&mut self, name: &str, text: impl Into<String>) {
        self.child_or_insert(name).text = text.into();
    }

    /// Replace every child named `name` with `replacement`.
    ///
    /// Children with other names are kept in place; the replacement elements
    /// are appended after them. Returns the number of children removed.
    pub fn replace_children_named(&mut self, name: &str, replacement: Vec<Element>) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.name != name);
        let removed = before - self.children.len();
        self.children.extend(replacement);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("ARM9Ovt")
            .attr("Kind", "table")
            .child(Element::new("RomOVT").attr("Id", "1"))
            .child(Element::new("Note").text("keep me"))
            .child(Element::new("RomOVT").attr("Id", "0"))
    }

    #[test]
    fn test_attribute_get_set() {
        let mut elem = sample();
        assert_eq!(elem.attribute("Kind"), Some("table"));
        assert_eq!(elem.attribute("Missing"), None);

        elem.set_attribute("Kind", "overlays");
        elem.set_attribute("Extra", "1");
        assert_eq!(elem.attribute("Kind"), Some("overlays"));
        assert_eq!(elem.attributes.len(), 2);
        assert_eq!(elem.attributes[0].0, "Kind");
    }

    #[test]
    fn test_children_named_in_order() {
        let elem = sample();
        let ids: Vec<_> = elem
            .children_named("RomOVT")
            .map(|c| c.attribute("Id").unwrap())
            .collect();
        assert_eq!(ids, ["1", "0"]);
    }

    #[test]
    fn test_child_text() {
        let mut elem = Element::new("Header");
        assert_eq!(elem.child_text("MainRamAddress"), None);

        elem.set_child_text("MainRamAddress", "33554432");
        elem.set_child_text("MainRamAddress", "33554433");
        assert_eq!(elem.child_text("MainRamAddress"), Some("33554433"));
        assert_eq!(elem.children.len(), 1);
    }

    #[test]
    fn test_replace_children_named_keeps_others() {
        let mut elem = sample();
        let removed = elem.replace_children_named("RomOVT", vec![Element::new("RomOVT").attr("Id", "5")]);

        assert_eq!(removed, 2);
        let names: Vec<_> = elem.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Note", "RomOVT"]);
        assert_eq!(elem.children[1].attribute("Id"), Some("5"));
    }

    #[test]
    fn test_child_or_insert() {
        let mut elem = Element::new("RomInfo");
        elem.child_or_insert("ARM7Ovt").set_attribute("A", "1");
        elem.child_or_insert("ARM7Ovt").set_attribute("B", "2");

        assert_eq!(elem.children.len(), 1);
        assert_eq!(elem.find_child("ARM7Ovt").unwrap().attributes.len(), 2);
    }
}
