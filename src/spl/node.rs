//! Owned element subtrees
//!
//! The streamer yields one [`XmlNode`] per matched product unit: the
//! element, its attributes, its text, and its children, detached from the
//! parse buffer. Navigation distinguishes direct children from descendants
//! because SPL nests same-named elements (`manufacturedProduct` inside
//! `manufacturedProduct`, `code` at every level) and a document-wide search
//! would pick up false matches.

/// One element captured from the document, with its full subtree.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an empty node with the given local name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Local element name (namespace prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of an attribute, matched by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content directly under this element (child text excluded).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All direct children.
    pub fn child_nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct children with the given local name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child with the given local name.
    pub fn first_child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Strict descendants with the given local name, in document order.
    pub fn descendants<'a>(&'a self, name: &'a str) -> Descendants<'a> {
        Descendants {
            name,
            // reversed so pop() walks children in document order
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First strict descendant with the given local name.
    pub fn first_descendant<'a>(&'a self, name: &'a str) -> Option<&'a XmlNode> {
        self.descendants(name).next()
    }

    pub(crate) fn push_attribute(&mut self, key: String, value: String) {
        self.attributes.push((key, value));
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }
}

/// Pre-order iterator over strict descendants matching a local name.
pub struct Descendants<'a> {
    name: &'a str,
    stack: Vec<&'a XmlNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            for child in node.children.iter().rev() {
                self.stack.push(child);
            }
            if node.name == self.name {
                return Some(node);
            }
        }
        None
    }
}
