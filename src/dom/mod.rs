//! Lightweight mutable XML DOM
//!
//! The mapping core only needs a narrow host contract: look a node up by an
//! opaque id, read and write attributes, create and move elements, and make
//! all writes of one operation land together or not at all. This arena DOM is
//! that contract made concrete. Parsing from text lives in [`parse`],
//! serialization in [`write`].

mod parse;
mod write;

pub use parse::parse;
pub use write::{to_xml, to_xml_pretty};

use indexmap::IndexMap;

use crate::utils::error::WriteError;

/// Opaque node handle into a [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Qualified element name: local name plus namespace URI
///
/// An empty namespace URI means "no namespace".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub local: String,
    pub namespace_uri: String,
}

impl QName {
    pub fn new(local: impl Into<String>, namespace_uri: impl Into<String>) -> Self {
        QName {
            local: local.into(),
            namespace_uri: namespace_uri.into(),
        }
    }

    /// Whether this name matches the given local name and namespace URI
    pub fn matches(&self, local: &str, namespace_uri: &str) -> bool {
        self.local == local && self.namespace_uri == namespace_uri
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    name: QName,
    /// Attribute local names are unqualified; insertion order is preserved
    /// so serialized output is deterministic.
    attributes: IndexMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Direct text content of the element
    text: String,
}

/// An arena of element nodes forming one XML fragment
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// The root element of the fragment
    ///
    /// Panics when called on an empty document; every parsed document has a
    /// root.
    pub fn root(&self) -> NodeId {
        self.root.expect("document has no root element")
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: QName) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name,
            attributes: IndexMap::new(),
            children: Vec::new(),
            parent: None,
            text: String::new(),
        });
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    pub fn name(&self, id: NodeId) -> &QName {
        &self.data(id).name
    }

    pub fn attribute(&self, id: NodeId, local: &str) -> Option<&str> {
        self.data(id).attributes.get(local).map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> &IndexMap<String, String> {
        &self.data(id).attributes
    }

    /// Set an attribute, rejecting names the host layer would refuse
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        local: &str,
        value: &str,
    ) -> Result<(), WriteError> {
        if local.is_empty() || local.contains(|c: char| c.is_whitespace() || c == '<' || c == '>')
        {
            return Err(WriteError::new(format!("invalid attribute name '{}'", local)));
        }
        self.data_mut(id)
            .attributes
            .insert(local.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, local: &str) {
        self.data_mut(id).attributes.shift_remove(local);
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.data(id).text
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.data_mut(id).text = text.into();
    }

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it already sits elsewhere in the tree
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.data_mut(child).parent = Some(parent);
        self.data_mut(parent).children.push(child);
    }

    /// Insert `child` under `parent` immediately before `reference`
    ///
    /// With no reference node this appends.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        self.detach(child);
        self.data_mut(child).parent = Some(parent);
        let children = &mut self.data_mut(parent).children;
        match reference.and_then(|r| children.iter().position(|&c| c == r)) {
            Some(pos) => children.insert(pos, child),
            None => children.push(child),
        }
    }

    /// Remove a node from its parent's child list, keeping its subtree intact
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.data(id).parent {
            self.data_mut(parent).children.retain(|&c| c != id);
            self.data_mut(id).parent = None;
        }
    }

    /// First child of `id` for which `predicate` holds
    pub fn find_child<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| predicate(self, child))
    }

    /// First element in depth-first document order for which `predicate` holds
    pub fn find_descendant<F>(&self, from: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                return Some(id);
            }
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// First ancestor (excluding `from` itself) for which `predicate` holds
    pub fn find_ancestor<F>(&self, from: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let mut current = self.parent(from);
        while let Some(id) = current {
            if predicate(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Run `mutate` as one transaction
    ///
    /// The closure's writes are kept only when it returns `true`; otherwise
    /// the document is restored to its state before the call. This is the
    /// all-or-nothing scope the synthesizer and the border mutation run in.
    pub fn transact<F>(&mut self, mutate: F) -> bool
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let snapshot = self.nodes.clone();
        if mutate(self) {
            true
        } else {
            self.nodes = snapshot;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(local: &str) -> QName {
        QName::new(local, "")
    }

    #[test]
    fn test_create_and_append() {
        let mut doc = Document::new();
        let root = doc.create_element(qn("table"));
        let child = doc.create_element(qn("tgroup"));
        doc.append_child(root, child);

        assert_eq!(doc.root(), root);
        assert_eq!(doc.children(root), &[child]);
        assert_eq!(doc.parent(child), Some(root));
    }

    #[test]
    fn test_insert_before() {
        let mut doc = Document::new();
        let root = doc.create_element(qn("tgroup"));
        let tbody = doc.create_element(qn("tbody"));
        doc.append_child(root, tbody);
        let colspec = doc.create_element(qn("colspec"));
        doc.insert_before(root, colspec, Some(tbody));

        assert_eq!(doc.children(root), &[colspec, tbody]);
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let mut doc = Document::new();
        let root = doc.create_element(qn("row"));
        let entry = doc.create_element(qn("entry"));
        let inner = doc.create_element(qn("para"));
        doc.append_child(root, entry);
        doc.append_child(entry, inner);

        doc.detach(entry);
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.children(entry), &[inner]);
        assert_eq!(doc.parent(entry), None);
    }

    #[test]
    fn test_set_attribute_rejects_bad_names() {
        let mut doc = Document::new();
        let root = doc.create_element(qn("entry"));
        assert!(doc.set_attribute(root, "", "x").is_err());
        assert!(doc.set_attribute(root, "a b", "x").is_err());
        assert!(doc.set_attribute(root, "colname", "column-0").is_ok());
    }

    #[test]
    fn test_transact_rolls_back() {
        let mut doc = Document::new();
        let root = doc.create_element(qn("entry"));
        doc.set_attribute(root, "colname", "column-0").unwrap();

        let committed = doc.transact(|d| {
            d.set_attribute(root, "colname", "column-9").unwrap();
            false
        });
        assert!(!committed);
        assert_eq!(doc.attribute(root, "colname"), Some("column-0"));

        let committed = doc.transact(|d| {
            d.set_attribute(root, "colname", "column-1").unwrap();
            true
        });
        assert!(committed);
        assert_eq!(doc.attribute(root, "colname"), Some("column-1"));
    }
}
