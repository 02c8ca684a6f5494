//! Document
//!
//! A `Document` owns a node tree and resolves mount points by `id`
//! attribute, the way the original runtime resolves its root element
//! before compiling.

use super::node::{NodeKind, NodeRef};

/// A document tree with a single root element.
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Create a document with the given root node.
    pub fn new(root: NodeRef) -> Self {
        Self { root }
    }

    /// The document's root node.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Find the first element (depth-first) whose `id` attribute equals
    /// `id`. Text nodes are never matched.
    pub fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        find_by_id(&self.root, id)
    }
}

fn find_by_id(node: &NodeRef, id: &str) -> Option<NodeRef> {
    if node.kind() == NodeKind::Element && node.attr("id").as_deref() == Some(id) {
        return Some(node.clone());
    }
    for child in node.children() {
        if let Some(found) = find_by_id(&child, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_element_by_id() {
        let target = NodeRef::element("span").set_attr("id", "target");
        let root = NodeRef::element("body").append_child(
            NodeRef::element("div").append_child(target.clone()),
        );
        let document = Document::new(root);

        let found = document.element_by_id("target").unwrap();
        assert_eq!(found.tag().as_deref(), Some("span"));
    }

    #[test]
    fn missing_id_yields_none() {
        let document = Document::new(NodeRef::element("body"));
        assert!(document.element_by_id("nowhere").is_none());
    }
}
