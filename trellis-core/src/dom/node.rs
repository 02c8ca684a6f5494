//! Document Nodes
//!
//! An in-memory document tree with the operations the template compiler
//! and binders require: node-kind classification, ordered attribute
//! access, child relocation, text/value content, and synchronous event
//! dispatch.
//!
//! Nodes are shared handles ([`NodeRef`]): cloning a handle aliases the
//! same node, which is how a binding's render callback and the tree itself
//! refer to one node. Listeners are invoked outside the node lock, so a
//! listener may freely read or mutate the node it fired on.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::{Arc, RwLock};

/// Classification of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a tag, attributes, and children.
    Element,

    /// A text node with character content.
    Text,
}

/// An event listener installed on an element.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

enum NodeData {
    Element {
        tag: String,
        /// Attribute iteration order is a contract (directives are
        /// processed in this order), so insertion order is preserved.
        attributes: IndexMap<String, String>,
        /// The element's value property (form controls). Distinct from
        /// the `value` attribute, as in a real document tree.
        value: String,
        listeners: SmallVec<[(String, Listener); 2]>,
        children: Vec<NodeRef>,
    },
    Text {
        content: String,
    },
}

/// A shared handle to one document node.
#[derive(Clone)]
pub struct NodeRef(Arc<RwLock<NodeData>>);

impl NodeRef {
    /// Create an element node with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(NodeData::Element {
            tag: tag.into(),
            attributes: IndexMap::new(),
            value: String::new(),
            listeners: SmallVec::new(),
            children: Vec::new(),
        })))
    }

    /// Create a text node with the given content.
    pub fn text(content: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(NodeData::Text {
            content: content.into(),
        })))
    }

    /// Classify this node.
    pub fn kind(&self) -> NodeKind {
        match *self.read() {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
        }
    }

    /// The element's tag, or `None` for text nodes.
    pub fn tag(&self) -> Option<String> {
        match &*self.read() {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            NodeData::Text { .. } => None,
        }
    }

    /// Set an attribute, preserving insertion order for new names.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let NodeData::Element { attributes, .. } = &mut *self.write() {
            attributes.insert(name.into(), value.into());
        }
        self.clone()
    }

    /// Read an attribute.
    pub fn attr(&self, name: &str) -> Option<String> {
        match &*self.read() {
            NodeData::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeData::Text { .. } => None,
        }
    }

    /// Snapshot the attribute names in iteration order.
    pub fn attribute_names(&self) -> Vec<String> {
        match &*self.read() {
            NodeData::Element { attributes, .. } => {
                attributes.keys().cloned().collect()
            }
            NodeData::Text { .. } => Vec::new(),
        }
    }

    /// Remove an attribute. Removal preserves the order of the rest.
    pub fn remove_attr(&self, name: &str) {
        if let NodeData::Element { attributes, .. } = &mut *self.write() {
            attributes.shift_remove(name);
        }
    }

    /// Append a child node.
    pub fn append_child(&self, child: NodeRef) -> Self {
        if let NodeData::Element { children, .. } = &mut *self.write() {
            children.push(child);
        }
        self.clone()
    }

    /// Append several children, preserving order.
    pub fn append_children(&self, nodes: Vec<NodeRef>) {
        if let NodeData::Element { children, .. } = &mut *self.write() {
            children.extend(nodes);
        }
    }

    /// Detach and return all children (move semantics: the node is left
    /// childless and the returned handles are the same nodes, not copies).
    pub fn take_children(&self) -> Vec<NodeRef> {
        match &mut *self.write() {
            NodeData::Element { children, .. } => std::mem::take(children),
            NodeData::Text { .. } => Vec::new(),
        }
    }

    /// Snapshot the current children.
    pub fn children(&self) -> Vec<NodeRef> {
        match &*self.read() {
            NodeData::Element { children, .. } => children.clone(),
            NodeData::Text { .. } => Vec::new(),
        }
    }

    /// Replace a text node's content. No-op on elements.
    pub fn set_text(&self, content: impl Into<String>) {
        if let NodeData::Text { content: current } = &mut *self.write() {
            *current = content.into();
        }
    }

    /// An element's value property (empty string for text nodes).
    pub fn value(&self) -> String {
        match &*self.read() {
            NodeData::Element { value, .. } => value.clone(),
            NodeData::Text { .. } => String::new(),
        }
    }

    /// Set an element's value property. Programmatic writes do not
    /// dispatch events, matching document semantics.
    pub fn set_value(&self, value: impl Into<String>) {
        if let NodeData::Element { value: current, .. } = &mut *self.write() {
            *current = value.into();
        }
    }

    /// Install a listener for the given event type.
    pub fn add_event_listener<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let NodeData::Element { listeners, .. } = &mut *self.write() {
            listeners.push((event.into(), Arc::new(listener)));
        }
    }

    /// Dispatch an event synchronously, invoking matching listeners in
    /// installation order. Returns how many listeners ran.
    ///
    /// Listeners are snapshotted and invoked with no node lock held, so
    /// they may mutate this node (including its value) and re-enter the
    /// reactive store.
    pub fn dispatch(&self, event: &str) -> usize {
        let matching: Vec<Listener> = match &*self.read() {
            NodeData::Element { listeners, .. } => listeners
                .iter()
                .filter(|(kind, _)| kind == event)
                .map(|(_, listener)| Arc::clone(listener))
                .collect(),
            NodeData::Text { .. } => Vec::new(),
        };

        for listener in &matching {
            listener();
        }
        matching.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, NodeData> {
        self.0.read().expect("node lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, NodeData> {
        self.0.write().expect("node lock poisoned")
    }
}

/// Read access to a text node's content.
///
/// This lives on a trait rather than on `NodeRef` directly because the
/// inherent namespace already holds the [`NodeRef::text`] constructor;
/// with the trait in scope, `node.text()` resolves here while
/// `NodeRef::text(content)` keeps resolving to the constructor.
pub trait TextContent {
    /// A text node's content, or `None` for elements.
    fn text(&self) -> Option<String>;
}

impl TextContent for NodeRef {
    fn text(&self) -> Option<String> {
        match &*self.read() {
            NodeData::Text { content } => Some(content.clone()),
            NodeData::Element { .. } => None,
        }
    }
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.read() {
            NodeData::Element {
                tag,
                attributes,
                children,
                ..
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attributes", &attributes.len())
                .field("children", &children.len())
                .finish(),
            NodeData::Text { content } => {
                f.debug_struct("Text").field("content", content).finish()
            }
        }
    }
}
