//! Template Compiler
//!
//! The compiler walks a document fragment once at startup, classifies each
//! node, and wires bindable expressions to the reactive engine:
//!
//! 1. The mount point's children are detached into a transient fragment
//!    (relocated, not copied), so binding setup happens off-tree.
//!
//! 2. The fragment is walked depth-first. Element nodes have their
//!    attributes scanned for the directive prefix; each directive is
//!    dispatched to its binder and then stripped from the rendered output.
//!    Text nodes matching the `{{ identifier }}` interpolation pattern get
//!    a text binding. Recursion descends into children regardless of node
//!    kind, since directive-bearing elements may still contain interpolated
//!    text descendants.
//!
//! 3. The fully-processed fragment is re-attached to the mount point.
//!
//! Nodes with no directives and no interpolation pass through unchanged.
//! Each binding the compiler creates instantiates exactly one watcher
//! against the host's store.

mod binder;
mod directive;

pub use binder::render_value;
pub use directive::{is_directive, parse, Directive, DIRECTIVE_PREFIX};

use regex::Regex;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::error;

use crate::app::ViewModel;
use crate::dom::{Document, NodeKind, NodeRef, TextContent};

/// Interpolation marker inside text content: `{{ identifier }}`.
static INTERPOLATION: OnceLock<Regex> = OnceLock::new();

fn interpolation_pattern() -> &'static Regex {
    INTERPOLATION
        .get_or_init(|| Regex::new(r"\{\{(.*)\}\}").expect("interpolation pattern is valid"))
}

/// Errors surfaced by template compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The mount-point lookup yielded nothing; compilation was aborted
    /// with no partial work.
    #[error("mount point `{0}` not found in the document")]
    MountPointNotFound(String),
}

/// Compiles a template fragment against one host object.
pub struct Compiler {
    vm: Arc<ViewModel>,
}

impl Compiler {
    /// Create a compiler for the given host.
    pub fn new(vm: Arc<ViewModel>) -> Self {
        Self { vm }
    }

    /// Resolve the mount point by id and compile its subtree.
    pub fn mount(&self, document: &Document, id: &str) -> Result<(), CompileError> {
        let Some(root) = document.element_by_id(id) else {
            error!(id, "mount point not found, aborting compilation");
            return Err(CompileError::MountPointNotFound(id.to_string()));
        };

        self.compile_root(&root);
        Ok(())
    }

    /// Detach the root's children, compile them, and re-attach.
    pub fn compile_root(&self, root: &NodeRef) {
        let fragment = root.take_children();
        self.compile_nodes(&fragment);
        root.append_children(fragment);
    }

    fn compile_nodes(&self, nodes: &[NodeRef]) {
        for node in nodes {
            match node.kind() {
                NodeKind::Element => self.compile_element(node),
                NodeKind::Text => self.compile_text(node),
            }

            let children = node.children();
            if !children.is_empty() {
                self.compile_nodes(&children);
            }
        }
    }

    /// Process an element's directive attributes in iteration order.
    /// Every directive attribute is stripped once handled, whether or not
    /// it produced a binding.
    fn compile_element(&self, node: &NodeRef) {
        for name in node.attribute_names() {
            if !directive::is_directive(&name) {
                continue;
            }

            let value = node.attr(&name).unwrap_or_default();
            if let Some(parsed) = directive::parse(&name, &value) {
                match parsed {
                    Directive::Event { event, method } => {
                        binder::bind_event(&self.vm, node, &event, &method);
                    }
                    Directive::Model { property } => {
                        binder::bind_model(&self.vm, node, &property);
                    }
                }
            }

            node.remove_attr(&name);
        }
    }

    /// Bind a text node whose content matches the interpolation pattern.
    fn compile_text(&self, node: &NodeRef) {
        let Some(text) = node.text() else {
            return;
        };

        if let Some(captures) = interpolation_pattern().captures(&text) {
            let exp = captures[1].trim().to_string();
            binder::bind_text(&self.vm, node, &exp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Options;
    use serde_json::json;

    #[test]
    fn plain_nodes_pass_through_unchanged() {
        let vm = ViewModel::new(Options::new().data("msg", json!("a")));
        let text = NodeRef::text("static text");
        let child = NodeRef::element("span").set_attr("class", "wide");
        let root = NodeRef::element("div")
            .append_child(text.clone())
            .append_child(child.clone());

        Compiler::new(vm.clone()).compile_root(&root);

        assert_eq!(text.text().as_deref(), Some("static text"));
        assert_eq!(child.attr("class").as_deref(), Some("wide"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(vm.store().dep().subscriber_count(), 0);
    }

    #[test]
    fn interpolation_is_found_in_nested_children() {
        let vm = ViewModel::new(Options::new().data("msg", json!("deep")));
        let text = NodeRef::text("{{ msg }}");
        let root = NodeRef::element("div").append_child(
            NodeRef::element("p").append_child(NodeRef::element("em").append_child(text.clone())),
        );

        Compiler::new(vm).compile_root(&root);
        assert_eq!(text.text().as_deref(), Some("deep"));
    }

    #[test]
    fn directive_on_element_with_interpolated_descendant() {
        let vm = ViewModel::new(Options::new().data("msg", json!("hi")));
        let text = NodeRef::text("{{msg}}");
        let form = NodeRef::element("form")
            .set_attr("v-model", "msg")
            .append_child(text.clone());
        let root = NodeRef::element("div").append_child(form.clone());

        Compiler::new(vm).compile_root(&root);

        // Both the element directive and the descendant text were bound.
        assert!(form.attr("v-model").is_none());
        assert_eq!(form.value(), "hi");
        assert_eq!(text.text().as_deref(), Some("hi"));
    }

    #[test]
    fn mount_fails_without_mount_point() {
        let vm = ViewModel::new(Options::new());
        let document = Document::new(NodeRef::element("body"));

        let result = Compiler::new(vm).mount(&document, "app");
        assert!(matches!(
            result,
            Err(CompileError::MountPointNotFound(ref id)) if id == "app"
        ));
    }
}
