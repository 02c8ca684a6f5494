//! Directive Binders
//!
//! The three binding strategies the compiler can wire up:
//!
//! - Text interpolation: one-way, store to text node.
//! - Event binding: document event to host method call.
//! - Model binding: two-way between a host property and an element value.
//!
//! Each binding that observes the store creates exactly one [`Watcher`].
//! Bindings are never torn down; they live as long as the store's registry
//! holds their watcher.

use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::app::ViewModel;
use crate::dom::NodeRef;
use crate::reactive::Watcher;

/// Render a value the way the document shows it: null renders as the
/// empty string (never a literal "null"), strings render unquoted.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Bind a text node one-way to a host property.
///
/// The node's content is initialized from the current value, then
/// re-rendered on every observed change.
pub(crate) fn bind_text(vm: &Arc<ViewModel>, node: &NodeRef, exp: &str) {
    node.set_text(render_value(&vm.get(exp)));

    let node = node.clone();
    Watcher::new(Arc::clone(vm), exp, move |_, new, _| {
        node.set_text(render_value(new));
    });
}

/// Bind a document event to a host method.
///
/// If the method does not resolve, the binding is skipped silently and no
/// listener is installed.
pub(crate) fn bind_event(vm: &Arc<ViewModel>, node: &NodeRef, event: &str, method: &str) {
    let Some(method) = vm.method(method) else {
        return;
    };

    let vm = Arc::clone(vm);
    node.add_event_listener(event, move || method(&vm));
}

/// Bind an element's value two-way to a host property.
///
/// Store to element: a watcher re-renders the value on change. Element to
/// store: an `input` listener writes the element's value back, but only
/// when it differs from the last value it synchronized. That local check
/// keeps the watcher's own render from bouncing a write back into the
/// store.
pub(crate) fn bind_model(vm: &Arc<ViewModel>, node: &NodeRef, property: &str) {
    let initial = vm.get(property);
    node.set_value(render_value(&initial));

    {
        let node = node.clone();
        Watcher::new(Arc::clone(vm), property, move |_, new, _| {
            node.set_value(render_value(new));
        });
    }

    let last = Arc::new(RwLock::new(initial));
    let vm = Arc::clone(vm);
    let target = node.clone();
    let property = property.to_string();
    node.add_event_listener("input", move || {
        let current = Value::String(target.value());
        {
            let last = last.read().expect("model value lock poisoned");
            if *last == current {
                return;
            }
        }
        vm.set(&property, current.clone());
        *last.write().expect("model value lock poisoned") = current;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Options;
    use crate::dom::TextContent;
    use serde_json::json;

    #[test]
    fn render_value_formats() {
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(3)), "3");
        assert_eq!(render_value(&json!(true)), "true");
    }

    #[test]
    fn text_binding_renders_initial_value_and_updates() {
        let vm = ViewModel::new(Options::new().data("msg", json!("a")));
        let node = NodeRef::text("{{msg}}");

        bind_text(&vm, &node, "msg");
        assert_eq!(node.text().as_deref(), Some("a"));

        vm.set("msg", json!("b"));
        assert_eq!(node.text().as_deref(), Some("b"));
    }

    #[test]
    fn missing_method_installs_no_listener() {
        let vm = ViewModel::new(Options::new().data("msg", json!("a")));
        let node = NodeRef::element("button");

        bind_event(&vm, &node, "click", "ghost");
        assert_eq!(node.dispatch("click"), 0);
    }

    #[test]
    fn model_binding_ignores_input_with_unchanged_value() {
        let vm = ViewModel::new(Options::new().data("name", json!("x")));
        let node = NodeRef::element("input");

        bind_model(&vm, &node, "name");
        assert_eq!(node.value(), "x");
        assert_eq!(vm.store().dep().subscriber_count(), 1);

        // Input fires without the value actually changing: no store write.
        node.dispatch("input");
        assert_eq!(vm.get("name"), json!("x"));
    }
}
