//! Watcher Implementation
//!
//! A `Watcher` binds one expression (a bare top-level property name on the
//! host) to a callback. It is the unit the dependency registry notifies.
//!
//! # Lifecycle
//!
//! 1. Construction evaluates the expression once inside an
//!    [`EvalContext`](super::context::EvalContext). The property read
//!    re-enters [`ReactiveStore::get`](super::store::ReactiveStore::get),
//!    which registers the watcher with the store's registry. The result is
//!    stored as the last-known value.
//!
//! 2. `update()` re-evaluates the expression without tracking. If the new
//!    value is strictly unequal to the stored one, the stored value is
//!    replaced and the callback is invoked with `(host, new, old)`. Equal
//!    values invoke nothing, which is what stops redundant document writes
//!    and breaks trivial notify loops.
//!
//! There is no teardown. A watcher lives as long as the registry holds it.

use serde_json::Value;
use std::sync::{Arc, RwLock};

use super::context::EvalContext;
use crate::app::ViewModel;

/// Callback invoked when a watcher observes a changed value.
///
/// Receives the host as receiver plus the new and old values.
pub type WatchCallback = Box<dyn Fn(&ViewModel, &Value, &Value) + Send + Sync>;

/// An observer bound to one property-path expression and a callback.
pub struct Watcher {
    /// The host whose property this watcher evaluates.
    vm: Arc<ViewModel>,

    /// The bound expression: a single top-level property name.
    exp: String,

    /// Last-known value, used for change detection.
    value: RwLock<Value>,

    /// Invoked with `(host, new, old)` on every observed change.
    callback: WatchCallback,
}

impl Watcher {
    /// Create a watcher and evaluate its expression once.
    ///
    /// The initial evaluation runs with this watcher in the active slot,
    /// which is what registers it with the host's store.
    pub fn new<F>(vm: Arc<ViewModel>, exp: impl Into<String>, callback: F) -> Arc<Self>
    where
        F: Fn(&ViewModel, &Value, &Value) + Send + Sync + 'static,
    {
        let watcher = Arc::new(Self {
            vm,
            exp: exp.into(),
            value: RwLock::new(Value::Null),
            callback: Box::new(callback),
        });

        let initial = {
            let _ctx = EvalContext::enter(Arc::clone(&watcher));
            watcher.vm.get(&watcher.exp)
        };
        *watcher.value.write().expect("value lock poisoned") = initial;

        watcher
    }

    /// The expression this watcher evaluates.
    pub fn expression(&self) -> &str {
        &self.exp
    }

    /// The last value this watcher observed.
    pub fn last_value(&self) -> Value {
        self.value.read().expect("value lock poisoned").clone()
    }

    /// Re-evaluate the expression and invoke the callback if it changed.
    ///
    /// Called by the registry on every store write. The stored value is
    /// committed before the callback runs, so a callback that re-enters
    /// the store observes an equal value and terminates the recursion.
    pub fn update(&self) {
        let new = self.vm.get(&self.exp);

        let old = {
            let mut value = self.value.write().expect("value lock poisoned");
            if *value == new {
                return;
            }
            std::mem::replace(&mut *value, new.clone())
        };

        (self.callback)(&self.vm, &new, &old);
    }
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("exp", &self.exp)
            .field("value", &self.last_value())
            .finish()
    }
}
