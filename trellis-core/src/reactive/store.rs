//! Reactive Store
//!
//! A `ReactiveStore` owns a plain data record and instruments every
//! property access:
//!
//! - On `get`, if a watcher is currently evaluating (see
//!   [`EvalContext`](super::context::EvalContext)), the watcher is
//!   registered with this store's dependency registry before the value is
//!   returned.
//!
//! - On `set`, the new value is compared to the old one with strict
//!   equality. An equal write is a no-op with zero notifications; an
//!   unequal write commits and then synchronously notifies every
//!   registered watcher, in the same call stack as the write.
//!
//! The write-suppression check is what terminates the feedback loop
//! between a model binding's store write and the watcher render that the
//! write itself triggers.
//!
//! # Re-entrancy
//!
//! `notify` runs with no store lock held, so an update callback may read
//! or write this store. A callback that writes a value strictly unequal to
//! every previous value on each invocation recurses without bound; the
//! store does not guard against that.

use serde_json::{Map, Value};
use std::sync::RwLock;

use super::context::EvalContext;
use super::dep::Dep;

/// The intercepted data record that tracks reads and broadcasts writes.
pub struct ReactiveStore {
    /// The backing record. Keys are top-level property names.
    data: RwLock<Map<String, Value>>,

    /// The one registry shared by every property of this record.
    /// Tracking is store-grained: any write notifies all watchers.
    dep: Dep,
}

impl ReactiveStore {
    /// Create a store owning the given data record.
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data: RwLock::new(data),
            dep: Dep::new(),
        }
    }

    /// Read a property.
    ///
    /// If a watcher is currently evaluating, it is registered with this
    /// store's registry first. An absent key reads as [`Value::Null`] and
    /// is tracked like any other key.
    pub fn get(&self, key: &str) -> Value {
        if let Some(watcher) = EvalContext::active_watcher() {
            self.dep.add_sub(watcher);
        }

        self.data
            .read()
            .expect("data lock poisoned")
            .get(key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Write a property.
    ///
    /// A value strictly equal to the current one is dropped without any
    /// notification. Otherwise the value is committed and every watcher is
    /// notified before this call returns. Writing to an absent key creates
    /// it; absent keys compare as [`Value::Null`].
    pub fn set(&self, key: &str, value: Value) {
        {
            let mut data = self.data.write().expect("data lock poisoned");
            let old = data.get(key).cloned().unwrap_or(Value::Null);
            if old == value {
                return;
            }
            data.insert(key.to_string(), value);
        }

        // The data lock is released before notifying so callbacks may
        // re-enter the store.
        self.dep.notify();
    }

    /// Get this store's dependency registry.
    pub fn dep(&self) -> &Dep {
        &self.dep
    }
}

impl std::fmt::Debug for ReactiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveStore")
            .field("keys", &self.data.read().expect("data lock poisoned").len())
            .field("subscriber_count", &self.dep.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(key: &str, value: Value) -> ReactiveStore {
        let mut data = Map::new();
        data.insert(key.to_string(), value);
        ReactiveStore::new(data)
    }

    #[test]
    fn get_and_set_round_trip() {
        let store = store_with("msg", json!("a"));
        assert_eq!(store.get("msg"), json!("a"));

        store.set("msg", json!("b"));
        assert_eq!(store.get("msg"), json!("b"));
    }

    #[test]
    fn absent_key_reads_as_null() {
        let store = ReactiveStore::new(Map::new());
        assert_eq!(store.get("missing"), Value::Null);
    }

    #[test]
    fn writing_an_absent_key_creates_it() {
        let store = ReactiveStore::new(Map::new());
        store.set("fresh", json!(42));
        assert_eq!(store.get("fresh"), json!(42));
    }

    #[test]
    fn read_outside_evaluation_does_not_register() {
        let store = store_with("msg", json!("a"));
        store.get("msg");
        store.get("msg");
        assert_eq!(store.dep().subscriber_count(), 0);
    }

    #[test]
    fn number_and_string_are_strictly_unequal() {
        let store = store_with("n", json!(5));
        // "5" is not 5; the write must commit.
        store.set("n", json!("5"));
        assert_eq!(store.get("n"), json!("5"));
    }
}
