//! Dependency Registry
//!
//! A `Dep` is the per-store collection of watchers to notify when the
//! store's data changes. Tracking is store-grained: the store owns exactly
//! one registry, and a write to any property notifies every registered
//! watcher. Watchers that do not observe a change in their own expression
//! short-circuit in [`Watcher::update`], so over-notification never reaches
//! the binding callbacks.
//!
//! Registration is append-only. There is no removal: bindings live for the
//! lifetime of the document, so the registry only grows. A watcher that is
//! registered more than once is notified that many times per `notify`.

use std::sync::{Arc, RwLock};

use super::watcher::Watcher;

/// The per-store registry of watchers.
pub struct Dep {
    subs: RwLock<Vec<Arc<Watcher>>>,
}

impl Dep {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            subs: RwLock::new(Vec::new()),
        }
    }

    /// Append a watcher. Duplicates are kept as-is.
    pub fn add_sub(&self, watcher: Arc<Watcher>) {
        self.subs
            .write()
            .expect("subscriber lock poisoned")
            .push(watcher);
    }

    /// Invoke `update()` on every registered watcher, in registration
    /// order, synchronously.
    ///
    /// The list is snapshotted before iteration so an update callback may
    /// re-enter the store (and thus this registry) without deadlocking.
    pub fn notify(&self) {
        let snapshot: Vec<Arc<Watcher>> = self
            .subs
            .read()
            .expect("subscriber lock poisoned")
            .clone();

        for sub in snapshot {
            sub.update();
        }
    }

    /// Get the number of registered watchers, counting duplicates.
    pub fn subscriber_count(&self) -> usize {
        self.subs.read().expect("subscriber lock poisoned").len()
    }
}

impl Default for Dep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Options, ViewModel};
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn registry_starts_empty() {
        let dep = Dep::new();
        assert_eq!(dep.subscriber_count(), 0);
    }

    #[test]
    fn watchers_are_notified_in_registration_order() {
        let vm = ViewModel::new(
            Options::new().data("a", json!(1)).data("b", json!(2)),
        );

        let order = Arc::new(Mutex::new(Vec::new()));

        let order_a = Arc::clone(&order);
        Watcher::new(Arc::clone(&vm), "a", move |_, _, _| {
            order_a.lock().unwrap().push("a");
        });

        let order_b = Arc::clone(&order);
        Watcher::new(Arc::clone(&vm), "b", move |_, _, _| {
            order_b.lock().unwrap().push("b");
        });

        assert_eq!(vm.store().dep().subscriber_count(), 2);

        // One write notifies every watcher (store-grained tracking);
        // only watchers whose expression changed invoke their callback.
        vm.set("a", json!(10));
        vm.set("b", json!(20));

        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let vm = ViewModel::new(Options::new().data("a", json!(1)));
        let watcher = Watcher::new(Arc::clone(&vm), "a", |_, _, _| {});

        let dep = vm.store().dep();
        assert_eq!(dep.subscriber_count(), 1);

        // A second evaluation pass over the same expression appends again.
        dep.add_sub(watcher);
        assert_eq!(dep.subscriber_count(), 2);

        // The duplicate runs update() twice per notify, but the equality
        // check in update() means the callback still fires at most once.
        vm.set("a", json!(2));
    }
}
