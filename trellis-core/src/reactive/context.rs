//! Evaluation Context
//!
//! The evaluation context tracks which watcher is currently evaluating its
//! expression. This enables automatic dependency capture: when a store
//! property is read, the store can register the active watcher as a
//! dependent without threading a parameter through every read.
//!
//! # Implementation
//!
//! The slot is thread-local and single-valued: at most one watcher is
//! evaluating at a time. Evaluation is synchronous and non-nested (a
//! watcher's expression is a bare property read and cannot itself create
//! watchers), so a stack is unnecessary. Entering an already-occupied slot
//! is a bug and trips a debug assertion.
//!
//! The slot is entered through an RAII guard so it is cleared even if the
//! evaluation panics.

use std::cell::RefCell;
use std::sync::Arc;

use super::watcher::Watcher;

thread_local! {
    static ACTIVE_WATCHER: RefCell<Option<Arc<Watcher>>> = RefCell::new(None);
}

/// Guard that clears the active-watcher slot when dropped.
pub struct EvalContext {
    _private: (),
}

impl EvalContext {
    /// Mark the given watcher as currently evaluating.
    ///
    /// While the returned guard is alive, any store property that is read
    /// registers the watcher as a dependent. The slot is cleared when the
    /// guard is dropped.
    pub fn enter(watcher: Arc<Watcher>) -> Self {
        ACTIVE_WATCHER.with(|slot| {
            let mut slot = slot.borrow_mut();
            debug_assert!(
                slot.is_none(),
                "nested watcher evaluation is not supported"
            );
            *slot = Some(watcher);
        });

        Self { _private: () }
    }

    /// Check if a watcher is currently evaluating.
    pub fn is_active() -> bool {
        ACTIVE_WATCHER.with(|slot| slot.borrow().is_some())
    }

    /// Get the currently evaluating watcher, if any.
    pub fn active_watcher() -> Option<Arc<Watcher>> {
        ACTIVE_WATCHER.with(|slot| slot.borrow().clone())
    }
}

impl Drop for EvalContext {
    fn drop(&mut self) {
        ACTIVE_WATCHER.with(|slot| {
            slot.borrow_mut().take();
        });
    }
}
