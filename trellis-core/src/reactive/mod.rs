//! Reactive Engine
//!
//! This module implements the dependency-tracking core: the intercepted
//! data store, the per-store dependency registry, and the watcher objects
//! that connect store changes to binding callbacks.
//!
//! # Concepts
//!
//! ## Reactive store
//!
//! A [`ReactiveStore`] wraps a plain data record behind get/set
//! interception. Reading a property inside a watcher evaluation registers
//! that watcher as a dependent; writing a changed value notifies every
//! dependent synchronously. Writes of strictly-equal values are dropped.
//!
//! ## Watchers
//!
//! A [`Watcher`] binds one property expression to a callback. It evaluates
//! the expression once at construction (which is what causes dependency
//! registration) and re-evaluates on every notification, invoking its
//! callback only when the value actually changed.
//!
//! ## Dependency registry
//!
//! A [`Dep`] is the ordered, append-only list of watchers a store notifies.
//! There is one registry per store, so tracking is store-grained: any write
//! notifies every watcher, and the per-watcher equality check filters out
//! the ones whose expression did not change.
//!
//! # Implementation Notes
//!
//! Dependency capture uses a thread-local single-valued slot
//! ([`EvalContext`]) to correlate a property read with the watcher that
//! triggered it. Evaluation is synchronous and non-nested.

mod context;
mod dep;
mod store;
mod watcher;

pub use context::EvalContext;
pub use dep::Dep;
pub use store::ReactiveStore;
pub use watcher::{WatchCallback, Watcher};
