//! Host Object
//!
//! A [`ViewModel`] is the bindable object templates evaluate against. It
//! owns exactly one [`ReactiveStore`] (its backing data) and a read-only
//! method table installed once at construction. Property reads and writes
//! go through the store; methods are reachable only through the table.
//!
//! A key present in both the data record and the method table is a
//! non-fatal reported condition: one warning is emitted per colliding key
//! and the data-backed property wins. The method stays reachable through
//! the table, so event bindings can still resolve it.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::compile::{CompileError, Compiler};
use crate::dom::Document;
use crate::reactive::ReactiveStore;

/// A host method, invoked with the host as receiver.
pub type Method = Arc<dyn Fn(&ViewModel) + Send + Sync>;

/// Non-fatal conditions reported during host construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A method name collides with a data property; the data key wins.
    #[error("method `{0}` has already been defined as a data property")]
    DuplicateName(String),
}

/// Construction options: the data record and the method table.
#[derive(Default)]
pub struct Options {
    data: Map<String, Value>,
    methods: IndexMap<String, Method>,
}

impl Options {
    /// Start an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a data property.
    pub fn data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Add a named method.
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&ViewModel) + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }
}

/// The bindable object exposed to templates.
pub struct ViewModel {
    store: ReactiveStore,
    methods: IndexMap<String, Method>,
    warnings: Vec<Warning>,
}

impl ViewModel {
    /// Build a host from options.
    ///
    /// Name collisions between data and methods are reported (once per
    /// key) and construction proceeds with the data key in effect.
    pub fn new(options: Options) -> Arc<Self> {
        let mut warnings = Vec::new();
        for key in options.data.keys() {
            if options.methods.contains_key(key) {
                warn!(
                    name = %key,
                    "method has already been defined as a data property"
                );
                warnings.push(Warning::DuplicateName(key.clone()));
            }
        }

        Arc::new(Self {
            store: ReactiveStore::new(options.data),
            methods: options.methods,
            warnings,
        })
    }

    /// Read a property through the reactive store.
    pub fn get(&self, key: &str) -> Value {
        self.store.get(key)
    }

    /// Write a property through the reactive store.
    pub fn set(&self, key: &str, value: Value) {
        self.store.set(key, value);
    }

    /// Look up a method in the method table.
    pub fn method(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    /// The backing reactive store.
    pub fn store(&self) -> &ReactiveStore {
        &self.store
    }

    /// Warnings collected during construction.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Compile the template under the element with the given id and bind
    /// it to this host.
    pub fn mount(vm: &Arc<Self>, document: &Document, id: &str) -> Result<(), CompileError> {
        Compiler::new(Arc::clone(vm)).mount(document, id)
    }
}

impl std::fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModel")
            .field("store", &self.store)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("warnings", &self.warnings)
            .finish()
    }
}
