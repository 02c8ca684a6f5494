//! Trellis Core
//!
//! This crate provides the core runtime for the Trellis reactive
//! data-binding framework. It implements:
//!
//! - A dependency-tracking reactivity engine (store, registry, watchers)
//! - A template compiler that discovers bindable expressions in a node
//!   tree and wires them to the engine
//! - An in-memory document tree serving as the platform binding
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: the intercepted data store, dependency registry, and
//!   watcher objects
//! - `compile`: template compilation, directive parsing, and the three
//!   binding strategies (text interpolation, event, model)
//! - `dom`: the document tree and event dispatch
//! - `app`: the host object templates evaluate against
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use trellis_core::app::{Options, ViewModel};
//! use trellis_core::dom::{Document, NodeRef, TextContent};
//!
//! // <div id="app">{{msg}}</div>
//! let greeting = NodeRef::text("{{msg}}");
//! let document = Document::new(
//!     NodeRef::element("div")
//!         .set_attr("id", "app")
//!         .append_child(greeting.clone()),
//! );
//!
//! let vm = ViewModel::new(Options::new().data("msg", json!("hello")));
//! ViewModel::mount(&vm, &document, "app").unwrap();
//! assert_eq!(greeting.text().as_deref(), Some("hello"));
//!
//! // Every write flows through to the rendered tree.
//! vm.set("msg", json!("changed"));
//! assert_eq!(greeting.text().as_deref(), Some("changed"));
//! ```

pub mod app;
pub mod compile;
pub mod dom;
pub mod reactive;
