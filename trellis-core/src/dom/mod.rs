//! Platform Binding
//!
//! The in-memory document tree the compiler and binders operate on. It
//! provides exactly the capabilities the core requires of a platform:
//! node classification, ordered attribute access, child relocation,
//! text/value content, event-listener registration, and synchronous
//! dispatch.

mod document;
mod node;

pub use document::Document;
pub use node::{Listener, NodeKind, NodeRef, TextContent};
