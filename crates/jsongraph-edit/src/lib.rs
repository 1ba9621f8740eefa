//! Node-edit session core for the jsongraph document inspector.
//!
//! The inspector shows one node of a large JSON document that is rendered
//! as a graph elsewhere. This crate owns the edit protocol for that node:
//! - project a node's rows into a preview and an editable subset
//!   ([`rows`]),
//! - coerce free-form field text into typed JSON scalars ([`coerce`]),
//! - run the read/edit/commit state machine that mutates the canonical
//!   document text and reconciles with the recomputed graph ([`session`]).
//!
//! The canonical document lives behind the [`DocumentStore`] trait; the
//! graph node collection and view lifecycle drive the session through
//! plain method calls ([`EditSession::nodes_changed`],
//! [`EditSession::open`]).

pub mod coerce;
pub mod node;
pub mod rows;
pub mod session;
pub mod store;

pub use coerce::{coerce, value_text};
pub use node::Node;
pub use rows::{editable_rows, preview, Row, RowKind};
pub use session::{
    CommitError, CommitOutcome, EditBuffer, EditSession, Reconciliation, SessionState,
};
pub use store::{DocumentStore, MemoryStore};

pub use jsongraph_path::{format_path, Path, PathError, PathStep};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
