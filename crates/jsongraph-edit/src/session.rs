//! The edit-session state machine.
//!
//! A session moves between three states: **Viewing** the selected node,
//! **Editing** it through a buffer of per-field text, and **Committing**,
//! where a locally synthesized overlay node is displayed while the
//! externally recomputed graph catches up with the document mutation.
//!
//! All transitions run to completion on the caller's thread; the only
//! asynchrony is the document store's replacement acknowledgment, which
//! the session deliberately ignores. Reconciliation is driven purely by
//! [`EditSession::nodes_changed`] notifications from the graph builder.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use jsongraph_path::{resolve_mut, PathError};

use crate::coerce::{coerce, value_text};
use crate::node::Node;
use crate::rows::editable_rows;
use crate::store::DocumentStore;

/// In-progress per-field text, keyed by row key, in row order.
///
/// Exists only while in edit mode; seeded from the node's editable rows
/// and discarded on cancel or after a successful commit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditBuffer {
    entries: Vec<(String, String)>,
}

impl EditBuffer {
    fn seed(node: Option<&Node>) -> Self {
        let mut entries = Vec::new();
        if let Some(node) = node {
            for row in editable_rows(&node.rows) {
                if let Some(key) = &row.key {
                    entries.push((key.clone(), value_text(row.value.as_ref())));
                }
            }
        }
        EditBuffer { entries }
    }

    /// Update the text for a key seeded from the node's editable rows.
    /// Unknown keys are ignored: the buffer never grows fields the node
    /// does not have.
    pub fn set(&mut self, key: &str, text: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = text.into();
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
    }
}

/// Pending reconciliation: the pre-edit snapshot (compared by content
/// against incoming nodes) and the optimistic overlay shown meanwhile.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pre_edit: Node,
    overlay: Node,
}

/// The session's mode. The optimistic overlay lives inside the
/// `Committing` variant, so the display rule is a total match and the
/// overlay cannot outlive the wait it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Viewing,
    Editing(EditBuffer),
    Committing(Reconciliation),
}

/// What a successful commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The document changed; the session is waiting for the recomputed
    /// graph and displays the optimistic overlay meanwhile.
    Submitted,
    /// The coerced edits matched the existing values. The replacement was
    /// still written, but there is nothing to reconcile, so the session
    /// went straight back to viewing.
    Unchanged,
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("node path no longer resolves: {0}")]
    Path(#[from] PathError),
    #[error("node target is not an object")]
    NotAnObject,
    #[error("not in edit mode")]
    NotEditing,
    #[error("node has no editable rows")]
    NothingEditable,
}

/// The node-edit session.
///
/// Selection is externally driven via [`set_current`](Self::set_current);
/// the graph builder reports recomputed nodes via
/// [`nodes_changed`](Self::nodes_changed); the view host calls
/// [`open`](Self::open) whenever the inspector is (re)opened.
pub struct EditSession<S> {
    store: S,
    current: Option<Node>,
    state: SessionState,
}

impl<S: DocumentStore> EditSession<S> {
    pub fn new(store: S) -> Self {
        EditSession {
            store,
            current: None,
            state: SessionState::Viewing,
        }
    }

    /// Reset the session for a freshly opened view: exit edit mode, drop
    /// the buffer, and abandon any pending reconciliation. An already
    /// submitted document replacement is not retracted.
    pub fn open(&mut self) {
        self.state = SessionState::Viewing;
    }

    /// External selection change. Does not disturb a pending
    /// reconciliation, which is keyed on the pre-edit snapshot.
    pub fn set_current(&mut self, node: Option<Node>) {
        self.current = node;
    }

    /// The node to render right now: the optimistic overlay while a
    /// commit awaits reconciliation, the current selection otherwise.
    pub fn displayed(&self) -> Option<&Node> {
        match &self.state {
            SessionState::Committing(rec) => Some(&rec.overlay),
            SessionState::Viewing | SessionState::Editing(_) => self.current.as_ref(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, SessionState::Committing(_))
    }

    /// Interface-level guard for the save action: editing, with at least
    /// one editable row.
    pub fn can_commit(&self) -> bool {
        matches!(&self.state, SessionState::Editing(buffer) if !buffer.is_empty())
    }

    /// Enter edit mode, seeding the buffer from the current node's
    /// editable rows. Always allowed from Viewing, even with zero
    /// editable rows (the commit action simply stays disabled).
    pub fn begin_edit(&mut self) {
        if !matches!(self.state, SessionState::Viewing) {
            return;
        }
        let buffer = EditBuffer::seed(self.current.as_ref());
        debug!(fields = buffer.entries.len(), "entering edit mode");
        self.state = SessionState::Editing(buffer);
    }

    /// Update one buffered field. Ignored outside edit mode.
    pub fn set_field(&mut self, key: &str, text: impl Into<String>) {
        if let SessionState::Editing(buffer) = &mut self.state {
            buffer.set(key, text);
        }
    }

    /// The buffered text for a field, while editing.
    pub fn field_text(&self, key: &str) -> Option<&str> {
        match &self.state {
            SessionState::Editing(buffer) => buffer.get(key),
            _ => None,
        }
    }

    /// Leave edit mode without touching the document.
    pub fn cancel_edit(&mut self) {
        if matches!(self.state, SessionState::Editing(_)) {
            debug!("edit cancelled");
            self.state = SessionState::Viewing;
        }
    }

    /// Commit the buffered edits into the canonical document.
    ///
    /// Reads and parses the full document text, resolves the node's path,
    /// overwrites the buffered keys with their coerced values, and writes
    /// the full indented serialization back. The displayed node switches
    /// to a locally synthesized overlay immediately; the session then
    /// waits for the graph builder to report a recomputed node.
    ///
    /// On any failure nothing is mutated or submitted and the session
    /// stays in edit mode with the buffer intact; the error is logged and
    /// returned.
    pub fn commit(&mut self) -> Result<CommitOutcome, CommitError> {
        match self.try_commit() {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(error = %err, "commit aborted, document left untouched");
                Err(err)
            }
        }
    }

    fn try_commit(&mut self) -> Result<CommitOutcome, CommitError> {
        let buffer = match &self.state {
            SessionState::Editing(buffer) => buffer.clone(),
            _ => return Err(CommitError::NotEditing),
        };
        if buffer.is_empty() {
            return Err(CommitError::NothingEditable);
        }
        let node = self.current.clone().ok_or(CommitError::NothingEditable)?;

        let mut doc: Value = serde_json::from_str(&self.store.contents())?;
        let original = doc.clone();

        let target = resolve_mut(&mut doc, &node.path)?;
        let map = target.as_object_mut().ok_or(CommitError::NotAnObject)?;
        for (key, text) in buffer.iter() {
            map.insert(key.to_string(), coerce(text));
        }

        // Synthesized locally, not read back from the mutated document.
        let overlay = overlay_node(&node, &buffer);
        let unchanged = doc == original;

        let text = serde_json::to_string_pretty(&doc)?;
        self.store.replace(text);

        if unchanged {
            debug!("commit was a no-op, skipping reconciliation");
            self.state = SessionState::Viewing;
            return Ok(CommitOutcome::Unchanged);
        }

        debug!(node = %node.id, "commit submitted, awaiting recomputed graph");
        self.state = SessionState::Committing(Reconciliation {
            pre_edit: node,
            overlay,
        });
        Ok(CommitOutcome::Submitted)
    }

    /// Notification that the external node collection changed.
    ///
    /// While a commit awaits reconciliation, looks up the node sharing the
    /// pre-edit snapshot's id; once its content differs from the snapshot
    /// it is adopted as the current selection and returned so the host can
    /// propagate the selection change. The overlay is dropped with the
    /// `Committing` state and never shown again.
    pub fn nodes_changed(&mut self, nodes: &[Node]) -> Option<&Node> {
        let adopted = match &self.state {
            SessionState::Committing(rec) => nodes
                .iter()
                .find(|node| node.id == rec.pre_edit.id)
                .filter(|node| **node != rec.pre_edit)
                .cloned(),
            _ => None,
        }?;
        debug!(node = %adopted.id, "reconciled with recomputed node");
        self.current = Some(adopted);
        self.state = SessionState::Viewing;
        self.current.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// The optimistic overlay: the pre-edit node with every buffered row
/// re-valued through the same coercion the document mutation used.
/// Container rows have no buffer entry and pass through unchanged.
fn overlay_node(node: &Node, buffer: &EditBuffer) -> Node {
    let mut overlay = node.clone();
    for row in &mut overlay.rows {
        if let Some(key) = &row.key {
            if let Some(text) = buffer.get(key) {
                row.value = Some(coerce(text));
            }
        }
    }
    overlay
}
