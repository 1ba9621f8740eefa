//! End-to-end edit flows: project rows, edit, commit, reconcile.

use jsongraph_edit::{
    coerce, editable_rows, format_path, preview, CommitOutcome, DocumentStore, EditSession,
    MemoryStore, Node, Row, RowKind,
};
use serde_json::{json, Value};

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("value serializes")
}

fn user_node() -> Node {
    Node::new(
        "user",
        vec![
            Row::scalar("name", json!("Alice")),
            Row::scalar("age", json!(30)),
        ],
        vec!["user".into()],
    )
}

#[test]
fn full_edit_cycle_against_nested_document() {
    let doc = json!({"user": {"name": "Alice", "age": 30}});
    let mut session = EditSession::new(MemoryStore::new(pretty(&doc)));
    session.open();
    session.set_current(Some(user_node()));

    // Read mode: projection of the selected node.
    let shown = session.displayed().expect("node selected");
    assert_eq!(format_path(&shown.path), r#"$["user"]"#);
    assert_eq!(preview(&shown.rows), pretty(&json!({"name": "Alice", "age": 30})));
    assert_eq!(editable_rows(&shown.rows).len(), 2);

    // Edit and commit.
    session.begin_edit();
    session.set_field("name", "Bob");
    session.set_field("age", "31");
    assert!(session.can_commit());
    assert_eq!(session.commit().expect("commit"), CommitOutcome::Submitted);

    // Canonical document was fully replaced with the mutated tree.
    let after: Value = serde_json::from_str(&session.store().contents()).expect("valid json");
    assert_eq!(after, json!({"user": {"name": "Bob", "age": 31}}));

    // Optimistic overlay immediately reflects the coerced edits.
    let overlay = session.displayed().expect("overlay shown");
    assert_eq!(overlay.rows[0].value, Some(json!("Bob")));
    assert_eq!(overlay.rows[1].value, Some(json!(31)));

    // Graph builder recomputes; the differing node with the same id wins.
    let recomputed = Node::new(
        "user",
        vec![
            Row::scalar("name", json!("Bob")),
            Row::scalar("age", json!(31)),
        ],
        vec!["user".into()],
    );
    let adopted = session
        .nodes_changed(std::slice::from_ref(&recomputed))
        .cloned();
    assert_eq!(adopted.as_ref(), Some(&recomputed));
    assert_eq!(session.displayed(), Some(&recomputed));
    assert!(!session.is_committing());
}

#[test]
fn edit_then_cancel_is_byte_identical() {
    let text = pretty(&json!({"user": {"name": "Alice", "age": 30}}));
    let mut session = EditSession::new(MemoryStore::new(text.clone()));
    session.open();
    session.set_current(Some(user_node()));

    session.begin_edit();
    session.set_field("name", "Mallory");
    session.cancel_edit();

    assert_eq!(session.store().contents(), text);
    assert_eq!(session.displayed(), Some(&user_node()));
}

#[test]
fn commit_through_array_index_path() {
    let doc = json!({"items": [{"id": 1, "label": "first"}, {"id": 2, "label": "second"}]});
    let node = Node::new(
        "items.1",
        vec![
            Row::scalar("id", json!(2)),
            Row::scalar("label", json!("second")),
        ],
        vec!["items".into(), 1.into()],
    );
    let mut session = EditSession::new(MemoryStore::new(pretty(&doc)));
    session.set_current(Some(node));
    session.begin_edit();
    session.set_field("label", "renamed");
    session.commit().expect("commit");

    let after: Value = serde_json::from_str(&session.store().contents()).expect("valid json");
    assert_eq!(
        after,
        json!({"items": [{"id": 1, "label": "first"}, {"id": 2, "label": "renamed"}]})
    );
}

#[test]
fn coercion_decides_committed_types() {
    let doc = json!({"flags": {"enabled": "yes", "retries": 3, "note": "x"}});
    let node = Node::new(
        "flags",
        vec![
            Row::scalar("enabled", json!("yes")),
            Row::scalar("retries", json!(3)),
            Row::scalar("note", json!("x")),
        ],
        vec!["flags".into()],
    );
    let mut session = EditSession::new(MemoryStore::new(pretty(&doc)));
    session.set_current(Some(node));
    session.begin_edit();
    session.set_field("enabled", "true");
    session.set_field("retries", "5x");
    session.set_field("note", "null");
    session.commit().expect("commit");

    let after: Value = serde_json::from_str(&session.store().contents()).expect("valid json");
    assert_eq!(
        after,
        json!({"flags": {"enabled": true, "retries": "5x", "note": null}})
    );

    // Same precedence as the standalone coercion.
    assert_eq!(coerce("true"), json!(true));
    assert_eq!(coerce("5x"), json!("5x"));
    assert_eq!(coerce("null"), json!(null));
}

#[test]
fn bare_scalar_node_has_no_editable_surface() {
    let rows = vec![Row::bare(json!(5))];
    assert_eq!(preview(&rows), "5");
    assert!(editable_rows(&rows).is_empty());

    let mut session = EditSession::new(MemoryStore::new(pretty(&json!({"n": 5}))));
    session.set_current(Some(Node::new("n", rows, vec!["n".into()])));
    session.begin_edit();
    assert!(!session.can_commit());
}

#[test]
fn container_rows_survive_sibling_edits() {
    let doc = json!({"cfg": {"name": "a", "nested": {"deep": true}, "list": [1, 2, 3]}});
    let node = Node::new(
        "cfg",
        vec![
            Row::scalar("name", json!("a")),
            Row::container("nested", json!({"deep": true}), RowKind::Object),
            Row::container("list", json!([1, 2, 3]), RowKind::Array),
        ],
        vec!["cfg".into()],
    );
    let mut session = EditSession::new(MemoryStore::new(pretty(&doc)));
    session.set_current(Some(node));
    session.begin_edit();
    session.set_field("name", "b");
    session.commit().expect("commit");

    let after: Value = serde_json::from_str(&session.store().contents()).expect("valid json");
    assert_eq!(
        after,
        json!({"cfg": {"name": "b", "nested": {"deep": true}, "list": [1, 2, 3]}})
    );
}
