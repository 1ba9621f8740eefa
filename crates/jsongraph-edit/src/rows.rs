//! Row projection: a node's displayable rows, their preview text, and the
//! subset that can be edited independently.

use serde_json::{Map, Value};

use crate::coerce::value_text;

/// What kind of value a row carries. Container rows (arrays and objects)
/// are displayed but never independently editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Scalar,
    Array,
    Object,
}

/// One displayable unit of a node's content.
///
/// `key` is absent when the node is itself a bare scalar; `value` is
/// absent when the graph builder produced a row without one.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: Option<String>,
    pub value: Option<Value>,
    pub kind: RowKind,
}

impl Row {
    pub fn scalar(key: impl Into<String>, value: Value) -> Self {
        Row {
            key: Some(key.into()),
            value: Some(value),
            kind: RowKind::Scalar,
        }
    }

    pub fn bare(value: Value) -> Self {
        Row {
            key: None,
            value: Some(value),
            kind: RowKind::Scalar,
        }
    }

    pub fn container(key: impl Into<String>, value: Value, kind: RowKind) -> Self {
        Row {
            key: Some(key.into()),
            value: Some(value),
            kind,
        }
    }
}

/// Compact preview of a node's rows.
///
/// Empty rows render as `{}`; a single bare row renders as its value's
/// text form; otherwise the scalar rows are flattened into an object
/// (row order preserved) and rendered as indented JSON.
pub fn preview(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "{}".to_string();
    }
    if rows.len() == 1 && rows[0].key.is_none() {
        return value_text(rows[0].value.as_ref());
    }
    let mut flat = Map::new();
    for row in rows {
        if row.kind != RowKind::Scalar {
            continue;
        }
        if let Some(key) = &row.key {
            flat.insert(key.clone(), row.value.clone().unwrap_or(Value::Null));
        }
    }
    serde_json::to_string_pretty(&Value::Object(flat)).unwrap_or_else(|_| "{}".to_string())
}

/// The rows that can be edited independently: keyed scalar rows, in
/// source order. Container rows are excluded so an edit buffer can never
/// overwrite a nested array or object.
pub fn editable_rows(rows: &[Row]) -> Vec<&Row> {
    rows.iter()
        .filter(|row| row.key.is_some() && row.kind == RowKind::Scalar)
        .collect()
}
