//! Structural paths into JSON documents.
//!
//! A [`Path`] is an ordered sequence of object keys and array indices that
//! locates one value inside a parsed document. The empty path denotes the
//! document root.
//!
//! # Example
//!
//! ```
//! use jsongraph_path::{resolve, format_path, PathStep};
//! use serde_json::json;
//!
//! let doc = json!({"items": [{"id": 7}]});
//! let path = vec![
//!     PathStep::Key("items".to_string()),
//!     PathStep::Index(0),
//! ];
//!
//! let target = resolve(&doc, &path).unwrap();
//! assert_eq!(target, &json!({"id": 7}));
//!
//! assert_eq!(format_path(&path), r#"$["items"][0]"#);
//! ```

use serde_json::Value;
use thiserror::Error;

/// One step of a [`Path`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// An ordered sequence of steps locating a value inside the root document.
pub type Path = Vec<PathStep>;

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("key {0:?} not present")]
    KeyMissing(String),
    #[error("index {0} out of bounds")]
    IndexOutOfBounds(usize),
    #[error("step does not match container kind")]
    StepMismatch,
    #[error("cannot descend into a scalar")]
    NotAContainer,
}

/// Resolve a path to the value it names, consuming the entire path.
///
/// Callers that need the enclosing container must stop one step early
/// themselves. Every descent is checked: a missing key, an out-of-range
/// index, or a step applied to the wrong kind of value is an explicit
/// error, never a panic.
///
/// # Example
///
/// ```
/// use jsongraph_path::{resolve, PathError};
/// use serde_json::json;
///
/// let doc = json!({"user": {"name": "Alice"}});
/// let val = resolve(&doc, &["user".into(), "name".into()]).unwrap();
/// assert_eq!(val, &json!("Alice"));
///
/// let err = resolve(&doc, &["missing".into()]).unwrap_err();
/// assert_eq!(err, PathError::KeyMissing("missing".to_string()));
/// ```
pub fn resolve<'a>(doc: &'a Value, path: &[PathStep]) -> Result<&'a Value, PathError> {
    let mut current = doc;
    for step in path {
        current = descend(current, step)?;
    }
    Ok(current)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(doc: &'a mut Value, path: &[PathStep]) -> Result<&'a mut Value, PathError> {
    let mut current = doc;
    for step in path {
        current = match (step, current) {
            (PathStep::Key(key), Value::Object(map)) => map
                .get_mut(key)
                .ok_or_else(|| PathError::KeyMissing(key.clone()))?,
            (PathStep::Index(idx), Value::Array(arr)) => arr
                .get_mut(*idx)
                .ok_or(PathError::IndexOutOfBounds(*idx))?,
            (_, Value::Object(_)) | (_, Value::Array(_)) => return Err(PathError::StepMismatch),
            _ => return Err(PathError::NotAContainer),
        };
    }
    Ok(current)
}

fn descend<'a>(current: &'a Value, step: &PathStep) -> Result<&'a Value, PathError> {
    match (step, current) {
        (PathStep::Key(key), Value::Object(map)) => map
            .get(key)
            .ok_or_else(|| PathError::KeyMissing(key.clone())),
        (PathStep::Index(idx), Value::Array(arr)) => {
            arr.get(*idx).ok_or(PathError::IndexOutOfBounds(*idx))
        }
        (_, Value::Object(_)) | (_, Value::Array(_)) => Err(PathError::StepMismatch),
        _ => Err(PathError::NotAContainer),
    }
}

/// Render a path as a display string.
///
/// The root path renders as `$`; string steps are quoted, numeric steps are
/// bare. Embedded quote characters in a key are not escaped.
///
/// # Example
///
/// ```
/// use jsongraph_path::{format_path, PathStep};
///
/// assert_eq!(format_path(&[]), "$");
/// assert_eq!(format_path(&["customer".into()]), r#"$["customer"]"#);
/// assert_eq!(
///     format_path(&["items".into(), PathStep::Index(0), "id".into()]),
///     r#"$["items"][0]["id"]"#
/// );
/// ```
pub fn format_path(path: &[PathStep]) -> String {
    let mut out = String::from("$");
    for step in path {
        match step {
            PathStep::Key(key) => {
                out.push_str("[\"");
                out.push_str(key);
                out.push_str("\"]");
            }
            PathStep::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Check if a path points to the document root.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}
