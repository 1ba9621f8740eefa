//! Conversion between free-form field text and typed JSON scalars.

use serde_json::{Number, Value};

/// Coerce edited field text into a typed value.
///
/// Fixed precedence: the exact literals `true`, `false` and `null` win;
/// otherwise a non-empty string that parses fully as a number becomes a
/// number; anything else stays a string. Total, no error conditions.
///
/// # Example
///
/// ```
/// use jsongraph_edit::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce("true"), json!(true));
/// assert_eq!(coerce("null"), json!(null));
/// assert_eq!(coerce("42"), json!(42));
/// assert_eq!(coerce("3.14"), json!(3.14));
/// assert_eq!(coerce("42abc"), json!("42abc"));
/// assert_eq!(coerce(""), json!(""));
/// ```
pub fn coerce(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => match parse_number(text) {
            Some(num) => Value::Number(num),
            None => Value::String(text.to_string()),
        },
    }
}

/// Full-string numeric parse. Integers stay integers where `i64` can hold
/// them; everything else goes through `f64` and is rejected unless finite.
fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() {
        return None;
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    let float: f64 = text.parse().ok()?;
    Number::from_f64(float)
}

/// The editable text form of a row value.
///
/// The inverse of [`coerce`] for scalars: a string renders bare (no
/// quotes), other scalars render as their JSON literal, a missing value
/// renders as the empty string. Containers render as compact JSON, though
/// container rows are never editable.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
