#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Field deserializers for documents written by other tools. A field of the
//! wrong shape reads as absent instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::grade::SubjectScore;

/// A JSON number as a whole number, if it is one. `240.0` counts.
fn whole(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
            .map(|f| f as i64)
    })
}

/// Whole number from a number or numeric string.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => whole(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text from a string, number or bool; blank strings read as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Total marks; anything that is not a non-negative whole number is `None`.
pub(super) fn total<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(integer(&value).and_then(|t| u64::try_from(t).ok()))
}

/// Percentage from a number or numeric string.
pub(super) fn percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let p = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(p.filter(|p: &f64| p.is_finite()))
}

/// Optional text field such as grade or status.
pub(super) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value))
}

/// Required-by-convention text such as a roll number; absent reads as empty.
pub(super) fn plain_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value).unwrap_or_default())
}

/// Subject list; entries without a name or whole-number marks are dropped.
pub(super) fn subjects<'de, D>(deserializer: D) -> Result<Vec<SubjectScore>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name").and_then(text)?;
            let marks = entry.get("marks").and_then(integer)?;
            Some(SubjectScore::new(name, marks))
        })
        .collect())
}
