//! Document parser for generic key-value trees.
//!
//! The document is a [`serde_json::Value`] whose root must be an object.
//! Keys are normalized and matched against optional arguments, and nested
//! objects extend the key with their own name, so `{"m": {"non_pos": "x"}}`
//! and `{"m_non_pos": "x"}` both reach `--m-non-pos`. Unmatched keys are
//! ignored and `null` leaves a field untouched.

use argschema_core::{FieldKind, FieldSpec, FieldValue, Introspectable, Schema, normalize_key};
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::{check_value, coerce_text, type_mismatch};
use crate::error::{ParseError, Result};
use crate::write::Assignments;

/// Parses `doc` into `record`.
///
/// # Errors
///
/// [`ParseError::TypeMismatch`] when the root is not an object or a value
/// does not fit its field, [`ParseError::InvalidChoice`] for a string
/// outside a choice set.
pub fn parse_document(
    schema: &Schema,
    record: &mut dyn Introspectable,
    doc: &Value,
) -> Result<()> {
    let Value::Object(map) = doc else {
        return Err(ParseError::TypeMismatch {
            argument: "document".to_string(),
            value: doc.to_string(),
            expected: "an object",
        });
    };

    let mut assigned = Assignments::default();
    collect(schema, "", map, &mut assigned)?;

    debug!(assigned = assigned.len(), "Parsed document");
    assigned.apply(record)
}

fn collect(
    schema: &Schema,
    prefix: &str,
    map: &Map<String, Value>,
    assigned: &mut Assignments,
) -> Result<()> {
    for (key, value) in map {
        let key = if prefix.is_empty() {
            normalize_key(key)
        } else {
            format!("{prefix}-{}", normalize_key(key))
        };

        // A key owned by a leaf field is never a nested-record prefix.
        match schema.find_optional(&key).filter(|spec| !spec.is_help()) {
            Some(spec) => {
                if let Some(value) = coerce_json(spec, value)? {
                    assigned.set(spec, value);
                }
            }
            None => match value {
                Value::Object(inner) => collect(schema, &key, inner, assigned)?,
                _ => debug!(key = %key, "Ignoring unknown document key"),
            },
        }
    }
    Ok(())
}

/// Converts a document value into the spec's kind; `None` for `null`.
fn coerce_json(spec: &FieldSpec, value: &Value) -> Result<Option<FieldValue>> {
    let coerced = match (spec.kind, value) {
        (_, Value::Null) => return Ok(None),
        (FieldKind::StringList, Value::Array(items)) => FieldValue::List(
            items
                .iter()
                .map(|item| scalar_text(item).ok_or_else(|| type_mismatch(spec, value)))
                .collect::<Result<_>>()?,
        ),
        (FieldKind::StringList, scalar) => {
            let item = scalar_text(scalar).ok_or_else(|| type_mismatch(spec, value))?;
            FieldValue::List(vec![item])
        }
        (FieldKind::Integer | FieldKind::OptionalInteger, Value::Number(n)) => {
            FieldValue::Integer(n.as_i64().ok_or_else(|| type_mismatch(spec, n))?)
        }
        (FieldKind::Bool | FieldKind::OptionalBool, Value::Bool(b)) => FieldValue::Bool(*b),
        (_, Value::String(s)) => return coerce_text(spec, s).map(Some),
        (FieldKind::String | FieldKind::OptionalString, Value::Number(_) | Value::Bool(_)) => {
            FieldValue::String(value.to_string())
        }
        _ => return Err(type_mismatch(spec, value)),
    };
    check_value(spec, &coerced)?;
    Ok(Some(coerced))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
