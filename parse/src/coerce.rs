//! Value coercion and choice validation shared by the front ends.

use std::fmt::Display;

use argschema_core::{FieldSpec, FieldValue};

use crate::error::{ParseError, Result};
use crate::suggest;

/// Rejects a string outside the spec's choice set.
pub(crate) fn check_choice(spec: &FieldSpec, value: &str) -> Result<()> {
    if spec.allows(value) {
        return Ok(());
    }
    let choices = spec.choices.clone().unwrap_or_default();
    let suggestion =
        suggest::closest(value, choices.iter().map(String::as_str)).map(str::to_string);
    Err(ParseError::InvalidChoice {
        argument: spec.display_name(),
        value: value.to_string(),
        choices,
        suggestion,
    })
}

/// Coerces a whole literal into the spec's kind and validates choices.
pub(crate) fn coerce_text(spec: &FieldSpec, raw: &str) -> Result<FieldValue> {
    let value = spec
        .kind
        .parse_literal(raw)
        .ok_or_else(|| type_mismatch(spec, format!("{raw:?}")))?;
    check_value(spec, &value)?;
    Ok(value)
}

/// Validates every string inside an already-coerced value.
pub(crate) fn check_value(spec: &FieldSpec, value: &FieldValue) -> Result<()> {
    match value {
        FieldValue::String(s) => check_choice(spec, s),
        FieldValue::List(items) => items.iter().try_for_each(|item| check_choice(spec, item)),
        FieldValue::Integer(_) | FieldValue::Bool(_) => Ok(()),
    }
}

pub(crate) fn type_mismatch(spec: &FieldSpec, value: impl Display) -> ParseError {
    ParseError::TypeMismatch {
        argument: spec.display_name(),
        value: value.to_string(),
        expected: spec.kind.expected(),
    }
}
