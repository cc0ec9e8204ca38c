//! Line-oriented `key = value` config parser.
//!
//! ```text
//! # comment
//! listen_port = 8080
//! verbose = True
//! networks = net1, net2
//! ```
//!
//! Keys are normalized and matched against optional arguments only; keys
//! that match nothing are ignored, since config files commonly carry
//! settings for other consumers. Values are trimmed, and a value wrapped in
//! one pair of matching quotes keeps only its inner text. List values are
//! comma-separated and a repeated list key appends.

use std::io::{BufRead, BufReader, Read};

use argschema_core::{FieldValue, Introspectable, Schema};
use tracing::debug;

use crate::coerce::coerce_text;
use crate::error::{ParseError, Result};
use crate::write::Assignments;

/// Parses config text from `reader` into `record`.
///
/// # Errors
///
/// [`ParseError::Io`] if reading fails or the text is not UTF-8,
/// [`ParseError::MalformedLine`] for a line without `=`, and
/// [`ParseError::TypeMismatch`] / [`ParseError::InvalidChoice`] for values
/// that do not fit their field.
pub fn parse_reader<R: Read>(
    schema: &Schema,
    record: &mut dyn Introspectable,
    reader: R,
) -> Result<()> {
    let mut assigned = Assignments::default();

    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ParseError::MalformedLine {
                line: idx + 1,
                content: trimmed.to_string(),
            });
        };
        let key = key.trim();
        let Some(spec) = schema.find_optional(key).filter(|spec| !spec.is_help()) else {
            debug!(key, line = idx + 1, "Ignoring unknown config key");
            continue;
        };

        match coerce_text(spec, unquote(value.trim()))? {
            FieldValue::List(items) => assigned.extend(spec, items),
            value => assigned.set(spec, value),
        }
    }

    debug!(assigned = assigned.len(), "Parsed config text");
    assigned.apply(record)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
