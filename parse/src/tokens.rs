//! Command-line token parser.
//!
//! Tokens are consumed exactly as supplied: no quote or escape processing
//! is done, so a value is stored byte-for-byte.
//!
//! - `--token` selects an optional argument (the token is normalized, so
//!   `--dry_run` finds `--dry-run`). Bool flags consume nothing; every
//!   other kind consumes the next token, or the text after `=` in
//!   `--token=value`.
//! - A bool flag that is present stores the negation of its declared
//!   default (`true` when it has none).
//! - Every other token fills the next positional, in declaration order. A
//!   list positional takes all remaining tokens. A bare `--` makes every
//!   following token positional.
//! - Missing required arguments are collected and reported together.
//!
//! The record is only written once the whole token stream was accepted.

use std::collections::HashSet;

use argschema_core::{FieldValue, Introspectable, Schema, normalize_key};
use tracing::debug;

use crate::coerce::{check_choice, coerce_text};
use crate::error::{ParseError, Result};
use crate::suggest;
use crate::write::Assignments;

/// Parses `tokens` into `record` according to `schema`.
///
/// With `ignore_unknown`, an unrecognized `--flag` is dropped together with
/// a directly following non-flag token instead of failing.
///
/// # Errors
///
/// [`ParseError::HelpRequested`] as soon as `--help` is seen;
/// [`ParseError::UnknownArgument`], [`ParseError::MissingValue`],
/// [`ParseError::InvalidChoice`] and [`ParseError::TypeMismatch`] for the
/// first offending token; then [`ParseError::TooManyArguments`] and
/// [`ParseError::MissingArgument`] once scanning is done.
pub fn parse_args<S: AsRef<str>>(
    schema: &Schema,
    record: &mut dyn Introspectable,
    tokens: &[S],
    ignore_unknown: bool,
) -> Result<()> {
    let mut assigned = Assignments::default();
    let mut lists_started = HashSet::new();
    let mut positional_tokens: Vec<&str> = Vec::new();
    let mut flags_done = false;
    let mut iter = tokens.iter().map(AsRef::<str>::as_ref).peekable();

    while let Some(token) = iter.next() {
        if flags_done || !token.starts_with("--") {
            positional_tokens.push(token);
            continue;
        }
        if token == "--" {
            flags_done = true;
            continue;
        }

        let body = &token[2..];
        let (key, inline) = match body.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };

        let Some(spec) = schema.find_optional(key) else {
            if ignore_unknown {
                debug!(argument = token, "Ignoring unknown argument");
                if inline.is_none() && iter.peek().is_some_and(|next| !next.starts_with("--")) {
                    iter.next();
                }
                continue;
            }
            let suggestion = suggest::closest(
                &normalize_key(key),
                schema.optionals().iter().map(|spec| spec.token.as_str()),
            )
            .map(|token| format!("--{token}"));
            return Err(ParseError::UnknownArgument {
                argument: token.to_string(),
                suggestion,
            });
        };

        if spec.is_help() {
            debug!("Help requested");
            return Err(ParseError::HelpRequested);
        }

        if spec.kind.is_bool() {
            let value = match inline {
                Some(raw) => coerce_text(spec, raw)?,
                None => {
                    let declared = spec
                        .default
                        .as_ref()
                        .and_then(FieldValue::as_bool)
                        .unwrap_or(false);
                    FieldValue::Bool(!declared)
                }
            };
            assigned.set(spec, value);
            continue;
        }

        let raw = match inline {
            Some(raw) => raw,
            None => iter
                .next()
                .ok_or_else(|| ParseError::MissingValue(spec.flag()))?,
        };

        if spec.kind.is_list() {
            check_choice(spec, raw)?;
            // The first occurrence replaces any default; later ones append.
            if lists_started.insert(spec.token.as_str()) {
                assigned.set(spec, FieldValue::List(Vec::new()));
            }
            assigned.extend(spec, [raw.to_string()]);
        } else {
            assigned.set(spec, coerce_text(spec, raw)?);
        }
    }

    let mut missing = Vec::new();
    let mut remaining = positional_tokens.into_iter();
    for spec in schema.positionals() {
        if spec.kind.is_list() {
            let items: Vec<String> = remaining.by_ref().map(str::to_string).collect();
            if items.is_empty() {
                missing.push(spec.to_string());
                continue;
            }
            for item in &items {
                check_choice(spec, item)?;
            }
            assigned.set(spec, FieldValue::List(items));
        } else {
            match remaining.next() {
                Some(raw) => assigned.set(spec, coerce_text(spec, raw)?),
                None => missing.push(spec.to_string()),
            }
        }
    }

    let extra: Vec<String> = remaining.map(str::to_string).collect();
    if !extra.is_empty() {
        return Err(ParseError::TooManyArguments(extra));
    }

    missing.extend(
        schema
            .optionals()
            .iter()
            .filter(|spec| spec.required && !assigned.contains(spec))
            .map(ToString::to_string),
    );
    if !missing.is_empty() {
        return Err(ParseError::MissingArgument(missing));
    }

    for spec in schema.fields() {
        if let Some(default) = &spec.default {
            if !assigned.contains(spec) {
                assigned.set(spec, default.clone());
            }
        }
    }

    debug!(tokens = tokens.len(), assigned = assigned.len(), "Parsed argument tokens");
    assigned.apply(record)
}
