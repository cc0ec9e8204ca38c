//! Field descriptor types.
//!
//! This module defines the data model shared by the schema builder and all
//! parser front ends: the [`FieldKind`] of a record field, the
//! [`FieldValue`] written into it, and the derived [`FieldSpec`] that
//! describes one flag or positional argument.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage kind of a record field.
///
/// The kind decides how text is coerced into a value and whether a flag
/// consumes a following token.
///
/// # Examples
///
/// ```
/// use argschema_core::{FieldKind, FieldValue};
///
/// assert!(!FieldKind::Bool.takes_value());
/// assert!(FieldKind::Integer.takes_value());
/// assert_eq!(FieldKind::Integer.parse_literal("42"), Some(FieldValue::Integer(42)));
/// assert_eq!(FieldKind::Integer.parse_literal("forty-two"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain string (the default).
    #[default]
    String,
    /// Signed 64-bit integer, base 10.
    Integer,
    /// Boolean flag.
    Bool,
    /// String that may be left unset.
    OptionalString,
    /// Integer that may be left unset.
    OptionalInteger,
    /// Boolean that may be left unset.
    OptionalBool,
    /// Ordered list of strings.
    StringList,
}

impl FieldKind {
    /// Returns `true` for the two boolean kinds.
    pub fn is_bool(self) -> bool {
        matches!(self, FieldKind::Bool | FieldKind::OptionalBool)
    }

    /// Returns `true` if a flag of this kind consumes the following token.
    pub fn takes_value(self) -> bool {
        !self.is_bool()
    }

    /// Returns `true` for [`FieldKind::StringList`].
    pub fn is_list(self) -> bool {
        matches!(self, FieldKind::StringList)
    }

    /// Returns `true` if values of this kind are strings and can therefore
    /// be constrained by a choice set.
    pub fn accepts_choices(self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::OptionalString | FieldKind::StringList
        )
    }

    /// Human-readable description of the expected value, used in errors.
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::OptionalString => "a string",
            FieldKind::Integer | FieldKind::OptionalInteger => "an integer",
            FieldKind::Bool | FieldKind::OptionalBool => "a boolean",
            FieldKind::StringList => "a list of strings",
        }
    }

    /// Converts a literal into a value of this kind.
    ///
    /// Integers are parsed in base 10, booleans with
    /// [`parse_bool_literal`], and lists split on `,` (an empty literal is
    /// an empty list). Returns `None` when the literal does not fit.
    pub fn parse_literal(self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldKind::String | FieldKind::OptionalString => {
                Some(FieldValue::String(raw.to_string()))
            }
            FieldKind::Integer | FieldKind::OptionalInteger => {
                raw.trim().parse::<i64>().ok().map(FieldValue::Integer)
            }
            FieldKind::Bool | FieldKind::OptionalBool => {
                parse_bool_literal(raw).map(FieldValue::Bool)
            }
            FieldKind::StringList => {
                if raw.is_empty() {
                    Some(FieldValue::List(Vec::new()))
                } else {
                    Some(FieldValue::List(
                        raw.split(',').map(|item| item.trim().to_string()).collect(),
                    ))
                }
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Bool => "bool",
            FieldKind::OptionalString => "optional_string",
            FieldKind::OptionalInteger => "optional_integer",
            FieldKind::OptionalBool => "optional_bool",
            FieldKind::StringList => "string_list",
        };
        f.write_str(name)
    }
}

/// Parses a boolean literal, ignoring ASCII case.
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`.
///
/// # Examples
///
/// ```
/// use argschema_core::parse_bool_literal;
///
/// assert_eq!(parse_bool_literal("True"), Some(true));
/// assert_eq!(parse_bool_literal("FALSE"), Some(false));
/// assert_eq!(parse_bool_literal("maybe"), None);
/// ```
pub fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A kind-matched value ready to be written into a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Value for string and optional-string fields.
    String(String),
    /// Value for integer and optional-integer fields.
    Integer(i64),
    /// Value for bool and optional-bool fields.
    Bool(bool),
    /// Value for string-list fields.
    List(Vec<String>),
}

impl FieldValue {
    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Derived descriptor for one schema field.
///
/// A `FieldSpec` is produced by [`Schema::build`](crate::Schema::build) and
/// never modified afterwards. Its [`Display`](fmt::Display) impl renders the
/// usage form:
///
/// | Field | Rendering |
/// |---|---|
/// | positional | `<METAVAR>` |
/// | required optional | `<--token METAVAR>` |
/// | non-required optional | `[--token METAVAR]` |
/// | bool optional | `[--token]` / `<--token>` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Declared identifier of the field.
    pub name: String,
    /// Dotted path of declared names from the record root, for messages.
    pub path: String,
    /// Flag name, without the leading `--`.
    pub token: String,
    /// Display name in usage text.
    pub metavar: String,
    /// Storage kind.
    pub kind: FieldKind,
    /// Matched by position instead of by flag name.
    pub positional: bool,
    /// Must receive a value during a token parse.
    pub required: bool,
    /// Value assigned before a token parse when the flag is absent.
    pub default: Option<FieldValue>,
    /// Permitted values in declaration order; may contain `""`.
    pub choices: Option<Vec<String>>,
    /// Free-form help line.
    pub help: Option<String>,
    /// Declaration index of the backing record field; `None` for the
    /// synthetic help flag.
    pub index: Option<usize>,
}

impl FieldSpec {
    /// Returns `true` for the synthetic `--help` flag.
    pub fn is_help(&self) -> bool {
        self.index.is_none()
    }

    /// Returns the flag as typed on the command line (`--token`).
    pub fn flag(&self) -> String {
        format!("--{}", self.token)
    }

    /// Name used in error messages: the flag for optionals, the metavar for
    /// positionals.
    pub fn display_name(&self) -> String {
        if self.positional {
            self.metavar.clone()
        } else {
            self.flag()
        }
    }

    /// Checks a string against the choice set. Fields without choices
    /// accept everything.
    pub fn allows(&self, value: &str) -> bool {
        self.choices
            .as_ref()
            .is_none_or(|choices| choices.iter().any(|c| c == value))
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positional {
            write!(f, "<{}>", self.metavar)?;
            if self.kind.is_list() {
                f.write_str("...")?;
            }
            return Ok(());
        }
        let (open, close) = if self.required { ('<', '>') } else { ('[', ']') };
        if self.kind.takes_value() {
            write!(f, "{open}--{} {}{close}", self.token, self.metavar)
        } else {
            write!(f, "{open}--{}{close}", self.token)
        }
    }
}
