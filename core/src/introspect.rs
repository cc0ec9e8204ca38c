//! Record introspection capability.
//!
//! The engine never owns a target record. Instead, a record describes
//! itself by implementing [`Introspectable`]: it walks its fields in
//! declaration order and hands each one to a [`FieldVisitor`], either as a
//! typed mutable [`Slot`] or as a nested record. The schema builder and the
//! parsers' write-back pass are both visitors, so they always agree on field
//! order.
//!
//! Fields an implementation does not visit do not exist as far as the
//! engine is concerned.
//!
//! # Examples
//!
//! ```
//! use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
//!
//! #[derive(Default)]
//! struct Listen {
//!     address: String,
//!     port: i64,
//!     verbose: bool,
//! }
//!
//! impl Introspectable for Listen {
//!     fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
//!         v.field("ADDRESS", FieldAnnotations::new(), Slot::String(&mut self.address));
//!         v.field(
//!             "port",
//!             FieldAnnotations::new().default_value("8080"),
//!             Slot::Integer(&mut self.port),
//!         );
//!         v.field("verbose", FieldAnnotations::new(), Slot::Bool(&mut self.verbose));
//!     }
//! }
//! ```

use crate::types::{FieldKind, FieldValue};

/// Per-field metadata supplied by a record implementation.
///
/// Every setting is optional; unset settings fall back to the builder's
/// classification rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAnnotations {
    /// Explicit positional classification.
    pub positional: Option<bool>,
    /// Explicit required classification.
    pub required: Option<bool>,
    /// Default literal, parsed according to the field kind.
    pub default: Option<String>,
    /// Raw `|`-separated choice pattern.
    pub choices: Option<String>,
    /// Token used verbatim instead of the derived one.
    pub token: Option<String>,
    /// Metavar used verbatim instead of the derived one.
    pub metavar: Option<String>,
    /// Help line shown in help text.
    pub help: Option<String>,
}

impl FieldAnnotations {
    /// Creates empty annotations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the field positional or non-positional.
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = Some(positional);
        self
    }

    /// Marks the field required or not required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the default literal.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Sets the choice pattern, e.g. `"tcp|udp"`. An empty pattern permits
    /// only the empty string; a leading or trailing `|` adds it as a member.
    pub fn choices(mut self, pattern: &str) -> Self {
        self.choices = Some(pattern.to_string());
        self
    }

    /// Overrides the derived token.
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Overrides the derived metavar.
    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Sets the help line.
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }
}

/// Typed mutable access to one record field.
#[derive(Debug)]
pub enum Slot<'a> {
    /// `String` field.
    String(&'a mut String),
    /// `i64` field.
    Integer(&'a mut i64),
    /// `bool` field.
    Bool(&'a mut bool),
    /// `Option<String>` field.
    OptionalString(&'a mut Option<String>),
    /// `Option<i64>` field.
    OptionalInteger(&'a mut Option<i64>),
    /// `Option<bool>` field.
    OptionalBool(&'a mut Option<bool>),
    /// `Vec<String>` field.
    StringList(&'a mut Vec<String>),
}

impl Slot<'_> {
    /// Returns the storage kind behind this slot.
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::String(_) => FieldKind::String,
            Slot::Integer(_) => FieldKind::Integer,
            Slot::Bool(_) => FieldKind::Bool,
            Slot::OptionalString(_) => FieldKind::OptionalString,
            Slot::OptionalInteger(_) => FieldKind::OptionalInteger,
            Slot::OptionalBool(_) => FieldKind::OptionalBool,
            Slot::StringList(_) => FieldKind::StringList,
        }
    }

    /// Writes a value into the field.
    ///
    /// Optional kinds receive an owned `Some(value)`. A value whose variant
    /// does not match the slot kind is handed back unchanged.
    pub fn assign(self, value: FieldValue) -> Result<(), FieldValue> {
        match (self, value) {
            (Slot::String(slot), FieldValue::String(v)) => *slot = v,
            (Slot::OptionalString(slot), FieldValue::String(v)) => *slot = Some(v),
            (Slot::Integer(slot), FieldValue::Integer(v)) => *slot = v,
            (Slot::OptionalInteger(slot), FieldValue::Integer(v)) => *slot = Some(v),
            (Slot::Bool(slot), FieldValue::Bool(v)) => *slot = v,
            (Slot::OptionalBool(slot), FieldValue::Bool(v)) => *slot = Some(v),
            (Slot::StringList(slot), FieldValue::List(v)) => *slot = v,
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

/// Receives the fields of an [`Introspectable`] record in declaration order.
pub trait FieldVisitor {
    /// A leaf field with its annotations and storage.
    fn field(&mut self, name: &str, annotations: FieldAnnotations, slot: Slot<'_>);

    /// A named nested record. Its fields are flattened with this field's
    /// token and metavar as prefix. Only the `token` and `metavar`
    /// annotations are meaningful here.
    fn nested(
        &mut self,
        name: &str,
        annotations: FieldAnnotations,
        record: &mut dyn Introspectable,
    );

    /// An embedded record, flattened without any token or metavar prefix.
    fn embedded(&mut self, record: &mut dyn Introspectable);
}

/// A record whose fields can be enumerated and written by the engine.
///
/// Implementations must visit the same fields in the same order on every
/// call.
pub trait Introspectable {
    /// Hands every introspectable field to `visitor`, in declaration order.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor);
}
