//! Core schema types for declarative argument records.
//!
//! This crate turns a record that describes itself through
//! [`Introspectable`] into an immutable [`Schema`]:
//!
//! - [`field_to_token`], [`field_to_metavar`], [`normalize_key`]: name
//!   derivation for flags, usage metavars and external keys.
//! - [`FieldAnnotations`]: per-field positional/required/default/choices
//!   and name overrides.
//! - [`FieldSpec`]: the derived descriptor of one flag or positional.
//! - [`Schema`]: ordered positionals and optionals, validated for
//!   contradictory annotations and name collisions across nested records.
//! - [`DynamicRecord`]: a record described at run time.
//!
//! Parsing tokens, config text and documents into a record lives in the
//! `argschema-parse` crate.
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! #[derive(Default)]
//! struct CopyArgs {
//!     source: String,
//!     mode: String,
//!     force: bool,
//! }
//!
//! impl Introspectable for CopyArgs {
//!     fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
//!         v.field("SOURCE", FieldAnnotations::new(), Slot::String(&mut self.source));
//!         v.field(
//!             "mode",
//!             FieldAnnotations::new().choices("fast|safe").default_value("safe"),
//!             Slot::String(&mut self.mode),
//!         );
//!         v.field("force", FieldAnnotations::new(), Slot::Bool(&mut self.force));
//!     }
//! }
//!
//! let schema = Schema::for_type::<CopyArgs>().unwrap();
//! assert_eq!(schema.positionals().len(), 1);
//! assert_eq!(schema.usage_line("cp"), "usage: cp [--help] [--mode MODE] [--force] <SOURCE>");
//! ```

mod dynamic;
mod error;
mod introspect;
mod naming;
mod schema;
mod types;
mod usage;

pub use dynamic::{
    DescriptionError, DynamicRecord, DynamicValue, FieldDescription, RecordDescription,
};
pub use error::{Result, SchemaError};
pub use introspect::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
pub use naming::{field_to_metavar, field_to_token, normalize_key};
pub use schema::{HELP_TOKEN, Schema};
pub use types::{FieldKind, FieldSpec, FieldValue, parse_bool_literal};
