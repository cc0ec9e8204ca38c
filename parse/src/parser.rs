//! Typed front door tying a schema to its record type.

use std::io::Read;
use std::marker::PhantomData;

use argschema_core::{Introspectable, Schema};
use serde_json::Value;

use crate::error::Result;
use crate::{config, document, tokens};

/// A validated schema for records of type `T`, plus the text used when
/// rendering usage and help.
///
/// # Example
///
/// ```
/// use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
/// use argschema_parse::ArgumentParser;
///
/// #[derive(Default)]
/// struct Greet {
///     name: String,
///     loud: bool,
/// }
///
/// impl Introspectable for Greet {
///     fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
///         v.field("NAME", FieldAnnotations::new(), Slot::String(&mut self.name));
///         v.field("loud", FieldAnnotations::new(), Slot::Bool(&mut self.loud));
///     }
/// }
///
/// let parser = ArgumentParser::<Greet>::new("greet")
///     .unwrap()
///     .with_description("Say hello.");
/// let mut args = Greet::default();
/// parser.parse_args(&mut args, &["--loud", "world"]).unwrap();
/// assert_eq!(args.name, "world");
/// assert!(args.loud);
/// assert_eq!(parser.usage(), "usage: greet [--help] [--loud] <NAME>");
/// ```
#[derive(Debug)]
pub struct ArgumentParser<T> {
    prog: String,
    description: Option<String>,
    epilog: Option<String>,
    ignore_unknown: bool,
    schema: Schema,
    _record: PhantomData<fn() -> T>,
}

impl<T: Introspectable + Default> ArgumentParser<T> {
    /// Builds the schema from a default-constructed `T`.
    pub fn new(prog: impl Into<String>) -> argschema_core::Result<Self> {
        Self::from_record(&mut T::default(), prog)
    }
}

impl<T: Introspectable> ArgumentParser<T> {
    /// Builds the schema from an existing record, e.g. one whose layout is
    /// only known at run time.
    pub fn from_record(record: &mut T, prog: impl Into<String>) -> argschema_core::Result<Self> {
        Ok(Self {
            prog: prog.into(),
            description: None,
            epilog: None,
            ignore_unknown: false,
            schema: Schema::build(record)?,
            _record: PhantomData,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog = Some(epilog.into());
        self
    }

    /// Drop unknown `--flags` (and a following value) instead of failing.
    pub fn with_ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn usage(&self) -> String {
        self.schema.usage_line(&self.prog)
    }

    pub fn help_text(&self) -> String {
        self.schema
            .help_text(&self.prog, self.description.as_deref(), self.epilog.as_deref())
    }

    /// Parses command-line tokens (without the program name).
    pub fn parse_args<S: AsRef<str>>(&self, record: &mut T, args: &[S]) -> Result<()> {
        tokens::parse_args(&self.schema, record, args, self.ignore_unknown)
    }

    /// Parses `key = value` config text.
    pub fn parse_reader<R: Read>(&self, record: &mut T, reader: R) -> Result<()> {
        config::parse_reader(&self.schema, record, reader)
    }

    /// Parses a key-value document.
    pub fn parse_document(&self, record: &mut T, doc: &Value) -> Result<()> {
        document::parse_document(&self.schema, record, doc)
    }
}
