//! Parsers that fill an [`Introspectable`](argschema_core::Introspectable)
//! record from three kinds of input:
//!
//! - [`parse_args`]: command-line tokens (`--flag value`, positionals).
//! - [`parse_reader`]: `key = value` config text.
//! - [`parse_document`]: a JSON-like key-value tree.
//!
//! All three resolve names through the same [`Schema`](argschema_core::Schema),
//! coerce values into the field kind, validate choices, and write the record
//! only once the whole input was accepted. [`ArgumentParser`] bundles a
//! schema with its program name, description and epilog.
//!
//! # Example
//!
//! ```
//! use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Schema, Slot};
//! use argschema_parse::{parse_args, parse_reader};
//!
//! #[derive(Default)]
//! struct Tunnel {
//!     proto: String,
//!     port: i64,
//! }
//!
//! impl Introspectable for Tunnel {
//!     fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
//!         v.field(
//!             "proto",
//!             FieldAnnotations::new().choices("tcp|udp").default_value("tcp"),
//!             Slot::String(&mut self.proto),
//!         );
//!         v.field("port", FieldAnnotations::new().required(true), Slot::Integer(&mut self.port));
//!     }
//! }
//!
//! let schema = Schema::for_type::<Tunnel>().unwrap();
//!
//! let mut tunnel = Tunnel::default();
//! parse_args(&schema, &mut tunnel, &["--port", "53", "--proto", "udp"], false).unwrap();
//! assert_eq!((tunnel.proto.as_str(), tunnel.port), ("udp", 53));
//!
//! let err = parse_args(&schema, &mut Tunnel::default(), &["--port", "1", "--proto", "ud"], false)
//!     .unwrap_err();
//! assert_eq!(err.to_string(), r#"invalid choice "ud" for --proto, did you mean "udp"?"#);
//!
//! let mut tunnel = Tunnel::default();
//! parse_reader(&schema, &mut tunnel, "port = 8080\n".as_bytes()).unwrap();
//! assert_eq!(tunnel.port, 8080);
//! ```

mod coerce;
mod config;
mod document;
mod error;
mod parser;
pub mod suggest;
mod tokens;
mod write;

pub use config::parse_reader;
pub use document::parse_document;
pub use error::{ParseError, Result};
pub use parser::ArgumentParser;
pub use tokens::parse_args;
