//! Runtime-described records.
//!
//! A [`RecordDescription`] declares a record's fields as data (typically
//! loaded from YAML or JSON). [`DynamicRecord`] turns it into a value that
//! implements [`Introspectable`], so the schema builder and every parser
//! front end can work against records that do not exist at compile time.
//!
//! # Example YAML
//!
//! ```yaml
//! fields:
//!   - name: SOURCE
//!   - name: verbose
//!     kind: bool
//!   - name: proto
//!     choices: "tcp|udp"
//!     default: tcp
//!   - name: tls
//!     record:
//!       fields:
//!         - name: cert
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::introspect::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
use crate::types::FieldKind;

/// Declarative description of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescription {
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

/// Declarative description of one record field.
///
/// A field with `record` set is a nested record; with `embedded` also set
/// its fields are flattened without prefix and `name` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Declared identifier.
    #[serde(default)]
    pub name: String,
    /// Storage kind of a leaf field.
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Nested record fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordDescription>,
    /// Flatten `record` without a name prefix.
    #[serde(default)]
    pub embedded: bool,
}

impl FieldDescription {
    fn annotations(&self) -> FieldAnnotations {
        FieldAnnotations {
            positional: self.positional,
            required: self.required,
            default: self.default.clone(),
            choices: self.choices.clone(),
            token: self.token.clone(),
            metavar: self.metavar.clone(),
            help: self.help.clone(),
        }
    }
}

/// Problems with a [`RecordDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    /// A leaf or named nested field has an empty name.
    #[error("field {0} has no name")]
    MissingName(String),
    /// `embedded` was set on a field without a `record`.
    #[error("field {0} is embedded but has no record")]
    EmbeddedWithoutRecord(String),
}

/// Current value of one dynamic leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicValue {
    String(String),
    Integer(i64),
    Bool(bool),
    OptionalString(Option<String>),
    OptionalInteger(Option<i64>),
    OptionalBool(Option<bool>),
    StringList(Vec<String>),
}

impl DynamicValue {
    /// The zero value of `kind`: empty, `0`, `false` or unset.
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => DynamicValue::String(String::new()),
            FieldKind::Integer => DynamicValue::Integer(0),
            FieldKind::Bool => DynamicValue::Bool(false),
            FieldKind::OptionalString => DynamicValue::OptionalString(None),
            FieldKind::OptionalInteger => DynamicValue::OptionalInteger(None),
            FieldKind::OptionalBool => DynamicValue::OptionalBool(None),
            FieldKind::StringList => DynamicValue::StringList(Vec::new()),
        }
    }

    fn slot(&mut self) -> Slot<'_> {
        match self {
            DynamicValue::String(v) => Slot::String(v),
            DynamicValue::Integer(v) => Slot::Integer(v),
            DynamicValue::Bool(v) => Slot::Bool(v),
            DynamicValue::OptionalString(v) => Slot::OptionalString(v),
            DynamicValue::OptionalInteger(v) => Slot::OptionalInteger(v),
            DynamicValue::OptionalBool(v) => Slot::OptionalBool(v),
            DynamicValue::StringList(v) => Slot::StringList(v),
        }
    }

    /// JSON rendering; unset optionals become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            DynamicValue::String(v) => Value::from(v.as_str()),
            DynamicValue::Integer(v) => Value::from(*v),
            DynamicValue::Bool(v) => Value::from(*v),
            DynamicValue::OptionalString(v) => v.as_deref().map_or(Value::Null, Value::from),
            DynamicValue::OptionalInteger(v) => v.map_or(Value::Null, Value::from),
            DynamicValue::OptionalBool(v) => v.map_or(Value::Null, Value::from),
            DynamicValue::StringList(v) => Value::from(v.clone()),
        }
    }
}

#[derive(Debug, Clone)]
enum Content {
    Leaf(DynamicValue),
    Nested(DynamicRecord),
    Embedded(DynamicRecord),
}

#[derive(Debug, Clone)]
struct DynamicField {
    name: String,
    annotations: FieldAnnotations,
    content: Content,
}

/// A record whose shape comes from a [`RecordDescription`].
///
/// # Examples
///
/// ```
/// use argschema_core::{DynamicRecord, DynamicValue, RecordDescription, Schema};
///
/// let description: RecordDescription = serde_json::from_str(
///     r#"{"fields": [{"name": "SOURCE"}, {"name": "verbose", "kind": "bool"}]}"#,
/// ).unwrap();
/// let mut record = DynamicRecord::from_description(&description).unwrap();
/// let schema = Schema::build(&mut record).unwrap();
///
/// assert_eq!(schema.positionals()[0].to_string(), "<SOURCE>");
/// assert_eq!(record.get("verbose"), Some(&DynamicValue::Bool(false)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    fields: Vec<DynamicField>,
}

impl DynamicRecord {
    /// Builds a record with every leaf at its zero value.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError`] for unnamed fields and embedded fields
    /// without a record.
    pub fn from_description(description: &RecordDescription) -> Result<Self, DescriptionError> {
        Self::build("", description)
    }

    fn build(parent: &str, description: &RecordDescription) -> Result<Self, DescriptionError> {
        let mut fields = Vec::with_capacity(description.fields.len());
        for (position, field) in description.fields.iter().enumerate() {
            let path = if field.name.is_empty() {
                format!("{parent}#{position}")
            } else if parent.is_empty() {
                field.name.clone()
            } else {
                format!("{parent}.{}", field.name)
            };
            let content = match (&field.record, field.embedded) {
                (Some(record), true) => Content::Embedded(Self::build(parent, record)?),
                (None, true) => return Err(DescriptionError::EmbeddedWithoutRecord(path)),
                _ if field.name.is_empty() => return Err(DescriptionError::MissingName(path)),
                (Some(record), false) => Content::Nested(Self::build(&path, record)?),
                (None, false) => Content::Leaf(DynamicValue::zero(field.kind)),
            };
            fields.push(DynamicField {
                name: field.name.clone(),
                annotations: field.annotations(),
                content,
            });
        }
        Ok(Self { fields })
    }

    /// Looks up a leaf by dotted path of declared names. Embedded records
    /// are searched transparently.
    pub fn get(&self, path: &str) -> Option<&DynamicValue> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        for field in &self.fields {
            match &field.content {
                Content::Embedded(record) => {
                    if let Some(found) = record.get(path) {
                        return Some(found);
                    }
                }
                Content::Leaf(value) if field.name == head && rest.is_none() => {
                    return Some(value);
                }
                Content::Nested(record) if field.name == head => {
                    return rest.and_then(|rest| record.get(rest));
                }
                _ => {}
            }
        }
        None
    }

    /// Renders the current values as a JSON object keyed by declared name.
    /// Named nested records become nested objects; embedded records are
    /// merged into their parent.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.collect_json(&mut map);
        Value::Object(map)
    }

    fn collect_json(&self, map: &mut Map<String, Value>) {
        for field in &self.fields {
            match &field.content {
                Content::Leaf(value) => {
                    map.insert(field.name.clone(), value.to_json());
                }
                Content::Nested(record) => {
                    map.insert(field.name.clone(), record.to_json());
                }
                Content::Embedded(record) => record.collect_json(map),
            }
        }
    }
}

impl Introspectable for DynamicRecord {
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) {
        for field in &mut self.fields {
            match &mut field.content {
                Content::Leaf(value) => {
                    visitor.field(&field.name, field.annotations.clone(), value.slot());
                }
                Content::Nested(record) => {
                    visitor.nested(&field.name, field.annotations.clone(), record);
                }
                Content::Embedded(record) => visitor.embedded(record),
            }
        }
    }
}
