//! Schema construction from introspectable records.
//!
//! [`Schema::build`] walks a record depth-first in declaration order,
//! classifies each leaf field as positional or optional, derives its token
//! and metavar (prefixed for named nested records), validates its
//! annotations, and rejects any token or metavar that was already taken
//! anywhere else in the flattened record.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::introspect::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
use crate::naming::{field_to_metavar, field_to_token, join_metavar, join_token, normalize_key};
use crate::types::{FieldKind, FieldSpec, FieldValue};

/// Token of the synthetic help flag.
pub const HELP_TOKEN: &str = "help";

/// Immutable, ordered argument schema derived from a record.
///
/// Positionals keep declaration order. Optionals start with the synthetic
/// `--help` flag, followed by every non-required optional and then every
/// required optional, each group in declaration order.
#[derive(Debug, Clone)]
pub struct Schema {
    positionals: Vec<FieldSpec>,
    optionals: Vec<FieldSpec>,
    by_token: HashMap<String, usize>,
    field_count: usize,
}

impl Schema {
    /// Builds the schema of `record`.
    ///
    /// The record is only read; its current values are irrelevant.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] encountered in declaration order.
    pub fn build(record: &mut dyn Introspectable) -> Result<Self> {
        let mut builder = SchemaBuilder::new();
        record.visit_fields(&mut builder);
        let schema = builder.finish();
        match &schema {
            Ok(schema) => debug!(
                positionals = schema.positionals.len(),
                optionals = schema.optionals.len(),
                "Built argument schema"
            ),
            Err(err) => debug!(error = %err, "Rejected argument schema"),
        }
        schema
    }

    /// Builds the schema of a default-constructed `T`.
    pub fn for_type<T: Introspectable + Default>() -> Result<Self> {
        Self::build(&mut T::default())
    }

    /// Positional arguments in consumption order.
    pub fn positionals(&self) -> &[FieldSpec] {
        &self.positionals
    }

    /// Optional arguments, help first and required ones last.
    pub fn optionals(&self) -> &[FieldSpec] {
        &self.optionals
    }

    /// All field specs, positionals first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.positionals.iter().chain(self.optionals.iter())
    }

    /// Number of record fields backing this schema (excludes `--help`).
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Looks up an optional by token or by an external key, which is
    /// normalized first (`dns_domain` finds `dns-domain`).
    pub fn find_optional(&self, key: &str) -> Option<&FieldSpec> {
        self.by_token
            .get(&normalize_key(key))
            .map(|&idx| &self.optionals[idx])
    }
}

#[derive(Debug, Clone, Default)]
struct Prefix {
    token: String,
    metavar: String,
    path: String,
}

struct SchemaBuilder {
    prefixes: Vec<Prefix>,
    /// Entries visited so far at each record depth.
    positions: Vec<usize>,
    next_index: usize,
    positionals: Vec<FieldSpec>,
    optionals: Vec<FieldSpec>,
    tokens: HashMap<String, String>,
    metavars: HashMap<String, String>,
    error: Option<SchemaError>,
}

impl SchemaBuilder {
    fn new() -> Self {
        let mut builder = Self {
            prefixes: Vec::new(),
            positions: vec![0],
            next_index: 0,
            positionals: Vec::new(),
            optionals: Vec::new(),
            tokens: HashMap::new(),
            metavars: HashMap::new(),
            error: None,
        };
        let help = help_spec();
        builder.tokens.insert(help.token.clone(), help.path.clone());
        builder.metavars.insert(help.metavar.clone(), help.path.clone());
        builder.optionals.push(help);
        builder
    }

    fn next_position(&mut self) -> usize {
        match self.positions.last_mut() {
            Some(position) => {
                *position += 1;
                *position - 1
            }
            None => 0,
        }
    }

    fn prefix(&self) -> Prefix {
        self.prefixes.last().cloned().unwrap_or_default()
    }

    fn names(&self, name: &str, annotations: &FieldAnnotations) -> Prefix {
        let prefix = self.prefix();
        let token = annotations
            .token
            .clone()
            .unwrap_or_else(|| field_to_token(name));
        let metavar = annotations
            .metavar
            .clone()
            .unwrap_or_else(|| field_to_metavar(name));
        let path = if prefix.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", prefix.path)
        };
        Prefix {
            token: join_token(&prefix.token, &token),
            metavar: join_metavar(&prefix.metavar, &metavar),
            path,
        }
    }

    fn register(&mut self, names: &Prefix) -> Result<()> {
        if let Some(first) = self.tokens.get(&names.token) {
            return Err(SchemaError::DuplicateToken {
                token: names.token.clone(),
                first: first.clone(),
                second: names.path.clone(),
            });
        }
        if let Some(first) = self.metavars.get(&names.metavar) {
            return Err(SchemaError::DuplicateMetavar {
                metavar: names.metavar.clone(),
                first: first.clone(),
                second: names.path.clone(),
            });
        }
        self.tokens.insert(names.token.clone(), names.path.clone());
        self.metavars.insert(names.metavar.clone(), names.path.clone());
        Ok(())
    }

    fn derive(
        &mut self,
        name: &str,
        annotations: FieldAnnotations,
        kind: FieldKind,
        index: usize,
    ) -> Result<FieldSpec> {
        let names = self.names(name, &annotations);
        let path = names.path.clone();

        let positional = annotations
            .positional
            .unwrap_or_else(|| is_positional_name(name));
        if positional {
            if annotations.required == Some(false) {
                return Err(SchemaError::OptionalPositional(path));
            }
            if annotations.default.is_some() {
                return Err(SchemaError::PositionalDefault(path));
            }
        } else if annotations.required == Some(true) && annotations.default.is_some() {
            return Err(SchemaError::RequiredWithDefault(path));
        }
        let required = positional || annotations.required.unwrap_or(false);

        let choices = match annotations.choices.as_deref() {
            Some(_) if !kind.accepts_choices() => {
                return Err(SchemaError::ChoicesOnNonString(path));
            }
            Some(pattern) => Some(split_choices(pattern)),
            None => None,
        };

        let default = match annotations.default.as_deref() {
            Some(raw) => {
                let value = kind
                    .parse_literal(raw)
                    .ok_or_else(|| SchemaError::InvalidDefault {
                        field: path.clone(),
                        value: raw.to_string(),
                        expected: kind.expected(),
                    })?;
                if let Some(choices) = &choices {
                    let in_choices = |item: &String| choices.contains(item);
                    let valid = match &value {
                        FieldValue::String(s) => in_choices(s),
                        FieldValue::List(items) => items.iter().all(in_choices),
                        _ => true,
                    };
                    if !valid {
                        return Err(SchemaError::DefaultNotInChoices {
                            field: path,
                            value: raw.to_string(),
                        });
                    }
                }
                Some(value)
            }
            None => None,
        };

        if positional {
            if let Some(last) = self.positionals.last().filter(|last| last.kind.is_list()) {
                return Err(SchemaError::ListPositionalNotLast {
                    list: last.path.clone(),
                    next: path,
                });
            }
        }

        self.register(&names)?;

        Ok(FieldSpec {
            name: name.to_string(),
            path: names.path,
            token: names.token,
            metavar: names.metavar,
            kind,
            positional,
            required,
            default,
            choices,
            help: annotations.help,
            index: Some(index),
        })
    }

    fn visit_scoped(&mut self, prefix: Prefix, record: &mut dyn Introspectable) {
        self.prefixes.push(prefix);
        self.positions.push(0);
        record.visit_fields(self);
        self.positions.pop();
        self.prefixes.pop();
    }

    fn finish(self) -> Result<Schema> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut optionals = self.optionals;
        let user = optionals.split_off(1);
        let (required, not_required): (Vec<_>, Vec<_>) =
            user.into_iter().partition(|spec| spec.required);
        optionals.extend(not_required);
        optionals.extend(required);

        let by_token = optionals
            .iter()
            .enumerate()
            .map(|(idx, spec)| (spec.token.clone(), idx))
            .collect();

        Ok(Schema {
            positionals: self.positionals,
            optionals,
            by_token,
            field_count: self.next_index,
        })
    }
}

impl FieldVisitor for SchemaBuilder {
    fn field(&mut self, name: &str, annotations: FieldAnnotations, slot: Slot<'_>) {
        if self.error.is_some() {
            return;
        }
        self.next_position();
        let index = self.next_index;
        self.next_index += 1;
        match self.derive(name, annotations, slot.kind(), index) {
            Ok(spec) if spec.positional => self.positionals.push(spec),
            Ok(spec) => self.optionals.push(spec),
            Err(err) => self.error = Some(err),
        }
    }

    fn nested(
        &mut self,
        name: &str,
        annotations: FieldAnnotations,
        record: &mut dyn Introspectable,
    ) {
        if self.error.is_some() {
            return;
        }
        self.next_position();
        let names = self.names(name, &annotations);
        self.visit_scoped(names, record);
    }

    fn embedded(&mut self, record: &mut dyn Introspectable) {
        if self.error.is_some() {
            return;
        }
        // Embedded records keep the parent's prefixes; only the path records
        // their position so colliding fields stay distinguishable.
        let position = self.next_position();
        let parent = self.prefix();
        let path = if parent.path.is_empty() {
            format!("#{position}")
        } else {
            format!("{}.#{position}", parent.path)
        };
        self.visit_scoped(Prefix { path, ..parent }, record);
    }
}

/// Declared names without lowercase letters (`POS`, `M_POS`) are positional
/// unless annotated otherwise.
fn is_positional_name(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

/// Splits a choice pattern on `|`, keeping empty members and dropping
/// repeats.
fn split_choices(pattern: &str) -> Vec<String> {
    let mut choices: Vec<String> = Vec::new();
    for choice in pattern.split('|') {
        if !choices.iter().any(|c| c == choice) {
            choices.push(choice.to_string());
        }
    }
    choices
}

fn help_spec() -> FieldSpec {
    FieldSpec {
        name: HELP_TOKEN.to_string(),
        path: HELP_TOKEN.to_string(),
        token: HELP_TOKEN.to_string(),
        metavar: HELP_TOKEN.to_uppercase(),
        kind: FieldKind::Bool,
        positional: false,
        required: false,
        default: None,
        choices: None,
        help: Some("show this help message and exit".to_string()),
        index: None,
    }
}
