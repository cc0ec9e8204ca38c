//! Deferred write-back into a target record.
//!
//! Front ends collect values keyed by the field's declaration index and
//! only touch the record once parsing succeeded. The write pass walks the
//! record with the same [`Introspectable`] traversal the schema builder
//! used, so the n-th visited leaf is the field with index n.

use std::collections::BTreeMap;

use argschema_core::{FieldAnnotations, FieldSpec, FieldValue, FieldVisitor, Introspectable, Slot};
use tracing::trace;

use crate::error::{ParseError, Result};

/// Values waiting to be written, keyed by declaration index.
#[derive(Debug, Default)]
pub(crate) struct Assignments {
    values: BTreeMap<usize, FieldValue>,
}

impl Assignments {
    /// Sets (or replaces) the value for `spec`.
    pub(crate) fn set(&mut self, spec: &FieldSpec, value: FieldValue) {
        if let Some(index) = spec.index {
            self.values.insert(index, value);
        }
    }

    /// Appends items to a list value, starting a new list if needed.
    pub(crate) fn extend(&mut self, spec: &FieldSpec, items: impl IntoIterator<Item = String>) {
        let Some(index) = spec.index else {
            return;
        };
        let entry = self
            .values
            .entry(index)
            .or_insert_with(|| FieldValue::List(Vec::new()));
        match entry {
            FieldValue::List(list) => list.extend(items),
            other => *other = FieldValue::List(items.into_iter().collect()),
        }
    }

    pub(crate) fn contains(&self, spec: &FieldSpec) -> bool {
        spec.index.is_some_and(|index| self.values.contains_key(&index))
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Writes every collected value into `record`.
    pub(crate) fn apply(self, record: &mut dyn Introspectable) -> Result<()> {
        let mut writer = Writer {
            next: 0,
            values: self.values,
            error: None,
        };
        record.visit_fields(&mut writer);
        match writer.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct Writer {
    next: usize,
    values: BTreeMap<usize, FieldValue>,
    error: Option<ParseError>,
}

impl FieldVisitor for Writer {
    fn field(&mut self, name: &str, _annotations: FieldAnnotations, slot: Slot<'_>) {
        let index = self.next;
        self.next += 1;
        let Some(value) = self.values.remove(&index) else {
            return;
        };
        trace!(field = name, index, value = %value, "Writing field");
        let kind = slot.kind();
        if let Err(value) = slot.assign(value) {
            self.error.get_or_insert(ParseError::TypeMismatch {
                argument: name.to_string(),
                value: value.to_string(),
                expected: kind.expected(),
            });
        }
    }

    fn nested(
        &mut self,
        _name: &str,
        _annotations: FieldAnnotations,
        record: &mut dyn Introspectable,
    ) {
        record.visit_fields(self);
    }

    fn embedded(&mut self, record: &mut dyn Introspectable) {
        record.visit_fields(self);
    }
}
