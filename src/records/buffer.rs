//! # FieldBuffer
//!
//! The concrete in-memory record used everywhere records move through
//! the crate: inserts decompose one, scans reassemble into one, and
//! pipeline stages build them for their output.

use eyre::{ensure, eyre, Result};
use smallvec::SmallVec;

use crate::records::{Field, Record};
use crate::types::{FieldType, FieldValue};

/// An append-only record of named, typed fields.
///
/// Field order is the order of the `set_*` calls. A second field under
/// an existing name is rejected, keeping the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct FieldBuffer {
    fields: SmallVec<[Field; 4]>,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a typed int64 field.
    pub fn set_int64(&mut self, name: impl Into<String>, value: i64) -> Result<()> {
        self.push(Field::from_value(name, FieldValue::Int64(value)))
    }

    /// Appends a typed string field.
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.push(Field::from_value(name, FieldValue::Str(value.into())))
    }

    /// Appends a field whose payload is already in wire form.
    pub fn set_raw(
        &mut self,
        name: impl Into<String>,
        ftype: FieldType,
        payload: Vec<u8>,
    ) -> Result<()> {
        self.push(Field::from_raw(name, ftype, payload))
    }

    /// Appends a prebuilt field, enforcing name uniqueness.
    pub fn push(&mut self, field: Field) -> Result<()> {
        ensure!(
            self.field(field.name()).is_none(),
            "field '{}' already set",
            field.name()
        );
        self.fields.push(field);
        Ok(())
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for FieldBuffer {
    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn bytes(&self, name: &str) -> Result<&[u8]> {
        self.field(name)
            .ok_or_else(|| eyre!("field '{}' not found", name))?
            .encode()
    }
}
