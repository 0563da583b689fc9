//! # RecordBuffer
//!
//! An ordered, in-memory sequence of records. Pipeline stages collect
//! their output here, and the buffer then plays the bucket role for the
//! next stage: it derives a schema from its contents and serves cursors
//! over them. Instances are transient, built by one stage and dropped
//! once the next has consumed them.

use eyre::{bail, Result};

use crate::engine::{Bucket, Cursor};
use crate::records::{FieldBuffer, Record, Schema};

/// Ordered record set that can stand in for a bucket.
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    records: Vec<FieldBuffer>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, preserving arrival order.
    pub fn push(&mut self, record: FieldBuffer) {
        self.records.push(record);
    }

    pub fn get(&self, index: usize) -> Option<&FieldBuffer> {
        self.records.get(index)
    }

    /// Iterates the buffered records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldBuffer> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derives a schema from the first record's field list.
    ///
    /// Later records are not consulted. Deriving from an empty buffer
    /// fails, since there is nothing to describe.
    pub fn derive_schema(&self) -> Result<Schema> {
        let Some(first) = self.records.first() else {
            bail!("cannot derive a schema from an empty record buffer");
        };
        let mut schema = Schema::new();
        for field in first.fields() {
            schema.set(field.name(), field.field_type());
        }
        Ok(schema)
    }
}

impl Bucket for RecordBuffer {
    fn schema(&self) -> Result<Schema> {
        self.derive_schema()
    }

    fn cursor(&self) -> Result<Box<dyn Cursor + '_>> {
        Ok(Box::new(BufferCursor {
            records: self.records.iter(),
        }))
    }
}

/// Forward-only cursor over a [`RecordBuffer`].
struct BufferCursor<'a> {
    records: std::slice::Iter<'a, FieldBuffer>,
}

impl Cursor for BufferCursor<'_> {
    fn next_record(&mut self) -> Result<Option<FieldBuffer>> {
        Ok(self.records.next().cloned())
    }
}
