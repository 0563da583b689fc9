//! # Selector
//!
//! Projection and aggregation stage. A selector holds a list of
//! operations as plain data ([`SelectOp`]), which keeps a built query
//! inspectable before it runs. Each operation gets a fresh cursor over
//! the stage input and appends its results to one shared output buffer,
//! so chained operations concatenate in the order they were added.

use eyre::{bail, ensure, eyre, Result};

use crate::engine::Bucket;
use crate::query::Pipe;
use crate::records::{FieldBuffer, RecordBuffer, RecordExt, Schema};
use crate::types::FieldType;

/// One selector operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOp {
    /// Emits, for every input record, a single-field record carrying the
    /// named field.
    Field(String),
    /// Emits one record holding the maximum of the named int64 field,
    /// under the name `max(<field>)`.
    MaxInt64(String),
}

/// Pipe that evaluates a chain of [`SelectOp`]s over one input bucket.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    ops: Vec<SelectOp>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chains a field projection.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.ops.push(SelectOp::Field(name.into()));
        self
    }

    /// Chains a max aggregation over an int64 field.
    pub fn max_int64(mut self, name: impl Into<String>) -> Self {
        self.ops.push(SelectOp::MaxInt64(name.into()));
        self
    }

    /// The operations in evaluation order.
    pub fn ops(&self) -> &[SelectOp] {
        &self.ops
    }
}

impl Pipe for Selector {
    fn pipe(&self, input: &dyn Bucket) -> Result<RecordBuffer> {
        let schema = input.schema()?;
        let mut out = RecordBuffer::new();
        for op in &self.ops {
            op.eval(input, &schema, &mut out)?;
        }
        Ok(out)
    }
}

impl SelectOp {
    /// Evaluates this operation against a fresh scan of `input`,
    /// appending results to `out`.
    fn eval(&self, input: &dyn Bucket, schema: &Schema, out: &mut RecordBuffer) -> Result<()> {
        match self {
            SelectOp::Field(name) => project_field(input, name, out),
            SelectOp::MaxInt64(name) => max_int64(input, schema, name, out),
        }
    }
}

fn project_field(input: &dyn Bucket, name: &str, out: &mut RecordBuffer) -> Result<()> {
    let mut cursor = input.cursor()?;
    while let Some(record) = cursor.next_record()? {
        let field = record
            .field(name)
            .ok_or_else(|| eyre!("select: field '{}' not found", name))?;
        let mut projected = FieldBuffer::new();
        projected.set_raw(name, field.field_type(), field.encode()?.to_vec())?;
        out.push(projected);
    }
    Ok(())
}

fn max_int64(
    input: &dyn Bucket,
    schema: &Schema,
    name: &str,
    out: &mut RecordBuffer,
) -> Result<()> {
    let info = schema
        .get(name)
        .ok_or_else(|| eyre!("select: field '{}' not found", name))?;
    ensure!(
        info.ftype == FieldType::Int64,
        "select: field '{}' is declared as {}, max requires int64",
        name,
        info.ftype
    );

    // the first observed value seeds the running maximum, so all-negative
    // columns report their true maximum
    let mut max: Option<i64> = None;
    let mut cursor = input.cursor()?;
    while let Some(record) = cursor.next_record()? {
        let value = record.get_int64(name)?;
        max = Some(match max {
            None => value,
            Some(current) => current.max(value),
        });
    }

    let Some(max) = max else {
        bail!("select: max({}) over a bucket with no records", name);
    };

    let mut result = FieldBuffer::new();
    result.set_int64(format!("max({})", name), max)?;
    out.push(result);
    Ok(())
}
