//! # Record Capability
//!
//! [`Record`] is the minimal surface every record-shaped value exposes:
//! an ordered field list and payload lookup by name. [`RecordExt`] adds
//! typed accessors on top, and [`ToRecord`] is the explicit conversion a
//! domain type implements to become storable.

use eyre::{ensure, eyre, Result, WrapErr};

use crate::encoding;
use crate::records::{Field, FieldBuffer};
use crate::types::FieldType;

/// A readable record: an ordered, named collection of typed fields.
pub trait Record {
    /// The record's fields in insertion (or scan) order.
    ///
    /// Iteration is repeatable; every call starts from the first field.
    fn fields(&self) -> &[Field];

    /// The encoded payload of the named field.
    ///
    /// Fails with a not-found error when no field carries that name.
    fn bytes(&self, name: &str) -> Result<&[u8]>;
}

fn lookup<'r, R: Record + ?Sized>(record: &'r R, name: &str) -> Result<&'r Field> {
    record
        .fields()
        .iter()
        .find(|field| field.name() == name)
        .ok_or_else(|| eyre!("field '{}' not found", name))
}

/// Typed read access over any [`Record`].
///
/// Both accessors check the field's declared type before decoding, so a
/// drifted schema surfaces as a type mismatch error instead of garbage.
pub trait RecordExt: Record {
    /// Decodes the named field as a signed 64-bit integer.
    fn get_int64(&self, name: &str) -> Result<i64> {
        let field = lookup(self, name)?;
        ensure!(
            field.field_type() == FieldType::Int64,
            "field '{}' is declared as {}, expected int64",
            name,
            field.field_type()
        );
        encoding::decode_i64(field.encode()?).wrap_err_with(|| format!("field '{}'", name))
    }

    /// Borrows the named field as a string slice.
    fn get_str(&self, name: &str) -> Result<&str> {
        let field = lookup(self, name)?;
        ensure!(
            field.field_type() == FieldType::String,
            "field '{}' is declared as {}, expected string",
            name,
            field.field_type()
        );
        std::str::from_utf8(field.encode()?).wrap_err("string payload is not valid utf-8")
    }
}

impl<R: Record + ?Sized> RecordExt for R {}

/// Conversion into record form, implemented by storable domain types.
///
/// The mapping is written out field by field, which keeps field names and
/// types in the author's hands instead of deriving them from the struct:
///
/// ```ignore
/// struct User {
///     name: String,
///     age: i64,
/// }
///
/// impl ToRecord for User {
///     fn to_record(&self) -> Result<FieldBuffer> {
///         let mut buf = FieldBuffer::new();
///         buf.set_string("Name", &self.name)?;
///         buf.set_int64("Age", self.age)?;
///         Ok(buf)
///     }
/// }
/// ```
pub trait ToRecord {
    fn to_record(&self) -> Result<FieldBuffer>;
}
