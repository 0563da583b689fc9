//! # Owned Field Values
//!
//! `FieldValue` is the fully-owned scalar a field carries when it is built
//! from typed input. Fields reconstructed from a scan start from encoded
//! payload bytes instead and never pass through this representation.

use super::FieldType;
use std::fmt;

/// An owned scalar value, one variant per [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Int64(i64),
    Str(String),
}

impl FieldValue {
    /// The type this value encodes as.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::Str(_) => FieldType::String,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int64(v) => write!(f, "{}", v),
            FieldValue::Str(v) => f.write_str(v),
        }
    }
}
