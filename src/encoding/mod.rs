//! # Encoding Module
//!
//! This module provides the byte-level codecs behind record storage:
//!
//! - **Varint encoding**: zigzag variable-length encoding for int64 payloads
//! - **Key encoding**: composite `recordID-fieldName` keys and record ids
//!
//! [`encode_value`] and [`decode_value`] are the typed entry points that
//! route a payload through the codec its field type prescribes.

pub mod key;
pub mod varint;

pub use key::{composite_key, format_record_id, split_composite_key, RecordId, SEPARATOR};
pub use varint::{decode_i64, encode_i64};

use crate::types::{FieldType, FieldValue};
use eyre::{bail, Result, WrapErr};

/// Encodes a typed value into its wire payload.
///
/// Fails when the declared type disagrees with the value's variant; the
/// declared type is authoritative and a mismatch means the field was
/// assembled inconsistently.
pub fn encode_value(ftype: FieldType, value: &FieldValue) -> Result<Vec<u8>> {
    match (ftype, value) {
        (FieldType::Int64, FieldValue::Int64(v)) => Ok(encode_i64(*v)),
        (FieldType::String, FieldValue::Str(v)) => Ok(v.as_bytes().to_vec()),
        (declared, value) => bail!(
            "cannot encode {} value as {}",
            value.field_type(),
            declared
        ),
    }
}

/// Decodes a wire payload back into a typed value.
pub fn decode_value(ftype: FieldType, data: &[u8]) -> Result<FieldValue> {
    match ftype {
        FieldType::Int64 => Ok(FieldValue::Int64(decode_i64(data)?)),
        FieldType::String => {
            let text = std::str::from_utf8(data).wrap_err("string payload is not valid utf-8")?;
            Ok(FieldValue::Str(text.to_string()))
        }
    }
}
