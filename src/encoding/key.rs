//! # Composite Key Encoding
//!
//! One logical record is stored as one physical entry per field. Every
//! entry of a record shares its record id prefix:
//!
//! ```text
//! <recordID> '-' <fieldName>   ->   <encoded payload>
//! ```
//!
//! Under lexicographic key order this keeps all fields of one record
//! contiguous, which is what the merge scan in [`crate::records::merge`]
//! relies on. Splitting always takes the FIRST separator byte, so record
//! ids must never contain `-` while field names are free to.
//!
//! ## Record Ids
//!
//! [`format_record_id`] turns a per-bucket sequence number into 16
//! lowercase hex digits. The fixed width makes lexicographic order equal
//! numeric order, and the hex alphabet cannot collide with the separator.

use eyre::{bail, ensure, Result};
use std::fmt;

/// Byte separating the record id from the field name inside a key.
pub const SEPARATOR: u8 = b'-';

/// Opaque identifier naming one record within a bucket.
///
/// Assigned by the backend on insert. Ids sort in insertion order and
/// never contain [`SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(Vec<u8>);

impl RecordId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ids from foreign backends may not be utf-8
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Formats a bucket-local sequence number as a record id.
pub fn format_record_id(seq: u64) -> RecordId {
    RecordId(format!("{:016x}", seq).into_bytes())
}

/// Builds the physical key for one field of one record.
pub fn composite_key(record_id: &[u8], field_name: &str) -> Result<Vec<u8>> {
    ensure!(
        !record_id.contains(&SEPARATOR),
        "record id contains the separator byte"
    );
    let mut key = Vec::with_capacity(record_id.len() + 1 + field_name.len());
    key.extend_from_slice(record_id);
    key.push(SEPARATOR);
    key.extend_from_slice(field_name.as_bytes());
    Ok(key)
}

/// Splits a physical key into `(record id, field name)` at the first
/// separator byte.
pub fn split_composite_key(key: &[u8]) -> Result<(&[u8], &[u8])> {
    match key.iter().position(|&b| b == SEPARATOR) {
        Some(at) => Ok((&key[..at], &key[at + 1..])),
        None => bail!(
            "malformed composite key '{}': no separator",
            String::from_utf8_lossy(key)
        ),
    }
}
