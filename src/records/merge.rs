//! # Composite-Key Merge Scan
//!
//! This module reassembles logical records from the flat entry stream a
//! backend serves. One record is stored as one entry per field, all
//! sharing the record id prefix, so a scan in key order sees each
//! record's fields contiguously:
//!
//! ```text
//! 0000000000000001-Age    -> varint(10)
//! 0000000000000001-Name   -> "John 1"
//! 0000000000000002-Age    -> varint(11)
//! 0000000000000002-Name   -> "John 2"
//! groups                  -> (nested bucket, no value)
//! ```
//!
//! ## Algorithm
//!
//! For each [`Cursor::next_record`] call:
//!
//! 1. Peek at the next raw entry; value-less entries mark nested buckets
//!    and are skipped.
//! 2. Split the key at the first separator into record id and field name.
//! 3. On the first entry, latch its record id; afterwards, a differing id
//!    ends the record WITHOUT consuming the entry, which leaves it as the
//!    opening entry of the next call.
//! 4. Resolve the field name against the schema and append the payload to
//!    the record under the schema's canonical name and type.
//!
//! The stream is consumed exactly once; the single peeked entry is the
//! only lookahead held between calls. Malformed keys and unknown field
//! names fail the scan, and since the offending entry is never consumed,
//! subsequent calls keep failing rather than resynchronizing.

use std::iter::Peekable;

use eyre::{eyre, Result};

use crate::encoding::split_composite_key;
use crate::engine::{Cursor, RawEntry};
use crate::records::{FieldBuffer, Schema};

/// Cursor that reassembles records from a sorted raw entry stream.
pub struct MergeCursor<'a, I>
where
    I: Iterator<Item = RawEntry<'a>>,
{
    entries: Peekable<I>,
    schema: Schema,
}

impl<'a, I> MergeCursor<'a, I>
where
    I: Iterator<Item = RawEntry<'a>>,
{
    /// Wraps a raw entry stream.
    ///
    /// `schema` must cover every field name the stream yields; entries
    /// must arrive in ascending key order.
    pub fn new(entries: I, schema: Schema) -> Self {
        Self {
            entries: entries.peekable(),
            schema,
        }
    }
}

impl<'a, I> Cursor for MergeCursor<'a, I>
where
    I: Iterator<Item = RawEntry<'a>>,
{
    fn next_record(&mut self) -> Result<Option<FieldBuffer>> {
        let mut record = FieldBuffer::new();
        let mut current_id: Option<&'a [u8]> = None;

        loop {
            let (key, value) = match self.entries.peek() {
                Some(entry) => (entry.key, entry.value),
                None => break,
            };

            // nested buckets occupy a key slot but carry no value
            let Some(payload) = value else {
                self.entries.next();
                continue;
            };

            let (id, raw_name) = split_composite_key(key)?;
            match current_id {
                None => current_id = Some(id),
                // a new id opens the next record; leave its entry peeked
                Some(current) if current != id => break,
                Some(_) => {}
            }

            let name = std::str::from_utf8(raw_name)
                .map_err(|_| eyre!("malformed composite key: field name is not valid utf-8"))?;
            let info = self
                .schema
                .get(name)
                .ok_or_else(|| eyre!("field '{}' has no schema entry", name))?;
            record.set_raw(info.name.clone(), info.ftype, payload.to_vec())?;
            self.entries.next();
        }

        if record.is_empty() {
            return Ok(None);
        }
        Ok(Some(record))
    }
}
