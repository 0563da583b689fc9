//! # Record Layer
//!
//! This module provides the record abstraction layered on top of plain
//! key-value storage: named, typed fields grouped under one record id.
//!
//! ## Record Lifecycle
//!
//! ```text
//! write path                        read path
//! ----------                        ---------
//! FieldBuffer (typed fields)        raw entry scan (sorted keys)
//!       |                                 |
//!       v  one entry per field            v  merge on id prefix
//! <id>-<field> -> payload           MergeCursor -> FieldBuffer
//! ```
//!
//! ## Module Structure
//!
//! - `record`: the [`Record`] capability plus typed access and conversion
//! - `field`: one named, typed value with memoized encoding
//! - `buffer`: [`FieldBuffer`], the concrete in-memory record
//! - `schema`: the per-bucket field name to type map
//! - `record_buffer`: ordered record sets that stand in for buckets
//! - `merge`: reconstruction of records from a sorted raw entry stream

pub mod buffer;
pub mod field;
pub mod merge;
pub mod record;
pub mod record_buffer;
pub mod schema;


pub use buffer::FieldBuffer;
pub use field::Field;
pub use merge::MergeCursor;
pub use record::{Record, RecordExt, ToRecord};
pub use record_buffer::RecordBuffer;
pub use schema::{FieldInfo, Schema};
