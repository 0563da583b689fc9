//! # FacetDB - Typed Records over Ordered Key-Value Storage
//!
//! FacetDB is an embeddable record and query layer for stores whose
//! native unit is a single key to value pair. It stores free-form typed
//! records without the backend ever learning about record structure:
//!
//! - **Field-per-entry layout**: one record becomes one entry per field
//! - **Merge-scan reads**: records reassemble from one forward key scan
//! - **Composable queries**: filter and select stages chain over any
//!   bucket, including each other's output
//!
//! ## Quick Start
//!
//! ```ignore
//! use facetdb::{
//!     Engine, FieldBuffer, Int64Compare, MemoryEngine, Query, RecordExt,
//!     Selector, Transaction,
//! };
//!
//! let engine = MemoryEngine::new();
//! let mut tx = engine.begin(true)?;
//!
//! let mut person = FieldBuffer::new();
//! person.set_string("Name", "Ada")?;
//! person.set_int64("Age", 36)?;
//! tx.insert(&person, &["people"])?;
//!
//! {
//!     let bucket = tx.bucket(&["people"])?;
//!     let out = Query::new()
//!         .matching(Int64Compare::gt("Age", 30))
//!         .select(Selector::new().max_int64("Age"))
//!         .run(&*bucket)?;
//!     assert_eq!(out.get(0).unwrap().get_int64("max(Age)")?, 36);
//! }
//!
//! tx.commit()?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------+
//! |      Query Layer (Pipe/Pipeline)    |
//! +-------------------------------------+
//! |  Record Layer (FieldBuffer/Schema)  |
//! +-------------------------------------+
//! |  Codec Layer (varint/composite key) |
//! +-------------------------------------+
//! |  Engine Contract (Txn/Bucket/Cursor)|
//! +-------------------------------------+
//! |  Backend (MemoryEngine or your own) |
//! +-------------------------------------+
//! ```
//!
//! ## Physical Layout
//!
//! A record with fields `Name` and `Age` under id `0000000000000001` is
//! stored as:
//!
//! ```text
//! 0000000000000001-Age    -> varint payload
//! 0000000000000001-Name   -> utf-8 payload
//! ```
//!
//! Keys sort lexicographically, so one record's fields are contiguous
//! and records follow each other in id order.
//!
//! ## Module Overview
//!
//! - [`types`]: scalar field types and owned values
//! - [`encoding`]: varint payload codec, composite keys, record ids
//! - [`records`]: records, buffers, schemas, the merge scan
//! - [`engine`]: the backend contract plus the in-memory engine
//! - [`query`]: pipes, pipelines, matchers, selectors

pub mod encoding;
pub mod engine;
pub mod query;
pub mod records;
pub mod types;

pub use encoding::RecordId;
pub use engine::{Bucket, Cursor, Engine, MemoryEngine, RawEntry, Transaction};
pub use query::{
    CompareOp, Int64Compare, Matcher, MatcherPipe, Pipe, Pipeline, Query, SelectOp, Selector,
    StrEq,
};
pub use records::{
    Field, FieldBuffer, FieldInfo, MergeCursor, Record, RecordBuffer, RecordExt, Schema, ToRecord,
};
pub use types::{FieldType, FieldValue};
