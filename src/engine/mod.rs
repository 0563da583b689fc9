//! # Engine Contract
//!
//! This module defines the boundary between the record layer and the
//! store that actually holds bytes: an ordered, transactional key-value
//! backend. The record layer asks for nothing beyond these traits, so
//! page management, durability, and on-disk layout stay entirely on the
//! backend's side of the line.
//!
//! ## Roles
//!
//! | Trait         | Role                                              |
//! |---------------|---------------------------------------------------|
//! | [`Engine`]    | Opens transactions                                |
//! | [`Transaction`] | Atomic unit of reads and writes                 |
//! | [`Bucket`]    | Named container of records with a schema         |
//! | [`Cursor`]    | Forward-only, single-pass record iterator        |
//!
//! ## Lifetime Discipline
//!
//! Buckets borrow from their transaction, cursors borrow from their
//! bucket, and `commit`/`rollback` consume the transaction. A handle
//! outliving its transaction is therefore a compile error, not a runtime
//! check.
//!
//! ## Shipped Backend
//!
//! [`MemoryEngine`] implements the contract over nested ordered maps and
//! is the backend of choice for tests and for embedding without physical
//! storage.

pub mod memory;

pub use memory::MemoryEngine;

use eyre::Result;

use crate::encoding::RecordId;
use crate::records::{FieldBuffer, Record, Schema};

/// One physical entry surfaced by a bucket's raw ordered scan.
///
/// A `None` value marks a nested bucket occupying the key slot; record
/// reconstruction skips those.
#[derive(Debug, Clone, Copy)]
pub struct RawEntry<'a> {
    pub key: &'a [u8],
    pub value: Option<&'a [u8]>,
}

/// An ordered transactional key-value store records can be layered on.
pub trait Engine {
    /// Starts a transaction. `writable` governs whether inserts and
    /// commit are permitted; at most one writable transaction runs at a
    /// time.
    fn begin(&self, writable: bool) -> Result<Box<dyn Transaction + '_>>;
}

/// One atomic unit of work against an engine.
///
/// Dropping a transaction without committing discards its writes.
pub trait Transaction {
    /// Decomposes `record` into one key-value entry per field under the
    /// bucket at `path`, creating missing buckets along the way, and
    /// returns the id assigned to the record.
    fn insert(&mut self, record: &dyn Record, path: &[&str]) -> Result<RecordId>;

    /// Opens the bucket at `path`. Writable transactions create missing
    /// buckets; read-only transactions fail on them. An empty path opens
    /// the root bucket.
    fn bucket(&mut self, path: &[&str]) -> Result<Box<dyn Bucket + '_>>;

    /// Publishes every write of this transaction atomically.
    fn commit(self: Box<Self>) -> Result<()>;

    /// Discards every write of this transaction.
    fn rollback(self: Box<Self>) -> Result<()>;
}

/// A named container of records.
pub trait Bucket {
    /// The field name to type map covering every field ever written here.
    fn schema(&self) -> Result<Schema>;

    /// A fresh forward-only cursor over this bucket's records.
    fn cursor(&self) -> Result<Box<dyn Cursor + '_>>;
}

/// Forward-only, single-pass record iterator.
///
/// Advancing is destructive: a cursor is consumed exactly once from its
/// current position. `Ok(None)` marks the end of the scan.
pub trait Cursor {
    fn next_record(&mut self) -> Result<Option<FieldBuffer>>;
}
