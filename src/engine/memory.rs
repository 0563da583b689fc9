//! # Memory Engine
//!
//! Reference implementation of the engine contract over nested ordered
//! maps. It backs the test suite and embeds directly where no physical
//! store is wanted.
//!
//! ## Transaction Model
//!
//! `begin` clones the root node, so every transaction works on a private
//! snapshot. Writable transactions additionally hold the single-writer
//! slot for their whole lifetime and publish their snapshot back on
//! commit; a second writer fails fast instead of blocking. Read-only
//! transactions never publish, which makes rollback a plain drop.
//!
//! ## Physical Layout
//!
//! Each bucket is a `Node` holding four ordered pieces:
//!
//! ```text
//! Node
//! |- seq       id counter, formats to 16 hex digits
//! |- schema    field name -> type tag byte
//! |- entries   composite key -> payload
//! `- children  bucket name -> Node
//! ```
//!
//! Raw scans interleave `entries` and `children` in ascending key order,
//! surfacing children as value-less entries the way a shared keyspace
//! backend would.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Peekable;

use eyre::{bail, eyre, Result};
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::{debug, trace};

use crate::encoding::{composite_key, format_record_id, RecordId};
use crate::engine::{Bucket, Cursor, Engine, RawEntry, Transaction};
use crate::records::{MergeCursor, Record, Schema};
use crate::types::FieldType;

/// One bucket's storage.
#[derive(Debug, Clone, Default)]
struct Node {
    seq: u64,
    schema: BTreeMap<String, u8>,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn descend(&self, path: &[&str]) -> Option<&Node> {
        let mut node = self;
        for part in path {
            node = node.children.get(*part)?;
        }
        Some(node)
    }

    fn descend_or_create(&mut self, path: &[&str]) -> &mut Node {
        let mut node = self;
        for part in path {
            node = node.children.entry((*part).to_string()).or_default();
        }
        node
    }

    /// Decodes the stored tag bytes into a typed schema.
    fn decode_schema(&self) -> Result<Schema> {
        let mut schema = Schema::new();
        for (name, tag) in &self.schema {
            schema.set(name.clone(), FieldType::from_tag(*tag)?);
        }
        Ok(schema)
    }
}

/// In-memory engine: nested ordered maps behind a reader-writer lock.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    root: RwLock<Node>,
    writer: Mutex<()>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for MemoryEngine {
    fn begin(&self, writable: bool) -> Result<Box<dyn Transaction + '_>> {
        let writer = if writable {
            match self.writer.try_lock() {
                Some(guard) => Some(guard),
                None => bail!("write transaction already active"),
            }
        } else {
            None
        };
        let root = self.root.read().clone();
        debug!(writable, "begin transaction");
        Ok(Box::new(MemTransaction {
            engine: self,
            root,
            writable,
            _writer: writer,
        }))
    }
}

/// Snapshot transaction over the memory engine.
struct MemTransaction<'e> {
    engine: &'e MemoryEngine,
    root: Node,
    writable: bool,
    _writer: Option<MutexGuard<'e, ()>>,
}

impl Transaction for MemTransaction<'_> {
    fn insert(&mut self, record: &dyn Record, path: &[&str]) -> Result<RecordId> {
        if !self.writable {
            bail!("read-only transaction");
        }
        let node = self.root.descend_or_create(path);
        node.seq += 1;
        let id = format_record_id(node.seq);
        for field in record.fields() {
            let payload = field.encode()?.to_vec();
            let key = composite_key(id.as_bytes(), field.name())?;
            node.entries.insert(key, payload);
            // last write wins; earlier records keep their payloads as-is
            node.schema
                .insert(field.name().to_string(), field.field_type().tag());
        }
        trace!(id = %id, fields = record.fields().len(), "insert record");
        Ok(id)
    }

    fn bucket(&mut self, path: &[&str]) -> Result<Box<dyn Bucket + '_>> {
        let node: &Node = if self.writable {
            self.root.descend_or_create(path)
        } else {
            self.root
                .descend(path)
                .ok_or_else(|| eyre!("bucket '{}' not found", path.join("/")))?
        };
        let schema = node.decode_schema()?;
        Ok(Box::new(MemBucket { node, schema }))
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let tx = *self;
        if !tx.writable {
            bail!("read-only transaction");
        }
        *tx.engine.root.write() = tx.root;
        debug!("commit transaction");
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        debug!(writable = self.writable, "rollback transaction");
        Ok(())
    }
}

/// One opened bucket: a node reference plus its decoded schema.
struct MemBucket<'t> {
    node: &'t Node,
    schema: Schema,
}

impl Bucket for MemBucket<'_> {
    fn schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    fn cursor(&self) -> Result<Box<dyn Cursor + '_>> {
        let raw = RawScan {
            entries: self.node.entries.iter().peekable(),
            children: self.node.children.keys().peekable(),
        };
        Ok(Box::new(MergeCursor::new(raw, self.schema.clone())))
    }
}

/// Interleaves a node's entries and child markers in ascending key order.
struct RawScan<'a> {
    entries: Peekable<btree_map::Iter<'a, Vec<u8>, Vec<u8>>>,
    children: Peekable<btree_map::Keys<'a, String, Node>>,
}

impl<'a> Iterator for RawScan<'a> {
    type Item = RawEntry<'a>;

    fn next(&mut self) -> Option<RawEntry<'a>> {
        let entry_first = match (self.entries.peek(), self.children.peek()) {
            (Some((key, _)), Some(child)) => key.as_slice() <= child.as_bytes(),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        if entry_first {
            let (key, value) = self.entries.next()?;
            Some(RawEntry {
                key: key.as_slice(),
                value: Some(value.as_slice()),
            })
        } else {
            let name = self.children.next()?;
            Some(RawEntry {
                key: name.as_bytes(),
                value: None,
            })
        }
    }
}
