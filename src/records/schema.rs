//! # Schema
//!
//! A schema records, for one bucket, every field name ever written there
//! and the type that name was last written with. Lookups return absence
//! rather than errors, and writes are upserts: a later write under an
//! existing name silently replaces the recorded type. No cross-record
//! conflict detection happens here.

use hashbrown::HashMap;

use crate::types::FieldType;

/// One schema entry: a field's canonical name and recorded type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub ftype: FieldType,
}

/// The field name to type map describing records within one bucket.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldInfo>,
}

impl Schema {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Looks up a field by name; an absent name is not an error.
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Upserts a field entry, replacing any previously recorded type.
    pub fn set(&mut self, name: impl Into<String>, ftype: FieldType) {
        let name = name.into();
        self.fields.insert(name.clone(), FieldInfo { name, ftype });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.values()
    }
}
