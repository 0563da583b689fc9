//! # Field Type System
//!
//! This module provides the canonical scalar type enum and owned value
//! representation used across schema storage, field encoding, and query
//! evaluation.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: one [`FieldType`] enum used everywhere
//! 2. **Storage-efficient**: `#[repr(u8)]` so a schema entry persists as
//!    a single tag byte
//! 3. **Closed on the Rust side, open on the wire**: the enum is total,
//!    and [`FieldType::from_tag`] is the boundary that rejects tag bytes
//!    this build does not know
//!
//! ## Type Catalog
//!
//! | Type   | Tag | Payload encoding                 |
//! |--------|-----|----------------------------------|
//! | Int64  | 0   | signed varint (zigzag, base-128) |
//! | String | 1   | identity bytes (UTF-8)           |
//!
//! Further scalar kinds extend the table by appending new discriminants;
//! existing tag values never change, since they are part of the stored
//! format.

mod field_type;
mod value;

pub use field_type::FieldType;
pub use value::FieldValue;
