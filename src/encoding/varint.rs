//! # Signed Variable-Length Integer Encoding
//!
//! This module provides the zigzag varint codec used for int64 field
//! payloads. Values are first mapped to unsigned space with zigzag, then
//! written as base-128 little-endian groups with a continuation bit, so
//! small magnitudes of either sign take one byte.
//!
//! ## Encoding Format
//!
//! ZigZag interleaves signed values around zero:
//!
//! ```text
//! zigzag(v)   = (v << 1) ^ (v >> 63)
//! unzigzag(u) = (u >> 1) ^ -(u & 1)
//! ```
//!
//! The unsigned result is emitted 7 bits at a time, least significant
//! group first, high bit set on every byte except the last:
//!
//! | Value    | ZigZag | Bytes                  |
//! |----------|--------|------------------------|
//! | 0        | 0      | `[0x00]`               |
//! | -1       | 1      | `[0x01]`               |
//! | 1        | 2      | `[0x02]`               |
//! | -64      | 127    | `[0x7F]`               |
//! | 63       | 126    | `[0x7E]`               |
//! | 64       | 128    | `[0x80, 0x01]`         |
//! | i64::MAX | 2^64-2 | `[0xFE, 0xFF x8, 0x01]`|
//! | i64::MIN | 2^64-1 | `[0xFF x9, 0x01]`      |
//!
//! An encoding never exceeds [`MAX_VARINT_LEN`] bytes.
//!
//! ## Error Handling
//!
//! `decode_i64` returns `eyre::Result` with descriptive messages:
//! - Missing terminator byte: "truncated varint"
//! - More than 10 bytes: "varint exceeds 10 bytes"
//! - Tenth byte above 1: "varint overflows a 64-bit value"
//!
//! Bytes after the terminator are ignored; a payload produced by
//! [`encode_i64`] never has any.
//!
//! ## Thread Safety
//!
//! All functions are pure and stateless, making them inherently
//! thread-safe.

use eyre::{bail, ensure, Result};

/// Longest possible encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}

/// Encodes a signed 64-bit value as a zigzag varint.
pub fn encode_i64(value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    let mut raw = zigzag(value);
    while raw >= 0x80 {
        out.push((raw as u8) | 0x80);
        raw >>= 7;
    }
    out.push(raw as u8);
    out
}

/// Decodes a zigzag varint from the front of `data`.
pub fn decode_i64(data: &[u8]) -> Result<i64> {
    let mut raw: u64 = 0;
    let mut shift: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        ensure!(i < MAX_VARINT_LEN, "varint exceeds {} bytes", MAX_VARINT_LEN);
        if byte < 0x80 {
            ensure!(
                i < MAX_VARINT_LEN - 1 || byte <= 1,
                "varint overflows a 64-bit value"
            );
            return Ok(unzigzag(raw | (u64::from(byte) << shift)));
        }
        raw |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    bail!("truncated varint")
}
