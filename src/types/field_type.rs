use eyre::{bail, Result};
use std::fmt;

/// Scalar type of a record field.
///
/// The discriminant doubles as the tag byte a backend stores for each
/// schema entry, so variants keep their values forever and new kinds
/// append to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldType {
    /// 64-bit signed integer, encoded as a zigzag varint.
    Int64 = 0,
    /// UTF-8 string, encoded as its raw bytes.
    String = 1,
}

impl FieldType {
    /// Returns the single-byte tag persisted in schema storage.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Decodes a stored tag byte back into a type.
    ///
    /// Unknown tags fail rather than mapping to a default, so data written
    /// by a newer build is never silently misread.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(FieldType::Int64),
            1 => Ok(FieldType::String),
            other => bail!("unknown field type tag {}", other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int64 => "int64",
            FieldType::String => "string",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for ftype in [FieldType::Int64, FieldType::String] {
            let decoded = FieldType::from_tag(ftype.tag()).unwrap();
            assert_eq!(decoded, ftype, "tag {} SHOULD round-trip", ftype.tag());
        }
    }

    #[test]
    fn test_tag_values_are_stable() {
        assert_eq!(FieldType::Int64.tag(), 0);
        assert_eq!(FieldType::String.tag(), 1);
    }

    #[test]
    fn test_unknown_tag_fails() {
        let err = FieldType::from_tag(7).unwrap_err();
        assert!(
            err.to_string().contains("unknown field type tag"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(FieldType::Int64.to_string(), "int64");
        assert_eq!(FieldType::String.to_string(), "string");
    }
}
