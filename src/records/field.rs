//! # Field
//!
//! One named, typed value within a record. A field originates either
//! from a typed value (the write path, where encoding runs lazily) or
//! from payload bytes already in wire form (the scan path).

use eyre::{bail, Result};
use once_cell::unsync::OnceCell;

use crate::encoding;
use crate::types::{FieldType, FieldValue};

/// A named, typed value with memoized payload encoding.
///
/// [`Field::encode`] runs the codec at most once; repeated calls return
/// the same bytes without re-encoding.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    ftype: FieldType,
    value: Option<FieldValue>,
    encoded: OnceCell<Vec<u8>>,
}

impl Field {
    /// Builds a field from a typed value; encoding is deferred until the
    /// payload is first needed.
    pub fn from_value(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            ftype: value.field_type(),
            value: Some(value),
            encoded: OnceCell::new(),
        }
    }

    /// Builds a field around payload bytes already in wire form.
    pub fn from_raw(name: impl Into<String>, ftype: FieldType, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            ftype,
            value: None,
            encoded: OnceCell::with_value(payload),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.ftype
    }

    /// The typed value this field was built from, when there was one.
    ///
    /// Fields from the scan path carry only payload bytes and return
    /// `None` here.
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    /// The field's wire payload, encoded on first use and memoized.
    pub fn encode(&self) -> Result<&[u8]> {
        let payload = self.encoded.get_or_try_init(|| match &self.value {
            Some(value) => encoding::encode_value(self.ftype, value),
            // both constructors either set a value or fill the cell
            None => bail!("field '{}' has neither value nor payload", self.name),
        })?;
        Ok(payload.as_slice())
    }
}
