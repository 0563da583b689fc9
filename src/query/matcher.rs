//! # Matchers
//!
//! Per-record predicates and the pipe that filters with them. A matcher
//! answers one question about one record; [`MatcherPipe`] scans its
//! input once and keeps the records the answer is yes for, preserving
//! input order.

use eyre::Result;

use crate::engine::Bucket;
use crate::query::Pipe;
use crate::records::{Record, RecordBuffer, RecordExt};

/// A predicate over one record.
pub trait Matcher {
    /// Whether `record` belongs in the output.
    ///
    /// Failures (missing field, type mismatch) propagate and abort the
    /// surrounding scan.
    fn matches(&self, record: &dyn Record) -> Result<bool>;
}

/// Filter stage around exactly one predicate.
///
/// Predicates are not combined here; every filter stage wraps a single
/// matcher.
pub struct MatcherPipe {
    matcher: Box<dyn Matcher>,
}

impl MatcherPipe {
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: Box::new(matcher),
        }
    }
}

impl Pipe for MatcherPipe {
    fn pipe(&self, input: &dyn Bucket) -> Result<RecordBuffer> {
        let mut out = RecordBuffer::new();
        let mut cursor = input.cursor()?;
        while let Some(record) = cursor.next_record()? {
            if self.matcher.matches(&record)? {
                out.push(record);
            }
        }
        Ok(out)
    }
}

/// Comparison operators for [`Int64Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl CompareOp {
    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Gt => lhs > rhs,
        }
    }
}

/// Matches records whose int64 field compares against a constant.
#[derive(Debug, Clone)]
pub struct Int64Compare {
    field: String,
    op: CompareOp,
    operand: i64,
}

impl Int64Compare {
    pub fn new(field: impl Into<String>, op: CompareOp, operand: i64) -> Self {
        Self {
            field: field.into(),
            op,
            operand,
        }
    }

    pub fn lt(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Lt, operand)
    }

    pub fn le(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Le, operand)
    }

    pub fn eq(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Eq, operand)
    }

    pub fn ne(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Ne, operand)
    }

    pub fn ge(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Ge, operand)
    }

    pub fn gt(field: impl Into<String>, operand: i64) -> Self {
        Self::new(field, CompareOp::Gt, operand)
    }
}

impl Matcher for Int64Compare {
    fn matches(&self, record: &dyn Record) -> Result<bool> {
        let value = record.get_int64(&self.field)?;
        Ok(self.op.holds(value, self.operand))
    }
}

/// Matches records whose string field equals a constant.
#[derive(Debug, Clone)]
pub struct StrEq {
    field: String,
    operand: String,
}

impl StrEq {
    pub fn new(field: impl Into<String>, operand: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operand: operand.into(),
        }
    }
}

impl Matcher for StrEq {
    fn matches(&self, record: &dyn Record) -> Result<bool> {
        Ok(record.get_str(&self.field)? == self.operand)
    }
}
