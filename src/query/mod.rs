//! # Query Pipeline
//!
//! This module provides the query layer: composable bucket-to-bucket
//! transform stages and the [`Query`] builder that chains them.
//!
//! ## Execution Model
//!
//! A [`Pipe`] reads a bucket and produces a [`RecordBuffer`]; a
//! [`Pipeline`] threads a source bucket through its stages in order.
//! Because a `RecordBuffer` itself plays the bucket role, every stage
//! sees the same interface whether it reads from storage or from the
//! previous stage's output.
//!
//! ```text
//! source bucket -> [stage 1] -> buffer -> [stage 2] -> buffer -> result
//! ```
//!
//! Stages run strictly in order and each stage fully materializes its
//! output before the next starts. The first failing stage aborts the
//! run: later stages never execute and in-flight buffers are dropped.
//!
//! ## Stages
//!
//! - [`MatcherPipe`]: keeps records a [`Matcher`] predicate accepts
//! - [`Selector`]: projections and aggregations over the input
//! - [`Query`]: a whole pipeline, usable as a stage of another pipeline

pub mod matcher;
pub mod selector;

pub use matcher::{CompareOp, Int64Compare, Matcher, MatcherPipe, StrEq};
pub use selector::{SelectOp, Selector};

use eyre::Result;
use tracing::debug;

use crate::engine::Bucket;
use crate::records::RecordBuffer;

/// One bucket-to-bucket transform stage.
pub trait Pipe {
    /// Reads `input` and produces this stage's output records.
    fn pipe(&self, input: &dyn Bucket) -> Result<RecordBuffer>;
}

/// Ordered chain of pipes.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Pipe>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage to the end of the chain.
    pub fn push(&mut self, stage: Box<dyn Pipe>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Threads `source` through every stage in order.
    ///
    /// An empty pipeline is the identity and materializes the source
    /// into a buffer with one full scan.
    pub fn run(&self, source: &dyn Bucket) -> Result<RecordBuffer> {
        debug!(stages = self.stages.len(), "run pipeline");
        let mut stages = self.stages.iter();
        let Some(first) = stages.next() else {
            return materialize(source);
        };
        let mut current = first.pipe(source)?;
        for stage in stages {
            current = stage.pipe(&current)?;
        }
        Ok(current)
    }
}

/// Copies every record of `source` into a fresh buffer, in scan order.
fn materialize(source: &dyn Bucket) -> Result<RecordBuffer> {
    let mut out = RecordBuffer::new();
    let mut cursor = source.cursor()?;
    while let Some(record) = cursor.next_record()? {
        out.push(record);
    }
    Ok(out)
}

/// Chainable query over one bucket.
///
/// Builder methods append stages; [`Query::run`] executes them against a
/// source bucket. A query also implements [`Pipe`], so a whole query can
/// serve as one stage of an outer pipeline.
///
/// ```ignore
/// let out = Query::new()
///     .matching(Int64Compare::gt("Age", 5))
///     .select(Selector::new().max_int64("Age"))
///     .run(&*bucket)?;
/// ```
#[derive(Default)]
pub struct Query {
    pipeline: Pipeline,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter stage around one predicate.
    pub fn matching(mut self, matcher: impl Matcher + 'static) -> Self {
        self.pipeline.push(Box::new(MatcherPipe::new(matcher)));
        self
    }

    /// Appends a selector stage.
    pub fn select(mut self, selector: Selector) -> Self {
        self.pipeline.push(Box::new(selector));
        self
    }

    /// Executes the composed stages against `source`.
    pub fn run(&self, source: &dyn Bucket) -> Result<RecordBuffer> {
        self.pipeline.run(source)
    }
}

impl Pipe for Query {
    fn pipe(&self, input: &dyn Bucket) -> Result<RecordBuffer> {
        self.pipeline.run(input)
    }
}
