//! # Integration Tests for Query Pipelines
//!
//! End-to-end tests for the query layer: matchers filter, selectors
//! project and aggregate, and pipelines compose stages over any bucket,
//! including each other's buffered output.
//!
//! ## Test Categories
//!
//! 1. **Matcher Tests**: predicate filtering and its failure modes
//! 2. **Selector Tests**: projection, max aggregation, op chaining
//! 3. **Pipeline Tests**: composition, identity, short-circuiting
//!
//! ## Running Tests
//!
//! ```sh
//! cargo test --test query_pipeline
//! ```

use std::cell::Cell;
use std::rc::Rc;

use eyre::Result;
use facetdb::{
    Bucket, Cursor, Engine, FieldBuffer, FieldType, Int64Compare, MemoryEngine, Pipe, Pipeline,
    Query, RecordBuffer, RecordExt, Schema, Selector, StrEq,
};

/// Ten people named `John 0` through `John 9` with matching ages.
fn seeded_engine() -> MemoryEngine {
    let engine = MemoryEngine::new();
    let mut tx = engine.begin(true).unwrap();
    for i in 0..10 {
        let mut person = FieldBuffer::new();
        person.set_string("Name", format!("John {i}")).unwrap();
        person.set_int64("Age", i).unwrap();
        tx.insert(&person, &["people"]).unwrap();
    }
    tx.commit().unwrap();
    engine
}

fn ages(buffer: &RecordBuffer) -> Vec<i64> {
    buffer
        .iter()
        .map(|record| record.get_int64("Age").unwrap())
        .collect()
}

mod matcher_tests {
    use super::*;

    #[test]
    fn int64_gt_keeps_matching_records_in_order() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .matching(Int64Compare::gt("Age", 5))
            .run(&*bucket)
            .unwrap();

        assert_eq!(ages(&out), [6, 7, 8, 9]);
        for (record, age) in out.iter().zip([6, 7, 8, 9]) {
            assert_eq!(
                record.get_str("Name").unwrap(),
                format!("John {age}"),
                "filtering SHOULD keep whole records intact"
            );
        }
    }

    #[test]
    fn int64_le_includes_the_boundary() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .matching(Int64Compare::le("Age", 0))
            .run(&*bucket)
            .unwrap();

        assert_eq!(ages(&out), [0]);
    }

    #[test]
    fn str_eq_selects_the_exact_name() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .matching(StrEq::new("Name", "John 3"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(ages(&out), [3]);
    }

    #[test]
    fn matcher_on_missing_field_fails() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let err = Query::new()
            .matching(Int64Compare::gt("Ghost", 1))
            .run(&*bucket)
            .unwrap_err();
        assert!(err.to_string().contains("field 'Ghost' not found"));
    }

    #[test]
    fn matcher_type_mismatch_fails() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let err = Query::new()
            .matching(Int64Compare::gt("Name", 1))
            .run(&*bucket)
            .unwrap_err();
        assert!(err.to_string().contains("expected int64"), "got: {err}");
    }
}

mod selector_tests {
    use super::*;

    /// A bucket whose schema knows `Age` but whose scan yields nothing.
    struct DrainedBucket;

    impl Bucket for DrainedBucket {
        fn schema(&self) -> Result<Schema> {
            let mut schema = Schema::new();
            schema.set("Age", FieldType::Int64);
            Ok(schema)
        }

        fn cursor(&self) -> Result<Box<dyn Cursor + '_>> {
            struct Nothing;
            impl Cursor for Nothing {
                fn next_record(&mut self) -> Result<Option<FieldBuffer>> {
                    Ok(None)
                }
            }
            Ok(Box::new(Nothing))
        }
    }

    #[test]
    fn field_projection_emits_one_record_per_input() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .select(Selector::new().field("Name"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(out.len(), 10);
        for (i, record) in out.iter().enumerate() {
            assert_eq!(record.len(), 1, "projection SHOULD keep only one field");
            assert_eq!(record.get_str("Name").unwrap(), format!("John {i}"));
        }
    }

    #[test]
    fn projection_of_missing_field_fails() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let err = Query::new()
            .select(Selector::new().field("Ghost"))
            .run(&*bucket)
            .unwrap_err();
        assert!(err.to_string().contains("select: field 'Ghost' not found"));
    }

    #[test]
    fn max_int64_finds_the_maximum() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .select(Selector::new().max_int64("Age"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out.get(0).unwrap().get_int64("max(Age)").unwrap(), 9);
    }

    #[test]
    fn max_int64_over_all_negative_values() {
        let engine = MemoryEngine::new();
        let mut tx = engine.begin(true).unwrap();
        for i in -5..0 {
            let mut record = FieldBuffer::new();
            record.set_int64("Delta", i).unwrap();
            tx.insert(&record, &["readings"]).unwrap();
        }

        let bucket = tx.bucket(&["readings"]).unwrap();
        let out = Query::new()
            .select(Selector::new().max_int64("Delta"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(
            out.get(0).unwrap().get_int64("max(Delta)").unwrap(),
            -1,
            "an all-negative column SHOULD keep its true maximum"
        );
    }

    #[test]
    fn max_over_string_field_fails_before_scanning() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let err = Query::new()
            .select(Selector::new().max_int64("Name"))
            .run(&*bucket)
            .unwrap_err();
        assert!(err.to_string().contains("max requires int64"), "got: {err}");
    }

    #[test]
    fn max_over_zero_records_fails() {
        let err = Query::new()
            .select(Selector::new().max_int64("Age"))
            .run(&DrainedBucket)
            .unwrap_err();
        assert!(err.to_string().contains("no records"), "got: {err}");
    }

    #[test]
    fn selector_ops_concatenate_into_one_buffer() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .select(Selector::new().field("Name").max_int64("Age"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(out.len(), 11, "ten projections plus one aggregate");
        assert_eq!(out.get(0).unwrap().get_str("Name").unwrap(), "John 0");
        assert_eq!(
            out.get(10).unwrap().get_int64("max(Age)").unwrap(),
            9,
            "ops SHOULD append in the order they were chained"
        );
    }

    #[test]
    fn selector_with_no_ops_yields_nothing() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .select(Selector::new())
            .run(&*bucket)
            .unwrap();
        assert!(out.is_empty());
    }
}

mod pipeline_tests {
    use super::*;

    /// Counts invocations, then passes every record through.
    struct CountingPipe {
        calls: Rc<Cell<usize>>,
    }

    impl Pipe for CountingPipe {
        fn pipe(&self, input: &dyn Bucket) -> Result<RecordBuffer> {
            self.calls.set(self.calls.get() + 1);
            let mut out = RecordBuffer::new();
            let mut cursor = input.cursor()?;
            while let Some(record) = cursor.next_record()? {
                out.push(record);
            }
            Ok(out)
        }
    }

    struct FailingPipe;

    impl Pipe for FailingPipe {
        fn pipe(&self, _input: &dyn Bucket) -> Result<RecordBuffer> {
            eyre::bail!("stage exploded")
        }
    }

    #[test]
    fn empty_pipeline_materializes_the_source() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());

        let out = pipeline.run(&*bucket).unwrap();
        assert_eq!(ages(&out), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn match_then_select_end_to_end() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let out = Query::new()
            .matching(Int64Compare::gt("Age", 5))
            .select(Selector::new().max_int64("Age"))
            .run(&*bucket)
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out.get(0).unwrap().get_int64("max(Age)").unwrap(), 9);
    }

    #[test]
    fn a_query_serves_as_a_stage_of_another_pipeline() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let mut pipeline = Pipeline::new();
        pipeline.push(Box::new(
            Query::new().matching(Int64Compare::le("Age", 7)),
        ));
        pipeline.push(Box::new(Selector::new().max_int64("Age")));
        assert_eq!(pipeline.len(), 2);

        let out = pipeline.run(&*bucket).unwrap();
        assert_eq!(out.get(0).unwrap().get_int64("max(Age)").unwrap(), 7);
    }

    #[test]
    fn a_failing_stage_short_circuits_the_rest() {
        let engine = seeded_engine();
        let mut tx = engine.begin(false).unwrap();
        let bucket = tx.bucket(&["people"]).unwrap();

        let before = Rc::new(Cell::new(0));
        let after = Rc::new(Cell::new(0));

        let mut pipeline = Pipeline::new();
        pipeline.push(Box::new(CountingPipe {
            calls: Rc::clone(&before),
        }));
        pipeline.push(Box::new(FailingPipe));
        pipeline.push(Box::new(CountingPipe {
            calls: Rc::clone(&after),
        }));

        let err = pipeline.run(&*bucket).unwrap_err();
        assert!(err.to_string().contains("stage exploded"));
        assert_eq!(before.get(), 1, "stages before the failure SHOULD run once");
        assert_eq!(after.get(), 0, "stages after the failure SHOULD NOT run");
    }
}
