//! Field discovery: occurrence tallying and column ordering
//!
//! The first pass over the input builds a [`FieldIndex`] — a frequency table
//! of every field name seen in any record. The table then yields the fixed
//! column order used for the header and every emitted row: most frequent
//! field first, ties broken alphabetically. Sorting is always explicit; map
//! iteration order is never relied on.

use crate::error::Result;
use crate::types::Record;
use crate::walker::RecordVisitor;
use std::collections::HashMap;

/// Frequency table of field names across all records.
#[derive(Debug, Default)]
pub struct FieldIndex {
    counts: HashMap<String, u64>,
}

impl FieldIndex {
    pub fn new() -> Self {
        FieldIndex::default()
    }

    /// Tally every field name present in `record`. First sight of a name
    /// yields a count of 1; counts are never decremented.
    pub fn record_fields(&mut self, record: &Record) {
        for key in record.keys() {
            *self.counts.entry(key.clone()).or_insert(0) += 1;
        }
    }

    /// Number of records a field appeared in, or 0 if never seen.
    pub fn count(&self, field: &str) -> u64 {
        self.counts.get(field).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Compute the column order: descending frequency, ties broken by
    /// ascending field name. Deterministic and total — no two distinct
    /// names compare equal.
    pub fn sorted_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.counts.keys().cloned().collect();
        columns.sort_by(|a, b| {
            self.counts[b]
                .cmp(&self.counts[a])
                .then_with(|| a.cmp(b))
        });
        columns
    }
}

/// First-pass visitor for streaming mode: tallies field names, drops the
/// record.
#[derive(Debug, Default)]
pub struct FieldIndexer {
    index: FieldIndex,
}

impl FieldIndexer {
    pub fn new() -> Self {
        FieldIndexer::default()
    }

    pub fn into_index(self) -> FieldIndex {
        self.index
    }
}

impl RecordVisitor for FieldIndexer {
    fn visit_record(&mut self, record: Record) -> Result<()> {
        self.index.record_fields(&record);
        Ok(())
    }
}

/// First-pass visitor for buffered mode: tallies field names and retains
/// every record so emission can replay from memory instead of re-parsing.
#[derive(Debug, Default)]
pub struct BufferingIndexer {
    index: FieldIndex,
    records: Vec<Record>,
}

impl BufferingIndexer {
    pub fn new() -> Self {
        BufferingIndexer::default()
    }

    pub fn into_parts(self) -> (FieldIndex, Vec<Record>) {
        (self.index, self.records)
    }
}

impl RecordVisitor for BufferingIndexer {
    fn visit_record(&mut self, record: Record) -> Result<()> {
        self.index.record_fields(&record);
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(fields: &[&str]) -> Record {
        let mut record = Record::new();
        for field in fields {
            record.insert(field.to_string(), Value::Null);
        }
        record
    }

    fn index_with(counts: &[(&str, u64)]) -> FieldIndex {
        let mut index = FieldIndex::new();
        for &(field, count) in counts {
            for _ in 0..count {
                index.record_fields(&record(&[field]));
            }
        }
        index
    }

    #[test]
    fn counts_accumulate_per_record() {
        let mut index = FieldIndex::new();
        index.record_fields(&record(&["name", "category", "age", "valid"]));
        index.record_fields(&record(&["category", "valid"]));
        index.record_fields(&record(&[]));

        assert_eq!(index.count("name"), 1);
        assert_eq!(index.count("category"), 2);
        assert_eq!(index.count("age"), 1);
        assert_eq!(index.count("valid"), 2);
        assert_eq!(index.count("never_seen"), 0);
    }

    #[test]
    fn columns_sort_by_frequency_then_name() {
        let index = index_with(&[
            ("apples", 4),
            ("angles", 4),
            ("marbles", 12),
            ("feelings", 1),
            ("colors", 1),
        ]);
        assert_eq!(
            index.sorted_columns(),
            vec!["marbles", "angles", "apples", "colors", "feelings"]
        );
    }

    #[test]
    fn column_order_is_deterministic() {
        let index = index_with(&[("b", 2), ("a", 2), ("c", 1)]);
        let first = index.sorted_columns();
        for _ in 0..10 {
            assert_eq!(index.sorted_columns(), first);
        }
    }

    #[test]
    fn indexing_is_idempotent_across_passes() {
        let records: Vec<Record> = vec![
            serde_json::from_value(json!({"test": "hello", "example": 42})).unwrap(),
            serde_json::from_value(json!({"example": 12})).unwrap(),
        ];

        let mut first_pass = FieldIndex::new();
        let mut second_pass = FieldIndex::new();
        for record in &records {
            first_pass.record_fields(record);
        }
        for record in &records {
            second_pass.record_fields(record);
        }

        assert_eq!(first_pass.sorted_columns(), second_pass.sorted_columns());
        assert_eq!(first_pass.sorted_columns(), vec!["example", "test"]);
    }

    #[test]
    fn buffering_indexer_retains_records_in_order() {
        let mut buffering = BufferingIndexer::new();
        buffering.visit_record(record(&["a"])).unwrap();
        buffering.visit_record(record(&["a", "b"])).unwrap();

        let (index, records) = buffering.into_parts();
        assert_eq!(index.count("a"), 2);
        assert_eq!(index.count("b"), 1);
        assert_eq!(records.len(), 2);
        assert!(records[1].contains_key("b"));
    }
}
