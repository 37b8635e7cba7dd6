//! CSV emission in a fixed column order
//!
//! [`CsvWriter`] is the second-pass visitor: it writes one CSV line per
//! record, filling absent fields with empty cells. Values are written as-is;
//! no quoting or delimiter escaping is performed (documented limitation).

use crate::error::{ConvertError, Result};
use crate::types::Record;
use crate::walker::RecordVisitor;
use serde_json::Value;
use std::borrow::Cow;
use std::io::{BufWriter, Write};

/// Convert one JSON scalar to its CSV cell text.
///
/// Numbers are rendered as their base-10 integer truncation toward zero:
/// `4` stays `4`, `12.9` becomes `12`, `-3.7` becomes `-3`. Null and
/// non-scalar values render as empty text.
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Cow::Owned((f as i64).to_string()),
            None => Cow::Borrowed(""),
        },
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        _ => Cow::Borrowed(""),
    }
}

/// Writes CSV rows to a sink through an internal write buffer.
///
/// The column order is fixed at construction and never changes for the
/// lifetime of the writer. Write failures surface as
/// [`ConvertError::SinkFailure`]; the caller aborts the walk on the first
/// one.
pub struct CsvWriter<W: Write> {
    out: BufWriter<W>,
    columns: Vec<String>,
    delimiter: char,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(sink: W, columns: Vec<String>, delimiter: char, write_buffer_size: usize) -> Self {
        CsvWriter {
            out: BufWriter::with_capacity(write_buffer_size, sink),
            columns,
            delimiter,
        }
    }

    /// Write the header line: column names joined by the delimiter. The
    /// drivers skip this entirely when no fields were discovered, so an
    /// empty input produces zero bytes rather than a blank header line.
    pub fn write_header(&mut self) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        let header = self.columns.join(&self.delimiter.to_string());
        writeln!(self.out, "{header}").map_err(ConvertError::SinkFailure)
    }

    /// Flush the write buffer and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(ConvertError::SinkFailure)?;
        self.out
            .into_inner()
            .map_err(|err| ConvertError::SinkFailure(err.into_error()))
    }

    fn emit(&mut self, record: &Record) -> std::io::Result<()> {
        let mut delim_buf = [0u8; 4];
        let delim = self.delimiter.encode_utf8(&mut delim_buf).as_bytes();
        let Self { out, columns, .. } = self;

        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.write_all(delim)?;
            }
            if let Some(value) = record.get(column) {
                out.write_all(cell_text(value).as_bytes())?;
            }
        }
        out.write_all(b"\n")
    }
}

impl<W: Write> RecordVisitor for CsvWriter<W> {
    fn visit_record(&mut self, record: Record) -> Result<()> {
        self.emit(&record).map_err(ConvertError::SinkFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn as_record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn cell_text_conversions() {
        let cases = [
            (json!("test"), "test"),
            (json!(12345), "12345"),
            (json!(12.9), "12"),
            (json!(-3.7), "-3"),
            (json!(true), "true"),
            (json!(false), "false"),
            (json!(null), ""),
        ];
        for (value, expected) in cases {
            assert_eq!(cell_text(&value), expected, "{value}");
        }
    }

    #[test]
    fn integers_never_gain_a_decimal_point() {
        for value in [json!(0), json!(4), json!(-17), json!(4.0)] {
            assert!(!cell_text(&value).contains('.'), "{value}");
        }
    }

    #[test]
    fn writes_cells_in_column_order() {
        let mut writer = CsvWriter::new(
            Vec::new(),
            columns(&["name", "category", "age", "valid"]),
            ',',
            1024,
        );
        let record = as_record(json!({
            "name": "pickle", "category": "condiment", "age": 4, "valid": true
        }));

        writer.visit_record(record).unwrap();
        let output = writer.finish().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "pickle,condiment,4,true\n");
    }

    #[test]
    fn absent_fields_become_empty_cells() {
        let mut writer = CsvWriter::new(Vec::new(), columns(&["a", "b", "c"]), ',', 1024);
        writer.visit_record(as_record(json!({"b": "x"}))).unwrap();

        let output = writer.finish().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), ",x,\n");
    }

    #[test]
    fn header_joins_columns_with_delimiter() {
        let mut writer = CsvWriter::new(Vec::new(), columns(&["example", "test"]), ';', 1024);
        writer.write_header().unwrap();

        let output = writer.finish().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "example;test\n");
    }

    /// Sink that fails every write, simulating a broken output stream.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("intentional"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("intentional"))
        }
    }

    #[test]
    fn write_failure_is_a_sink_failure() {
        let mut writer = CsvWriter::new(BrokenSink, columns(&["a"]), ',', 1024);
        let outcome = writer
            .visit_record(as_record(json!({"a": 1})))
            .and_then(|()| writer.finish().map(|_| ()));
        assert!(matches!(outcome, Err(ConvertError::SinkFailure(_))));
    }
}
