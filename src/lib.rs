//! # fjson2csv - schema-free JSON to CSV conversion
//!
//! Converts a flat, heterogeneous collection of JSON objects (a single
//! top-level JSON array) into CSV text. No schema is declared up front: the
//! column set and its ordering are inferred from the data itself. Columns are
//! ordered by descending occurrence frequency, ties broken alphabetically,
//! and records missing a field get an empty cell for it.
//!
//! ## Modes
//!
//! - **Buffered** (default): one parsing pass, records retained in memory
//!   until emission. Works with any `Read` source.
//! - **Streaming**: two parsing passes over a rewound source, memory bounded
//!   by the number of distinct field names. Requires `Read + Seek`.
//!
//! Both modes produce byte-identical output for the same input.
//!
//! ## Quick Start
//!
//! ```rust
//! use fjson2csv::{convert_buffered, ConvertConfig};
//! use std::io::Cursor;
//!
//! # fn main() -> fjson2csv::Result<()> {
//! let input = r#"[{"test":"hello", "example":42}, {"example":12}]"#;
//! let mut output = Vec::new();
//!
//! convert_buffered(Cursor::new(input), &mut output, &ConvertConfig::default())?;
//!
//! // "example" appears in two records, "test" in one, so "example" leads.
//! assert_eq!(output, b"example,test\n42,hello\n12,\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Property values must be scalars (string, number, boolean, null); nested
//! objects and arrays render as empty cells. Values are written without
//! quoting or escaping, so string values containing the delimiter will shift
//! subsequent cells. Numbers are rendered as their integer truncation toward
//! zero: `12.9` becomes `12` and `-3.7` becomes `-3`.

pub mod convert;
pub mod error;
pub mod index;
pub mod types;
pub mod walker;
pub mod writer;

// Re-export commonly used types for convenience
pub use convert::{convert, convert_buffered, convert_streaming};
pub use error::{ConvertError, Result};
pub use index::{BufferingIndexer, FieldIndex, FieldIndexer};
pub use types::{ConvertConfig, ConvertMode, Record, DEFAULT_BUFFER_SIZE};
pub use walker::{walk_array, RecordVisitor};
pub use writer::{cell_text, CsvWriter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn mode_selection_via_config() {
        let input = r#"[{"a":1, "b":2}, {"a":3}]"#;
        let expected = "a,b\n1,2\n3,\n";

        for mode in [ConvertMode::Streaming, ConvertMode::Buffered] {
            let config = ConvertConfig {
                mode,
                ..ConvertConfig::default()
            };
            let mut output = Vec::new();
            convert(Cursor::new(input), &mut output, &config).unwrap();
            assert_eq!(String::from_utf8(output).unwrap(), expected, "{mode:?}");
        }
    }
}
