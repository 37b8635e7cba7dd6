//! Conversion drivers: streaming and buffered
//!
//! Both drivers run the same pipeline — index fields, sort columns, emit —
//! and produce byte-identical output for the same input. They differ only in
//! how the emission pass gets its records: streaming re-parses a rewound
//! source, buffered replays records retained during the first parse.

use crate::error::{ConvertError, Result};
use crate::index::{BufferingIndexer, FieldIndexer};
use crate::types::{ConvertConfig, ConvertMode};
use crate::walker::{walk_array, RecordVisitor};
use crate::writer::CsvWriter;
use std::io::{Read, Seek, Write};

/// Convert a JSON array of objects to CSV, in the mode selected by
/// `config.mode`.
pub fn convert<R, W>(source: R, sink: W, config: &ConvertConfig) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    match config.mode {
        ConvertMode::Streaming => convert_streaming(source, sink, config),
        ConvertMode::Buffered => convert_buffered(source, sink, config),
    }
}

/// Two-pass conversion: parse once to index fields, rewind the source, parse
/// again to emit rows. Memory use is bounded by the number of distinct field
/// names; the source is read twice and must support seeking.
pub fn convert_streaming<R, W>(mut source: R, sink: W, config: &ConvertConfig) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    let mut indexer = FieldIndexer::new();
    walk_array(&mut source, config.read_buffer_size, &mut indexer)?;
    source.rewind().map_err(ConvertError::SourceFailure)?;

    let columns = indexer.into_index().sorted_columns();
    if columns.is_empty() {
        // Zero fields discovered: write nothing, not even a header line.
        return Ok(());
    }

    let mut writer = CsvWriter::new(sink, columns, config.delimiter, config.write_buffer_size);
    writer.write_header()?;
    walk_array(&mut source, config.read_buffer_size, &mut writer)?;
    writer.finish()?;
    Ok(())
}

/// Single-parse conversion: every decoded record is retained in memory during
/// indexing, then emission replays the buffer. The source is read exactly
/// once and does not need to support seeking.
pub fn convert_buffered<R, W>(source: R, sink: W, config: &ConvertConfig) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut buffering = BufferingIndexer::new();
    walk_array(source, config.read_buffer_size, &mut buffering)?;

    let (index, records) = buffering.into_parts();
    let columns = index.sorted_columns();
    if columns.is_empty() {
        return Ok(());
    }

    let mut writer = CsvWriter::new(sink, columns, config.delimiter, config.write_buffer_size);
    writer.write_header()?;
    for record in records {
        writer.visit_record(record)?;
    }
    writer.finish()?;
    Ok(())
}
