//! fjson2csv-data: generate sample JSON input for exercising fjson2csv
//!
//! Emits a single top-level JSON array of flat, heterogeneous objects.
//! Field membership and values vary deterministically by record index, so a
//! given flag combination always produces the same file: field `j` from the
//! pool appears in every `(j + 1)`-th record, giving a strictly decreasing
//! frequency per field, which exercises the converter's frequency-based
//! column ordering.
//!
//! Usage:
//!   # 1000 records with a 10-field pool, to stdout
//!   fjson2csv-data
//!
//!   # 50k records with 20 fields, to a file
//!   fjson2csv-data --records 50000 --fields 20 -o sample.json

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fjson2csv-data")]
#[command(about = "Generate sample JSON data for fjson2csv", long_about = None)]
struct Args {
    /// Number of field names in the pool (clamped to 1..=20)
    #[arg(long, short = 'f', default_value_t = 10)]
    fields: usize,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value_t = 1000)]
    records: usize,

    /// Output file (use stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

const FIELD_POOL: [&str; 20] = [
    "name", "category", "age", "valid", "rating", "color", "size", "weight", "origin", "stock",
    "brand", "batch", "grade", "season", "shelf", "vendor", "lot", "unit", "code", "note",
];

fn main() -> Result<()> {
    let args = Args::parse();
    let fields = args.fields.clamp(1, FIELD_POOL.len());

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);

    writeln!(out, "[")?;
    for i in 0..args.records {
        let record = generate_record(i, fields);
        if i > 0 {
            writeln!(out, ",")?;
        }
        serde_json::to_writer(&mut out, &Value::Object(record))
            .context("failed to encode record")?;
    }
    writeln!(out, "\n]")?;

    out.flush().context("failed to flush output")?;
    Ok(())
}

/// Build record `i`: field `j` is present when `i % (j + 1) == 0`, with a
/// value whose type cycles by field position.
fn generate_record(i: usize, fields: usize) -> Map<String, Value> {
    let mut record = Map::new();
    for (j, field) in FIELD_POOL.iter().take(fields).enumerate() {
        if i % (j + 1) != 0 {
            continue;
        }
        let value = match j % 3 {
            0 => Value::String(format!("{field}-{}", i % 97)),
            1 => Value::Number(Number::from((i * 7 + j) % 100)),
            _ => Value::Bool((i + j) % 2 == 0),
        };
        record.insert(field.to_string(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_field_appears_in_every_record() {
        for i in 0..50 {
            assert!(generate_record(i, 10).contains_key(FIELD_POOL[0]));
        }
    }

    #[test]
    fn frequencies_decrease_with_field_position() {
        let mut seen = vec![0usize; 10];
        for i in 0..1000 {
            let record = generate_record(i, 10);
            for (j, field) in FIELD_POOL.iter().take(10).enumerate() {
                if record.contains_key(*field) {
                    seen[j] += 1;
                }
            }
        }
        for pair in seen.windows(2) {
            assert!(pair[0] >= pair[1], "{seen:?}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_record(42, 20), generate_record(42, 20));
    }
}
