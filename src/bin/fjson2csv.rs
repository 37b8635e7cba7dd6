//! fjson2csv: convert a JSON array of flat objects into CSV
//!
//! Usage:
//!   # Read from a file, write to a file
//!   fjson2csv data.json data.csv
//!
//!   # Read from stdin, write to stdout
//!   cat data.json | fjson2csv
//!
//!   # Convert a very large file incrementally instead of in memory
//!   fjson2csv --incremental data.json data.csv

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fjson2csv::{convert_buffered, convert_streaming, ConvertConfig, ConvertMode};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fjson2csv")]
#[command(about = "Convert a JSON array of flat objects into CSV", long_about = None)]
struct Args {
    /// Input JSON file (use stdin if omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output CSV file (use stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Convert incrementally with two passes over the input instead of
    /// buffering all records in memory (requires a seekable input file)
    #[arg(long, short = 'i')]
    incremental: bool,

    /// Internal read buffer size, in KiB
    #[arg(long, short = 'r', value_name = "KIB", default_value_t = 1024)]
    read_buffer: usize,

    /// Internal write buffer size, in KiB
    #[arg(long, short = 'w', value_name = "KIB", default_value_t = 1024)]
    write_buffer: usize,

    /// Cell delimiter
    #[arg(long, short = 'd', default_value_t = ',')]
    delimiter: char,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConvertConfig {
        read_buffer_size: args.read_buffer * 1024,
        write_buffer_size: args.write_buffer * 1024,
        delimiter: args.delimiter,
        mode: if args.incremental {
            ConvertMode::Streaming
        } else {
            ConvertMode::Buffered
        },
    };

    let mut sink: Box<dyn std::io::Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    match (&args.input, config.mode) {
        (Some(path), ConvertMode::Streaming) => {
            let source = File::open(path)
                .with_context(|| format!("failed to open input file: {}", path.display()))?;
            convert_streaming(source, &mut sink, &config)?;
        }
        (Some(path), ConvertMode::Buffered) => {
            let source = File::open(path)
                .with_context(|| format!("failed to open input file: {}", path.display()))?;
            convert_buffered(source, &mut sink, &config)?;
        }
        (None, ConvertMode::Streaming) => {
            bail!("incremental conversion needs a seekable input file, not stdin");
        }
        (None, ConvertMode::Buffered) => {
            convert_buffered(std::io::stdin().lock(), &mut sink, &config)?;
        }
    }

    Ok(())
}
