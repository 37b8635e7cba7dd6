use serde_json::{Map, Value};

/// One decoded input object: a mapping from field name to scalar JSON value.
///
/// Records are transient in streaming mode (consumed by a visitor, then
/// dropped) and retained until emission completes in buffered mode.
pub type Record = Map<String, Value>;

/// Default capacity for the input and output buffers (1 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Memory/time trade-off for a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertMode {
    /// Two parsing passes over a seekable source; memory bounded by the
    /// number of distinct field names.
    Streaming,

    /// Single parsing pass; every decoded record is retained in memory until
    /// emission completes. The source does not need to support seeking.
    Buffered,
}

/// Configuration for the conversion process
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Capacity of the input read buffer, in bytes
    pub read_buffer_size: usize,

    /// Capacity of the output write buffer, in bytes
    pub write_buffer_size: usize,

    /// Cell separator written between CSV values
    pub delimiter: char,

    /// Streaming (two-pass) or buffered (in-memory) conversion
    pub mode: ConvertMode,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            write_buffer_size: DEFAULT_BUFFER_SIZE,
            delimiter: ',',
            mode: ConvertMode::Buffered,
        }
    }
}
