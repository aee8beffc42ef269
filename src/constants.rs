//! Centralized constants for format strings and limits.

/// Minimum accumulated chunk size in bytes (100 MiB) before a flush.
pub const CHUNK_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;

/// Width of the zero-padded sequence index in fallback labels.
pub const CHUNK_INDEX_WIDTH: usize = 4;

/// Prefix of labels synthesized from the sequence index.
pub const CHUNK_LABEL_PREFIX: &str = "chunk";

/// Extension of every generated chunk file.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Timestamp formats tried against a candidate, in priority order.
pub const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S,%f",
    "%Y/%m/%d %H:%M:%S,%f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Format of timestamp-derived labels (YYYY-MM-DD_HH-MM-SS).
pub const LABEL_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
