pub const SOURCE_BUFFER_SIZE: usize = 64 * 1024;

/// File extensions accepted as JSON Lines input.
pub const JSONL_EXTENSIONS: [&str; 2] = ["jsonl", "ndjson"];
