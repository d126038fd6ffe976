//! Error types for the block crate

use thiserror::Error;

/// Block decoding errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Buffer too short for {field}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Negative length prefix for {field}: {length}")]
    NegativeLength { field: &'static str, length: i32 },

    #[error("Length prefix for {field} overruns buffer: {length} bytes declared, {remaining} remaining")]
    LengthOverrun {
        field: &'static str,
        length: usize,
        remaining: usize,
    },

    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{count} trailing bytes after signature")]
    TrailingBytes { count: usize },

    #[error("Invalid consensus data")]
    ConsensusData(#[source] anyhow::Error),

    #[error("Invalid transaction data")]
    TransactionData(#[source] anyhow::Error),
}

/// Block crate errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Payload too large for {field}: {len} bytes")]
    PayloadTooLarge { field: String, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

/// Result type for block operations
pub type CoreResult<T> = Result<T, CoreError>;
