//! Error types for the codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Everything that can go wrong while encoding, decoding or parsing a frame.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The input contains a byte the code table has no codeword for.
    #[error("byte 0x{symbol:02x} at offset {offset} has no entry in the code table")]
    UnknownSymbol { symbol: u8, offset: usize },

    /// Bits ran out in the middle of a codeword.
    #[error("stream truncated mid-codeword after {bits_read} bits ({decoded} of {expected} symbols decoded)")]
    TruncatedStream {
        bits_read: u64,
        decoded: u64,
        expected: u64,
    },

    /// The stream does not agree with its own metadata or its code table.
    #[error("corrupt stream: {message}")]
    CorruptStream { message: String },

    /// Decoding a non-empty stream was requested against an empty table.
    #[error("cannot decode {expected} symbols with an empty code table")]
    EmptyTable { expected: u64 },

    /// A frame header declares more than the reader is willing to accept.
    #[error("{what} of {value} exceeds limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    /// I/O error while reading or writing a frame.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    /// Create a corrupt stream error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        HuffmanError::CorruptStream {
            message: message.into(),
        }
    }

    /// Stable name of the error kind, suitable for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            HuffmanError::UnknownSymbol { .. } => "unknown_symbol",
            HuffmanError::TruncatedStream { .. } => "truncated_stream",
            HuffmanError::CorruptStream { .. } => "corrupt_stream",
            HuffmanError::EmptyTable { .. } => "empty_table",
            HuffmanError::LimitExceeded { .. } => "limit_exceeded",
            HuffmanError::Io(_) => "io_error",
        }
    }
}
