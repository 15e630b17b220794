//! Error types for the huffstring codec.
//!
//! All operations return structured errors rather than panicking. Every
//! failure is local and synchronous: the codec never retries, and no partial
//! result is returned alongside an error.

use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Codec: building a code, encoding text, or decoding a bit-string
/// - Bit I/O: packing a bit-string into bytes or reading it back
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Huffman codec error (e.g., empty input, table/input mismatch)
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// No symbols to build a tree from
    #[error("empty input: cannot build a code from zero symbols")]
    EmptyInput,

    /// A symbol of the input text has no entry in the code table
    #[error("symbol {symbol:?} at position {position} is not in the code table")]
    UnknownSymbol { symbol: char, position: usize },

    /// The bit-string ended (or can no longer match) in the middle of a code
    #[error("truncated input: bits {pending:?} starting at position {position} match no code")]
    TruncatedInput { position: usize, pending: String },

    /// The supplied code table cannot decode anything
    #[error("invalid code table: {reason}")]
    InvalidTable { reason: String },

    /// The bit-string contains a character other than '0' or '1'
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Declared bit length doesn't fit the byte buffer
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Invalid bit count (e.g., more than 64 bits in one write)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// A bit-string character that is neither '0' nor '1'
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBitChar { position: usize, found: char },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The codec-level failure, if this error came from the codec.
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Error::Codec(err) => Some(err),
            Error::BitIo(_) => None,
        }
    }
}
