//! huffstring-core: Huffman prefix-code compression of text
//!
//! Builds an optimal binary prefix code from the symbol distribution of a
//! text, encodes the text into a '0'/'1' bit-string with that code, and
//! reconstructs the text from the bit-string plus the code table.
//!
//! # Architecture
//!
//! Leaf to root:
//! - `frequency`: symbol counting
//! - `tree`: Huffman tree construction
//! - `code_table`: code derivation and table validation
//! - `codec`: encoding, decoding, and the `compress`/`decompress` entry points
//! - `bitio`: optional byte packing of bit-strings
//! - `metrics`: compression statistics
//!
//! # Example
//! ```
//! use huffstring_core::{compress, decompress};
//!
//! let payload = compress("abracadabra").unwrap();
//! let text = decompress(payload.bits(), payload.table()).unwrap();
//! assert_eq!(text, "abracadabra");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **No shared state**: The code table is an explicit value that travels
//!   with the bits; nothing is cached between calls
//! - **Deterministic**: Ties between equal weights are broken by
//!   first-occurrence order, so the same text always yields the same codes

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use code_table::CodeTable;
pub use codec::{compress, decompress, CompressedPayload, HuffmanCodec, TextCodec};
pub use error::{BitIoError, CodecError, Error, Result};
pub use frequency::FrequencyTable;
pub use tree::HuffmanNode;
