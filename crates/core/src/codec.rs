//! Encoding text into bit-strings and decoding it back.
//!
//! `compress` runs the whole pipeline: count frequencies, build the tree,
//! derive the code table, encode. The tree lives only for the duration of the
//! call. `decompress` needs the exact table produced by the matching
//! `compress`; the table travels with the bits in a [`CompressedPayload`].
//!
//! Nothing is cached between calls. Concurrent callers each hold their own
//! payloads and tables.

use crate::bitio::PackedBits;
use crate::code_table::CodeTable;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree;
use std::collections::HashMap;
use tracing::debug;

/// Output of a compression: the bit-string and the table that decodes it.
///
/// The bits alone are not decodable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    bits: String,
    table: CodeTable,
}

impl CompressedPayload {
    pub fn new(bits: String, table: CodeTable) -> Self {
        Self { bits, table }
    }

    /// The compressed '0'/'1' bit-string.
    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Number of bits in the compressed output.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Pack the bit-string eight bits per byte.
    pub fn pack(&self) -> Result<PackedBits> {
        PackedBits::pack(&self.bits)
    }

    /// Decode the bits with the carried table.
    pub fn decompress(&self) -> Result<String> {
        decompress(&self.bits, &self.table)
    }

    pub fn into_parts(self) -> (String, CodeTable) {
        (self.bits, self.table)
    }
}

/// A text codec producing self-describing payloads.
pub trait TextCodec {
    fn compress(&self, text: &str) -> Result<CompressedPayload>;
    fn decompress(&self, bits: &str, table: &CodeTable) -> Result<String>;
}

/// Huffman coding over the `char`s of a text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl TextCodec for HuffmanCodec {
    fn compress(&self, text: &str) -> Result<CompressedPayload> {
        compress(text)
    }

    fn decompress(&self, bits: &str, table: &CodeTable) -> Result<String> {
        decompress(bits, table)
    }
}

/// Compress `text` into a bit-string plus the code table that decodes it.
///
/// # Errors
/// `CodecError::EmptyInput` if `text` is empty.
pub fn compress(text: &str) -> Result<CompressedPayload> {
    let freq = FrequencyTable::count(text);
    let root = tree::build(&freq).ok_or(CodecError::EmptyInput)?;
    let table = CodeTable::derive(&root);
    drop(root);

    let bits = encode(text, &table)?;
    debug!(
        symbols = freq.total(),
        distinct = freq.len(),
        bits = bits.len(),
        "compressed text"
    );

    Ok(CompressedPayload::new(bits, table))
}

/// Decompress a bit-string with the table produced alongside it.
///
/// # Errors
/// - `CodecError::InvalidTable` if `bits` is non-empty and the table is empty
///   or cannot decode unambiguously
/// - `CodecError::InvalidBit` if `bits` holds a character other than '0'/'1'
/// - `CodecError::TruncatedInput` if trailing bits match no code
pub fn decompress(bits: &str, table: &CodeTable) -> Result<String> {
    let text = decode(bits, table)?;
    debug!(bits = bits.len(), symbols = text.chars().count(), "decompressed text");
    Ok(text)
}

/// Concatenate the codes of every symbol of `text`, in order.
///
/// # Errors
/// `CodecError::UnknownSymbol` if a symbol has no code in `table`.
pub fn encode(text: &str, table: &CodeTable) -> Result<String> {
    // First pass sizes the output and rejects unknown symbols
    let mut bit_len = 0;
    for (position, symbol) in text.chars().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(CodecError::UnknownSymbol { symbol, position })?;
        bit_len += code.len();
    }

    let mut bits = String::with_capacity(bit_len);
    for symbol in text.chars() {
        if let Some(code) = table.get(symbol) {
            bits.push_str(code);
        }
    }
    Ok(bits)
}

/// Decode a bit-string by matching complete codes left to right.
///
/// Bits accumulate until they equal a code of `table`; the symbol is emitted
/// and the accumulator is cleared. Once the accumulator is as long as the
/// longest code without matching, no further bit can complete it.
pub fn decode(bits: &str, table: &CodeTable) -> Result<String> {
    if bits.is_empty() {
        return Ok(String::new());
    }
    if table.is_empty() {
        return Err(CodecError::InvalidTable {
            reason: format!("empty table cannot decode {} bits", bits.len()),
        }
        .into());
    }
    table.validate()?;

    let symbols: HashMap<&str, char> = table.iter().map(|(symbol, code)| (code, symbol)).collect();
    let max_code_len = table.max_code_len();

    let mut text = String::new();
    let mut pending = String::with_capacity(max_code_len);
    let mut code_start = 0;

    for (position, bit) in bits.chars().enumerate() {
        if bit != '0' && bit != '1' {
            return Err(CodecError::InvalidBit {
                position,
                found: bit,
            }
            .into());
        }

        pending.push(bit);
        if let Some(&symbol) = symbols.get(pending.as_str()) {
            text.push(symbol);
            pending.clear();
            code_start = position + 1;
        } else if pending.len() >= max_code_len {
            return Err(CodecError::TruncatedInput {
                position: code_start,
                pending,
            }
            .into());
        }
    }

    if !pending.is_empty() {
        return Err(CodecError::TruncatedInput {
            position: code_start,
            pending,
        }
        .into());
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_abracadabra_round_trip() {
        let payload = compress("abracadabra").unwrap();

        // a=0 b=110 r=111 c=100 d=101
        assert_eq!(payload.bits(), "01101110100010101101110");
        assert_eq!(payload.bit_len(), 23);
        assert_eq!(payload.decompress().unwrap(), "abracadabra");
    }

    #[test]
    fn test_single_symbol() {
        let payload = compress("aaaa").unwrap();

        assert_eq!(payload.table().get('a'), Some("0"));
        assert_eq!(payload.bits(), "0000");
        assert_eq!(decompress(payload.bits(), payload.table()).unwrap(), "aaaa");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compress(""), Err(Error::Codec(CodecError::EmptyInput)));
    }

    #[test]
    fn test_unknown_symbol() {
        let table = CodeTable::from_pairs([('a', "0"), ('b', "1")]).unwrap();
        assert_eq!(
            encode("abxa", &table),
            Err(Error::Codec(CodecError::UnknownSymbol {
                symbol: 'x',
                position: 2
            }))
        );
    }

    #[test]
    fn test_truncated_at_end() {
        let payload = compress("abracadabra").unwrap();
        // "a b r a" followed by the first two bits of "r"
        let bits = "0110111011";
        assert_eq!(
            decompress(bits, payload.table()),
            Err(Error::Codec(CodecError::TruncatedInput {
                position: 8,
                pending: "11".to_string()
            }))
        );
    }

    #[test]
    fn test_unmatchable_run_stops_early() {
        // A single-symbol table can never match a '1'
        let table = CodeTable::from_pairs([('a', "0")]).unwrap();
        assert_eq!(
            decode("0010000", &table),
            Err(Error::Codec(CodecError::TruncatedInput {
                position: 2,
                pending: "1".to_string()
            }))
        );
    }

    #[test]
    fn test_empty_table_with_bits() {
        let result = decompress("0101", &CodeTable::default());
        assert!(matches!(
            result,
            Err(Error::Codec(CodecError::InvalidTable { .. }))
        ));
    }

    #[test]
    fn test_empty_bits_decode_to_empty_text() {
        assert_eq!(decompress("", &CodeTable::default()).unwrap(), "");

        let table = CodeTable::from_pairs([('a', "0")]).unwrap();
        assert_eq!(decompress("", &table).unwrap(), "");
    }

    #[test]
    fn test_invalid_bit() {
        let table = CodeTable::from_pairs([('a', "0"), ('b', "1")]).unwrap();
        assert_eq!(
            decompress("01x0", &table),
            Err(Error::Codec(CodecError::InvalidBit {
                position: 2,
                found: 'x'
            }))
        );
    }

    #[test]
    fn test_non_prefix_free_table_rejected() {
        let table = CodeTable::from_pairs([('a', "0"), ('b', "01"), ('c', "1")]).unwrap();
        assert!(matches!(
            decompress("0101", &table),
            Err(Error::Codec(CodecError::InvalidTable { .. }))
        ));
    }

    #[test]
    fn test_unicode_and_whitespace() {
        let text = "héllo wörld\n\tñandú 日本語 🎉🎉";
        let payload = compress(text).unwrap();

        assert!(payload.table().contains('🎉'));
        assert!(payload.table().contains('\t'));
        assert_eq!(payload.decompress().unwrap(), text);
    }

    #[test]
    fn test_codec_trait_object() {
        let codec: &dyn TextCodec = &HuffmanCodec;
        let payload = codec.compress("mississippi").unwrap();
        assert_eq!(
            codec.decompress(payload.bits(), payload.table()).unwrap(),
            "mississippi"
        );
    }

    #[test]
    fn test_packed_payload() {
        let payload = compress("abracadabra").unwrap();
        let packed = payload.pack().unwrap();

        assert_eq!(packed.bit_len(), 23);
        assert_eq!(packed.byte_len(), 3);
        assert_eq!(packed.unpack().unwrap(), payload.bits());
    }
}
