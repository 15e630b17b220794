//! Compression statistics.
//!
//! Reports how a compressed payload compares to its input:
//! - Sizes (symbols, UTF-8 bytes, compressed bits, packed bytes)
//! - Average code length against the Shannon entropy of the input
//! - Ratios against UTF-8 storage and against a fixed-width code
//!
//! Huffman output is only smaller than a fixed-width encoding when the
//! weighted average code length is lower; short or high-entropy inputs can
//! come out larger.

use crate::codec::CompressedPayload;
use crate::error::Result;
use crate::frequency::FrequencyTable;

/// Measurements of one compression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    // === Input ===
    /// Number of symbols in the input
    pub input_symbols: u64,

    /// Number of distinct symbols
    pub distinct_symbols: usize,

    /// Input size in UTF-8 bytes
    pub input_bytes: u64,

    // === Output ===
    /// Length of the compressed bit-string
    pub compressed_bits: u64,

    /// Size of the bit-string packed eight bits per byte
    pub packed_bytes: u64,

    /// Bits a fixed-width code over the same alphabet would need
    pub fixed_width_bits: u64,

    /// Longest code in the table
    pub max_code_len: usize,

    // === Information ===
    /// Shannon entropy of the input in bits per symbol
    pub entropy: f64,
}

impl CompressionStats {
    /// Measure a payload against the text it was produced from.
    pub fn measure(text: &str, payload: &CompressedPayload) -> Result<Self> {
        let freq = FrequencyTable::count(text);
        let packed = payload.pack()?;

        let input_symbols = freq.total();
        let distinct_symbols = freq.len();

        Ok(Self {
            input_symbols,
            distinct_symbols,
            input_bytes: text.len() as u64,
            compressed_bits: payload.bit_len() as u64,
            packed_bytes: packed.byte_len() as u64,
            fixed_width_bits: input_symbols * u64::from(fixed_width(distinct_symbols)),
            max_code_len: payload.table().max_code_len(),
            entropy: freq.entropy(),
        })
    }

    /// Weighted average code length in bits per symbol.
    pub fn average_code_len(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.input_symbols as f64
        }
    }

    /// Compressed bits over UTF-8 input bits.
    ///
    /// Returns 0.0 for empty input.
    pub fn ratio_vs_utf8(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / (self.input_bytes * 8) as f64
        }
    }

    /// Compressed bits over fixed-width bits.
    pub fn ratio_vs_fixed_width(&self) -> f64 {
        if self.fixed_width_bits == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.fixed_width_bits as f64
        }
    }

    /// Average code length minus entropy; never negative for a prefix code.
    pub fn redundancy(&self) -> f64 {
        self.average_code_len() - self.entropy
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Input ===");
        println!("Symbols: {} ({} distinct)", self.input_symbols, self.distinct_symbols);
        println!("UTF-8 size: {} bytes", self.input_bytes);
        println!();

        println!("=== Output ===");
        println!("Compressed: {} bits", self.compressed_bits);
        println!("Packed: {} bytes", self.packed_bytes);
        println!("Fixed-width: {} bits", self.fixed_width_bits);
        println!("Longest code: {} bits", self.max_code_len);
        println!();

        println!("=== Efficiency ===");
        println!("Average code length: {:.4} bits/symbol", self.average_code_len());
        println!("Entropy: {:.4} bits/symbol", self.entropy);
        println!("Redundancy: {:.4} bits/symbol", self.redundancy());
        println!("Ratio vs UTF-8: {:.1}%", self.ratio_vs_utf8() * 100.0);
        println!("Ratio vs fixed-width: {:.1}%", self.ratio_vs_fixed_width() * 100.0);
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_symbols={}\n\
             distinct_symbols={}\n\
             input_bytes={}\n\
             compressed_bits={}\n\
             packed_bytes={}\n\
             fixed_width_bits={}\n\
             max_code_len={}\n\
             average_code_len={:.4}\n\
             entropy={:.4}\n\
             ratio_vs_utf8={:.4}\n\
             ratio_vs_fixed_width={:.4}\n",
            self.input_symbols,
            self.distinct_symbols,
            self.input_bytes,
            self.compressed_bits,
            self.packed_bytes,
            self.fixed_width_bits,
            self.max_code_len,
            self.average_code_len(),
            self.entropy,
            self.ratio_vs_utf8(),
            self.ratio_vs_fixed_width(),
        )
    }
}

/// Bits per symbol of a fixed-width code for `distinct` symbols (at least 1).
pub fn fixed_width(distinct: usize) -> u32 {
    if distinct <= 2 {
        1
    } else {
        usize::BITS - (distinct - 1).leading_zeros()
    }
}
