//! Bit-level I/O for packing '0'/'1' bit-strings into bytes.
//!
//! The codec's output is a bit-string of characters. `PackedBits` is the
//! optional compact form: bits are written MSB-first into bytes, and the exact
//! bit length is kept beside the bytes so the zero padding of the final byte
//! is never mistaken for data.
//!
//! # Example
//! ```
//! use huffstring_core::bitio::PackedBits;
//!
//! let packed = PackedBits::pack("10111").unwrap();
//! assert_eq!(packed.bytes(), &[0b10111000]);
//! assert_eq!(packed.bit_len(), 5);
//! assert_eq!(packed.unpack().unwrap(), "10111");
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // Fill as much of the current byte as possible
            let bits_to_write = remaining.min(8 - self.bit_count as usize);
            let shift = remaining - bits_to_write;
            let bits = ((value >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Write every character of a '0'/'1' string as one bit.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitChar` on any other character. Bits before the
    /// offending character have already been written.
    pub fn write_str(&mut self, bits: &str) -> Result<()> {
        for (i, c) in bits.chars().enumerate() {
            match c {
                '0' => self.write_bit(false),
                '1' => self.write_bit(true),
                found => {
                    return Err(BitIoError::InvalidBitChar {
                        position: i,
                        found,
                    }
                    .into())
                }
            }
        }
        Ok(())
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return the bytes, zero-padding the final byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

/// Reads bits MSB-first from a byte buffer, stopping at a fixed bit length.
///
/// # Invariants
/// - `bit_position` never exceeds `bit_len`
/// - `bit_len` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Number of meaningful bits in `data`
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            bit_position: 0,
        }
    }

    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// `BitIoError::InsufficientBits` if `data` is shorter than `bit_len` bits.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let available = data.len() * 8;
        if bit_len > available {
            return Err(BitIoError::InsufficientBits {
                requested: bit_len,
                available,
            }
            .into());
        }
        Ok(Self {
            data,
            bit_len,
            bit_position: 0,
        })
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once `bit_len` bits have been read.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits, most significant first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        for _ in 0..count {
            result = (result << 1) | u64::from(self.read_bit()?);
        }
        Ok(result)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

/// A bit-string packed eight bits per byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl PackedBits {
    /// Pack a '0'/'1' bit-string.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitChar` if `bits` contains any other character.
    pub fn pack(bits: &str) -> Result<Self> {
        let mut writer = BitWriter::with_capacity(bits.len());
        writer.write_str(bits)?;
        let bit_len = writer.bit_len();
        Ok(Self {
            bytes: writer.finish(),
            bit_len,
        })
    }

    /// Wrap bytes received from elsewhere.
    ///
    /// # Errors
    /// `BitIoError::InsufficientBits` if `bytes` cannot hold `bit_len` bits.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        BitReader::with_bit_len(&bytes, bit_len)?;
        Ok(Self { bytes, bit_len })
    }

    /// Expand back into a '0'/'1' bit-string.
    pub fn unpack(&self) -> Result<String> {
        let mut reader = BitReader::with_bit_len(&self.bytes, self.bit_len)?;
        let mut bits = String::with_capacity(self.bit_len);
        while !reader.is_empty() {
            bits.push(if reader.read_bit()? { '1' } else { '0' });
        }
        Ok(bits)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Exact number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Size of the packed form in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_write_read_partial_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        writer.write_bits(0b000, 3).unwrap();

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10111000]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert_eq!(reader.read_bits(3).unwrap(), 0b000);
    }

    #[test]
    fn test_write_bits_rejects_oversized_count() {
        let mut writer = BitWriter::new();
        assert_eq!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        );
    }

    #[test]
    fn test_pack_pads_final_byte() {
        let packed = PackedBits::pack("1").unwrap();
        assert_eq!(packed.bytes(), &[0b10000000]);
        assert_eq!(packed.bit_len(), 1);
    }

    #[test]
    fn test_pack_multi_byte() {
        let bits = "1010101111110000";
        let packed = PackedBits::pack(bits).unwrap();
        assert_eq!(packed.bytes(), &[0b10101011, 0b11110000]);
        assert_eq!(packed.byte_len(), 2);
        assert_eq!(packed.unpack().unwrap(), bits);
    }

    #[test]
    fn test_padding_is_not_read_back() {
        // 11 bits -> 2 bytes, the last 5 bits are padding
        let bits = "01101110100";
        let packed = PackedBits::pack(bits).unwrap();
        assert_eq!(packed.byte_len(), 2);
        assert_eq!(packed.unpack().unwrap(), bits);
    }

    #[test]
    fn test_empty_bit_string() {
        let packed = PackedBits::pack("").unwrap();
        assert_eq!(packed.byte_len(), 0);
        assert_eq!(packed.unpack().unwrap(), "");
    }

    #[test]
    fn test_pack_rejects_other_characters() {
        assert_eq!(
            PackedBits::pack("0120"),
            Err(Error::BitIo(BitIoError::InvalidBitChar {
                position: 2,
                found: '2'
            }))
        );
    }

    #[test]
    fn test_from_parts_checks_length() {
        assert!(PackedBits::from_parts(vec![0xFF], 8).is_ok());
        assert_eq!(
            PackedBits::from_parts(vec![0xFF], 9),
            Err(Error::BitIo(BitIoError::InsufficientBits {
                requested: 9,
                available: 8
            }))
        );
    }

    #[test]
    fn test_read_past_bit_len() {
        let data = [0b10100000];
        let mut reader = BitReader::with_bit_len(&data, 3).unwrap();

        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert!(reader.is_empty());
        assert_eq!(reader.read_bit(), Err(Error::BitIo(BitIoError::UnexpectedEof)));
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bits_remaining(), 11);
        assert_eq!(reader.position(), 5);
        reader.read_bits(11).unwrap();
        assert!(reader.is_empty());
    }
}
