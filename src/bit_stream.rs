use bitvec::prelude::*;

use crate::code_table::Code;

/// Packs codewords MSB first into a byte buffer.
#[derive(Default, Debug)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn with_capacity(bits: usize) -> Self {
        BitWriter {
            bits: BitVec::with_capacity(bits),
        }
    }

    pub fn push_code(&mut self, code: &Code) {
        self.bits.extend_from_bitslice(code.bits());
    }

    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Zero-pad the tail and return the payload with the number of valid
    /// bits in its final byte (`0` when nothing was written).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let final_bits = match self.bits.len() % 8 {
            0 if self.bits.is_empty() => 0,
            0 => 8,
            n => n as u8,
        };
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), final_bits)
    }
}

/// Sequential reader over the first `len` bits of a payload.
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// `len` must not exceed the payload's bit length; longer values are
    /// clamped.
    pub fn new(payload: &'a [u8], len: usize) -> Self {
        let all = payload.view_bits::<Msb0>();
        BitReader {
            bits: &all[..len.min(all.len())],
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_writer() {
        let (payload, final_bits) = BitWriter::default().finish();
        assert!(payload.is_empty());
        assert_eq!(final_bits, 0);
    }

    #[test]
    fn test_partial_final_byte_is_zero_padded() {
        let mut writer = BitWriter::default();
        writer.push_code(&code("1"));
        writer.push_code(&code("1"));
        writer.push_code(&code("1"));
        writer.push_code(&code("0"));
        assert_eq!(writer.bit_count(), 4);
        let (payload, final_bits) = writer.finish();
        assert_eq!(payload, vec![0b1110_0000]);
        assert_eq!(final_bits, 4);
    }

    #[test]
    fn test_codes_span_bytes() {
        let mut writer = BitWriter::with_capacity(16);
        writer.push_code(&code("101010"));
        writer.push_code(&code("1111"));
        writer.push_code(&code("000000"));
        let (payload, final_bits) = writer.finish();
        assert_eq!(payload, vec![0b1010_1011, 0b1100_0000]);
        assert_eq!(final_bits, 8);
    }

    #[test]
    fn test_reader_stops_at_len() {
        let payload = [0b1010_0000u8, 0xff];
        let mut reader = BitReader::new(&payload, 3);
        assert_eq!(reader.remaining(), 3);
        let bits: Vec<bool> = reader.by_ref().collect();
        assert_eq!(bits, vec![true, false, true]);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.next(), None);
    }
}
