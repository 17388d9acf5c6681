use crate::error::{HuffmanError, Result};

/// A packed bitstream plus what the decoder needs to know where it ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedStream {
    /// Codewords packed MSB first; the tail of the last byte is zero padding.
    pub payload: Vec<u8>,
    /// Number of symbols that were encoded.
    pub symbol_count: u64,
    /// Valid bits in the last payload byte: `0` for an empty payload,
    /// otherwise `1..=8`.
    pub final_bits: u8,
}

impl EncodedStream {
    pub fn new(payload: Vec<u8>, symbol_count: u64, final_bits: u8) -> Self {
        EncodedStream {
            payload,
            symbol_count,
            final_bits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// Number of meaningful bits in the payload.
    ///
    /// Only meaningful once [`validate`](Self::validate) has passed.
    pub fn total_bits(&self) -> u64 {
        match self.payload.len() as u64 {
            0 => 0,
            n => (n - 1) * 8 + self.final_bits as u64,
        }
    }

    /// Check that the metadata agrees with the payload.
    pub fn validate(&self) -> Result<()> {
        match (self.payload.is_empty(), self.final_bits) {
            (true, 0) => Ok(()),
            (true, n) => Err(HuffmanError::corrupt(format!(
                "empty payload declares {n} valid bits in its final byte"
            ))),
            (false, 1..=8) => Ok(()),
            (false, n) => Err(HuffmanError::corrupt(format!(
                "final byte declares {n} valid bits, expected 1..=8"
            ))),
        }
    }
}
