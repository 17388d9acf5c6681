//! Binary layout for persisting a code table and its stream.
//!
//! All integers are little-endian.
//!
//! ```text
//! u16  entry count (0..=256)
//! per entry:
//!   u8   symbol
//!   u8   code length in bits (1..=255)
//!   [u8] code bits, MSB first, zero padded to whole bytes
//! u64  symbol count
//! u8   valid bits in the final payload byte
//! u64  payload length in bytes
//! [u8] payload
//! ```

use std::io::{Cursor, Read, Write};

use tracing::debug;

use crate::code_table::{Code, CodeTable};
use crate::encoded_stream::EncodedStream;
use crate::error::{HuffmanError, Result};

/// Bounds applied while reading a frame from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    /// Largest payload, in bytes, a frame may declare.
    pub max_payload_len: u64,
    /// Largest symbol count a frame may declare.
    pub max_symbol_count: u64,
}

impl FrameLimits {
    pub fn with_max_payload_len(mut self, len: u64) -> Self {
        self.max_payload_len = len;
        self
    }

    pub fn with_max_symbol_count(mut self, count: u64) -> Self {
        self.max_symbol_count = count;
        self
    }

    fn check(what: &'static str, value: u64, limit: u64) -> Result<()> {
        if value > limit {
            return Err(HuffmanError::LimitExceeded { what, value, limit });
        }
        Ok(())
    }
}

impl Default for FrameLimits {
    fn default() -> Self {
        FrameLimits {
            max_payload_len: 1 << 30,
            max_symbol_count: 1 << 33,
        }
    }
}

pub fn write_frame<W: Write>(writer: &mut W, table: &CodeTable, stream: &EncodedStream) -> Result<()> {
    stream.validate()?;
    // nothing is written unless every code length fits its u8 field
    if let Some((symbol, code)) = table.iter().find(|(_, code)| code.len() > u8::MAX as usize) {
        return Err(HuffmanError::corrupt(format!(
            "codeword for byte 0x{symbol:02x} is {} bits long",
            code.len()
        )));
    }

    let entry_count = table.len() as u16;
    writer.write_all(&entry_count.to_le_bytes())?;
    for (symbol, code) in table.iter() {
        writer.write_all(&[symbol, code.len() as u8])?;
        writer.write_all(&code.to_packed())?;
    }

    writer.write_all(&stream.symbol_count.to_le_bytes())?;
    writer.write_all(&[stream.final_bits])?;
    let payload_len = stream.payload.len() as u64;
    writer.write_all(&payload_len.to_le_bytes())?;
    writer.write_all(&stream.payload)?;
    Ok(())
}

pub fn read_frame<R: Read>(reader: &mut R, limits: &FrameLimits) -> Result<(CodeTable, EncodedStream)> {
    let entry_count = read_u16(reader)?;
    if entry_count > 256 {
        return Err(HuffmanError::corrupt(format!(
            "code table lists {entry_count} entries"
        )));
    }

    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        let symbol = read_u8(reader)?;
        let len = read_u8(reader)? as usize;
        if len == 0 {
            return Err(HuffmanError::corrupt(format!(
                "empty codeword for byte 0x{symbol:02x}"
            )));
        }
        let mut packed = vec![0u8; len.div_ceil(8)];
        reader.read_exact(&mut packed)?;
        let code = Code::from_packed(&packed, len)
            .ok_or_else(|| HuffmanError::corrupt("codeword shorter than its length"))?;
        entries.push((symbol, code));
    }
    let table = CodeTable::from_codes(entries)?;

    let symbol_count = read_u64(reader)?;
    FrameLimits::check("symbol count", symbol_count, limits.max_symbol_count)?;
    let final_bits = read_u8(reader)?;
    let payload_len = read_u64(reader)?;
    FrameLimits::check("payload length", payload_len, limits.max_payload_len)?;

    let payload_len = usize::try_from(payload_len).map_err(|_| HuffmanError::LimitExceeded {
        what: "payload length",
        value: payload_len,
        limit: usize::MAX as u64,
    })?;
    let mut payload = vec![0u8; payload_len];
    reader.read_exact(&mut payload)?;

    let stream = EncodedStream::new(payload, symbol_count, final_bits);
    stream.validate()?;
    if stream.symbol_count > stream.total_bits() {
        return Err(HuffmanError::corrupt(format!(
            "{} symbols declared for {} bits",
            stream.symbol_count,
            stream.total_bits()
        )));
    }

    debug!(
        entries = table.len(),
        symbols = stream.symbol_count,
        payload = stream.payload.len(),
        "read frame"
    );
    Ok((table, stream))
}

pub fn to_bytes(table: &CodeTable, stream: &EncodedStream) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_frame(&mut bytes, table, stream)?;
    Ok(bytes)
}

/// Parse a frame that must span all of `bytes`.
pub fn from_bytes(bytes: &[u8], limits: &FrameLimits) -> Result<(CodeTable, EncodedStream)> {
    let mut cursor = Cursor::new(bytes);
    let frame = read_frame(&mut cursor, limits)?;
    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(HuffmanError::corrupt(format!(
            "{} trailing bytes after frame",
            bytes.len() - consumed
        )));
    }
    Ok(frame)
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    let mut bytes = [0u8; 2];
    reader.read_exact(&mut bytes)?;
    Ok(u16::from_le_bytes(bytes))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}
