use tracing::debug;

use crate::bit_stream::BitWriter;
use crate::code_table::CodeTable;
use crate::encoded_stream::EncodedStream;
use crate::error::{HuffmanError, Result};

/// Encode `data` with `table`, appending codewords in input order.
///
/// Every byte of `data` must have an entry in `table`.
pub fn encode_with(table: &CodeTable, data: &[u8]) -> Result<EncodedStream> {
    let mut writer = BitWriter::with_capacity(data.len());
    for (offset, &byte) in data.iter().enumerate() {
        let code = table
            .get(byte)
            .ok_or(HuffmanError::UnknownSymbol { symbol: byte, offset })?;
        writer.push_code(code);
    }

    let bit_count = writer.bit_count();
    let (payload, final_bits) = writer.finish();
    debug!(
        symbols = data.len(),
        bits = bit_count,
        bytes = payload.len(),
        "encoded stream"
    );

    Ok(EncodedStream {
        payload,
        symbol_count: data.len() as u64,
        final_bits,
    })
}
