use tracing::debug;

use crate::code_table::{CodeTable, ReverseCodeTable};
use crate::decoder::decode_with;
use crate::encoded_stream::EncodedStream;
use crate::encoder::encode_with;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

/// A code table together with its inverse, ready to encode and decode.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    table: CodeTable,
    reverse: ReverseCodeTable,
}

impl HuffmanCodec {
    pub fn new(table: CodeTable) -> Self {
        let reverse = table.reverse();
        HuffmanCodec { table, reverse }
    }

    /// Derive the optimal code for `frequencies`. An empty table gives a
    /// codec that can only handle empty input.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let table = HuffmanTree::build(frequencies)
            .map(|tree| CodeTable::from_tree(&tree))
            .unwrap_or_default();
        Self::new(table)
    }

    /// Derive the optimal code for `data`.
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn into_table(self) -> CodeTable {
        self.table
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedStream> {
        encode_with(&self.table, data)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<u8>> {
        decode_with(&self.reverse, stream)
    }
}

/// Build the code for `data` and encode `data` with it.
pub fn encode(data: &[u8]) -> Result<(CodeTable, EncodedStream)> {
    let codec = HuffmanCodec::from_data(data);
    let stream = codec.encode(data)?;
    debug!(
        input = data.len(),
        symbols = codec.table().len(),
        payload = stream.payload.len(),
        "huffman encode"
    );
    Ok((codec.into_table(), stream))
}

/// Reverse [`encode`].
pub fn decode(table: &CodeTable, stream: &EncodedStream) -> Result<Vec<u8>> {
    decode_with(&table.reverse(), stream)
}
