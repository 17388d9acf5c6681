//! Parallel processing of independent input units.
//!
//! Each unit gets its own frequency table, tree and code table; nothing is
//! shared between units, so a failure in one never affects the others.
//! Results come back in input order.

use rayon::prelude::*;
use tracing::debug;

use crate::code_table::CodeTable;
use crate::encoded_stream::EncodedStream;
use crate::error::Result;
use crate::huffman_codec::{decode, encode};

pub fn encode_units<U>(units: &[U]) -> Vec<Result<(CodeTable, EncodedStream)>>
where
    U: AsRef<[u8]> + Sync,
{
    debug!(units = units.len(), "encoding batch");
    units.par_iter().map(|unit| encode(unit.as_ref())).collect()
}

pub fn decode_units(units: &[(CodeTable, EncodedStream)]) -> Vec<Result<Vec<u8>>> {
    debug!(units = units.len(), "decoding batch");
    units
        .par_iter()
        .map(|(table, stream)| decode(table, stream))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_batch_roundtrip_keeps_order() {
        let units: Vec<Vec<u8>> = (0..32u8)
            .map(|i| (0..i as usize * 7).map(|j| (j as u8) % (i + 1)).collect())
            .collect();

        let encoded: Vec<_> = encode_units(&units)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        let decoded = decode_units(&encoded);

        for (unit, result) in units.iter().zip(decoded) {
            assert_eq!(&result.unwrap(), unit);
        }
    }

    #[test]
    fn test_failing_unit_is_isolated() {
        let (table, stream) = encode(b"good").unwrap();
        // a lone 1 bit is only the start of a codeword
        let cut = EncodedStream::new(vec![0b1000_0000], 1, 1);
        let units = vec![(table.clone(), stream), (table, cut)];

        let results = decode_units(&units);
        assert_eq!(results[0].as_ref().unwrap(), b"good");
        assert_eq!(results[1].as_ref().unwrap_err().category(), "truncated_stream");
    }
}
