//! Property-based tests for the codec.
//!
//! - encode/decode roundtrip for arbitrary bytes
//! - generated codes are prefix-free and optimal
//! - encoding is deterministic
//! - truncating a stream never yields the original bytes

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use proptest::prelude::*;

use huffpack::{decode, encode, CodeTable, EncodedStream, FrequencyTable, HuffmanTree};

/// Bytes drawn from a small alphabet so codes get long and skewed.
fn skewed_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![8 => Just(b'e'), 4 => Just(b't'), 2 => 0u8..8, 1 => any::<u8>()], 0..2048)
}

/// Reference optimum: the cost of an optimal code is the sum of all merged weights.
fn optimal_cost(frequencies: &FrequencyTable) -> u128 {
    if frequencies.len() == 1 {
        return frequencies.total() as u128;
    }
    let mut heap: BinaryHeap<Reverse<u64>> = frequencies.iter().map(|(_, w)| Reverse(w)).collect();
    let mut cost = 0;
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().unwrap();
        let Reverse(b) = heap.pop().unwrap();
        cost += (a + b) as u128;
        heap.push(Reverse(a + b));
    }
    cost
}

fn table_for(frequencies: &FrequencyTable) -> CodeTable {
    CodeTable::from_tree(&HuffmanTree::build(frequencies).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: decode(encode(x)) == x.
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let (table, stream) = encode(&data).unwrap();
        prop_assert_eq!(decode(&table, &stream).unwrap(), data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes_strategy()) {
        let (table, stream) = encode(&data).unwrap();
        prop_assert_eq!(stream.symbol_count, data.len() as u64);
        prop_assert_eq!(decode(&table, &stream).unwrap(), data);
    }

    /// Property: no codeword is a prefix of another.
    #[test]
    fn prop_prefix_free(data in skewed_bytes_strategy()) {
        let (table, _) = encode(&data).unwrap();
        let codes: Vec<String> = table.iter().map(|(_, c)| c.to_string()).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a.as_str()), "{} is a prefix of {}", a, b);
                }
            }
        }
        // the validating constructor agrees
        prop_assert!(CodeTable::from_codes(table.iter().map(|(s, c)| (s, c.clone()))).is_ok());
    }

    /// Property: weighted code length matches the reference optimum, and a
    /// tree with two or more leaves is full (Kraft sum of exactly one).
    #[test]
    fn prop_optimal(weights in prop::collection::vec((any::<u8>(), 1u64..10_000), 1..64)) {
        let frequencies = FrequencyTable::from_weights(weights).unwrap();
        let table = table_for(&frequencies);
        prop_assert_eq!(table.len(), frequencies.len());
        prop_assert_eq!(table.weighted_length(&frequencies), optimal_cost(&frequencies));

        if table.len() > 1 {
            let max = table.max_code_len() as u32;
            let kraft: u128 = table.iter().map(|(_, c)| 1u128 << (max - c.len() as u32)).sum();
            prop_assert_eq!(kraft, 1u128 << max);
        }
    }

    /// Property: fresh pipelines produce identical output.
    #[test]
    fn prop_deterministic(data in skewed_bytes_strategy()) {
        let first = encode(&data).unwrap();
        let second = encode(&data).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: dropping trailing bits makes decoding fail.
    #[test]
    fn prop_truncation_detected(data in prop::collection::vec(any::<u8>(), 1..512), cut in 1u64..64) {
        let (table, stream) = encode(&data).unwrap();
        let total = stream.total_bits();
        prop_assume!(cut < total);
        let kept = total - cut;
        let payload = stream.payload[..kept.div_ceil(8) as usize].to_vec();
        let final_bits = match kept % 8 { 0 => 8, n => n as u8 };
        let truncated = EncodedStream::new(payload, stream.symbol_count, final_bits);
        prop_assert!(decode(&table, &truncated).is_err());
    }
}
