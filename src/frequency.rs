use crate::error::{HuffmanError, Result};

/// Per-byte occurrence counts for one input unit.
///
/// Besides the counts, the table remembers the order in which each symbol was
/// first observed. Tree building uses that order to break weight ties, so the
/// same table always produces the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    order: Vec<u8>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; 256],
            order: Vec::new(),
            total: 0,
        }
    }

    /// Count every byte of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = FrequencyTable::new();
        for &byte in bytes {
            let slot = &mut table.counts[byte as usize];
            if *slot == 0 {
                table.order.push(byte);
            }
            *slot += 1;
        }
        table.total = bytes.len() as u64;
        table
    }

    /// Build a table from `(symbol, weight)` pairs.
    ///
    /// Zero weights are skipped and repeated symbols accumulate. The first
    /// non-zero appearance of a symbol fixes its insertion order.
    ///
    /// Fails with `LimitExceeded` when the weights sum past `u64::MAX`; every
    /// node of the tree built from the table weighs at most the total.
    pub fn from_weights<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = FrequencyTable::new();
        for (byte, weight) in weights {
            table.add(byte, weight)?;
        }
        Ok(table)
    }

    fn add(&mut self, byte: u8, weight: u64) -> Result<()> {
        if weight == 0 {
            return Ok(());
        }
        let headroom = u64::MAX - self.total;
        self.total = self
            .total
            .checked_add(weight)
            .ok_or(HuffmanError::LimitExceeded {
                what: "added weight",
                value: weight,
                limit: headroom,
            })?;
        let slot = &mut self.counts[byte as usize];
        if *slot == 0 {
            self.order.push(byte);
        }
        // bounded by the total
        *slot += weight;
        Ok(())
    }

    /// Occurrence count of `byte` (zero when absent).
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(symbol, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.order.iter().map(move |&b| (b, self.counts[b as usize]))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let table = FrequencyTable::from_bytes(b"banana");
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(b'b', 1), (b'a', 3), (b'n', 2)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(table.get(b'z'), 0);
    }

    #[test]
    fn test_from_weights_skips_zero_and_accumulates() {
        let table = FrequencyTable::from_weights([(b'x', 0), (b'y', 2), (b'x', 5), (b'y', 1)]).unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(b'y', 3), (b'x', 5)]);
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).rev().collect();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.len(), 256);
        assert_eq!(table.iter().next(), Some((255, 1)));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let half = u64::MAX / 2 + 1;
        let err = FrequencyTable::from_weights([(b'a', half), (b'b', half)]).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::LimitExceeded {
                what: "added weight",
                limit,
                ..
            } if limit == half - 1
        ));

        let err = FrequencyTable::from_weights([(b'a', u64::MAX), (b'a', 1)]).unwrap_err();
        assert_eq!(err.category(), "limit_exceeded");
    }

    #[test]
    fn test_total_up_to_max_accepted() {
        let table = FrequencyTable::from_weights([(b'a', u64::MAX - 1), (b'b', 1)]).unwrap();
        assert_eq!(table.total(), u64::MAX);
        assert_eq!(table.get(b'a'), u64::MAX - 1);
    }
}
