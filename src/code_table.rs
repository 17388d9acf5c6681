//! Codeword assignment: tree -> symbol/code tables.
//!
//! Codes are read root to leaf, `0` for the left branch and `1` for the
//! right. Only leaves carry codes, which makes the result prefix-free.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// A single codeword, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    pub fn new() -> Self {
        Code(BitVec::new())
    }

    /// Wrap `len` bits taken from the front of `bytes`.
    pub fn from_packed(bytes: &[u8], len: usize) -> Option<Self> {
        let bits = bytes.view_bits::<Msb0>().get(..len)?;
        Some(Code(bits.to_bitvec()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The code bits packed MSB first, zero padded to a whole byte.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut bits = self.0.clone();
        bits.set_uninitialized(false);
        bits.into_vec()
    }

    fn appended(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.push(bit);
        next
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut code = Code::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                other => return Err(HuffmanError::corrupt(format!("invalid code digit {other:?}"))),
            }
        }
        Ok(code)
    }
}

/// Symbol -> codeword mapping, ordered by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walk `tree` and assign every leaf its path.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`, since an empty
    /// codeword cannot be written to a stream.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            HuffNode::Leaf { byte, .. } => {
                codes.insert(*byte, Code::new().appended(false));
            }
            root => collect_codes(root, Code::new(), &mut codes),
        }
        CodeTable { codes }
    }

    /// Build a table from externally supplied codewords.
    ///
    /// Rejects empty codewords, repeated symbols and codewords that are a
    /// prefix of another.
    pub fn from_codes<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut codes = BTreeMap::new();
        let mut seen: HashMap<Code, u8> = HashMap::new();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(HuffmanError::corrupt(format!(
                    "empty codeword for byte 0x{symbol:02x}"
                )));
            }
            if let Some(other) = seen.insert(code.clone(), symbol) {
                return Err(HuffmanError::corrupt(format!(
                    "bytes 0x{other:02x} and 0x{symbol:02x} share codeword {code}"
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::corrupt(format!(
                    "byte 0x{symbol:02x} listed twice"
                )));
            }
        }

        for (symbol, code) in &codes {
            let mut prefix = Code::new();
            for bit in code.bits().iter().by_vals().take(code.len() - 1) {
                prefix.push(bit);
                if let Some(other) = seen.get(&prefix) {
                    return Err(HuffmanError::corrupt(format!(
                        "codeword {prefix} of byte 0x{other:02x} is a prefix of {code} (byte 0x{symbol:02x})"
                    )));
                }
            }
        }

        Ok(CodeTable { codes })
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Σ freq·len over `frequencies`. Symbols missing from the table count as
    /// zero length. Widened to `u128` so any table's cost fits.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u128 {
        frequencies
            .iter()
            .map(|(symbol, count)| count as u128 * self.get(symbol).map_or(0, |c| c.len() as u128))
            .sum()
    }

    pub fn reverse(&self) -> ReverseCodeTable {
        ReverseCodeTable {
            symbols: self.codes.iter().map(|(&s, c)| (c.clone(), s)).collect(),
            max_len: self.max_code_len(),
        }
    }
}

fn collect_codes(node: &HuffNode, prefix: Code, codes: &mut BTreeMap<u8, Code>) {
    match node {
        HuffNode::Leaf { byte, .. } => {
            codes.insert(*byte, prefix);
        }
        HuffNode::Internal { left, right, .. } => {
            collect_codes(left, prefix.appended(false), codes);
            collect_codes(right, prefix.appended(true), codes);
        }
    }
}

/// Codeword -> symbol mapping used by the decoder.
#[derive(Debug, Clone, Default)]
pub struct ReverseCodeTable {
    symbols: HashMap<Code, u8>,
    max_len: usize,
}

impl ReverseCodeTable {
    pub fn get(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Longest codeword; a longer accumulated run can never match.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }
}
