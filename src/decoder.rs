//! Bitstream -> bytes.
//!
//! Two front ends share one driver: [`decode_with`] matches the accumulated
//! bits against a [`ReverseCodeTable`], [`decode_with_tree`] walks a
//! [`HuffmanTree`]. Both stop once the declared symbol count is reached.

use std::ptr;

use tracing::debug;

use crate::bit_stream::BitReader;
use crate::code_table::{Code, ReverseCodeTable};
use crate::encoded_stream::EncodedStream;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Turns single bits into symbols.
trait Matcher {
    /// Consume one bit; returns a symbol when a codeword completes.
    fn feed(&mut self, bit: bool) -> Result<Option<u8>>;

    /// True while bits of an unfinished codeword are pending.
    fn is_partial(&self) -> bool;
}

struct TableMatcher<'a> {
    table: &'a ReverseCodeTable,
    acc: Code,
}

impl Matcher for TableMatcher<'_> {
    fn feed(&mut self, bit: bool) -> Result<Option<u8>> {
        self.acc.push(bit);
        if let Some(symbol) = self.table.get(&self.acc) {
            self.acc.clear();
            return Ok(Some(symbol));
        }
        if self.acc.len() >= self.table.max_code_len() {
            return Err(HuffmanError::corrupt(format!(
                "bit run {} matches no codeword",
                self.acc
            )));
        }
        Ok(None)
    }

    fn is_partial(&self) -> bool {
        !self.acc.is_empty()
    }
}

struct TreeMatcher<'a> {
    root: &'a HuffNode,
    current: &'a HuffNode,
}

impl Matcher for TreeMatcher<'_> {
    fn feed(&mut self, bit: bool) -> Result<Option<u8>> {
        let current = self.current;
        let next = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            // lone-leaf tree: the only codeword is a single 0
            HuffNode::Leaf { byte, .. } => {
                return if bit {
                    Err(HuffmanError::corrupt("bit 1 in a single-symbol stream"))
                } else {
                    Ok(Some(*byte))
                };
            }
        };

        match &**next {
            HuffNode::Leaf { byte, .. } => {
                self.current = self.root;
                Ok(Some(*byte))
            }
            internal => {
                self.current = internal;
                Ok(None)
            }
        }
    }

    fn is_partial(&self) -> bool {
        !ptr::eq(self.current, self.root)
    }
}

/// Decode `stream` by codeword lookup.
pub fn decode_with(table: &ReverseCodeTable, stream: &EncodedStream) -> Result<Vec<u8>> {
    stream.validate()?;
    if stream.symbol_count > 0 && table.is_empty() {
        return Err(HuffmanError::EmptyTable {
            expected: stream.symbol_count,
        });
    }
    let matcher = TableMatcher {
        table,
        acc: Code::new(),
    };
    run(matcher, stream)
}

/// Decode `stream` by walking `tree` from the root for every symbol.
pub fn decode_with_tree(tree: &HuffmanTree, stream: &EncodedStream) -> Result<Vec<u8>> {
    stream.validate()?;
    let matcher = TreeMatcher {
        root: tree.root(),
        current: tree.root(),
    };
    run(matcher, stream)
}

fn run<M: Matcher>(mut matcher: M, stream: &EncodedStream) -> Result<Vec<u8>> {
    let expected = stream.symbol_count;
    let total_bits = stream.total_bits();

    if expected == 0 {
        if total_bits != 0 {
            return Err(HuffmanError::corrupt(format!(
                "stream declares no symbols but carries {total_bits} bits"
            )));
        }
        return Ok(Vec::new());
    }

    // every symbol costs at least one bit
    let capacity = usize::try_from(expected.min(total_bits)).unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    let mut reader = BitReader::new(&stream.payload, bit_len(total_bits)?);

    for bit in reader.by_ref() {
        if let Some(symbol) = matcher.feed(bit)? {
            out.push(symbol);
            if out.len() as u64 == expected {
                break;
            }
        }
    }

    let decoded = out.len() as u64;
    if decoded == expected {
        if reader.remaining() > 0 {
            return Err(HuffmanError::corrupt(format!(
                "{} bits left over after {expected} symbols",
                reader.remaining()
            )));
        }
        debug!(symbols = decoded, bits = total_bits, "decoded stream");
        return Ok(out);
    }

    if matcher.is_partial() {
        return Err(HuffmanError::TruncatedStream {
            bits_read: reader.position() as u64,
            decoded,
            expected,
        });
    }
    Err(HuffmanError::corrupt(format!(
        "stream ended after {decoded} of {expected} symbols"
    )))
}

/// A payload held in memory can carry more bits than `usize` counts on
/// 32-bit targets.
fn bit_len(total_bits: u64) -> Result<usize> {
    usize::try_from(total_bits).map_err(|_| HuffmanError::LimitExceeded {
        what: "stream bit length",
        value: total_bits,
        limit: usize::MAX as u64,
    })
}
