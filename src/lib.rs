//! # huffpack
//!
//! A deterministic Huffman prefix-code engine: count symbols, build the
//! optimal code tree, derive the code table, and pack bytes into a bitstream
//! that decodes back exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{decode, encode};
//!
//! let (table, stream) = encode(b"abracadabra")?;
//! assert_eq!(decode(&table, &stream)?, b"abracadabra");
//!
//! // persist both halves in one frame
//! let bytes = huffpack::frame::to_bytes(&table, &stream)?;
//! let (table, stream) = huffpack::frame::from_bytes(&bytes, &Default::default())?;
//! assert_eq!(decode(&table, &stream)?, b"abracadabra");
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Equal weights are ordered by when a symbol was first seen (merged nodes
//! count as seen when created), so the same input always produces the same
//! table and the same bits.

pub mod batch;
pub mod code_table;
pub mod decoder;
pub mod encoded_stream;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod bit_stream;
mod min_heap;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable, ReverseCodeTable};
pub use encoded_stream::EncodedStream;
pub use error::{HuffmanError, Result};
pub use frame::FrameLimits;
pub use frequency::FrequencyTable;
pub use huffman_codec::{decode, encode, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree};
