//! The compression module wraps the Huffman tree into a byte oriented file format.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each of the 256 byte values occurs.
//! - Tree build: greedy Huffman construction over the counts, plus end-of-stream (symbol 256).
//! - Header: the tree shape, preorder, 1 bit per branch and 10 bits per leaf.
//! - Payload: the code of every input byte, then the end-of-stream code, zero padded to a byte.
//!
//! Decompression reads the header back into a tree and walks it bit by bit until end-of-stream.
//! There is no other framing: no magic, no length, no checksum.
//!
use crate::huffman_coding::Symbol;

pub mod compress;
pub mod decompress;

/// Number of counted symbols for byte data.
pub const BYTE_ALPHABET: usize = 256;
/// End-of-stream symbol for byte data.
pub const BYTE_EOF: Symbol = BYTE_ALPHABET as Symbol;
/// Extension added to compressed files.
pub const EXTENSION: &str = ".huf";
