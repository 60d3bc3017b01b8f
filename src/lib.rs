//! Static Huffman coding over a small integer alphabet.
//!
//! Provides the three things a Huffman coder needs from its tree:
//! - build a prefix-free code from symbol counts (`HuffmanTree::build`),
//! - write the code's shape as a compact header and read it back (`write_header` / `read_header`),
//! - decode a bitstream back to symbols until the end-of-stream symbol (`decode`).
//!
//! `assign_codes` hands out the code table an encoder needs. The `compression` module wraps all
//! of this into a byte oriented file format, and the `hufftree` binary drives it from the
//! command line:
//!
//! `$> hufftree -z notes.txt`
//!
//! This will compress the file and create the file notes.txt.huf.
//! The original file will be deleted unless `-k` is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{HuffError, Result};
pub use huffman_coding::{Code, CodeTable, HuffmanTree, Symbol, SymbolSink};
