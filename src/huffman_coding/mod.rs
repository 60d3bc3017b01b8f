//! The huffman module builds a prefix-free code from symbol counts, writes the shape of that code
//! as a compact header, and decodes a bitstream back to symbols.
//!
//! The tree is built once (`HuffmanTree::build` from counts, or `HuffmanTree::read_header`) and is
//! read-only afterwards. Nodes live in a flat arena and refer to their kids by index.
//!
//! Symbols are 9 bit numbers. An alphabet of `n` counted symbols uses `0..n` and reserves `n` as
//! the end-of-stream symbol, so `n` can be at most 511 (256 for bytes).
//!
//! Equal weights are taken from the priority queue in an unspecified order. Code lengths are
//! optimal either way, but the exact bit patterns are an implementation detail.
//!

pub mod code;
pub mod node;
pub mod tree;

pub use code::{Code, CodeTable};
pub use node::{Node, NodeData, NodeId};
pub use tree::HuffmanTree;

use crate::error::Result;

/// An alphabet element, end-of-stream included.
pub type Symbol = u16;

/// Width of a symbol in the tree header.
pub const SYMBOL_BITS: u32 = 9;
/// Number of distinct symbols a header can name.
pub const SYMBOL_SPACE: usize = 1 << SYMBOL_BITS;
/// Largest alphabet `HuffmanTree::build` accepts (its end-of-stream symbol is the last 9-bit value).
pub const MAX_ALPHABET: usize = SYMBOL_SPACE - 1;

/// Receives decoded symbols one at a time.
pub trait SymbolSink {
    fn put(&mut self, symbol: Symbol) -> Result<()>;
}

impl SymbolSink for Vec<Symbol> {
    fn put(&mut self, symbol: Symbol) -> Result<()> {
        self.push(symbol);
        Ok(())
    }
}

impl<T: SymbolSink + ?Sized> SymbolSink for &mut T {
    fn put(&mut self, symbol: Symbol) -> Result<()> {
        (**self).put(symbol)
    }
}
