//! The tools module provides helpers around the Huffman tree that are not part of the tree itself.
//!
//! The tools are:
//! - cli: Command line interface for hufftree.
//! - freq_count: Byte frequency count, the input to the tree build.
//!
pub mod cli;
pub mod freq_count;
