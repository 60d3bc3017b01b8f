//! The Huffman tree: built once from symbol counts or from a serialized header, then only read.
//!
//! Header format, preorder from the root:
//! - leaf: bit `1`, then the symbol as a 9 bit number, least significant bit first;
//! - branch: bit `0`, then the left subtree, then the right subtree.
//!
//! There is no length field. The shape itself says when the header is done.
//!
//! Every walk over the tree uses an explicit stack, so a deep (or hostile) tree cannot blow the
//! call stack.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::code::{Code, CodeTable};
use super::node::{Node, NodeData, NodeId};
use super::{Symbol, SymbolSink, MAX_ALPHABET, SYMBOL_BITS, SYMBOL_SPACE};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{FrequencyFault, HeaderFault, HuffError, Result};

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// The end-of-stream symbol for an alphabet of `alphabet_size` counted symbols.
    pub fn eof_symbol(alphabet_size: usize) -> Symbol {
        alphabet_size as Symbol
    }

    /// Build the tree bottom up from `counts`, where `counts[i]` is how often symbol `i` occurs.
    ///
    /// Symbol `counts.len()` is added as end-of-stream with weight 1. Symbols with a zero count
    /// get no leaf. Nodes of equal weight leave the queue in arena order; callers must not rely
    /// on that, only on the code lengths being optimal.
    pub fn build<T>(counts: &[T]) -> Result<Self>
    where
        T: Copy + TryInto<u64>,
    {
        if counts.is_empty() {
            return Err(HuffError::InvalidFrequencyInput(FrequencyFault::EmptyAlphabet));
        }
        if counts.len() > MAX_ALPHABET {
            return Err(HuffError::InvalidFrequencyInput(
                FrequencyFault::AlphabetTooLarge(counts.len()),
            ));
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(2 * counts.len() + 1);
        let mut queue = BinaryHeap::with_capacity(counts.len() + 1);

        for (symbol, &count) in counts.iter().enumerate() {
            let count: u64 = count.try_into().map_err(|_| {
                HuffError::InvalidFrequencyInput(FrequencyFault::NegativeCount { symbol })
            })?;
            if count > 0 {
                let leaf = Node::leaf(symbol as Symbol, count);
                queue.push(Reverse((leaf, nodes.len())));
                nodes.push(leaf);
            }
        }

        // The end-of-stream leaf is always there, even for an all zero table.
        let eof_id = nodes.len();
        let eof = Node::leaf(Self::eof_symbol(counts.len()), 1);
        queue.push(Reverse((eof, eof_id)));
        nodes.push(eof);

        // Pull off the two lightest nodes and join them until one is left.
        let mut root = eof_id;
        while let Some(Reverse((left, left_id))) = queue.pop() {
            match queue.pop() {
                Some(Reverse((right, right_id))) => {
                    let branch =
                        Node::branch(left.weight.saturating_add(right.weight), left_id, right_id);
                    queue.push(Reverse((branch, nodes.len())));
                    nodes.push(branch);
                }
                None => {
                    root = left_id;
                    break;
                }
            }
        }

        let tree = HuffmanTree { nodes, root };
        debug!(
            "Built tree with {} leaves (eof {}), depth {}, total weight {}.",
            tree.leaf_count(),
            counts.len(),
            tree.depth(),
            tree.nodes[root].weight
        );
        Ok(tree)
    }

    /// Rebuild a tree from a header written by `write_header`. Leaf weights come back as 0,
    /// only the shape and the symbols matter from here on.
    pub fn read_header<S: BitSource + ?Sized>(source: &mut S) -> Result<Self> {
        let truncated = || HuffError::MalformedHeader(HeaderFault::Truncated);

        let mut nodes: Vec<Node> = Vec::new();
        let mut seen = [false; SYMBOL_SPACE];
        let mut leaves = 0_usize;
        // One entry per branch still waiting for kids: its finished left kid, if any.
        let mut pending: Vec<Option<NodeId>> = Vec::new();

        let root = 'header: loop {
            match source.read_bit()?.ok_or_else(truncated)? {
                false => {
                    // 512 leaves need only 511 branches, so no valid header opens more.
                    if pending.len() == MAX_ALPHABET {
                        return Err(HuffError::MalformedHeader(HeaderFault::TooDeep));
                    }
                    pending.push(None);
                    continue;
                }
                true => {
                    let symbol = source
                        .read_lsb_first(SYMBOL_BITS)?
                        .ok_or_else(truncated)? as Symbol;
                    leaves += 1;
                    if leaves > SYMBOL_SPACE {
                        return Err(HuffError::MalformedHeader(HeaderFault::TooManyLeaves));
                    }
                    if std::mem::replace(&mut seen[symbol as usize], true) {
                        return Err(HuffError::MalformedHeader(HeaderFault::DuplicateSymbol(
                            symbol,
                        )));
                    }
                    nodes.push(Node::leaf(symbol, 0));
                }
            }

            // A subtree just finished. Hang it on the innermost open branch, closing every branch
            // that now has both kids.
            let mut done = nodes.len() - 1;
            loop {
                let slot = match pending.last_mut() {
                    Some(slot) => slot,
                    None => break 'header done,
                };
                match *slot {
                    None => {
                        *slot = Some(done);
                        break;
                    }
                    Some(left) => {
                        pending.pop();
                        nodes.push(Node::branch(0, left, done));
                        done = nodes.len() - 1;
                    }
                }
            }
        };

        trace!("Read header: {} leaves, {} nodes.", leaves, nodes.len());
        Ok(HuffmanTree { nodes, root })
    }

    /// Write the shape and leaf symbols of this tree (see module docs). Does not flush.
    pub fn write_header<S: BitSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id].node_data {
                NodeData::Leaf(symbol) => {
                    sink.write_bit(true)?;
                    sink.write_lsb_first(symbol as u32, SYMBOL_BITS)?;
                }
                NodeData::Kids(left, right) => {
                    sink.write_bit(false)?;
                    // Left goes on top so it is written first.
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        Ok(())
    }

    /// Walk the tree bit by bit, emitting each symbol reached, until the `eof` leaf is reached.
    /// The `eof` symbol itself is not emitted. Returns how many symbols were emitted.
    ///
    /// A tree that is a single leaf needs no bits at all. A source that runs dry at a branch is
    /// a `TruncatedPayload` error.
    pub fn decode<S, O>(&self, source: &mut S, output: &mut O, eof: Symbol) -> Result<usize>
    where
        S: BitSource + ?Sized,
        O: SymbolSink + ?Sized,
    {
        if !self.contains_symbol(eof) {
            return Err(HuffError::MissingEndOfStream(eof));
        }

        let mut decoded = 0_usize;
        let mut current = self.root;
        loop {
            match self.nodes[current].node_data {
                NodeData::Leaf(symbol) if symbol == eof => break,
                NodeData::Leaf(symbol) => {
                    output.put(symbol)?;
                    decoded += 1;
                    current = self.root;
                }
                NodeData::Kids(left, right) => {
                    current = match source.read_bit()? {
                        Some(false) => left,
                        Some(true) => right,
                        None => return Err(HuffError::TruncatedPayload { decoded }),
                    };
                }
            }
        }
        trace!("Decoded {} symbols.", decoded);
        Ok(decoded)
    }

    /// Code of every leaf: the path from the root, `0` for left and `1` for right.
    pub fn assign_codes(&self) -> CodeTable {
        let mut table = CodeTable::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, Code::new())];
        while let Some((id, code)) = stack.pop() {
            match self.nodes[id].node_data {
                NodeData::Leaf(symbol) => table.insert(symbol, code),
                NodeData::Kids(left, right) => {
                    stack.push((right, code.child(true)));
                    stack.push((left, code.child(false)));
                }
            }
        }
        table
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn contains_symbol(&self, symbol: Symbol) -> bool {
        self.nodes.iter().any(|n| n.symbol() == Some(symbol))
    }

    /// Length of the longest code. A single leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id].node_data {
                NodeData::Leaf(_) => deepest = deepest.max(depth),
                NodeData::Kids(left, right) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// Bits `write_header` puts on the stream.
    pub fn header_bit_len(&self) -> usize {
        let leaves = self.leaf_count();
        leaves * (1 + SYMBOL_BITS as usize) + (self.node_count() - leaves)
    }
}
