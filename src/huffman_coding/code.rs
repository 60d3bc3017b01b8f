//! Codes handed out by `HuffmanTree::assign_codes`, and the encoder that uses them.

use std::fmt;

use rustc_hash::FxHashMap;

use super::Symbol;
use crate::bitstream::BitSink;
use crate::error::{HuffError, Result};

/// A variable length bit string: the path from the root to a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// This code extended by one step (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    pub fn write_to<S: BitSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        for &bit in &self.bits {
            sink.write_bit(bit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol -> code for every leaf of a tree. Symbols without a leaf have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<Symbol, Code>,
}

impl CodeTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut codes = FxHashMap::default();
        codes.reserve(capacity);
        CodeTable { codes }
    }

    pub(crate) fn insert(&mut self, symbol: Symbol, code: Code) {
        self.codes.insert(symbol, code);
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> {
        let mut pairs: Vec<(Symbol, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        pairs.sort_unstable_by_key(|&(s, _)| s);
        pairs.into_iter()
    }

    /// True if no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a code and any code it prefixes are neighbours.
        let mut codes: Vec<&Code> = self.codes.values().collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Payload bits needed for `counts` (count of symbol `i` at index `i`), end-of-stream
    /// code not included.
    pub fn weighted_len<T: Copy + Into<u64>>(&self, counts: &[T]) -> Result<u64> {
        let mut total = 0_u64;
        for (symbol, &count) in counts.iter().enumerate() {
            let count: u64 = count.into();
            if count == 0 {
                continue;
            }
            let code = self
                .get(symbol as Symbol)
                .ok_or(HuffError::UnknownSymbol(symbol as Symbol))?;
            total = total.saturating_add(count.saturating_mul(code.len() as u64));
        }
        Ok(total)
    }

    /// Write the code of every symbol, then the `eof` code. Returns the number of bits written.
    /// The sink is not flushed.
    pub fn encode<I, S>(&self, symbols: I, sink: &mut S, eof: Symbol) -> Result<u64>
    where
        I: IntoIterator<Item = Symbol>,
        S: BitSink + ?Sized,
    {
        let mut written = 0_u64;
        for symbol in symbols.into_iter().chain(std::iter::once(eof)) {
            let code = self.get(symbol).ok_or(HuffError::UnknownSymbol(symbol))?;
            code.write_to(sink)?;
            written += code.len() as u64;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::bitstream::bitbuffer::BitBuffer;
    use crate::error::HuffError;

    fn code(s: &str) -> Code {
        s.chars().fold(Code::new(), |c, ch| c.child(ch == '1'))
    }

    fn table(entries: &[(u16, &str)]) -> CodeTable {
        let mut t = CodeTable::with_capacity(entries.len());
        entries.iter().for_each(|&(s, c)| t.insert(s, code(c)));
        t
    }

    #[test]
    fn code_display_and_prefix() {
        let c = code("0110");
        assert_eq!(c.to_string(), "0110");
        assert_eq!(c.len(), 4);
        assert!(code("01").is_prefix_of(&c));
        assert!(!code("1").is_prefix_of(&c));
        assert!(Code::new().is_prefix_of(&c));
    }

    #[test]
    fn prefix_free_check() {
        assert!(table(&[(0, "0"), (1, "10"), (2, "11")]).is_prefix_free());
        assert!(!table(&[(0, "0"), (1, "01"), (2, "11")]).is_prefix_free());
        // Prefix relation across non-neighbouring symbols.
        assert!(!table(&[(0, "10"), (5, "0"), (9, "101")]).is_prefix_free());
    }

    #[test]
    fn iter_in_symbol_order() {
        let t = table(&[(7, "1"), (2, "01"), (4, "00")]);
        let symbols: Vec<u16> = t.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![2, 4, 7]);
    }

    #[test]
    fn encode_appends_eof() {
        let t = table(&[(0, "0"), (1, "10"), (2, "11")]);
        let mut buf = BitBuffer::new();
        assert_eq!(t.encode([1, 0, 0], &mut buf, 2).unwrap(), 6);
        assert_eq!(buf.to_string(), "100011");
    }

    #[test]
    fn encode_unknown_symbol() {
        let t = table(&[(0, "0"), (2, "1")]);
        let mut buf = BitBuffer::new();
        assert!(matches!(
            t.encode([0, 1], &mut buf, 2),
            Err(HuffError::UnknownSymbol(1))
        ));
    }

    #[test]
    fn weighted_len_counts_bits() {
        let t = table(&[(0, "0"), (1, "10"), (3, "11")]);
        assert_eq!(t.weighted_len(&[5_u32, 2, 0]).unwrap(), 9);
        assert!(matches!(
            t.weighted_len(&[1_u32, 1, 1]),
            Err(HuffError::UnknownSymbol(2))
        ));
    }
}
