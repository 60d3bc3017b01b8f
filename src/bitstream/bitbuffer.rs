use std::fmt;
use std::io;

use super::{BitSink, BitSource};

/// An in-memory bit string with an exact length. It is a sink (bits are appended) and a source
/// (bits are read back from a separate read position), so a header can be written and read back
/// without any padding getting in the way.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<u8>,
    bit_count: usize,
    read_pos: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        self.bit_count - self.read_pos
    }

    /// Packed bytes, most significant bit first, last byte zero padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Start reading from the first bit again.
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        if idx >= self.bit_count {
            return None;
        }
        Some(self.bits[idx / 8] & (1 << (7 - idx % 8)) != 0)
    }

    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }
        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }
}

impl BitSink for BitBuffer {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.push(bit);
        Ok(())
    }

    /// Nothing to do, the buffer keeps its exact length.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl BitSource for BitBuffer {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        let bit = self.get(self.read_pos);
        if bit.is_some() {
            self.read_pos += 1;
        }
        Ok(bit)
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buf = BitBuffer::new();
        iter.into_iter().for_each(|bit| buf.push(bit));
        buf
    }
}

impl Extend<bool> for BitBuffer {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        iter.into_iter().for_each(|bit| self.push(bit));
    }
}

/// Renders every bit (read or not) as '0' / '1'.
impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..self.bit_count {
            f.write_str(if self.get(idx) == Some(true) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::BitBuffer;
    use crate::bitstream::{BitSink, BitSource};

    #[test]
    fn write_then_read() {
        let mut buf = BitBuffer::new();
        for bit in [true, false, false, true, true, false, true, true, true] {
            buf.write_bit(bit).unwrap();
        }
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.as_bytes(), &[0b1001_1011, 0b1000_0000]);
        assert_eq!(buf.to_string(), "100110111");

        let mut read = String::new();
        while let Some(bit) = buf.read_bit().unwrap() {
            read.push(if bit { '1' } else { '0' });
        }
        assert_eq!(read, "100110111");
        assert_eq!(buf.remaining(), 0);

        buf.rewind();
        assert_eq!(buf.read_bit().unwrap(), Some(true));
    }

    #[test]
    fn ends_mid_byte() {
        let mut buf: BitBuffer = [false].into_iter().collect();
        assert_eq!(buf.read_bit().unwrap(), Some(false));
        assert_eq!(buf.read_bit().unwrap(), None);
    }
}
