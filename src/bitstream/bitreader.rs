//! BitReader: reads a packed bitstream from any I/O source that supports the read() call.
//!
//! Bits are taken most significant bit first from each byte. The source is pulled in large
//! chunks so single bit reads stay cheap.
//!

use std::io::{self, ErrorKind, Read};

use super::BitSource;

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bits from a byte oriented source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the cursor has walked off the end of the buffer
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<bool>> {
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(Some(bit == 1))
    }

    /// Return the next n bits (n <= 32) as a number sent most significant bit first, or None if
    /// the source ends first.
    pub fn bint(&mut self, n: usize) -> io::Result<Option<u32>> {
        debug_assert!(n <= 32);
        let mut result = 0_u32;
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }

    /// Give back the underlying source. Any bits still buffered are lost.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        self.bit()
    }
}
