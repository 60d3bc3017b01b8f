//! The bitstream module forms the I/O subsystem for the Huffman tree.
//!
//! The tree never sees bytes. It reads and writes single bits through the two traits below:
//! - `BitSource`: yields one bit per call, or `None` once the stream is exhausted.
//! - `BitSink`: takes one bit per call. `flush` pads and emits any partial final byte.
//!
//! Three implementations are provided. `BitReader` and `BitWriter` sit on top of any
//! `std::io::Read` / `std::io::Write`. `BitBuffer` keeps the bits in memory with an exact bit
//! length, so a stream can end in the middle of a byte.
//!
//! All byte-backed streams pack bits most significant bit first within each byte. Multi-bit
//! helpers on the traits (`read_lsb_first` / `write_lsb_first`) are only about the order in which
//! the bits of a *value* are put on the stream.
//!
use std::io;

pub mod bitbuffer;
pub mod bitreader;
pub mod bitwriter;

/// A sequential source of bits.
pub trait BitSource {
    /// Return the next bit, `Ok(None)` if there is no more data to read.
    fn read_bit(&mut self) -> io::Result<Option<bool>>;

    /// Read an `n` bit unsigned value sent least significant bit first. Returns `Ok(None)` if the
    /// source ends before all `n` bits arrived.
    fn read_lsb_first(&mut self, n: u32) -> io::Result<Option<u32>> {
        debug_assert!(n <= 32);
        let mut value = 0_u32;
        for i in 0..n {
            match self.read_bit()? {
                Some(true) => value |= 1 << i,
                Some(false) => {}
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}

/// A sequential sink of bits.
pub trait BitSink {
    /// Put one bit on the stream.
    fn write_bit(&mut self, bit: bool) -> io::Result<()>;

    /// Write the low `n` bits of `value`, least significant bit first.
    fn write_lsb_first(&mut self, value: u32, n: u32) -> io::Result<()> {
        debug_assert!(n <= 32);
        for i in 0..n {
            self.write_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Pad any partial byte with zeros and hand everything to the underlying device.
    fn flush(&mut self) -> io::Result<()>;
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        (**self).read_bit()
    }
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        (**self).write_bit(bit)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

#[cfg(test)]
mod test {
    use super::bitbuffer::BitBuffer;
    use super::{BitSink, BitSource};

    #[test]
    fn lsb_first_puts_low_bit_on_the_stream_first() {
        let mut buf = BitBuffer::new();
        buf.write_lsb_first(0b1_0000_0110, 9).unwrap();
        assert_eq!(buf.to_string(), "011000001");
        assert_eq!(buf.read_lsb_first(9).unwrap(), Some(0b1_0000_0110));
    }

    #[test]
    fn lsb_first_read_reports_short_source() {
        let mut buf: BitBuffer = [true, false, true].into_iter().collect();
        assert_eq!(buf.read_lsb_first(9).unwrap(), None);
    }
}
