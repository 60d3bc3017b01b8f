use std::io::{self, Write};

use log::error;

use super::BitSink;

const OUTPUT_CHUNK: usize = 64 * 1024;

/// Writes a bitstream to any `Write`. Bits are packed most significant bit first. Call flush()
/// when done, or the last partial byte never reaches the device.
pub struct BitWriter<W: Write> {
    /// Output buffer of packed bytes waiting to be written.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bits accepted so far, padding excluded.
    bit_count: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(OUTPUT_CHUNK),
            queue: 0,
            q_bits: 0,
            bit_count: 0,
            writer,
        }
    }

    /// Internal function moving full bytes from the queue to the output buffer.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Hand the packed bytes to the device once the buffer fills up.
    fn drain(&mut self, force: bool) -> io::Result<()> {
        if force || self.output.len() >= OUTPUT_CHUNK {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Number of bits written so far (not counting flush padding).
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_count / 8, self.bit_count % 8)
    }

    /// Flush and give back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.queue = self.queue << 1 | bit as u64;
        self.q_bits += 1;
        self.bit_count += 1;
        if self.q_bits > 7 {
            self.push_queue();
            self.drain(false)?;
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits, then writes everything out.
    fn flush(&mut self) -> io::Result<()> {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.push_queue();
            if self.q_bits > 0 {
                error!("Stuff left in the BitWriter queue.");
            }
        }
        self.drain(true)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;
    use crate::bitstream::BitSink;

    fn write_str(bw: &mut BitWriter<Vec<u8>>, bits: &str) {
        for c in bits.chars() {
            bw.write_bit(c == '1').unwrap();
        }
    }

    #[test]
    fn full_bytes() {
        let mut bw = BitWriter::new(Vec::new());
        write_str(&mut bw, "0111100001111001");
        assert_eq!(bw.into_inner().unwrap(), "xy".as_bytes());
    }

    #[test]
    fn last_byte_is_padded_with_zeros() {
        let mut bw = BitWriter::new(Vec::new());
        write_str(&mut bw, "11111111111");
        assert_eq!(bw.bit_count(), 11);
        assert_eq!(bw.loc(), "[1.3]");
        assert_eq!(bw.into_inner().unwrap(), vec![0b1111_1111, 0b1110_0000]);
    }

    #[test]
    fn flush_twice_is_harmless() {
        let mut bw = BitWriter::new(Vec::new());
        write_str(&mut bw, "101");
        bw.flush().unwrap();
        bw.flush().unwrap();
        assert_eq!(bw.into_inner().unwrap(), vec![0b1010_0000]);
    }

    #[test]
    fn nothing_written() {
        let bw = BitWriter::new(Vec::new());
        assert!(bw.into_inner().unwrap().is_empty());
    }
}
