use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};

use log::{debug, info, warn};

use super::BYTE_EOF;
use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::BitSink;
use crate::error::Result;
use crate::huffman_coding::{HuffmanTree, Symbol};
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::freq_count::freqs;

/// Sizes of what compress_bytes put on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    pub input_bytes: usize,
    pub header_bits: usize,
    /// Payload bits, end-of-stream code included, padding excluded.
    pub payload_bits: u64,
}

impl CompressStats {
    /// Bytes on the stream after padding.
    pub fn output_bytes(&self) -> u64 {
        (self.header_bits as u64 + self.payload_bits + 7) / 8
    }
}

/// Compress `data` onto `sink`: header, then payload, then flush.
pub fn compress_bytes<S: BitSink + ?Sized>(data: &[u8], sink: &mut S) -> Result<CompressStats> {
    let counts = freqs(data);
    let tree = HuffmanTree::build(&counts)?;
    tree.write_header(sink)?;

    let codes = tree.assign_codes();
    debug!(
        "{} symbols in use, longest code {} bits.",
        codes.len(),
        tree.depth()
    );
    let payload_bits = codes.encode(data.iter().map(|&b| b as Symbol), sink, BYTE_EOF)?;
    sink.flush()?;

    Ok(CompressStats {
        input_bytes: data.len(),
        header_bits: tree.header_bit_len(),
        payload_bits,
    })
}

/// Open the output device, refusing to clobber an existing file unless forced.
pub(crate) fn open_output(name: &str, force: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(name).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            warn!("Output file {} already exists. Use --force to overwrite.", name);
        }
        e
    })
}

/// Compress the input file defined in opts <HuffOpts>.
pub fn compress(opts: &HuffOpts) -> io::Result<()> {
    let data = fs::read(&opts.file)?;
    info!("Read {} bytes from {}.", data.len(), opts.file);

    let stats = match opts.output {
        Output::Stdout => {
            let mut bw = BitWriter::new(io::stdout().lock());
            compress_bytes(&data, &mut bw)?
        }
        Output::File => {
            let name = opts.output_name();
            let mut bw = BitWriter::new(open_output(&name, opts.force_overwrite)?);
            let stats = compress_bytes(&data, &mut bw)?;
            bw.into_inner()?.sync_all()?;
            info!("Wrote {}.", name);
            stats
        }
    };

    info!(
        "{} bytes -> {} bytes (header {} bits, payload {} bits).",
        stats.input_bytes,
        stats.output_bytes(),
        stats.header_bits,
        stats.payload_bits
    );

    if !opts.keep_input_files && opts.output == Output::File {
        fs::remove_file(&opts.file)?;
        debug!("Removed {}.", opts.file);
    }
    io::stdout().flush()
}

#[cfg(test)]
mod test {
    use super::compress_bytes;
    use crate::bitstream::bitbuffer::BitBuffer;

    #[test]
    fn empty_input_is_one_leaf_header() {
        let mut buf = BitBuffer::new();
        let stats = compress_bytes(b"", &mut buf).unwrap();
        assert_eq!(stats.header_bits, 10);
        assert_eq!(stats.payload_bits, 0);
        assert_eq!(stats.output_bytes(), 2);
        // Leaf flag, then 256 least significant bit first.
        assert_eq!(buf.to_string(), "1000000001");
    }

    #[test]
    fn repetitive_input_shrinks() {
        let data = vec![b'a'; 1000];
        let mut buf = BitBuffer::new();
        let stats = compress_bytes(&data, &mut buf).unwrap();
        // Two leaves, one bit per symbol.
        assert_eq!(stats.header_bits, 21);
        assert_eq!(stats.payload_bits, 1001);
        assert_eq!(buf.len(), 21 + 1001);
        assert!(stats.output_bytes() < 200);
    }
}
