use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use log::{debug, error, info, warn};

use super::compress::open_output;
use super::BYTE_EOF;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::BitSource;
use crate::error::{HuffError, Result};
use crate::huffman_coding::{HuffmanTree, Symbol, SymbolSink};
use crate::tools::cli::{HuffOpts, Output};

/// Writes decoded symbols as bytes. Anything above 255 is an error.
pub struct ByteSink<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> ByteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    /// Bytes written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SymbolSink for ByteSink<W> {
    fn put(&mut self, symbol: Symbol) -> Result<()> {
        let byte = u8::try_from(symbol).map_err(|_| HuffError::SymbolOutOfRange(symbol))?;
        self.writer.write_all(&[byte])?;
        self.count += 1;
        Ok(())
    }
}

/// Read a header and its payload from `source`, writing the decoded bytes to `output`.
/// Returns the number of bytes written.
pub fn decompress_bytes<S, W>(source: &mut S, output: W) -> Result<usize>
where
    S: BitSource + ?Sized,
    W: Write,
{
    let tree = HuffmanTree::read_header(source)?;
    debug!(
        "Header holds {} leaves, longest code {} bits.",
        tree.leaf_count(),
        tree.depth()
    );

    let mut sink = ByteSink::new(output);
    let decoded = tree.decode(source, &mut sink, BYTE_EOF)?;
    sink.into_inner().flush()?;
    Ok(decoded)
}

/// Decompress the file specified in opts (HuffOpts).
pub fn decompress(opts: &HuffOpts) -> io::Result<()> {
    let mut br = BitReader::new(File::open(&opts.file)?);

    let result = match opts.output {
        Output::Stdout => decompress_bytes(&mut br, BufWriter::new(io::stdout().lock())),
        Output::File => {
            let name = opts.output_name();
            let f_out = open_output(&name, opts.force_overwrite)?;
            let result = decompress_bytes(&mut br, BufWriter::new(f_out));
            match &result {
                Ok(_) => info!("Wrote {}.", name),
                // Don't leave a half written file behind.
                Err(_) => match fs::remove_file(&name) {
                    Ok(()) => debug!("Removed partial output {}.", name),
                    Err(e) => warn!("Could not remove partial output {}: {}", name, e),
                },
            }
            result
        }
    };

    let decoded = result.map_err(|e| {
        error!("Fatal error: {} could not be decompressed: {}", opts.file, e);
        io::Error::from(e)
    })?;
    info!("Decoded {} bytes from {}.", decoded, opts.file);

    if !opts.keep_input_files && opts.output == Output::File {
        fs::remove_file(&opts.file)?;
        debug!("Removed {}.", opts.file);
    }
    Ok(())
}
