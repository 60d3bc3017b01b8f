use std::fs;
use std::path::PathBuf;

use hufftree::bitstream::bitreader::BitReader;
use hufftree::bitstream::bitwriter::BitWriter;
use hufftree::compression::compress::{compress, compress_bytes};
use hufftree::compression::decompress::{decompress, decompress_bytes};
use hufftree::tools::cli::{HuffOpts, Mode};
use hufftree::{HuffError, HuffmanTree};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hufftree-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn round_trip(data: &[u8]) -> Vec<u8> {
    let mut bw = BitWriter::new(Vec::new());
    compress_bytes(data, &mut bw).unwrap();
    let compressed = bw.into_inner().unwrap();

    let mut out = Vec::new();
    let mut br = BitReader::new(compressed.as_slice());
    decompress_bytes(&mut br, &mut out).unwrap();
    out
}

#[test]
fn empty_input() {
    assert!(round_trip(b"").is_empty());
}

#[test]
fn single_byte_value() {
    assert_eq!(round_trip(&[0_u8; 5000]), vec![0_u8; 5000]);
}

#[test]
fn every_byte_value() {
    let data: Vec<u8> = (0..=255_u8).cycle().take(256 * 9 + 17).collect();
    assert_eq!(round_trip(&data), data);
}

#[test]
fn skewed_text_compresses() {
    let data = "aaaaaaaabbbbccd".repeat(1000);
    let mut bw = BitWriter::new(Vec::new());
    let stats = compress_bytes(data.as_bytes(), &mut bw).unwrap();
    let compressed = bw.into_inner().unwrap();
    assert_eq!(compressed.len() as u64, stats.output_bytes());
    assert!(compressed.len() < data.len() / 3);
}

#[test]
fn large_input_uses_parallel_count() {
    let data: Vec<u8> = (0..300_000_u32).map(|i| (i % 97 + i % 13) as u8).collect();
    assert_eq!(round_trip(&data), data);
}

#[test]
fn garbage_is_rejected_not_looped_on() {
    // All zero bits: a branch after branch header that never finishes.
    let mut br = BitReader::new([0_u8; 64].as_slice());
    assert!(matches!(
        HuffmanTree::read_header(&mut br),
        Err(HuffError::MalformedHeader(_))
    ));

    // All one bits: leaf 511 at the root, which is not the byte end-of-stream.
    let mut br = BitReader::new([0xff_u8; 4].as_slice());
    let mut out = Vec::new();
    assert!(matches!(
        decompress_bytes(&mut br, &mut out),
        Err(HuffError::MissingEndOfStream(256))
    ));
}

#[test]
fn files_round_trip() {
    let dir = scratch_dir("files");
    let input = dir.join("poem.txt");
    let text = "Tyger Tyger, burning bright,\nIn the forests of the night;\n".repeat(50);
    fs::write(&input, &text).unwrap();

    let mut opts = HuffOpts::new(input.to_str().unwrap());
    opts.keep_input_files = true;
    compress(&opts).unwrap();
    let packed = dir.join("poem.txt.huf");
    assert!(packed.exists());
    assert!(fs::metadata(&packed).unwrap().len() < text.len() as u64);

    // Refuses to overwrite without force.
    assert!(compress(&opts).is_err());
    opts.force_overwrite = true;
    compress(&opts).unwrap();

    fs::remove_file(&input).unwrap();
    let mut opts = HuffOpts::new(packed.to_str().unwrap());
    opts.op_mode = Mode::Unzip;
    decompress(&opts).unwrap();
    assert!(!packed.exists());
    assert_eq!(fs::read_to_string(&input).unwrap(), text);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_decompress_leaves_no_output() {
    let dir = scratch_dir("partial");
    let input = dir.join("notes.txt");
    fs::write(&input, "abracadabra ".repeat(400)).unwrap();

    let mut opts = HuffOpts::new(input.to_str().unwrap());
    opts.keep_input_files = true;
    compress(&opts).unwrap();
    let packed = dir.join("notes.txt.huf");

    // Cut the payload so decoding fails after some bytes were already written.
    let bytes = fs::read(&packed).unwrap();
    fs::write(&packed, &bytes[..bytes.len() / 2]).unwrap();
    fs::remove_file(&input).unwrap();

    let mut opts = HuffOpts::new(packed.to_str().unwrap());
    opts.op_mode = Mode::Unzip;
    let err = decompress(&opts).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(!input.exists());
    assert!(packed.exists());

    // A second attempt reports the same failure, not a clash with a leftover file.
    let err = decompress(&opts).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    fs::remove_dir_all(&dir).unwrap();
}
