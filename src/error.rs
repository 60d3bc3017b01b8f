//! Error type shared by the tree, the bitstream adapters and the file wrapper.

use std::fmt;
use std::io;

use crate::huffman_coding::Symbol;

/// Why a frequency table was refused by `HuffmanTree::build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyFault {
    /// No symbols at all, so there is no alphabet to extend with end-of-stream.
    EmptyAlphabet,
    /// The count for `symbol` is negative (or otherwise not a count).
    NegativeCount { symbol: usize },
    /// The end-of-stream symbol would not fit in 9 header bits.
    AlphabetTooLarge(usize),
}

/// Why a serialized tree header could not be read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    /// The source ran out before the tree was complete.
    Truncated,
    /// More leaves than the 9-bit symbol space allows.
    TooManyLeaves,
    /// More branches open at once than a tree of 512 leaves can have.
    TooDeep,
    /// The same symbol was announced by two leaves.
    DuplicateSymbol(Symbol),
}

#[derive(Debug)]
pub enum HuffError {
    InvalidFrequencyInput(FrequencyFault),
    MalformedHeader(HeaderFault),
    /// The payload ended at a branch, before end-of-stream was reached.
    TruncatedPayload { decoded: usize },
    /// The tree has no leaf for the end-of-stream symbol, so decoding could never stop.
    MissingEndOfStream(Symbol),
    /// An encoder was asked for a symbol that has no code in this tree.
    UnknownSymbol(Symbol),
    /// A decoded symbol does not fit the output sink (e.g. > 255 for bytes).
    SymbolOutOfRange(Symbol),
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;

impl fmt::Display for FrequencyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyFault::EmptyAlphabet => write!(f, "frequency table is empty"),
            FrequencyFault::NegativeCount { symbol } => {
                write!(f, "frequency for symbol {} is negative", symbol)
            }
            FrequencyFault::AlphabetTooLarge(n) => {
                write!(f, "alphabet of {} symbols does not fit in 9 bits", n)
            }
        }
    }
}

impl fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderFault::Truncated => write!(f, "header ends before the tree is complete"),
            HeaderFault::TooManyLeaves => write!(f, "header announces too many leaves"),
            HeaderFault::TooDeep => write!(f, "header nests branches too deep"),
            HeaderFault::DuplicateSymbol(s) => write!(f, "symbol {} appears twice", s),
        }
    }
}

impl fmt::Display for HuffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffError::InvalidFrequencyInput(fault) => {
                write!(f, "invalid frequency input: {}", fault)
            }
            HuffError::MalformedHeader(fault) => write!(f, "malformed tree header: {}", fault),
            HuffError::TruncatedPayload { decoded } => write!(
                f,
                "payload truncated after {} symbols, end-of-stream not reached",
                decoded
            ),
            HuffError::MissingEndOfStream(eof) => {
                write!(f, "tree has no leaf for end-of-stream symbol {}", eof)
            }
            HuffError::UnknownSymbol(s) => write!(f, "symbol {} has no code in this tree", s),
            HuffError::SymbolOutOfRange(s) => write!(f, "symbol {} does not fit the output", s),
            HuffError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HuffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HuffError {
    fn from(e: io::Error) -> Self {
        HuffError::Io(e)
    }
}

impl From<HuffError> for io::Error {
    fn from(e: HuffError) -> Self {
        match e {
            HuffError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn io_errors_pass_through() {
        let e: HuffError = io::Error::new(io::ErrorKind::UnexpectedEof, "gone").into();
        let back: io::Error = e.into();
        assert_eq!(back.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn structural_errors_become_invalid_data() {
        let e = HuffError::MalformedHeader(HeaderFault::Truncated);
        assert_eq!(e.to_string(), "malformed tree header: header ends before the tree is complete");
        let back: io::Error = e.into();
        assert_eq!(back.kind(), io::ErrorKind::InvalidData);
    }
}
