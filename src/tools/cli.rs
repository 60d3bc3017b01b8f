use std::fmt::{Display, Formatter};

use clap::Parser;
use log::{info, warn};

use crate::compression::EXTENSION;

/// Zip, Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Name of the file to write, if not derived from the input name
    pub out_file: Option<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Log level, 0 (off) to 5 (trace)
    pub verbosity: u8,
}

impl HuffOpts {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            out_file: None,
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbosity: 3,
        }
    }

    /// Name of the output file: the explicit one, else the input name with `.huf` added when
    /// compressing, or removed (`.out` added if it is not there) when decompressing.
    pub fn output_name(&self) -> String {
        if let Some(name) = &self.out_file {
            return name.clone();
        }
        match self.op_mode {
            Mode::Zip => format!("{}{}", self.file, EXTENSION),
            Mode::Unzip => match self.file.strip_suffix(EXTENSION) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", self.file),
            },
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman compression with a self-describing tree header",
    long_about = "
    Compresses a file with a static Huffman code built from its byte frequencies. The code tree
    is written in front of the payload as a preorder header, and an end-of-stream symbol marks
    the end of the payload, so the compressed file needs no other framing."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "zip", conflicts_with = "decompress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Write to this file instead of a name derived from the input
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout", conflicts_with = "output")]
    stdout: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        let mut opts = HuffOpts::new(&args.filename);
        if args.decompress {
            opts.op_mode = Mode::Unzip
        };
        opts.out_file = args.output;
        opts.force_overwrite = args.force;
        opts.keep_input_files = args.keep;
        if args.stdout {
            opts.output = Output::Stdout
        };
        opts.verbosity = args.v;
        opts
    }
}

/// Put command line information from CLAP into our internal structure and set the log level.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());
    log::set_max_level(opts.level_filter());

    // Below we report initialization status to the user
    info!("---- Hufftree Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    match opts.output {
        Output::File => info!("Sending output to {}", opts.output_name()),
        Output::Stdout => warn!("Sending output to stdout"),
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Hufftree Initialization End ----\n");
    opts
}
