use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// huffstring: Huffman compression of text into '0'/'1' bit-strings
///
/// Compressed output is a JSON payload holding the bit-string and the code
/// table needed to decode it.
#[derive(Parser, Debug)]
#[command(name = "huffstring")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show diagnostic logs (honours RUST_LOG when set)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compress text into a JSON payload.
    Compress {
        #[command(flatten)]
        input: InputArgs,

        /// Payload output path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print compression statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Reconstruct text from a JSON payload.
    Decompress {
        /// Payload produced by `compress`
        #[arg(short = 'i', long = "in")]
        payload: PathBuf,

        /// Text output path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the code table of a JSON payload.
    Dictionary {
        /// Payload produced by `compress`
        #[arg(short = 'i', long = "in")]
        payload: PathBuf,
    },

    /// Compress text and report statistics without writing a payload.
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Round-trip generated sample text and report statistics.
    Demo {
        /// Random seed for the sample text (default: time-based)
        #[arg(long)]
        seed: Option<u64>,

        /// Sample size in symbols (default: random 2000-20000)
        #[arg(long)]
        size: Option<usize>,
    },
}

/// Where to read input text from; stdin when neither flag is given.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input text file
    #[arg(short = 'i', long = "in", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Literal input text
    #[arg(short, long)]
    pub text: Option<String>,
}
