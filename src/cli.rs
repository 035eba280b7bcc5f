/// cli.rs — syn-scan command-line interface
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// syn-scan — strand-aware sequence model and bifurcation enumerator
#[derive(Parser, Debug)]
#[command(
    name = "syn-scan",
    author,
    version,
    about = "Strand-aware sequence model and bifurcation enumerator",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a FASTA (or plain-text) file for de Bruijn graph bifurcations
    ///
    /// Examples:
    ///   syn-scan scan genome.fasta --k 25
    ///   syn-scan scan reads.txt --k 15 --out report.txt
    Scan {
        /// Input file path: FASTA (.fa/.fasta) or bare base text
        input: PathBuf,

        /// k-mer window size (must be >= 2)
        #[arg(short, long, default_value_t = 25)]
        k: usize,

        /// Select a record by index (0-based) when the input has more than
        /// one FASTA record. Default: the first record.
        #[arg(long, default_value_t = 0)]
        record: usize,

        /// Write the report to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}
