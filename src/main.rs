/// main.rs — syn-scan entry point
mod bifurcation;
mod cli;
mod cursor;
mod error;
mod fasta;
mod hashing;
mod sequence;

use std::fs;
use std::io::Write;

use clap::Parser;

use bifurcation::{enumerate_bifurcations, BifurcationIndex};
use cli::{Cli, Command};
use error::{Error, Result};
use sequence::Sequence;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { input, k, record, out } => {
            if k < 2 {
                return Err(Error::InvalidK(k));
            }

            let bytes = fs::read(&input)?;
            let records = fasta::parse(&bytes)?;

            let chosen = records.get(record).ok_or(Error::RecordIndexOutOfRange {
                index: record,
                available: records.len(),
            })?;

            if chosen.bases.len() < k {
                return Err(Error::InvalidK(k));
            }

            let seq = Sequence::new(chosen.bases.clone());
            let mut index = BifurcationIndex::new();
            let total = enumerate_bifurcations(&seq, &mut index, k);

            let report = format!(
                "record: {}\nlength: {}\nrecords in file: {}\nrecord index scanned: {}\nk: {}\nbifurcations: {}\n",
                chosen.name,
                seq.size(),
                records.len(),
                record,
                k,
                total,
            );

            match out {
                Some(path) => {
                    fs::File::create(&path)
                        .and_then(|mut f| f.write_all(report.as_bytes()))
                        .map_err(|source| Error::ReportWrite { path: path.clone(), source })?;
                    eprintln!("Written to {}", path.display());
                }
                None => print!("{report}"),
            }
        }
    }

    Ok(())
}
