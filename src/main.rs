#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![allow(dead_code, unused_variables)]

//! Converts a FASTA/FASTQ file into fixed-width, normalized oligomer count
//! vectors, one tab-separated row per sampled window, for ML training sets.
mod assemble;
mod cli;
mod engine;
mod error;
mod oligo;

use log::info;
use std::io::{self, BufReader, Write};
use structopt::StructOpt;

type Result<T> = std::result::Result<T, crate::error::Error>;

fn main() -> Result<()> {
    let opt = cli::OligoVec::from_args();
    opt.set_logging();
    let config = opt.config()?;

    info!("reading {}", opt.input.display());
    let (rdr, _compression) = niffler::from_path(&opt.input)?;
    let genome = assemble::assemble(BufReader::new(rdr), config.max_size, config.min_quality)?;

    let mut engine = engine::Engine::new(config, genome);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    engine.run(&mut out)?;
    out.flush()?;

    Ok(())
}
