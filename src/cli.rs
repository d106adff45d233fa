use crate::engine::{Config, MAX_OLIGO};
use crate::Result;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "oligovec",
    about = "Counts oligonucleotides in a FASTA/FASTQ file and prints normalized count vectors for ML training"
)]
pub(crate) struct OligoVec {
    #[structopt(
        short,
        long,
        help = "Size of oligonucleotide in nt",
        default_value = "8"
    )]
    pub oligo_size: usize,
    #[structopt(
        short = "t",
        long,
        help = "Number of one-line data rows to print",
        default_value = "20000"
    )]
    pub rows: usize,
    #[structopt(
        short,
        long,
        help = "Number of counted oligos for one line of data",
        default_value = "100000"
    )]
    pub counts: u32,
    #[structopt(
        short,
        long,
        help = "Size of shift in bp for the next sampling round",
        default_value = "20000"
    )]
    pub shift: usize,
    #[structopt(
        short = "g",
        long,
        help = "Maximum assembled sequence size in bases",
        default_value = "4294967296"
    )]
    pub max_size: u64,
    #[structopt(
        short = "q",
        long,
        help = "Minimum quality score for a FASTQ base to be accepted",
        default_value = "16"
    )]
    pub min_quality: u8,
    #[structopt(short = "r", long, help = "Merge complementary oligonucleotides")]
    pub merge_complements: bool,
    #[structopt(short = "d", long, help = "Print the header line")]
    pub header: bool,
    #[structopt(short, long, help = "Add a label for training data")]
    pub label: Option<String>,
    #[structopt(
        short,
        long,
        help = "Verbosity level (-v info, -vv debug)",
        parse(from_occurrences)
    )]
    pub verbose: u8,
    #[structopt(help = "Input FASTA or FASTQ file (optionally gzipped)", parse(from_os_str))]
    pub input: PathBuf,
}

impl OligoVec {
    pub(crate) fn set_logging(&self) {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        env_logger::Builder::new().filter_level(level).init();
    }

    /// Validates option bounds and bundles them for the engine.
    pub(crate) fn config(&self) -> Result<Config> {
        if self.oligo_size < 1 || self.oligo_size > MAX_OLIGO {
            return Err(crate::error::Error::OligomerSize(MAX_OLIGO, self.oligo_size));
        }
        Ok(Config {
            oligo: self.oligo_size,
            rows: self.rows,
            counts: self.counts,
            shift: self.shift,
            max_size: self.max_size,
            min_quality: self.min_quality,
            merge: self.merge_complements,
            header: self.header,
            label: self.label.clone(),
        })
    }
}
