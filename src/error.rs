use thiserror::Error;

#[derive(Debug, Error)]
/// Errors of which majority are related to I/O issues or incorrect file format errors
pub enum Error {
    #[error("Could not read sequence record")]
    /// Could not read an entry from the input stream
    RecordError(#[from] std::io::Error),
    #[error("Could not open the input sequence file")]
    /// Open/decompress input error
    OpenInput(#[from] niffler::Error),
    #[error("Input is empty")]
    /// Stream contained no non-empty line
    EmptyInput,
    #[error("Input is neither FASTA nor FASTQ (first record starts with `{0}`)")]
    /// Format detection failure
    UnknownFormat(char),
    #[error("FASTQ record `{0}` has {1} bases but {2} quality scores")]
    /// Sequence and quality line length mismatch
    QualityLengthMismatch(String, usize, usize),
    #[error("Oligomer size must be between 1 and {0} but got {1}")]
    /// Oligomer size outside the supported range
    OligomerSize(usize, usize),
}
