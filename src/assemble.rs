//! Builds one flat nucleotide buffer from a FASTA or FASTQ stream.
//!
//! Records are concatenated with a separator `n` in front of each scaffold
//! so oligomer windows never span two records. Confirmed bases are stored as
//! lowercase `t`/`c`/`a`/`g`; everything else (quality-masked bases,
//! ambiguity codes) behaves as unknown during counting.

use crate::error::Error;
use crate::Result;
use bio::io::{fasta, fastq};
use log::{debug, info};
use std::io::BufRead;

/// Phred offset of FASTQ quality characters.
const QUALITY_OFFSET: u8 = 33;

/// Separator inserted between scaffolds, unknown during matching.
pub const SEPARATOR: u8 = b'n';

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    Fasta,
    Fastq,
}

/// The assembled sequence: read-only once ingestion finishes.
#[derive(Debug, Default)]
pub struct Genome {
    /// Flat buffer of nucleotide codes, separators included.
    pub seq: Vec<u8>,
    /// Sequence bytes ingested from records, separators excluded.
    pub bases: u64,
    scaffolds: u64,
}

/// Determines the input format from the first non-whitespace byte without
/// consuming any part of the first record.
pub fn detect_format<R: BufRead>(rdr: &mut R) -> Result<Format> {
    loop {
        let buf = rdr.fill_buf()?;
        if buf.is_empty() {
            return Err(Error::EmptyInput);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(at) => {
                let first = buf[at];
                rdr.consume(at);
                return match first {
                    b'>' => Ok(Format::Fasta),
                    b'@' => Ok(Format::Fastq),
                    other => Err(Error::UnknownFormat(other as char)),
                };
            }
            None => {
                let len = buf.len();
                rdr.consume(len);
            }
        }
    }
}

/// Consumes the stream into a [`Genome`], stopping early (without error)
/// once the next record would push the buffer past `max_size`.
pub fn assemble<R: BufRead>(mut rdr: R, max_size: u64, min_quality: u8) -> Result<Genome> {
    let format = detect_format(&mut rdr)?;
    let mut genome = Genome::default();
    match format {
        Format::Fasta => {
            info!("detected FASTA input");
            for record in fasta::Reader::new(rdr).records() {
                let record = record?;
                if !genome.push_scaffold(record.seq(), Format::Fasta, max_size) {
                    debug!("capacity reached before record `{}`", record.id());
                    break;
                }
            }
        }
        Format::Fastq => {
            info!("detected FASTQ input");
            for record in fastq::Reader::new(rdr).records() {
                let record = record?;
                if record.seq().len() != record.qual().len() {
                    return Err(Error::QualityLengthMismatch(
                        record.id().to_string(),
                        record.seq().len(),
                        record.qual().len(),
                    ));
                }
                let masked = mask_by_quality(record.seq(), record.qual(), min_quality);
                if !genome.push_scaffold(&masked, Format::Fastq, max_size) {
                    debug!("capacity reached before record `{}`", record.id());
                    break;
                }
            }
        }
    }
    info!(
        "assembled {} bases over {} scaffolds ({} bytes incl. separators)",
        genome.bases,
        genome.scaffolds,
        genome.seq.len()
    );
    Ok(genome)
}

/// Replaces every base whose decoded score falls below `min_quality` with
/// the separator byte; the rest pass through for regular mapping.
fn mask_by_quality(seq: &[u8], qual: &[u8], min_quality: u8) -> Vec<u8> {
    seq.iter()
        .zip(qual.iter())
        .map(|(&base, &q)| {
            if q.saturating_sub(QUALITY_OFFSET) < min_quality {
                SEPARATOR
            } else {
                base
            }
        })
        .collect()
}

impl Genome {
    /// Appends one scaffold behind a fresh separator. Returns false if the
    /// record does not fit within `max_size`, leaving the separator in place
    /// and the record unappended.
    ///
    /// FASTA drops non-alphabetic bytes (trailing whitespace); FASTQ counts
    /// every byte as a base, quality-masked ones included.
    fn push_scaffold(&mut self, seq: &[u8], format: Format, max_size: u64) -> bool {
        self.seq.push(SEPARATOR);
        self.scaffolds += 1;
        if self.seq.len() as u64 + seq.len() as u64 > max_size.saturating_sub(1) {
            return false;
        }
        for &raw in seq {
            if format == Format::Fasta && !raw.is_ascii_alphabetic() {
                continue;
            }
            self.seq.push(match raw {
                b'T' => b't',
                b'C' => b'c',
                b'A' => b'a',
                b'G' => b'g',
                other => other,
            });
            self.bases += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn detects_fasta_and_fastq() {
        let mut fa = Cursor::new(b">seq1\nACGT\n".to_vec());
        assert_eq!(detect_format(&mut fa).unwrap(), Format::Fasta);
        let mut fq = Cursor::new(b"@read1\nACGT\n+\nIIII\n".to_vec());
        assert_eq!(detect_format(&mut fq).unwrap(), Format::Fastq);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        let mut bad = Cursor::new(b"ACGT\n".to_vec());
        assert!(matches!(
            detect_format(&mut bad),
            Err(Error::UnknownFormat('A'))
        ));
        let mut empty = Cursor::new(b"\n  \n".to_vec());
        assert!(matches!(detect_format(&mut empty), Err(Error::EmptyInput)));
    }

    #[test]
    fn fasta_scaffolds_are_separated() {
        let input = Cursor::new(b">s1\nACGT\n>s2\nTTAA\n".to_vec());
        let genome = assemble(input, u64::max_value(), 16).unwrap();
        assert_eq!(genome.seq, b"nacgtnttaa");
        assert_eq!(genome.bases, 8);
    }

    #[test]
    fn fasta_maps_case_and_keeps_ambiguity_codes() {
        let input = Cursor::new(b">s1\nAcGNRt\n".to_vec());
        let genome = assemble(input, u64::max_value(), 16).unwrap();
        // uppercase confirmed bases lowered, everything else verbatim
        assert_eq!(genome.seq, b"nacgNRt");
        assert_eq!(genome.bases, 6);
    }

    #[test]
    fn fastq_masks_low_quality_bases() {
        // '5' is score 20, '#' is score 2
        let input = Cursor::new(b"@r1\nACGT\n+\n55#5\n".to_vec());
        let genome = assemble(input, u64::max_value(), 16).unwrap();
        assert_eq!(genome.seq, b"nacnt");
        assert_eq!(genome.bases, 4);
    }

    #[test]
    fn fastq_below_minimum_everywhere_becomes_all_separators() {
        let input = Cursor::new(b"@r1\nACGT\n+\n####\n".to_vec());
        let genome = assemble(input, u64::max_value(), 16).unwrap();
        assert_eq!(genome.seq, b"nnnnn");
        assert_eq!(genome.bases, 4);
    }

    #[test]
    fn capacity_stops_ingestion_without_error() {
        // first record fits within 7 bytes (separator + 4 bases), second not
        let input = Cursor::new(b">s1\nACGT\n>s2\nACGT\n".to_vec());
        let genome = assemble(input, 7, 16).unwrap();
        assert_eq!(genome.seq, b"nacgtn");
        assert_eq!(genome.bases, 4);
    }
}
