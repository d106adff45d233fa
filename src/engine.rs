//! The counting engine: samples windows of the assembled sequence with a
//! shifting cursor, accumulates per-row oligomer counts and writes them out
//! normalized to `[0, 1]`.

use crate::assemble::Genome;
use crate::oligo::{self, ComplementCache, Encoded};
use crate::Result;
use log::{debug, info};
use std::io::Write;

/// Largest supported oligomer size; counter and complement tables hold
/// `4^oligo` entries each.
pub const MAX_OLIGO: usize = 12;

/// Column label preceding the oligomer labels when rows carry a label.
const HEADER_LABEL: &str = "DATA";

/// Validated option bundle the engine is constructed from.
#[derive(Debug, Clone)]
pub struct Config {
    pub oligo: usize,
    pub rows: usize,
    /// Successful observations per row.
    pub counts: u32,
    /// Sampling stride between shift epochs, in bases.
    pub shift: usize,
    pub max_size: u64,
    pub min_quality: u8,
    pub merge: bool,
    pub header: bool,
    pub label: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oligo: 8,
            rows: 20000,
            counts: 100000,
            shift: 20000,
            max_size: 4294967296,
            min_quality: 16,
            merge: false,
            header: false,
            label: None,
        }
    }
}

/// Owns the assembled sequence, the per-row counter and the complement
/// cache for the whole run. The sequence is read-only from here on.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    genome: Vec<u8>,
    /// `4^oligo`.
    width: usize,
    /// Effective shift: 1 when the assembled bases fit inside one segment.
    shift: usize,
    /// Scan position, persists across rows so successive rows sample
    /// different regions of the buffer.
    cursor: usize,
    counter: Vec<u32>,
    complement: ComplementCache,
}

impl Engine {
    pub fn new(cfg: Config, genome: Genome) -> Self {
        let width = 1 << (2 * cfg.oligo);
        let shift = if genome.bases < cfg.shift as u64 {
            1
        } else {
            cfg.shift
        };
        Self {
            width,
            shift,
            cursor: 0,
            counter: vec![0; width],
            complement: ComplementCache::new(cfg.oligo),
            genome: genome.seq,
            cfg,
        }
    }

    /// Emits the optional header and all configured rows to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.cfg.header {
            self.write_header(out)?;
        }
        info!(
            "emitting {} rows over {} oligomers of size {}",
            self.cfg.rows, self.width, self.cfg.oligo
        );
        for row in 0..self.cfg.rows {
            let observed = self.count_row();
            debug!("row {}: {} observations", row + 1, observed);
            self.write_row(out)?;
        }
        Ok(())
    }

    /// Resets the counter and accumulates up to the per-row budget of
    /// successful observations. Returns the number observed.
    ///
    /// The cursor advances one base per attempt; reaching the buffer end
    /// jumps it to the next shift-epoch boundary, wrapping to the start once
    /// the boundary passes the filled length. A full cycle from the start
    /// without one success means no later cycle can succeed either, so the
    /// row stops short of its budget rather than spinning.
    fn count_row(&mut self) -> u32 {
        for count in &mut self.counter {
            *count = 0;
        }
        if self.genome.is_empty() {
            return 0;
        }
        let mut successes = 0;
        let mut epoch = 1;
        let mut barren_pass = false;
        while successes < self.cfg.counts {
            match oligo::encode(&self.genome[self.cursor..], self.cfg.oligo) {
                Encoded::Complete(idx) => {
                    self.counter[idx] += 1;
                    self.complement.complement_of(idx);
                    successes += 1;
                    barren_pass = false;
                    self.cursor += 1;
                }
                Encoded::Partial(_) => self.cursor += 1,
                Encoded::End => {
                    let boundary = self.shift * epoch;
                    epoch += 1;
                    if boundary >= self.genome.len() {
                        if barren_pass {
                            break;
                        }
                        barren_pass = true;
                        epoch = 1;
                        self.cursor = 0;
                    } else {
                        self.cursor = boundary;
                    }
                }
            }
        }
        successes
    }

    /// Writes one normalized, tab-separated row from the current counter.
    fn write_row<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(ref label) = self.cfg.label {
            write!(out, "{}\t", label)?;
        }
        if self.cfg.merge {
            let mut consumed = vec![false; self.width];
            let mut totals = Vec::with_capacity(self.width / 2 + 1);
            for idx in 0..self.width {
                if consumed[idx] {
                    continue;
                }
                let partner = self.complement.complement_of(idx);
                // a palindrome pairs with itself; its total is intentionally
                // twice its own count, matching the pair sums of the rest
                totals.push(self.counter[idx] + self.counter[partner]);
                consumed[idx] = true;
                consumed[partner] = true;
            }
            write_normalized(out, &totals)?;
        } else {
            write_normalized(out, &self.counter)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Writes the header line listing every oligomer label in index order.
    fn write_header<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.cfg.label.is_some() {
            write!(out, "{}\t", HEADER_LABEL)?;
        }
        for idx in 0..self.width {
            if idx > 0 {
                write!(out, "\t")?;
            }
            write!(out, "{}", oligo::decode_label(idx, self.cfg.oligo))?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Scales counts by their maximum and writes them with 4 fractional digits.
/// An all-zero row is written as all zeros.
fn write_normalized<W: Write>(out: &mut W, counts: &[u32]) -> Result<()> {
    let max = counts.iter().copied().max().unwrap_or(0);
    for (at, &count) in counts.iter().enumerate() {
        if at > 0 {
            write!(out, "\t")?;
        }
        if max == 0 {
            write!(out, "0.0000")?;
        } else {
            write!(out, "{:.4}", f64::from(count) / f64::from(max))?;
        }
    }
    Ok(())
}
