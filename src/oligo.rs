//! Bijective mapping between an oligomer index in `[0, 4^k)` and its base
//! sequence, plus the reverse-complement table.
//!
//! The index is a base-4 positional code over confirmed bases with digit
//! mapping T=0, C=1, A=2, G=3 and position 0 as the least significant digit.

/// Outcome of encoding one window of the assembled sequence.
#[derive(Debug, Eq, PartialEq)]
pub enum Encoded {
    /// All bases valid; holds the oligomer index.
    Complete(usize),
    /// Hit an unrepresentable byte; holds how many valid bases preceded it.
    Partial(usize),
    /// Ran off the end of the buffer before completing the oligomer.
    End,
}

/// Encodes the `oligo` bytes of `window` starting at its first byte.
///
/// Scanning stops at the first byte that is not a confirmed base: the end of
/// the slice reports [`Encoded::End`], anything else (separator `n`,
/// ambiguity codes, uppercase) reports [`Encoded::Partial`] with the number
/// of valid bases seen, which the scan uses to decide how far to advance.
pub fn encode(window: &[u8], oligo: usize) -> Encoded {
    let mut idx = 0;
    for i in 0..oligo {
        let digit = match window.get(i) {
            None => return Encoded::End,
            Some(b't') => 0,
            Some(b'c') => 1,
            Some(b'a') => 2,
            Some(b'g') => 3,
            Some(_) => return Encoded::Partial(i),
        };
        idx += digit << (2 * i);
    }
    Encoded::Complete(idx)
}

/// Renders the letter sequence of an oligomer index, least significant digit
/// first, for header output.
pub fn decode_label(mut idx: usize, oligo: usize) -> String {
    (0..oligo)
        .map(|_| {
            let digit = idx & 0b11;
            idx >>= 2;
            match digit {
                0 => 'T',
                1 => 'C',
                2 => 'A',
                _ => 'G',
            }
        })
        .collect()
}

/// Index of the reverse complement: digit order reversed and each digit
/// swapped through T<->A, C<->G (xor with 2).
pub fn reverse_complement(idx: usize, oligo: usize) -> usize {
    let mut rev = 0;
    for i in 0..oligo {
        let digit = (idx >> (2 * i)) & 0b11;
        rev |= (digit ^ 2) << (2 * (oligo - 1 - i));
    }
    rev
}

/// Lazily filled index -> reverse-complement index table.
///
/// Filled on first lookup and never invalidated; every index has exactly one
/// complement, with palindromic oligomers mapping to themselves.
#[derive(Debug)]
pub struct ComplementCache {
    oligo: usize,
    table: Vec<Option<u32>>,
}

impl ComplementCache {
    pub fn new(oligo: usize) -> Self {
        Self {
            oligo,
            table: vec![None; 1 << (2 * oligo)],
        }
    }

    pub fn complement_of(&mut self, idx: usize) -> usize {
        match self.table[idx] {
            Some(rev) => rev as usize,
            None => {
                let rev = reverse_complement(idx, self.oligo);
                self.table[idx] = Some(rev as u32);
                rev
            }
        }
    }
}
