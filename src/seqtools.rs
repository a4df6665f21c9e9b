//! Helpers for peptide sequences: alphabet checks, vetting and consensus.

use std::collections::HashMap;

use crate::error::MsaResult;
use crate::model::{ascii_string, Alignment, Record};

/// The 20 standard amino acids in one-letter code.
pub const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// Symbol used for missing or unknown residues.
pub const UNKNOWN: u8 = b'X';

/// Symbols with a numeric index: the 20 amino acids, the gap, then `X`.
pub const ALPHABET: &[u8; 22] = b"ACDEFGHIKLMNPQRSTVWY-X";

/// Returns true if `b` is one of the 20 standard amino acids (any case).
#[inline]
pub fn is_amino_acid(b: u8) -> bool {
    AMINO_ACIDS.contains(&b.to_ascii_uppercase())
}

/// Checks that a sequence only holds standard amino acids or `X`, ignoring case.
pub fn is_valid_peptide(seq: &str) -> bool {
    seq.bytes()
        .all(|b| is_amino_acid(b) || b.to_ascii_uppercase() == UNKNOWN)
}

/// Position of `b` in [`ALPHABET`], ignoring case.
pub fn alphabet_index(b: u8) -> Option<usize> {
    let upper = b.to_ascii_uppercase();
    ALPHABET.iter().position(|&a| a == upper)
}

/// Numeric encoding of a sequence: the [`ALPHABET`] index of each symbol,
/// `None` for symbols outside it.
pub fn index_encoding(seq: &str) -> Vec<Option<usize>> {
    seq.bytes().map(alphabet_index).collect()
}

/// Uppercases a sequence and replaces anything that is not a standard
/// amino acid (gaps included) with `X`.
pub fn vet_sequence(seq: &str) -> String {
    ascii_string(seq.bytes().map(|b| {
        let upper = b.to_ascii_uppercase();
        if is_amino_acid(upper) {
            upper
        } else {
            UNKNOWN
        }
    }))
}

/// Consensus over a set of equal-length records: the most frequent symbol of
/// each column, ties going to the symbol seen first in record order.
pub(crate) fn consensus_of<'a, I>(records: I, width: usize) -> String
where
    I: IntoIterator<Item = &'a Record> + Clone,
{
    let mut consensus = Vec::with_capacity(width);
    for col in 0..width {
        let mut counts: HashMap<u8, (usize, usize)> = HashMap::new();
        for (row, record) in records.clone().into_iter().enumerate() {
            let entry = counts.entry(record.as_bytes()[col]).or_insert((0, row));
            entry.0 += 1;
        }
        let best = counts
            .into_iter()
            .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
            .map(|(symbol, _)| symbol);
        if let Some(symbol) = best {
            consensus.push(symbol);
        }
    }
    ascii_string(consensus)
}

/// Computes the consensus sequence of an alignment.
///
/// Requires equal-length records; an empty alignment yields an empty string.
pub fn consensus(alignment: &Alignment) -> MsaResult<String> {
    let width = alignment.width()?;
    if alignment.is_empty() {
        return Ok(String::new());
    }
    Ok(consensus_of(alignment.records(), width))
}
