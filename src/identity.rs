//! Column-wise identity and distance between aligned sequences.
//!
//! Two flavours of identity are provided:
//! - [`pairwise_identity`] skips only columns where *both* sequences have a
//!   gap; a gap facing a residue counts as a mismatch. Distances and
//!   clustering are built on this one.
//! - [`ungapped_identity`] only looks at columns where *neither* sequence has
//!   a gap.
//!
//! Residues are compared case-insensitively.

use crate::error::MsaResult;
use crate::model::{Alignment, Record};

/// The gap symbol.
pub const GAP: u8 = b'-';

/// Returns true if `b` is the gap symbol.
#[inline]
pub fn is_gap(b: u8) -> bool {
    b == GAP
}

#[inline]
fn same_residue(a: u8, b: u8) -> bool {
    a.eq_ignore_ascii_case(&b)
}

/// `(identical, compared)` column counts over columns not gapped in both
/// sequences.
fn pairwise_counts(a: &[u8], b: &[u8]) -> (usize, usize) {
    let (mut identical, mut compared) = (0usize, 0usize);
    for (&x, &y) in a.iter().zip(b) {
        match (is_gap(x), is_gap(y)) {
            (true, true) => continue,
            (false, false) if same_residue(x, y) => identical += 1,
            _ => {}
        }
        compared += 1;
    }
    (identical, compared)
}

/// Identity over columns that are not gapped in both sequences.
///
/// Returns `None` when the sequences share no such column. Sequences are
/// compared up to the shorter length; callers check equal length first.
pub fn pairwise_identity(a: &[u8], b: &[u8]) -> Option<f64> {
    let (identical, compared) = pairwise_counts(a, b);
    (compared > 0).then(|| identical as f64 / compared as f64)
}

/// Identity over columns where neither sequence has a gap.
///
/// Returns `None` when the sequences share no such column.
pub fn ungapped_identity(a: &[u8], b: &[u8]) -> Option<f64> {
    let (mut identical, mut compared) = (0usize, 0usize);
    for (&x, &y) in a.iter().zip(b) {
        if is_gap(x) || is_gap(y) {
            continue;
        }
        compared += 1;
        if same_residue(x, y) {
            identical += 1;
        }
    }
    (compared > 0).then(|| identical as f64 / compared as f64)
}

/// Distance between two aligned sequences, in `[0, 1]`.
///
/// The fraction of mismatching columns, i.e. `1 - pairwise_identity`, or the
/// maximal distance 1.0 when the pair has no comparable column.
///
/// Computed as a single division so that a distance of `k / n` compares
/// exactly against a threshold written as the same decimal.
pub fn distance(a: &[u8], b: &[u8]) -> f64 {
    match pairwise_counts(a, b) {
        (_, 0) => 1.0,
        (identical, compared) => (compared - identical) as f64 / compared as f64,
    }
}

/// Distance between two records.
pub fn record_distance(a: &Record, b: &Record) -> f64 {
    distance(a.as_bytes(), b.as_bytes())
}

/// Symmetric matrix of pairwise distances between the records of an
/// alignment.
///
/// Computing it costs O(n² · L) time and O(n²) memory for `n` records of
/// width `L`; this bounds every clustering method, so interactive callers
/// should cap `n` accordingly.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise distances. Requires equal-length records.
    pub fn compute(alignment: &Alignment) -> MsaResult<Self> {
        alignment.width()?;
        let records = alignment.records();
        let n = records.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = record_distance(&records[i], &records[j]);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Ok(Self { n, values })
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true for a matrix over zero records.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between records `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Sum of distances from `i` to every record in `members`.
    pub fn sum_to(&self, i: usize, members: &[usize]) -> f64 {
        members.iter().map(|&j| self.get(i, j)).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_pairwise_identity_counts_gap_vs_residue_as_mismatch() {
        // 4 identical out of 5 compared columns
        assert_relative_eq!(pairwise_identity(b"MKV-L", b"MKVAL").unwrap(), 0.8);
    }

    #[test]
    fn test_pairwise_identity_skips_double_gaps() {
        // column 3 is gapped in both: 2 identical out of 4
        assert_relative_eq!(pairwise_identity(b"M---L", b"MKV-L").unwrap(), 0.5);
    }

    #[test]
    fn test_pairwise_identity_undefined() {
        assert_eq!(pairwise_identity(b"---", b"---"), None);
        assert_eq!(pairwise_identity(b"", b""), None);
    }

    #[test]
    fn test_ungapped_identity() {
        assert_relative_eq!(ungapped_identity(b"MKV-L", b"MKVAL").unwrap(), 1.0);
        assert_relative_eq!(ungapped_identity(b"MKVAL", b"MRVA-").unwrap(), 0.75);
        assert_eq!(ungapped_identity(b"M-", b"-K"), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_relative_eq!(pairwise_identity(b"mkval", b"MKVAL").unwrap(), 1.0);
    }

    #[test]
    fn test_distance_bounds() {
        assert_relative_eq!(distance(b"MKVAL", b"MKVAL"), 0.0);
        assert_relative_eq!(distance(b"AAAA", b"CCCC"), 1.0);
        assert_relative_eq!(distance(b"--", b"--"), 1.0);
    }

    #[test]
    fn test_distance_is_exact_fraction() {
        // 7 identical out of 10: 1.0 - 0.7 would give 0.30000000000000004
        assert_eq!(distance(b"AAAAAAAAAA", b"AAAAAAACCC"), 0.3);
        assert_eq!(distance(b"MKVAL", b"MKV-L"), 0.2);
        assert_eq!(distance(b"M---L", b"MKVAL"), 0.6);
    }

    #[test]
    fn test_distance_symmetry() {
        let seqs: [&[u8]; 4] = [b"MKV-L", b"MKVAL", b"M---L", b"-KVA-"];
        for a in seqs {
            for b in seqs {
                assert_eq!(distance(a, b), distance(b, a));
            }
        }
    }

    #[test]
    fn test_distance_matrix() {
        let alignment = Alignment::new(vec![
            Record::new("A", "MKV-L"),
            Record::new("B", "MKVAL"),
            Record::new("C", "M---L"),
        ])
        .unwrap();
        let matrix = DistanceMatrix::compute(&alignment).unwrap();
        assert_eq!(matrix.len(), 3);
        assert_relative_eq!(matrix.get(0, 1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(matrix.get(1, 0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(matrix.get(0, 2), 0.5, epsilon = 1e-12);
        assert_relative_eq!(matrix.get(1, 2), 0.6, epsilon = 1e-12);
        assert_eq!(matrix.get(2, 2), 0.0);
        assert_relative_eq!(matrix.sum_to(0, &[1, 2]), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_matrix_requires_equal_lengths() {
        let alignment =
            Alignment::new(vec![Record::new("A", "MKVL"), Record::new("B", "MK")]).unwrap();
        assert!(DistanceMatrix::compute(&alignment).is_err());
    }
}
