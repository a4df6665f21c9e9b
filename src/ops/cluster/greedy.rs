//! Greedy threshold clustering.

use crate::identity::DistanceMatrix;

/// Visits records in input order; each joins the first cluster whose founding
/// record is within `threshold`, or founds a new cluster.
///
/// Returns one label per record, numbered in creation order.
pub(super) fn cluster(distances: &DistanceMatrix, threshold: f64) -> Vec<usize> {
    let mut representatives: Vec<usize> = Vec::new();
    let mut labels = Vec::with_capacity(distances.len());

    for row in 0..distances.len() {
        let label = match representatives
            .iter()
            .position(|&rep| distances.get(rep, row) <= threshold)
        {
            Some(label) => label,
            None => {
                representatives.push(row);
                representatives.len() - 1
            }
        };
        labels.push(label);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, Record};

    fn matrix(seqs: &[&str]) -> DistanceMatrix {
        let records = seqs
            .iter()
            .enumerate()
            .map(|(i, s)| Record::new(i.to_string(), *s))
            .collect();
        DistanceMatrix::compute(&Alignment::new(records).unwrap()).unwrap()
    }

    #[test]
    fn test_first_matching_cluster_wins() {
        // record 2 is within reach of both founders; it joins the first one
        let distances = matrix(&["AAAA", "CCAA", "CAAA"]);
        assert_eq!(cluster(&distances, 0.25), vec![0, 1, 0]);
    }

    #[test]
    fn test_compares_to_founder_only() {
        // record 2 is close to record 1 but too far from founder 0
        let distances = matrix(&["AAAA", "AAAC", "AACC"]);
        assert_eq!(cluster(&distances, 0.25), vec![0, 0, 1]);
    }

    #[test]
    fn test_threshold_is_inclusive_at_inexact_decimal() {
        // distance 3/10 must count as within a 0.3 threshold
        let distances = matrix(&["AAAAAAAAAA", "AAAAAAACCC", "CCCCCCCCCC"]);
        assert_eq!(cluster(&distances, 0.3), vec![0, 0, 1]);
    }

    #[test]
    fn test_threshold_one_merges_everything() {
        let distances = matrix(&["AAAA", "CCCC", "----"]);
        assert_eq!(cluster(&distances, 1.0), vec![0, 0, 0]);
    }
}
