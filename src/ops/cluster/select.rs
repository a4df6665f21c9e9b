//! Picking representative records out of clusters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::identity::DistanceMatrix;

/// Summed distances closer than this are considered equal.
const TIE_TOLERANCE: f64 = 1e-9;

/// How [`cluster_and_select`](super::cluster_and_select) reduces clusters.
///
/// Ties are always broken by input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// One record per cluster: the member with the smallest mean distance to
    /// the other members.
    #[default]
    Centroid,
    /// Every member of the largest cluster.
    LargestClusterOnly,
    /// One record per cluster: its first member in input order.
    OnePerCluster,
}

impl Selection {
    /// Row indices to keep, sorted in input order.
    ///
    /// `members` lists each cluster's rows in input order.
    pub(super) fn select(&self, members: &[Vec<usize>], distances: &DistanceMatrix) -> Vec<usize> {
        let mut rows: Vec<usize> = match self {
            Selection::Centroid => members
                .iter()
                .filter_map(|rows| centroid(rows, distances))
                .collect(),
            Selection::LargestClusterOnly => largest(members).to_vec(),
            Selection::OnePerCluster => members
                .iter()
                .filter_map(|rows| rows.first().copied())
                .collect(),
        };
        rows.sort_unstable();
        rows
    }
}

/// Member with the minimum summed (hence mean) distance to the others; the
/// earliest one on ties.
///
/// Sums that only differ by rounding (the same distances added in another
/// order) count as ties.
fn centroid(rows: &[usize], distances: &DistanceMatrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &row in rows {
        let cost = distances.sum_to(row, rows);
        match best {
            Some((_, best_cost)) if cost > best_cost - TIE_TOLERANCE => {}
            _ => best = Some((row, cost)),
        }
    }
    best.map(|(row, _)| row)
}

/// Largest cluster; the one whose first member comes first on ties.
fn largest(members: &[Vec<usize>]) -> &[usize] {
    let mut best: &[usize] = &[];
    for rows in members {
        let earlier = match (rows.first(), best.first()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        };
        if rows.len() > best.len() || (rows.len() == best.len() && earlier) {
            best = rows;
        }
    }
    best
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
    fn test_centroid_picks_most_central() {
        let distances = matrix(&["AAAC", "AAAA", "CAAA", "CCCC"]);
        let members = vec![vec![0, 1, 2], vec![3]];
        assert_eq!(Selection::Centroid.select(&members, &distances), vec![1, 3]);
    }

    #[test]
    fn test_centroid_ties_go_to_first() {
        let distances = matrix(&["AA", "AC", "CC"]);
        // 0 and 1 are equidistant to each other; cluster {0, 1}
        let members = vec![vec![0, 1], vec![2]];
        assert_eq!(Selection::Centroid.select(&members, &distances), vec![0, 2]);
    }

    #[test]
    fn test_centroid_ties_ignore_rounding() {
        // members 0, 1 and 3 all sum to 13/10, but adding the same tenths
        // in another order gives 1.3 for member 0 and 1.2999999999999998
        // for member 3
        let distances = matrix(&["AACACCCCAA", "CACCACCAAC", "AAAACACAAC", "CACAACCACA"]);
        let rows = [0, 1, 2, 3];
        assert!(distances.sum_to(3, &rows) < distances.sum_to(0, &rows));
        let members = vec![rows.to_vec()];
        assert_eq!(Selection::Centroid.select(&members, &distances), vec![0]);
    }

    #[test]
    fn test_largest_cluster_only() {
        let distances = matrix(&["AA", "AC", "CC", "CA", "GG"]);
        let members = vec![vec![0, 4], vec![1, 2, 3]];
        assert_eq!(
            Selection::LargestClusterOnly.select(&members, &distances),
            vec![1, 2, 3]
        );
        let tied = vec![vec![1, 2], vec![0, 3], vec![4]];
        assert_eq!(
            Selection::LargestClusterOnly.select(&tied, &distances),
            vec![0, 3]
        );
    }

    #[test]
    fn test_one_per_cluster() {
        let distances = matrix(&["AA", "AC", "CC", "CA"]);
        let members = vec![vec![0, 2], vec![1, 3]];
        assert_eq!(
            Selection::OnePerCluster.select(&members, &distances),
            vec![0, 1]
        );
    }
}
