//! Density-based clustering (DBSCAN) over the pairwise distance matrix.

use std::collections::VecDeque;

use crate::identity::DistanceMatrix;

/// Groups records into dense regions.
///
/// The neighbourhood of a record is every record within `eps` of it, itself
/// included. A record with at least `min_samples` neighbours is a core
/// record; clusters grow from core records in input order and absorb every
/// neighbour they reach. A non-core record reached by several clusters stays
/// in the first one. Records reached by no cluster are noise (`None`).
///
/// Returns one label per record, clusters numbered in creation order.
pub(super) fn cluster(
    distances: &DistanceMatrix,
    eps: f64,
    min_samples: usize,
) -> Vec<Option<usize>> {
    let n = distances.len();
    let neighbours: Vec<Vec<usize>> = (0..n)
        .map(|i| (0..n).filter(|&j| distances.get(i, j) <= eps).collect())
        .collect();
    let is_core: Vec<bool> = neighbours.iter().map(|nb| nb.len() >= min_samples).collect();

    let mut labels = vec![None; n];
    let mut next = 0;
    for start in 0..n {
        if labels[start].is_some() || !is_core[start] {
            continue;
        }
        labels[start] = Some(next);
        let mut queue = VecDeque::from([start]);
        while let Some(point) = queue.pop_front() {
            for &nb in &neighbours[point] {
                if labels[nb].is_none() {
                    labels[nb] = Some(next);
                    if is_core[nb] {
                        queue.push_back(nb);
                    }
                }
            }
        }
        next += 1;
    }
    labels
}
