//! k-medoids clustering by medoid swapping (PAM-style relocation).

use log::trace;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::identity::DistanceMatrix;

/// Smallest cost decrease accepted as an improvement.
const MIN_GAIN: f64 = 1e-12;

/// Partitions the records into `k` clusters.
///
/// Medoids start as `k` distinct records drawn with a generator seeded from
/// `seed`. Each round evaluates every swap of a medoid with a non-medoid and
/// applies the one lowering the total distance of records to their nearest
/// medoid the most (ties go to the earlier medoid slot, then the earlier
/// record). Stops when no swap helps or after `max_iterations` rounds.
///
/// One round costs O(k² · n · (n - k)) distance lookups.
///
/// Callers guarantee `1 <= k <= distances.len()`. Returns the medoid slot of
/// each record.
pub(super) fn cluster(
    distances: &DistanceMatrix,
    k: usize,
    seed: u64,
    max_iterations: usize,
) -> Vec<usize> {
    let n = distances.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut medoids = rand::seq::index::sample(&mut rng, n, k).into_vec();
    let mut cost = total_cost(distances, &medoids);

    for iteration in 0..max_iterations {
        match best_swap(distances, &medoids, cost) {
            Some((slot, candidate, new_cost)) => {
                medoids[slot] = candidate;
                cost = new_cost;
                trace!(
                    "k-medoids iteration {}: medoids {:?}, cost {}",
                    iteration,
                    medoids,
                    cost
                );
            }
            None => {
                trace!("k-medoids converged after {} iterations", iteration);
                break;
            }
        }
    }
    assign(distances, &medoids)
}

/// Slot of the medoid nearest to `row` (a medoid is nearest to itself; ties
/// go to the earlier slot).
fn nearest(distances: &DistanceMatrix, medoids: &[usize], row: usize) -> usize {
    if let Some(slot) = medoids.iter().position(|&m| m == row) {
        return slot;
    }
    let mut best = 0;
    for (slot, &medoid) in medoids.iter().enumerate().skip(1) {
        if distances.get(row, medoid) < distances.get(row, medoids[best]) {
            best = slot;
        }
    }
    best
}

/// Assigns each record to the slot of its nearest medoid.
fn assign(distances: &DistanceMatrix, medoids: &[usize]) -> Vec<usize> {
    (0..distances.len())
        .map(|row| nearest(distances, medoids, row))
        .collect()
}

/// Sum over records of the distance to their nearest medoid.
fn total_cost(distances: &DistanceMatrix, medoids: &[usize]) -> f64 {
    (0..distances.len())
        .map(|row| distances.get(row, medoids[nearest(distances, medoids, row)]))
        .sum()
}

/// Best improving `(slot, candidate, cost)` swap, if any.
fn best_swap(
    distances: &DistanceMatrix,
    medoids: &[usize],
    current_cost: f64,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    let mut trial = medoids.to_vec();

    for slot in 0..medoids.len() {
        for candidate in 0..distances.len() {
            if medoids.contains(&candidate) {
                continue;
            }
            trial[slot] = candidate;
            let cost = total_cost(distances, &trial);
            let threshold = best.map_or(current_cost, |(_, _, c)| c);
            if cost < threshold - MIN_GAIN {
                best = Some((slot, candidate, cost));
            }
        }
        trial[slot] = medoids[slot];
    }
    best
}
