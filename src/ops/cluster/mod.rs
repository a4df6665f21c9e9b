//! Sequence clustering.
//!
//! Three methods are available, all driven by the pairwise [`distance`]
//! between aligned records:
//!
//! - **Greedy threshold clustering**: records are visited in input order and
//!   join the first existing cluster whose representative (its founding
//!   record) lies within the distance threshold, or found a new cluster.
//!   The result depends on the input order: reordering the records may change
//!   the clusters. This is intended and reproducible for a given order.
//! - **k-medoids**: a fixed number of clusters around medoids drawn from a
//!   seeded random start, refined by medoid swaps. The same seed and input
//!   always give the same result.
//! - **DBSCAN**: clusters are dense regions of records within `eps` of each
//!   other; records in no dense region are left unclustered as noise.
//!
//! All build the full distance matrix first, so they cost O(n² · L) time and
//! O(n²) memory for `n` records of width `L`.
//!
//! [`distance`]: crate::identity::distance

mod dbscan;
mod greedy;
mod kmedoids;
mod select;

use std::collections::BTreeMap;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_fraction, MsaError, MsaResult};
use crate::identity::DistanceMatrix;
use crate::model::{Alignment, Value};
use crate::seqtools::consensus_of;

pub use select::Selection;

/// Name of the field written by [`annotate_clusters`].
pub const CLUSTER_ID_FIELD: &str = "cluster_id";

/// Value of [`CLUSTER_ID_FIELD`] for records left unclustered as noise.
pub const NOISE_LABEL: i64 = -1;

/// Default iteration cap for k-medoids.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Clustering method and its settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "method"))]
pub enum ClusterMethod {
    /// Greedy, input-order dependent clustering with a maximal distance to
    /// the cluster representative.
    Greedy { distance_threshold: f64 },
    /// Partition into exactly `k` clusters around medoids.
    KMedoids {
        k: usize,
        seed: u64,
        max_iterations: usize,
    },
    /// Density-based clustering: records with at least `min_samples`
    /// records (themselves included) within `eps` seed clusters; records
    /// reached by no cluster are noise.
    Dbscan { eps: f64, min_samples: usize },
}

impl ClusterMethod {
    /// Greedy clustering with the given threshold.
    pub fn greedy(distance_threshold: f64) -> Self {
        ClusterMethod::Greedy { distance_threshold }
    }

    /// k-medoids with the default iteration cap.
    pub fn k_medoids(k: usize, seed: u64) -> Self {
        ClusterMethod::KMedoids {
            k,
            seed,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// DBSCAN with the given neighbourhood radius and density.
    pub fn dbscan(eps: f64, min_samples: usize) -> Self {
        ClusterMethod::Dbscan { eps, min_samples }
    }

    fn validate(&self, num_records: usize) -> MsaResult<()> {
        match *self {
            ClusterMethod::Greedy { distance_threshold } => {
                check_fraction("distance threshold", distance_threshold)
            }
            ClusterMethod::KMedoids {
                k, max_iterations, ..
            } => {
                if k == 0 || k > num_records {
                    return Err(MsaError::InvalidParameter(format!(
                        "k must be between 1 and the number of records ({}), got {}",
                        num_records, k
                    )));
                }
                if max_iterations == 0 {
                    return Err(MsaError::InvalidParameter(
                        "max_iterations must be at least 1".to_string(),
                    ));
                }
                Ok(())
            }
            ClusterMethod::Dbscan { eps, min_samples } => {
                check_fraction("eps", eps)?;
                if min_samples == 0 {
                    return Err(MsaError::InvalidParameter(
                        "min_samples must be at least 1".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Cluster label of every record of a clustered alignment.
///
/// Labels run from 0 to `num_clusters() - 1` and are numbered by first
/// appearance in input order. They carry no meaning outside one run. Records
/// left unclustered (DBSCAN noise) have no label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterAssignment {
    ids: Vec<String>,
    labels: Vec<Option<usize>>,
    num_clusters: usize,
}

impl ClusterAssignment {
    /// Builds an assignment from raw labels, renumbering them by first
    /// appearance.
    fn from_raw_labels(alignment: &Alignment, raw: &[Option<usize>]) -> Self {
        let mut renumber: BTreeMap<usize, usize> = BTreeMap::new();
        let labels: Vec<Option<usize>> = raw
            .iter()
            .map(|&l| {
                l.map(|l| {
                    let next = renumber.len();
                    *renumber.entry(l).or_insert(next)
                })
            })
            .collect();
        Self {
            ids: alignment.iter().map(|r| r.id.clone()).collect(),
            labels,
            num_clusters: renumber.len(),
        }
    }

    /// Number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Number of clustered records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no record was clustered.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in record order, `None` for noise.
    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Label of the record `id`; `None` if there is no such record or it is
    /// noise.
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.ids
            .iter()
            .position(|i| i == id)
            .and_then(|pos| self.labels[pos])
    }

    /// Returns true if the record `id` exists and was left unclustered.
    pub fn is_noise(&self, id: &str) -> bool {
        self.ids
            .iter()
            .position(|i| i == id)
            .is_some_and(|pos| self.labels[pos].is_none())
    }

    /// Number of records left unclustered.
    pub fn num_noise(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }

    /// Iterates over `(id, label)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().copied())
    }

    /// Row indices of each cluster's members, in input order, indexed by
    /// label. Noise belongs to no cluster.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.num_clusters];
        for (row, label) in self.labels.iter().enumerate() {
            if let Some(label) = *label {
                members[label].push(row);
            }
        }
        members
    }

    /// Checks that this assignment was computed for `alignment`.
    fn check_matches(&self, alignment: &Alignment) -> MsaResult<()> {
        let same = self.ids.len() == alignment.len()
            && self.ids.iter().zip(alignment.iter()).all(|(id, r)| *id == r.id);
        if same {
            Ok(())
        } else {
            Err(MsaError::InvalidParameter(
                "cluster assignment does not belong to this alignment".to_string(),
            ))
        }
    }
}

/// Clusters the records of an aligned set.
///
/// Fails with [`MsaError::EmptyInput`] on an empty alignment, with
/// [`MsaError::InvalidParameter`] on invalid method settings and with
/// [`MsaError::ShapeMismatch`] if records have unequal lengths.
pub fn cluster(alignment: &Alignment, method: &ClusterMethod) -> MsaResult<ClusterAssignment> {
    let (assignment, _) = cluster_with_distances(alignment, method)?;
    Ok(assignment)
}

fn cluster_with_distances(
    alignment: &Alignment,
    method: &ClusterMethod,
) -> MsaResult<(ClusterAssignment, DistanceMatrix)> {
    if alignment.is_empty() {
        return Err(MsaError::EmptyInput("clustering needs at least one record"));
    }
    method.validate(alignment.len())?;
    let distances = DistanceMatrix::compute(alignment)?;

    let raw: Vec<Option<usize>> = match *method {
        ClusterMethod::Greedy { distance_threshold } => {
            greedy::cluster(&distances, distance_threshold)
                .into_iter()
                .map(Some)
                .collect()
        }
        ClusterMethod::KMedoids {
            k,
            seed,
            max_iterations,
        } => kmedoids::cluster(&distances, k, seed, max_iterations)
            .into_iter()
            .map(Some)
            .collect(),
        ClusterMethod::Dbscan { eps, min_samples } => {
            dbscan::cluster(&distances, eps, min_samples)
        }
    };
    let assignment = ClusterAssignment::from_raw_labels(alignment, &raw);
    debug!(
        "cluster {:?}: {} records in {} clusters, {} noise",
        method,
        assignment.len(),
        assignment.num_clusters(),
        assignment.num_noise()
    );
    Ok((assignment, distances))
}

/// Clusters the records and reduces the alignment to the representatives
/// chosen by `selection`, in input order. Noise is never selected.
pub fn cluster_and_select(
    alignment: &Alignment,
    method: &ClusterMethod,
    selection: Selection,
) -> MsaResult<Alignment> {
    let (assignment, distances) = cluster_with_distances(alignment, method)?;
    let rows = selection.select(&assignment.members(), &distances);
    debug!(
        "cluster_and_select {:?}: kept {} of {} records",
        selection,
        rows.len(),
        alignment.len()
    );
    Ok(alignment.subset(rows))
}

/// Returns a copy of the alignment with each record's cluster label stored in
/// the [`CLUSTER_ID_FIELD`] field ([`NOISE_LABEL`] for noise).
pub fn annotate_clusters(
    alignment: &Alignment,
    assignment: &ClusterAssignment,
) -> MsaResult<Alignment> {
    assignment.check_matches(alignment)?;
    let records = alignment
        .iter()
        .zip(assignment.labels())
        .map(|(record, label)| {
            let value = label.map_or(Value::Integer(NOISE_LABEL), Value::from);
            record.clone().with_field(CLUSTER_ID_FIELD, value)
        })
        .collect();
    Ok(Alignment::from_records(records))
}

/// Keeps the records whose cluster label is in `labels`, in input order.
/// Noise is never kept.
pub fn select_clusters(
    alignment: &Alignment,
    assignment: &ClusterAssignment,
    labels: &[usize],
) -> MsaResult<Alignment> {
    assignment.check_matches(alignment)?;
    if let Some(&bad) = labels.iter().find(|&&l| l >= assignment.num_clusters()) {
        return Err(MsaError::InvalidParameter(format!(
            "no cluster with label {} (found {} clusters)",
            bad,
            assignment.num_clusters()
        )));
    }
    let rows = assignment
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| label.is_some_and(|l| labels.contains(&l)))
        .map(|(row, _)| row);
    Ok(alignment.subset(rows))
}

/// Consensus sequence of each cluster, indexed by label.
pub fn cluster_consensus(
    alignment: &Alignment,
    assignment: &ClusterAssignment,
) -> MsaResult<Vec<String>> {
    assignment.check_matches(alignment)?;
    let width = alignment.width()?;
    let records = alignment.records();
    Ok(assignment
        .members()
        .iter()
        .map(|rows| consensus_of(rows.iter().map(|&row| &records[row]), width))
        .collect())
}
