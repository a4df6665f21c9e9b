//! Operations on alignments.
//!
//! Every operation is a pure function: it validates its settings first,
//! then reads the input alignment and returns a new one (or a cluster
//! assignment). Nothing is cached between calls, so operations can be run
//! concurrently on separate or shared alignments.
//!
//! - [`filter`]: drop records failing a criterion
//! - [`slice`]: keep selected columns, or crop to a contiguous span
//! - [`reshape`]: length unification, de-duplication, sorting, depth
//! - [`cluster`]: group records by distance and pick representatives

pub mod cluster;
pub mod filter;
pub mod reshape;
pub mod slice;

pub use cluster::{
    annotate_clusters, cluster, cluster_and_select, cluster_consensus, select_clusters,
    ClusterAssignment, ClusterMethod, Selection, CLUSTER_ID_FIELD, NOISE_LABEL,
};
pub use filter::{filter, FilterCriterion};
pub use reshape::{
    drop_duplicates, sort_by_gaps, sort_by_identity, truncate_depth, unify_length,
    KeepDuplicate, LengthTarget, SortOrder,
};
pub use slice::{crop, crop_to_reference, crop_with, slice, CropMode};
