//! # msatools - Multiple Sequence Alignment operations
//!
//! A small library for manipulating multiple sequence alignments held in
//! memory: filtering, slicing, cropping and clustering of aligned sequences.
//!
//! ## Architecture
//!
//! - `model`: records, auxiliary field values and the immutable `Alignment`
//! - `table`: conversion from and to in-memory column tables
//! - `identity`: gap handling, identity and distance between sequences
//! - `seqtools`: consensus and amino-acid alphabet helpers
//! - `ops`: the operations themselves, each a pure function returning a new
//!   alignment (or a cluster assignment)
//! - `error`: the error type every fallible operation reports
//!
//! ## Example
//!
//! ```
//! use msatools::{Alignment, Record};
//! use msatools::ops::{cluster_and_select, filter, ClusterMethod, FilterCriterion, Selection};
//!
//! let alignment = Alignment::new(vec![
//!     Record::new("A", "MKV-L"),
//!     Record::new("B", "MKVAL"),
//!     Record::new("C", "M---L"),
//!     Record::new("D", "MKVAL"),
//! ])?;
//!
//! let kept = filter(&alignment, &FilterCriterion::MaxGapFraction { threshold: 0.3 })?;
//! assert_eq!(kept.ids(), vec!["A", "B", "D"]);
//!
//! let reps = cluster_and_select(&alignment, &ClusterMethod::greedy(0.0), Selection::Centroid)?;
//! assert_eq!(reps.ids(), vec!["A", "B", "C"]);
//! # Ok::<(), msatools::MsaError>(())
//! ```

pub mod error;
pub mod identity;
pub mod model;
pub mod ops;
pub mod seqtools;
pub mod table;

pub use error::{MsaError, MsaResult};
pub use identity::{distance, pairwise_identity, ungapped_identity, DistanceMatrix, GAP};
pub use model::{Alignment, Record, Value};
