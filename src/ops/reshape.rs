//! Whole-alignment reshaping: length unification, de-duplication, sorting
//! relative to the query and depth truncation.
//!
//! The sort helpers treat the first record as the query sequence: it always
//! stays in first position.

use std::cmp::Ordering;
use std::collections::HashSet;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MsaError, MsaResult};
use crate::identity::{pairwise_identity, GAP};
use crate::model::Alignment;

/// Target length for [`unify_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthTarget {
    /// Length of the first record
    #[default]
    First,
    /// Length of the longest record
    Max,
    /// Length of the shortest record
    Min,
    /// An explicit length
    Exact(usize),
}

/// Which copy of a duplicated sequence [`drop_duplicates`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeepDuplicate {
    #[default]
    First,
    Last,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Pads (with gaps, on the right) or truncates every record to a common length.
///
/// This is the one operation that accepts records of unequal length; its
/// output is always aligned.
pub fn unify_length(alignment: &Alignment, target: LengthTarget) -> Alignment {
    if alignment.is_empty() {
        return alignment.clone();
    }
    let lengths = alignment.iter().map(|r| r.len());
    let length = match target {
        LengthTarget::First => alignment.get(0).map_or(0, |r| r.len()),
        LengthTarget::Max => lengths.max().unwrap_or(0),
        LengthTarget::Min => lengths.min().unwrap_or(0),
        LengthTarget::Exact(n) => n,
    };

    debug!("unify_length: {} records to {} columns", alignment.len(), length);
    alignment.map_sequences(|record| {
        let mut seq = record.sequence.clone();
        if seq.len() > length {
            seq.truncate(length);
        } else {
            seq.extend(std::iter::repeat(GAP as char).take(length - seq.len()));
        }
        seq
    })
}

/// Removes records whose sequence repeats another one, keeping either the
/// first or the last copy. Surviving records keep their relative order.
pub fn drop_duplicates(alignment: &Alignment, keep: KeepDuplicate) -> Alignment {
    let mut seen = HashSet::with_capacity(alignment.len());
    let mut kept: Vec<usize> = match keep {
        KeepDuplicate::First => (0..alignment.len())
            .filter(|&i| seen.insert(alignment.records()[i].sequence.as_str()))
            .collect(),
        KeepDuplicate::Last => (0..alignment.len())
            .rev()
            .filter(|&i| seen.insert(alignment.records()[i].sequence.as_str()))
            .collect(),
    };
    kept.sort_unstable();

    debug!(
        "drop_duplicates: kept {} of {} records",
        kept.len(),
        alignment.len()
    );
    alignment.subset(kept)
}

/// Sorts all records but the query by a per-record key, stably.
fn sort_after_query<F>(alignment: &Alignment, order: SortOrder, key: F) -> Alignment
where
    F: Fn(usize) -> f64,
{
    if alignment.len() < 2 {
        return alignment.clone();
    }
    let mut rest: Vec<(usize, f64)> = (1..alignment.len()).map(|i| (i, key(i))).collect();
    rest.sort_by(|(_, a), (_, b)| {
        let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    alignment.subset(std::iter::once(0).chain(rest.into_iter().map(|(i, _)| i)))
}

/// Sorts records by their number of gaps, keeping the query first.
pub fn sort_by_gaps(alignment: &Alignment, order: SortOrder) -> Alignment {
    let records = alignment.records();
    sort_after_query(alignment, order, |i| records[i].gap_count() as f64)
}

/// Sorts records by identity to the query (first record), keeping the query
/// first. Records with no comparable column sort as identity 0.
pub fn sort_by_identity(alignment: &Alignment, order: SortOrder) -> MsaResult<Alignment> {
    alignment.width()?;
    let records = alignment.records();
    let Some(query) = records.first() else {
        return Ok(alignment.clone());
    };
    Ok(sort_after_query(alignment, order, |i| {
        pairwise_identity(query.as_bytes(), records[i].as_bytes()).unwrap_or(0.0)
    }))
}

/// Keeps at most the first `depth` records.
pub fn truncate_depth(alignment: &Alignment, depth: usize) -> MsaResult<Alignment> {
    if depth == 0 {
        return Err(MsaError::InvalidParameter(
            "depth must be at least 1".to_string(),
        ));
    }
    Ok(alignment.subset(0..depth.min(alignment.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn alignment(rows: &[(&str, &str)]) -> Alignment {
        Alignment::new(rows.iter().map(|&(id, seq)| Record::new(id, seq)).collect()).unwrap()
    }

    fn sequences(alignment: &Alignment) -> Vec<&str> {
        alignment.iter().map(|r| r.sequence.as_str()).collect()
    }

    #[test]
    fn test_unify_length_targets() {
        let ragged = alignment(&[("a", "MKV"), ("b", "MKVAL"), ("c", "M")]);

        let first = unify_length(&ragged, LengthTarget::First);
        assert_eq!(sequences(&first), vec!["MKV", "MKV", "M--"]);

        let max = unify_length(&ragged, LengthTarget::Max);
        assert_eq!(sequences(&max), vec!["MKV--", "MKVAL", "M----"]);
        assert_eq!(max.width(), Ok(5));

        let min = unify_length(&ragged, LengthTarget::Min);
        assert_eq!(sequences(&min), vec!["M", "M", "M"]);

        let exact = unify_length(&ragged, LengthTarget::Exact(4));
        assert_eq!(sequences(&exact), vec!["MKV-", "MKVA", "M---"]);
    }

    #[test]
    fn test_unify_length_empty() {
        let empty = Alignment::empty();
        assert_eq!(unify_length(&empty, LengthTarget::Max), empty);
    }

    #[test]
    fn test_drop_duplicates() {
        let dups = alignment(&[("a", "MK"), ("b", "MV"), ("c", "MK"), ("d", "MV"), ("e", "MA")]);
        assert_eq!(
            drop_duplicates(&dups, KeepDuplicate::First).ids(),
            vec!["a", "b", "e"]
        );
        assert_eq!(
            drop_duplicates(&dups, KeepDuplicate::Last).ids(),
            vec!["c", "d", "e"]
        );
    }

    #[test]
    fn test_sort_by_gaps_keeps_query_first() {
        let aln = alignment(&[("q", "M---L"), ("a", "MK--L"), ("b", "MKVAL"), ("c", "-----")]);
        assert_eq!(
            sort_by_gaps(&aln, SortOrder::Ascending).ids(),
            vec!["q", "b", "a", "c"]
        );
        assert_eq!(
            sort_by_gaps(&aln, SortOrder::Descending).ids(),
            vec!["q", "c", "a", "b"]
        );
    }

    #[test]
    fn test_sort_by_identity() {
        let aln = alignment(&[("q", "MKVAL"), ("a", "MRRAL"), ("b", "MKVAL"), ("c", "WWWWW")]);
        assert_eq!(
            sort_by_identity(&aln, SortOrder::Descending).unwrap().ids(),
            vec!["q", "b", "a", "c"]
        );
        assert_eq!(
            sort_by_identity(&aln, SortOrder::Ascending).unwrap().ids(),
            vec!["q", "c", "a", "b"]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let aln = alignment(&[("q", "MK"), ("a", "M-"), ("b", "K-"), ("c", "MK")]);
        assert_eq!(
            sort_by_gaps(&aln, SortOrder::Ascending).ids(),
            vec!["q", "c", "a", "b"]
        );
    }

    #[test]
    fn test_truncate_depth() {
        let aln = alignment(&[("a", "MK"), ("b", "MV"), ("c", "MA")]);
        assert_eq!(truncate_depth(&aln, 2).unwrap().ids(), vec!["a", "b"]);
        assert_eq!(truncate_depth(&aln, 10).unwrap(), aln);
        assert!(truncate_depth(&aln, 0).is_err());
    }
}
