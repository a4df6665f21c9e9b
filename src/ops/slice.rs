//! Column slicing and cropping.

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MsaError, MsaResult};
use crate::identity::is_gap;
use crate::model::{ascii_string, Alignment};

/// How to choose the span kept by [`crop_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "mode"))]
pub enum CropMode {
    /// Keep columns `start..end` (end exclusive).
    Span { start: usize, end: usize },
    /// Keep the footprint of a reference record: from its first to its last
    /// non-gap column.
    Reference { id: String },
}

/// Keeps the given columns, in the given order.
///
/// Indices may repeat or come in any order; each output sequence is the
/// concatenation of the input symbols at those columns.
pub fn slice(alignment: &Alignment, columns: &[usize]) -> MsaResult<Alignment> {
    let width = alignment.width()?;
    if let Some(&index) = columns.iter().find(|&&c| c >= width) {
        return Err(MsaError::IndexOutOfRange { index, width });
    }

    debug!(
        "slice: {} columns out of {} for {} records",
        columns.len(),
        width,
        alignment.len()
    );
    Ok(alignment.map_sequences(|record| {
        let bytes = record.as_bytes();
        ascii_string(columns.iter().map(|&c| bytes[c]))
    }))
}

/// Keeps the contiguous columns `start..end`.
///
/// Equivalent to slicing with `start..end` but checks the span as a whole.
pub fn crop(alignment: &Alignment, start: usize, end: usize) -> MsaResult<Alignment> {
    let width = alignment.width()?;
    if start >= end || end > width {
        return Err(MsaError::InvalidRange { start, end, width });
    }

    debug!("crop: columns {}..{} of {}", start, end, width);
    Ok(alignment.map_sequences(|record| record.sequence[start..end].to_string()))
}

/// Crops every record to the footprint of the record `id`: from its first
/// to its last non-gap column, inclusive.
///
/// Fails with [`MsaError::UnknownRecord`] if no record has that identifier,
/// and with [`MsaError::InvalidRange`] if the reference is all gaps.
pub fn crop_to_reference(alignment: &Alignment, id: &str) -> MsaResult<Alignment> {
    let width = alignment.width()?;
    let reference = alignment
        .get_by_id(id)
        .ok_or_else(|| MsaError::UnknownRecord(id.to_string()))?;

    let bytes = reference.as_bytes();
    let first = bytes.iter().position(|&b| !is_gap(b));
    let last = bytes.iter().rposition(|&b| !is_gap(b));
    match (first, last) {
        (Some(start), Some(last)) => crop(alignment, start, last + 1),
        _ => Err(MsaError::InvalidRange {
            start: 0,
            end: 0,
            width,
        }),
    }
}

/// Crops according to `mode`.
pub fn crop_with(alignment: &Alignment, mode: &CropMode) -> MsaResult<Alignment> {
    match mode {
        CropMode::Span { start, end } => crop(alignment, *start, *end),
        CropMode::Reference { id } => crop_to_reference(alignment, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn example() -> Alignment {
        Alignment::new(vec![
            Record::new("A", "MKV-L"),
            Record::new("B", "MKVAL").with_field("score", 0.5),
            Record::new("C", "M---L"),
        ])
        .unwrap()
    }

    fn sequences(alignment: &Alignment) -> Vec<&str> {
        alignment.iter().map(|r| r.sequence.as_str()).collect()
    }

    #[test]
    fn test_slice_reorders_and_duplicates() {
        let sliced = slice(&example(), &[4, 0, 0]).unwrap();
        assert_eq!(sequences(&sliced), vec!["LMM", "LMM", "LMM"]);
        assert_eq!(sliced.width(), Ok(3));
    }

    #[test]
    fn test_slice_keeps_fields() {
        let sliced = slice(&example(), &[1, 3]).unwrap();
        assert_eq!(sequences(&sliced), vec!["K-", "KA", "--"]);
        assert_eq!(sliced.get(1).unwrap().fields, example().get(1).unwrap().fields);
    }

    #[test]
    fn test_slice_identity() {
        let alignment = example();
        let all: Vec<usize> = (0..5).collect();
        assert_eq!(slice(&alignment, &all).unwrap(), alignment);
    }

    #[test]
    fn test_slice_out_of_range() {
        assert_eq!(
            slice(&example(), &[0, 5]),
            Err(MsaError::IndexOutOfRange { index: 5, width: 5 })
        );
    }

    #[test]
    fn test_slice_unaligned() {
        let unaligned =
            Alignment::new(vec![Record::new("a", "MKV"), Record::new("b", "M")]).unwrap();
        assert!(matches!(
            slice(&unaligned, &[0]),
            Err(MsaError::ShapeMismatch { min: 1, max: 3 })
        ));
    }

    #[test]
    fn test_crop() {
        let cropped = crop(&example(), 1, 4).unwrap();
        assert_eq!(sequences(&cropped), vec!["KV-", "KVA", "---"]);
    }

    #[test]
    fn test_crop_invalid_ranges() {
        assert!(matches!(crop(&example(), 2, 2), Err(MsaError::InvalidRange { .. })));
        assert!(matches!(crop(&example(), 3, 1), Err(MsaError::InvalidRange { .. })));
        assert!(matches!(crop(&example(), 0, 6), Err(MsaError::InvalidRange { .. })));
    }

    #[test]
    fn test_crop_equals_slice() {
        let alignment = example();
        for start in 0..5 {
            for end in (start + 1)..=5 {
                let columns: Vec<usize> = (start..end).collect();
                assert_eq!(
                    crop(&alignment, start, end).unwrap(),
                    slice(&alignment, &columns).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_crop_to_reference() {
        let alignment = Alignment::new(vec![
            Record::new("query", "--MKV-L--"),
            Record::new("hit", "AAMKVALCC"),
        ])
        .unwrap();
        let cropped = crop_to_reference(&alignment, "query").unwrap();
        assert_eq!(sequences(&cropped), vec!["MKV-L", "MKVAL"]);
    }

    #[test]
    fn test_crop_to_reference_without_flanking_gaps() {
        let alignment = example();
        assert_eq!(crop_to_reference(&alignment, "A").unwrap(), alignment);
    }

    #[test]
    fn test_crop_to_reference_errors() {
        assert_eq!(
            crop_to_reference(&example(), "Z"),
            Err(MsaError::UnknownRecord("Z".to_string()))
        );
        let all_gaps =
            Alignment::new(vec![Record::new("g", "---"), Record::new("h", "MKV")]).unwrap();
        assert!(matches!(
            crop_to_reference(&all_gaps, "g"),
            Err(MsaError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_crop_with() {
        let alignment = example();
        assert_eq!(
            crop_with(&alignment, &CropMode::Span { start: 0, end: 2 }).unwrap(),
            crop(&alignment, 0, 2).unwrap()
        );
        assert_eq!(
            crop_with(&alignment, &CropMode::Reference { id: "C".to_string() }).unwrap(),
            alignment
        );
    }
}
