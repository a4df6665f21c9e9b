//! Record filtering.

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_fraction, MsaError, MsaResult};
use crate::identity::ungapped_identity;
use crate::model::{Alignment, Record};

/// Criterion a record must satisfy to be kept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "criterion"))]
pub enum FilterCriterion {
    /// Keep records whose identity to `reference` (over columns where
    /// neither has a gap) is at least `threshold`.
    MinIdentityToReference { reference: String, threshold: f64 },
    /// Keep records whose identity to `reference` is strictly below
    /// `threshold`: exactly the records `MinIdentityToReference` drops.
    BelowIdentityToReference { reference: String, threshold: f64 },
    /// Keep records whose gap fraction is at most `threshold`.
    MaxGapFraction { threshold: f64 },
    /// Keep records whose number of residues lies in `[min_len, max_len]`.
    CoverageRange { min_len: usize, max_len: usize },
}

impl FilterCriterion {
    /// Checks the criterion against the alignment, before any record is read.
    fn validate(&self, alignment: &Alignment) -> MsaResult<()> {
        match self {
            FilterCriterion::MinIdentityToReference {
                reference,
                threshold,
            }
            | FilterCriterion::BelowIdentityToReference {
                reference,
                threshold,
            } => {
                check_fraction("identity threshold", *threshold)?;
                if !reference.is_ascii() {
                    return Err(MsaError::InvalidParameter(
                        "reference sequence contains non-ASCII symbols".to_string(),
                    ));
                }
                if alignment.is_empty() {
                    return Ok(());
                }
                let width = alignment.width()?;
                if reference.len() != width {
                    return Err(MsaError::InvalidParameter(format!(
                        "reference sequence has length {}, alignment width is {}",
                        reference.len(),
                        width
                    )));
                }
                Ok(())
            }
            FilterCriterion::MaxGapFraction { threshold } => {
                check_fraction("gap fraction threshold", *threshold)
            }
            FilterCriterion::CoverageRange { min_len, max_len } => {
                if min_len > max_len {
                    Err(MsaError::InvalidParameter(format!(
                        "coverage range is empty (min {} > max {})",
                        min_len, max_len
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Returns true if the record satisfies the criterion.
    fn keeps(&self, record: &Record) -> bool {
        match self {
            FilterCriterion::MinIdentityToReference {
                reference,
                threshold,
            } => identity_to(record, reference) >= *threshold,
            FilterCriterion::BelowIdentityToReference {
                reference,
                threshold,
            } => identity_to(record, reference) < *threshold,
            FilterCriterion::MaxGapFraction { threshold } => record.gap_fraction() <= *threshold,
            FilterCriterion::CoverageRange { min_len, max_len } => {
                (*min_len..=*max_len).contains(&record.residue_count())
            }
        }
    }
}

/// Identity to the reference over ungapped columns, 0 when undefined.
fn identity_to(record: &Record, reference: &str) -> f64 {
    ungapped_identity(record.as_bytes(), reference.as_bytes()).unwrap_or(0.0)
}

/// Keeps the records satisfying `criterion`, in their original order.
///
/// Removing every record is not an error: the result is then an empty
/// alignment.
pub fn filter(alignment: &Alignment, criterion: &FilterCriterion) -> MsaResult<Alignment> {
    criterion.validate(alignment)?;

    let kept: Vec<usize> = alignment
        .iter()
        .enumerate()
        .filter(|(_, record)| criterion.keeps(record))
        .map(|(i, _)| i)
        .collect();

    debug!(
        "filter {:?}: kept {} of {} records",
        criterion,
        kept.len(),
        alignment.len()
    );
    Ok(alignment.subset(kept))
}
