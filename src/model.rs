//! Data model for alignments.
//!
//! This module contains the data structures every operation works on:
//! - `Value`: an auxiliary scalar attached to a record
//! - `Record`: one sequence with its identifier and auxiliary fields
//! - `Alignment`: an ordered, immutable collection of records
//!
//! Operations never mutate an `Alignment`; they read it and build a new one.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MsaError, MsaResult};
use crate::identity::is_gap;

/// An auxiliary scalar field value (e.g. a confidence score).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns the text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A single sequence entry of an alignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// Identifier, unique within an alignment
    pub id: String,
    /// Aligned sequence (residues and `-` gaps), case preserved
    pub sequence: String,
    /// Auxiliary fields, passed through untouched by operations unaware of them
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new record without auxiliary fields.
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds an auxiliary field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Looks up an auxiliary field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the sequence as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    /// Gets a character at a specific column.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.as_bytes().get(pos).map(|&b| b as char)
    }

    /// Number of gap symbols in the sequence.
    pub fn gap_count(&self) -> usize {
        self.as_bytes().iter().filter(|&&b| is_gap(b)).count()
    }

    /// Number of non-gap symbols in the sequence.
    pub fn residue_count(&self) -> usize {
        self.len() - self.gap_count()
    }

    /// Fraction of the sequence made of gaps (0 for an empty sequence).
    pub fn gap_fraction(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.gap_count() as f64 / self.len() as f64
        }
    }

    /// Copy of this record with a different sequence, fields kept.
    pub(crate) fn with_sequence(&self, sequence: String) -> Self {
        Self {
            id: self.id.clone(),
            sequence,
            fields: self.fields.clone(),
        }
    }
}

/// An ordered collection of records.
///
/// Records may have unequal lengths (e.g. an unaligned set awaiting a crop);
/// operations that need a common width ask for it through [`Alignment::width`]
/// and fail with [`MsaError::ShapeMismatch`] otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    records: Vec<Record>,
    /// Common length of all records, if they share one
    width: Option<usize>,
    /// Warning message if records have different lengths
    warning: Option<String>,
}

impl Alignment {
    /// Creates a new alignment from a vector of records.
    ///
    /// Fails if two records share an identifier or if a sequence contains
    /// non-ASCII symbols. Unequal lengths are accepted but remembered.
    pub fn new(records: Vec<Record>) -> MsaResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(MsaError::DuplicateIdentifier(record.id.clone()));
            }
            if !record.sequence.is_ascii() {
                return Err(MsaError::NonAsciiSequence(record.id.clone()));
            }
        }
        let alignment = Self::from_records(records);
        if let Some(warning) = &alignment.warning {
            warn!("{}", warning);
        }
        Ok(alignment)
    }

    /// Creates an alignment with no records.
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Builds an alignment from records already known to be valid
    /// (a subset or per-record rewrite of a validated alignment).
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        let (width, warning) = Self::validate_lengths(&records);
        Self {
            records,
            width,
            warning,
        }
    }

    /// Checks whether all records have the same length.
    fn validate_lengths(records: &[Record]) -> (Option<usize>, Option<String>) {
        let Some(first) = records.first() else {
            return (Some(0), None);
        };
        let first_len = first.len();
        if records.iter().all(|r| r.len() == first_len) {
            (Some(first_len), None)
        } else {
            let (min, max) = length_bounds(records);
            let warning = format!(
                "Sequences have different lengths (min: {}, max: {}). Not a valid alignment.",
                min, max
            );
            (None, Some(warning))
        }
    }

    /// Returns the alignment width, failing if records have unequal lengths.
    ///
    /// An empty alignment has width 0.
    pub fn width(&self) -> MsaResult<usize> {
        match self.width {
            Some(width) => Ok(width),
            None => {
                let (min, max) = length_bounds(&self.records);
                Err(MsaError::ShapeMismatch { min, max })
            }
        }
    }

    /// Returns true if every record has the same length.
    pub fn is_aligned(&self) -> bool {
        self.width.is_some()
    }

    /// Warning recorded at construction, if records have different lengths.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the alignment has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets a record by row index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Gets a record by identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Row index of the record with the given identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// All records, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Identifiers in row order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    /// Consumes the alignment, returning its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns a copy with every sequence uppercased.
    pub fn normalize_case(&self) -> Self {
        self.map_sequences(|r| r.sequence.to_ascii_uppercase())
    }

    /// Builds a new alignment by rewriting each sequence, fields kept.
    pub(crate) fn map_sequences<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Record) -> String,
    {
        Self::from_records(
            self.records
                .iter()
                .map(|r| r.with_sequence(f(r)))
                .collect(),
        )
    }

    /// Builds a new alignment holding copies of the records at `indices`.
    pub(crate) fn subset<I>(&self, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::from_records(
            indices
                .into_iter()
                .map(|i| self.records[i].clone())
                .collect(),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn length_bounds(records: &[Record]) -> (usize, usize) {
    let min = records.iter().map(Record::len).min().unwrap_or(0);
    let max = records.iter().map(Record::len).max().unwrap_or(0);
    (min, max)
}

/// Builds a sequence string from ASCII bytes.
pub(crate) fn ascii_string<I>(bytes: I) -> String
where
    I: IntoIterator<Item = u8>,
{
    bytes.into_iter().map(char::from).collect()
}
