//! Conversion between alignments and in-memory column tables.
//!
//! A table is a list of named columns of equal length. The `sequence` column
//! is mandatory; every other column becomes an auxiliary record field.

use std::collections::BTreeSet;

use crate::error::{MsaError, MsaResult};
use crate::model::{Alignment, Record, Value};

/// Name of the mandatory sequence column.
pub const SEQUENCE_COLUMN: &str = "sequence";

/// Name of the identifier column produced by [`Alignment::to_columns`].
pub const ID_COLUMN: &str = "id";

/// A named column of a table.
pub type Column = (String, Vec<Value>);

impl Alignment {
    /// Builds an alignment from a column table.
    ///
    /// `id_column` names the column holding record identifiers; without it,
    /// the zero-based row index is used as identifier.
    pub fn from_columns(columns: Vec<Column>, id_column: Option<&str>) -> MsaResult<Self> {
        let rows = columns
            .iter()
            .find(|(name, _)| name == SEQUENCE_COLUMN)
            .map(|(_, values)| values.len())
            .ok_or_else(|| MsaError::MissingColumn(SEQUENCE_COLUMN.to_string()))?;

        for (name, values) in &columns {
            if values.len() != rows {
                return Err(MsaError::RaggedColumn {
                    column: name.clone(),
                    expected: rows,
                    found: values.len(),
                });
            }
        }
        if let Some(id_name) = id_column {
            if !columns.iter().any(|(name, _)| name == id_name) {
                return Err(MsaError::MissingColumn(id_name.to_string()));
            }
        }

        let mut records: Vec<Record> = (0..rows)
            .map(|row| Record::new(row.to_string(), String::new()))
            .collect();
        for (name, values) in columns {
            if name == SEQUENCE_COLUMN {
                for (record, value) in records.iter_mut().zip(values) {
                    record.sequence = match value {
                        Value::Text(s) => s,
                        other => {
                            return Err(MsaError::InvalidParameter(format!(
                                "column '{}' must hold text, found '{}'",
                                SEQUENCE_COLUMN, other
                            )))
                        }
                    };
                }
            } else if Some(name.as_str()) == id_column {
                for (record, value) in records.iter_mut().zip(values) {
                    record.id = value.to_string();
                }
            } else {
                for (record, value) in records.iter_mut().zip(values) {
                    record.fields.insert(name.clone(), value);
                }
            }
        }

        Alignment::new(records)
    }

    /// Exports the alignment as a column table: `id`, `sequence`, then each
    /// auxiliary field in name order (`None` where a record lacks it).
    pub fn to_columns(&self) -> Vec<(String, Vec<Option<Value>>)> {
        let field_names: BTreeSet<&str> = self
            .iter()
            .flat_map(|r| r.fields.keys().map(String::as_str))
            .collect();

        let mut columns = Vec::with_capacity(field_names.len() + 2);
        columns.push((
            ID_COLUMN.to_string(),
            self.iter().map(|r| Some(Value::from(r.id.as_str()))).collect(),
        ));
        columns.push((
            SEQUENCE_COLUMN.to_string(),
            self.iter()
                .map(|r| Some(Value::from(r.sequence.as_str())))
                .collect(),
        ));
        for name in field_names {
            columns.push((
                name.to_string(),
                self.iter().map(|r| r.field(name).cloned()).collect(),
            ));
        }
        columns
    }
}
