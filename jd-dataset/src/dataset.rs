use crate::error::{Error, LoadError};
use serde::Serialize;
use std::collections::HashSet;

/// One date of a dataset: the date label plus one value per catalog junction.
///
/// Values are positionally aligned with the owning dataset's catalog. Absent
/// readings are `None`; non-finite numbers are stored as absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub date: String,
    values: Vec<Option<f64>>,
}

impl Row {
    pub fn new(date: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect();
        Row {
            date: date.into(),
            values,
        }
    }

    /// Values in catalog order.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at a catalog position; `None` when absent or out of range.
    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied().flatten()
    }
}

/// An ordered, immutable time series keyed by date and junction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    junctions: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a junction catalog and rows aligned to it.
    ///
    /// Junction names must be unique and every row must carry exactly one
    /// value per junction.
    pub fn from_rows(junctions: Vec<String>, rows: Vec<Row>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(junctions.len());
        for junction in &junctions {
            if !seen.insert(junction.as_str()) {
                return Err(LoadError::DuplicateJunction(junction.clone()));
            }
        }
        for (index, row) in rows.iter().enumerate() {
            if row.values.len() != junctions.len() {
                return Err(LoadError::RowWidth {
                    row: index,
                    expected: junctions.len(),
                    found: row.values.len(),
                });
            }
        }
        Ok(Dataset { junctions, rows })
    }

    /// The junction catalog, in order of first appearance.
    pub fn junctions(&self) -> &[String] {
        &self.junctions
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of dates (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, junction: &str) -> bool {
        self.junctions.iter().any(|j| j == junction)
    }

    /// Catalog position of a junction.
    pub fn position(&self, junction: &str) -> Result<usize, Error> {
        self.junctions
            .iter()
            .position(|j| j == junction)
            .ok_or_else(|| Error::UnknownJunction(junction.to_string()))
    }

    /// The junction's values, one per row, in row order.
    pub fn values_of(&self, junction: &str) -> Result<Vec<Option<f64>>, Error> {
        let position = self.position(junction)?;
        Ok(self.rows.iter().map(|row| row.get(position)).collect())
    }

    /// The date labels, in row order.
    pub fn dates_of(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.date.clone()).collect()
    }

    /// Check the positional date-alignment precondition against another dataset.
    ///
    /// Only the row counts are enforced. Rows whose date labels disagree are
    /// reported through the log, since labels from different sheets are not
    /// guaranteed to be formatted alike.
    pub fn ensure_aligned(&self, other: &Dataset) -> Result<(), Error> {
        if self.len() != other.len() {
            return Err(Error::DatasetLengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        if let Some((index, (ours, theirs))) = self
            .rows
            .iter()
            .zip(&other.rows)
            .enumerate()
            .find(|(_, (a, b))| a.date != b.date)
        {
            log::warn!(
                "row {} date labels differ between aligned datasets: {} vs {}",
                index,
                ours.date,
                theirs.date
            );
        }
        Ok(())
    }
}
