use crate::error::CoreError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// A single named column of an `AlignedTable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Multiple named numeric columns sharing one ascending date index.
///
/// The table is append-only: each column is written exactly once and is never
/// removed or replaced, so a stage can only read columns whose producer has
/// already finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl AlignedTable {
    /// Creates an empty table over the given dates. The index is sorted and deduplicated.
    pub fn from_index<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        Self {
            dates: dates.into_iter().collect(),
            columns: Vec::new(),
        }
    }

    /// Appends a new column. Fails if the name is taken or the length does not match the index.
    pub fn append_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CoreError::DuplicateColumn(name));
        }
        if values.len() != self.dates.len() {
            return Err(CoreError::LengthMismatch {
                column: name,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn column(&self, name: &str) -> Result<&[Option<f64>], CoreError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| CoreError::ColumnNotFound(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the date and every column's value at row `index`.
    pub fn row(&self, index: usize) -> Option<(NaiveDate, Vec<(&str, Option<f64>)>)> {
        let date = *self.dates.get(index)?;
        let values = self
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.values[index]))
            .collect();
        Some((date, values))
    }
}
