use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Series '{series}' contains more than one observation for {date}")]
    DuplicateDate { series: String, date: NaiveDate },

    #[error("Column '{0}' already exists in the table")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} rows but the table index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{0}' not found in the table")]
    ColumnNotFound(String),
}
