use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("No common dates across input series: {}", .series.join(", "))]
    NoOverlap { series: Vec<String> },

    #[error("Column '{column}' has at most {available} consecutive observations, fewer than the {window}-period window")]
    InsufficientHistory {
        column: String,
        window: usize,
        available: usize,
    },

    #[error("Series '{series}' has a missing value on {date} inside the aligned range")]
    MissingValue { series: String, date: NaiveDate },

    #[error("Input columns differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Table error: {0}")]
    Table(#[from] CoreError),
}
