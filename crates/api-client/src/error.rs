use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{provider} returned an error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Series '{series}' has an unparsable value '{value}' on {date}")]
    InvalidData {
        series: String,
        date: NaiveDate,
        value: String,
    },

    #[error("Invalid series data: {0}")]
    Table(#[from] CoreError),
}
