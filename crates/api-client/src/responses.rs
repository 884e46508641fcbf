use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

// Provider field names are mapped explicitly; Alpha Vantage uses numbered, spaced keys.

/// The body of `GET /query?function=FX_DAILY`.
///
/// On failure Alpha Vantage still answers 200 but replaces the series with one
/// of the message fields.
#[derive(Debug, Clone, Deserialize)]
pub struct FxDailyResponse {
    #[serde(rename = "Time Series FX (Daily)")]
    pub time_series: Option<BTreeMap<NaiveDate, FxDailyBar>>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl FxDailyResponse {
    /// The first provider message present, if the body carries one.
    pub fn provider_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

/// One daily bar. Only the close is read; prices arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct FxDailyBar {
    #[serde(rename = "4. close")]
    pub close: String,
}

/// The body of `GET /fred/series/observations`.
#[derive(Debug, Clone, Deserialize)]
pub struct FredObservationsResponse {
    pub observations: Vec<FredObservation>,
}

/// A single observation. `value` is `"."` when FRED has no data for the date.
#[derive(Debug, Clone, Deserialize)]
pub struct FredObservation {
    pub date: NaiveDate,
    pub value: String,
}

/// Represents an error response from the FRED API.
#[derive(Debug, Clone, Deserialize)]
pub struct FredErrorResponse {
    pub error_message: String,
}
