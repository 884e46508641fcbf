use crate::error::ApiError;
use crate::responses::{FredErrorResponse, FredObservationsResponse};
use configuration::ApiConfig;
use core_types::TimeSeries;
use std::time::Duration;

const PROVIDER: &str = "FRED";

/// FRED's placeholder for a date without data.
const MISSING_MARKER: &str = ".";

/// Client for the FRED series observations endpoint.
#[derive(Clone)]
pub struct FredClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &api_config.fred_base_url, &api_config.fred_key))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetches every observation of `series_id`. The missing marker becomes `None`.
    pub async fn fetch_observations(&self, series_id: &str) -> Result<TimeSeries, ApiError> {
        let url = format!("{}/fred/series/observations", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<FredErrorResponse>(&text)
                .map(|e| e.error_message)
                .unwrap_or(text);
            return Err(ApiError::Provider {
                provider: PROVIDER,
                message: format!("HTTP {status} for {series_id}: {message}"),
            });
        }

        let body: FredObservationsResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        let observations = body
            .observations
            .into_iter()
            .map(|obs| {
                let value = obs.value.trim();
                if value == MISSING_MARKER {
                    return Ok((obs.date, None));
                }
                // `f64::from_str` also accepts "NaN" and "inf".
                let parsed = value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ApiError::InvalidData {
                        series: series_id.to_string(),
                        date: obs.date,
                        value: obs.value.clone(),
                    })?;
                Ok((obs.date, Some(parsed)))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let series = TimeSeries::from_observations(series_id, observations)?;
        tracing::debug!(
            series = series_id,
            observations = series.len(),
            missing = series.missing_count(),
            "Fetched FRED series."
        );
        Ok(series)
    }
}
