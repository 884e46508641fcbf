use crate::error::ApiError;
use crate::responses::FxDailyResponse;
use configuration::ApiConfig;
use core_types::TimeSeries;
use std::time::Duration;

const PROVIDER: &str = "Alpha Vantage";

/// Client for Alpha Vantage's daily FX endpoint.
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            client,
            &api_config.alpha_vantage_base_url,
            &api_config.alpha_vantage_key,
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetches the full history of daily closes for `from_symbol`/`to_symbol`.
    pub async fn fetch_fx_daily(
        &self,
        from_symbol: &str,
        to_symbol: &str,
    ) -> Result<TimeSeries, ApiError> {
        let url = format!("{}/query", self.base_url);
        let name = format!("{from_symbol}/{to_symbol}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "FX_DAILY"),
                ("from_symbol", from_symbol),
                ("to_symbol", to_symbol),
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Provider {
                provider: PROVIDER,
                message: format!("HTTP {status}: {text}"),
            });
        }

        let body: FxDailyResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if let Some(message) = body.provider_message() {
            return Err(ApiError::Provider {
                provider: PROVIDER,
                message: message.to_string(),
            });
        }
        let bars = body.time_series.ok_or_else(|| {
            ApiError::Deserialization(format!("response for {name} has no daily time series"))
        })?;

        let observations = bars
            .into_iter()
            .map(|(date, bar)| {
                let close = bar
                    .close
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ApiError::InvalidData {
                        series: name.clone(),
                        date,
                        value: bar.close.clone(),
                    })?;
                Ok((date, Some(close)))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let series = TimeSeries::from_observations(name, observations)?;
        tracing::debug!(series = series.name(), observations = series.len(), "Fetched FX closes.");
        Ok(series)
    }
}
