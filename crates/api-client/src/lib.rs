use crate::error::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use configuration::{ApiConfig, SeriesConfig};
use core_types::{CurrencyPair, MarketSnapshot, TimeSeries};

pub mod alpha_vantage;
pub mod error;
pub mod fred;
pub mod responses;

// --- Public API ---
pub use alpha_vantage::AlphaVantageClient;
pub use fred::FredClient;

/// The abstract interface for retrieving the raw input series.
/// The snapshot fetch only relies on this trait, allowing the underlying
/// providers (live or mock) to be swapped out.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// Fetches daily FX closes for a currency pair.
    async fn fetch_fx_daily(
        &self,
        from_symbol: &str,
        to_symbol: &str,
    ) -> Result<TimeSeries, ApiError>;

    /// Fetches a short-term interest-rate series, in percent.
    async fn fetch_interest_rate(&self, series_id: &str) -> Result<TimeSeries, ApiError>;
}

/// The concrete fetcher: FX from Alpha Vantage, rates from FRED.
#[derive(Clone)]
pub struct MarketDataClient {
    alpha_vantage: AlphaVantageClient,
    fred: FredClient,
}

impl MarketDataClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            alpha_vantage: AlphaVantageClient::new(api_config)?,
            fred: FredClient::new(api_config)?,
        })
    }
}

#[async_trait]
impl SeriesFetcher for MarketDataClient {
    async fn fetch_fx_daily(
        &self,
        from_symbol: &str,
        to_symbol: &str,
    ) -> Result<TimeSeries, ApiError> {
        self.alpha_vantage.fetch_fx_daily(from_symbol, to_symbol).await
    }

    async fn fetch_interest_rate(&self, series_id: &str) -> Result<TimeSeries, ApiError> {
        self.fred.fetch_observations(series_id).await
    }
}

/// Fetches the five input series concurrently and returns them as one snapshot.
///
/// The snapshot is only returned once every request has completed; the first
/// failure aborts the whole fetch. `on_fetched` is called with each series as
/// it arrives.
pub async fn fetch_snapshot<F>(
    fetcher: &dyn SeriesFetcher,
    series: &SeriesConfig,
    on_fetched: F,
) -> Result<MarketSnapshot, ApiError>
where
    F: Fn(&TimeSeries) + Sync,
{
    let on_fetched = &on_fetched;
    let rate = move |id: &str| {
        let id = id.to_string();
        async move {
            let s = fetcher.fetch_interest_rate(&id).await?;
            on_fetched(&s);
            Ok::<_, ApiError>(s)
        }
    };
    let fx = move |pair: CurrencyPair| async move {
        let s = fetcher.fetch_fx_daily(pair.from_symbol(), pair.to_symbol()).await?;
        on_fetched(&s);
        Ok::<_, ApiError>(s)
    };

    let (japan, us, euro, usd_jpy, eur_jpy) = tokio::try_join!(
        rate(&series.japan_rate),
        rate(&series.us_rate),
        rate(&series.euro_rate),
        fx(CurrencyPair::UsdJpy),
        fx(CurrencyPair::EurJpy),
    )?;

    Ok(MarketSnapshot::new(Utc::now(), japan, us, euro, usd_jpy, eur_jpy))
}
