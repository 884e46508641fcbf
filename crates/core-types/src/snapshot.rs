use crate::enums::{CurrencyPair, columns};
use crate::series::TimeSeries;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The five raw input series of one analysis run, as delivered by the fetcher.
///
/// Each series is renamed to its table column name on construction, so the
/// snapshot can be handed straight to the calendar aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub japan_rate: TimeSeries,
    pub us_rate: TimeSeries,
    pub euro_rate: TimeSeries,
    pub usd_jpy: TimeSeries,
    pub eur_jpy: TimeSeries,
}

impl MarketSnapshot {
    pub fn new(
        fetched_at: DateTime<Utc>,
        japan_rate: TimeSeries,
        us_rate: TimeSeries,
        euro_rate: TimeSeries,
        usd_jpy: TimeSeries,
        eur_jpy: TimeSeries,
    ) -> Self {
        Self {
            fetched_at,
            japan_rate: japan_rate.with_name(columns::JAPAN),
            us_rate: us_rate.with_name(columns::US),
            euro_rate: euro_rate.with_name(columns::EUROZONE),
            usd_jpy: usd_jpy.with_name(CurrencyPair::UsdJpy.close_column()),
            eur_jpy: eur_jpy.with_name(CurrencyPair::EurJpy.close_column()),
        }
    }

    pub fn fx(&self, pair: CurrencyPair) -> &TimeSeries {
        match pair {
            CurrencyPair::UsdJpy => &self.usd_jpy,
            CurrencyPair::EurJpy => &self.eur_jpy,
        }
    }

    /// All inputs in table column order: rates first, then FX closes.
    pub fn series(&self) -> [&TimeSeries; 5] {
        [
            &self.japan_rate,
            &self.us_rate,
            &self.euro_rate,
            &self.usd_jpy,
            &self.eur_jpy,
        ]
    }

    /// Restricts every input to an inclusive date window.
    pub fn between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            fetched_at: self.fetched_at,
            japan_rate: self.japan_rate.between(from, to),
            us_rate: self.us_rate.between(from, to),
            euro_rate: self.euro_rate.between(from, to),
            usd_jpy: self.usd_jpy.between(from, to),
            eur_jpy: self.eur_jpy.between(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_are_renamed_to_columns() {
        let snapshot = MarketSnapshot::new(
            Utc::now(),
            TimeSeries::new("IR3TIB01JPM156N"),
            TimeSeries::new("IR3TIB01USM156N"),
            TimeSeries::new("IR3TIB01EZM156N"),
            TimeSeries::new("FX_DAILY USD/JPY"),
            TimeSeries::new("FX_DAILY EUR/JPY"),
        );
        let names: Vec<_> = snapshot.series().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Japan", "US", "Eurozone", "USD/JPY", "EUR/JPY"]);
        assert_eq!(snapshot.fx(CurrencyPair::EurJpy).name(), "EUR/JPY");
    }
}
