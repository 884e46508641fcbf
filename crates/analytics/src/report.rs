use crate::error::AnalyticsError;
use crate::performance::sample_std_dev;
use chrono::NaiveDate;
use core_types::{AlignedTable, CurrencyPair};
use serde::Serialize;

/// Headline metrics of one carry trade over the aligned period.
///
/// Every ratio is `None` when it cannot be computed (no defined rows, zero drawdown).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrySummary {
    pub pair: CurrencyPair,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Number of defined carry returns.
    pub observations: usize,
    pub final_growth: Option<f64>,
    pub total_return: Option<f64>,
    pub annualized_return: Option<f64>,
    /// Full-sample volatility, annualized.
    pub annualized_volatility: Option<f64>,
    /// Worst peak-to-trough loss over the whole period.
    pub max_drawdown: Option<f64>,
    pub latest_volatility: Option<f64>,
    pub calmar_ratio: Option<f64>, // None when there was no drawdown
}

impl CarrySummary {
    /// Builds the summary from the pair's carry, growth, volatility and drawdown columns.
    pub fn from_table(
        table: &AlignedTable,
        pair: CurrencyPair,
        periods_per_year: f64,
    ) -> Result<Self, AnalyticsError> {
        let carry: Vec<f64> = table.column(pair.carry_column())?.iter().flatten().copied().collect();
        let final_growth = last_defined(table.column(pair.growth_column())?);
        let max_drawdown = last_defined(table.column(pair.drawdown_column())?);
        let latest_volatility = last_defined(table.column(pair.volatility_column())?);

        let observations = carry.len();
        let total_return = final_growth.map(|g| g - 1.0);
        let annualized_return = match final_growth {
            Some(g) if g > 0.0 && observations > 0 => {
                Some(g.powf(periods_per_year / observations as f64) - 1.0)
            }
            _ => None,
        };
        let annualized_volatility = sample_std_dev(&carry).map(|sd| sd * periods_per_year.sqrt());
        let calmar_ratio = match (annualized_return, max_drawdown) {
            (Some(ret), Some(dd)) if dd < 0.0 => Some(ret / dd.abs()),
            _ => None,
        };

        Ok(Self {
            pair,
            start: table.dates().first().copied(),
            end: table.dates().last().copied(),
            observations,
            final_growth,
            total_return,
            annualized_return,
            annualized_volatility,
            max_drawdown,
            latest_volatility,
            calmar_ratio,
        })
    }
}

fn last_defined(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().find_map(|v| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(pair: CurrencyPair) -> AlignedTable {
        let dates = (1..=4).map(|m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap());
        let mut table = AlignedTable::from_index(dates);
        table
            .append_column(pair.carry_column(), vec![None, Some(0.10), Some(-0.10), Some(0.05)])
            .unwrap();
        table
            .append_column(pair.growth_column(), vec![None, Some(1.1), Some(0.99), Some(1.0395)])
            .unwrap();
        table
            .append_column(pair.volatility_column(), vec![None, None, None, Some(0.3)])
            .unwrap();
        table
            .append_column(pair.drawdown_column(), vec![None, Some(0.0), Some(-0.1), Some(-0.1)])
            .unwrap();
        table
    }

    #[test]
    fn test_summary_reads_last_defined_values() {
        let table = table_for(CurrencyPair::UsdJpy);
        let summary = CarrySummary::from_table(&table, CurrencyPair::UsdJpy, 12.0).unwrap();

        assert_eq!(summary.observations, 3);
        assert_eq!(summary.final_growth, Some(1.0395));
        assert!((summary.total_return.unwrap() - 0.0395).abs() < 1e-12);
        assert_eq!(summary.max_drawdown, Some(-0.1));
        assert_eq!(summary.latest_volatility, Some(0.3));
        assert_eq!(summary.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(summary.end, NaiveDate::from_ymd_opt(2024, 4, 1));

        let expected_annual = 1.0395f64.powf(12.0 / 3.0) - 1.0;
        assert!((summary.annualized_return.unwrap() - expected_annual).abs() < 1e-12);
        assert!((summary.calmar_ratio.unwrap() - expected_annual / 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_summary_requires_pair_columns() {
        let table = table_for(CurrencyPair::UsdJpy);
        let err = CarrySummary::from_table(&table, CurrencyPair::EurJpy, 12.0).unwrap_err();
        assert!(matches!(err, AnalyticsError::Table(_)));
    }
}
