use crate::aligner::align;
use crate::carry::carry_returns;
use crate::differential::rate_differential;
use crate::error::AnalyticsError;
use crate::frequency::Annualization;
use crate::performance::{check_history, cumulative_growth, max_drawdown, rolling_volatility};
use crate::report::CarrySummary;
use crate::returns::pct_change;
use chrono::NaiveDate;
use core_types::{AlignedTable, CurrencyPair, MarketSnapshot, MissingValuePolicy};
use serde::Serialize;

/// Parameters of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Trailing window, in aligned rows, of the rolling volatility.
    pub volatility_window: usize,
    /// Pins the annualization factor; inferred from the aligned index when `None`.
    pub periods_per_year: Option<f64>,
    pub missing_values: MissingValuePolicy,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            volatility_window: 12,
            periods_per_year: None,
            missing_values: MissingValuePolicy::Reject,
            start_date: None,
            end_date: None,
        }
    }
}

/// The complete output of a run, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct CarryAnalysis {
    pub table: AlignedTable,
    pub annualization: Annualization,
    pub summaries: Vec<CarrySummary>,
}

impl CarryAnalysis {
    pub fn periods_per_year(&self) -> f64 {
        self.annualization.periods_per_year()
    }

    pub fn summary(&self, pair: CurrencyPair) -> Option<&CarrySummary> {
        self.summaries.iter().find(|s| s.pair == pair)
    }
}

/// Runs the engines over a snapshot in dependency order.
///
/// Alignment and missing-value problems abort before any derived column exists.
/// Each later stage reads only columns appended by an earlier one.
#[derive(Debug, Default)]
pub struct CarryPipeline {
    settings: PipelineSettings,
}

impl CarryPipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn run(&self, snapshot: &MarketSnapshot) -> Result<CarryAnalysis, AnalyticsError> {
        self.validate()?;

        let inputs = snapshot.between(self.settings.start_date, self.settings.end_date);
        let mut table = align(&inputs.series(), self.settings.missing_values)?;
        tracing::info!(
            rows = table.len(),
            from = ?table.dates().first(),
            to = ?table.dates().last(),
            "Aligned rates and FX closes."
        );

        self.append_differentials(&mut table)?;
        self.append_returns(&mut table)?;
        self.append_carry(&mut table)?;

        let annualization = Annualization::resolve(self.settings.periods_per_year, table.dates());
        let periods_per_year = annualization.periods_per_year();
        tracing::info!(periods_per_year, ?annualization, "Resolved annualization factor.");

        self.append_growth(&mut table)?;
        self.append_volatility(&mut table, periods_per_year)?;
        self.append_drawdown(&mut table)?;

        let summaries = CurrencyPair::ALL
            .iter()
            .map(|pair| CarrySummary::from_table(&table, *pair, periods_per_year))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CarryAnalysis {
            table,
            annualization,
            summaries,
        })
    }

    fn validate(&self) -> Result<(), AnalyticsError> {
        let s = &self.settings;
        if s.volatility_window < 2 {
            return Err(AnalyticsError::InvalidParameter(format!(
                "volatility window must be at least 2, got {}",
                s.volatility_window
            )));
        }
        if let Some(ppy) = s.periods_per_year {
            if !ppy.is_finite() || ppy <= 0.0 {
                return Err(AnalyticsError::InvalidParameter(format!(
                    "periods per year must be positive, got {ppy}"
                )));
            }
        }
        if let (Some(from), Some(to)) = (s.start_date, s.end_date) {
            if from > to {
                return Err(AnalyticsError::InvalidParameter(format!(
                    "start date {from} is after end date {to}"
                )));
            }
        }
        Ok(())
    }

    fn append_differentials(&self, table: &mut AlignedTable) -> Result<(), AnalyticsError> {
        for pair in CurrencyPair::ALL {
            let spread = rate_differential(
                table.column(pair.foreign_rate_column())?,
                table.column(pair.base_rate_column())?,
            )?;
            table.append_column(pair.differential_column(), spread)?;
        }
        Ok(())
    }

    fn append_returns(&self, table: &mut AlignedTable) -> Result<(), AnalyticsError> {
        for pair in CurrencyPair::ALL {
            let returns = pct_change(table.column(pair.close_column())?);
            table.append_column(pair.returns_column(), returns)?;
        }
        Ok(())
    }

    fn append_carry(&self, table: &mut AlignedTable) -> Result<(), AnalyticsError> {
        for pair in CurrencyPair::ALL {
            let carry = carry_returns(
                table.column(pair.differential_column())?,
                table.column(pair.returns_column())?,
            )?;
            table.append_column(pair.carry_column(), carry)?;
        }
        Ok(())
    }

    fn append_growth(&self, table: &mut AlignedTable) -> Result<(), AnalyticsError> {
        for pair in CurrencyPair::ALL {
            let growth = cumulative_growth(table.column(pair.carry_column())?);
            table.append_column(pair.growth_column(), growth)?;
        }
        Ok(())
    }

    fn append_volatility(
        &self,
        table: &mut AlignedTable,
        periods_per_year: f64,
    ) -> Result<(), AnalyticsError> {
        let window = self.settings.volatility_window;
        for pair in CurrencyPair::ALL {
            let carry = table.column(pair.carry_column())?;
            // Short history is expected at series start: warn and leave the rows undefined.
            if let Err(e) = check_history(pair.carry_column(), carry, window) {
                tracing::warn!(error = %e, "Rolling volatility will be undefined.");
            }
            let volatility = rolling_volatility(carry, window, periods_per_year)?;
            table.append_column(pair.volatility_column(), volatility)?;
        }
        Ok(())
    }

    fn append_drawdown(&self, table: &mut AlignedTable) -> Result<(), AnalyticsError> {
        for pair in CurrencyPair::ALL {
            let drawdown = max_drawdown(table.column(pair.growth_column())?);
            table.append_column(pair.drawdown_column(), drawdown)?;
        }
        Ok(())
    }
}
