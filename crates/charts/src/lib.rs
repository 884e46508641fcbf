//! # Carry Trade Charts
//!
//! Renders the performance columns of an `AlignedTable` as standalone SVG line
//! charts, one file per metric with the USD and EUR carry trades side by side.
//! No plotting backend is involved: the documents are assembled as text.

pub mod error;
pub mod svg;

pub use error::ChartError;
pub use svg::{ChartLabels, LineSeries, ValueFormat, render_line_chart};

use core_types::{AlignedTable, CurrencyPair};
use std::path::{Path, PathBuf};

const PAIR_COLORS: [&str; 2] = ["#348dc1", "#ff9933"];

/// One of the three charts written after an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryChart {
    CumulativeGrowth,
    Volatility,
    MaxDrawdown,
}

impl CarryChart {
    pub const ALL: [CarryChart; 3] = [
        CarryChart::CumulativeGrowth,
        CarryChart::Volatility,
        CarryChart::MaxDrawdown,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            CarryChart::CumulativeGrowth => "cumulative_growth.svg",
            CarryChart::Volatility => "volatility.svg",
            CarryChart::MaxDrawdown => "max_drawdown.svg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CarryChart::CumulativeGrowth => "Cumulative Returns of Yen Carry Trade",
            CarryChart::Volatility => "Volatility of Yen Carry Trade",
            CarryChart::MaxDrawdown => "Max Drawdown of Yen Carry Trade",
        }
    }

    pub fn y_axis_title(&self) -> &'static str {
        match self {
            CarryChart::CumulativeGrowth => "Cumulative Returns",
            CarryChart::Volatility => "Annualized Volatility",
            CarryChart::MaxDrawdown => "Drawdown",
        }
    }

    /// The legend entry of `pair`'s line.
    pub fn legend_label(&self, pair: CurrencyPair) -> &'static str {
        match (self, pair) {
            (CarryChart::CumulativeGrowth, CurrencyPair::UsdJpy) => "USD/JPY Carry Trade",
            (CarryChart::CumulativeGrowth, CurrencyPair::EurJpy) => "EUR/JPY Carry Trade",
            (CarryChart::Volatility, CurrencyPair::UsdJpy) => "USD/JPY Carry Trade Volatility",
            (CarryChart::Volatility, CurrencyPair::EurJpy) => "EUR/JPY Carry Trade Volatility",
            (CarryChart::MaxDrawdown, CurrencyPair::UsdJpy) => "USD/JPY Carry Trade Max Drawdown",
            (CarryChart::MaxDrawdown, CurrencyPair::EurJpy) => "EUR/JPY Carry Trade Max Drawdown",
        }
    }

    fn column(&self, pair: CurrencyPair) -> &'static str {
        match self {
            CarryChart::CumulativeGrowth => pair.growth_column(),
            CarryChart::Volatility => pair.volatility_column(),
            CarryChart::MaxDrawdown => pair.drawdown_column(),
        }
    }

    fn value_format(&self) -> ValueFormat {
        match self {
            CarryChart::CumulativeGrowth => ValueFormat::Multiple,
            CarryChart::Volatility | CarryChart::MaxDrawdown => ValueFormat::Percent,
        }
    }

    /// Renders this chart from the table. Fails if a pair's column is missing.
    pub fn render(&self, table: &AlignedTable) -> Result<String, ChartError> {
        let series = CurrencyPair::ALL
            .iter()
            .zip(PAIR_COLORS)
            .map(|(pair, color)| {
                Ok(LineSeries {
                    label: self.legend_label(*pair),
                    color,
                    values: table.column(self.column(*pair))?,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let labels = ChartLabels {
            title: self.title(),
            x_axis: "Date",
            y_axis: self.y_axis_title(),
        };
        Ok(render_line_chart(
            &labels,
            table.dates(),
            &series,
            self.value_format(),
        ))
    }
}

/// Writes the growth, volatility and drawdown charts into `dir`, creating it if needed.
///
/// Returns the paths written, in `CarryChart::ALL` order.
pub fn write_carry_charts(table: &AlignedTable, dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
    std::fs::create_dir_all(dir).map_err(|source| ChartError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(CarryChart::ALL.len());
    for chart in CarryChart::ALL {
        let document = chart.render(table)?;
        let path = dir.join(chart.file_name());
        std::fs::write(&path, document).map_err(|source| ChartError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Wrote chart.");
        written.push(path);
    }
    Ok(written)
}
