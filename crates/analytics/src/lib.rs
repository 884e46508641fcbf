//! # Carry Trade Analytics
//!
//! This crate turns raw FX closes and interest-rate observations into the
//! performance history of the USD/JPY and EUR/JPY carry trades.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no knowledge of data providers. It depends only on
//!   `core-types`.
//! - **Stateless engines:** every engine is a single forward pass over an ordered
//!   column and returns a new column. Undefined values (`None`) propagate and are
//!   skipped, never coerced to zero.
//! - **Append-only table:** `CarryPipeline` threads one `AlignedTable` through the
//!   engines in dependency order (align, differential and returns, carry,
//!   performance), each stage appending its own columns.
//!
//! ## Public API
//!
//! - `align`: the calendar aligner (inner join on dates).
//! - `rate_differential`, `pct_change`, `carry_returns`: the derivation engines.
//! - `cumulative_growth`, `rolling_volatility`, `max_drawdown`: the performance engine.
//! - `CarryPipeline` / `CarryAnalysis`: the orchestrated run and its output.
//! - `CarrySummary`: headline metrics per currency pair.
//! - `AnalyticsError`: the error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod carry;
pub mod differential;
pub mod error;
pub mod frequency;
pub mod performance;
pub mod pipeline;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::align;
pub use carry::carry_returns;
pub use differential::rate_differential;
pub use error::AnalyticsError;
pub use frequency::{Annualization, SamplingFrequency};
pub use performance::{check_history, cumulative_growth, max_drawdown, rolling_volatility};
pub use pipeline::{CarryAnalysis, CarryPipeline, PipelineSettings};
pub use report::CarrySummary;
pub use returns::pct_change;
