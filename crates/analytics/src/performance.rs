//! Performance metrics derived from a carry-return stream.
//!
//! All three algorithms are single forward passes. Undefined rows stay undefined
//! and are skipped by the running state (compounded product, running peak,
//! running minimum) rather than being treated as zero.

use crate::error::AnalyticsError;

/// Compounded growth of one unit: `G[first] = 1 + r[first]`, `G[t] = G[prev] * (1 + r[t])`.
pub fn cumulative_growth(returns: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut running: Option<f64> = None;
    returns
        .iter()
        .map(|r| {
            let r = (*r)?;
            let growth = running.unwrap_or(1.0) * (1.0 + r);
            running = Some(growth);
            Some(growth)
        })
        .collect()
}

/// Annualized standard deviation over a trailing window of exactly `window` rows.
///
/// Rows before `window - 1`, and any window containing an undefined value, are
/// undefined. Uses the sample (n-1) estimator.
pub fn rolling_volatility(
    returns: &[Option<f64>],
    window: usize,
    periods_per_year: f64,
) -> Result<Vec<Option<f64>>, AnalyticsError> {
    if window < 2 {
        return Err(AnalyticsError::InvalidParameter(format!(
            "volatility window must be at least 2, got {window}"
        )));
    }
    if !periods_per_year.is_finite() || periods_per_year <= 0.0 {
        return Err(AnalyticsError::InvalidParameter(format!(
            "periods per year must be positive, got {periods_per_year}"
        )));
    }

    let scale = periods_per_year.sqrt();
    let mut volatility = vec![None; returns.len()];

    for end in (window - 1)..returns.len() {
        let values: Option<Vec<f64>> = returns[end + 1 - window..=end].iter().copied().collect();
        if let Some(values) = values {
            volatility[end] = sample_std_dev(&values).map(|sd| sd * scale);
        }
    }

    Ok(volatility)
}

/// Worst peak-to-trough loss realized up to each row, always `<= 0` for positive growth.
///
/// The running peak and the running minimum are both tracked incrementally.
pub fn max_drawdown(growth: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut peak: Option<f64> = None;
    let mut worst: Option<f64> = None;

    growth
        .iter()
        .map(|g| {
            let g = (*g)?;
            let p = peak.map_or(g, |p| p.max(g));
            peak = Some(p);
            let drawdown = g / p - 1.0;
            let w = worst.map_or(drawdown, |w| w.min(drawdown));
            worst = Some(w);
            Some(w)
        })
        .collect()
}

/// Fails with `InsufficientHistory` when no gap-free run of defined rows fills the window.
///
/// `available` is the length of the longest such run.
pub fn check_history(
    column: &str,
    returns: &[Option<f64>],
    window: usize,
) -> Result<(), AnalyticsError> {
    let (available, _) = returns.iter().fold((0, 0), |(longest, run), r| {
        let run = if r.is_some() { run + 1 } else { 0 };
        (longest.max(run), run)
    });
    if available < window {
        return Err(AnalyticsError::InsufficientHistory {
            column: column.to_string(),
            window,
            available,
        });
    }
    Ok(())
}

/// Sample standard deviation; `None` for fewer than two values.
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
