use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::MissingValuePolicy;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub series: SeriesConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Credentials and endpoints of the two data providers.
///
/// Passed explicitly to the fetcher; nothing here is process-wide state.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub alpha_vantage_key: String,
    pub fred_key: String,
    pub alpha_vantage_base_url: String,
    pub fred_base_url: String,
    /// Per-request timeout for both providers.
    pub timeout_secs: u64,
}

/// FRED series ids of the three short-term interbank rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub japan_rate: String,
    pub us_rate: String,
    pub euro_rate: String,
}

/// Parameters of the analysis pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing window, in aligned periods, of the rolling volatility.
    pub volatility_window: usize,
    /// Annualization factor. Inferred from the aligned dates when absent.
    pub periods_per_year: Option<f64>,
    pub missing_values: MissingValuePolicy,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Where charts, exports and log files are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Enables the rolling file log when set.
    pub log_directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_key: String::new(),
            fred_key: String::new(),
            alpha_vantage_base_url: "https://www.alphavantage.co".to_string(),
            fred_base_url: "https://api.stlouisfed.org".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            japan_rate: "IR3TIB01JPM156N".to_string(),
            us_rate: "IR3TIB01USM156N".to_string(),
            euro_rate: "IR3TIB01EZM156N".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
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

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            log_directory: None,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("alpha_vantage_key", &redact(&self.alpha_vantage_key))
            .field("fred_key", &redact(&self.fred_key))
            .field("alpha_vantage_base_url", &self.alpha_vantage_base_url)
            .field("fred_base_url", &self.fred_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl ApiConfig {
    /// Checked only by commands that go to the network.
    pub fn require_keys(&self) -> Result<(), ConfigError> {
        if self.alpha_vantage_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                key: "api.alpha_vantage_key",
                env_var: "CARRY__API__ALPHA_VANTAGE_KEY",
            });
        }
        if self.fred_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                key: "api.fred_key",
                env_var: "CARRY__API__FRED_KEY",
            });
        }
        Ok(())
    }
}

impl Config {
    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.volatility_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "analysis.volatility_window must be at least 2, got {}",
                analysis.volatility_window
            )));
        }
        if let Some(ppy) = analysis.periods_per_year {
            if !ppy.is_finite() || ppy <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "analysis.periods_per_year must be positive, got {ppy}"
                )));
            }
        }
        if let (Some(start), Some(end)) = (analysis.start_date, analysis.end_date) {
            if start > end {
                return Err(ConfigError::ValidationError(format!(
                    "analysis.start_date {start} is after analysis.end_date {end}"
                )));
            }
        }
        for (key, id) in [
            ("series.japan_rate", &self.series.japan_rate),
            ("series.us_rate", &self.series.us_rate),
            ("series.euro_rate", &self.series.euro_rate),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} must not be empty")));
            }
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
