use serde::{Deserialize, Serialize};

/// Column names of the raw interest-rate series in the aligned table.
pub mod columns {
    pub const JAPAN: &str = "Japan";
    pub const US: &str = "US";
    pub const EUROZONE: &str = "Eurozone";
}

/// The two Yen-funded carry positions the system analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyPair {
    UsdJpy,
    EurJpy,
}

impl CurrencyPair {
    pub const ALL: [CurrencyPair; 2] = [CurrencyPair::UsdJpy, CurrencyPair::EurJpy];

    /// The currency held long (the Alpha Vantage `from_symbol`).
    pub fn from_symbol(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "USD",
            CurrencyPair::EurJpy => "EUR",
        }
    }

    /// The funding currency (the Alpha Vantage `to_symbol`).
    pub fn to_symbol(&self) -> &'static str {
        "JPY"
    }

    /// Short label used in chart legends and the summary table.
    pub fn label(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "USD/JPY",
            CurrencyPair::EurJpy => "EUR/JPY",
        }
    }

    /// The raw rate column of the foreign (funded) economy.
    pub fn foreign_rate_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => columns::US,
            CurrencyPair::EurJpy => columns::EUROZONE,
        }
    }

    /// The raw rate column of the funding economy.
    pub fn base_rate_column(&self) -> &'static str {
        columns::JAPAN
    }

    pub fn differential_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "US-Japan",
            CurrencyPair::EurJpy => "Euro-Japan",
        }
    }

    pub fn close_column(&self) -> &'static str {
        self.label()
    }

    pub fn returns_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "USD/JPY Returns",
            CurrencyPair::EurJpy => "EUR/JPY Returns",
        }
    }

    pub fn carry_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "Carry Trade USD",
            CurrencyPair::EurJpy => "Carry Trade Euro",
        }
    }

    pub fn growth_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "Cumulative USD Carry",
            CurrencyPair::EurJpy => "Cumulative Euro Carry",
        }
    }

    pub fn volatility_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "Volatility USD Carry",
            CurrencyPair::EurJpy => "Volatility Euro Carry",
        }
    }

    pub fn drawdown_column(&self) -> &'static str {
        match self {
            CurrencyPair::UsdJpy => "Max Drawdown USD Carry",
            CurrencyPair::EurJpy => "Max Drawdown Euro Carry",
        }
    }
}

/// How the calendar aligner treats a missing observation inside the aligned range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MissingValuePolicy {
    /// Abort the run, naming the series and date.
    #[default]
    Reject,
    /// Treat a missing observation like an absent date and drop that row.
    DropRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_columns_are_distinct() {
        let mut names = vec![columns::JAPAN, columns::US, columns::EUROZONE];
        for pair in CurrencyPair::ALL {
            names.extend([
                pair.differential_column(),
                pair.close_column(),
                pair.returns_column(),
                pair.carry_column(),
                pair.growth_column(),
                pair.volatility_column(),
                pair.drawdown_column(),
            ]);
        }
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 17);
    }

    #[test]
    fn test_missing_value_policy_serde() {
        let policy: MissingValuePolicy = serde_json::from_str("\"drop-row\"").unwrap();
        assert_eq!(policy, MissingValuePolicy::DropRow);
        assert_eq!(MissingValuePolicy::default(), MissingValuePolicy::Reject);
    }
}
