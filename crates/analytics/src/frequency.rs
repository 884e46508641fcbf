use chrono::NaiveDate;
use serde::Serialize;

/// Effective sampling frequency of an aligned date index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SamplingFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl SamplingFrequency {
    pub fn periods_per_year(&self) -> f64 {
        match self {
            SamplingFrequency::Daily => 252.0,
            SamplingFrequency::Weekly => 52.0,
            SamplingFrequency::Monthly => 12.0,
            SamplingFrequency::Quarterly => 4.0,
            SamplingFrequency::Annual => 1.0,
        }
    }

    /// Classifies the median gap, in calendar days, between consecutive dates.
    ///
    /// Returns `None` for fewer than two dates.
    pub fn infer(dates: &[NaiveDate]) -> Option<Self> {
        let mut gaps: Vec<i64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect();
        if gaps.is_empty() {
            return None;
        }
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];

        Some(match median {
            ..=4 => SamplingFrequency::Daily,
            5..=10 => SamplingFrequency::Weekly,
            11..=45 => SamplingFrequency::Monthly,
            46..=135 => SamplingFrequency::Quarterly,
            _ => SamplingFrequency::Annual,
        })
    }
}

/// Where the annualization factor of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Annualization {
    Configured(f64),
    Inferred(SamplingFrequency),
    /// Too few aligned rows to infer anything; monthly is assumed.
    Default,
}

impl Annualization {
    pub fn resolve(configured: Option<f64>, dates: &[NaiveDate]) -> Self {
        match configured {
            Some(ppy) => Annualization::Configured(ppy),
            None => SamplingFrequency::infer(dates)
                .map(Annualization::Inferred)
                .unwrap_or(Annualization::Default),
        }
    }

    pub fn periods_per_year(&self) -> f64 {
        match self {
            Annualization::Configured(ppy) => *ppy,
            Annualization::Inferred(frequency) => frequency.periods_per_year(),
            Annualization::Default => SamplingFrequency::Monthly.periods_per_year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month_starts(year: i32) -> Vec<NaiveDate> {
        (1..=12)
            .map(|m| NaiveDate::from_ymd_opt(year, m, 1).unwrap())
            .collect()
    }

    #[test]
    fn test_month_start_index_is_monthly() {
        assert_eq!(SamplingFrequency::infer(&month_starts(2023)), Some(SamplingFrequency::Monthly));
    }

    #[test]
    fn test_irregular_monthly_index_is_still_monthly() {
        // Months whose first day fell on a weekend are missing after the FX join.
        let mut dates = month_starts(2023);
        dates.retain(|d| ![4, 7, 10].contains(&chrono::Datelike::month(d)));
        assert_eq!(SamplingFrequency::infer(&dates), Some(SamplingFrequency::Monthly));
    }

    #[test]
    fn test_business_days_are_daily() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<_> = start
            .iter_days()
            .take(30)
            .filter(|d| chrono::Datelike::weekday(d).number_from_monday() <= 5)
            .collect();
        assert_eq!(SamplingFrequency::infer(&dates), Some(SamplingFrequency::Daily));
    }

    #[test]
    fn test_resolution_prefers_configuration() {
        let dates = month_starts(2023);
        assert_eq!(Annualization::resolve(Some(52.0), &dates).periods_per_year(), 52.0);
        assert_eq!(
            Annualization::resolve(None, &dates),
            Annualization::Inferred(SamplingFrequency::Monthly)
        );
        assert_eq!(Annualization::resolve(None, &dates[..1]).periods_per_year(), 12.0);
    }
}
