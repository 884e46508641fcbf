//! Property tests of the engine recurrences over random return streams.

use analytics::{align, cumulative_growth, max_drawdown, pct_change, rate_differential, rolling_volatility};
use chrono::NaiveDate;
use core_types::{MissingValuePolicy, TimeSeries};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn returns_with_gaps() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.85, -0.5f64..0.5), 0..120)
}

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(offset as u64)
}

proptest! {
    #[test]
    fn growth_follows_compounding_recurrence(returns in returns_with_gaps()) {
        let growth = cumulative_growth(&returns);
        prop_assert_eq!(growth.len(), returns.len());

        let mut previous: Option<f64> = None;
        for (r, g) in returns.iter().zip(&growth) {
            match r {
                None => prop_assert_eq!(*g, None),
                Some(r) => {
                    let expected = previous.unwrap_or(1.0) * (1.0 + r);
                    prop_assert_eq!(*g, Some(expected));
                    previous = Some(expected);
                }
            }
        }
        prop_assert_eq!(cumulative_growth(&returns), growth);
    }

    #[test]
    fn drawdown_is_running_minimum_below_peak(returns in returns_with_gaps()) {
        let growth = cumulative_growth(&returns);
        let drawdown = max_drawdown(&growth);

        let mut peak = f64::NEG_INFINITY;
        let mut worst: Option<f64> = None;
        for (g, dd) in growth.iter().zip(&drawdown) {
            let Some(g) = g else {
                prop_assert_eq!(*dd, None);
                continue;
            };
            peak = peak.max(*g);
            let current = g / peak - 1.0;
            let expected = worst.map_or(current, |w| w.min(current));
            worst = Some(expected);

            prop_assert_eq!(*dd, Some(expected));
            prop_assert!(expected <= 0.0);
        }
    }

    #[test]
    fn volatility_defines_one_row_per_full_window(
        returns in prop::collection::vec(-0.2f64..0.2, 0..60),
        window in 2usize..24,
    ) {
        let defined: Vec<Option<f64>> = returns.iter().copied().map(Some).collect();
        let vol = rolling_volatility(&defined, window, 12.0).unwrap();

        let expected = (defined.len() + 1).saturating_sub(window);
        prop_assert_eq!(vol.iter().filter(|v| v.is_some()).count(), expected);
        for (i, v) in vol.iter().enumerate() {
            prop_assert_eq!(v.is_some(), i + 1 >= window);
            if let Some(v) = v {
                prop_assert!(*v >= 0.0);
            }
        }
    }

    #[test]
    fn returns_and_differentials_match_definitions(
        rows in prop::collection::vec((1.0f64..500.0, -1.0f64..10.0, -1.0f64..10.0), 1..80),
    ) {
        let prices: Vec<_> = rows.iter().map(|(p, _, _)| Some(*p)).collect();
        let foreign: Vec<_> = rows.iter().map(|(_, f, _)| Some(*f)).collect();
        let base: Vec<_> = rows.iter().map(|(_, _, b)| Some(*b)).collect();

        let returns = pct_change(&prices);
        prop_assert_eq!(returns[0], None);
        for t in 1..rows.len() {
            prop_assert_eq!(returns[t], Some(rows[t].0 / rows[t - 1].0 - 1.0));
        }

        let differential = rate_differential(&foreign, &base).unwrap();
        for (t, (_, f, b)) in rows.iter().enumerate() {
            prop_assert_eq!(differential[t], Some(f - b));
        }
    }

    #[test]
    fn aligned_index_is_sorted_intersection(
        a in prop::collection::btree_set(0u32..200, 1..80),
        b in prop::collection::btree_set(0u32..200, 1..80),
        c in prop::collection::btree_set(0u32..200, 1..80),
    ) {
        let to_series = |name: &str, offsets: &BTreeSet<u32>| {
            TimeSeries::from_observations(name, offsets.iter().map(|o| (day(*o), Some(*o as f64)))).unwrap()
        };
        let (sa, sb, sc) = (to_series("Japan", &a), to_series("US", &b), to_series("USD/JPY", &c));
        let expected: Vec<NaiveDate> = a
            .iter()
            .filter(|o| b.contains(o) && c.contains(o))
            .map(|o| day(*o))
            .collect();

        match align(&[&sa, &sb, &sc], MissingValuePolicy::Reject) {
            Ok(table) => {
                prop_assert_eq!(table.dates(), expected.as_slice());
                prop_assert_eq!(table.len(), expected.len());
            }
            Err(e) => {
                prop_assert!(expected.is_empty(), "unexpected error {e:?}");
            }
        }
    }
}
