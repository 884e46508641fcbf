use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A named, date-indexed series of numeric observations.
///
/// `None` is the explicit missing-value marker (e.g. a provider placeholder such
/// as FRED's `"."`). It is never coerced to zero. Dates are unique and iterate
/// in ascending order because the series is backed by a `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    name: String,
    observations: BTreeMap<NaiveDate, Option<f64>>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: BTreeMap::new(),
        }
    }

    /// Builds a series from raw observations, rejecting repeated dates.
    pub fn from_observations<I>(name: impl Into<String>, observations: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut series = Self::new(name);
        for (date, value) in observations {
            match series.observations.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    return Err(CoreError::DuplicateDate {
                        series: series.name.clone(),
                        date,
                    });
                }
            }
        }
        Ok(series)
    }

    /// Inserts an observation, returning the previous value for that date if any.
    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) -> Option<Option<f64>> {
        self.observations.insert(date, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `None` if the date is absent, `Some(None)` if present but missing.
    pub fn get(&self, date: &NaiveDate) -> Option<Option<f64>> {
        self.observations.get(date).copied()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.observations.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> + '_ {
        self.observations.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Option<f64>)> + '_ {
        self.observations.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.keys().next_back().copied()
    }

    /// Number of dates without a usable value. Non-finite numbers count as missing.
    pub fn missing_count(&self) -> usize {
        self.observations.values().filter(|v| !is_defined(v)).count()
    }

    /// Restricts the series to an inclusive date window. Open bounds are unbounded.
    pub fn between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let observations = self
            .observations
            .iter()
            .filter(|(date, _)| from.is_none_or(|f| **date >= f) && to.is_none_or(|t| **date <= t))
            .map(|(date, value)| (*date, *value))
            .collect();
        Self {
            name: self.name.clone(),
            observations,
        }
    }

    /// Keeps only the dates with a defined, finite value.
    pub fn defined(&self) -> Self {
        let observations = self
            .observations
            .iter()
            .filter(|(_, value)| is_defined(value))
            .map(|(date, value)| (*date, *value))
            .collect();
        Self {
            name: self.name.clone(),
            observations,
        }
    }
}

fn is_defined(value: &Option<f64>) -> bool {
    value.is_some_and(f64::is_finite)
}
