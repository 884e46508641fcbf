use crate::error::AnalyticsError;
use core_types::{AlignedTable, MissingValuePolicy, TimeSeries};
use std::borrow::Cow;

/// Inner-joins the given series onto the intersection of their date indices.
///
/// Columns are appended in input order and named after each series. Dates that
/// are absent from any one input are dropped. An empty intersection is an error,
/// never an empty table.
///
/// Missing markers inside the aligned range are handled by `policy`: `Reject`
/// surfaces the first one as `MissingValue`, `DropRow` removes those dates
/// before intersecting.
pub fn align(
    series: &[&TimeSeries],
    policy: MissingValuePolicy,
) -> Result<AlignedTable, AnalyticsError> {
    let names: Vec<String> = series.iter().map(|s| s.name().to_string()).collect();

    let prepared: Vec<Cow<'_, TimeSeries>> = match policy {
        MissingValuePolicy::Reject => series.iter().map(|s| Cow::Borrowed(*s)).collect(),
        MissingValuePolicy::DropRow => series
            .iter()
            .map(|s| {
                let missing = s.missing_count();
                if missing > 0 {
                    tracing::warn!(series = s.name(), missing, "Dropping dates with missing values.");
                }
                Cow::Owned(s.defined())
            })
            .collect(),
    };

    // Walk the shortest index and look up the others.
    let Some(shortest) = prepared.iter().min_by_key(|s| s.len()) else {
        return Err(AnalyticsError::NoOverlap { series: names });
    };
    let common: Vec<_> = shortest
        .dates()
        .filter(|date| prepared.iter().all(|s| s.contains(date)))
        .copied()
        .collect();

    if common.is_empty() {
        return Err(AnalyticsError::NoOverlap { series: names });
    }

    let mut table = AlignedTable::from_index(common);
    for s in &prepared {
        let mut values = Vec::with_capacity(table.len());
        for date in table.dates() {
            match s.get(date).flatten().filter(|v| v.is_finite()) {
                Some(value) => values.push(Some(value)),
                None => {
                    return Err(AnalyticsError::MissingValue {
                        series: s.name().to_string(),
                        date: *date,
                    });
                }
            }
        }
        table.append_column(s.name(), values)?;
    }

    tracing::debug!(rows = table.len(), inputs = prepared.len(), "Aligned input series.");
    Ok(table)
}
