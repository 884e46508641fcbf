use crate::error::AnalyticsError;

/// Interest-rate spread `foreign - base`, in percentage points, per aligned row.
pub fn rate_differential(
    foreign: &[Option<f64>],
    base: &[Option<f64>],
) -> Result<Vec<Option<f64>>, AnalyticsError> {
    if foreign.len() != base.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: foreign.len(),
            right: base.len(),
        });
    }

    Ok(foreign
        .iter()
        .zip(base)
        .map(|(f, b)| Some((*f)? - (*b)?))
        .collect())
}
