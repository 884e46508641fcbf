use crate::error::AnalyticsError;

/// Single-period carry-trade return: the rate differential (percentage points)
/// converted to a fraction plus the FX return of the same row.
pub fn carry_returns(
    differential: &[Option<f64>],
    fx_returns: &[Option<f64>],
) -> Result<Vec<Option<f64>>, AnalyticsError> {
    if differential.len() != fx_returns.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: differential.len(),
            right: fx_returns.len(),
        });
    }

    Ok(differential
        .iter()
        .zip(fx_returns)
        .map(|(spread, fx)| Some((*spread)? / 100.0 + (*fx)?))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_adds_yield_and_fx_return() {
        let carry = carry_returns(&[Some(2.0), Some(2.0), Some(-1.5)], &[None, Some(0.02), Some(0.01)])
            .unwrap();
        assert_eq!(carry[0], None);
        assert!((carry[1].unwrap() - 0.04).abs() < 1e-12);
        assert!((carry[2].unwrap() - (-0.005)).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_differential_propagates() {
        let carry = carry_returns(&[None], &[Some(0.01)]).unwrap();
        assert_eq!(carry, vec![None]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = carry_returns(&[Some(1.0), Some(1.0)], &[None]).unwrap_err();
        assert_eq!(err, AnalyticsError::LengthMismatch { left: 2, right: 1 });
    }
}
