/// Period-over-period fractional change of a price column.
///
/// The first row has no prior observation and is `None`, never `0.0`. A row whose
/// own or previous price is undefined, or whose previous price is zero, is `None`.
pub fn pct_change(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(prices.len());
    let mut previous: Option<f64> = None;

    for price in prices {
        let change = match (previous, *price) {
            (Some(prev), Some(curr)) if prev != 0.0 => Some(curr / prev - 1.0),
            _ => None,
        };
        returns.push(change);
        previous = *price;
    }

    returns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_return_is_undefined() {
        let returns = pct_change(&[Some(100.0), Some(102.0), Some(101.0)]);
        assert_eq!(returns[0], None);
        assert!((returns[1].unwrap() - 0.02).abs() < 1e-12);
        assert!((returns[2].unwrap() - (101.0 / 102.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_price_breaks_both_neighbours() {
        let returns = pct_change(&[Some(100.0), None, Some(110.0), Some(121.0)]);
        assert_eq!(returns[1], None);
        assert_eq!(returns[2], None);
        assert!((returns[3].unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_previous_price_is_undefined() {
        let returns = pct_change(&[Some(0.0), Some(1.0)]);
        assert_eq!(returns, vec![None, None]);
    }

    #[test]
    fn test_empty_input() {
        assert!(pct_change(&[]).is_empty());
    }
}
