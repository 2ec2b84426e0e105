//! Small numeric helpers for baseline and consistency aggregates.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_scores() {
        assert_eq!(mean(&[70.0, 80.0, 90.0]), Some(80.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn std_dev_matches_sample_formula() {
        // Variance of [70, 80, 90] with n-1 denominator is 100.
        let sd = sample_std_dev(&[70.0, 80.0, 90.0]).unwrap();
        assert!((sd - 10.0).abs() < 1e-9);
        assert_eq!(sample_std_dev(&[42.0]), None);
    }

    #[test]
    fn one_decimal_rounding() {
        assert_eq!(round1(73.456), 73.5);
        assert_eq!(round1(73.44), 73.4);
    }
}
