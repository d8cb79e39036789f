//! Range helpers for color scales and axes.

/// Minimum and maximum of the finite values
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((low, high)) => Some((low.min(v), high.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        assert_eq!(value_range([3.0, -1.0, 8.0]), Some((-1.0, 8.0)));
        assert_eq!(value_range([f64::NAN]), None);
        assert_eq!(value_range(Vec::new()), None);
    }
}
