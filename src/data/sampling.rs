//! Sampling Module
//! Builds evaluation grids for function plots: evenly spaced points,
//! densified arrays and arrays widened beyond their original span.

use super::DataError;
use log::{debug, info, warn};

/// `num` evenly spaced values over `[start, end]` (or `[start, end)` when
/// `endpoint` is false).
pub fn linspace(start: f64, end: f64, num: usize, endpoint: bool) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let div = if endpoint { num - 1 } else { num } as f64;
            let step = (end - start) / div;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            if endpoint {
                values[num - 1] = end;
            }
            values
        }
    }
}

/// Insert points between consecutive elements of `data`.
///
/// With `d` the smallest gap between two consecutive elements, each pair
/// `(a, b)` is split into `round(|b - a| / d) * density` equal steps. A
/// `density` of 1 returns the input unchanged, as does an input holding two
/// equal consecutive elements.
pub fn make_denser(data: &[f64], density: usize) -> Vec<f64> {
    info!("Called 'make_denser()' with density {}", density);

    if density == 1 || data.len() < 2 {
        return data.to_vec();
    }

    let minimum_dist = data
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    debug!("Minimum distance: {}", minimum_dist);

    if minimum_dist == 0.0 {
        warn!("There are at least two repeated consecutive elements");
        return data.to_vec();
    }

    let mut result = Vec::with_capacity(data.len() * density);
    for pair in data.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let steps = ((b - a).abs() / minimum_dist).round() as usize * density;
        result.push(a);
        for k in 1..steps {
            result.push(a + (b - a) * k as f64 / steps as f64);
        }
    }
    if let Some(&last) = data.last() {
        result.push(last);
    }

    debug!("Densified {} points into {}", data.len(), result.len());
    result
}

/// Widen `data` by `left` and `right` fractions of its span, then densify it.
///
/// A point `min - left * span` is prepended when `left != 0` and a point
/// `max + right * span` is appended when `right != 0`.
pub fn make_wider(data: &[f64], left: f64, right: f64, density: usize) -> Result<Vec<f64>, DataError> {
    info!("Called 'make_wider()' with ({}, {})", left, right);

    if density < 1 {
        return Err(DataError::InvalidDensity(density));
    }
    if left < 0.0 || right < 0.0 {
        return Err(DataError::NegativeWidening { left, right });
    }
    if data.is_empty() {
        return Err(DataError::Empty);
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let delta = max - min;

    let mut wider = Vec::with_capacity(data.len() + 2);
    if left != 0.0 {
        wider.push(min - left * delta);
    }
    wider.extend_from_slice(data);
    if right != 0.0 {
        wider.push(max + right * delta);
    }
    debug!("Dataset to be made denser: {:?}", wider);

    Ok(make_denser(&wider, density))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn linspace_includes_endpoint() {
        assert_close(&linspace(-5.0, 5.0, 5, true), &[-5.0, -2.5, 0.0, 2.5, 5.0]);
        assert_close(&linspace(0.0, 1.0, 4, false), &[0.0, 0.25, 0.5, 0.75]);
        assert!(linspace(0.0, 1.0, 0, true).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1, true), vec![3.0]);
    }

    #[test]
    fn denser_with_unit_density_is_identity() {
        assert_eq!(make_denser(&[0.0, 1.0, 2.0], 1), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn denser_keeps_repeated_elements() {
        let repeating = [0.0, 1.0, 1.0, 3.0];
        assert_eq!(make_denser(&repeating, 3), repeating.to_vec());
    }

    #[test]
    fn denser_splits_proportionally_to_gap() {
        assert_close(&make_denser(&[0.0, 1.0, 2.0], 2), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        // gap 2 is twice the minimum gap, so it gets twice the points
        assert_close(
            &make_denser(&[0.0, 1.0, 3.0], 2),
            &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
        );
    }

    #[test]
    fn wider_adds_points_on_requested_sides() {
        let data = [0.0, 1.0, 2.0];
        assert_close(&make_wider(&data, 0.1, 0.1, 1).unwrap(), &[-0.2, 0.0, 1.0, 2.0, 2.2]);
        assert_close(&make_wider(&data, 0.0, 0.1, 1).unwrap(), &[0.0, 1.0, 2.0, 2.2]);
        assert_close(&make_wider(&data, 0.1, 0.0, 1).unwrap(), &[-0.2, 0.0, 1.0, 2.0]);
        assert_close(&make_wider(&data, 0.0, 0.0, 1).unwrap(), &data);
    }

    #[test]
    fn wider_rejects_invalid_arguments() {
        let data = [0.0, 1.0, 2.0];
        assert!(matches!(
            make_wider(&data, -1.0, 0.1, 1),
            Err(DataError::NegativeWidening { .. })
        ));
        assert!(matches!(
            make_wider(&data, 0.1, -2.0, 1),
            Err(DataError::NegativeWidening { .. })
        ));
        assert_eq!(make_wider(&data, 0.0, 0.0, 0), Err(DataError::InvalidDensity(0)));
        assert_eq!(make_wider(&[], 0.0, 0.0, 1), Err(DataError::Empty));
    }
}
