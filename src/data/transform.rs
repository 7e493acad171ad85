//! Per-kind preparation of raw series before they reach the sampler.

use crate::store::VariableKind;

/// Margin keeping squeezed bounded values away from 0 and 1.
const BOUND_MARGIN: f64 = 0.005;
/// Shift keeping scaled positive values strictly above zero.
const POSITIVE_SHIFT: f64 = 0.01;

/// Applies the kind's normalization rule to `values`.
pub fn prepare(kind: &VariableKind, values: &[f64]) -> Vec<f64> {
    match kind {
        VariableKind::Continuous => {
            let mean = mean(values);
            let sd = nonzero(sample_sd(values));
            values.iter().map(|x| (x - mean) / sd).collect()
        }
        VariableKind::Positive => {
            let sd = nonzero(sample_sd(values));
            values.iter().map(|x| x / sd + POSITIVE_SHIFT).collect()
        }
        VariableKind::Bounded { min, max } => {
            let (lo, hi) = bounds(*min, *max, Some(values));
            let width = nonzero(hi - lo);
            values
                .iter()
                .map(|x| (x - lo) / width * (1.0 - 2.0 * BOUND_MARGIN) + BOUND_MARGIN)
                .collect()
        }
        VariableKind::OrdinalScale { .. } | VariableKind::Boolean | VariableKind::Categorical => values.to_vec(),
    }
}

/// Effective bounds: declared bounds win, then the data extremes, then `[0, 1]`.
pub fn bounds(min: Option<f64>, max: Option<f64>, data: Option<&[f64]>) -> (f64, f64) {
    let finite = || data.into_iter().flatten().copied().filter(|v| v.is_finite());
    let lo = min.or_else(|| finite().reduce(f64::min)).unwrap_or(0.0);
    let hi = max.or_else(|| finite().reduce(f64::max)).unwrap_or(1.0);
    (lo, hi)
}

fn mean(values: &[f64]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Sample standard deviation (n - 1 denominator) over finite values.
fn sample_sd(values: &[f64]) -> f64 {
    let m = mean(values);
    let (ss, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + (v - m).powi(2), n + 1));
    if n < 2 { 0.0 } else { (ss / (n - 1) as f64).sqrt() }
}

#[inline]
fn nonzero(scale: f64) -> f64 {
    if scale.is_finite() && scale != 0.0 { scale } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn test_continuous_standardized() {
        // mean 2, sample sd 1
        let out = prepare(&VariableKind::Continuous, &[1.0, 2.0, 3.0]);
        assert!(close(&out, &[-1.0, 0.0, 1.0]), "{:?}", out);
    }

    #[test]
    fn test_positive_scaled_and_shifted() {
        let out = prepare(&VariableKind::Positive, &[1.0, 2.0, 3.0]);
        assert!(close(&out, &[1.01, 2.01, 3.01]), "{:?}", out);
    }

    #[test]
    fn test_bounded_squeezed_inside_unit_interval() {
        let kind = VariableKind::Bounded { min: None, max: None };
        let out = prepare(&kind, &[10.0, 15.0, 20.0]);
        assert!(close(&out, &[0.005, 0.5, 0.995]), "{:?}", out);

        let declared = VariableKind::Bounded { min: Some(0.0), max: Some(100.0) };
        let out = prepare(&declared, &[50.0]);
        assert!(close(&out, &[0.5]), "{:?}", out);
    }

    #[test]
    fn test_bounds_fallbacks() {
        assert_eq!(bounds(None, None, None), (0.0, 1.0));
        assert_eq!(bounds(Some(-1.0), None, Some(&[3.0, f64::NAN, 5.0])), (-1.0, 5.0));
    }

    #[test]
    fn test_constant_series_left_unscaled() {
        let out = prepare(&VariableKind::Continuous, &[4.0, 4.0]);
        assert!(close(&out, &[0.0, 0.0]));
        let out = prepare(&VariableKind::Boolean, &[0.0, 1.0]);
        assert!(close(&out, &[0.0, 1.0]));
    }
}
