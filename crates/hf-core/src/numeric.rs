use crate::HfError;

/// Floating point type used throughout the solver.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HfError::NonPositive { what, value: v })
    }
}

/// Linear map of `x` from `[x_0, x_1]` onto `[y_0, y_1]`.
///
/// Used to turn a row or column index into a physical coordinate, e.g.
/// `lerp(i as Real, 0.0, (n - 1) as Real, 0.0, length)`.
#[inline]
pub fn lerp(x: Real, x_0: Real, x_1: Real, y_0: Real, y_1: Real) -> Real {
    y_0 + (x - x_0) * (y_1 - y_0) / (x_1 - x_0)
}

/// Physical coordinate of sample `index` out of `count` evenly spread over `[0, max]`.
#[inline]
pub fn index_coordinate(index: usize, count: usize, max: Real) -> Real {
    lerp(index as Real, 0.0, (count - 1) as Real, 0.0, max)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lerp_stays_within_target_range(
            x in 0.0_f64..1000.0,
            span in 1.0_f64..1000.0,
            y_1 in 0.0_f64..50.0,
        ) {
            let x = x.min(span);
            let y = lerp(x, 0.0, span, 0.0, y_1);
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(y >= -tol.abs && (y <= y_1 || nearly_equal(y, y_1, tol)));
        }
    }
}
