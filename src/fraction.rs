//! Conversion of decimals to the simplest nearby fraction.
//!
//! Uses a Stern-Brocot mediant search. Plain mediant stepping needs one step
//! per unit of the denominator, so each bound is moved with an exponential
//! seek followed by a binary back-off.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FractionError {
    #[error("accuracy must be strictly between 0 and 1, got {0}")]
    AccuracyOutOfRange(f64),

    #[error("cannot convert non-finite value {0} to a fraction")]
    NotFinite(f64),

    #[error("{0} has no fraction with 64-bit terms within the accuracy")]
    OutOfRange(f64),
}

/// A rational number. The denominator is always positive and the sign lives
/// in the numerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator != 0);
        if denominator < 0 {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Multiply `x` by this fraction, applying the numerator first.
    pub fn scale(&self, x: f64) -> f64 {
        x * self.numerator as f64 / self.denominator as f64
    }

    /// Swap numerator and denominator, keeping the denominator positive.
    pub fn reciprocal(&self) -> Self {
        Self::new(self.denominator, self.numerator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Find the fraction with the smallest denominator within `accuracy` of
/// `value`.
///
/// `accuracy` is relative to `|value|`, or absolute when `value` is zero.
/// Values whose fraction would not fit in `i64` give
/// [`FractionError::OutOfRange`].
pub fn decimal_to_fraction(value: f64, accuracy: f64) -> Result<Fraction, FractionError> {
    if !(accuracy > 0.0 && accuracy < 1.0) {
        return Err(FractionError::AccuracyOutOfRange(accuracy));
    }
    if !value.is_finite() {
        return Err(FractionError::NotFinite(value));
    }

    let out_of_range = FractionError::OutOfRange(value);
    let sign: i64 = if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    };
    let abs = value.abs();

    let max_error = if sign == 0 { accuracy } else { abs * accuracy };

    let whole = abs.floor();
    // 2^63 is the first float past i64::MAX
    if whole >= i64::MAX as f64 {
        return Err(out_of_range);
    }
    let n = whole as i64;
    let rest = abs - whole;

    if rest < max_error {
        return Ok(Fraction::new(sign * n, 1));
    }
    if 1.0 - max_error < rest {
        let next = n.checked_add(1).ok_or(out_of_range)?;
        return Ok(Fraction::new(sign * next, 1));
    }

    let upper_limit = rest + max_error;
    let lower_limit = rest - max_error;

    let (mut lower_n, mut lower_d) = (0i64, 1i64);
    let (mut upper_n, mut upper_d) = (1i64, 1i64);

    loop {
        let middle_n = lower_n.checked_add(upper_n).ok_or(out_of_range)?;
        let middle_d = lower_d.checked_add(upper_d).ok_or(out_of_range)?;

        if (middle_d as f64) * upper_limit < middle_n as f64 {
            // middle is above the window: it becomes the new upper bound
            let (ln, ld) = (lower_n, lower_d);
            seek(&mut upper_n, &mut upper_d, ln, ld, |un, ud| {
                (ld as f64 + ud as f64) * upper_limit < ln as f64 + un as f64
            })
            .ok_or(out_of_range)?;
        } else if (middle_n as f64) < lower_limit * middle_d as f64 {
            // middle is below the window: it becomes the new lower bound
            let (un, ud) = (upper_n, upper_d);
            seek(&mut lower_n, &mut lower_d, un, ud, |ln, ld| {
                ln as f64 + (un as f64) < lower_limit * (ld as f64 + ud as f64)
            })
            .ok_or(out_of_range)?;
        } else {
            let numerator = n
                .checked_mul(middle_d)
                .and_then(|whole_part| whole_part.checked_add(middle_n))
                .ok_or(out_of_range)?;
            return Ok(Fraction::new(numerator * sign, middle_d));
        }
    }
}

/// Advance `(a, b)` by `(a_inc, b_inc)` as far as `still_outside` holds.
///
/// Steps double until the predicate fails, then halve back down so the
/// result is the last step at which it still held. Returns `None` if a step
/// overflows `i64`.
fn seek<F>(a: &mut i64, b: &mut i64, a_inc: i64, b_inc: i64, still_outside: F) -> Option<()>
where
    F: Fn(i64, i64) -> bool,
{
    let step = |a: i64, b: i64, weight: i64| -> Option<(i64, i64)> {
        Some((
            a.checked_add(a_inc.checked_mul(weight)?)?,
            b.checked_add(b_inc.checked_mul(weight)?)?,
        ))
    };

    (*a, *b) = step(*a, *b, 1)?;
    if !still_outside(*a, *b) {
        return Some(());
    }

    let mut weight: i64 = 1;
    loop {
        weight = weight.checked_mul(2)?;
        (*a, *b) = step(*a, *b, weight)?;
        if !still_outside(*a, *b) {
            break;
        }
    }

    while weight > 1 {
        weight /= 2;
        let a_dec = a_inc * weight;
        let b_dec = b_inc * weight;
        if !still_outside(*a - a_dec, *b - b_dec) {
            *a -= a_dec;
            *b -= b_dec;
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(numerator: i64, denominator: i64) -> Fraction {
        Fraction {
            numerator,
            denominator,
        }
    }

    #[test]
    fn test_simple_halves_and_thirds() {
        assert_eq!(decimal_to_fraction(0.5, 0.01), Ok(frac(1, 2)));
        assert_eq!(decimal_to_fraction(0.3333333, 0.0001), Ok(frac(1, 3)));
        assert_eq!(decimal_to_fraction(0.75, 1e-9), Ok(frac(3, 4)));
    }

    #[test]
    fn test_integer_parts() {
        assert_eq!(decimal_to_fraction(2.0, 0.01), Ok(frac(2, 1)));
        assert_eq!(decimal_to_fraction(2.5, 0.001), Ok(frac(5, 2)));
        assert_eq!(decimal_to_fraction(2.9999999, 1e-6), Ok(frac(3, 1)));
        assert_eq!(decimal_to_fraction(0.0, 0.5), Ok(frac(0, 1)));
    }

    #[test]
    fn test_sign_goes_to_numerator() {
        assert_eq!(decimal_to_fraction(-0.25, 1e-6), Ok(frac(-1, 4)));
        assert_eq!(decimal_to_fraction(-1.5, 1e-6), Ok(frac(-3, 2)));
    }

    #[test]
    fn test_large_denominator() {
        let f = decimal_to_fraction(1.0 / 997.0, 1e-9).unwrap();
        assert_eq!(f, frac(1, 997));

        let f = decimal_to_fraction(std::f64::consts::PI, 1e-7).unwrap();
        assert!((f.value() - std::f64::consts::PI).abs() <= std::f64::consts::PI * 1e-7);
        assert_eq!(f, frac(355, 113));
    }

    #[test]
    fn test_reconversion_is_stable() {
        for &(value, accuracy) in &[(0.6180339887, 1e-6), (0.142857, 1e-5), (12.375, 1e-9)] {
            let first = decimal_to_fraction(value, accuracy).unwrap();
            let second = decimal_to_fraction(first.value(), accuracy).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_accuracy_out_of_range() {
        assert_eq!(
            decimal_to_fraction(0.5, 0.0),
            Err(FractionError::AccuracyOutOfRange(0.0))
        );
        assert_eq!(
            decimal_to_fraction(0.5, 1.0),
            Err(FractionError::AccuracyOutOfRange(1.0))
        );
        assert!(decimal_to_fraction(0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(
            decimal_to_fraction(f64::INFINITY, 0.1),
            Err(FractionError::NotFinite(f64::INFINITY))
        );
    }

    #[test]
    fn test_huge_and_tiny_values_are_out_of_range() {
        assert_eq!(
            decimal_to_fraction(1e20, 1e-6),
            Err(FractionError::OutOfRange(1e20))
        );
        assert_eq!(
            decimal_to_fraction(-1e20, 1e-6),
            Err(FractionError::OutOfRange(-1e20))
        );
        assert_eq!(
            decimal_to_fraction(1e-300, 0.5),
            Err(FractionError::OutOfRange(1e-300))
        );
    }

    #[test]
    fn test_largest_representable_values() {
        // 2^62 is exact in f64 and fits comfortably
        let big = 4_611_686_018_427_387_904.0;
        assert_eq!(
            decimal_to_fraction(big, 1e-6),
            Ok(frac(4_611_686_018_427_387_904, 1))
        );
        assert_eq!(decimal_to_fraction(1e-9, 0.5), Ok(frac(1, 666_666_667)));
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(frac(-2, 3).reciprocal(), frac(-3, 2));
        assert_eq!(frac(2, 1).to_string(), "2/1");
    }
}
