//! Similar triangles: scale factor and missing sides.

use std::fmt;

use super::FormulaError;
use crate::calculator::format_plain;
use crate::fraction::{Fraction, decimal_to_fraction};

/// Argument names: the three sides of the original triangle, then the
/// matching sides of the copy.
pub const SIDE_NAMES: [&str; 6] = ["A", "B", "C", "A'", "B'", "C'"];

/// A side that was not supplied and had to be inferred.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedSide {
    pub name: &'static str,
    pub value: f64,
    pub fraction: Fraction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityResult {
    /// Sides A, B, C of the original triangle.
    pub original: [Option<f64>; 3],
    /// Sides A', B', C' of the copy.
    pub copy: [Option<f64>; 3],
    /// Original side divided by copy side.
    pub original_to_copy: Fraction,
    /// Reciprocal of `original_to_copy`.
    pub copy_to_original: Fraction,
    pub derived: Vec<DerivedSide>,
}

impl fmt::Display for SimilarityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale = {} (copy → original {})",
            self.original_to_copy, self.copy_to_original
        )?;
        for side in &self.derived {
            write!(
                f,
                ", {} = {} ({})",
                side.name,
                format_plain(side.value),
                side.fraction
            )?;
        }
        Ok(())
    }
}

/// `values` holds the six sides in [`SIDE_NAMES`] order, `None` for blanks.
pub fn solve(values: &[Option<f64>], accuracy: f64) -> Result<SimilarityResult, FormulaError> {
    let mut original = [None; 3];
    let mut copy = [None; 3];
    for i in 0..3 {
        original[i] = values.get(i).copied().flatten();
        copy[i] = values.get(i + 3).copied().flatten();
    }

    let scale = (0..3)
        .find_map(|i| match (original[i], copy[i]) {
            (Some(o), Some(c)) if o > 0.0 && c > 0.0 => Some(o / c),
            _ => None,
        })
        .ok_or(FormulaError::NoCompleteSidePair)?;

    let original_to_copy = decimal_to_fraction(scale, accuracy)?;
    let copy_to_original = original_to_copy.reciprocal();

    let mut derived = Vec::new();
    for i in 0..3 {
        match (original[i], copy[i]) {
            (Some(o), None) => {
                let value = copy_to_original.scale(o);
                copy[i] = Some(value);
                derived.push(DerivedSide {
                    name: SIDE_NAMES[i + 3],
                    value,
                    fraction: decimal_to_fraction(value, accuracy)?,
                });
            }
            (None, Some(c)) => {
                let value = original_to_copy.scale(c);
                original[i] = Some(value);
                derived.push(DerivedSide {
                    name: SIDE_NAMES[i],
                    value,
                    fraction: decimal_to_fraction(value, accuracy)?,
                });
            }
            _ => {}
        }
    }

    Ok(SimilarityResult {
        original,
        copy,
        original_to_copy,
        copy_to_original,
        derived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCURACY: f64 = 1e-6;

    #[test]
    fn test_scale_factor_from_single_pair() {
        let result = solve(&[Some(4.0), None, None, Some(2.0), None, None], ACCURACY).unwrap();
        assert_eq!(result.original_to_copy, Fraction::new(2, 1));
        assert_eq!(result.copy_to_original, Fraction::new(1, 2));
        assert!(result.derived.is_empty());
    }

    #[test]
    fn test_infers_missing_copy_side() {
        let result = solve(
            &[Some(4.0), Some(6.0), None, Some(2.0), None, None],
            ACCURACY,
        )
        .unwrap();
        assert_eq!(result.copy[1], Some(3.0));
        assert_eq!(
            result.derived,
            vec![DerivedSide {
                name: "B'",
                value: 3.0,
                fraction: Fraction::new(3, 1),
            }]
        );
        assert_eq!(result.to_string(), "scale = 2/1 (copy → original 1/2), B' = 3 (3/1)");
    }

    #[test]
    fn test_infers_missing_original_side() {
        let result = solve(
            &[None, Some(3.0), Some(5.0), None, Some(4.5), Some(7.5)],
            ACCURACY,
        )
        .unwrap();
        // pair B is the first complete one
        assert_eq!(result.original_to_copy, Fraction::new(2, 3));
        assert!(result.derived.is_empty());

        let result = solve(
            &[None, Some(3.0), None, Some(1.5), Some(4.5), Some(7.5)],
            ACCURACY,
        )
        .unwrap();
        assert_eq!(result.original[0], Some(1.0));
        assert_eq!(result.original[2], Some(5.0));
        assert_eq!(result.derived.len(), 2);
    }

    #[test]
    fn test_priority_order_of_pairs() {
        let result = solve(
            &[Some(1.0), Some(9.0), None, Some(-2.0), Some(3.0), None],
            ACCURACY,
        )
        .unwrap();
        // pair A is skipped because A' is not positive
        assert_eq!(result.original_to_copy, Fraction::new(3, 1));
    }

    #[test]
    fn test_needs_a_complete_pair() {
        let err = solve(&[Some(4.0), None, None, None, Some(2.0), None], ACCURACY).unwrap_err();
        assert_eq!(err, FormulaError::NoCompleteSidePair);

        let err = solve(&[None; 6], ACCURACY).unwrap_err();
        assert_eq!(err, FormulaError::NoCompleteSidePair);
    }
}
