use super::{FormulaError, FormulaOutcome};

pub fn hypotenuse(a: f64, b: f64) -> FormulaOutcome {
    FormulaOutcome::Length {
        side: "hypotenuse",
        value: a.hypot(b),
    }
}

pub fn side(hypotenuse: f64, leg: f64) -> Result<FormulaOutcome, FormulaError> {
    if hypotenuse.abs() <= leg.abs() {
        return Err(FormulaError::Domain(
            "the hypotenuse must be longer than the leg",
        ));
    }

    Ok(FormulaOutcome::Length {
        side: "leg",
        value: (hypotenuse * hypotenuse - leg * leg).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypotenuse() {
        assert_eq!(
            hypotenuse(3.0, 4.0),
            FormulaOutcome::Length {
                side: "hypotenuse",
                value: 5.0
            }
        );
    }

    #[test]
    fn test_side() {
        assert_eq!(
            side(13.0, 5.0),
            Ok(FormulaOutcome::Length {
                side: "leg",
                value: 12.0
            })
        );
    }

    #[test]
    fn test_side_needs_longer_hypotenuse() {
        assert!(matches!(side(5.0, 5.0), Err(FormulaError::Domain(_))));
        assert!(matches!(side(3.0, 4.0), Err(FormulaError::Domain(_))));
    }
}
