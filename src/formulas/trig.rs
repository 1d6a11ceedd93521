//! Right-triangle side and angle solvers.

use super::{FormulaError, FormulaOutcome};
use crate::calculator::AngleUnit;

pub fn opposite_length(angle: f64, hypotenuse: f64, unit: AngleUnit) -> FormulaOutcome {
    FormulaOutcome::Length {
        side: "opposite",
        value: hypotenuse * unit.to_radians(angle).sin(),
    }
}

pub fn adjacent_length(angle: f64, hypotenuse: f64, unit: AngleUnit) -> FormulaOutcome {
    FormulaOutcome::Length {
        side: "adjacent",
        value: hypotenuse * unit.to_radians(angle).cos(),
    }
}

pub fn hypotenuse_length(
    angle: f64,
    opposite: f64,
    unit: AngleUnit,
) -> Result<FormulaOutcome, FormulaError> {
    let sin = unit.to_radians(angle).sin();
    if sin.abs() < f64::EPSILON {
        return Err(FormulaError::Domain("the sine of the angle must not be zero"));
    }

    Ok(FormulaOutcome::Length {
        side: "hypotenuse",
        value: opposite / sin,
    })
}

/// Remaining leg over the hypotenuse, for a known leg.
fn other_leg_ratio(leg: f64, hypotenuse: f64) -> Result<f64, FormulaError> {
    if hypotenuse <= 0.0 {
        return Err(FormulaError::Domain("the hypotenuse must be positive"));
    }
    if leg < 0.0 || leg > hypotenuse {
        return Err(FormulaError::Domain(
            "a leg must be between zero and the hypotenuse",
        ));
    }

    Ok((hypotenuse * hypotenuse - leg * leg).sqrt() / hypotenuse)
}

pub fn cos_after_opposite(
    opposite: f64,
    hypotenuse: f64,
    unit: AngleUnit,
) -> Result<FormulaOutcome, FormulaError> {
    let cos = other_leg_ratio(opposite, hypotenuse)?;
    Ok(FormulaOutcome::Ratio {
        function: "cos",
        value: cos,
        angle: unit.from_radians(cos.acos()),
        unit,
    })
}

pub fn sin_after_adjacent(
    adjacent: f64,
    hypotenuse: f64,
    unit: AngleUnit,
) -> Result<FormulaOutcome, FormulaError> {
    let sin = other_leg_ratio(adjacent, hypotenuse)?;
    Ok(FormulaOutcome::Ratio {
        function: "sin",
        value: sin,
        angle: unit.from_radians(sin.asin()),
        unit,
    })
}

pub fn tan_after_opposite_and_adjacent(
    opposite: f64,
    adjacent: f64,
    unit: AngleUnit,
) -> Result<FormulaOutcome, FormulaError> {
    if adjacent == 0.0 {
        return Err(FormulaError::Domain("the adjacent side must not be zero"));
    }

    let tan = opposite / adjacent;
    Ok(FormulaOutcome::Ratio {
        function: "tan",
        value: tan,
        angle: unit.from_radians(tan.atan()),
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(outcome: FormulaOutcome) -> f64 {
        match outcome {
            FormulaOutcome::Length { value, .. } => value,
            other => panic!("expected a length, got {:?}", other),
        }
    }

    fn ratio(outcome: FormulaOutcome) -> (f64, f64) {
        match outcome {
            FormulaOutcome::Ratio { value, angle, .. } => (value, angle),
            other => panic!("expected a ratio, got {:?}", other),
        }
    }

    #[test]
    fn test_side_lengths_in_degrees() {
        let opposite = length(opposite_length(30.0, 10.0, AngleUnit::Degrees));
        assert!((opposite - 5.0).abs() < 1e-12);

        let adjacent = length(adjacent_length(60.0, 10.0, AngleUnit::Degrees));
        assert!((adjacent - 5.0).abs() < 1e-12);

        let hypotenuse = length(hypotenuse_length(30.0, 5.0, AngleUnit::Degrees).unwrap());
        assert!((hypotenuse - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_side_lengths_in_radians() {
        let opposite = length(opposite_length(
            std::f64::consts::FRAC_PI_2,
            3.0,
            AngleUnit::Radians,
        ));
        assert!((opposite - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypotenuse_rejects_flat_angle() {
        assert!(matches!(
            hypotenuse_length(0.0, 5.0, AngleUnit::Degrees),
            Err(FormulaError::Domain(_))
        ));
    }

    #[test]
    fn test_ratios_from_3_4_5_triangle() {
        let (cos, angle) = ratio(cos_after_opposite(3.0, 5.0, AngleUnit::Degrees).unwrap());
        assert!((cos - 0.8).abs() < 1e-12);
        assert!((angle - 36.86989764584402).abs() < 1e-9);

        let (sin, _) = ratio(sin_after_adjacent(4.0, 5.0, AngleUnit::Degrees).unwrap());
        assert!((sin - 0.6).abs() < 1e-12);

        let (tan, angle) =
            ratio(tan_after_opposite_and_adjacent(3.0, 4.0, AngleUnit::Radians).unwrap());
        assert_eq!(tan, 0.75);
        assert!((angle - 0.75f64.atan()).abs() < 1e-12);
    }

    #[test]
    fn test_leg_longer_than_hypotenuse() {
        assert!(cos_after_opposite(6.0, 5.0, AngleUnit::Degrees).is_err());
        assert!(sin_after_adjacent(1.0, 0.0, AngleUnit::Degrees).is_err());
        assert!(tan_after_opposite_and_adjacent(1.0, 0.0, AngleUnit::Degrees).is_err());
    }
}
