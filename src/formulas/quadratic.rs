use std::fmt;

use crate::calculator::format_plain;

/// Roots of `ax² + bx + c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadraticRoots {
    /// Positive discriminant. `x1` takes `+√`, `x2` takes `-√`.
    Two { x1: f64, x2: f64 },
    /// Zero discriminant.
    One(f64),
    /// Negative discriminant: `real ± imaginary·i`.
    Complex { real: f64, imaginary: f64 },
}

impl fmt::Display for QuadraticRoots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two { x1, x2 } => {
                write!(f, "x1 = {}, x2 = {}", format_plain(*x1), format_plain(*x2))
            }
            Self::One(x) => write!(f, "x = {}", format_plain(*x)),
            Self::Complex { real, imaginary } => write!(
                f,
                "x = {} ± {}i",
                format_plain(*real),
                format_plain(*imaginary)
            ),
        }
    }
}

/// Solve with the quadratic formula. `a == 0` is not special-cased.
pub fn solve(a: f64, b: f64, c: f64) -> QuadraticRoots {
    let discriminant = b * b - 4.0 * a * c;
    let two_a = 2.0 * a;

    if discriminant > 0.0 {
        let root = discriminant.sqrt();
        QuadraticRoots::Two {
            x1: (-b + root) / two_a,
            x2: (-b - root) / two_a,
        }
    } else if discriminant == 0.0 {
        QuadraticRoots::One(-b / two_a)
    } else {
        QuadraticRoots::Complex {
            real: -b / two_a,
            imaginary: ((-discriminant).sqrt() / two_a).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_real_roots() {
        assert_eq!(solve(1.0, -3.0, 2.0), QuadraticRoots::Two { x1: 2.0, x2: 1.0 });
        assert_eq!(solve(1.0, -3.0, 2.0).to_string(), "x1 = 2, x2 = 1");
    }

    #[test]
    fn test_single_root() {
        assert_eq!(solve(1.0, 2.0, 1.0), QuadraticRoots::One(-1.0));
        assert_eq!(solve(1.0, 2.0, 1.0).to_string(), "x = -1");
    }

    #[test]
    fn test_complex_pair() {
        let roots = solve(1.0, 0.0, 1.0);
        assert_eq!(
            roots,
            QuadraticRoots::Complex {
                real: 0.0,
                imaginary: 1.0
            }
        );
        assert_eq!(roots.to_string(), "x = 0 ± 1i");
    }

    #[test]
    fn test_negative_leading_coefficient() {
        let roots = solve(-1.0, 0.0, -4.0);
        assert_eq!(
            roots,
            QuadraticRoots::Complex {
                real: 0.0,
                imaginary: 2.0
            }
        );
    }
}
