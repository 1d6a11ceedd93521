//! Formula bank.
//!
//! Each formula takes a fixed, ordered list of named arguments. Arguments
//! are calculator expressions and are evaluated one by one before the
//! formula combines them.

mod pythagoras;
mod quadratic;
mod similarity;
mod trig;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::calculator::{AngleUnit, ExpressionBuffer, evaluate_buffer, format_plain};
use crate::fraction::FractionError;

pub use quadratic::QuadraticRoots;
pub use similarity::{DerivedSide, SimilarityResult};

/// Errors that abort a formula. No partial result is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    #[error("{formula} takes {expected} arguments, got {found}")]
    ArgumentCount {
        formula: Formula,
        expected: usize,
        found: usize,
    },

    #[error("missing value for {name}")]
    MissingArgument { name: &'static str },

    #[error("invalid value for {name}: {message}")]
    InvalidArgument { name: &'static str, message: String },

    #[error("similarity needs at least one pair of matching sides")]
    NoCompleteSidePair,

    #[error("{0}")]
    Domain(&'static str),

    #[error(transparent)]
    Fraction(#[from] FractionError),
}

/// Settings a formula needs besides its arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormulaContext {
    pub angle_unit: AngleUnit,
    /// Relative accuracy used when expressing results as fractions.
    pub fraction_accuracy: f64,
}

impl Default for FormulaContext {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            fraction_accuracy: 1e-6,
        }
    }
}

/// The supported formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    Quadratic,
    OppositeLength,
    AdjacentLength,
    HypotenuseLength,
    CosAfterOpposite,
    SinAfterAdjacent,
    TanAfterOppositeAndAdjacent,
    Similarity,
    PythagorasHypotenuse,
    PythagorasSide,
}

impl Formula {
    pub const ALL: [Formula; 10] = [
        Formula::Quadratic,
        Formula::OppositeLength,
        Formula::AdjacentLength,
        Formula::HypotenuseLength,
        Formula::CosAfterOpposite,
        Formula::SinAfterAdjacent,
        Formula::TanAfterOppositeAndAdjacent,
        Formula::Similarity,
        Formula::PythagorasHypotenuse,
        Formula::PythagorasSide,
    ];

    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::Quadratic => "quadratic",
            Self::OppositeLength => "opposite-length",
            Self::AdjacentLength => "adjacent-length",
            Self::HypotenuseLength => "hypotenuse-length",
            Self::CosAfterOpposite => "cos-after-opposite",
            Self::SinAfterAdjacent => "sin-after-adjacent",
            Self::TanAfterOppositeAndAdjacent => "tan-after-opposite-and-adjacent",
            Self::Similarity => "similarity",
            Self::PythagorasHypotenuse => "pythagoras-hypotenuse",
            Self::PythagorasSide => "pythagoras-side",
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Quadratic => "Quadratic formula",
            Self::OppositeLength => "Opposite side length",
            Self::AdjacentLength => "Adjacent side length",
            Self::HypotenuseLength => "Hypotenuse length",
            Self::CosAfterOpposite => "Cosine from opposite side",
            Self::SinAfterAdjacent => "Sine from adjacent side",
            Self::TanAfterOppositeAndAdjacent => "Tangent from opposite and adjacent sides",
            Self::Similarity => "Triangle similarity",
            Self::PythagorasHypotenuse => "Pythagoras (hypotenuse)",
            Self::PythagorasSide => "Pythagoras (leg)",
        }
    }

    /// Names of the arguments, in the order they must be supplied.
    pub fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Quadratic => &["a", "b", "c"],
            Self::OppositeLength | Self::AdjacentLength => &["angle", "hypotenuse"],
            Self::HypotenuseLength => &["angle", "opposite"],
            Self::CosAfterOpposite => &["opposite", "hypotenuse"],
            Self::SinAfterAdjacent => &["adjacent", "hypotenuse"],
            Self::TanAfterOppositeAndAdjacent => &["opposite", "adjacent"],
            Self::Similarity => &similarity::SIDE_NAMES,
            Self::PythagorasHypotenuse => &["a", "b"],
            Self::PythagorasSide => &["hypotenuse", "leg"],
        }
    }

    /// Whether the argument at `index` may be left blank.
    fn allows_blank(self, _index: usize) -> bool {
        self == Self::Similarity
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|formula| formula.id() == wanted)
            .ok_or_else(|| format!("unknown formula `{}`", s))
    }
}

/// Outcome of a successful formula evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum FormulaOutcome {
    Quadratic(QuadraticRoots),
    /// A side length of a right triangle.
    Length { side: &'static str, value: f64 },
    /// A trigonometric ratio together with the angle it belongs to.
    Ratio {
        function: &'static str,
        value: f64,
        angle: f64,
        unit: AngleUnit,
    },
    Similarity(SimilarityResult),
}

impl fmt::Display for FormulaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quadratic(roots) => roots.fmt(f),
            Self::Length { side, value } => write!(f, "{} = {}", side, format_plain(*value)),
            Self::Ratio {
                function,
                value,
                angle,
                unit,
            } => write!(
                f,
                "{} θ = {}, θ = {}{}",
                function,
                format_plain(*value),
                format_plain(*angle),
                unit.suffix()
            ),
            Self::Similarity(result) => result.fmt(f),
        }
    }
}

/// Evaluate `formula` with the given argument expressions.
///
/// `args` must hold exactly one entry per name in [`Formula::arguments`].
/// Blank entries are only accepted where the formula allows them.
pub fn calculate(
    formula: Formula,
    args: &[&str],
    ctx: &FormulaContext,
) -> Result<FormulaOutcome, FormulaError> {
    let names = formula.arguments();
    if args.len() != names.len() {
        return Err(FormulaError::ArgumentCount {
            formula,
            expected: names.len(),
            found: args.len(),
        });
    }

    let mut values = Vec::with_capacity(args.len());
    for (index, (&name, raw)) in names.iter().zip(args).enumerate() {
        if raw.trim().is_empty() {
            if formula.allows_blank(index) {
                values.push(None);
                continue;
            }
            return Err(FormulaError::MissingArgument { name });
        }
        values.push(Some(evaluate_argument(name, raw, ctx.angle_unit)?));
    }

    debug!(formula = formula.id(), ?values, "arguments evaluated");

    // only similarity keeps blanks, so positional access below is safe
    let v: Vec<f64> = values.iter().flatten().copied().collect();
    let unit = ctx.angle_unit;

    match formula {
        Formula::Similarity => {
            similarity::solve(&values, ctx.fraction_accuracy).map(FormulaOutcome::Similarity)
        }
        Formula::Quadratic => Ok(FormulaOutcome::Quadratic(quadratic::solve(v[0], v[1], v[2]))),
        Formula::OppositeLength => Ok(trig::opposite_length(v[0], v[1], unit)),
        Formula::AdjacentLength => Ok(trig::adjacent_length(v[0], v[1], unit)),
        Formula::HypotenuseLength => trig::hypotenuse_length(v[0], v[1], unit),
        Formula::CosAfterOpposite => trig::cos_after_opposite(v[0], v[1], unit),
        Formula::SinAfterAdjacent => trig::sin_after_adjacent(v[0], v[1], unit),
        Formula::TanAfterOppositeAndAdjacent => trig::tan_after_opposite_and_adjacent(v[0], v[1], unit),
        Formula::PythagorasHypotenuse => Ok(pythagoras::hypotenuse(v[0], v[1])),
        Formula::PythagorasSide => pythagoras::side(v[0], v[1]),
    }
}

/// Parse and evaluate a single argument expression.
fn evaluate_argument(name: &'static str, raw: &str, unit: AngleUnit) -> Result<f64, FormulaError> {
    let buffer = ExpressionBuffer::parse(raw).map_err(|e| FormulaError::InvalidArgument {
        name,
        message: e.to_string(),
    })?;

    let result = evaluate_buffer(&buffer, unit);
    result.value().ok_or(FormulaError::InvalidArgument {
        name,
        message: result.result_text,
    })
}
