//! Expression evaluation using meval.
//!
//! Wraps meval to provide a simple interface for evaluating
//! mathematical expressions and formatting results.

use meval::{Context, Expr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ExpressionBuffer;

/// Unit used by the trigonometric functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn toggle(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Convert an angle in this unit to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// Convert an angle in radians to this unit.
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => " rad",
        }
    }
}

/// Result of evaluating a calculator expression.
///
/// On failure `result_text` carries the evaluator's message and
/// `result_as_number` is `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorResult {
    pub success: bool,
    pub result_text: String,
    pub result_as_number: f64,
}

impl CalculatorResult {
    pub fn success(value: f64) -> Self {
        Self {
            success: true,
            result_text: format_plain(value),
            result_as_number: value,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result_text: message.into(),
            result_as_number: 0.0,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The numeric value, only for successful results.
    pub fn value(&self) -> Option<f64> {
        self.success.then_some(self.result_as_number)
    }

    /// Get the display string (result with thousand separators, or error message).
    pub fn display(&self) -> String {
        if self.success {
            format_display(self.result_as_number)
        } else {
            self.result_text.clone()
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        self.success.then_some(self.result_text.as_str())
    }
}

/// Build the evaluator context for the given angle unit.
fn context(unit: AngleUnit) -> Context<'static> {
    let mut ctx = Context::new();
    ctx.func("log", f64::log10);

    if unit == AngleUnit::Degrees {
        ctx.func("sin", |x: f64| x.to_radians().sin())
            .func("cos", |x: f64| x.to_radians().cos())
            .func("tan", |x: f64| x.to_radians().tan())
            .func("asin", |x: f64| x.asin().to_degrees())
            .func("acos", |x: f64| x.acos().to_degrees())
            .func("atan", |x: f64| x.atan().to_degrees());
    }

    ctx
}

/// Evaluate an expression written in the evaluator grammar.
///
/// Never panics: any parse or evaluation error is returned as a failed
/// `CalculatorResult` carrying the error description.
pub fn evaluate(expression: &str, unit: AngleUnit) -> CalculatorResult {
    let expression = expression.trim();
    if expression.is_empty() {
        return CalculatorResult::failure("Empty expression");
    }

    let value = expression
        .parse::<Expr>()
        .and_then(|expr| expr.eval_with_context(context(unit)));

    match value {
        Ok(value) if value.is_nan() => CalculatorResult::failure("Not a Number"),
        Ok(value) if value.is_infinite() => CalculatorResult::failure(if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }),
        Ok(value) => CalculatorResult::success(value),
        Err(err) => {
            debug!(%expression, %err, "evaluation failed");
            CalculatorResult::failure(err.to_string())
        }
    }
}

/// Evaluate the contents of an edit buffer.
pub fn evaluate_buffer(buffer: &ExpressionBuffer, unit: AngleUnit) -> CalculatorResult {
    evaluate(&buffer.to_expression(), unit)
}

const SMALL_MAGNITUDE: f64 = 1e-4;

/// Format a number for display with thousand separators.
pub fn format_display(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format_with_separators(value as i64)
    } else {
        let plain = format_plain(value);

        if let Some(dot_pos) = plain.find('.') {
            let (int_part, dec_part) = plain.split_at(dot_pos);
            format!("{}{}", separate_integer_text(int_part), dec_part)
        } else {
            separate_integer_text(&plain)
        }
    }
}

/// Format an integer with thousand separators.
fn format_with_separators(value: i64) -> String {
    separate_integer_text(&value.to_string())
}

fn separate_integer_text(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let formatted: String = result.chars().rev().collect();
    format!("{}{}", sign, formatted)
}

/// Format a number without separators, at most ten decimals, always with
/// `.` as the decimal point.
///
/// Magnitudes below `SMALL_MAGNITUDE` would round away under ten decimals,
/// so they are written in full instead.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else if value.abs() < SMALL_MAGNITUDE {
        format!("{}", value)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
