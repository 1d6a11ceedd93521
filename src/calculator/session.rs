//! The calculator state driven by key presses.

use tracing::{debug, warn};

use super::{AngleUnit, CalcError, CalculatorResult, ExpressionBuffer, evaluate_buffer};
use crate::config::CalculatorConfig;
use crate::formulas::{self, Formula, FormulaContext, FormulaError, FormulaOutcome};
use crate::history::{History, HistoryEntry};

/// A calculator owning its edit buffer and history.
#[derive(Debug, Clone)]
pub struct Calculator {
    buffer: ExpressionBuffer,
    latest_expression: Option<ExpressionBuffer>,
    latest_result: Option<String>,
    /// Set while the buffer area shows the error message.
    showing_error: bool,
    history: History,
    angle_unit: AngleUnit,
    error_message: String,
    fraction_accuracy: f64,
}

impl Calculator {
    pub fn new(config: &CalculatorConfig, history: History) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            latest_expression: None,
            latest_result: None,
            showing_error: false,
            history,
            angle_unit: config.angle_unit,
            error_message: config.error_message.clone(),
            fraction_accuracy: config.fraction_accuracy,
        }
    }

    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    pub fn latest_expression(&self) -> Option<&ExpressionBuffer> {
        self.latest_expression.as_ref()
    }

    pub fn latest_result(&self) -> Option<&str> {
        self.latest_result.as_deref()
    }

    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn formula_context(&self) -> FormulaContext {
        FormulaContext {
            angle_unit: self.angle_unit,
            fraction_accuracy: self.fraction_accuracy,
        }
    }

    /// Press a key. A pending error message is cleared first.
    pub fn write(&mut self, key: &str) -> Result<(), CalcError> {
        self.dismiss_error();
        self.buffer.write(key)
    }

    /// Append already parsed text to the buffer.
    pub fn append(&mut self, text: &str) -> Result<(), CalcError> {
        let parsed = ExpressionBuffer::parse(text)?;
        self.dismiss_error();
        self.buffer.extend_from(&parsed);
        Ok(())
    }

    /// Delete the last token, or the whole error message if one is shown.
    pub fn backspace(&mut self) {
        if self.showing_error {
            self.dismiss_error();
            return;
        }
        self.buffer.backspace();
    }

    /// Insert the latest successful result at the end of the buffer.
    pub fn write_latest_result(&mut self) {
        let Some(result) = self.latest_result.clone() else {
            return;
        };
        self.dismiss_error();
        self.buffer.extend_from(&ExpressionBuffer::from_result(&result));
    }

    /// Start over from the latest successful result.
    ///
    /// After a calculation the buffer already holds the result, so this
    /// clears it before inserting rather than appending a second copy.
    pub fn recall_latest_result(&mut self) {
        if self.latest_result.is_none() {
            return;
        }
        self.clear();
        self.write_latest_result();
    }

    /// Evaluate the buffer and record the calculation in the history.
    ///
    /// Returns `None` when the buffer is empty. On success the buffer is
    /// replaced by the result so the user can keep calculating.
    pub fn calculate(&mut self) -> Option<CalculatorResult> {
        if self.buffer.is_empty() || self.showing_error {
            return None;
        }

        let result = evaluate_buffer(&self.buffer, self.angle_unit);
        let expression = std::mem::take(&mut self.buffer);

        if result.is_success() {
            self.history
                .push(HistoryEntry::new(expression.to_string(), &result.result_text, true));
            self.buffer = ExpressionBuffer::from_result(&result.result_text);
            self.latest_result = Some(result.result_text.clone());
        } else {
            warn!(expression = %expression, error = %result.result_text, "calculation failed");
            self.history
                .push(HistoryEntry::new(expression.to_string(), &self.error_message, false));
            self.showing_error = true;
        }

        self.latest_expression = Some(expression);
        Some(result)
    }

    /// Run a formula and record its outcome, or the error, in the history.
    pub fn calculate_formula(
        &mut self,
        formula: Formula,
        args: &[&str],
    ) -> Result<FormulaOutcome, FormulaError> {
        let described = describe_call(formula, args);
        match formulas::calculate(formula, args, &self.formula_context()) {
            Ok(outcome) => {
                debug!(formula = formula.id(), %outcome, "formula evaluated");
                self.history
                    .push(HistoryEntry::new(described, outcome.to_string(), true));
                Ok(outcome)
            }
            Err(err) => {
                warn!(formula = formula.id(), %err, "formula failed");
                self.history
                    .push(HistoryEntry::new(described, err.to_string(), false));
                Err(err)
            }
        }
    }

    /// Clear the buffer and the latest expression. History is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.latest_expression = None;
        self.showing_error = false;
    }

    pub fn delete_history(&mut self) {
        self.history.clear();
    }

    pub fn toggle_angle_unit(&mut self) -> AngleUnit {
        self.angle_unit = self.angle_unit.toggle();
        self.angle_unit
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    fn dismiss_error(&mut self) {
        if self.showing_error {
            self.showing_error = false;
            self.buffer.clear();
        }
    }
}

/// `name(a = 1, b = 2)` with blank arguments left out.
fn describe_call(formula: Formula, args: &[&str]) -> String {
    let parts: Vec<String> = formula
        .arguments()
        .iter()
        .zip(args)
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| format!("{} = {}", name, value.trim()))
        .collect();
    format!("{}({})", formula.id(), parts.join(", "))
}
