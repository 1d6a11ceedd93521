//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Edit an expression as a list of typed tokens
//! - Evaluate expressions using meval, in degrees or radians
//! - Keep a session with history, as the calculator screen does
//! - Copy results to the clipboard

mod buffer;
mod clipboard;
mod error;
mod evaluation;
mod session;
mod token;

pub use buffer::ExpressionBuffer;
pub use clipboard::{copy_result, copy_to_clipboard};
pub use error::CalcError;
pub use evaluation::{
    AngleUnit, CalculatorResult, evaluate, evaluate_buffer, format_display, format_plain,
};
pub use session::Calculator;
pub use token::{Function, Operator, PI_LITERAL, Symbols, Token, TokenClass};
