//! Terminal rendering of expressions, results and errors.
//!
//! Styling is always computed from clean tokens or plain text, so rendering
//! the same buffer twice gives the same output.

use std::ops::Range;

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::calculator::{ExpressionBuffer, Symbols, TokenClass};
use crate::config::DisplayConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub operator_color: Rgb,
    pub function_color: Rgb,
    pub error_color: Rgb,
    pub symbols: Symbols,
    /// Paint with colours at all. Whether `colored` actually emits them is
    /// decided by `colored::control`.
    pub styled: bool,
}

impl Theme {
    pub fn from_config(config: &DisplayConfig) -> Result<Self> {
        let color = |name: &str, value: &str| {
            Rgb::from_hex(value).ok_or_else(|| anyhow!("invalid {} `{}`", name, value))
        };

        Ok(Self {
            operator_color: color("operator_color", &config.operator_color)?,
            function_color: color("function_color", &config.function_color)?,
            error_color: color("error_color", &config.error_color)?,
            symbols: Symbols {
                pi: config.pi_symbol.clone(),
                sqrt: config.sqrt_symbol.clone(),
            },
            styled: config.styled,
        })
    }

    /// Plain theme used when output is not a terminal.
    pub fn plain(mut self) -> Self {
        self.styled = false;
        self
    }

    fn paint(&self, out: &mut String, color: Rgb, text: &str) {
        if self.styled {
            let Rgb(r, g, b) = color;
            out.push_str(&text.truecolor(r, g, b).to_string());
        } else {
            out.push_str(text);
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            operator_color: Rgb(0xFF, 0x99, 0x33),
            function_color: Rgb(0x66, 0xB2, 0xFF),
            error_color: Rgb(0xFF, 0x55, 0x55),
            symbols: Symbols::default(),
            styled: false,
        }
    }
}

/// Render the buffer with operators and functions highlighted.
pub fn render_buffer(buffer: &ExpressionBuffer, theme: &Theme) -> String {
    let mut out = String::new();
    for token in buffer.tokens() {
        let label = token.label(&theme.symbols);
        match token.class() {
            TokenClass::Literal => out.push_str(&label),
            TokenClass::Operator => theme.paint(&mut out, theme.operator_color, &label),
            TokenClass::Function => theme.paint(&mut out, theme.function_color, &label),
        }
    }
    out
}

pub fn render_error(message: &str, theme: &Theme) -> String {
    let mut out = String::new();
    theme.paint(&mut out, theme.error_color, message);
    out
}

/// Render `expression = result`, painting the result as an error when the
/// calculation failed.
pub fn render_entry(expression: &str, result: &str, success: bool, theme: &Theme) -> String {
    if success {
        format!("{} = {}", expression, result)
    } else {
        format!("{} = {}", expression, render_error(result, theme))
    }
}
