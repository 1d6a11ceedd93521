//! The calculator edit buffer.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::CalcError;
use super::token::{Function, Operator, Symbols, Token, is_digit_char};

lazy_static! {
    /// One token of free text typed at a terminal. Alternatives are tried
    /// in order, so longer spellings come first.
    static ref TEXT_TOKEN: Regex = Regex::new(
        r"(?ix)^(?:
            (?P<func>asin|acos|atan|sin|cos|tan|sqrt|log|ln)\s*\(
          | (?P<root>√\s*\()
          | (?P<num>[0-9.]+)
          | (?P<pi>pi|π)
          | (?P<pow>\*\*|\^)
          | (?P<op>[-+*/×÷x])
          | (?P<open>\()
          | (?P<close>\))
        )"
    )
    .unwrap();
}

/// Ordered list of tokens making up the expression being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    tokens: Vec<Token>,
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse free text such as `sin(30) * 2 ÷ pi`.
    ///
    /// Whitespace is ignored. Function names are case-insensitive and must be
    /// followed by an opening parenthesis.
    pub fn parse(text: &str) -> Result<Self, CalcError> {
        let mut buffer = Self::new();
        let mut index = 0;

        while index < text.len() {
            let rest = &text[index..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                break;
            }
            index += rest.len() - trimmed.len();

            let Some(caps) = TEXT_TOKEN.captures(trimmed) else {
                let found = trimmed.chars().next().map(String::from).unwrap_or_default();
                return Err(CalcError::UnknownToken { index, found });
            };

            if let Some(name) = caps.name("func") {
                buffer.push(Token::Function(function_from_name(name.as_str())));
            } else if caps.name("root").is_some() {
                buffer.push(Token::Function(Function::Sqrt));
            } else if let Some(num) = caps.name("num") {
                buffer.tokens.extend(num.as_str().chars().map(Token::Digit));
            } else if caps.name("pi").is_some() {
                buffer.push(Token::Pi);
            } else if caps.name("pow").is_some() {
                buffer.push(Token::Power);
            } else if let Some(op) = caps.name("op") {
                buffer.push(Token::Operator(operator_from_symbol(op.as_str())));
            } else if caps.name("open").is_some() {
                buffer.push(Token::OpenParen);
            } else if caps.name("close").is_some() {
                buffer.push(Token::CloseParen);
            }

            index += caps[0].len();
        }

        Ok(buffer)
    }

    /// Build a buffer holding a previously computed result, e.g. `-2.5`.
    pub fn from_result(text: &str) -> Self {
        let tokens = text
            .chars()
            .filter_map(|c| match c {
                '-' => Some(Token::Operator(Operator::Subtract)),
                c if is_digit_char(c) => Some(Token::Digit(c)),
                _ => None,
            })
            .collect();
        Self { tokens }
    }

    /// Append the tokens for one calculator key.
    pub fn write(&mut self, key: &str) -> Result<(), CalcError> {
        let tokens = Token::from_key(key).ok_or_else(|| CalcError::UnknownKey(key.to_string()))?;
        self.tokens.extend(tokens);
        Ok(())
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Remove the last token. Does nothing on an empty buffer.
    pub fn backspace(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn extend_from(&mut self, other: &ExpressionBuffer) {
        self.tokens.extend_from_slice(&other.tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Lower the buffer to the evaluator grammar.
    pub fn to_expression(&self) -> String {
        self.tokens.iter().map(|t| t.canonical()).collect()
    }

    /// Un-styled display text using the given symbols.
    pub fn label(&self, symbols: &Symbols) -> String {
        self.tokens.iter().map(|t| t.label(symbols)).collect()
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(&Symbols::default()))
    }
}

fn function_from_name(name: &str) -> Function {
    match name.to_ascii_lowercase().as_str() {
        "sin" => Function::Sin,
        "cos" => Function::Cos,
        "tan" => Function::Tan,
        "asin" => Function::Asin,
        "acos" => Function::Acos,
        "atan" => Function::Atan,
        "sqrt" => Function::Sqrt,
        "log" => Function::Log,
        _ => Function::Ln,
    }
}

fn operator_from_symbol(symbol: &str) -> Operator {
    match symbol {
        "+" => Operator::Add,
        "-" => Operator::Subtract,
        "/" | "÷" => Operator::Divide,
        _ => Operator::Multiply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::token::PI_LITERAL;

    #[test]
    fn test_write_and_lower() {
        let mut buffer = ExpressionBuffer::new();
        for key in ["Sin(", "30", ")", "/", "2", "^", "2"] {
            buffer.write(key).unwrap();
        }
        assert_eq!(buffer.to_expression(), "sin(30)/2^2");
        assert_eq!(buffer.to_string(), "Sin(30) ÷ 2^2");
    }

    #[test]
    fn test_write_unknown_key() {
        let mut buffer = ExpressionBuffer::new();
        assert_eq!(
            buffer.write("<"),
            Err(CalcError::UnknownKey("<".to_string()))
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_removes_whole_token() {
        let mut buffer = ExpressionBuffer::new();
        buffer.write("2").unwrap();
        buffer.write("Log(").unwrap();
        assert_eq!(buffer.backspace(), Some(Token::Function(Function::Log)));
        assert_eq!(buffer.to_expression(), "2");
        buffer.backspace();
        assert_eq!(buffer.backspace(), None);
    }

    #[test]
    fn test_parse_free_text() {
        let buffer = ExpressionBuffer::parse("SIN(30) × 2 ÷ pi").unwrap();
        assert_eq!(
            buffer.to_expression(),
            format!("sin(30)*2/{}", PI_LITERAL)
        );
    }

    #[test]
    fn test_parse_power_spellings() {
        let a = ExpressionBuffer::parse("2**3").unwrap();
        let b = ExpressionBuffer::parse("2^3").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_expression(), "2^3");
    }

    #[test]
    fn test_parse_root_and_logs() {
        let buffer = ExpressionBuffer::parse("√(16) + log (100) - ln(1)").unwrap();
        assert_eq!(buffer.to_expression(), "sqrt(16)+log(100)-ln(1)");
    }

    #[test]
    fn test_parse_reports_position() {
        let err = ExpressionBuffer::parse("2 + foo").unwrap_err();
        assert_eq!(
            err,
            CalcError::UnknownToken {
                index: 4,
                found: "f".to_string()
            }
        );
    }

    #[test]
    fn test_from_result() {
        let buffer = ExpressionBuffer::from_result("-2.5");
        assert_eq!(buffer.to_expression(), "-2.5");
    }
}
