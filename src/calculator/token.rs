//! Tokens of the calculator edit buffer.
//!
//! Every key on the calculator maps to one or more tokens. A token knows how
//! to spell itself for the evaluator grammar and for display, so the buffer
//! never stores stand-in characters that could clash with typed input.

use std::borrow::Cow;

/// π with 17 significant digits, as fed to the evaluator.
pub const PI_LITERAL: &str = "3.1415926535897931";

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn canonical(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Subtract => " - ",
            Self::Multiply => " × ",
            Self::Divide => " ÷ ",
        }
    }
}

/// Functions available on the advanced keyboard.
///
/// A function token includes its opening parenthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
}

impl Function {
    /// Name understood by the evaluator context.
    pub fn evaluator_name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    fn label(self, sqrt_symbol: &str) -> String {
        match self {
            Self::Sin => "Sin(".to_string(),
            Self::Cos => "Cos(".to_string(),
            Self::Tan => "Tan(".to_string(),
            Self::Asin => "Sin⁻¹(".to_string(),
            Self::Acos => "Cos⁻¹(".to_string(),
            Self::Atan => "Tan⁻¹(".to_string(),
            Self::Sqrt => format!("{}(", sqrt_symbol),
            Self::Log => "Log(".to_string(),
            Self::Ln => "Ln(".to_string(),
        }
    }
}

/// Broad category of a token, used to pick a display colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    Literal,
    Operator,
    Function,
}

/// Symbols used when rendering tokens that have no fixed glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub pi: String,
    pub sqrt: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            pi: "π".to_string(),
            sqrt: "√".to_string(),
        }
    }
}

/// A single entry of the edit buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A digit or the decimal point.
    Digit(char),
    Operator(Operator),
    Function(Function),
    OpenParen,
    CloseParen,
    Pi,
    Power,
}

impl Token {
    /// Map a calculator key to the tokens it inserts.
    ///
    /// Keys are the labels carried by the calculator buttons (`"Sin("`,
    /// `"Pi"`, `"^"`, ...). A key made only of digits and dots inserts one
    /// token per character. Returns `None` for keys the calculator does not
    /// have, including the `<` and `>` comparison keys, which meval cannot
    /// evaluate.
    pub fn from_key(key: &str) -> Option<Vec<Token>> {
        let single = match key {
            "+" => Token::Operator(Operator::Add),
            "-" => Token::Operator(Operator::Subtract),
            "*" => Token::Operator(Operator::Multiply),
            "/" => Token::Operator(Operator::Divide),
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            "Sin(" => Token::Function(Function::Sin),
            "Cos(" => Token::Function(Function::Cos),
            "Tan(" => Token::Function(Function::Tan),
            "Asin(" => Token::Function(Function::Asin),
            "Acos(" => Token::Function(Function::Acos),
            "Atan(" => Token::Function(Function::Atan),
            "Sqrt(" => Token::Function(Function::Sqrt),
            "Log(" => Token::Function(Function::Log),
            "Ln(" => Token::Function(Function::Ln),
            "Pi" => Token::Pi,
            "^" => Token::Power,
            _ => {
                if !key.is_empty() && key.chars().all(is_digit_char) {
                    return Some(key.chars().map(Token::Digit).collect());
                }
                return None;
            }
        };

        Some(vec![single])
    }

    /// Spelling of this token in the evaluator grammar.
    pub fn canonical(&self) -> Cow<'static, str> {
        match self {
            Self::Digit(c) => Cow::Owned(c.to_string()),
            Self::Operator(op) => Cow::Borrowed(op.canonical()),
            Self::Function(f) => Cow::Owned(format!("{}(", f.evaluator_name())),
            Self::OpenParen => Cow::Borrowed("("),
            Self::CloseParen => Cow::Borrowed(")"),
            Self::Pi => Cow::Borrowed(PI_LITERAL),
            Self::Power => Cow::Borrowed("^"),
        }
    }

    /// Un-styled display spelling of this token.
    pub fn label(&self, symbols: &Symbols) -> Cow<'static, str> {
        match self {
            Self::Digit(c) => Cow::Owned(c.to_string()),
            Self::Operator(op) => Cow::Borrowed(op.label()),
            Self::Function(f) => Cow::Owned(f.label(&symbols.sqrt)),
            Self::OpenParen => Cow::Borrowed("("),
            Self::CloseParen => Cow::Borrowed(")"),
            Self::Pi => Cow::Owned(symbols.pi.clone()),
            Self::Power => Cow::Borrowed("^"),
        }
    }

    pub fn class(&self) -> TokenClass {
        match self {
            Self::Digit(_) => TokenClass::Literal,
            Self::Function(_) => TokenClass::Function,
            Self::Operator(_) | Self::OpenParen | Self::CloseParen | Self::Pi | Self::Power => {
                TokenClass::Operator
            }
        }
    }
}

pub(crate) fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys() {
        assert_eq!(
            Token::from_key("Asin("),
            Some(vec![Token::Function(Function::Asin)])
        );
        assert_eq!(Token::from_key("Pi"), Some(vec![Token::Pi]));
        assert_eq!(Token::from_key("^"), Some(vec![Token::Power]));
    }

    #[test]
    fn test_number_key_splits_into_digits() {
        assert_eq!(
            Token::from_key("1.5"),
            Some(vec![Token::Digit('1'), Token::Digit('.'), Token::Digit('5')])
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert_eq!(Token::from_key(""), None);
        assert_eq!(Token::from_key("Sinh("), None);
        assert_eq!(Token::from_key("~"), None);
        assert_eq!(Token::from_key("<"), None);
    }

    #[test]
    fn test_canonical_spellings() {
        assert_eq!(Token::Pi.canonical(), PI_LITERAL);
        assert_eq!(Token::Power.canonical(), "^");
        assert_eq!(Token::Function(Function::Log).canonical(), "log(");
        assert_eq!(Token::Operator(Operator::Divide).canonical(), "/");
    }

    #[test]
    fn test_labels_use_symbols() {
        let symbols = Symbols::default();
        assert_eq!(Token::Function(Function::Sqrt).label(&symbols), "√(");
        assert_eq!(Token::Function(Function::Acos).label(&symbols), "Cos⁻¹(");
        assert_eq!(Token::Operator(Operator::Multiply).label(&symbols), " × ");
        assert_eq!(Token::Pi.label(&symbols), "π");
    }

    #[test]
    fn test_pi_literal_has_17_significant_digits() {
        let digits = PI_LITERAL.chars().filter(|c| c.is_ascii_digit()).count();
        assert_eq!(digits, 17);
    }
}
