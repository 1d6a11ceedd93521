use thiserror::Error;

/// Errors raised while editing the calculator buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("unknown calculator key `{0}`")]
    UnknownKey(String),

    #[error("unexpected `{found}` at position {index}")]
    UnknownToken { index: usize, found: String },

    #[error("failed to access clipboard: {0}")]
    Clipboard(String),
}
