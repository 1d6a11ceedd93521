//! Clipboard functionality for copying calculator results.

use arboard::Clipboard;
use tracing::debug;

use super::{CalcError, CalculatorResult};

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), CalcError> {
    let mut clipboard = Clipboard::new().map_err(|e| CalcError::Clipboard(e.to_string()))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| CalcError::Clipboard(e.to_string()))?;

    debug!(%text, "copied to clipboard");
    Ok(())
}

/// Copy a result to the clipboard.
///
/// Successful results copy the raw number; failures copy the message so the
/// user can still paste it somewhere.
pub fn copy_result(result: &CalculatorResult) -> Result<(), CalcError> {
    copy_to_clipboard(result.clipboard().unwrap_or(&result.result_text))
}
