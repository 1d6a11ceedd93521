//! Calculation history.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One finished calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as it was displayed (un-styled).
    pub expression: String,
    /// The result, or the error message for failed calculations.
    pub result: String,
    pub success: bool,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>, success: bool) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            success,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Append-only list of calculations, cleared only on request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first, separated by blank lines.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Load a history file. A missing file yields an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no history file, starting empty");
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read history from {}", path.display()))?;
        let history: History = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse history in {}", path.display()))?;

        debug!(entries = history.len(), "history loaded");
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write history to {}", path.display()))?;

        info!(entries = self.len(), path = %path.display(), "history saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> History {
        let mut history = History::new();
        history.push(HistoryEntry::new("2 + 2", "4", true));
        history.push(HistoryEntry::new("(2 + 3", "Syntax Error", false));
        history
    }

    #[test]
    fn test_append_and_render() {
        let history = sample();
        assert_eq!(history.len(), 2);
        assert_eq!(history.render(), "2 + 2 = 4\n\n(2 + 3 = Syntax Error");
        assert!(!history.last().unwrap().success);
    }

    #[test]
    fn test_clear() {
        let mut history = sample();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.render(), "");
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("champis-calc-history-{}", std::process::id()));
        let path = dir.join("history.json");

        let history = sample();
        history.save(&path).unwrap();
        let loaded = History::load(&path).unwrap();
        assert_eq!(loaded, history);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("champis-calc-does-not-exist/history.json");
        assert!(History::load(&path).unwrap().is_empty());
    }
}
