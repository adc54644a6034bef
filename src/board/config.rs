//! Declarative board descriptions.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A board as supplied by the caller.
///
/// Serialized as JSON with the jump map keyed by square:
///
/// ```json
/// {"name": "Tiny", "squares": 5, "die": 2, "jumps": {"3": 0}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Label used for display only.
    pub name: String,
    /// Number of ordinary squares; square `squares` is the finish.
    pub squares: usize,
    /// Die range: each turn moves a uniform `1..=die` squares.
    pub die: usize,
    /// Jump square -> destination square.
    #[serde(default)]
    pub jumps: BTreeMap<usize, usize>,
}

impl BoardConfig {
    /// Create a board description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        squares: usize,
        die: usize,
        jumps: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        Self {
            name: name.into(),
            squares,
            die,
            jumps: jumps.into_iter().collect(),
        }
    }

    /// Parse a board description from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid description.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a board description from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_keys() {
        let config =
            BoardConfig::from_json_str(r#"{"name": "Tiny", "squares": 5, "die": 2, "jumps": {"3": 0}}"#)
                .unwrap();
        assert_eq!(config, BoardConfig::new("Tiny", 5, 2, [(3, 0)]));
    }

    #[test]
    fn test_jumps_default_empty() {
        let config = BoardConfig::from_json_str(r#"{"name": "Bare", "squares": 9, "die": 6}"#).unwrap();
        assert!(config.jumps.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = BoardConfig::from_json_str(r#"{"name": "Broken", "squares": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_output_reparses() {
        let config = BoardConfig::new("Out", 12, 3, [(4, 9), (10, 2)]);
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"4\": 9"));
        assert_eq!(BoardConfig::from_json_str(&json).unwrap(), config);
    }
}
