//! CLI command implementations for Chutes.

pub(crate) mod analyze;
pub(crate) mod boards;
pub(crate) mod curve;
pub(crate) mod validate;

mod output;

use chutes::board::presets;
use chutes::{AnalysisError, BoardConfig, ConfigError};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Series emitted by the `curve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Series {
    /// Probability of finishing on exactly k moves.
    Pmf,
    /// Probability of finishing within k moves.
    Cdf,
    /// Expected moves to finish from each square.
    Expected,
    /// Variance of moves to finish from each square.
    Variance,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Resolve a board argument: a preset name first, then a JSON file path.
pub(crate) fn resolve_board(arg: &str) -> Result<BoardConfig, CliError> {
    if let Some(config) = presets::find(arg) {
        return Ok(config);
    }

    let path = Path::new(arg);
    if path.is_file() {
        return Ok(BoardConfig::load(path)?);
    }

    let known: Vec<String> = presets::all()
        .iter()
        .map(|config| presets::slug(&config.name))
        .collect();
    Err(CliError::new(format!(
        "Unknown board '{arg}': not a preset ({}) or a readable file",
        known.join(", ")
    )))
}
