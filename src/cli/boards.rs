//! Boards command implementation.

use super::output::{format_boards_csv, format_boards_text};
use super::{CliError, ReportFormat};
use chutes::board::presets;

/// Execute the boards command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn execute(format: ReportFormat) -> Result<(), CliError> {
    let boards = presets::all();

    match format {
        ReportFormat::Text => print!("{}", format_boards_text(&boards)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&boards)?),
        ReportFormat::Csv => print!("{}", format_boards_csv(&boards)),
    }

    Ok(())
}
