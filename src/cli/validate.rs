//! Board file validation command implementation.

use super::CliError;
use chutes::board::check_invariants;
use chutes::{Absorption, Board, BoardConfig};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error at the first check the board file fails.
pub(crate) fn execute(file: &Path) -> Result<(), CliError> {
    println!("Validating: {}", file.display());
    println!();

    let config = BoardConfig::load(file);
    print_check("Board file parses", config.is_ok());
    let config = config?;

    let board = Board::build(&config);
    print_check("Squares, die, and jumps in range; finish reachable", board.is_ok());
    let board = board?;

    let violations = check_invariants(&board);
    print_check("Transition rows sum to 1", violations.is_empty());
    if let Some(first) = violations.first() {
        return Err(CliError::new(first.to_string()));
    }

    let absorption = Absorption::from_board(&board);
    print_check("Fundamental matrix invertible", absorption.is_ok());
    let absorption = absorption?;

    println!();
    println!("Summary:");
    println!("  Name:           {}", board.name());
    println!("  Squares:        {}", board.squares());
    println!("  Die:            1-{}", board.die());
    println!("  Jump squares:   {}", board.jumps().len());
    println!("  Expected moves: {:.4}", absorption.expected_moves()[0]);

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
