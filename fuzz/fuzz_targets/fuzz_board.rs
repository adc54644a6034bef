#![no_main]

use arbitrary::Arbitrary;
use chutes::board::check_invariants;
use chutes::{Board, BoardConfig, Game};
use libfuzzer_sys::fuzz_target;

/// Structured input for board fuzzing.
#[derive(Arbitrary, Debug)]
struct BoardInput {
    /// Square count (capped to keep the matrices small).
    squares: u8,
    /// Die range (capped).
    die: u8,
    /// Raw jump pairs, folded onto the board.
    jumps: Vec<(u8, u8)>,
}

fuzz_target!(|input: BoardInput| {
    let squares = usize::from(input.squares % 64);
    let die = usize::from(input.die % 12);
    let span = squares + 1;
    let jumps = input
        .jumps
        .iter()
        .take(16)
        .map(|&(from, to)| (usize::from(from) % span, usize::from(to) % span));

    let config = BoardConfig::new("fuzz", squares, die, jumps);

    // Invalid boards must be rejected, never panic
    let board = match Board::build(&config) {
        Ok(b) => b,
        Err(_) => return,
    };

    let violations = check_invariants(&board);
    assert!(violations.is_empty(), "Invariant violations: {violations:?}");

    let game = match Game::new(&config) {
        Ok(g) => g,
        Err(e) => panic!("Built board failed analysis: {e}"),
    };

    let expected = game.expected_moves();
    assert!(expected.is_finite() && expected >= 1.0, "Expected moves {expected}");

    let cdf = game.distribution().cdf();
    assert!(
        cdf.windows(2).all(|w| w[0] <= w[1]),
        "Completion curve decreased"
    );

    if let Some(median) = game.median_moves().converged() {
        assert!(game.probability_completed_by(median) >= 0.5);
    }
});
