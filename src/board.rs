//! Board model.
//!
//! Turns a declarative game description into the transition matrix of an
//! absorbing Markov chain:
//! - States `0..=squares`, with `0` the start and `squares` the finish
//! - A turn rolls a uniform die in `[1, die]`; overshooting the finish
//!   leaves the player in place
//! - Landing on a jump square redirects once (no same-turn chains)
//! - A turn that *starts* on a jump square moves to its destination

// Square counts are converted to probabilities
#![allow(clippy::cast_precision_loss)]

mod config;
mod invariants;
pub mod presets;

pub use config::BoardConfig;
pub use invariants::{InvariantViolation, ROW_SUM_TOLERANCE, check_invariants};

use crate::error::ConfigError;
use nalgebra::DMatrix;
use std::collections::{BTreeMap, VecDeque};

/// An immutable game board together with its transition matrix.
#[derive(Debug, Clone)]
pub struct Board {
    /// Display name.
    name: String,
    /// Number of ordinary squares; also the index of the finish square.
    squares: usize,
    /// Number of die faces.
    die: usize,
    /// Jump square -> destination.
    jumps: BTreeMap<usize, usize>,
    /// Row-stochastic `(squares + 1) x (squares + 1)` matrix P.
    transitions: DMatrix<f64>,
}

impl Board {
    /// Build a board from its description.
    ///
    /// # Errors
    ///
    /// Returns an error if the square count or die range is zero, a jump
    /// leaves `[0, squares]`, or some square can never reach the finish.
    pub fn build(config: &BoardConfig) -> Result<Self, ConfigError> {
        if config.squares == 0 {
            return Err(ConfigError::NoSquares);
        }
        if config.die == 0 {
            return Err(ConfigError::NoDieFaces);
        }
        if let Some((&from, &to)) = config
            .jumps
            .iter()
            .find(|&(&from, &to)| from > config.squares || to > config.squares)
        {
            return Err(ConfigError::JumpOutOfRange {
                from,
                to,
                squares: config.squares,
            });
        }

        let transitions = transition_matrix(config.squares, config.die, &config.jumps);

        if let Some(square) = first_unreachable(&transitions, config.squares) {
            return Err(ConfigError::Unreachable { square });
        }

        Ok(Self {
            name: config.name.clone(),
            squares: config.squares,
            die: config.die,
            jumps: config.jumps.clone(),
            transitions,
        })
    }

    /// Display name of the board.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of ordinary squares (the finish square's index).
    #[must_use]
    pub const fn squares(&self) -> usize {
        self.squares
    }

    /// Number of die faces.
    #[must_use]
    pub const fn die(&self) -> usize {
        self.die
    }

    /// Index of the absorbing finish state.
    #[must_use]
    pub const fn finish(&self) -> usize {
        self.squares
    }

    /// The jump map.
    #[must_use]
    pub const fn jumps(&self) -> &BTreeMap<usize, usize> {
        &self.jumps
    }

    /// Check if a square redirects the player.
    #[must_use]
    pub fn is_jump(&self, square: usize) -> bool {
        self.jumps.contains_key(&square)
    }

    /// The one-step transition matrix P.
    #[must_use]
    pub const fn transitions(&self) -> &DMatrix<f64> {
        &self.transitions
    }

    /// The n-step transition matrix `P^steps`, by binary exponentiation.
    #[must_use]
    pub fn step_matrix(&self, steps: u32) -> DMatrix<f64> {
        let size = self.squares + 1;
        let mut result = DMatrix::<f64>::identity(size, size);
        let mut base = self.transitions.clone();
        let mut remaining = steps;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = &base * &base;
            }
        }

        result
    }

    /// Recover the description this board was built from.
    #[must_use]
    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            name: self.name.clone(),
            squares: self.squares,
            die: self.die,
            jumps: self.jumps.clone(),
        }
    }
}

/// Assemble P for a validated description.
fn transition_matrix(squares: usize, die: usize, jumps: &BTreeMap<usize, usize>) -> DMatrix<f64> {
    let size = squares + 1;
    let face = 1.0 / die as f64;
    let mut p = DMatrix::<f64>::zeros(size, size);

    for square in 0..squares {
        if let Some(&dest) = jumps.get(&square) {
            p[(square, dest)] = 1.0;
            continue;
        }

        // Rolls past the finish keep the player in place.
        let in_range = die.min(squares - square);
        for roll in 1..=in_range {
            let landed = square + roll;
            let dest = jumps.get(&landed).copied().unwrap_or(landed);
            p[(square, dest)] += face;
        }
        let overshoot = die - in_range;
        if overshoot > 0 {
            p[(square, square)] += overshoot as f64 * face;
        }
    }

    p[(squares, squares)] = 1.0;
    p
}

/// Lowest square with no positive-probability path to the finish.
///
/// Breadth-first search backwards from the finish over the edges of P.
fn first_unreachable(p: &DMatrix<f64>, finish: usize) -> Option<usize> {
    let size = p.nrows();
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); size];
    for from in 0..size {
        for to in 0..size {
            if from != to && p[(from, to)] > 0.0 {
                predecessors[to].push(from);
            }
        }
    }

    let mut reaches = vec![false; size];
    reaches[finish] = true;
    let mut queue = VecDeque::from([finish]);
    while let Some(square) = queue.pop_front() {
        for &pred in &predecessors[square] {
            if !reaches[pred] {
                reaches[pred] = true;
                queue.push_back(pred);
            }
        }
    }

    reaches.iter().position(|&ok| !ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_plain_track_rows() {
        let board = Board::build(&BoardConfig::new("plain", 3, 2, [])).unwrap();
        let p = board.transitions();

        assert!(approx(p[(0, 1)], 0.5));
        assert!(approx(p[(0, 2)], 0.5));
        // Square 2 rolls 1 to finish, 2 overshoots.
        assert!(approx(p[(2, 3)], 0.5));
        assert!(approx(p[(2, 2)], 0.5));
        assert!(approx(p[(3, 3)], 1.0));
    }

    #[test]
    fn test_landing_redirects_once() {
        // 1 -> 3 and 3 -> 5: landing on 1 stops at 3 for this turn.
        let board = Board::build(&BoardConfig::new("chain", 5, 1, [(1, 3), (3, 5)])).unwrap();
        let p = board.transitions();

        assert!(approx(p[(0, 3)], 1.0));
        assert!(approx(p[(0, 5)], 0.0));
        // Jump rows are deterministic.
        assert!(approx(p[(1, 3)], 1.0));
        assert!(approx(p[(3, 5)], 1.0));
    }

    #[test]
    fn test_die_larger_than_board() {
        let board = Board::build(&BoardConfig::new("short", 1, 6, [])).unwrap();
        let p = board.transitions();
        assert!(approx(p[(0, 1)], 1.0 / 6.0));
        assert!(approx(p[(0, 0)], 5.0 / 6.0));
    }

    #[test]
    fn test_rejects_bad_config() {
        assert_eq!(
            Board::build(&BoardConfig::new("empty", 0, 6, [])).unwrap_err(),
            ConfigError::NoSquares
        );
        assert_eq!(
            Board::build(&BoardConfig::new("blank die", 5, 0, [])).unwrap_err(),
            ConfigError::NoDieFaces
        );
        assert_eq!(
            Board::build(&BoardConfig::new("off board", 5, 2, [(2, 9)])).unwrap_err(),
            ConfigError::JumpOutOfRange {
                from: 2,
                to: 9,
                squares: 5
            }
        );
    }

    #[test]
    fn test_rejects_closed_loop() {
        // 2 <-> 3 bounce forever; with a die of 1, square 1 lands on 2 too.
        let err = Board::build(&BoardConfig::new("loop", 5, 1, [(2, 3), (3, 2)])).unwrap_err();
        assert_eq!(err, ConfigError::Unreachable { square: 0 });
    }

    #[test]
    fn test_self_jump_is_unreachable() {
        let err = Board::build(&BoardConfig::new("stuck", 4, 2, [(2, 2)])).unwrap_err();
        assert_eq!(err, ConfigError::Unreachable { square: 2 });
    }

    #[test]
    fn test_step_matrix_matches_repeated_product() {
        let board = Board::build(&presets::curious_george()).unwrap();
        let p = board.transitions();
        let by_hand = p * p * p * p * p;
        let fast = board.step_matrix(5);
        assert!((by_hand - fast).abs().max() < 1e-12);

        let size = board.squares() + 1;
        assert!((board.step_matrix(0) - DMatrix::<f64>::identity(size, size)).abs().max() < 1e-15);
    }

    #[test]
    fn test_config_round_trip() {
        let config = presets::curious_george();
        let board = Board::build(&config).unwrap();
        assert_eq!(board.config(), config);
        assert!(board.is_jump(8));
        assert!(!board.is_jump(2));
    }
}
