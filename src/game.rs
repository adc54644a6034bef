//! Per-game query surface.
//!
//! A [`Game`] is built once from a [`BoardConfig`] and answers every
//! statistic read-only. The board, fundamental matrix, and tabulated
//! completion curve are all fixed at construction.

use crate::absorption::Absorption;
use crate::board::{Board, BoardConfig};
use crate::distribution::{Distribution, SearchConfig, SearchOutcome};
use crate::error::AnalysisResult;
use serde::Serialize;

/// Square every game starts on.
pub const START: usize = 0;

/// An analyzed board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    absorption: Absorption,
    distribution: Distribution,
}

impl Game {
    /// Build and analyze a board with the default search thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is invalid or the fundamental
    /// matrix cannot be computed.
    pub fn new(config: &BoardConfig) -> AnalysisResult<Self> {
        Self::with_search(config, SearchConfig::default())
    }

    /// Build and analyze a board with custom search thresholds.
    ///
    /// Completion probabilities do not depend on the fundamental matrix. A
    /// caller that still wants them when the solve breaks down can build the
    /// [`Board`] and pass it to [`Distribution::new`] directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is invalid or the fundamental
    /// matrix cannot be computed.
    pub fn with_search(config: &BoardConfig, search: SearchConfig) -> AnalysisResult<Self> {
        let board = Board::build(config)?;
        let absorption = Absorption::from_board(&board)?;
        let distribution = Distribution::new(&board, search);
        Ok(Self {
            board,
            absorption,
            distribution,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.board.name()
    }

    /// The underlying board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fundamental matrix and moments.
    #[must_use]
    pub const fn absorption(&self) -> &Absorption {
        &self.absorption
    }

    /// Tabulated move-count distribution.
    #[must_use]
    pub const fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Expected moves to finish from the start square.
    #[must_use]
    pub fn expected_moves(&self) -> f64 {
        self.absorption.expected_moves()[START]
    }

    /// Variance of the moves to finish from the start square.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.absorption.variance()[START]
    }

    /// Standard deviation of the moves to finish from the start square.
    ///
    /// # Errors
    ///
    /// Returns an error if the variance is negative beyond round-off.
    pub fn std_dev(&self) -> AnalysisResult<f64> {
        self.absorption.std_dev_at(START)
    }

    /// Median number of moves.
    #[must_use]
    pub fn median_moves(&self) -> SearchOutcome {
        self.distribution.median_moves()
    }

    /// Most likely numbers of moves.
    #[must_use]
    pub fn mode_moves(&self) -> Vec<u32> {
        self.distribution.mode_moves()
    }

    /// Fewest moves that can finish.
    #[must_use]
    pub fn min_moves(&self) -> SearchOutcome {
        self.distribution.min_moves()
    }

    /// Moves needed to finish with near certainty.
    #[must_use]
    pub const fn near_certain_bound(&self) -> SearchOutcome {
        self.distribution.near_certain_bound()
    }

    /// Probability of finishing within `moves` moves.
    #[must_use]
    pub fn probability_completed_by(&self, moves: u32) -> f64 {
        self.distribution.probability_completed_by(moves)
    }

    /// Probability of finishing on exactly move `moves`.
    #[must_use]
    pub fn probability_completed_at(&self, moves: u32) -> f64 {
        self.distribution.probability_completed_at(moves)
    }

    /// Expected moves from every square, finish included (as 0).
    #[must_use]
    pub fn expected_moves_by_square(&self) -> Vec<f64> {
        self.absorption.expected_moves_by_square()
    }

    /// Variance from every square, finish included (as 0).
    #[must_use]
    pub fn variance_by_square(&self) -> Vec<f64> {
        self.absorption.variance_by_square()
    }

    /// Collect every scalar statistic.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard deviation cannot be taken.
    pub fn summary(&self) -> AnalysisResult<GameSummary> {
        Ok(GameSummary {
            name: self.name().to_string(),
            squares: self.board.squares(),
            die: self.board.die(),
            expected_moves: self.expected_moves(),
            median_moves: self.median_moves(),
            mode_moves: self.mode_moves(),
            min_moves: self.min_moves(),
            variance: self.variance(),
            std_dev: self.std_dev()?,
            near_certain_bound: self.near_certain_bound(),
        })
    }
}

/// Scalar statistics of one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    /// Display name.
    pub name: String,
    /// Number of ordinary squares.
    pub squares: usize,
    /// Die range.
    pub die: usize,
    /// Mean moves to finish.
    pub expected_moves: f64,
    /// Median moves to finish.
    pub median_moves: SearchOutcome,
    /// Most likely move counts.
    pub mode_moves: Vec<u32>,
    /// Fewest possible moves.
    pub min_moves: SearchOutcome,
    /// Variance of the moves to finish.
    pub variance: f64,
    /// Standard deviation of the moves to finish.
    pub std_dev: f64,
    /// Moves to finish with near certainty.
    pub near_certain_bound: SearchOutcome,
}

impl GameSummary {
    /// Check if every bounded search met its threshold.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.median_moves.is_converged()
            && self.min_moves.is_converged()
            && self.near_certain_bound.is_converged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::presets;
    use crate::error::{AnalysisError, ConfigError};

    #[test]
    fn test_distribution_builds_without_solve() {
        let game = Game::new(&presets::curious_george()).unwrap();
        let standalone = Distribution::new(game.board(), SearchConfig::default());
        assert_eq!(standalone.cdf(), game.distribution().cdf());
        assert_eq!(standalone.median_moves(), game.median_moves());
    }

    #[test]
    fn test_curious_george_summary() {
        let game = Game::new(&presets::curious_george()).unwrap();
        let summary = game.summary().unwrap();

        assert_eq!(summary.name, "Curious George Chocolate Trail");
        assert!((summary.expected_moves - 5.0).abs() < 1e-9);
        assert!((summary.std_dev - 2.0).abs() < 1e-9);
        assert_eq!(summary.median_moves, SearchOutcome::Converged(4));
        assert_eq!(summary.min_moves, SearchOutcome::Converged(3));
        assert_eq!(summary.mode_moves, vec![3, 4]);
        assert!(summary.converged());
    }

    #[test]
    fn test_rejects_invalid_board() {
        let err = Game::new(&BoardConfig::new("bad", 3, 0, [])).unwrap_err();
        assert_eq!(err, AnalysisError::Config(ConfigError::NoDieFaces));
    }

    #[test]
    fn test_summary_serializes_outcomes() {
        let game = Game::new(&BoardConfig::new("one", 1, 1, [])).unwrap();
        let json = serde_json::to_value(game.summary().unwrap()).unwrap();

        assert_eq!(json["median_moves"]["status"], "converged");
        assert_eq!(json["median_moves"]["moves"], 1);
        assert_eq!(json["mode_moves"], serde_json::json!([1]));
    }
}
