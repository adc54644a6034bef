// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Chutes: absorbing Markov chain analysis of snakes-and-ladders style games.
//!
//! A board is a linear track of squares `0..=n`, a uniform die `1..=m`, and
//! a map of jump squares (ladders and chutes). This crate models one player's
//! progress as an absorbing Markov chain and derives the distribution of the
//! number of moves needed to reach square `n`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Game (queries)               │
//! ├───────────────────────┬──────────────────────┤
//! │  Absorption           │  Distribution        │
//! │  N = (I - Q)^-1       │  c(k) = P^k[0][n]    │
//! │  mean, variance       │  median, mode, min   │
//! ├───────────────────────┴──────────────────────┤
//! │        Board (transition matrix P)           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod absorption;
pub mod board;
pub mod distribution;
pub mod error;
pub mod game;

pub use error::{AnalysisError, AnalysisResult, ConfigError};

// Re-export key types at crate root for convenience
pub use absorption::Absorption;
pub use board::{Board, BoardConfig};
pub use distribution::{Distribution, SearchConfig, SearchOutcome};
pub use game::{Game, GameSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compose() {
        let game = Game::new(&board::presets::curious_george()).unwrap();
        assert_eq!(game.board().squares(), 11);
        assert_eq!(game.near_certain_bound(), SearchOutcome::Converged(15));
    }
}
