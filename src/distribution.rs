//! Distribution of the number of moves to finish.
//!
//! The completion curve `c(k) = P^k[0][finish]` is produced by pushing the
//! start state's distribution through P one move at a time. Absorbed mass
//! only ever grows, so `c` is non-decreasing and every order statistic is a
//! binary search for the first `k` crossing a threshold.
//!
//! The curve is tabulated once, up to the first move count where it reaches
//! [`SearchConfig::near_certain`] (or [`SearchConfig::ceiling`] moves if it
//! never does). Queries past that horizon continue from the stored state
//! without touching the table.

use crate::board::Board;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use std::fmt;

/// Hard cap on the tabulated horizon.
pub const DEFAULT_CEILING: u32 = 1000;

/// Completion probability defining the median.
pub const MEDIAN_THRESHOLD: f64 = 0.5;

/// Completion probability defining the near-certain bound.
pub const NEAR_CERTAIN_THRESHOLD: f64 = 0.999;

/// Relative tolerance for two point masses to count as tied.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// Thresholds and limits for the order-statistic searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of moves tabulated.
    pub ceiling: u32,
    /// Completion probability for the median.
    pub median: f64,
    /// Completion probability for the near-certain bound.
    pub near_certain: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            median: MEDIAN_THRESHOLD,
            near_certain: NEAR_CERTAIN_THRESHOLD,
        }
    }
}

/// Result of a bounded search over move counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "moves", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The smallest move count satisfying the threshold.
    Converged(u32),
    /// The threshold was not met within the horizon; holds the horizon.
    Exhausted(u32),
}

impl SearchOutcome {
    /// The move count, whether or not the search converged.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Converged(k) | Self::Exhausted(k) => k,
        }
    }

    /// Check if the threshold was actually met.
    #[must_use]
    pub const fn is_converged(self) -> bool {
        matches!(self, Self::Converged(_))
    }

    /// The move count if the search converged.
    #[must_use]
    pub const fn converged(self) -> Option<u32> {
        match self {
            Self::Converged(k) => Some(k),
            Self::Exhausted(_) => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged(k) => write!(f, "{k}"),
            Self::Exhausted(k) => write!(f, ">{k} (not converged)"),
        }
    }
}

/// Tabulated move-count distribution for one board.
#[derive(Debug, Clone)]
pub struct Distribution {
    /// One-step transition matrix.
    transitions: DMatrix<f64>,
    /// Index of the absorbing state.
    finish: usize,
    /// Search thresholds.
    config: SearchConfig,
    /// `cdf[k]`: probability of having finished within `k` moves.
    cdf: Vec<f64>,
    /// State distribution after the last tabulated move.
    frontier: DVector<f64>,
    /// First move count reaching `config.near_certain`.
    horizon: SearchOutcome,
}

impl Distribution {
    /// Tabulate a board's completion curve.
    #[must_use]
    pub fn new(board: &Board, config: SearchConfig) -> Self {
        Self::from_transitions(board.transitions().clone(), config)
    }

    /// Tabulate the completion curve of a raw transition matrix whose last
    /// state is absorbing and whose first state is the start.
    ///
    /// `transitions` must be square.
    #[must_use]
    pub fn from_transitions(transitions: DMatrix<f64>, config: SearchConfig) -> Self {
        let finish = transitions.nrows().saturating_sub(1);
        let mut state = DVector::<f64>::zeros(transitions.nrows());
        if let Some(start) = state.get_mut(0) {
            *start = 1.0;
        }

        let mut completed = absorbed(&state, finish);
        let mut cdf = vec![completed];
        let mut moves = 0;
        while completed < config.near_certain && moves < config.ceiling {
            state = transitions.tr_mul(&state);
            moves += 1;
            completed = absorbed(&state, finish);
            cdf.push(completed);
        }

        let horizon = if completed >= config.near_certain {
            SearchOutcome::Converged(moves)
        } else {
            SearchOutcome::Exhausted(moves)
        };

        Self {
            transitions,
            finish,
            config,
            cdf,
            frontier: state,
            horizon,
        }
    }

    /// Search thresholds in use.
    #[must_use]
    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// Smallest `k` with `probability_completed_by(k) >= near_certain`.
    ///
    /// Sizes the display horizon and bounds the other searches.
    #[must_use]
    pub const fn near_certain_bound(&self) -> SearchOutcome {
        self.horizon
    }

    /// Last tabulated move count.
    #[must_use]
    pub const fn horizon(&self) -> u32 {
        self.horizon.value()
    }

    /// Probability of having finished within `moves` moves (`P^k[0][finish]`).
    #[must_use]
    pub fn probability_completed_by(&self, moves: u32) -> f64 {
        if let Some(&p) = self.cdf.get(moves as usize) {
            return p;
        }
        let mut state = self.frontier.clone();
        for _ in self.horizon()..moves {
            state = self.transitions.tr_mul(&state);
        }
        absorbed(&state, self.finish)
    }

    /// Probability of finishing on exactly move `moves`.
    #[must_use]
    pub fn probability_completed_at(&self, moves: u32) -> f64 {
        if moves == 0 {
            return 0.0;
        }
        self.probability_completed_by(moves) - self.probability_completed_by(moves - 1)
    }

    /// Median number of moves: smallest `k` with completion `>= median`.
    #[must_use]
    pub fn median_moves(&self) -> SearchOutcome {
        let threshold = self.config.median;
        self.first_crossing(|p| p >= threshold)
    }

    /// Fewest moves that can possibly finish the game.
    #[must_use]
    pub fn min_moves(&self) -> SearchOutcome {
        self.first_crossing(|p| p > 0.0)
    }

    /// Every move count in `[1, horizon]` whose point mass equals the
    /// largest one, in increasing order.
    #[must_use]
    pub fn mode_moves(&self) -> Vec<u32> {
        let pmf = self.pmf();
        let peak = pmf.iter().copied().fold(0.0, f64::max);
        if peak <= 0.0 {
            return Vec::new();
        }

        (1..=self.horizon())
            .filter(|&k| is_tied(pmf[k as usize], peak))
            .collect()
    }

    /// Modes assuming the point masses rise to one plateau and then fall.
    ///
    /// Stops at the first strict decrease after the running maximum is set,
    /// so a later, higher peak is missed. Prefer [`Self::mode_moves`].
    #[must_use]
    pub fn mode_moves_first_peak(&self) -> Vec<u32> {
        let mut best = 0.0;
        let mut modes = Vec::new();

        for k in 1..=self.horizon() {
            let p = self.probability_completed_at(k);
            if p <= 0.0 && modes.is_empty() {
                continue;
            }
            if is_tied(p, best) {
                modes.push(k);
            } else if p > best {
                best = p;
                modes.clear();
                modes.push(k);
            } else {
                break;
            }
        }

        modes
    }

    /// Completion probabilities for `k = 0..=horizon`.
    #[must_use]
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Point masses for `k = 0..=horizon` (entry 0 is always 0).
    #[must_use]
    pub fn pmf(&self) -> Vec<f64> {
        point_masses(&self.cdf)
    }

    /// Completion probabilities for `k = 0..=moves`, past the horizon if needed.
    #[must_use]
    pub fn completion_curve(&self, moves: u32) -> Vec<f64> {
        let len = moves as usize + 1;
        let mut curve: Vec<f64> = self.cdf.iter().copied().take(len).collect();

        let mut state = self.frontier.clone();
        while curve.len() < len {
            state = self.transitions.tr_mul(&state);
            curve.push(absorbed(&state, self.finish));
        }

        curve
    }

    /// Point masses for `k = 0..=moves`, past the horizon if needed.
    #[must_use]
    pub fn point_curve(&self, moves: u32) -> Vec<f64> {
        point_masses(&self.completion_curve(moves))
    }

    /// `Σ k·P(finish at k)` for `k` up to `moves`.
    ///
    /// Approaches the expected number of moves as `moves` grows.
    #[must_use]
    pub fn truncated_mean(&self, moves: u32) -> f64 {
        self.point_curve(moves)
            .iter()
            .zip(0u32..)
            .map(|(p, k)| f64::from(k) * p)
            .sum()
    }

    /// Binary search `[0, horizon]` for the first completion probability
    /// satisfying `hit`.
    fn first_crossing(&self, hit: impl Fn(f64) -> bool) -> SearchOutcome {
        let mut lo = 0;
        let mut hi = self.horizon();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if hit(self.probability_completed_by(mid)) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        if hit(self.probability_completed_by(lo)) {
            SearchOutcome::Converged(lo)
        } else {
            SearchOutcome::Exhausted(lo)
        }
    }
}

/// Probability mass sitting in the finish state.
fn absorbed(state: &DVector<f64>, finish: usize) -> f64 {
    state.get(finish).copied().unwrap_or(0.0)
}

fn point_masses(cdf: &[f64]) -> Vec<f64> {
    let mut pmf = Vec::with_capacity(cdf.len());
    pmf.push(0.0);
    pmf.extend(cdf.windows(2).map(|w| w[1] - w[0]));
    pmf
}

fn is_tied(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs())
}
