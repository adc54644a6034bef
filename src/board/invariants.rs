//! Transition matrix invariants - sanity checks that detect bugs.
//!
//! `Board::build` only produces row-stochastic matrices, so these should
//! NEVER trigger on a built board. They exist for fuzzing and tests.

use crate::board::Board;

/// Allowed deviation of a row sum from 1.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all transition matrix invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let p = board.transitions();
    let finish = board.finish();

    if p.nrows() != finish + 1 || p.ncols() != finish + 1 {
        violations.push(InvariantViolation {
            message: format!(
                "Matrix is {}x{}, expected {}x{}",
                p.nrows(),
                p.ncols(),
                finish + 1,
                finish + 1
            ),
        });
        return violations;
    }

    for (row, values) in p.row_iter().enumerate() {
        if let Some(col) = values.iter().position(|&x| !(0.0..=1.0).contains(&x)) {
            violations.push(InvariantViolation {
                message: format!("P[{row}][{col}] = {} is not a probability", values[col]),
            });
        }

        let sum = values.sum();
        if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            violations.push(InvariantViolation {
                message: format!("Row {row} sums to {sum}"),
            });
        }
    }

    // Finish absorbs
    if (p[(finish, finish)] - 1.0).abs() > ROW_SUM_TOLERANCE {
        violations.push(InvariantViolation {
            message: format!("Finish square {finish} is not absorbing"),
        });
    }

    // Jump rows move deterministically to their destination
    for (&from, &to) in board.jumps() {
        if from != finish && (p[(from, to)] - 1.0).abs() > ROW_SUM_TOLERANCE {
            violations.push(InvariantViolation {
                message: format!("Jump square {from} sends {} to {to}", p[(from, to)]),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::presets;

    #[test]
    fn test_presets_hold_invariants() {
        for config in presets::all() {
            let board = Board::build(&config).unwrap();
            let violations = check_invariants(&board);
            assert!(violations.is_empty(), "{}: {violations:?}", config.name);
        }
    }
}
