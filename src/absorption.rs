//! Absorption analytics.
//!
//! Closed-form moments of the number of moves to finish, derived from the
//! fundamental matrix `N = (I - Q)^-1`:
//! - expected moves `t = N·1`
//! - variance `(2N - I)·t - t⊙t`

use crate::board::Board;
use crate::error::{AnalysisError, AnalysisResult, ConfigError};
use nalgebra::{DMatrix, DVector};

/// Pivots below this magnitude mark `I - Q` as singular.
pub const SINGULAR_PIVOT: f64 = 1e-12;

/// Relative slack under zero accepted as round-off in a variance entry.
pub const VARIANCE_ROUND_OFF: f64 = 1e-9;

/// Fundamental matrix of a board's transient squares and its moments.
#[derive(Debug, Clone)]
pub struct Absorption {
    /// `N[i][j]`: expected visits to square `j` starting from square `i`.
    fundamental: DMatrix<f64>,
    /// Expected moves to finish from each transient square.
    expected: DVector<f64>,
    /// Variance of moves to finish from each transient square.
    variance: DVector<f64>,
}

impl Absorption {
    /// Analyze a built board.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NumericallySingular`] if `I - Q` cannot be
    /// inverted. `Board::build` rejects such boards, so this only fires on
    /// numerical breakdown.
    pub fn from_board(board: &Board) -> AnalysisResult<Self> {
        Self::from_transition_matrix(board.transitions())
    }

    /// Analyze a raw transition matrix whose last state is absorbing.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square with at least one
    /// transient state, or if `I - Q` is (near-)singular.
    pub fn from_transition_matrix(p: &DMatrix<f64>) -> AnalysisResult<Self> {
        if !p.is_square() || p.nrows() < 2 {
            return Err(ConfigError::NoSquares.into());
        }

        let transient = p.nrows() - 1;
        let q = DMatrix::from_fn(transient, transient, |i, j| p[(i, j)]);
        let identity = DMatrix::<f64>::identity(transient, transient);
        let fundamental = invert(&identity - &q)?;

        let expected = &fundamental * DVector::from_element(transient, 1.0);
        let variance =
            (&fundamental * 2.0 - &identity) * &expected - expected.component_mul(&expected);

        Ok(Self {
            fundamental,
            expected,
            variance,
        })
    }

    /// The fundamental matrix N.
    #[must_use]
    pub const fn fundamental(&self) -> &DMatrix<f64> {
        &self.fundamental
    }

    /// Number of transient squares.
    #[must_use]
    pub fn transient(&self) -> usize {
        self.expected.len()
    }

    /// Expected moves to finish from each transient square (row sums of N).
    #[must_use]
    pub const fn expected_moves(&self) -> &DVector<f64> {
        &self.expected
    }

    /// Variance of moves to finish from each transient square.
    ///
    /// Entries are raw; tiny negative round-off is not clamped here.
    #[must_use]
    pub const fn variance(&self) -> &DVector<f64> {
        &self.variance
    }

    /// Standard deviation of moves to finish from each transient square.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NegativeVariance`] if an entry is negative
    /// beyond round-off.
    pub fn std_dev(&self) -> AnalysisResult<DVector<f64>> {
        let mut out = DVector::<f64>::zeros(self.transient());
        for square in 0..self.transient() {
            out[square] = self.std_dev_at(square)?;
        }
        Ok(out)
    }

    /// Standard deviation of moves to finish from one transient square.
    ///
    /// The finish square has no spread and yields 0.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NegativeVariance`] if the variance is
    /// negative beyond round-off, or [`AnalysisError::SquareOutOfRange`]
    /// for a square past the finish.
    pub fn std_dev_at(&self, square: usize) -> AnalysisResult<f64> {
        if square == self.transient() {
            return Ok(0.0);
        }
        let Some(&variance) = self.variance.get(square) else {
            return Err(AnalysisError::SquareOutOfRange {
                square,
                squares: self.transient(),
            });
        };
        if variance >= 0.0 {
            return Ok(variance.sqrt());
        }
        let scale = self.expected[square].powi(2).max(1.0);
        if variance > -VARIANCE_ROUND_OFF * scale {
            Ok(0.0)
        } else {
            Err(AnalysisError::NegativeVariance { square, variance })
        }
    }

    /// Expected moves by square, with a trailing 0 for the finish.
    #[must_use]
    pub fn expected_moves_by_square(&self) -> Vec<f64> {
        padded(&self.expected)
    }

    /// Variance by square, with a trailing 0 for the finish.
    #[must_use]
    pub fn variance_by_square(&self) -> Vec<f64> {
        padded(&self.variance)
    }
}

/// Solve `A·X = I` by LU decomposition with partial pivoting.
fn invert(a: DMatrix<f64>) -> AnalysisResult<DMatrix<f64>> {
    let size = a.nrows();
    let lu = a.lu();

    let pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |acc, x| acc.min(x.abs()));
    if pivot.is_nan() || pivot < SINGULAR_PIVOT {
        return Err(AnalysisError::NumericallySingular { pivot });
    }

    let inverse = lu
        .solve(&DMatrix::<f64>::identity(size, size))
        .ok_or(AnalysisError::NumericallySingular { pivot })?;
    if inverse.iter().any(|x| !x.is_finite()) {
        return Err(AnalysisError::NumericallySingular { pivot });
    }
    Ok(inverse)
}

fn padded(values: &DVector<f64>) -> Vec<f64> {
    values.iter().copied().chain(std::iter::once(0.0)).collect()
}
