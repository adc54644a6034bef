//! Error types for board construction and chain analysis.

use std::fmt;

/// Invalid board description.
///
/// Raised while parsing or building a board, before any numeric work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The board has no ordinary squares (`squares` must be at least 1).
    NoSquares,
    /// The die has no faces (`die` must be at least 1).
    NoDieFaces,
    /// A jump source or destination lies outside `[0, squares]`.
    JumpOutOfRange {
        /// Square the jump starts from.
        from: usize,
        /// Square the jump leads to.
        to: usize,
        /// Index of the finish square.
        squares: usize,
    },
    /// A square cannot reach the finish under the board's rules.
    Unreachable {
        /// First square found that never finishes.
        square: usize,
    },
    /// A board file could not be read.
    Io(String),
    /// A board file is not valid JSON for a board description.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSquares => write!(f, "board must have at least one square"),
            Self::NoDieFaces => write!(f, "die must have at least one face"),
            Self::JumpOutOfRange { from, to, squares } => {
                write!(f, "jump {from} -> {to} leaves the board [0, {squares}]")
            }
            Self::Unreachable { square } => {
                write!(f, "square {square} can never reach the finish")
            }
            Self::Io(message) => write!(f, "failed to read board file: {message}"),
            Self::Parse(message) => write!(f, "invalid board file: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure while analyzing a board.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The board description was rejected.
    Config(ConfigError),
    /// `I - Q` is (near-)singular: some transient square never absorbs.
    NumericallySingular {
        /// Smallest absolute pivot seen in the LU decomposition.
        pivot: f64,
    },
    /// A variance entry came out negative beyond round-off.
    NegativeVariance {
        /// Starting square of the offending entry.
        square: usize,
        /// The computed variance.
        variance: f64,
    },
    /// A per-square query named a square past the finish.
    SquareOutOfRange {
        /// The requested square.
        square: usize,
        /// Finish square of the board.
        squares: usize,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::NumericallySingular { pivot } => {
                write!(f, "fundamental matrix is singular (smallest pivot {pivot:e})")
            }
            Self::NegativeVariance { square, variance } => {
                write!(f, "negative variance {variance:e} from square {square}")
            }
            Self::SquareOutOfRange { square, squares } => {
                write!(f, "square {square} is outside the board [0, {squares}]")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let e = ConfigError::JumpOutOfRange {
            from: 3,
            to: 40,
            squares: 11,
        };
        assert_eq!(e.to_string(), "jump 3 -> 40 leaves the board [0, 11]");
    }

    #[test]
    fn test_square_out_of_range_display() {
        let e = AnalysisError::SquareOutOfRange {
            square: 12,
            squares: 11,
        };
        assert_eq!(e.to_string(), "square 12 is outside the board [0, 11]");
    }

    #[test]
    fn test_analysis_error_wraps_config() {
        let e: AnalysisError = ConfigError::Unreachable { square: 4 }.into();
        assert!(matches!(e, AnalysisError::Config(ConfigError::Unreachable { square: 4 })));
        assert!(e.to_string().contains("square 4"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
