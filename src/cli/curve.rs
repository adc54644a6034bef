//! Curve command implementation.

// Square indices fit comfortably in a u32
#![allow(clippy::cast_possible_truncation)]

use super::output::{CurvePoint, JsonCurve, axis_labels, format_curve_csv, format_curve_text};
use super::{CliError, ReportFormat, Series, resolve_board};
use chutes::{Game, SearchConfig};

/// Execute the curve command.
///
/// # Errors
///
/// Returns an error if the board cannot be resolved or analyzed.
pub(crate) fn execute(
    board: &str,
    series: Series,
    horizon: Option<u32>,
    ceiling: u32,
    format: ReportFormat,
) -> Result<(), CliError> {
    let config = resolve_board(board)?;
    let search = SearchConfig {
        ceiling,
        ..SearchConfig::default()
    };
    let game = Game::with_search(&config, search)?;

    let points = collect_points(&game, series, horizon);

    match format {
        ReportFormat::Text => {
            print!("{}", format_curve_text(game.name(), series, &points));
        }
        ReportFormat::Json => {
            let (x_label, y_label) = axis_labels(series);
            let curve = JsonCurve {
                board: game.name().to_string(),
                x_label,
                y_label,
                points,
            };
            println!("{}", serde_json::to_string_pretty(&curve)?);
        }
        ReportFormat::Csv => {
            print!("{}", format_curve_csv(series, &points));
        }
    }

    Ok(())
}

/// Build the requested series.
///
/// Move-count series run from 1 to the horizon (the near-certain bound
/// unless overridden); square series cover every square, finish included.
fn collect_points(game: &Game, series: Series, horizon: Option<u32>) -> Vec<CurvePoint> {
    let last = horizon.unwrap_or_else(|| game.near_certain_bound().value());
    let distribution = game.distribution();

    let values = match series {
        Series::Pmf => distribution.point_curve(last),
        Series::Cdf => distribution.completion_curve(last),
        Series::Expected => game.expected_moves_by_square(),
        Series::Variance => game.variance_by_square(),
    };
    let skip = usize::from(matches!(series, Series::Pmf | Series::Cdf));

    values
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(x, y)| CurvePoint { x: x as u32, y })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chutes::board::presets;

    fn curious_george() -> Game {
        Game::new(&presets::curious_george()).unwrap_or_else(|e| panic!("preset failed: {e}"))
    }

    #[test]
    fn test_pmf_starts_at_one_move() {
        let points = collect_points(&curious_george(), Series::Pmf, None);
        assert_eq!(points.len(), 15);
        assert_eq!(points[0].x, 1);
        assert_eq!(points[14].x, 15);
        assert!((points[2].y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_horizon_override() {
        let points = collect_points(&curious_george(), Series::Cdf, Some(40));
        assert_eq!(points.len(), 40);
        assert!(points.windows(2).all(|w| w[0].y <= w[1].y));
    }

    #[test]
    fn test_square_series_include_finish() {
        let points = collect_points(&curious_george(), Series::Expected, None);
        assert_eq!(points.len(), 12);
        assert_eq!(points[11].x, 11);
        assert!(points[11].y.abs() < 1e-12);
        assert!((points[0].y - 5.0).abs() < 1e-9);
    }
}
