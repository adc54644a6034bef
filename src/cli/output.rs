//! Output formatting utilities for CLI.

use super::Series;
use chutes::GameSummary;
use chutes::board::presets;
use chutes::{BoardConfig, SearchOutcome};
use serde::Serialize;

/// Format one game's statistics as human-readable text.
pub(super) fn format_summary_text(summary: &GameSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", summary.name));
    output.push_str(&format!(
        "  Board:               {} squares, die 1-{}\n",
        summary.squares, summary.die
    ));
    output.push_str(&format!("  Mean:                {:.4}\n", summary.expected_moves));
    output.push_str(&format!("  Median:              {}\n", summary.median_moves));
    output.push_str(&format!("  Mode:                {}\n", format_modes(&summary.mode_moves)));
    output.push_str(&format!("  Minimum:             {}\n", summary.min_moves));
    output.push_str(&format!("  Standard deviation:  {:.4}\n", summary.std_dev));
    output.push_str(&format!("  Variance:            {:.4}\n", summary.variance));
    output.push_str(&format!("  99.9% finish within: {}\n", summary.near_certain_bound));

    output
}

/// Format game statistics as CSV, one row per game.
pub(super) fn format_summaries_csv(summaries: &[GameSummary]) -> String {
    let mut output = String::new();

    // Header
    output.push_str(
        "name,squares,die,mean,median,mode,min,std_dev,variance,near_certain,converged\n",
    );

    // Data rows
    for s in summaries {
        let modes: Vec<String> = s.mode_moves.iter().map(u32::to_string).collect();
        output.push_str(&format!(
            "{},{},{},{:.6},{},{},{},{:.6},{:.6},{},{}\n",
            csv_field(&s.name),
            s.squares,
            s.die,
            s.expected_moves,
            s.median_moves.value(),
            modes.join(" "),
            s.min_moves.value(),
            s.std_dev,
            s.variance,
            s.near_certain_bound.value(),
            s.converged()
        ));
    }

    output
}

/// Format the built-in board list as text.
pub(super) fn format_boards_text(boards: &[BoardConfig]) -> String {
    let mut output = String::new();

    output.push_str("Built-in boards:\n");
    for config in boards {
        output.push_str(&format!(
            "  {:<24} {} ({} squares, die 1-{}, {} jumps)\n",
            presets::slug(&config.name),
            config.name,
            config.squares,
            config.die,
            config.jumps.len()
        ));
    }

    output
}

/// Format the built-in board list as CSV.
pub(super) fn format_boards_csv(boards: &[BoardConfig]) -> String {
    let mut output = String::from("slug,name,squares,die,jumps\n");
    for config in boards {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            presets::slug(&config.name),
            csv_field(&config.name),
            config.squares,
            config.die,
            config.jumps.len()
        ));
    }
    output
}

/// One point of a plottable series.
#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct CurvePoint {
    /// Move count or square index.
    pub(super) x: u32,
    /// Probability, expected moves, or variance.
    pub(super) y: f64,
}

/// JSON-serializable series with its axis labels.
#[derive(Debug, Serialize)]
pub(super) struct JsonCurve {
    /// Board name.
    pub(super) board: String,
    /// Horizontal axis label.
    pub(super) x_label: &'static str,
    /// Vertical axis label.
    pub(super) y_label: &'static str,
    /// Data points.
    pub(super) points: Vec<CurvePoint>,
}

/// Axis labels for a series.
pub(super) const fn axis_labels(series: Series) -> (&'static str, &'static str) {
    match series {
        Series::Pmf => ("Moves", "Probability of finishing on move"),
        Series::Cdf => ("Moves", "Probability of finishing by move"),
        Series::Expected => ("Square", "Expected number of moves"),
        Series::Variance => ("Square", "Variance of the number of moves"),
    }
}

/// Format a series as two aligned columns.
pub(super) fn format_curve_text(name: &str, series: Series, points: &[CurvePoint]) -> String {
    let (x_label, y_label) = axis_labels(series);
    let mut output = String::new();

    output.push_str(&format!("{name}\n"));
    output.push_str(&format!("{x_label:>8}  {y_label}\n"));
    for point in points {
        output.push_str(&format!("{:>8}  {:.10}\n", point.x, point.y));
    }

    output
}

/// Format a series as CSV.
pub(super) fn format_curve_csv(series: Series, points: &[CurvePoint]) -> String {
    let header = match series {
        Series::Pmf => "moves,probability_at",
        Series::Cdf => "moves,probability_by",
        Series::Expected => "square,expected_moves",
        Series::Variance => "square,variance",
    };

    let mut output = String::new();
    output.push_str(&format!("{header}\n"));
    for point in points {
        output.push_str(&format!("{},{}\n", point.x, point.y));
    }
    output
}

/// Warnings for searches that hit their horizon.
pub(super) fn convergence_warnings(summary: &GameSummary) -> Vec<String> {
    [
        ("median", summary.median_moves),
        ("minimum", summary.min_moves),
        ("near-certain bound", summary.near_certain_bound),
    ]
    .into_iter()
    .filter_map(|(label, outcome)| match outcome {
        SearchOutcome::Exhausted(k) => Some(format!(
            "{}: {label} did not converge within {k} moves; raise --ceiling",
            summary.name
        )),
        SearchOutcome::Converged(_) => None,
    })
    .collect()
}

fn format_modes(modes: &[u32]) -> String {
    if modes.is_empty() {
        return "none within horizon".to_string();
    }
    modes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
