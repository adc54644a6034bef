//! Analyze command implementation.

use super::output::{convergence_warnings, format_summaries_csv, format_summary_text};
use super::{CliError, ReportFormat, resolve_board};
use chutes::board::presets;
use chutes::{Game, GameSummary, SearchConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the analyze command.
///
/// # Errors
///
/// Returns an error if a board cannot be resolved or analyzed.
pub(crate) fn execute(
    boards: &[String],
    ceiling: u32,
    format: ReportFormat,
    threads: Option<usize>,
    progress: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let configs = if boards.is_empty() {
        presets::all()
    } else {
        boards
            .iter()
            .map(String::as_str)
            .map(resolve_board)
            .collect::<Result<Vec<_>, _>>()?
    };

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let search = SearchConfig {
        ceiling,
        ..SearchConfig::default()
    };

    if !quiet {
        let names: Vec<&str> = configs.iter().map(|c| c.name.as_str()).collect();
        eprintln!("Analyzing {} board(s): {}", configs.len(), names.join(", "));
    }

    let pb = if progress {
        let pb = ProgressBar::new(configs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} boards")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Boards share nothing, so each one is analyzed on its own thread
    let results: Vec<Result<GameSummary, CliError>> = configs
        .par_iter()
        .map(|config| {
            let summary = Game::with_search(config, search)
                .and_then(|game| game.summary())
                .map_err(|e| CliError::new(format!("{}: {e}", config.name)));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            summary
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let summaries = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let duration = start.elapsed();

    if !quiet {
        for warning in summaries.iter().flat_map(convergence_warnings) {
            eprintln!("Warning: {warning}");
        }
        eprintln!("Duration: {:.3}s", duration.as_secs_f64());
        eprintln!();
    }

    // Output based on format
    match format {
        ReportFormat::Text => {
            for summary in &summaries {
                println!("{}", format_summary_text(summary));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        ReportFormat::Csv => {
            print!("{}", format_summaries_csv(&summaries));
        }
    }

    Ok(())
}
