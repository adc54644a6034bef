//! Chutes CLI - analyze snakes-and-ladders style boards from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use chutes::distribution::DEFAULT_CEILING;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Chutes - move-count statistics for snakes-and-ladders style games
#[derive(Parser, Debug)]
#[command(name = "chutes")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Report move-count statistics for one or more boards
    Analyze {
        /// Preset names or JSON board files (default: all presets)
        boards: Vec<String>,

        /// Maximum moves tabulated per board (default: 1000)
        #[arg(short, long, default_value_t = DEFAULT_CEILING)]
        ceiling: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Suppress status messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Emit one plottable series for a board
    Curve {
        /// Preset name or JSON board file
        #[arg(required = true)]
        board: String,

        /// Series: pmf, cdf, expected, or variance
        #[arg(short, long, default_value = "pmf")]
        series: cli::Series,

        /// Last move count for pmf/cdf (default: near-certain bound)
        #[arg(long)]
        horizon: Option<u32>,

        /// Maximum moves tabulated (default: 1000)
        #[arg(short, long, default_value_t = DEFAULT_CEILING)]
        ceiling: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,
    },

    /// List the built-in boards
    Boards {
        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,
    },

    /// Check a JSON board file
    Validate {
        /// Board file to validate
        #[arg(required = true)]
        file: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Analyze {
            boards,
            ceiling,
            format,
            threads,
            progress,
            quiet,
        } => cli::analyze::execute(&boards, ceiling, format, threads, progress, quiet),

        Commands::Curve {
            board,
            series,
            horizon,
            ceiling,
            format,
        } => cli::curve::execute(&board, series, horizon, ceiling, format),

        Commands::Boards { format } => cli::boards::execute(format),

        Commands::Validate { file } => cli::validate::execute(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
