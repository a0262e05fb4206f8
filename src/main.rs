use clap::{Parser, Subcommand};
use std::path::PathBuf;

use investment_scorecard::config::{self, WeightSource};
use investment_scorecard::error::ScorecardError;
use investment_scorecard::export::{
    write_export, ExportFormat, ExportRecord, DEFAULT_CSV_NAME, DEFAULT_PDF_NAME,
};
use investment_scorecard::scoring::{FactorWeights, Scorecard};
use investment_scorecard::{chart, logging, output, scoring};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_INVALID_WEIGHTS: i32 = 5;
const EXIT_EXPORT: i32 = 6;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show factor scores and the overall rating (default if no subcommand)
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw the score and weight series as text bars
    Chart,
    /// Write the scorecard as PDF and CSV
    Export {
        /// PDF output path
        #[arg(long, default_value = DEFAULT_PDF_NAME)]
        pdf: PathBuf,

        /// CSV output path
        #[arg(long, default_value = DEFAULT_CSV_NAME)]
        csv: PathBuf,

        /// Only write the PDF
        #[arg(long, conflicts_with = "csv_only")]
        pdf_only: bool,

        /// Only write the CSV
        #[arg(long)]
        csv_only: bool,
    },
    /// Create a scorecard file interactively
    Init {
        /// Where to save the scorecard (prompted if omitted)
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(about = "Weighted Team/Product/Market investment scorecard", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to scorecard file (defaults to ~/.config/investment-scorecard/scorecard.yaml)
    #[arg(short, long, global = true)]
    scorecard: Option<PathBuf>,

    /// Override weights as team,product,market (normalized to sum to 1)
    #[arg(long, global = true, value_parser = config::parse_weights, conflicts_with = "equal_weights")]
    weights: Option<FactorWeights>,

    /// Weigh all three factors equally
    #[arg(long, global = true)]
    equal_weights: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Summary { json: false });
    let use_colors = output::should_use_colors();

    match command {
        Commands::Init { path } => {
            if let Err(e) = config::init::run_init_wizard(path.or(cli.scorecard)) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Summary { json } => {
            let card = load_scorecard(cli.scorecard, cli.weights, cli.equal_weights);
            let summary = scoring::aggregate(&card);
            if json {
                match output::format_json(&summary) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize summary: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                if cli.verbose > 0 {
                    println!("{}", output::format_scorecard_detail(&card, use_colors));
                    println!();
                }
                println!("{}", output::format_summary(&summary, use_colors));
            }
        }
        Commands::Chart => {
            let card = load_scorecard(cli.scorecard, cli.weights, cli.equal_weights);
            let summary = scoring::aggregate(&card);
            println!(
                "{}",
                output::format_bars("Factor Scores", &chart::to_chart_series(&summary), use_colors)
            );
            println!();
            println!(
                "{}",
                output::format_bars("Factor Weights", &chart::weight_series(&summary), use_colors)
            );
        }
        Commands::Export {
            pdf,
            csv,
            pdf_only,
            csv_only,
        } => {
            let card = load_scorecard(cli.scorecard, cli.weights, cli.equal_weights);
            let mut targets = Vec::new();
            if !csv_only {
                targets.push((ExportFormat::Pdf, pdf));
            }
            if !pdf_only {
                targets.push((ExportFormat::Csv, csv));
            }
            if let Err(e) = run_export(&card, &targets) {
                eprintln!("Export failed: {}", e);
                std::process::exit(EXIT_EXPORT);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load, validate and weight the scorecard, exiting with the matching code on failure.
fn load_scorecard(path: Option<PathBuf>, weights: Option<FactorWeights>, equal_weights: bool) -> Scorecard {
    let file = match config::load_scorecard_file(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_scorecard_file(&file) {
        eprintln!("Scorecard errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let source = match (weights, equal_weights) {
        (Some(w), _) => WeightSource::Override(w),
        (None, true) => WeightSource::Equal,
        (None, false) => WeightSource::File,
    };

    match config::build_scorecard(&file, source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_INVALID_WEIGHTS);
        }
    }
}

fn run_export(card: &Scorecard, targets: &[(ExportFormat, PathBuf)]) -> Result<(), ScorecardError> {
    let record = ExportRecord::from_scorecard(card);
    for (format, path) in targets {
        let bytes = write_export(path, *format, &record)?;
        println!("Wrote {} ({} bytes)", path.display(), bytes);
    }
    Ok(())
}
