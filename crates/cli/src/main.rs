use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use returns_significance_cli::commands::{run_from_source, EXIT_FAILURE};
use returns_significance_core::ConfigLoader;

#[derive(Parser)]
#[command(name = "returns-ttest", version)]
#[command(about = "One-tailed t-test of whether strategy net returns have a positive mean", long_about = None)]
struct Cli {
    /// Returns CSV file with a header row and a `return` column
    /// [default: input.path from config, net_returns.csv]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let path = cli
        .file
        .unwrap_or_else(|| PathBuf::from(&config.input.path));

    let stdout = std::io::stdout();
    match run_from_source(&path, &config, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
