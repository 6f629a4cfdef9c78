//! Analyze returns CLI command.
//!
//! Loads a returns file, runs the one-tailed t-test against a zero mean,
//! and prints the t-statistic and p-value.

use std::io::Write;
use std::path::Path;

use returns_significance_core::{
    analyze_returns, AppConfig, InvalidInputError, ReportFormatter, TestResult,
};
use returns_significance_data::{ReturnsCsvSource, SourceReadError};
use thiserror::Error;

/// Exit code for a missing, malformed, or untestable returns file.
pub const EXIT_INPUT_ERROR: u8 = 1;
/// Exit code for configuration or output failures.
pub const EXIT_FAILURE: u8 = 2;

/// Failures of [`run_from_source`].
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Source(#[from] SourceReadError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("failed to write report: {0}")]
    Output(#[source] std::io::Error),
}

impl CommandError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Source(_) | CommandError::InvalidInput(_) => EXIT_INPUT_ERROR,
            CommandError::Output(_) => EXIT_FAILURE,
        }
    }
}

/// Runs the t-test on the returns file at `path` and writes the report to `out`.
///
/// The column and delimiter come from `config.input`; `config.analysis.alpha`
/// only affects the logged verdict.
///
/// # Errors
/// Returns [`CommandError`] if the file cannot be read, the series is not
/// testable, or writing the report fails.
pub fn run_from_source<W: Write>(
    path: &Path,
    config: &AppConfig,
    out: &mut W,
) -> Result<TestResult, CommandError> {
    tracing::info!("Loading returns from {}", path.display());

    let source = ReturnsCsvSource::from_config(&config.input, path)?;
    let series = source.load_series()?;

    tracing::info!(
        "Loaded {} returns from column '{}'",
        series.len(),
        source.column()
    );

    let result = analyze_returns(&series)?;

    if result.t_statistic < 0.0 {
        tracing::warn!(
            "t-statistic {:.3} is negative; the halved p-value is not evidence of a positive mean",
            result.t_statistic
        );
    }

    let alpha = config.analysis.alpha;
    tracing::info!(
        "mean={:.6} df={} one-tailed p={:.6} significant at {}: {}",
        series.mean().unwrap_or_default(),
        series.len().saturating_sub(1),
        result.p_value,
        alpha,
        result.p_value < alpha
    );

    writeln!(out, "{}", ReportFormatter::format(&result)).map_err(CommandError::Output)?;

    Ok(result)
}
