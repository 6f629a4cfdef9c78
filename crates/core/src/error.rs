//! Error types for return series validation.

use thiserror::Error;

/// Reasons a return series cannot be tested.
///
/// Every variant describes a series for which the one-sample t-statistic is
/// undefined. The test reports these instead of producing NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The series holds no observations.
    #[error("return series is empty")]
    Empty,

    /// Too few observations for a Bessel-corrected standard deviation.
    #[error("need at least 2 returns to estimate variance, got {len}")]
    InsufficientData {
        /// Number of observations supplied.
        len: usize,
    },

    /// A value is NaN or infinite.
    ///
    /// `index` is `None` when the offending value is a parameter rather than
    /// an element of the series.
    #[error("non-finite value {value} at {}", describe_index(.index))]
    NonFinite {
        /// Position in the series, if the value came from the series.
        index: Option<usize>,
        /// The offending value.
        value: f64,
    },

    /// Every observation is identical, so the standard error is zero.
    #[error("return series has zero variance; t-statistic is undefined")]
    ZeroVariance,
}

fn describe_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("index {i}"),
        None => "hypothesised mean".to_string(),
    }
}
