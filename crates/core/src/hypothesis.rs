//! One-sample t-test for strategy return significance.
//!
//! Tests H0: mean return = 0 against the one-sided alternative that the
//! strategy earns a positive mean return. The one-tailed p-value is the
//! two-tailed p-value halved, regardless of the sign of the t-statistic.
//! With a negative t-statistic the halved value is therefore *not* evidence
//! for a positive mean; callers that care should check the sign.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::InvalidInputError;
use crate::series::ReturnSeries;
use crate::validation::validate_returns;

/// Hypothesised population mean return under the null hypothesis.
pub const NULL_HYPOTHESIS_MEAN: f64 = 0.0;

/// Outcome of [`analyze_returns`]: t-statistic and one-tailed p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub t_statistic: f64,
    /// One-tailed p-value (two-tailed p-value / 2)
    pub p_value: f64,
}

/// Full detail of a one-sample t-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneSampleTTest {
    /// Number of observations
    pub n: usize,
    /// Sample mean
    pub mean: f64,
    /// Bessel-corrected sample standard deviation
    pub std_dev: f64,
    /// Standard error of the mean, `std_dev / sqrt(n)`
    pub std_error: f64,
    /// Degrees of freedom, `n - 1`
    pub degrees_of_freedom: f64,
    /// Mean under the null hypothesis
    pub null_mean: f64,
    /// `(mean - null_mean) / std_error`
    pub t_statistic: f64,
    /// Two-tailed p-value from Student's t distribution
    pub p_value_two_tailed: f64,
}

impl OneSampleTTest {
    /// Two-tailed p-value halved.
    #[must_use]
    pub fn one_tailed_p_value(&self) -> f64 {
        self.p_value_two_tailed / 2.0
    }

    /// Returns true if the one-tailed p-value is below `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.one_tailed_p_value() < alpha
    }

    #[must_use]
    pub fn to_result(&self) -> TestResult {
        TestResult {
            t_statistic: self.t_statistic,
            p_value: self.one_tailed_p_value(),
        }
    }
}

impl From<OneSampleTTest> for TestResult {
    fn from(test: OneSampleTTest) -> Self {
        test.to_result()
    }
}

/// Tests whether the mean of `returns` differs from zero.
///
/// Returns the t-statistic and the one-tailed p-value.
///
/// # Errors
/// Returns [`InvalidInputError`] if the series is empty, has a single
/// observation, contains NaN or infinite values, or has zero variance.
///
/// # Examples
/// ```
/// use returns_significance_core::{analyze_returns, ReturnSeries};
///
/// let returns = ReturnSeries::new(vec![0.01, 0.012, 0.011, 0.013, 0.009]);
/// let result = analyze_returns(&returns).unwrap();
/// assert!(result.t_statistic > 0.0);
/// assert!(result.p_value < 0.05);
/// ```
pub fn analyze_returns(returns: &ReturnSeries) -> Result<TestResult, InvalidInputError> {
    one_sample_t_test(returns, NULL_HYPOTHESIS_MEAN).map(TestResult::from)
}

/// Performs a one-sample t-test of `returns` against `null_mean`.
///
/// # Formula
/// ```text
/// t = (mean - null_mean) / (s / sqrt(n)),   df = n - 1
/// p = 2 * P(T_df > |t|)
/// ```
///
/// # Errors
/// Returns [`InvalidInputError`] if the series fails [`validate_returns`] or
/// `null_mean` is not finite.
pub fn one_sample_t_test(
    returns: &ReturnSeries,
    null_mean: f64,
) -> Result<OneSampleTTest, InvalidInputError> {
    if !null_mean.is_finite() {
        return Err(InvalidInputError::NonFinite {
            index: None,
            value: null_mean,
        });
    }
    validate_returns(returns.as_slice())?;

    let n = returns.len();
    let insufficient = InvalidInputError::InsufficientData { len: n };
    // t is scale-invariant; computing in units of max |x| keeps the
    // standard error representable for very small or very large returns.
    let moments = returns.scaled_moments().ok_or(InvalidInputError::Empty)?;
    let scaled_std_dev = moments.std_dev.ok_or(insufficient.clone())?;
    let scaled_std_error = scaled_std_dev / (n as f64).sqrt();

    if scaled_std_error <= 0.0 || !scaled_std_error.is_finite() {
        return Err(InvalidInputError::ZeroVariance);
    }

    let degrees_of_freedom = (n - 1) as f64;
    let t_statistic = (moments.mean - null_mean / moments.scale) / scaled_std_error;
    let p_value_two_tailed =
        two_tailed_p_value(t_statistic, degrees_of_freedom).ok_or(insufficient)?;

    let mean = moments.mean * moments.scale;
    let std_dev = scaled_std_dev * moments.scale;
    let std_error = scaled_std_error * moments.scale;

    tracing::debug!(
        "t-test n={} mean={:.6} sd={:.6} t={:.4} p(two-tailed)={:.6}",
        n,
        mean,
        std_dev,
        t_statistic,
        p_value_two_tailed
    );

    Ok(OneSampleTTest {
        n,
        mean,
        std_dev,
        std_error,
        degrees_of_freedom,
        null_mean,
        t_statistic,
        p_value_two_tailed,
    })
}

/// Two-tailed p-value of `t` under Student's t with `degrees_of_freedom`.
///
/// Returns `None` if `degrees_of_freedom` is not positive or `t` is NaN.
#[must_use]
pub fn two_tailed_p_value(t: f64, degrees_of_freedom: f64) -> Option<f64> {
    if t.is_nan() {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom).ok()?;
    Some((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}
