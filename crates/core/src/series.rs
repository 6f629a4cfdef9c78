//! Ordered series of per-date strategy returns.

use serde::{Deserialize, Serialize};

/// Realized net returns of a strategy, one value per trading date.
///
/// Positions carry the only identity; the series is never mutated by the
/// statistics computed over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute value, or `None` for an empty series.
    #[must_use]
    pub fn max_abs(&self) -> Option<f64> {
        self.values.iter().map(|r| r.abs()).reduce(f64::max)
    }

    /// Arithmetic mean, or `None` for an empty series.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let moments = self.scaled_moments()?;
        Some(moments.mean * moments.scale)
    }

    /// Bessel-corrected sample variance (divisor `n - 1`).
    ///
    /// Returns `None` with fewer than two observations.
    #[must_use]
    pub fn sample_variance(&self) -> Option<f64> {
        self.sample_std_dev().map(|sd| sd * sd)
    }

    /// Sample standard deviation with divisor `n - 1`.
    ///
    /// Returns `None` with fewer than two observations.
    #[must_use]
    pub fn sample_std_dev(&self) -> Option<f64> {
        let moments = self.scaled_moments()?;
        Some(moments.std_dev? * moments.scale)
    }

    /// Mean and standard deviation of the series divided by its largest
    /// absolute value, so intermediate sums neither underflow nor overflow.
    pub(crate) fn scaled_moments(&self) -> Option<ScaledMoments> {
        let max_abs = self.max_abs()?;
        let scale = if max_abs > 0.0 && max_abs.is_finite() {
            max_abs
        } else {
            1.0
        };
        let n = self.values.len() as f64;
        let mean = self.values.iter().map(|r| r / scale).sum::<f64>() / n;
        let std_dev = (self.values.len() >= 2).then(|| {
            let sum_sq = self
                .values
                .iter()
                .map(|r| (r / scale - mean).powi(2))
                .sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        });
        Some(ScaledMoments {
            scale,
            mean,
            std_dev,
        })
    }
}

/// Moments of a series expressed in units of `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScaledMoments {
    pub scale: f64,
    pub mean: f64,
    /// `None` with fewer than two observations
    pub std_dev: Option<f64>,
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for ReturnSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
