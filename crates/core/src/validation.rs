//! Input guards for return series statistics.
//!
//! Every statistic in this crate calls [`validate_returns`] before touching
//! the data, so malformed series fail in one consistent place.

use crate::error::InvalidInputError;

/// Checks that a t-statistic is defined for `values`.
///
/// # Errors
/// - [`InvalidInputError::Empty`] when `values` is empty
/// - [`InvalidInputError::InsufficientData`] with a single observation
/// - [`InvalidInputError::NonFinite`] at the first NaN or infinite value
/// - [`InvalidInputError::ZeroVariance`] when all values are identical
pub fn validate_returns(values: &[f64]) -> Result<(), InvalidInputError> {
    let Some(&first) = values.first() else {
        return Err(InvalidInputError::Empty);
    };

    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InvalidInputError::NonFinite {
            index: Some(index),
            value,
        });
    }

    if values.len() < 2 {
        return Err(InvalidInputError::InsufficientData { len: values.len() });
    }

    // Compared exactly; the computed variance of a constant series can be
    // a tiny non-zero rounding residue.
    if values.iter().all(|&v| v == first) {
        return Err(InvalidInputError::ZeroVariance);
    }

    Ok(())
}
