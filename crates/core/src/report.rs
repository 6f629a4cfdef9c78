use crate::hypothesis::TestResult;

/// Decimal places of the reported t-statistic.
pub const T_STATISTIC_PRECISION: usize = 3;
/// Decimal places of the reported p-value.
pub const P_VALUE_PRECISION: usize = 6;

pub struct ReportFormatter;

impl ReportFormatter {
    /// Formats a test result as two lines, without a trailing newline:
    ///
    /// ```text
    /// t-statistic: 1.319
    /// p-value: 0.128842
    /// ```
    #[must_use]
    pub fn format(result: &TestResult) -> String {
        format!(
            "t-statistic: {:.tp$}\np-value: {:.pp$}",
            result.t_statistic,
            result.p_value,
            tp = T_STATISTIC_PRECISION,
            pp = P_VALUE_PRECISION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_fixed_precision() {
        let result = TestResult {
            t_statistic: 1.318_760_946,
            p_value: 0.128_841_761,
        };

        assert_eq!(
            ReportFormatter::format(&result),
            "t-statistic: 1.319\np-value: 0.128842"
        );
    }

    #[test]
    fn pads_short_values() {
        let result = TestResult {
            t_statistic: -2.0,
            p_value: 0.5,
        };

        assert_eq!(
            ReportFormatter::format(&result),
            "t-statistic: -2.000\np-value: 0.500000"
        );
    }

    #[test]
    fn small_p_value_rounds_to_six_decimals() {
        let result = TestResult {
            t_statistic: 15.556,
            p_value: 4.98e-5,
        };

        assert!(ReportFormatter::format(&result).ends_with("p-value: 0.000050"));
    }
}
