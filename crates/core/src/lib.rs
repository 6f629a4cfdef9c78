pub mod config;
pub mod config_loader;
pub mod error;
pub mod hypothesis;
pub mod report;
pub mod series;
pub mod validation;

pub use config::{AnalysisConfig, AppConfig, InputConfig};
pub use config_loader::ConfigLoader;
pub use error::InvalidInputError;
pub use hypothesis::{
    analyze_returns, one_sample_t_test, two_tailed_p_value, OneSampleTTest, TestResult,
    NULL_HYPOTHESIS_MEAN,
};
pub use report::ReportFormatter;
pub use series::ReturnSeries;
pub use validation::validate_returns;
