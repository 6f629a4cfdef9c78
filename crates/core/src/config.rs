use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub input: InputConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Returns file read when no path is given on the command line
    pub path: String,
    /// Header of the column holding the returns
    pub column: String,
    /// Field delimiter, a single ASCII character
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance level for the one-tailed verdict
    pub alpha: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "net_returns.csv".to_string(),
            column: "return".to_string(),
            delimiter: ',',
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { alpha: 0.05 }
    }
}
