use crate::config::AppConfig;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

const DEFAULT_TOML: &str = "config/Config.toml";
const DEFAULT_JSON: &str = "config/Config.json";
const ENV_PREFIX: &str = "RETURNS_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, TOML, JSON, and environment variables.
    ///
    /// Missing files are skipped. Environment keys use `__` for nesting,
    /// e.g. `RETURNS_INPUT__COLUMN=net_return`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or a value is out of range.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Self::base(DEFAULT_TOML)
            .merge(Json::file(DEFAULT_JSON))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Self::validate(config)
    }

    /// Loads configuration from a specific TOML file instead of `config/Config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value is out of range.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::base(path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Self::validate(config)
    }

    fn base(toml_path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(toml_path.as_ref()))
    }

    fn validate(config: AppConfig) -> Result<AppConfig> {
        let alpha = config.analysis.alpha;
        if !(alpha > 0.0 && alpha < 1.0) {
            bail!("analysis.alpha must be in (0, 1), got {alpha}");
        }
        if !config.input.delimiter.is_ascii() {
            bail!(
                "input.delimiter must be a single ASCII character, got {:?}",
                config.input.delimiter
            );
        }
        if config.input.column.trim().is_empty() {
            bail!("input.column must not be empty");
        }
        Ok(config)
    }
}
