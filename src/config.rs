//! Trainer configuration loaded from TOML.
//!
//! ```toml
//! [trainer]
//! learning_rate = 0.01
//! max_iterations = 5000000
//!
//! [data]
//! delimiter = ","
//! ```
//!
//! Every key is optional; missing keys take the trainer defaults.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::parse::DEFAULT_DELIMITER;
use crate::perceptron::{
    validate_learning_rate, validate_max_iterations, Perceptron, PerceptronError,
    DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] PerceptronError),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    pub learning_rate: f64,
    pub max_iterations: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub delimiter: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            delimiter: char::from(DEFAULT_DELIMITER).to_string(),
        }
    }
}

impl DataConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::Delimiter(self.delimiter.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub trainer: TrainerConfig,
    pub data: DataConfig,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_learning_rate(self.trainer.learning_rate)?;
        validate_max_iterations(self.trainer.max_iterations)?;
        self.data.delimiter_byte()?;
        Ok(())
    }

    pub fn build_perceptron(&self) -> Result<Perceptron, ConfigError> {
        Ok(Perceptron::new(
            self.trainer.learning_rate,
            self.trainer.max_iterations,
        )?)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_when_empty() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config, Config::default());
        assert_relative_eq!(config.trainer.learning_rate, 0.01);
        assert_eq!(config.trainer.max_iterations, 5_000_000);
        assert_eq!(config.data.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn parses_custom_values() {
        let toml = "[trainer]\nlearning_rate = 0.25\nmax_iterations = 40\n\n\
                    [data]\ndelimiter = \";\"";
        let config: Config = toml.parse().unwrap();

        assert_relative_eq!(config.trainer.learning_rate, 0.25);
        assert_eq!(config.trainer.max_iterations, 40);
        assert_eq!(config.data.delimiter_byte().unwrap(), b';');

        let perceptron = config.build_perceptron().unwrap();
        assert_relative_eq!(perceptron.learning_rate(), 0.25);
        assert_eq!(perceptron.max_iterations(), 40);
    }

    #[test]
    fn rejects_out_of_range_learning_rate() {
        let err = "[trainer]\nlearning_rate = 1.0".parse::<Config>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(PerceptronError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        let err = "[trainer]\nmax_iterations = 0".parse::<Config>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(PerceptronError::InvalidMaxIterations)
        ));
    }

    #[test]
    fn rejects_bad_delimiter_and_unknown_keys() {
        assert!(matches!(
            "[data]\ndelimiter = \"::\"".parse::<Config>(),
            Err(ConfigError::Delimiter(_))
        ));
        assert!(matches!(
            "[trainer]\nepochs = 3".parse::<Config>(),
            Err(ConfigError::Parse(_))
        ));
    }
}
