//! Hyper-parameters handed to the Learner.
//!
//! They are read here only so the front end can show and forward them; the
//! core never trains anything itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors while loading a hyper-parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid training parameter: {0}")]
    Invalid(String),
}

/// Learner training knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub learning_rate:       f32,
    /// Fraction of the captured examples per batch, in (0, 1].
    pub batch_size_fraction: f32,
    pub epochs:              u32,
    /// Width of the classifier's hidden layer.
    pub dense_units:         u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        TrainingParams {
            learning_rate:       0.0001,
            batch_size_fraction: 0.4,
            epochs:              20,
            dense_units:         100,
        }
    }
}

impl TrainingParams {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let params: TrainingParams = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.batch_size_fraction > 0.0 && self.batch_size_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "batch_size_fraction must be in (0, 1], got {}",
                self.batch_size_fraction
            )));
        }
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("epochs must be at least 1".into()));
        }
        if self.dense_units == 0 {
            return Err(ConfigError::Invalid("dense_units must be at least 1".into()));
        }
        Ok(())
    }

    /// Batch size for `examples` captured examples; never zero.
    pub fn batch_size(&self, examples: usize) -> usize {
        ((examples as f32 * self.batch_size_fraction).floor() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<TrainingParams, ConfigError> {
        TrainingParams::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn defaults_are_valid() {
        assert!(TrainingParams::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let p = parse("epochs = 40\ndense_units = 200\n").unwrap();
        assert_eq!(p.epochs, 40);
        assert_eq!(p.dense_units, 200);
        assert_eq!(p.learning_rate, 0.0001);
        assert_eq!(p.batch_size_fraction, 0.4);
    }

    #[test]
    fn rejects_bad_fraction() {
        let err = parse("batch_size_fraction = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_epochs_and_bad_rate() {
        assert!(matches!(parse("epochs = 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(parse("learning_rate = -0.1"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn parse_error_names_file() {
        let err = parse("epochs = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = TrainingParams::load(Path::new("/nonexistent/sign_lock.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn batch_size_never_zero() {
        let p = TrainingParams::default();
        assert_eq!(p.batch_size(0), 1);
        assert_eq!(p.batch_size(44), 17);
    }
}
