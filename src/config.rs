//! Configuration for map training.
//!
//! [`MapConfig`] holds the five hyperparameters a map is built with.
//! [`Parameters`] reads them, together with the dataset locations, from a
//! plain-text parameter file of `name value` lines:
//!
//! ```text
//! gridSize 10
//! learningRate 0.5
//! maxIterations 200
//! dataDimension 16
//! standardDeviation 5
//! trainFile training.csv
//! testFile test.csv
//! ```

use crate::error::{KohonenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const GRID_SIZE: &str = "gridSize";
const LEARNING_RATE: &str = "learningRate";
const MAX_ITERATIONS: &str = "maxIterations";
const DATA_DIMENSION: &str = "dataDimension";
const STANDARD_DEVIATION: &str = "standardDeviation";
const TRAIN_FILE: &str = "trainFile";
const TEST_FILE: &str = "testFile";
const SEED: &str = "seed";

const KNOWN_KEYS: [&str; 8] = [
    GRID_SIZE,
    LEARNING_RATE,
    MAX_ITERATIONS,
    DATA_DIMENSION,
    STANDARD_DEVIATION,
    TRAIN_FILE,
    TEST_FILE,
    SEED,
];

/// Hyperparameters of a self-organizing map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Grid side length (grid is size x size).
    /// Default: 10.
    pub grid_size: usize,

    /// Initial learning rate.
    /// Default: 0.5.
    pub learning_rate: f64,

    /// Number of training epochs.
    /// Default: 100.
    pub max_iterations: usize,

    /// Number of features per input vector.
    /// Default: 16.
    pub data_dimension: usize,

    /// Initial neighborhood spread, in grid cells. Must exceed 1.
    /// Default: 5.0.
    pub standard_deviation: f64,

    /// Random seed for weight initialization.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            learning_rate: 0.5,
            max_iterations: 100,
            data_dimension: 16,
            standard_deviation: 5.0,
            seed: None,
        }
    }
}

impl MapConfig {
    /// Returns the total number of neurons in the map.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Checks the hyperparameters.
    ///
    /// `standard_deviation` must be strictly greater than 1: the neighborhood
    /// decay divides by its base-10 logarithm.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(KohonenError::Config("gridSize must be at least 1".to_string()));
        }
        if self.data_dimension == 0 {
            return Err(KohonenError::Config(
                "dataDimension must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(KohonenError::Config(format!(
                "learningRate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if !self.standard_deviation.is_finite() || self.standard_deviation <= 1.0 {
            return Err(KohonenError::Config(format!(
                "standardDeviation must be greater than 1, got {}",
                self.standard_deviation
            )));
        }
        Ok(())
    }
}

/// Contents of a parameter file: hyperparameters plus dataset locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Map hyperparameters.
    pub map: MapConfig,
    /// Training dataset (CSV).
    pub train_file: PathBuf,
    /// Test dataset (CSV).
    pub test_file: PathBuf,
}

impl Parameters {
    /// Reads a parameter file.
    ///
    /// Relative dataset paths are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(KohonenError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, path.parent())
    }

    /// Parses parameter file contents.
    pub fn parse(contents: &str, base_dir: Option<&Path>) -> Result<Self> {
        let mut fields: HashMap<&str, &str> = HashMap::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => (key, value),
                _ => {
                    return Err(KohonenError::Config(format!(
                        "line {}: expected `name value`, got `{}`",
                        line_no + 1,
                        line
                    )))
                }
            };

            if !KNOWN_KEYS.contains(&key) {
                return Err(KohonenError::Config(format!(
                    "line {}: unknown parameter `{}`",
                    line_no + 1,
                    key
                )));
            }
            if fields.insert(key, value).is_some() {
                return Err(KohonenError::Config(format!(
                    "line {}: parameter `{}` given twice",
                    line_no + 1,
                    key
                )));
            }
        }

        let map = MapConfig {
            grid_size: required(&fields, GRID_SIZE)?,
            learning_rate: required(&fields, LEARNING_RATE)?,
            max_iterations: required(&fields, MAX_ITERATIONS)?,
            data_dimension: required(&fields, DATA_DIMENSION)?,
            standard_deviation: required(&fields, STANDARD_DEVIATION)?,
            seed: optional(&fields, SEED)?,
        };
        map.validate()?;

        let resolve = |raw: &str| -> PathBuf {
            let p = PathBuf::from(raw);
            match base_dir {
                Some(dir) if p.is_relative() => dir.join(p),
                _ => p,
            }
        };

        Ok(Self {
            map,
            train_file: resolve(required::<String>(&fields, TRAIN_FILE)?.as_str()),
            test_file: resolve(required::<String>(&fields, TEST_FILE)?.as_str()),
        })
    }
}

fn required<T: FromStr>(fields: &HashMap<&str, &str>, key: &str) -> Result<T> {
    optional(fields, key)?
        .ok_or_else(|| KohonenError::Config(format!("missing parameter `{}`", key)))
}

fn optional<T: FromStr>(fields: &HashMap<&str, &str>, key: &str) -> Result<Option<T>> {
    fields
        .get(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                KohonenError::Config(format!("invalid value `{}` for `{}`", raw, key))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
gridSize 8
learningRate 0.3
maxIterations 50
dataDimension 16
standardDeviation 4
trainFile data/training.csv
testFile /abs/test.csv
";

    #[test]
    fn test_default_config() {
        let config = MapConfig::default();
        assert_eq!(config.total_neurons(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            MapConfig { grid_size: 0, ..Default::default() },
            MapConfig { data_dimension: 0, ..Default::default() },
            MapConfig { learning_rate: 0.0, ..Default::default() },
            MapConfig { learning_rate: f64::NAN, ..Default::default() },
            MapConfig { standard_deviation: 1.0, ..Default::default() },
            MapConfig { standard_deviation: 0.5, ..Default::default() },
        ];
        for config in &bad {
            assert!(
                matches!(config.validate(), Err(KohonenError::Config(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_zero_iterations_allowed() {
        let config = MapConfig { max_iterations: 0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_parameters() {
        let params = Parameters::parse(SAMPLE, Some(Path::new("/runs/a"))).unwrap();
        assert_eq!(params.map.grid_size, 8);
        assert!((params.map.learning_rate - 0.3).abs() < 1e-12);
        assert_eq!(params.map.max_iterations, 50);
        assert_eq!(params.map.data_dimension, 16);
        assert!((params.map.standard_deviation - 4.0).abs() < 1e-12);
        assert_eq!(params.map.seed, None);
        assert_eq!(params.train_file, PathBuf::from("/runs/a/data/training.csv"));
        assert_eq!(params.test_file, PathBuf::from("/abs/test.csv"));
    }

    #[test]
    fn test_parse_seed_and_comments() {
        let contents = format!("# run 3\n\n{}seed 7\n", SAMPLE);
        let params = Parameters::parse(&contents, None).unwrap();
        assert_eq!(params.map.seed, Some(7));
        assert_eq!(params.train_file, PathBuf::from("data/training.csv"));
    }

    #[test]
    fn test_parse_missing_parameter() {
        let contents = SAMPLE.replace("maxIterations 50\n", "");
        let err = Parameters::parse(&contents, None).unwrap_err();
        assert!(err.to_string().contains("maxIterations"));
    }

    #[test]
    fn test_parse_unknown_and_duplicate() {
        let unknown = format!("{}momentum 0.9\n", SAMPLE);
        assert!(Parameters::parse(&unknown, None).is_err());

        let duplicate = format!("{}gridSize 4\n", SAMPLE);
        assert!(Parameters::parse(&duplicate, None).is_err());
    }

    #[test]
    fn test_parse_invalid_value() {
        let contents = SAMPLE.replace("gridSize 8", "gridSize eight");
        let err = Parameters::parse(&contents, None).unwrap_err();
        assert!(err.to_string().contains("gridSize"));

        let contents = SAMPLE.replace("standardDeviation 4", "standardDeviation 1");
        assert!(matches!(
            Parameters::parse(&contents, None),
            Err(KohonenError::Config(_))
        ));
    }
}
