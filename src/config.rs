use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{RegressionErr, Result};

const DEFAULT_ALPHA: f64 = 0.01;
const DEFAULT_NUM_ITERATIONS: usize = 1000;

/// Hyperparameters of a single `fit` call.
///
/// Neither field is bounded: a zero iteration count leaves the parameters at their initial
/// value and a non-positive or too large learning rate is accepted as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub alpha: f64,
    pub num_iterations: usize,
}

impl TrainingConfig {
    pub fn new(alpha: f64, num_iterations: usize) -> Self {
        Self {
            alpha,
            num_iterations,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_NUM_ITERATIONS)
    }
}

/// A complete run: the training data, how to train on it and where to predict afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub predict: Vec<f64>,
}

impl RunConfig {
    /// Parses a run configuration from its JSON representation.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the document is not a valid run configuration.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| RegressionErr::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a JSON run configuration file.
    ///
    /// # Errors
    /// Returns `Io` if the file can't be read, `InvalidConfig` if it can't be parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
