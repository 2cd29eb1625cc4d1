use serde::Serialize;

use crate::{
    config::TrainingConfig,
    regressor::{GradientDescentRegressor, Params},
    RegressionErr, Result,
};

/// The SSE recorded before the update of a given iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossPoint {
    pub iteration: usize,
    pub sse: f64,
}

/// A training sample next to the value of the fitted line at its feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitPoint {
    pub x: f64,
    pub y: f64,
    pub fitted: f64,
}

/// The data behind the convergence plots of a fitted regressor: the loss curve over the
/// iterations and the fitted line over the scatter of training points.
///
/// Rendering is left to whoever consumes the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub config: TrainingConfig,
    pub params: Params,
    pub mse: f64,
    pub rmse: f64,
    /// Absent when the training targets have zero variance.
    pub r2: Option<f64>,
    pub loss_curve: Vec<LossPoint>,
    pub fit_line: Vec<FitPoint>,
}

impl Diagnostics {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GradientDescentRegressor {
    /// Snapshots the current fitted state for an external plotting consumer.
    ///
    /// # Errors
    /// `Unfitted` if the model hasn't been fitted yet.
    pub fn diagnostics(&self) -> Result<Diagnostics> {
        let loss_curve = self
            .loss_trace()?
            .iter()
            .enumerate()
            .map(|(iteration, &sse)| LossPoint { iteration, sse })
            .collect();

        let fit_line = self
            .x()
            .iter()
            .zip(self.y())
            .zip(&self.training_predictions()?)
            .map(|((&x, &y), &fitted)| FitPoint { x, y, fitted })
            .collect();

        let r2 = match self.r2_score() {
            Ok(r2) => Some(r2),
            Err(RegressionErr::ZeroVariance) => None,
            Err(e) => return Err(e),
        };

        Ok(Diagnostics {
            config: self.config()?,
            params: self.params()?,
            mse: self.mse()?,
            rmse: self.rmse()?,
            r2,
            loss_curve,
            fit_line,
        })
    }
}
