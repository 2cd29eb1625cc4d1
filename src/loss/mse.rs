use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean squared error loss function.
///
/// Its derivative with respect to the predictions is the error signal the regressor reduces
/// into the weight and bias gradients.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (&y_pred - &y)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y_pred - &y) * (2.0 / y_pred.len() as f64)
    }
}
