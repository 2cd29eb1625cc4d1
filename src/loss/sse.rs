use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Sum of squared errors, the value recorded in the loss trace on every iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sse;

impl Sse {
    /// Returns a new `Sse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Sse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (&y_pred - &y).mapv(|x| x.powi(2)).sum()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y_pred - &y) * 2.0
    }
}
