//! Regression metrics over a prediction/target pair.

use ndarray::ArrayView1;

use crate::{
    loss::{LossFn, Mse, Sse},
    RegressionErr, Result,
};

fn check_pair(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<()> {
    if y_pred.len() != y.len() {
        return Err(RegressionErr::SizeMismatch {
            a: "y_pred",
            b: "y",
            got: y_pred.len(),
            expected: y.len(),
        });
    }

    if y.is_empty() {
        return Err(RegressionErr::EmptyDataset);
    }

    Ok(())
}

/// Mean squared error, `mean((y - y_pred)²)`.
///
/// # Errors
/// `SizeMismatch` if the lengths differ, `EmptyDataset` if there are no samples.
pub fn mse(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    check_pair(y_pred, y)?;
    Ok(Mse.loss(y_pred, y))
}

/// Root mean squared error, in the same units as the targets.
///
/// # Errors
/// Same as [`mse`].
pub fn rmse(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    mse(y_pred, y).map(f64::sqrt)
}

/// Coefficient of determination, `1 - SSE / SST`.
///
/// # Errors
/// `ZeroVariance` if every target holds the same value, plus the errors of [`mse`].
pub fn r2_score(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    check_pair(y_pred, y)?;

    let mean = y.mean().unwrap_or_default();
    let sst = y.mapv(|v| (v - mean).powi(2)).sum();
    if sst == 0.0 {
        return Err(RegressionErr::ZeroVariance);
    }

    let sse = Sse.loss(y_pred, y);
    Ok(1.0 - sse / sst)
}
