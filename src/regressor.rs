use log::{debug, info, warn};
use ndarray::{Array1, ArrayView1};
use serde::Serialize;

use crate::{
    config::TrainingConfig,
    dataset::Dataset,
    loss::{LossFn, Mse, Sse},
    metrics,
    optimization::{GradientDescent, Optimizer},
    RegressionErr, Result,
};

/// The learned parameters of the line `y = weight * x + bias`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Params {
    pub weight: f64,
    pub bias: f64,
}

impl Params {
    fn predict(&self, x: ArrayView1<f64>) -> Array1<f64> {
        &x * self.weight + self.bias
    }

    fn is_finite(&self) -> bool {
        self.weight.is_finite() && self.bias.is_finite()
    }
}

/// Everything a `fit` call produces, replaced as a whole on every new call.
#[derive(Debug, Clone)]
struct FittedState {
    params: Params,
    config: TrainingConfig,
    loss_trace: Vec<f64>,
}

/// Univariate linear regression trained by batch gradient descent on the mean squared error.
///
/// The regressor owns its training data for its whole lifetime. Until `fit` is called it holds
/// no parameters, and every prediction or metric fails with `RegressionErr::Unfitted`.
///
/// Diverging learning rates are not guarded against: non-finite parameters propagate as is
/// through predictions and metrics.
#[derive(Debug, Clone)]
pub struct GradientDescentRegressor {
    dataset: Dataset,
    state: Option<FittedState>,
}

impl GradientDescentRegressor {
    /// Returns a new unfitted `GradientDescentRegressor`.
    ///
    /// # Arguments
    /// * `x` - The training feature values.
    /// * `y` - The training targets, paired positionally with `x`.
    pub fn new(x: impl Into<Array1<f64>>, y: impl Into<Array1<f64>>) -> Self {
        Self {
            dataset: Dataset::new(x, y),
            state: None,
        }
    }

    /// Trains the model from scratch, starting with `weight = bias = 0`.
    ///
    /// Any previous parameters and loss trace are discarded. The loss trace ends up with exactly
    /// `num_iterations` entries, each one the SSE of the predictions made *before* that
    /// iteration's update.
    ///
    /// # Arguments
    /// * `alpha` - The learning rate.
    /// * `num_iterations` - The amount of full batch updates to perform.
    ///
    /// # Errors
    /// `SizeMismatch` if `x` and `y` differ in length, `EmptyDataset` if there is no data. No
    /// fitted state is created in either case.
    pub fn fit(&mut self, alpha: f64, num_iterations: usize) -> Result<()> {
        self.fit_with(TrainingConfig::new(alpha, num_iterations))
    }

    /// Same as `fit`, taking the hyperparameters as a `TrainingConfig`.
    pub fn fit_with(&mut self, config: TrainingConfig) -> Result<()> {
        self.dataset.validate()?;

        let x = self.dataset.x();
        let y = self.dataset.y();
        let TrainingConfig {
            alpha,
            num_iterations,
        } = config;

        info!(
            "fitting on {} samples: alpha={alpha} num_iterations={num_iterations}",
            x.len()
        );

        let mut optimizer = GradientDescent::new(alpha);
        let mut params = [0.0_f64; 2];
        let mut loss_trace = Vec::with_capacity(num_iterations);
        let log_every = (num_iterations / 10).max(1);
        let mut diverged = false;

        for i in 0..num_iterations {
            let y_hat = &x * params[0] + params[1];

            // dMSE/dy_hat, reduced into [dw, db]
            let error = Mse.loss_prime(y_hat.view(), y);
            let grad = [error.dot(&x), error.sum()];
            optimizer.update_params(&mut params, &grad);

            let sse = Sse.loss(y_hat.view(), y);
            loss_trace.push(sse);

            if i % log_every == 0 {
                debug!(iteration = i, sse = sse; "w={} b={}", params[0], params[1]);
            }

            if !diverged && !params.iter().all(|p| p.is_finite()) {
                diverged = true;
                warn!("parameters became non-finite at iteration {i}, alpha={alpha} is too large");
            }
        }

        let params = Params {
            weight: params[0],
            bias: params[1],
        };

        info!(
            "fit finished: w={} b={} last sse={:?}",
            params.weight,
            params.bias,
            loss_trace.last()
        );

        self.state = Some(FittedState {
            params,
            config,
            loss_trace,
        });

        Ok(())
    }

    /// Re-trains the model, discarding the current parameters and loss trace.
    pub fn retrain(&mut self, alpha: f64, num_iterations: usize) -> Result<()> {
        self.fit(alpha, num_iterations)
    }

    /// Predicts `weight * v + bias` for every `v` in `new_x`, in order.
    ///
    /// # Errors
    /// `Unfitted` if the model hasn't been fitted yet.
    pub fn predict<'a>(&self, new_x: impl Into<ArrayView1<'a, f64>>) -> Result<Array1<f64>> {
        Ok(self.fitted()?.params.predict(new_x.into()))
    }

    /// Mean squared error of the model on the training data.
    ///
    /// # Errors
    /// `Unfitted` if the model hasn't been fitted yet.
    pub fn mse(&self) -> Result<f64> {
        let y_hat = self.training_predictions()?;
        metrics::mse(y_hat.view(), self.dataset.y())
    }

    /// Root mean squared error of the model on the training data.
    ///
    /// # Errors
    /// `Unfitted` if the model hasn't been fitted yet.
    pub fn rmse(&self) -> Result<f64> {
        self.mse().map(f64::sqrt)
    }

    /// R² score of the model on the training data.
    ///
    /// # Errors
    /// `Unfitted` if the model hasn't been fitted yet, `ZeroVariance` if every training target
    /// has the same value.
    pub fn r2_score(&self) -> Result<f64> {
        let y_hat = self.training_predictions()?;
        metrics::r2_score(y_hat.view(), self.dataset.y())
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.dataset.x()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.dataset.y()
    }

    pub fn params(&self) -> Result<Params> {
        Ok(self.fitted()?.params)
    }

    pub fn weight(&self) -> Result<f64> {
        Ok(self.fitted()?.params.weight)
    }

    pub fn bias(&self) -> Result<f64> {
        Ok(self.fitted()?.params.bias)
    }

    /// The configuration captured by the last `fit` call.
    pub fn config(&self) -> Result<TrainingConfig> {
        Ok(self.fitted()?.config)
    }

    /// The per-iteration SSE values recorded by the last `fit` call, oldest first.
    pub fn loss_trace(&self) -> Result<&[f64]> {
        Ok(&self.fitted()?.loss_trace)
    }

    /// Whether the current parameters are finite numbers.
    pub fn params_are_finite(&self) -> Result<bool> {
        Ok(self.fitted()?.params.is_finite())
    }

    pub(crate) fn training_predictions(&self) -> Result<Array1<f64>> {
        let state = self.fitted()?;
        Ok(state.params.predict(self.dataset.x()))
    }

    fn fitted(&self) -> Result<&FittedState> {
        self.state.as_ref().ok_or(RegressionErr::Unfitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling() -> GradientDescentRegressor {
        GradientDescentRegressor::new(vec![1., 2., 3., 4., 5.], vec![2., 4., 6., 8., 10.])
    }

    #[test]
    fn test_fit_predict_doubling() {
        let mut model = doubling();
        model.fit(0.05, 1000).unwrap();

        assert!((model.weight().unwrap() - 2.).abs() < 0.05);
        assert!(model.bias().unwrap().abs() < 0.05);

        let pred = model.predict(&[6.]).unwrap();
        assert_eq!(pred.len(), 1);
        assert!((pred[0] - 12.).abs() < 0.05);
        assert!(model.mse().unwrap() < 1e-6);
    }

    #[test]
    fn test_converges_on_affine_line() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|x| 3. * x + 2.).collect();

        let mut model = GradientDescentRegressor::new(x, y);
        model.fit(0.01, 10_000).unwrap();

        assert!((model.weight().unwrap() - 3.).abs() < 1e-2);
        assert!((model.bias().unwrap() - 2.).abs() < 1e-2);
        assert!((model.r2_score().unwrap() - 1.).abs() < 1e-6);
    }

    #[test]
    fn test_single_step_matches_hand_computation() {
        // y_hat = 0 => grad_w = 2/5 * -(2 + 8 + 18 + 32 + 50) = -44, grad_b = 2/5 * -30 = -12
        let mut model = doubling();
        model.fit(0.01, 1).unwrap();

        assert!((model.weight().unwrap() - 0.44).abs() < 1e-12);
        assert!((model.bias().unwrap() - 0.12).abs() < 1e-12);
        assert_eq!(model.loss_trace().unwrap(), &[220.]);
    }

    #[test]
    fn test_trace_length_matches_iterations() {
        let mut model = doubling();
        for n in [0, 1, 7, 250] {
            model.fit(0.01, n).unwrap();
            assert_eq!(model.loss_trace().unwrap().len(), n);
        }
    }

    #[test]
    fn test_zero_iterations_keeps_initial_params() {
        let mut model = doubling();
        model.fit(0.3, 0).unwrap();

        assert!(model.is_fitted());
        assert_eq!(model.params().unwrap(), Params::default());
        assert_eq!(model.predict(&[1., 2.]).unwrap().to_vec(), vec![0., 0.]);
    }

    #[test]
    fn test_trace_is_non_increasing_for_small_alpha() {
        let mut model = doubling();
        model.fit(0.01, 300).unwrap();

        let trace = model.loss_trace().unwrap();
        assert!(
            trace.windows(2).all(|w| w[1] <= w[0]),
            "trace increased: {trace:?}"
        );
    }

    #[test]
    fn test_trace_lags_parameters_by_one_step() {
        let mut full = doubling();
        full.fit(0.02, 20).unwrap();
        let trace = full.loss_trace().unwrap().to_vec();

        // entry k is the SSE of the model after k updates
        for k in [0, 1, 5, 19] {
            let mut partial = doubling();
            partial.fit(0.02, k).unwrap();
            let sse = partial.mse().unwrap() * 5.;
            assert!((trace[k] - sse).abs() < 1e-9, "k={k}");
        }
    }

    #[test]
    fn test_predict_and_metrics_before_fit() {
        let model = doubling();

        assert!(!model.is_fitted());
        assert!(matches!(
            model.predict(&[1., 2., 3.]),
            Err(RegressionErr::Unfitted)
        ));
        assert!(matches!(model.mse(), Err(RegressionErr::Unfitted)));
        assert!(matches!(model.rmse(), Err(RegressionErr::Unfitted)));
        assert!(matches!(model.r2_score(), Err(RegressionErr::Unfitted)));
        assert!(matches!(model.loss_trace(), Err(RegressionErr::Unfitted)));
    }

    #[test]
    fn test_r2_zero_variance() {
        let mut model = GradientDescentRegressor::new(vec![1., 2., 3., 4.], vec![5., 5., 5., 5.]);
        model.fit(0.01, 100).unwrap();

        assert!(matches!(model.r2_score(), Err(RegressionErr::ZeroVariance)));
        assert!(model.mse().is_ok());
    }

    #[test]
    fn test_rmse_squared_is_mse() {
        let mut model = doubling();
        for n in [0, 3, 50] {
            model.fit(0.01, n).unwrap();
            let mse = model.mse().unwrap();
            let rmse = model.rmse().unwrap();
            assert!((rmse.powi(2) - mse).abs() <= 1e-9 * mse.max(1.));
        }
    }

    #[test]
    fn test_refit_replaces_state() {
        let mut model = doubling();
        model.fit(0.05, 1000).unwrap();
        model.retrain(0.01, 3).unwrap();

        assert_eq!(model.loss_trace().unwrap().len(), 3);
        assert_eq!(model.config().unwrap(), TrainingConfig::new(0.01, 3));
        assert!(model.weight().unwrap() < 1.5);
    }

    #[test]
    fn test_invalid_dataset_fails_fit() {
        let mut model = GradientDescentRegressor::new(vec![1., 2., 3.], vec![1., 2.]);
        assert!(matches!(
            model.fit(0.01, 10),
            Err(RegressionErr::SizeMismatch { .. })
        ));
        assert!(!model.is_fitted());

        let mut empty = GradientDescentRegressor::new(Vec::<f64>::new(), Vec::<f64>::new());
        assert!(matches!(empty.fit(0.01, 10), Err(RegressionErr::EmptyDataset)));
        assert!(matches!(empty.loss_trace(), Err(RegressionErr::Unfitted)));
    }

    #[test]
    fn test_divergence_is_not_an_error() {
        let mut model = doubling();
        model.fit(1., 2000).unwrap();

        assert!(!model.params_are_finite().unwrap());
        assert!(!model.mse().unwrap().is_finite());
        assert!(model.predict(&[1.]).is_ok());
    }

    #[test]
    fn test_non_positive_alpha_is_accepted() {
        let mut model = doubling();
        model.fit(0., 10).unwrap();
        assert_eq!(model.params().unwrap(), Params::default());

        model.fit(-0.01, 10).unwrap();
        let trace = model.loss_trace().unwrap();
        assert!(trace[9] > trace[0]);
    }
}
