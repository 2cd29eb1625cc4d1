//! Univariate linear regression trained by batch gradient descent.
//!
//! ```
//! use gd_regression::GradientDescentRegressor;
//!
//! let mut model = GradientDescentRegressor::new(vec![1., 2., 3., 4., 5.], vec![2., 4., 6., 8., 10.]);
//! model.fit(0.05, 1000)?;
//!
//! let pred = model.predict(&[6.])?;
//! assert!((pred[0] - 12.).abs() < 0.05);
//! # Ok::<(), gd_regression::RegressionErr>(())
//! ```

pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod loss;
pub mod metrics;
pub mod optimization;
pub mod regressor;

pub use config::{RunConfig, TrainingConfig};
pub use diagnostics::Diagnostics;
pub use error::{RegressionErr, Result};
pub use regressor::{GradientDescentRegressor, Params};
