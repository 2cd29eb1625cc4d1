use ndarray::{Array1, ArrayView1};

use crate::{RegressionErr, Result};

/// Univariate training data: feature values paired positionally with targets.
///
/// Construction performs no validation, the pairing is checked by `validate` when the data is
/// about to be used for training.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Returns a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature values.
    /// * `y` - The target values, one per feature value.
    pub fn new(x: impl Into<Array1<f64>>, y: impl Into<Array1<f64>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Checks that `x` and `y` have the same length and hold at least one sample.
    ///
    /// # Errors
    /// `SizeMismatch` if the lengths differ, `EmptyDataset` if there are no samples.
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(RegressionErr::SizeMismatch {
                a: "x",
                b: "y",
                got: self.y.len(),
                expected: self.x.len(),
            });
        }

        if self.x.is_empty() {
            return Err(RegressionErr::EmptyDataset);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_is_permissive() {
        let dataset = Dataset::new(vec![1., 2., 3.], vec![1., 2.]);
        assert_eq!(dataset.x().len(), 3);
        assert_eq!(dataset.y().len(), 2);
    }

    #[test]
    fn test_validate_mismatched_lengths() {
        let dataset = Dataset::new(vec![1., 2., 3.], vec![1., 2.]);
        let err = dataset.validate().unwrap_err();

        assert!(matches!(
            err,
            RegressionErr::SizeMismatch {
                got: 2,
                expected: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_empty() {
        let dataset = Dataset::new(Vec::<f64>::new(), Vec::<f64>::new());
        assert!(matches!(
            dataset.validate(),
            Err(RegressionErr::EmptyDataset)
        ));
    }

    #[test]
    fn test_validate_ok() {
        let dataset = Dataset::new(vec![1., 2.], vec![3., 4.]);
        assert!(dataset.validate().is_ok());
        assert_eq!(dataset.x().to_vec(), vec![1., 2.]);
        assert_eq!(dataset.y().to_vec(), vec![3., 4.]);
    }
}
