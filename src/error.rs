use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The regression crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// A prediction, metric or accessor was used before the first `fit`.
    Unfitted,
    /// The R² denominator is zero because every target is the same value.
    ZeroVariance,
    /// Two sequences that must be paired positionally have different lengths.
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    /// A computation that averages over samples got none.
    EmptyDataset,
    /// A run configuration is malformed.
    InvalidConfig(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::Unfitted => {
                write!(f, "The model is uninitialized, call `fit` before using it")
            }
            RegressionErr::ZeroVariance => write!(
                f,
                "Cannot compute R² score, the targets have zero variance (SST = 0)"
            ),
            RegressionErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            RegressionErr::EmptyDataset => write!(f, "The dataset has no samples"),
            RegressionErr::InvalidConfig(msg) => write!(f, "The run configuration is invalid: {msg}"),
            RegressionErr::Io(e) => write!(f, "An I/O operation failed: {e}"),
            RegressionErr::Json(e) => write!(f, "Failed to (de)serialize JSON: {e}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::Io(e) => Some(e),
            RegressionErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegressionErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RegressionErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
