use thiserror::Error;

/// Result type alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, RnnError>;

/// Error types that can occur while building, evaluating or training a recurrent network
///
/// # Variants
///
/// - `DimensionMismatch` - An algebra operation was called with operands of incompatible shape
/// - `SequenceError` - A sequence was malformed (non-uniform element sizes, mismatched lengths, bad generation arguments)
/// - `OptimizerDimensionMismatch` - The optimizer received a gradient whose shape differs from the tensor it tracks
/// - `NullGradient` - The optimizer was asked to update without a gradient
/// - `ConfigurationError` - A hyperparameter is zero or otherwise invalid
/// - `DataSetError` - The training data set is inconsistent
/// - `DictionaryError` - A symbol dictionary is invalid
/// - `Io` - Wraps standard I/O errors from weight persistence
/// - `Json` - Wraps JSON serialization errors from weight persistence
#[derive(Debug, Error)]
pub enum RnnError {
    #[error("Dimension mismatch in {operation}: left operand has shape {left:?}, right operand has shape {right:?}")]
    DimensionMismatch {
        operation: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    #[error("Sequence error: {0}")]
    SequenceError(String),

    #[error("Optimizer dimension mismatch: tracking a tensor of shape {expected:?}, got a gradient of shape {actual:?}")]
    OptimizerDimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Null gradient passed to the optimizer")]
    NullGradient,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Data set error: {0}")]
    DataSetError(String),

    #[error("Dictionary error: {0}")]
    DictionaryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RnnError {
    /// Builds a `DimensionMismatch` from the shapes of the two operands.
    pub(crate) fn dimension_mismatch(operation: &'static str, left: &[usize], right: &[usize]) -> Self {
        RnnError::DimensionMismatch {
            operation,
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    pub(crate) fn sequence(msg: impl Into<String>) -> Self {
        RnnError::SequenceError(msg.into())
    }

    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        RnnError::ConfigurationError(msg.into())
    }
}
