/// Module `error` defines `RnnError`, the single error type of this crate, and the `Result` alias.
///
/// Errors distinguish the failure classes callers need to tell apart:
/// incompatible algebra shapes (`DimensionMismatch`), malformed sequences
/// (`SequenceError`), optimizer misuse (`OptimizerDimensionMismatch`,
/// `NullGradient`) and invalid hyperparameters (`ConfigurationError`).
pub mod error;

/// Module `algebra` provides the dense vector and matrix types the network is built on.
///
/// # Core Types
///
/// - `Vector` - Fixed-size vector with elementwise, dot, schur and dyadic products
/// - `Matrix` - Fixed-shape matrix with matrix-vector and matrix-matrix products, transpose and diagonal
/// - `MultiplyBackend` - Strategy for the products used by the network (`CpuBackend`, `ParallelBackend`)
///
/// Every binary operation validates its operand shapes and fails with
/// `RnnError::DimensionMismatch` instead of truncating or padding.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::{Matrix, Vector};
///
/// let a = Vector::new(vec![1.0, 2.0, 3.0]);
/// let b = Vector::new(vec![0.5, 0.5, 0.5]);
/// assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
///
/// let outer: Matrix = a.dyadic_product(&Vector::new(vec![1.0, 2.0]));
/// assert_eq!(outer.shape(), (3, 2));
///
/// assert!(a.add(&Vector::zeros(2)).is_err());
/// ```
pub mod algebra;

/// Module `sequence` provides `Sequence`, an ordered list of equally sized vectors.
pub mod sequence;

/// Module `activation` provides the closed set of activation functions used by the network.
pub mod activation;

/// Module `loss_function` provides the cross-entropy loss over sequences and batches.
pub mod loss_function;

/// Module `recurrent_network` provides the single-hidden-layer recurrent network.
///
/// # Core Functionality
///
/// - Construction through `RecurrentNetworkBuilder` with validated `NetworkConfig`
/// - `forward` returning an explicit `ForwardTrace` of hidden states and outputs
/// - Cross-entropy `loss` and `batch_loss`
/// - Truncated backpropagation through time (`backward`, `accumulate_gradients`)
/// - One-hot `predict` and feedback `generate`
/// - Finite-difference `GradientCheck`
/// - JSON persistence with `save_to_path` / `load_from_path`
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::recurrent_network::RecurrentNetwork;
/// use rustyrnn::sequence::Sequence;
///
/// let network = RecurrentNetwork::builder()
///     .input_dimension(4)
///     .output_dimension(4)
///     .hidden_dimension(6)
///     .random_state(3)
///     .build()
///     .unwrap();
///
/// let seed = Sequence::new(vec![Vector::one_hot(4, 0).unwrap(), Vector::one_hot(4, 1).unwrap()]).unwrap();
/// let generated = network.generate(&seed, 10).unwrap();
/// assert_eq!(generated.len(), 10);
/// ```
pub mod recurrent_network;

/// Module `optimizer` provides RMSProp, which turns gradients into clamped weight deltas.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Matrix;
/// use rustyrnn::optimizer::{RMSProp, RMSPropConfig};
///
/// let config = RMSPropConfig::new(0.01, 0.9, 0.05, 0.5).unwrap();
/// let mut state = RMSProp::new(2, 3, config).unwrap();
/// state.update_mean_square(Some(&Matrix::zeros(2, 3))).unwrap();
/// let multiplier = state.gradient_multiplier();
/// assert!(multiplier.iter().all(|m| (0.05..=0.5).contains(m)));
/// ```
pub mod optimizer;

/// Module `dataset` provides the `DataSet` trait and the in-memory `SequenceDataSet`.
pub mod dataset;

/// Module `dictionary` provides one-hot symbol encoding and the `SequenceEncoder`.
pub mod dictionary;

/// Module `training` provides the epoch / minibatch training loop.
///
/// # Core Types
///
/// - `TrainingConfig` - Epochs, batch size, truncation horizon, early-stop threshold and optimizer settings
/// - `Trainer` - Runs the loop and returns a `TrainingReport`
/// - `EpochCallback` - Hook run before every epoch
pub mod training;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
///
/// # Examples
/// ```rust
/// use rustyrnn::prelude::*;
///
/// let config = NetworkConfig::new(3, 3, 8);
/// let network = RecurrentNetwork::new(config).unwrap();
/// assert_eq!(network.param_count(), 8 * 3 + 8 * 8 + 3 * 8);
/// ```
pub mod prelude;

pub use error::{Result, RnnError};
