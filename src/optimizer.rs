/// Hyperparameter validation helpers
mod input_validation_function;

/// RMSProp configuration and per-tensor state
pub mod rms_prop;

pub use rms_prop::*;

use crate::algebra::Matrix;
use crate::error::{Result, RnnError};
use crate::recurrent_network::{Gradients, NetworkConfig, RecurrentNetwork, Weight};
use input_validation_function::{
    validate_decay_rate, validate_learning_rate, validate_multiplier_bounds,
};
use ndarray::Zip;
use serde::{Deserialize, Serialize};

/// Turns accumulated gradients into weight updates of a recurrent network.
pub trait Optimizer: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies one update step for `gradients` to `network`.
    ///
    /// # Errors
    ///
    /// - `RnnError::OptimizerDimensionMismatch` - If the gradients do not match the tracked tensors
    /// - `RnnError::DimensionMismatch` - If the deltas do not match the network's weights
    fn update(&mut self, network: &mut RecurrentNetwork, gradients: &Gradients) -> Result<()>;
}

/// RMSProp over the three weight tensors of a network.
///
/// One `RMSProp` state is created per tensor when the optimizer is built and
/// persists for the whole training run.
///
/// # Example
/// ```rust
/// use rustyrnn::optimizer::{AdaptiveOptimizer, Optimizer, RMSPropConfig};
/// use rustyrnn::recurrent_network::{Gradients, RecurrentNetwork};
///
/// let mut network = RecurrentNetwork::builder()
///     .input_dimension(2)
///     .output_dimension(2)
///     .hidden_dimension(3)
///     .random_state(1)
///     .build()
///     .unwrap();
/// let mut optimizer = AdaptiveOptimizer::new(network.config(), RMSPropConfig::default()).unwrap();
///
/// let gradients = Gradients::zeros(network.config());
/// optimizer.update(&mut network, &gradients).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveOptimizer {
    input: RMSProp,
    recurrent: RMSProp,
    output: RMSProp,
}

impl AdaptiveOptimizer {
    /// Creates zeroed RMSProp state for every weight of a network with `network_config`.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If `config` is invalid
    pub fn new(network_config: &NetworkConfig, config: RMSPropConfig) -> Result<Self> {
        let state = |weight: Weight| {
            let (rows, cols) = weight.shape(network_config);
            RMSProp::new(rows, cols, config)
        };
        Ok(Self {
            input: state(Weight::Input)?,
            recurrent: state(Weight::Recurrent)?,
            output: state(Weight::Output)?,
        })
    }

    /// The RMSProp state tracking `weight`.
    pub fn state(&self, weight: Weight) -> &RMSProp {
        match weight {
            Weight::Input => &self.input,
            Weight::Recurrent => &self.recurrent,
            Weight::Output => &self.output,
        }
    }

    fn state_mut(&mut self, weight: Weight) -> &mut RMSProp {
        match weight {
            Weight::Input => &mut self.input,
            Weight::Recurrent => &mut self.recurrent,
            Weight::Output => &mut self.output,
        }
    }

    /// Computes the delta for one tensor, advancing its mean square.
    ///
    /// # Errors
    ///
    /// - `RnnError::NullGradient` - If `gradient` is `None`
    /// - `RnnError::OptimizerDimensionMismatch` - If the gradient does not match the tracked tensor
    pub fn delta(&mut self, weight: Weight, gradient: Option<&Matrix>) -> Result<Matrix> {
        self.state_mut(weight).step(gradient)
    }
}

impl Optimizer for AdaptiveOptimizer {
    fn name(&self) -> &'static str {
        "rmsprop"
    }

    fn update(&mut self, network: &mut RecurrentNetwork, gradients: &Gradients) -> Result<()> {
        for weight in Weight::ALL {
            let delta = self.delta(weight, Some(gradients.get(weight)))?;
            network.apply_delta(weight, &delta)?;
        }
        Ok(())
    }
}
