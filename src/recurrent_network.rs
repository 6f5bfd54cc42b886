/// Network configuration and the fluent builder that validates it
pub mod builder;

/// Hidden states and outputs recorded by one forward pass
pub mod forward_trace;

/// Gradient accumulators for the three weight matrices
pub mod gradients;

/// Finite-difference verification of the BPTT gradients
pub mod gradient_check;

/// JSON persistence of configuration and weights
pub mod serialize_weight;

pub use builder::*;
pub use forward_trace::*;
pub use gradient_check::*;
pub use gradients::*;
pub use serialize_weight::*;

use crate::activation::Activation;
use crate::algebra::{CpuBackend, Matrix, MultiplyBackend, Vector};
use crate::dataset::DataSet;
use crate::error::{Result, RnnError};
use crate::loss_function::CrossEntropy;
use crate::sequence::Sequence;
use crate::training::{Trainer, TrainingConfig, TrainingReport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Truncation horizon that never truncates: BPTT runs back to timestep 0.
pub const FULL_BPTT: usize = usize::MAX;

/// A single-hidden-layer recurrent neural network.
///
/// The network owns three weight matrices:
///
/// - `U` (input weights, `hidden x input`)
/// - `W` (recurrent weights, `hidden x hidden`)
/// - `V` (output weights, `output x hidden`)
///
/// and computes, for every timestep `t` of an input sequence,
///
/// ```text
/// s_0 = tanh(U·x_0)
/// s_t = tanh(U·x_t + W·s_{t-1})      (t > 0)
/// y_t = softmax(V·s_t / temperature)
/// ```
///
/// Forward evaluation does not mutate the network: the hidden states live in the
/// returned `ForwardTrace`, which is handed to `backward` explicitly. Each sequence
/// therefore starts from a clean recurrence, and independent sequences can be
/// evaluated concurrently.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::recurrent_network::RecurrentNetwork;
/// use rustyrnn::sequence::Sequence;
///
/// let network = RecurrentNetwork::builder()
///     .input_dimension(3)
///     .output_dimension(3)
///     .hidden_dimension(4)
///     .random_state(42)
///     .build()
///     .unwrap();
///
/// let input = Sequence::new(vec![
///     Vector::one_hot(3, 0).unwrap(),
///     Vector::one_hot(3, 1).unwrap(),
/// ])
/// .unwrap();
/// let expected = Sequence::new(vec![
///     Vector::one_hot(3, 1).unwrap(),
///     Vector::one_hot(3, 2).unwrap(),
/// ])
/// .unwrap();
///
/// let trace = network.forward(&input).unwrap();
/// assert_eq!(trace.hidden_states().len(), 2);
///
/// let loss = network.loss(trace.outputs(), &expected).unwrap();
/// let gradients = network.backward(&input, &trace, &expected, 2).unwrap();
/// assert_eq!(gradients.du().shape(), (4, 3));
/// assert!(loss > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RecurrentNetwork {
    config: NetworkConfig,
    input_weights: Matrix,
    recurrent_weights: Matrix,
    output_weights: Matrix,
    hidden_activation: Activation,
    output_activation: Activation,
    backend: Arc<dyn MultiplyBackend>,
}

impl RecurrentNetwork {
    /// Starts a builder for a new network.
    pub fn builder() -> RecurrentNetworkBuilder {
        RecurrentNetworkBuilder::new()
    }

    /// Creates a randomly initialised network with the reference CPU backend.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If any dimension is zero or the temperature is invalid
    pub fn new(config: NetworkConfig) -> Result<Self> {
        Self::with_backend(config, Arc::new(CpuBackend))
    }

    /// Creates a randomly initialised network that multiplies through `backend`.
    ///
    /// Weights are N(0, 1) samples scaled by `1/√fan_in`: `U` by `1/√input`,
    /// `W` and `V` by `1/√hidden`. A `random_state` in the configuration makes the
    /// initialisation reproducible.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If any dimension is zero or the temperature is invalid
    pub fn with_backend(config: NetworkConfig, backend: Arc<dyn MultiplyBackend>) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let hidden = config.hidden_dimension;
        let input_scale = 1.0 / (config.input_dimension as f64).sqrt();
        let hidden_scale = 1.0 / (hidden as f64).sqrt();

        let input_weights = Matrix::random_normal(hidden, config.input_dimension, input_scale, &mut rng);
        let recurrent_weights = Matrix::random_normal(hidden, hidden, hidden_scale, &mut rng);
        let output_weights =
            Matrix::random_normal(config.output_dimension, hidden, hidden_scale, &mut rng);

        Ok(Self::assemble(
            config,
            input_weights,
            recurrent_weights,
            output_weights,
            backend,
        ))
    }

    /// Creates a network from explicit weight matrices.
    ///
    /// # Parameters
    ///
    /// - `config` - Dimensions and temperature; the weights must match its dimensions
    /// - `input_weights` - `U`, shape `(hidden, input)`
    /// - `recurrent_weights` - `W`, shape `(hidden, hidden)`
    /// - `output_weights` - `V`, shape `(output, hidden)`
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If the configuration is invalid
    /// - `RnnError::DimensionMismatch` - If a matrix does not have the shape the configuration implies
    pub fn from_weights(
        config: NetworkConfig,
        input_weights: Matrix,
        recurrent_weights: Matrix,
        output_weights: Matrix,
    ) -> Result<Self> {
        config.validate()?;
        for (weight, matrix) in [
            (Weight::Input, &input_weights),
            (Weight::Recurrent, &recurrent_weights),
            (Weight::Output, &output_weights),
        ] {
            check_weight_shape(&config, weight, matrix)?;
        }

        Ok(Self::assemble(
            config,
            input_weights,
            recurrent_weights,
            output_weights,
            Arc::new(CpuBackend),
        ))
    }

    fn assemble(
        config: NetworkConfig,
        input_weights: Matrix,
        recurrent_weights: Matrix,
        output_weights: Matrix,
        backend: Arc<dyn MultiplyBackend>,
    ) -> Self {
        let output_activation = Activation::Softmax {
            temperature: config.softmax_temperature,
        };
        Self {
            config,
            input_weights,
            recurrent_weights,
            output_weights,
            hidden_activation: Activation::Tanh,
            output_activation,
            backend,
        }
    }

    /// Replaces the multiply backend used by all subsequent passes.
    pub fn set_backend(&mut self, backend: Arc<dyn MultiplyBackend>) {
        self.backend = backend;
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn input_dimension(&self) -> usize {
        self.config.input_dimension
    }

    pub fn output_dimension(&self) -> usize {
        self.config.output_dimension
    }

    pub fn hidden_dimension(&self) -> usize {
        self.config.hidden_dimension
    }

    /// Total number of trainable parameters in `U`, `W` and `V`.
    pub fn param_count(&self) -> usize {
        self.input_weights.len() + self.recurrent_weights.len() + self.output_weights.len()
    }

    /// Borrows one of the weight matrices.
    pub fn weights(&self, weight: Weight) -> &Matrix {
        match weight {
            Weight::Input => &self.input_weights,
            Weight::Recurrent => &self.recurrent_weights,
            Weight::Output => &self.output_weights,
        }
    }

    pub(crate) fn weights_mut(&mut self, weight: Weight) -> &mut Matrix {
        match weight {
            Weight::Input => &mut self.input_weights,
            Weight::Recurrent => &mut self.recurrent_weights,
            Weight::Output => &mut self.output_weights,
        }
    }

    /// Replaces one weight matrix.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `matrix` does not have the shape of the replaced weight
    pub fn set_weights(&mut self, weight: Weight, matrix: Matrix) -> Result<()> {
        check_weight_shape(&self.config, weight, &matrix)?;
        *self.weights_mut(weight) = matrix;
        Ok(())
    }

    /// Applies an optimizer step: `weight -= delta`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If `delta` does not have the shape of the weight
    pub fn apply_delta(&mut self, weight: Weight, delta: &Matrix) -> Result<()> {
        let updated = self.weights(weight).subtract(delta)?;
        *self.weights_mut(weight) = updated;
        Ok(())
    }

    /// Computes the next hidden state from an input and the previous state (if any).
    fn next_state(&self, input: &Vector, previous: Option<&Vector>) -> Result<Vector> {
        let mut z = self.backend.matrix_vector(&self.input_weights, input)?;
        if let Some(previous) = previous {
            z = z.add(&self.backend.matrix_vector(&self.recurrent_weights, previous)?)?;
        }
        Ok(self.hidden_activation.apply(&z))
    }

    /// Computes the output distribution for a hidden state.
    fn output(&self, state: &Vector) -> Result<Vector> {
        let z = self.backend.matrix_vector(&self.output_weights, state)?;
        Ok(self.output_activation.apply(&z))
    }

    /// Runs the recurrence over `input`, recording every hidden state and output.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the input vectors are not of the network's input dimension
    pub fn forward(&self, input: &Sequence) -> Result<ForwardTrace> {
        let mut hidden_states: Vec<Vector> = Vec::with_capacity(input.len());
        let mut outputs = Vec::with_capacity(input.len());

        for x in input {
            let state = self.next_state(x, hidden_states.last())?;
            outputs.push(self.output(&state)?);
            hidden_states.push(state);
        }

        Ok(ForwardTrace::new(hidden_states, Sequence::new(outputs)?))
    }

    /// Standalone inference: the output sequence for `input`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the input vectors are not of the network's input dimension
    pub fn evaluate(&self, input: &Sequence) -> Result<Sequence> {
        Ok(self.forward(input)?.into_outputs())
    }

    /// Mean cross-entropy per timestep of `actual` against `expected`; 0 for empty sequences.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the sequences differ in length
    /// - `RnnError::DimensionMismatch` - If the vectors differ in dimension
    pub fn loss(&self, actual: &Sequence, expected: &Sequence) -> Result<f64> {
        CrossEntropy::new().sequence_loss(actual, expected)
    }

    /// Total cross-entropy of a batch divided by its total number of timesteps.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the lists or any pair of sequences differ in length
    pub fn batch_loss(&self, actual: &[Sequence], expected: &[Sequence]) -> Result<f64> {
        CrossEntropy::new().batch_loss(actual, expected)
    }

    /// Truncated backpropagation through time for one sequence.
    ///
    /// Returns fresh gradients of the total (summed over timesteps) cross-entropy
    /// loss with respect to `U`, `V` and `W`. See `accumulate_gradients` for the
    /// exact recurrence.
    ///
    /// # Parameters
    ///
    /// - `input` - The sequence that was passed to `forward`
    /// - `trace` - The trace `forward` returned for `input`
    /// - `expected` - Expected outputs, same length as `input`
    /// - `horizon` - Maximum number of steps each error is propagated back; `FULL_BPTT` never truncates
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the input, trace and expected output differ in length
    /// - `RnnError::DimensionMismatch` - If the expected vectors are not of the output dimension
    pub fn backward(
        &self,
        input: &Sequence,
        trace: &ForwardTrace,
        expected: &Sequence,
        horizon: usize,
    ) -> Result<Gradients> {
        let mut gradients = Gradients::zeros(&self.config);
        self.accumulate_gradients(input, trace, expected, horizon, &mut gradients)?;
        Ok(gradients)
    }

    /// Truncated BPTT that adds this sequence's gradients into `gradients`.
    ///
    /// For `t = T-1` down to `0`:
    ///
    /// ```text
    /// outputDelta = y_t - e_t
    /// dV += outputDelta ⊗ s_t
    /// delta = (Vᵀ·outputDelta) ⊙ (1 - s_t²)
    /// for t2 = t down to max(0, t - horizon):
    ///     dU += delta ⊗ x_t2
    ///     if t2 == 0: stop (there is no s_{-1})
    ///     dW += delta ⊗ s_{t2-1}
    ///     delta = (Wᵀ·delta) ⊙ (1 - s_{t2-1}²)
    /// ```
    ///
    /// `outputDelta` is the cross-entropy gradient at temperature 1; with another
    /// temperature every gradient is `temperature` times the true one.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the input, trace and expected output differ in length
    /// - `RnnError::DimensionMismatch` - If the expected vectors or the accumulators have the wrong shape
    pub fn accumulate_gradients(
        &self,
        input: &Sequence,
        trace: &ForwardTrace,
        expected: &Sequence,
        horizon: usize,
        gradients: &mut Gradients,
    ) -> Result<()> {
        let steps = input.len();
        if trace.len() != steps || expected.len() != steps {
            return Err(RnnError::sequence(format!(
                "Cannot backpropagate: input has {} steps, trace has {}, expected output has {}",
                steps,
                trace.len(),
                expected.len()
            )));
        }

        let inputs = input.as_slice();
        let hidden = trace.hidden_states();
        let actual = trace.outputs().as_slice();
        let targets = expected.as_slice();

        let output_weights_t = self.output_weights.transpose();
        let recurrent_weights_t = self.recurrent_weights.transpose();

        for t in (0..steps).rev() {
            let state = &hidden[t];
            let output_delta = actual[t].subtract(&targets[t])?;
            gradients.output.add_dyadic_assign(&output_delta, state)?;

            let mut delta = self
                .backend
                .matrix_vector(&output_weights_t, &output_delta)?
                .schur_product(&self.hidden_activation.derivative(state))?;

            let lower = t.saturating_sub(horizon);
            for t2 in (lower..=t).rev() {
                gradients.input.add_dyadic_assign(&delta, &inputs[t2])?;
                if t2 == 0 {
                    break;
                }

                let previous = &hidden[t2 - 1];
                gradients.recurrent.add_dyadic_assign(&delta, previous)?;
                if t2 > lower {
                    delta = self
                        .backend
                        .matrix_vector(&recurrent_weights_t, &delta)?
                        .schur_product(&self.hidden_activation.derivative(previous))?;
                }
            }
        }
        Ok(())
    }

    /// Collapses a probability vector to the one-hot vector of its most likely entry.
    ///
    /// Ties resolve to the first maximum. An empty vector predicts an empty vector.
    pub fn predict(&self, probabilities: &Vector) -> Vector {
        match probabilities.argmax() {
            Some(index) => {
                let mut elements = vec![0.0; probabilities.len()];
                elements[index] = 1.0;
                Vector::new(elements)
            }
            None => Vector::zeros(0),
        }
    }

    /// Applies `predict` to every step of a sequence of probability vectors.
    pub fn predict_sequence(&self, probabilities: &Sequence) -> Result<Sequence> {
        Sequence::new(probabilities.iter().map(|v| self.predict(v)).collect())
    }

    /// Generates a continuation of `seed` until the sequence is `total_length` long.
    ///
    /// All but the last seed element are replayed to build the hidden state. Then,
    /// repeatedly, the next state and output distribution are computed, the output
    /// is appended, and its one-hot prediction is fed back as the next input.
    /// The returned sequence is the seed followed by the generated probability
    /// vectors.
    ///
    /// # Errors
    ///
    /// - `RnnError::SequenceError` - If the seed is empty or not shorter than `total_length`
    /// - `RnnError::ConfigurationError` - If the output dimension differs from the input dimension
    pub fn generate(&self, seed: &Sequence, total_length: usize) -> Result<Sequence> {
        if seed.len() >= total_length {
            return Err(RnnError::sequence(format!(
                "Can't generate a sequence of total length {} from a seed of length {}",
                total_length,
                seed.len()
            )));
        }
        let Some((last, replay)) = seed.as_slice().split_last() else {
            return Err(RnnError::sequence("Can't generate from an empty seed"));
        };
        if self.config.input_dimension != self.config.output_dimension {
            return Err(RnnError::configuration(format!(
                "Generation feeds outputs back as inputs, but output dimension {} differs from input dimension {}",
                self.config.output_dimension, self.config.input_dimension
            )));
        }

        let mut state: Option<Vector> = None;
        for x in replay {
            state = Some(self.next_state(x, state.as_ref())?);
        }

        let mut next = last.clone();
        let mut generated = Vec::new();
        for _ in seed.len()..total_length {
            let current = self.next_state(&next, state.as_ref())?;
            let output = self.output(&current)?;
            next = self.predict(&output);
            generated.push(output);
            state = Some(current);
        }

        seed.join(&Sequence::new(generated)?)
    }

    /// Trains the network on `data` with a fresh `Trainer` and no callbacks.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If the training configuration is invalid
    /// - Any error raised while processing an instance; such errors end the run
    pub fn fit<D: DataSet>(&mut self, data: &mut D, config: &TrainingConfig) -> Result<TrainingReport> {
        Trainer::new(config.clone())?.train(self, data)
    }
}

/// Checks that `matrix` has the shape `weight` must have under `config`.
fn check_weight_shape(config: &NetworkConfig, weight: Weight, matrix: &Matrix) -> Result<()> {
    let (rows, cols) = weight.shape(config);
    if matrix.shape() != (rows, cols) {
        return Err(RnnError::dimension_mismatch(
            weight.name(),
            &[rows, cols],
            &[matrix.rows(), matrix.cols()],
        ));
    }
    Ok(())
}
