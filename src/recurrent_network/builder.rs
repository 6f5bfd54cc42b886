use super::*;

/// Temperature used when none is given.
pub const DEFAULT_SOFTMAX_TEMPERATURE: f64 = 1.0;

/// Dimensions and output temperature of a recurrent network.
///
/// # Fields
///
/// - `input_dimension` - Size of each input vector
/// - `output_dimension` - Size of each output distribution
/// - `hidden_dimension` - Size of the hidden state
/// - `softmax_temperature` - Divides the output logits before the softmax; must be positive and finite
/// - `random_state` - Seed for weight initialisation; `None` seeds from the thread RNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_dimension: usize,
    pub output_dimension: usize,
    pub hidden_dimension: usize,
    pub softmax_temperature: f64,
    pub random_state: Option<u64>,
}

impl NetworkConfig {
    /// Creates a configuration with temperature 1 and no fixed seed.
    pub fn new(input_dimension: usize, output_dimension: usize, hidden_dimension: usize) -> Self {
        Self {
            input_dimension,
            output_dimension,
            hidden_dimension,
            softmax_temperature: DEFAULT_SOFTMAX_TEMPERATURE,
            random_state: None,
        }
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If a dimension is zero or the temperature is not positive and finite
    pub fn validate(&self) -> Result<()> {
        validate_dimension(self.input_dimension, "input_dimension")?;
        validate_dimension(self.output_dimension, "output_dimension")?;
        validate_dimension(self.hidden_dimension, "hidden_dimension")?;
        if !(self.softmax_temperature > 0.0 && self.softmax_temperature.is_finite()) {
            return Err(RnnError::configuration(format!(
                "softmax_temperature must be positive and finite, got {}",
                self.softmax_temperature
            )));
        }
        Ok(())
    }
}

fn validate_dimension(value: usize, param_name: &str) -> Result<()> {
    if value == 0 {
        return Err(RnnError::configuration(format!(
            "{} must be greater than 0",
            param_name
        )));
    }
    Ok(())
}

/// Fluent builder for `RecurrentNetwork`.
///
/// Dimensions have no defaults and must all be set; `build` validates them and
/// initialises the weights. The multiply backend defaults to `CpuBackend`.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use rustyrnn::algebra::ParallelBackend;
/// use rustyrnn::recurrent_network::RecurrentNetwork;
///
/// let network = RecurrentNetwork::builder()
///     .input_dimension(5)
///     .output_dimension(5)
///     .hidden_dimension(16)
///     .softmax_temperature(0.8)
///     .backend(Arc::new(ParallelBackend::new()))
///     .build()
///     .unwrap();
/// assert_eq!(network.backend_name(), "parallel");
///
/// assert!(RecurrentNetwork::builder().input_dimension(5).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RecurrentNetworkBuilder {
    config: NetworkConfig,
    backend: Option<Arc<dyn MultiplyBackend>>,
}

impl RecurrentNetworkBuilder {
    pub fn new() -> Self {
        Self {
            config: NetworkConfig::new(0, 0, 0),
            backend: None,
        }
    }

    pub fn input_dimension(mut self, dimension: usize) -> Self {
        self.config.input_dimension = dimension;
        self
    }

    pub fn output_dimension(mut self, dimension: usize) -> Self {
        self.config.output_dimension = dimension;
        self
    }

    pub fn hidden_dimension(mut self, dimension: usize) -> Self {
        self.config.hidden_dimension = dimension;
        self
    }

    pub fn softmax_temperature(mut self, temperature: f64) -> Self {
        self.config.softmax_temperature = temperature;
        self
    }

    /// Fixes the seed used to initialise the weights.
    pub fn random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    /// Selects the backend for every matrix product of the built network.
    pub fn backend(mut self, backend: Arc<dyn MultiplyBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Validates the configuration and creates a randomly initialised network.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If a dimension was not set or the temperature is invalid
    pub fn build(self) -> Result<RecurrentNetwork> {
        let backend = self.backend.unwrap_or_else(|| Arc::new(CpuBackend));
        RecurrentNetwork::with_backend(self.config, backend)
    }
}

impl Default for RecurrentNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
