use super::*;

/// Threshold for switching between sequential and parallel computation.
/// For tensors smaller than this threshold, sequential computation is used
/// to avoid parallelization overhead.
const RMS_PROP_PARALLEL_THRESHOLD: usize = 1024;

/// Added to the root mean square before dividing.
pub const RMS_PROP_EPSILON: f64 = 1e-6;

/// RMSProp hyperparameters shared by every tracked tensor.
///
/// # Fields
///
/// - `learning_rate` - Numerator of the per-element step multiplier
/// - `decay_rate` - Weight of the previous mean square in the running average
/// - `min_multiplier` - Lower clamp of the step multiplier
/// - `max_multiplier` - Upper clamp of the step multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RMSPropConfig {
    pub learning_rate: f64,
    pub decay_rate: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for RMSPropConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            decay_rate: 0.9,
            min_multiplier: 0.1,
            max_multiplier: 1.0,
        }
    }
}

impl RMSPropConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If any hyperparameter is out of range
    pub fn new(
        learning_rate: f64,
        decay_rate: f64,
        min_multiplier: f64,
        max_multiplier: f64,
    ) -> Result<Self> {
        let config = Self {
            learning_rate,
            decay_rate,
            min_multiplier,
            max_multiplier,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every hyperparameter.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If the learning rate is not positive, the decay is
    ///   outside [0, 1), or the multiplier bounds are not `0 < min <= max`
    pub fn validate(&self) -> Result<()> {
        validate_learning_rate(self.learning_rate)?;
        validate_decay_rate(self.decay_rate, "decay_rate")?;
        validate_multiplier_bounds(self.min_multiplier, self.max_multiplier)
    }
}

/// RMSProp state for a single weight tensor.
///
/// Keeps the decayed running mean of squared gradients and turns a gradient into
/// a bounded weight delta:
///
/// ```text
/// meanSquare = decay·meanSquare + (1 − decay)·g²
/// multiplier = clamp(learningRate / (√meanSquare + ε), min, max)
/// delta      = g ⊙ multiplier          (applied as weight -= delta)
/// ```
///
/// The multiplier stays inside `[min_multiplier, max_multiplier]` for every
/// gradient, including zero gradients.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Matrix;
/// use rustyrnn::optimizer::{RMSProp, RMSPropConfig};
///
/// let mut state = RMSProp::new(2, 2, RMSPropConfig::default()).unwrap();
/// let gradient = Matrix::filled(2, 2, 0.5);
/// let delta = state.step(Some(&gradient)).unwrap();
/// assert_eq!(delta.shape(), (2, 2));
/// assert!(delta.iter().all(|d| *d > 0.0 && *d <= 0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RMSProp {
    mean_square: Matrix,
    config: RMSPropConfig,
}

impl RMSProp {
    /// Creates zeroed state for a `rows x cols` tensor.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If `config` is invalid
    pub fn new(rows: usize, cols: usize, config: RMSPropConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mean_square: Matrix::zeros(rows, cols),
            config,
        })
    }

    pub fn config(&self) -> &RMSPropConfig {
        &self.config
    }

    pub fn mean_square(&self) -> &Matrix {
        &self.mean_square
    }

    fn check_gradient(&self, gradient: &Matrix) -> Result<()> {
        if gradient.shape() != self.mean_square.shape() {
            return Err(RnnError::OptimizerDimensionMismatch {
                expected: self.mean_square.shape(),
                actual: gradient.shape(),
            });
        }
        Ok(())
    }

    /// Folds `gradient ⊙ gradient` into the running mean square.
    ///
    /// # Errors
    ///
    /// - `RnnError::NullGradient` - If `gradient` is `None`
    /// - `RnnError::OptimizerDimensionMismatch` - If the gradient shape differs from the tracked tensor
    ///
    /// # Performance
    ///
    /// Uses parallel computation when the tensor length is at least `RMS_PROP_PARALLEL_THRESHOLD`.
    pub fn update_mean_square(&mut self, gradient: Option<&Matrix>) -> Result<()> {
        let gradient = gradient.ok_or(RnnError::NullGradient)?;
        self.check_gradient(gradient)?;

        let decay = self.config.decay_rate;
        let use_parallel = self.mean_square.len() >= RMS_PROP_PARALLEL_THRESHOLD;
        let zip = Zip::from(self.mean_square.as_array_mut()).and(gradient.as_array());

        if use_parallel {
            zip.par_for_each(|m, &g| *m = decay * *m + (1.0 - decay) * g * g);
        } else {
            zip.for_each(|m, &g| *m = decay * *m + (1.0 - decay) * g * g);
        }
        Ok(())
    }

    /// Per-element step multiplier from the current mean square.
    pub fn gradient_multiplier(&self) -> Matrix {
        let RMSPropConfig {
            learning_rate,
            min_multiplier,
            max_multiplier,
            ..
        } = self.config;
        self.mean_square.map(|m| {
            (learning_rate / (m.sqrt() + RMS_PROP_EPSILON)).clamp(min_multiplier, max_multiplier)
        })
    }

    /// Scales `gradient` by the current multiplier without touching the state.
    ///
    /// # Errors
    ///
    /// - `RnnError::OptimizerDimensionMismatch` - If the gradient shape differs from the tracked tensor
    pub fn compute_delta(&self, gradient: &Matrix) -> Result<Matrix> {
        self.check_gradient(gradient)?;
        gradient.schur_product(&self.gradient_multiplier())
    }

    /// Updates the mean square with `gradient`, then returns the delta to subtract from the weight.
    ///
    /// # Errors
    ///
    /// - `RnnError::NullGradient` - If `gradient` is `None`
    /// - `RnnError::OptimizerDimensionMismatch` - If the gradient shape differs from the tracked tensor
    pub fn step(&mut self, gradient: Option<&Matrix>) -> Result<Matrix> {
        self.update_mean_square(gradient)?;
        let gradient = gradient.ok_or(RnnError::NullGradient)?;
        self.compute_delta(gradient)
    }

    /// Forgets the accumulated statistics.
    pub fn reset(&mut self) {
        self.mean_square.fill_zero();
    }
}
