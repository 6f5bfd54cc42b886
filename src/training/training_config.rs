use super::*;

/// Hyperparameters of a training run.
///
/// # Fields
///
/// - `epochs` - Number of passes over the data set; must be > 0
/// - `batch_size` - Number of pairs per minibatch; must be > 0
/// - `truncation_horizon` - Steps each error is propagated back through time; `FULL_BPTT` never truncates
/// - `loss_threshold` - Stop as soon as a batch loss falls below this value; `None` never stops early
/// - `optimizer` - RMSProp hyperparameters
/// - `trailing_batch` - Whether a short final batch is trained on or skipped
/// - `parallel` - Compute the per-instance gradients of a batch on the rayon thread pool
/// - `random_state` - Seed for the per-epoch shuffles; `None` seeds from the thread RNG
/// - `show_progress` - Draw a terminal progress bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub truncation_horizon: usize,
    pub loss_threshold: Option<f64>,
    pub optimizer: RMSPropConfig,
    pub trailing_batch: TrailingBatch,
    pub parallel: bool,
    pub random_state: Option<u64>,
    pub show_progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 25,
            truncation_horizon: 5,
            loss_threshold: None,
            optimizer: RMSPropConfig::default(),
            trailing_batch: TrailingBatch::Keep,
            parallel: false,
            random_state: None,
            show_progress: false,
        }
    }
}

impl TrainingConfig {
    /// Checks every field, including the optimizer configuration.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If `epochs` or `batch_size` is zero, the loss
    ///   threshold is not finite, or the optimizer configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(RnnError::configuration("epochs must be greater than 0"));
        }
        if self.batch_size == 0 {
            return Err(RnnError::configuration("batch_size must be greater than 0"));
        }
        if let Some(threshold) = self.loss_threshold {
            if !threshold.is_finite() {
                return Err(RnnError::configuration(format!(
                    "loss_threshold must be finite, got {}",
                    threshold
                )));
            }
        }
        self.optimizer.validate()
    }
}
