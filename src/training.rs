/// Per-epoch hooks
pub mod callback;

/// Training hyperparameters
pub mod training_config;

pub use callback::*;
pub use training_config::*;

use crate::algebra::Vector;
use crate::dataset::{DataSet, TrailingBatch, TrainingPair};
use crate::error::{Result, RnnError};
use crate::loss_function::CrossEntropy;
use crate::optimizer::{AdaptiveOptimizer, Optimizer, RMSPropConfig};
use crate::recurrent_network::{Gradients, RecurrentNetwork};
use crate::sequence::Sequence;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How a training run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    /// Every configured epoch ran
    Completed,
    /// A batch loss fell below the configured threshold; that batch was not applied
    EarlyStopped { epoch: usize, batch: usize, loss: f64 },
}

/// Summary returned by `Trainer::train`.
///
/// # Fields
///
/// - `outcome` - Whether the run completed or stopped early
/// - `batch_losses` - Loss of every processed batch, in order
/// - `epochs_run` - Number of epochs started
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub outcome: TrainingOutcome,
    pub batch_losses: Vec<f64>,
    pub epochs_run: usize,
}

impl TrainingReport {
    pub fn early_stopped(&self) -> bool {
        matches!(self.outcome, TrainingOutcome::EarlyStopped { .. })
    }

    /// Loss of the last processed batch.
    pub fn final_loss(&self) -> Option<f64> {
        self.batch_losses.last().copied()
    }
}

/// Summed gradients, loss and timestep count of the instances of one batch.
struct BatchAccumulator {
    gradients: Gradients,
    loss: f64,
    timesteps: usize,
}

impl BatchAccumulator {
    fn new(network: &RecurrentNetwork) -> Self {
        Self {
            gradients: Gradients::zeros(network.config()),
            loss: 0.0,
            timesteps: 0,
        }
    }

    fn add_instance(&mut self, network: &RecurrentNetwork, pair: &TrainingPair, horizon: usize) -> Result<()> {
        let trace = network.forward(&pair.input)?;
        self.loss += CrossEntropy::new().total_loss(trace.outputs(), &pair.expected)?;
        network.accumulate_gradients(&pair.input, &trace, &pair.expected, horizon, &mut self.gradients)?;
        self.timesteps += pair.len();
        Ok(())
    }

    fn merge(mut self, other: BatchAccumulator) -> Result<Self> {
        self.gradients.accumulate(&other.gradients)?;
        self.loss += other.loss;
        self.timesteps += other.timesteps;
        Ok(self)
    }
}

/// Epoch / minibatch training loop for a `RecurrentNetwork`.
///
/// Each epoch runs the callbacks, shuffles the data set and walks its
/// minibatches. For every batch the instances are run forward and backward
/// (each with its own `ForwardTrace`), their gradients and timestep counts are
/// summed, and the batch loss is the summed total loss divided by the summed
/// timesteps. If a loss threshold is configured and the batch loss is below it,
/// training stops at once without applying that batch. Otherwise the gradients
/// are divided by the batch's timestep count and handed to the optimizer.
///
/// Any error raised while processing an instance ends the run.
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::dataset::SequenceDataSet;
/// use rustyrnn::recurrent_network::RecurrentNetwork;
/// use rustyrnn::sequence::Sequence;
/// use rustyrnn::training::{Trainer, TrainingConfig};
///
/// let one_hot = |i| Vector::one_hot(3, i).unwrap();
/// let input = Sequence::new(vec![one_hot(0), one_hot(1), one_hot(2)]).unwrap();
/// let expected = Sequence::new(vec![one_hot(1), one_hot(2), one_hot(0)]).unwrap();
/// let mut data = SequenceDataSet::from_sequences(vec![input], vec![expected]).unwrap();
///
/// let mut network = RecurrentNetwork::builder()
///     .input_dimension(3)
///     .output_dimension(3)
///     .hidden_dimension(8)
///     .random_state(42)
///     .build()
///     .unwrap();
///
/// let config = TrainingConfig {
///     epochs: 5,
///     batch_size: 1,
///     random_state: Some(42),
///     ..TrainingConfig::default()
/// };
///
/// let mut trainer = Trainer::new(config).unwrap();
/// trainer.add_callback(|epoch: usize, network: &RecurrentNetwork| {
///     println!("epoch {} with {} parameters", epoch, network.param_count());
/// });
/// let report = trainer.train(&mut network, &mut data).unwrap();
/// assert_eq!(report.epochs_run, 5);
/// assert_eq!(report.batch_losses.len(), 5);
/// ```
pub struct Trainer {
    config: TrainingConfig,
    callbacks: Vec<Box<dyn EpochCallback>>,
}

impl Trainer {
    /// Creates a trainer after validating `config`.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If `config` is invalid
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            callbacks: Vec::new(),
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Registers a hook to run before every epoch.
    pub fn add_callback<C: EpochCallback + 'static>(&mut self, callback: C) -> &mut Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Trains `network` on `data` with a fresh RMSProp optimizer.
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If the optimizer configuration is invalid
    /// - `RnnError::DataSetError` - If the data set is empty
    /// - Any error raised by forward, backward or the optimizer
    pub fn train<D: DataSet>(&mut self, network: &mut RecurrentNetwork, data: &mut D) -> Result<TrainingReport> {
        let mut optimizer = AdaptiveOptimizer::new(network.config(), self.config.optimizer)?;
        self.train_with_optimizer(network, data, &mut optimizer)
    }

    /// Trains `network` on `data`, applying updates through `optimizer`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DataSetError` - If the data set is empty
    /// - Any error raised by forward, backward or the optimizer
    pub fn train_with_optimizer<D: DataSet>(
        &mut self,
        network: &mut RecurrentNetwork,
        data: &mut D,
        optimizer: &mut dyn Optimizer,
    ) -> Result<TrainingReport> {
        if data.is_empty() {
            return Err(RnnError::DataSetError(
                "cannot train on an empty data set".to_string(),
            ));
        }

        let config = &self.config;
        let mut rng = match config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let batches_per_epoch = match config.trailing_batch {
            TrailingBatch::Keep => data.len().div_ceil(config.batch_size),
            TrailingBatch::Drop => data.len() / config.batch_size,
        };
        let progress_bar = create_progress_bar(
            config.show_progress,
            config.epochs.saturating_mul(batches_per_epoch) as u64,
        );

        info!(
            epochs = config.epochs,
            batch_size = config.batch_size,
            instances = data.len(),
            truncation_horizon = config.truncation_horizon,
            backend = network.backend_name(),
            optimizer = optimizer.name(),
            parallel = config.parallel,
            "starting training"
        );

        let mut batch_losses = Vec::new();

        for epoch in 0..config.epochs {
            for callback in self.callbacks.iter_mut() {
                callback.on_epoch_start(epoch, network);
            }

            data.shuffle(&mut rng);

            let mut epoch_loss = 0.0;
            let mut batch_count = 0usize;

            for (batch_index, batch) in data
                .minibatches(config.batch_size, config.trailing_batch)
                .into_iter()
                .enumerate()
            {
                let accumulator = if config.parallel {
                    parallel_batch(network, batch, config.truncation_horizon)?
                } else {
                    sequential_batch(network, batch, config.truncation_horizon)?
                };
                progress_bar.inc(1);

                if accumulator.timesteps == 0 {
                    warn!(epoch, batch = batch_index, "skipping batch with no timesteps");
                    continue;
                }

                let loss = accumulator.loss / accumulator.timesteps as f64;
                batch_losses.push(loss);
                epoch_loss += loss;
                batch_count += 1;
                let average_loss = epoch_loss / batch_count as f64;

                debug!(epoch, batch = batch_index, loss, average_loss, "batch processed");
                progress_bar.set_message(format!(
                    "{}/{} | Avg Loss: {:.6}",
                    epoch + 1,
                    config.epochs,
                    average_loss
                ));

                if let Some(threshold) = config.loss_threshold {
                    if loss < threshold {
                        progress_bar.finish_with_message(format!("stopped early at epoch {}", epoch + 1));
                        info!(epoch, batch = batch_index, loss, threshold, "loss below threshold, stopping early");
                        return Ok(TrainingReport {
                            outcome: TrainingOutcome::EarlyStopped {
                                epoch,
                                batch: batch_index,
                                loss,
                            },
                            batch_losses,
                            epochs_run: epoch + 1,
                        });
                    }
                }

                let mut gradients = accumulator.gradients;
                gradients.scale(1.0 / accumulator.timesteps as f64);
                optimizer.update(network, &gradients)?;
            }

            let average_loss = if batch_count > 0 {
                epoch_loss / batch_count as f64
            } else {
                0.0
            };
            info!(epoch, average_loss, batches = batch_count, "epoch finished");
        }

        progress_bar.finish_with_message("training complete");
        info!(epochs = config.epochs, "training complete");

        Ok(TrainingReport {
            outcome: TrainingOutcome::Completed,
            batch_losses,
            epochs_run: config.epochs,
        })
    }
}

fn sequential_batch(
    network: &RecurrentNetwork,
    batch: &[TrainingPair],
    horizon: usize,
) -> Result<BatchAccumulator> {
    let mut accumulator = BatchAccumulator::new(network);
    for pair in batch {
        accumulator.add_instance(network, pair, horizon)?;
    }
    Ok(accumulator)
}

/// Fork/join over the instances of a batch: every instance gets its own trace and
/// gradients, which are reduced pairwise afterwards.
fn parallel_batch(
    network: &RecurrentNetwork,
    batch: &[TrainingPair],
    horizon: usize,
) -> Result<BatchAccumulator> {
    batch
        .par_iter()
        .map(|pair| -> Result<BatchAccumulator> {
            let mut accumulator = BatchAccumulator::new(network);
            accumulator.add_instance(network, pair, horizon)?;
            Ok(accumulator)
        })
        .try_reduce(|| BatchAccumulator::new(network), BatchAccumulator::merge)
}

fn create_progress_bar(visible: bool, total: u64) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let progress_bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Epoch {msg}")
    {
        progress_bar.set_style(style.progress_chars("█▓░"));
    }
    progress_bar
}
