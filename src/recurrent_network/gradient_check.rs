use super::*;
use tracing::debug;

/// Finite-difference verification of `RecurrentNetwork::backward`.
///
/// Every entry of `U`, `W` and `V` is perturbed by `±step`, the total loss of the
/// sequence is re-evaluated, and the central difference is compared with the
/// full-BPTT analytic gradient. Because the analytic gradient carries a factor
/// equal to the softmax temperature, the numeric gradient is scaled by the same
/// factor before comparing.
///
/// # Fields
///
/// - `step` - Perturbation applied to each weight entry
/// - `tolerance` - Largest absolute difference accepted between analytic and numeric gradients
///
/// # Example
/// ```rust
/// use rustyrnn::algebra::Vector;
/// use rustyrnn::recurrent_network::{GradientCheck, RecurrentNetwork};
/// use rustyrnn::sequence::Sequence;
///
/// let network = RecurrentNetwork::builder()
///     .input_dimension(3)
///     .output_dimension(3)
///     .hidden_dimension(3)
///     .random_state(7)
///     .build()
///     .unwrap();
/// let one_hot = |i| Vector::one_hot(3, i).unwrap();
/// let input = Sequence::new(vec![one_hot(0), one_hot(1), one_hot(2)]).unwrap();
/// let expected = Sequence::new(vec![one_hot(1), one_hot(2), one_hot(0)]).unwrap();
///
/// let report = GradientCheck::default().run(&network, &input, &expected).unwrap();
/// assert!(report.passed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientCheck {
    pub step: f64,
    pub tolerance: f64,
}

impl Default for GradientCheck {
    fn default() -> Self {
        Self {
            step: 1e-5,
            tolerance: 1e-6,
        }
    }
}

/// Outcome of checking a single weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCheck {
    pub weight: Weight,
    pub max_abs_error: f64,
    /// `(row, col)` of the entry with the largest error
    pub worst_entry: (usize, usize),
    pub passed: bool,
}

/// Per-weight results of a `GradientCheck` run.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientCheckReport {
    pub checks: Vec<WeightCheck>,
}

impl GradientCheckReport {
    /// `true` when every weight matrix passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// Largest error across all weights.
    pub fn max_abs_error(&self) -> f64 {
        self.checks
            .iter()
            .fold(0.0, |acc, check| acc.max(check.max_abs_error))
    }
}

impl GradientCheck {
    pub fn new(step: f64, tolerance: f64) -> Self {
        Self { step, tolerance }
    }

    /// Compares analytic and numeric gradients of the total loss of one sequence.
    ///
    /// # Parameters
    ///
    /// - `network` - Network under test; it is cloned and never modified
    /// - `input` - Input sequence
    /// - `expected` - Expected outputs, same length as `input`
    ///
    /// # Errors
    ///
    /// - `RnnError::ConfigurationError` - If `step` or `tolerance` is not positive and finite
    /// - Any error of `forward`, `backward` or the loss computation
    pub fn run(
        &self,
        network: &RecurrentNetwork,
        input: &Sequence,
        expected: &Sequence,
    ) -> Result<GradientCheckReport> {
        for (value, name) in [(self.step, "step"), (self.tolerance, "tolerance")] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(RnnError::configuration(format!(
                    "gradient check {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let trace = network.forward(input)?;
        let analytic = network.backward(input, &trace, expected, FULL_BPTT)?;
        let temperature = network.config().softmax_temperature;
        let loss_function = CrossEntropy::new();

        let mut probe = network.clone();
        let mut checks = Vec::with_capacity(Weight::ALL.len());

        for weight in Weight::ALL {
            let (rows, cols) = probe.weights(weight).shape();
            let mut max_abs_error = 0.0;
            let mut worst_entry = (0, 0);

            for row in 0..rows {
                for col in 0..cols {
                    let original = probe.weights(weight).as_array()[[row, col]];

                    probe.weights_mut(weight).as_array_mut()[[row, col]] = original + self.step;
                    let loss_plus = loss_function.total_loss(&probe.evaluate(input)?, expected)?;

                    probe.weights_mut(weight).as_array_mut()[[row, col]] = original - self.step;
                    let loss_minus = loss_function.total_loss(&probe.evaluate(input)?, expected)?;

                    probe.weights_mut(weight).as_array_mut()[[row, col]] = original;

                    let numeric = temperature * (loss_plus - loss_minus) / (2.0 * self.step);
                    let error = (analytic.get(weight).as_array()[[row, col]] - numeric).abs();
                    if error > max_abs_error {
                        max_abs_error = error;
                        worst_entry = (row, col);
                    }
                }
            }

            debug!(
                weight = weight.name(),
                max_abs_error, "gradient check finished for weight"
            );
            checks.push(WeightCheck {
                weight,
                max_abs_error,
                worst_entry,
                passed: max_abs_error <= self.tolerance,
            });
        }

        Ok(GradientCheckReport { checks })
    }
}
