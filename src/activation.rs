use crate::algebra::Vector;
use serde::{Deserialize, Serialize};

/// Activation function enum, supporting Tanh and temperature-scaled Softmax
///
/// The recurrent network uses `Tanh` for its hidden state and `Softmax` for its
/// output distribution. The set is closed; dispatch is a `match`, not a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    Tanh,
    Softmax { temperature: f64 },
}

impl Activation {
    /// Forward application of the activation function
    ///
    /// # Parameters
    ///
    /// * `z` - Pre-activation values
    ///
    /// # Returns
    ///
    /// * `Vector` - A new vector with the activation function applied
    pub fn apply(&self, z: &Vector) -> Vector {
        match *self {
            Activation::Tanh => z.map(f64::tanh),
            Activation::Softmax { temperature } => softmax(z, temperature),
        }
    }

    /// Derivative of the activation expressed through its own output
    ///
    /// For `Tanh` this is the diagonal of the Jacobian, `1 - s²`, which lies in
    /// [0, 1] for every finite input. For `Softmax` the gradient is folded into the
    /// cross-entropy output delta, so ones are returned.
    ///
    /// # Parameters
    ///
    /// * `activated` - The output after the activation function has been applied
    pub fn derivative(&self, activated: &Vector) -> Vector {
        match self {
            Activation::Tanh => activated.map(|s| 1.0 - s * s),
            Activation::Softmax { .. } => Vector::filled(activated.len(), 1.0),
        }
    }
}

/// `exp(z / T) / Σ exp(z / T)`, evaluated on the max-shifted logits so large
/// inputs cannot overflow.
fn softmax(z: &Vector, temperature: f64) -> Vector {
    if z.is_empty() {
        return Vector::zeros(0);
    }
    let max_val = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps = z.map(|x| ((x - max_val) / temperature).exp());
    let sum = exps.sum();
    exps.scale(1.0 / sum)
}
