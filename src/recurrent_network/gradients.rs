use super::*;

/// Identifies one of the three weight matrices of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    /// `U`, input to hidden
    Input,
    /// `W`, hidden to hidden
    Recurrent,
    /// `V`, hidden to output
    Output,
}

impl Weight {
    /// All weights in the order `U`, `W`, `V`.
    pub const ALL: [Weight; 3] = [Weight::Input, Weight::Recurrent, Weight::Output];

    pub fn name(&self) -> &'static str {
        match self {
            Weight::Input => "input weights (U)",
            Weight::Recurrent => "recurrent weights (W)",
            Weight::Output => "output weights (V)",
        }
    }

    /// `(rows, cols)` of this weight under `config`.
    pub fn shape(&self, config: &NetworkConfig) -> (usize, usize) {
        match self {
            Weight::Input => (config.hidden_dimension, config.input_dimension),
            Weight::Recurrent => (config.hidden_dimension, config.hidden_dimension),
            Weight::Output => (config.output_dimension, config.hidden_dimension),
        }
    }
}

/// Gradient accumulators `dU`, `dW` and `dV`, shaped like the weights they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub(crate) input: Matrix,
    pub(crate) recurrent: Matrix,
    pub(crate) output: Matrix,
}

impl Gradients {
    /// Zero gradients for a network with the given configuration.
    pub fn zeros(config: &NetworkConfig) -> Self {
        let zeros = |weight: Weight| {
            let (rows, cols) = weight.shape(config);
            Matrix::zeros(rows, cols)
        };
        Self {
            input: zeros(Weight::Input),
            recurrent: zeros(Weight::Recurrent),
            output: zeros(Weight::Output),
        }
    }

    pub fn du(&self) -> &Matrix {
        &self.input
    }

    pub fn dw(&self) -> &Matrix {
        &self.recurrent
    }

    pub fn dv(&self) -> &Matrix {
        &self.output
    }

    pub fn get(&self, weight: Weight) -> &Matrix {
        match weight {
            Weight::Input => &self.input,
            Weight::Recurrent => &self.recurrent,
            Weight::Output => &self.output,
        }
    }

    /// Adds `other` element-wise into `self`.
    ///
    /// # Errors
    ///
    /// - `RnnError::DimensionMismatch` - If the two belong to differently shaped networks
    pub fn accumulate(&mut self, other: &Gradients) -> Result<()> {
        self.input.add_assign(&other.input)?;
        self.recurrent.add_assign(&other.recurrent)?;
        self.output.add_assign(&other.output)?;
        Ok(())
    }

    /// Multiplies every gradient by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.input.scale_in_place(factor);
        self.recurrent.scale_in_place(factor);
        self.output.scale_in_place(factor);
    }

    /// Resets all accumulators to zero.
    pub fn clear(&mut self) {
        self.input.fill_zero();
        self.recurrent.fill_zero();
        self.output.fill_zero();
    }

    /// Largest absolute entry across the three gradients.
    pub fn max_abs(&self) -> f64 {
        [&self.input, &self.recurrent, &self.output]
            .into_iter()
            .flat_map(|m| m.iter())
            .fold(0.0, |acc, g| acc.max(g.abs()))
    }
}
