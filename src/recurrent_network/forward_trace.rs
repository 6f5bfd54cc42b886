use super::*;

/// Everything a forward pass computed for one input sequence.
///
/// `hidden_states[t]` is `s_t` and `outputs[t]` is `y_t`. The trace is owned by the
/// caller and passed back to `RecurrentNetwork::backward`, so the network itself
/// keeps no per-sequence state.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    hidden_states: Vec<Vector>,
    outputs: Sequence,
}

impl ForwardTrace {
    pub(crate) fn new(hidden_states: Vec<Vector>, outputs: Sequence) -> Self {
        Self {
            hidden_states,
            outputs,
        }
    }

    pub fn hidden_states(&self) -> &[Vector] {
        &self.hidden_states
    }

    pub fn outputs(&self) -> &Sequence {
        &self.outputs
    }

    /// The last hidden state, `None` for an empty input.
    pub fn final_state(&self) -> Option<&Vector> {
        self.hidden_states.last()
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.hidden_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden_states.is_empty()
    }

    pub fn into_outputs(self) -> Sequence {
        self.outputs
    }
}
