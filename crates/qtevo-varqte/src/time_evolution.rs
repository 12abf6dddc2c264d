//! The time-evolution interface.

use serde::Serialize;

use crate::error::EvolutionResult;
use crate::parameter::{ParameterBinding, ParameterSet, ParameterValues};

/// Algorithms that evolve a quantum state under a Hermitian operator for a
/// given time.
///
/// Implementors hold the state being evolved together with the most
/// recently used operator, time and parameters. The accessors perform no
/// validation; [`evolve`](Self::evolve) is where inputs are checked.
pub trait TimeEvolution {
    /// Parameterised state type.
    type State;
    /// Operator (Hamiltonian) type.
    type Operator;
    /// Algorithm-specific options for a single `evolve` call.
    type Options;

    /// The state to be evolved.
    fn state(&self) -> &Self::State;

    /// Replace the state to be evolved.
    fn set_state(&mut self, state: Self::State);

    /// The operator the state was last evolved with.
    fn operator(&self) -> Option<&Self::Operator>;

    /// Replace the operator.
    fn set_operator(&mut self, operator: Self::Operator);

    /// The evolution time last used.
    fn time(&self) -> Option<f64>;

    /// Replace the evolution time.
    fn set_time(&mut self, time: f64);

    /// The parameters of the state.
    fn parameters(&self) -> Option<&ParameterSet>;

    /// Replace the parameters of the state.
    fn set_parameters(&mut self, parameters: ParameterSet);

    /// Evolve the state under `operator` for `time`.
    ///
    /// Once the inputs pass validation, the recorded operator, time and
    /// parameters are replaced by the arguments, whether or not the
    /// evolution then succeeds.
    fn evolve(
        &mut self,
        operator: Self::Operator,
        time: f64,
        parameters: ParameterSet,
        options: Self::Options,
    ) -> EvolutionResult<EvolvedState<Self::State>>;
}

/// The outcome of an evolution.
#[derive(Debug, Clone, Serialize)]
pub struct EvolvedState<S> {
    /// The state with its parameters bound to the final values.
    #[serde(skip)]
    pub state: S,
    /// The final parameter binding.
    pub binding: ParameterBinding,
    /// Parameter values at every step, starting with the initial values.
    ///
    /// Holds `num_time_steps + 1` entries of one value per parameter, so its
    /// memory grows with steps × parameters. Use [`into_parts`](Self::into_parts)
    /// and drop it when only the final binding is needed.
    pub trajectory: Vec<ParameterValues>,
}

impl<S> EvolvedState<S> {
    /// Number of integration steps taken.
    pub fn num_steps(&self) -> usize {
        self.trajectory.len().saturating_sub(1)
    }

    /// Final parameter values.
    pub fn final_values(&self) -> ParameterValues {
        self.binding.values()
    }

    /// Split into state, final binding and trajectory.
    pub fn into_parts(self) -> (S, ParameterBinding, Vec<ParameterValues>) {
        (self.state, self.binding, self.trajectory)
    }
}
