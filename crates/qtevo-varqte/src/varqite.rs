//! Variational quantum imaginary time evolution (VarQITE).
//!
//! Imaginary-time evolution drives a state towards the ground state of the
//! Hamiltonian. McLachlan's principle gives
//!
//!   Σ_j Re(A_ij) dθ_j/dτ = −Re(C_i)
//!
//! but the Hamiltonian/ansatz combination must first be brought into the
//! form the natural-gradient estimator expects. That transform differs
//! between estimators, so [`VarQite`] takes it as a mandatory
//! [`PrepareOperator`] strategy rather than defaulting to the identity.

use crate::config::EvolutionConfig;
use crate::error::EvolutionResult;
use crate::estimator::{NaturalGradientEstimator, PrepareOperator, QuantumState};
use crate::parameter::{ParameterSet, ParameterValues};
use crate::time_evolution::{EvolvedState, TimeEvolution};
use crate::varqte::{VarQte, VarQteOptions};

/// Imaginary-time specialisation of [`VarQte`].
#[derive(Debug, Clone)]
pub struct VarQite<S, Op, E, P> {
    inner: VarQte<S, Op, E, P>,
}

impl<S, Op, E, P> VarQite<S, Op, E, P>
where
    P: PrepareOperator<Op>,
{
    /// Create an imaginary-time evolution with the given operator
    /// preparation.
    pub fn new(state: S, estimator: E, preparation: P) -> Self {
        Self {
            inner: VarQte::with_preparation(state, estimator, preparation),
        }
    }

    /// Replace the instance configuration.
    #[must_use]
    pub fn with_config(mut self, config: EvolutionConfig) -> Self {
        self.inner = self.inner.with_config(config);
        self
    }

    /// The instance configuration.
    pub fn config(&self) -> &EvolutionConfig {
        self.inner.config()
    }

    /// Parameter values at the end of the last successful evolution.
    pub fn parameter_values(&self) -> Option<&ParameterValues> {
        self.inner.parameter_values()
    }

    /// The operator-preparation strategy.
    pub fn preparation(&self) -> &P {
        self.inner.preparation()
    }

    /// Borrow the underlying stepper.
    pub fn as_varqte(&self) -> &VarQte<S, Op, E, P> {
        &self.inner
    }

    /// Unwrap into the underlying stepper.
    pub fn into_varqte(self) -> VarQte<S, Op, E, P> {
        self.inner
    }
}

impl<S, Op, E, P> VarQite<S, Op, E, P>
where
    S: QuantumState,
    E: NaturalGradientEstimator<Op>,
    P: PrepareOperator<Op>,
{
    /// See [`VarQte::evolve_with`].
    pub fn evolve_with(
        &self,
        config: &EvolutionConfig,
        operator: &Op,
        time: f64,
        num_time_steps: usize,
        parameters: &ParameterSet,
        parameter_values: &ParameterValues,
    ) -> EvolutionResult<EvolvedState<S>> {
        self.inner.evolve_with(
            config,
            operator,
            time,
            num_time_steps,
            parameters,
            parameter_values,
        )
    }
}

impl<S, Op, E, P> TimeEvolution for VarQite<S, Op, E, P>
where
    S: QuantumState,
    E: NaturalGradientEstimator<Op>,
    P: PrepareOperator<Op>,
{
    type State = S;
    type Operator = Op;
    type Options = VarQteOptions;

    fn state(&self) -> &S {
        self.inner.state()
    }

    fn set_state(&mut self, state: S) {
        self.inner.set_state(state);
    }

    fn operator(&self) -> Option<&Op> {
        self.inner.operator()
    }

    fn set_operator(&mut self, operator: Op) {
        self.inner.set_operator(operator);
    }

    fn time(&self) -> Option<f64> {
        self.inner.time()
    }

    fn set_time(&mut self, time: f64) {
        self.inner.set_time(time);
    }

    fn parameters(&self) -> Option<&ParameterSet> {
        self.inner.parameters()
    }

    fn set_parameters(&mut self, parameters: ParameterSet) {
        self.inner.set_parameters(parameters);
    }

    fn evolve(
        &mut self,
        operator: Op,
        time: f64,
        parameters: ParameterSet,
        options: VarQteOptions,
    ) -> EvolutionResult<EvolvedState<S>> {
        self.inner.evolve(operator, time, parameters, options)
    }
}
