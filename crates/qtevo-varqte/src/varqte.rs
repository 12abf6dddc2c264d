//! Variational quantum time evolution (VarQTE).
//!
//! Follows McLachlan's variational principle: the parameters θ of a
//! parameterised state |ψ(θ)⟩ obey
//!
//!   Σ_j Re(A_ij) dθ_j/dt = −Re(C_i)
//!
//! where `A` is the quantum Fisher information and `C` the energy gradient.
//! The external estimator supplies `A⁻¹ C` as a natural-gradient
//! expression; this module integrates the resulting ODE with explicit
//! Euler steps:
//!
//!   θ ← θ − (t / n) · Re(A⁻¹ C)(θ)      repeated n times
//!
//! Global error is O(t / n). There is no adaptive step control.
//!
//! Reference: X. Yuan et al., "Theory of variational
//! quantum simulation", Quantum 3, 191 (2019).
//! <https://doi.org/10.22331/q-2019-10-07-191>

use tracing::{debug, trace, warn};

use crate::config::{ConfigOverrides, EvolutionConfig};
use crate::error::{EstimationStage, EvolutionError, EvolutionResult};
use crate::estimator::{
    Evaluate, GradientExpression, IdentityPreparation, NaturalGradientEstimator, PrepareOperator,
    QuantumState,
};
use crate::parameter::{ParameterSet, ParameterValues};
use crate::settings::EvolutionSettings;
use crate::time_evolution::{EvolvedState, TimeEvolution};

/// Per-call options for [`VarQte::evolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct VarQteOptions {
    /// Number of explicit-Euler steps; the step size is `time / num_time_steps`.
    pub num_time_steps: usize,
    /// Initial parameter values, one per parameter.
    pub parameter_values: ParameterValues,
    /// Configuration overrides. These are merged into the instance
    /// configuration and stay in effect for later calls.
    pub overrides: ConfigOverrides,
}

impl VarQteOptions {
    /// Options with no configuration overrides.
    pub fn new(num_time_steps: usize, parameter_values: impl Into<ParameterValues>) -> Self {
        Self {
            num_time_steps,
            parameter_values: parameter_values.into(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Options taking the step count and configuration from loaded settings.
    ///
    /// Every field of `settings.evolution` becomes an override, so the
    /// settings replace the instance configuration on the next
    /// [`evolve`](TimeEvolution::evolve).
    pub fn from_settings(
        settings: &EvolutionSettings,
        parameter_values: impl Into<ParameterValues>,
    ) -> Self {
        Self::new(settings.num_time_steps, parameter_values)
            .with_overrides(ConfigOverrides::from(&settings.evolution))
    }

    /// Attach configuration overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Explicit-Euler variational time evolution.
///
/// Generic over the state `S`, operator `Op`, natural-gradient estimator `E`
/// and operator-preparation strategy `P`. With the default
/// [`IdentityPreparation`] the operator reaches the estimator unchanged;
/// imaginary-time evolution supplies its own preparation through
/// [`VarQite`](crate::VarQite).
///
/// # Sticky configuration
///
/// Overrides passed through [`VarQteOptions::overrides`] are written into
/// the instance configuration and remain active for every later call to
/// [`evolve`](TimeEvolution::evolve). Use [`evolve_with`](Self::evolve_with)
/// to run with a fully specified configuration that neither reads nor
/// modifies the instance configuration.
#[derive(Debug, Clone)]
pub struct VarQte<S, Op, E, P = IdentityPreparation> {
    state: S,
    operator: Option<Op>,
    time: Option<f64>,
    parameters: Option<ParameterSet>,
    parameter_values: Option<ParameterValues>,
    config: EvolutionConfig,
    estimator: E,
    preparation: P,
}

impl<S, Op, E> VarQte<S, Op, E, IdentityPreparation> {
    /// Create an evolution that feeds the operator to the estimator as-is.
    pub fn new(state: S, estimator: E) -> Self {
        Self::with_preparation(state, estimator, IdentityPreparation)
    }
}

impl<S, Op, E, P> VarQte<S, Op, E, P> {
    /// Create an evolution with a custom operator-preparation strategy.
    pub fn with_preparation(state: S, estimator: E, preparation: P) -> Self {
        Self {
            state,
            operator: None,
            time: None,
            parameters: None,
            parameter_values: None,
            config: EvolutionConfig::default(),
            estimator,
            preparation,
        }
    }

    /// Replace the instance configuration.
    #[must_use]
    pub fn with_config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// The instance configuration used by [`evolve`](TimeEvolution::evolve).
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Mutable access to the instance configuration.
    pub fn config_mut(&mut self) -> &mut EvolutionConfig {
        &mut self.config
    }

    /// Parameter values at the end of the last successful evolution.
    pub fn parameter_values(&self) -> Option<&ParameterValues> {
        self.parameter_values.as_ref()
    }

    /// The natural-gradient estimator.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// The operator-preparation strategy.
    pub fn preparation(&self) -> &P {
        &self.preparation
    }
}

impl<S, Op, E, P> VarQte<S, Op, E, P>
where
    S: QuantumState,
    E: NaturalGradientEstimator<Op>,
    P: PrepareOperator<Op>,
{
    /// Run the evolution with an explicit configuration.
    ///
    /// Unlike [`evolve`](TimeEvolution::evolve) this takes `&self`: it
    /// records nothing on the instance and ignores the instance
    /// configuration.
    pub fn evolve_with(
        &self,
        config: &EvolutionConfig,
        operator: &Op,
        time: f64,
        num_time_steps: usize,
        parameters: &ParameterSet,
        parameter_values: &ParameterValues,
    ) -> EvolutionResult<EvolvedState<S>> {
        validate(time, num_time_steps, parameters, parameter_values)?;

        debug!(
            time,
            num_time_steps,
            num_parameters = parameters.len(),
            qfi_method = %config.qfi_method,
            grad_method = %config.grad_method,
            regularization = %config.regularization,
            "starting variational time evolution"
        );

        let prepared = self.preparation.prepare(operator).map_err(|source| {
            estimation_error(EstimationStage::Prepare, None, parameter_values, source)
        })?;

        let nat_grad = self
            .estimator
            .build(&prepared, parameters, config)
            .map_err(|source| {
                estimation_error(EstimationStage::Build, None, parameter_values, source)
            })?;

        let dt = time / num_time_steps as f64;
        let mut values = parameter_values.clone();
        let mut trajectory = Vec::with_capacity(num_time_steps + 1);
        trajectory.push(values.clone());

        for step in 0..num_time_steps {
            let binding = parameters.bind(&values)?;
            let gradient = nat_grad
                .assign_parameters(&binding)
                .map_err(|source| {
                    estimation_error(EstimationStage::BindGradient, Some(step), &values, source)
                })?
                .eval()
                .map_err(|source| {
                    estimation_error(EstimationStage::Evaluate, Some(step), &values, source)
                })?;

            values = euler_step(step, &values, &gradient, dt)?;
            trace!(step, values = ?values.as_slice(), "euler step");
            trajectory.push(values.clone());
        }

        let binding = parameters.bind(&values)?;
        let state = self.state.assign_parameters(&binding).map_err(|source| {
            estimation_error(EstimationStage::BindState, None, &values, source)
        })?;

        debug!(final_values = ?values.as_slice(), "variational time evolution finished");

        Ok(EvolvedState {
            state,
            binding,
            trajectory,
        })
    }
}

impl<S, Op, E, P> TimeEvolution for VarQte<S, Op, E, P>
where
    S: QuantumState,
    E: NaturalGradientEstimator<Op>,
    P: PrepareOperator<Op>,
{
    type State = S;
    type Operator = Op;
    type Options = VarQteOptions;

    fn state(&self) -> &S {
        &self.state
    }

    fn set_state(&mut self, state: S) {
        self.state = state;
    }

    fn operator(&self) -> Option<&Op> {
        self.operator.as_ref()
    }

    fn set_operator(&mut self, operator: Op) {
        self.operator = Some(operator);
    }

    fn time(&self) -> Option<f64> {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = Some(time);
    }

    fn parameters(&self) -> Option<&ParameterSet> {
        self.parameters.as_ref()
    }

    fn set_parameters(&mut self, parameters: ParameterSet) {
        self.parameters = Some(parameters);
    }

    fn evolve(
        &mut self,
        operator: Op,
        time: f64,
        parameters: ParameterSet,
        options: VarQteOptions,
    ) -> EvolutionResult<EvolvedState<S>> {
        let VarQteOptions {
            num_time_steps,
            parameter_values,
            overrides,
        } = options;

        validate(time, num_time_steps, &parameters, &parameter_values)?;

        if self.config.merge(&overrides) {
            warn!(
                qfi_method = %self.config.qfi_method,
                grad_method = %self.config.grad_method,
                regularization = %self.config.regularization,
                "configuration overrides persist for subsequent evolutions"
            );
        }

        let result = self.evolve_with(
            &self.config,
            &operator,
            time,
            num_time_steps,
            &parameters,
            &parameter_values,
        );

        self.operator = Some(operator);
        self.time = Some(time);
        self.parameters = Some(parameters);

        let evolved = result?;
        self.parameter_values = Some(evolved.final_values());
        Ok(evolved)
    }
}

/// Check the inputs of an evolution before any estimation is attempted.
fn validate(
    time: f64,
    num_time_steps: usize,
    parameters: &ParameterSet,
    values: &ParameterValues,
) -> EvolutionResult<()> {
    if num_time_steps == 0 {
        return Err(EvolutionError::InvalidSteps(0));
    }
    if !time.is_finite() {
        return Err(EvolutionError::NonFiniteTime(time));
    }
    if parameters.len() != values.len() {
        return Err(EvolutionError::ParameterCountMismatch {
            parameters: parameters.len(),
            values: values.len(),
        });
    }
    if let Some((i, value)) = values.first_non_finite() {
        return Err(EvolutionError::NonFiniteParameterValue {
            parameter: parameters[i].name().to_string(),
            value,
        });
    }
    Ok(())
}

fn estimation_error(
    stage: EstimationStage,
    step: Option<usize>,
    values: &ParameterValues,
    source: crate::error::EstimationError,
) -> EvolutionError {
    EvolutionError::Estimation {
        stage,
        step,
        parameter_values: values.as_slice().to_vec(),
        source,
    }
}

/// One explicit-Euler update `θ − dt · Re(g)`.
fn euler_step(
    step: usize,
    values: &ParameterValues,
    gradient: &[num_complex::Complex64],
    dt: f64,
) -> EvolutionResult<ParameterValues> {
    if gradient.len() != values.len() {
        return Err(EvolutionError::GradientLength {
            step,
            expected: values.len(),
            actual: gradient.len(),
        });
    }

    let mut next = Vec::with_capacity(values.len());
    for (index, (theta, g)) in values.iter().zip(gradient).enumerate() {
        let g = g.re;
        if !g.is_finite() {
            return Err(EvolutionError::NonFiniteGradient {
                step,
                index,
                value: g,
                parameter_values: values.as_slice().to_vec(),
            });
        }
        let updated = theta - dt * g;
        if !updated.is_finite() {
            return Err(EvolutionError::NonFiniteUpdate {
                step,
                index,
                value: updated,
                parameter_values: values.as_slice().to_vec(),
            });
        }
        next.push(updated);
    }
    Ok(ParameterValues::from(next))
}
