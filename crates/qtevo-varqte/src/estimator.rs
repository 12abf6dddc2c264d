//! Interfaces to the external quantum machinery.
//!
//! The evolution core never simulates a circuit, manipulates an operator or
//! estimates a gradient itself. Everything quantum is reached through the
//! narrow traits in this module:
//!
//! | trait | role |
//! |-------|------|
//! | [`QuantumState`] | parameterised state preparation, re-bound at the end |
//! | [`PrepareOperator`] | adapts the operator before gradient estimation |
//! | [`NaturalGradientEstimator`] | builds a natural-gradient expression |
//! | [`GradientExpression`] | binds that expression to parameter values |
//! | [`Evaluate`] | evaluates a bound expression to a complex vector |

use num_complex::Complex64;

use crate::config::EvolutionConfig;
use crate::error::EstimationResult;
use crate::parameter::{ParameterBinding, ParameterSet};

/// A parameterised quantum state.
pub trait QuantumState: Sized {
    /// Return a copy of the state with `binding` substituted for its free
    /// parameters.
    fn assign_parameters(&self, binding: &ParameterBinding) -> EstimationResult<Self>;
}

/// Something that evaluates to a vector of complex numbers, one per
/// parameter.
pub trait Evaluate {
    /// Evaluate.
    fn eval(&self) -> EstimationResult<Vec<Complex64>>;
}

/// A natural-gradient expression with free parameters.
pub trait GradientExpression {
    /// The expression with all parameters bound.
    type Bound: Evaluate;

    /// Substitute `binding` for the expression's free parameters.
    fn assign_parameters(&self, binding: &ParameterBinding) -> EstimationResult<Self::Bound>;
}

/// Builds natural-gradient expressions for an operator type `Op`.
///
/// Implementations realise McLachlan's variational principle: the returned
/// expression evaluates to `A⁻¹ C` (regularised as requested), so that
/// `dθ/dt = −Re(A⁻¹ C)`.
pub trait NaturalGradientEstimator<Op> {
    /// Expression type produced by [`build`](Self::build).
    type Expression: GradientExpression;

    /// Build the gradient of `operator` with respect to `parameters`.
    fn build(
        &self,
        operator: &Op,
        parameters: &ParameterSet,
        config: &EvolutionConfig,
    ) -> EstimationResult<Self::Expression>;
}

impl<Op, E: NaturalGradientEstimator<Op> + ?Sized> NaturalGradientEstimator<Op> for &E {
    type Expression = E::Expression;

    fn build(
        &self,
        operator: &Op,
        parameters: &ParameterSet,
        config: &EvolutionConfig,
    ) -> EstimationResult<Self::Expression> {
        (**self).build(operator, parameters, config)
    }
}

/// Adapts an operator to the form required by a particular evolution
/// before the natural gradient is built.
///
/// Closures `Fn(&Op) -> EstimationResult<Op>` implement this trait.
pub trait PrepareOperator<Op> {
    /// Produce the adapted operator.
    fn prepare(&self, operator: &Op) -> EstimationResult<Op>;
}

impl<Op, F> PrepareOperator<Op> for F
where
    F: Fn(&Op) -> EstimationResult<Op>,
{
    fn prepare(&self, operator: &Op) -> EstimationResult<Op> {
        self(operator)
    }
}

/// Passes the operator through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreparation;

impl<Op: Clone> PrepareOperator<Op> for IdentityPreparation {
    fn prepare(&self, operator: &Op) -> EstimationResult<Op> {
        Ok(operator.clone())
    }
}
