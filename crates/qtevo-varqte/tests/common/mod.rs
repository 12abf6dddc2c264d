//! Stub collaborators shared by the integration tests.
//!
//! None of these touch a quantum state; they only have to honour the
//! binding/evaluation contracts the stepper relies on.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use num_complex::Complex64;
use qtevo_varqte::estimator::{Evaluate, GradientExpression, NaturalGradientEstimator, QuantumState};
use qtevo_varqte::{
    EstimationError, EstimationResult, EvolutionConfig, ParameterBinding, ParameterSet,
};

/// A state that remembers the last binding applied to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StubState {
    pub binding: Option<ParameterBinding>,
}

impl QuantumState for StubState {
    fn assign_parameters(&self, binding: &ParameterBinding) -> EstimationResult<Self> {
        Ok(Self {
            binding: Some(binding.clone()),
        })
    }
}

/// A state whose binding always fails.
#[derive(Debug, Clone, Default)]
pub struct UnbindableState;

impl QuantumState for UnbindableState {
    fn assign_parameters(&self, _: &ParameterBinding) -> EstimationResult<Self> {
        Err(EstimationError::new("state has no free parameters"))
    }
}

/// Operator stand-in carrying a label, so preparation is observable.
#[derive(Debug, Clone, PartialEq)]
pub struct StubOperator(pub String);

impl StubOperator {
    pub fn hamiltonian() -> Self {
        Self("H".to_string())
    }
}

/// Natural gradient `g(θ) = M θ + b`.
#[derive(Debug, Clone)]
pub struct AffineGradient {
    pub matrix: Vec<Vec<f64>>,
    pub offset: Vec<f64>,
}

impl AffineGradient {
    /// `g(θ) = b`, independent of θ.
    pub fn constant(offset: Vec<f64>) -> Self {
        let n = offset.len();
        Self {
            matrix: vec![vec![0.0; n]; n],
            offset,
        }
    }

    /// `g(θ) = 0`.
    pub fn zero(n: usize) -> Self {
        Self::constant(vec![0.0; n])
    }

    /// `g(θ) = rate · θ`, i.e. `dθ/dt = −rate · θ`.
    pub fn decay(rate: f64, n: usize) -> Self {
        let matrix = (0..n)
            .map(|i| (0..n).map(|j| if i == j { rate } else { 0.0 }).collect())
            .collect();
        Self {
            matrix,
            offset: vec![0.0; n],
        }
    }
}

/// An affine gradient evaluated at a point.
pub struct BoundGradient(Vec<Complex64>);

impl Evaluate for BoundGradient {
    fn eval(&self) -> EstimationResult<Vec<Complex64>> {
        Ok(self.0.clone())
    }
}

impl GradientExpression for AffineGradient {
    type Bound = BoundGradient;

    fn assign_parameters(&self, binding: &ParameterBinding) -> EstimationResult<BoundGradient> {
        let theta = binding.values();
        let g = self
            .matrix
            .iter()
            .zip(&self.offset)
            .map(|(row, b)| {
                let re = row.iter().zip(theta.iter()).map(|(m, t)| m * t).sum::<f64>() + b;
                // Imaginary noise must never reach the parameters.
                Complex64::new(re, 1.0e3)
            })
            .collect();
        Ok(BoundGradient(g))
    }
}

/// Estimator handing out a fixed expression and recording every build.
pub struct RecordingEstimator {
    expression: AffineGradient,
    pub builds: RefCell<Vec<(StubOperator, Vec<String>, EvolutionConfig)>>,
}

impl RecordingEstimator {
    pub fn new(expression: AffineGradient) -> Self {
        Self {
            expression,
            builds: RefCell::new(Vec::new()),
        }
    }

    pub fn num_builds(&self) -> usize {
        self.builds.borrow().len()
    }

    pub fn last_config(&self) -> Option<EvolutionConfig> {
        self.builds.borrow().last().map(|(_, _, c)| c.clone())
    }

    pub fn last_operator(&self) -> Option<StubOperator> {
        self.builds.borrow().last().map(|(op, _, _)| op.clone())
    }
}

impl NaturalGradientEstimator<StubOperator> for RecordingEstimator {
    type Expression = AffineGradient;

    fn build(
        &self,
        operator: &StubOperator,
        parameters: &ParameterSet,
        config: &EvolutionConfig,
    ) -> EstimationResult<AffineGradient> {
        let names = parameters.iter().map(|p| p.name().to_string()).collect();
        self.builds
            .borrow_mut()
            .push((operator.clone(), names, config.clone()));
        Ok(self.expression.clone())
    }
}

/// Fault injected by [`FaultyEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Build,
    BindAt(usize),
    EvalAt(usize),
    NanAt(usize),
    InfinityAt(usize),
    WrongLength,
}

/// Estimator whose expressions return ones, except where a fault fires.
pub struct FaultyEstimator {
    pub fault: Fault,
    pub len: usize,
}

pub struct FaultyExpression {
    fault: Fault,
    len: usize,
    step: Cell<usize>,
}

pub struct FaultyBound {
    fault: Fault,
    len: usize,
    step: usize,
}

impl NaturalGradientEstimator<StubOperator> for FaultyEstimator {
    type Expression = FaultyExpression;

    fn build(
        &self,
        _: &StubOperator,
        _: &ParameterSet,
        _: &EvolutionConfig,
    ) -> EstimationResult<FaultyExpression> {
        if self.fault == Fault::Build {
            return Err(EstimationError::new("unsupported operator structure"));
        }
        Ok(FaultyExpression {
            fault: self.fault,
            len: self.len,
            step: Cell::new(0),
        })
    }
}

impl GradientExpression for FaultyExpression {
    type Bound = FaultyBound;

    fn assign_parameters(&self, _: &ParameterBinding) -> EstimationResult<FaultyBound> {
        let step = self.step.get();
        self.step.set(step + 1);
        if self.fault == Fault::BindAt(step) {
            return Err(EstimationError::new("binding rejected"));
        }
        Ok(FaultyBound {
            fault: self.fault,
            len: self.len,
            step,
        })
    }
}

impl Evaluate for FaultyBound {
    fn eval(&self) -> EstimationResult<Vec<Complex64>> {
        let mut g = vec![Complex64::new(1.0, 0.0); self.len];
        match self.fault {
            Fault::EvalAt(s) if s == self.step => {
                return Err(EstimationError::with_source(
                    "evaluation failed",
                    std::io::Error::other("simulator crashed"),
                ));
            }
            Fault::NanAt(s) if s == self.step => g[self.len - 1] = Complex64::new(f64::NAN, 0.0),
            Fault::InfinityAt(s) if s == self.step => g[0] = Complex64::new(f64::INFINITY, 0.0),
            Fault::WrongLength => g.push(Complex64::new(0.0, 0.0)),
            _ => {}
        }
        Ok(g)
    }
}

pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "entry {i}: got {a}, expected {e} (tol {tol})"
        );
    }
}
