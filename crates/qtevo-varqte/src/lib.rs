//! `qtevo-varqte`: variational quantum time evolution.
//!
//! Integrates the parameter trajectory of a parameterised quantum state
//! under McLachlan's variational principle:
//!
//! - [`VarQte`]: explicit-Euler stepper driven by an external
//!   natural-gradient estimator
//! - [`VarQite`]: imaginary-time specialisation with a mandatory
//!   operator-preparation strategy
//!
//! Everything quantum (states, operators, gradient and QFI estimation) is
//! provided by the caller through the traits in [`estimator`].
//!
//! # Quick start
//!
//! ```rust
//! use num_complex::Complex64;
//! use qtevo_varqte::{
//!     EstimationResult, EvolutionConfig, ParameterBinding, ParameterSet, TimeEvolution, VarQte,
//!     VarQteOptions,
//! };
//! use qtevo_varqte::estimator::{Evaluate, GradientExpression, NaturalGradientEstimator, QuantumState};
//!
//! // A "state" that just remembers its binding.
//! #[derive(Clone, Default)]
//! struct Ansatz(Option<ParameterBinding>);
//! impl QuantumState for Ansatz {
//!     fn assign_parameters(&self, b: &ParameterBinding) -> EstimationResult<Self> {
//!         Ok(Ansatz(Some(b.clone())))
//!     }
//! }
//!
//! // dθ/dt = −θ, so the natural gradient is θ itself.
//! struct Decay;
//! struct Bound(Vec<f64>);
//! impl Evaluate for Bound {
//!     fn eval(&self) -> EstimationResult<Vec<Complex64>> {
//!         Ok(self.0.iter().map(|&v| Complex64::new(v, 0.0)).collect())
//!     }
//! }
//! impl GradientExpression for Decay {
//!     type Bound = Bound;
//!     fn assign_parameters(&self, b: &ParameterBinding) -> EstimationResult<Bound> {
//!         Ok(Bound(b.values().into_vec()))
//!     }
//! }
//! struct Estimator;
//! impl NaturalGradientEstimator<()> for Estimator {
//!     type Expression = Decay;
//!     fn build(&self, _: &(), _: &ParameterSet, _: &EvolutionConfig) -> EstimationResult<Decay> {
//!         Ok(Decay)
//!     }
//! }
//!
//! let mut evolution = VarQte::new(Ansatz::default(), Estimator);
//! let params = ParameterSet::vector("θ", 1).unwrap();
//! let evolved = evolution
//!     .evolve((), 1.0, params, VarQteOptions::new(100, [1.0]))
//!     .unwrap();
//! let theta = evolved.binding.get("θ[0]").unwrap();
//! assert!((theta - (-1.0f64).exp()).abs() < 1e-2);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod parameter;
pub mod settings;
pub mod time_evolution;
pub mod varqite;
pub mod varqte;

pub use config::{ConfigOverrides, EvolutionConfig, GradMethod, QfiMethod, Regularization};
pub use error::{
    ErrorKind, EstimationError, EstimationResult, EstimationStage, EvolutionError,
    EvolutionResult,
};
pub use estimator::{IdentityPreparation, PrepareOperator};
pub use parameter::{Parameter, ParameterBinding, ParameterSet, ParameterValues};
pub use settings::{ConfigError, EvolutionSettings, LoggingSettings};
pub use time_evolution::{EvolvedState, TimeEvolution};
pub use varqite::VarQite;
pub use varqte::{VarQte, VarQteOptions};
