//! Error types for variational time evolution.

use std::fmt;

use thiserror::Error;

/// Boxed error type carried by [`EstimationError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by an external collaborator (state, estimator,
/// gradient expression or operator preparation).
///
/// The core never inspects or rewrites these; they are surfaced unchanged
/// as the `source` of [`EvolutionError::Estimation`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EstimationError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl EstimationError {
    /// Create an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with a message.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The collaborator's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for collaborator calls.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// The point in an `evolve` call at which a collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationStage {
    /// Operator preparation hook.
    Prepare,
    /// Building the natural-gradient expression.
    Build,
    /// Binding the gradient expression to the current values.
    BindGradient,
    /// Evaluating the bound gradient expression.
    Evaluate,
    /// Binding the final values into the state.
    BindState,
}

impl fmt::Display for EstimationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Prepare => "operator preparation",
            Self::Build => "natural-gradient construction",
            Self::BindGradient => "gradient parameter binding",
            Self::Evaluate => "gradient evaluation",
            Self::BindState => "state parameter binding",
        };
        f.write_str(s)
    }
}

/// Coarse classification of an [`EvolutionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or mismatched inputs, rejected before any estimation.
    Configuration,
    /// An external collaborator failed.
    Estimation,
    /// The gradient produced NaN, infinity or the wrong shape.
    Numerical,
}

/// Errors produced by a variational time evolution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvolutionError {
    /// num_time_steps must be ≥ 1.
    #[error("num_time_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Evolution time is NaN or infinite.
    #[error("evolution time must be finite, got {0}")]
    NonFiniteTime(f64),

    /// Parameter and value sequences have different lengths.
    #[error("{parameters} parameters but {values} parameter values")]
    ParameterCountMismatch {
        /// Number of symbolic parameters.
        parameters: usize,
        /// Number of supplied values.
        values: usize,
    },

    /// The same parameter name appears twice in a parameter set.
    #[error("parameter '{0}' appears more than once")]
    DuplicateParameter(String),

    /// A parameter was created with an empty name.
    #[error("parameter names must not be empty")]
    EmptyParameterName,

    /// An initial parameter value is NaN or infinite.
    #[error("initial value of parameter '{parameter}' is not finite ({value})")]
    NonFiniteParameterValue {
        /// The offending parameter.
        parameter: String,
        /// Its value.
        value: f64,
    },

    /// An external collaborator failed.
    #[error("{stage} failed{}: {source}", step_suffix(.step))]
    Estimation {
        /// Where in the evolution the failure happened.
        stage: EstimationStage,
        /// Zero-based step index, if inside the stepping loop.
        step: Option<usize>,
        /// Parameter values at the time of failure.
        parameter_values: Vec<f64>,
        /// The collaborator's error, unchanged.
        #[source]
        source: EstimationError,
    },

    /// The gradient has a different length than the parameter set.
    #[error("gradient at step {step} has {actual} entries, expected {expected}")]
    GradientLength {
        /// Zero-based step index.
        step: usize,
        /// Number of parameters.
        expected: usize,
        /// Number of gradient entries returned.
        actual: usize,
    },

    /// The real part of a gradient entry is NaN or infinite.
    #[error("gradient entry {index} at step {step} is not finite ({value})")]
    NonFiniteGradient {
        /// Zero-based step index.
        step: usize,
        /// Offending gradient component.
        index: usize,
        /// The value found.
        value: f64,
        /// Parameter values before the step.
        parameter_values: Vec<f64>,
    },

    /// The Euler update overflowed.
    #[error("parameter {index} overflowed at step {step} ({value})")]
    NonFiniteUpdate {
        /// Zero-based step index.
        step: usize,
        /// Offending parameter index.
        index: usize,
        /// The updated value.
        value: f64,
        /// Parameter values before the step.
        parameter_values: Vec<f64>,
    },
}

fn step_suffix(step: &Option<usize>) -> String {
    step.map(|s| format!(" at step {s}")).unwrap_or_default()
}

impl EvolutionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSteps(_)
            | Self::NonFiniteTime(_)
            | Self::ParameterCountMismatch { .. }
            | Self::DuplicateParameter(_)
            | Self::EmptyParameterName
            | Self::NonFiniteParameterValue { .. } => ErrorKind::Configuration,
            Self::Estimation { .. } => ErrorKind::Estimation,
            Self::GradientLength { .. }
            | Self::NonFiniteGradient { .. }
            | Self::NonFiniteUpdate { .. } => ErrorKind::Numerical,
        }
    }

    /// Step index at which the failure happened, if inside the loop.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::Estimation { step, .. } => *step,
            Self::GradientLength { step, .. }
            | Self::NonFiniteGradient { step, .. }
            | Self::NonFiniteUpdate { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type for evolution operations.
pub type EvolutionResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimation_error_displays_stage_and_step() {
        let err = EvolutionError::Estimation {
            stage: EstimationStage::Evaluate,
            step: Some(3),
            parameter_values: vec![0.0],
            source: EstimationError::new("backend offline"),
        };
        assert_eq!(
            err.to_string(),
            "gradient evaluation failed at step 3: backend offline"
        );
        assert_eq!(err.kind(), ErrorKind::Estimation);
        assert_eq!(err.step(), Some(3));
    }

    #[test]
    fn build_failure_has_no_step() {
        let err = EvolutionError::Estimation {
            stage: EstimationStage::Build,
            step: None,
            parameter_values: vec![],
            source: EstimationError::new("unsupported operator"),
        };
        assert_eq!(
            err.to_string(),
            "natural-gradient construction failed: unsupported operator"
        );
        assert_eq!(err.step(), None);
    }

    #[test]
    fn estimation_error_keeps_source_chain() {
        let io = std::io::Error::other("socket closed");
        let err = EstimationError::with_source("device call failed", io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "socket closed");
        assert_eq!(err.message(), "device call failed");
    }

    #[test]
    fn kinds() {
        assert_eq!(EvolutionError::InvalidSteps(0).kind(), ErrorKind::Configuration);
        let numerical = EvolutionError::GradientLength {
            step: 0,
            expected: 2,
            actual: 1,
        };
        assert_eq!(numerical.kind(), ErrorKind::Numerical);
    }
}
