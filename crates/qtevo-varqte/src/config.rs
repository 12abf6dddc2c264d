//! Gradient, QFI and regularisation strategy selection.
//!
//! Each strategy is identified by a tag string. Tags known to the common
//! natural-gradient estimators get their own variant; anything else is kept
//! verbatim as `Custom` and passed through to the estimator, which decides
//! whether it understands it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! method_tag {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A tag this crate does not know about, forwarded as-is.
            Custom(String),
        }

        impl $name {
            /// All tags with a dedicated variant.
            pub const KNOWN: &'static [&'static str] = &[$($tag),+];

            /// The tag string.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $tag, )+
                    Self::Custom(tag) => tag,
                }
            }

            /// True if this is a `Custom` tag.
            pub fn is_custom(&self) -> bool {
                matches!(self, Self::Custom(_))
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                match tag {
                    $( $tag => Self::$variant, )+
                    other => Self::Custom(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                Self::from(tag.as_str())
            }
        }

        impl From<$name> for String {
            fn from(m: $name) -> Self {
                m.as_str().to_string()
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

method_tag! {
    /// How the quantum Fisher information (McLachlan `A` matrix) is estimated.
    QfiMethod {
        /// Linear combination of unitaries, full matrix.
        #[default]
        LinCombFull => "lin_comb_full",
        /// Overlap method, block-diagonal approximation.
        OverlapBlockDiag => "overlap_block_diag",
        /// Overlap method, diagonal approximation.
        OverlapDiag => "overlap_diag",
    }
}

method_tag! {
    /// How the energy gradient (McLachlan `C` vector) is estimated.
    GradMethod {
        /// Linear combination of unitaries.
        #[default]
        LinComb => "lin_comb",
        /// Parameter-shift rule.
        ParamShift => "param_shift",
        /// Finite differences.
        FinDiff => "fin_diff",
    }
}

method_tag! {
    /// Regularisation used when solving the natural-gradient linear system.
    Regularization {
        /// Tikhonov / ridge regression.
        #[default]
        Ridge => "ridge",
        /// L1-regularised least squares.
        Lasso => "lasso",
        /// Add a small multiple of the identity to the diagonal.
        PerturbDiag => "perturb_diag",
        /// Perturb only the diagonal elements.
        PerturbDiagElements => "perturb_diag_elements",
        /// Plain least squares.
        Unregularized => "none",
    }
}

/// The strategies handed to the natural-gradient estimator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// QFI estimation method.
    #[serde(default)]
    pub qfi_method: QfiMethod,
    /// Gradient estimation method.
    #[serde(default)]
    pub grad_method: GradMethod,
    /// Regularisation scheme.
    #[serde(default)]
    pub regularization: Regularization,
}

impl EvolutionConfig {
    /// Set the QFI method.
    #[must_use]
    pub fn with_qfi_method(mut self, method: impl Into<QfiMethod>) -> Self {
        self.qfi_method = method.into();
        self
    }

    /// Set the gradient method.
    #[must_use]
    pub fn with_grad_method(mut self, method: impl Into<GradMethod>) -> Self {
        self.grad_method = method.into();
        self
    }

    /// Set the regularisation.
    #[must_use]
    pub fn with_regularization(mut self, regularization: impl Into<Regularization>) -> Self {
        self.regularization = regularization.into();
        self
    }

    /// Apply `overrides`, returning true if anything changed.
    pub fn merge(&mut self, overrides: &ConfigOverrides) -> bool {
        let before = self.clone();
        if let Some(m) = &overrides.qfi_method {
            self.qfi_method = m.clone();
        }
        if let Some(m) = &overrides.grad_method {
            self.grad_method = m.clone();
        }
        if let Some(r) = &overrides.regularization {
            self.regularization = r.clone();
        }
        *self != before
    }

    /// A copy with `overrides` applied.
    #[must_use]
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        config.merge(overrides);
        config
    }
}

/// Optional per-call replacements for [`EvolutionConfig`] fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigOverrides {
    /// Replacement QFI method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qfi_method: Option<QfiMethod>,
    /// Replacement gradient method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grad_method: Option<GradMethod>,
    /// Replacement regularisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regularization: Option<Regularization>,
}

impl From<&EvolutionConfig> for ConfigOverrides {
    /// Override every field with the value from `config`.
    fn from(config: &EvolutionConfig) -> Self {
        Self {
            qfi_method: Some(config.qfi_method.clone()),
            grad_method: Some(config.grad_method.clone()),
            regularization: Some(config.regularization.clone()),
        }
    }
}

impl ConfigOverrides {
    /// No overrides.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.qfi_method.is_none() && self.grad_method.is_none() && self.regularization.is_none()
    }

    /// Override the QFI method.
    #[must_use]
    pub fn qfi_method(mut self, method: impl Into<QfiMethod>) -> Self {
        self.qfi_method = Some(method.into());
        self
    }

    /// Override the gradient method.
    #[must_use]
    pub fn grad_method(mut self, method: impl Into<GradMethod>) -> Self {
        self.grad_method = Some(method.into());
        self
    }

    /// Override the regularisation.
    #[must_use]
    pub fn regularization(mut self, regularization: impl Into<Regularization>) -> Self {
        self.regularization = Some(regularization.into());
        self
    }
}
