//! Symbolic parameters, their values, and bindings between the two.
//!
//! A [`ParameterSet`] names the free variables of a parameterised state in
//! a fixed order. [`ParameterValues`] holds one real number per parameter
//! and is the only thing that changes while a state is evolved. Zipping
//! the two gives a [`ParameterBinding`], the mapping handed to external
//! collaborators.
//!
//! ```rust
//! use qtevo_varqte::parameter::{ParameterSet, ParameterValues};
//!
//! let params = ParameterSet::vector("θ", 2).unwrap();
//! let values = ParameterValues::from(vec![0.1, 0.2]);
//! let binding = params.bind(&values).unwrap();
//! assert_eq!(binding.get("θ[1]"), Some(0.2));
//! ```

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{EvolutionError, EvolutionResult};

/// A named free variable of a parameterised state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Parameter(String);

impl Parameter {
    /// Create a parameter. Names must be non-empty.
    pub fn new(name: impl Into<String>) -> EvolutionResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(EvolutionError::EmptyParameterName);
        }
        Ok(Self(name))
    }

    /// The parameter's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Parameter {
    type Error = EvolutionError;

    fn try_from(name: String) -> EvolutionResult<Self> {
        Self::new(name)
    }
}

impl From<Parameter> for String {
    fn from(p: Parameter) -> Self {
        p.0
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered set of uniquely named parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Parameter>", into = "Vec<Parameter>")]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// Build a set from parameters, rejecting duplicates.
    pub fn new(params: impl IntoIterator<Item = Parameter>) -> EvolutionResult<Self> {
        let params: Vec<Parameter> = params.into_iter().collect();
        for (i, p) in params.iter().enumerate() {
            if params[..i].contains(p) {
                return Err(EvolutionError::DuplicateParameter(p.name().to_string()));
            }
        }
        Ok(Self { params })
    }

    /// Build a set from names.
    pub fn from_names<I, S>(names: I) -> EvolutionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = names
            .into_iter()
            .map(Parameter::new)
            .collect::<EvolutionResult<Vec<_>>>()?;
        Self::new(params)
    }

    /// A parameter vector `prefix[0] .. prefix[len-1]`.
    pub fn vector(prefix: &str, len: usize) -> EvolutionResult<Self> {
        Self::from_names((0..len).map(|i| format!("{prefix}[{i}]")))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Position of the parameter with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name() == name)
    }

    /// Zip with `values`. Fails if the lengths differ.
    pub fn bind(&self, values: &ParameterValues) -> EvolutionResult<ParameterBinding> {
        if self.len() != values.len() {
            return Err(EvolutionError::ParameterCountMismatch {
                parameters: self.len(),
                values: values.len(),
            });
        }
        Ok(ParameterBinding {
            entries: self
                .params
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect(),
        })
    }
}

impl TryFrom<Vec<Parameter>> for ParameterSet {
    type Error = EvolutionError;

    fn try_from(params: Vec<Parameter>) -> EvolutionResult<Self> {
        Self::new(params)
    }
}

impl From<ParameterSet> for Vec<Parameter> {
    fn from(set: ParameterSet) -> Self {
        set.params
    }
}

impl Index<usize> for ParameterSet {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Parameter {
        &self.params[index]
    }
}

/// Real values for a [`ParameterSet`], in the same order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues(Vec<f64>);

impl ParameterValues {
    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Index and value of the first NaN or infinite entry.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.0
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ParameterValues {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for ParameterValues {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ParameterValues {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<f64> for ParameterValues {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for ParameterValues {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Ordered `(parameter, value)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    entries: Vec<(Parameter, f64)>,
}

impl ParameterBinding {
    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value bound to the named parameter.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p.name() == name)
            .map(|(_, v)| *v)
    }

    /// Iterate over the pairs in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (&Parameter, f64)> {
        self.entries.iter().map(|(p, v)| (p, *v))
    }

    /// The bound values in parameter order.
    pub fn values(&self) -> ParameterValues {
        self.entries.iter().map(|(_, v)| *v).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_rejected() {
        let err = ParameterSet::from_names(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, EvolutionError::DuplicateParameter(ref n) if n == "a"));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(
            Parameter::new(""),
            Err(EvolutionError::EmptyParameterName)
        ));
    }

    #[test]
    fn vector_names() {
        let set = ParameterSet::vector("θ", 3).unwrap();
        let names: Vec<_> = set.iter().map(Parameter::name).collect();
        assert_eq!(names, ["θ[0]", "θ[1]", "θ[2]"]);
        assert_eq!(set.position("θ[2]"), Some(2));
    }

    #[test]
    fn bind_length_mismatch() {
        let set = ParameterSet::vector("x", 2).unwrap();
        let err = set.bind(&ParameterValues::from([1.0])).unwrap_err();
        assert!(matches!(
            err,
            EvolutionError::ParameterCountMismatch {
                parameters: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn binding_preserves_order() {
        let set = ParameterSet::from_names(["b", "a"]).unwrap();
        let binding = set.bind(&ParameterValues::from([2.0, 1.0])).unwrap();
        let names: Vec<_> = binding.iter().map(|(p, _)| p.name().to_string()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(binding.values().as_slice(), &[2.0, 1.0]);
    }

    #[test]
    fn first_non_finite() {
        let values = ParameterValues::from([0.0, f64::NAN, 1.0]);
        let (i, v) = values.first_non_finite().unwrap();
        assert_eq!(i, 1);
        assert!(v.is_nan());
        assert!(ParameterValues::from([0.0]).first_non_finite().is_none());
    }

    #[test]
    fn parameter_set_serde_rejects_duplicates() {
        let ok: ParameterSet = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<ParameterSet>(r#"["a","a"]"#).is_err());
        assert!(serde_json::from_str::<ParameterSet>(r#"["a",""]"#).is_err());
    }
}
