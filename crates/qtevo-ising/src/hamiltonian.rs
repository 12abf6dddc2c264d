//! Pauli-sum Hamiltonians and their computational-basis values.
//!
//! An Ising Hamiltonian is a real combination of Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! Encoders in this crate only emit Z-strings, so `H` is diagonal and its
//! value on a basis state `|x⟩` is obtained by replacing every `Z_i` with
//! `+1` when `x_i = 0` and `−1` when `x_i = 1`.
//!
//! # Example
//!
//! ```rust
//! use qtevo_ising::hamiltonian::{Hamiltonian, HamiltonianTerm};
//!
//! // H = Z₀Z₁ − 0.5·Z₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::zz(0, 1, 1.0),
//!     HamiltonianTerm::z(0, -0.5),
//! ]);
//! assert_eq!(h.diagonal_energy(&[0, 1]).unwrap(), -1.5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IsingError, IsingResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// A tensor product of Pauli operators.
///
/// Only non-identity factors are stored, sorted by qubit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Build from `(qubit, op)` pairs, dropping identities.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut ops: Vec<(u32, PauliOp)> =
            ops.into_iter().filter(|(_, op)| *op != PauliOp::I).collect();
        ops.sort_by_key(|(q, _)| *q);
        Self { ops }
    }

    /// `Z` on every listed qubit.
    pub fn z_on(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Non-identity factors, sorted by qubit.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True when no qubit carries a non-identity operator.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// True if every factor is `Z`.
    pub fn is_diagonal(&self) -> bool {
        self.ops.iter().all(|(_, op)| *op == PauliOp::Z)
    }

    /// Highest qubit touched, `None` for the identity.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("I");
        }
        for (k, (q, op)) in self.ops.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{q}", op.symbol())?;
        }
        Ok(())
    }
}

/// `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Term `coeff · pauli`.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// `coeff · Z_q`.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::z_on([qubit]))
    }

    /// `coeff · Z_a Z_b`.
    pub fn zz(a: u32, b: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::z_on([a, b]))
    }
}

/// A weighted sum of Pauli strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Hamiltonian from a list of terms, kept in the given order.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self { terms }
    }

    /// The terms, in insertion order.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Append a term. Like terms are not combined.
    pub fn push(&mut self, term: HamiltonianTerm) {
        self.terms.push(term);
    }

    /// Qubits needed to host every term; 0 for an empty or identity-only sum.
    pub fn num_qubits(&self) -> usize {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q as usize + 1)
    }

    /// True if every term is a Z-string.
    pub fn is_diagonal(&self) -> bool {
        self.terms.iter().all(|t| t.pauli.is_diagonal())
    }

    /// `⟨x|H|x⟩` for a computational basis state.
    ///
    /// `bits[q]` is the state of qubit `q`; `Z|0⟩ = +|0⟩` and `Z|1⟩ = −|1⟩`.
    /// Fails if a term contains X or Y, touches a qubit beyond `bits`, or if
    /// an entry is not 0/1.
    pub fn diagonal_energy(&self, bits: &[u8]) -> IsingResult<f64> {
        if let Some((index, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(IsingError::InvalidBit { index, value });
        }

        let mut energy = 0.0;
        for (index, term) in self.terms.iter().enumerate() {
            let mut sign = 1.0;
            for &(qubit, op) in term.pauli.ops() {
                if op != PauliOp::Z {
                    return Err(IsingError::NonDiagonalTerm { index });
                }
                let bit = bits
                    .get(qubit as usize)
                    .ok_or(IsingError::QubitOutOfRange {
                        index,
                        qubit,
                        num_qubits: bits.len(),
                    })?;
                if *bit == 1 {
                    sign = -sign;
                }
            }
            energy += term.coeff * sign;
        }
        Ok(energy)
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
