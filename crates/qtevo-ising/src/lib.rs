//! `qtevo-ising`: diagonal Ising encodings of graph problems.
//!
//! Turns a maximum stable set instance into a Z-only Pauli Hamiltonian plus
//! a constant shift, so that the ground state of `H` (for example, the
//! fixed point of an imaginary-time evolution) encodes the largest stable
//! set. Graphs come from Gset files or a seeded random generator.
//!
//! # Quick start
//!
//! ```rust
//! use qtevo_ising::{gset, stable_set};
//!
//! // Triangle with a pendant node: 1-2, 2-3, 1-3, 3-4.
//! let w = gset::parse("4 4\n1 2 1\n2 3 1\n1 3 1\n3 4 1\n".as_bytes()).unwrap();
//! let (h, shift) = stable_set::get_operator(&w).unwrap();
//!
//! let x = stable_set::brute_force(&w).unwrap();
//! let (size, feasible) = stable_set::stable_set_value(&x, &w).unwrap();
//! assert!(feasible);
//! assert_eq!(size, 2);
//! assert_eq!(h.diagonal_energy(&x).unwrap() + shift, -2.0);
//! ```

pub mod error;
pub mod graph;
pub mod gset;
pub mod hamiltonian;
pub mod stable_set;

pub use error::{IsingError, IsingResult};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
