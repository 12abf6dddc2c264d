//! Maximum stable set as a diagonal Ising Hamiltonian.
//!
//! A stable (independent) set is a set of nodes with no edge between any
//! two of them. Solutions are *spin-format* bitstrings: `x[i] = 0` means
//! node `i` is in the set, `x[i] = 1` means it is not.
//!
//! Writing `s_i = ±1` for the Z eigenvalue of qubit `i`, the encoding is
//!
//!   H = Σ_{(i,j)∈E} Z_i Z_j  +  Σ_i (deg_i − ½) Z_i,   shift = |E| − n/2
//!
//! and on every basis state `⟨x|H|x⟩ + shift = 4·violations − size`, where
//! `violations` counts edges with both endpoints in the set. The minimum is
//! therefore a maximum stable set, with value `−size`.

use ndarray::Array2;
use tracing::debug;

use crate::error::{IsingError, IsingResult};
use crate::graph;
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};

/// Largest graph [`brute_force`] will enumerate.
pub const MAX_BRUTE_FORCE_NODES: usize = 24;

/// Ising Hamiltonian and constant shift for the stable-set problem on `w`.
pub fn get_operator(w: &Array2<f64>) -> IsingResult<(Hamiltonian, f64)> {
    let n = graph::num_nodes(w)?;

    let mut hamiltonian = Hamiltonian::default();
    let mut num_edges = 0usize;
    for (i, j) in graph::edges(w) {
        hamiltonian.push(HamiltonianTerm::zz(i as u32, j as u32, 1.0));
        num_edges += 1;
    }
    for i in 0..n {
        hamiltonian.push(HamiltonianTerm::z(i as u32, graph::degree(w, i) - 0.5));
    }

    let shift = num_edges as f64 - n as f64 / 2.0;
    debug!(nodes = n, edges = num_edges, shift, "encoded stable set");
    Ok((hamiltonian, shift))
}

/// Size of the set selected by spin-format `x`, and whether it is stable.
pub fn stable_set_value(x: &[u8], w: &Array2<f64>) -> IsingResult<(usize, bool)> {
    let n = graph::num_nodes(w)?;
    check_bits(x, n)?;

    let feasible = graph::edges(w).all(|(i, j)| x[i] == 1 || x[j] == 1);
    let size = x.iter().filter(|&&b| b == 0).count();
    Ok((size, feasible))
}

/// Convert a spin-format bitstring to node membership (`1` = in the set).
pub fn get_graph_solution(x: &[u8]) -> IsingResult<Vec<u8>> {
    check_bits(x, x.len())?;
    Ok(x.iter().map(|&b| 1 - b).collect())
}

/// Exhaustive minimiser of `⟨x|H|x⟩ + shift`.
///
/// Returns the spin-format bitstring of a maximum stable set. Ties are
/// broken towards the lowest set bitmask.
pub fn brute_force(w: &Array2<f64>) -> IsingResult<Vec<u8>> {
    let n = graph::num_nodes(w)?;
    if n > MAX_BRUTE_FORCE_NODES {
        return Err(IsingError::TooManyNodes {
            num_nodes: n,
            max: MAX_BRUTE_FORCE_NODES,
        });
    }

    let mut neighbours = vec![0u32; n];
    for (i, j) in graph::edges(w) {
        neighbours[i] |= 1 << j;
        neighbours[j] |= 1 << i;
    }

    let mut best_mask = 0u32;
    let mut best_value = i64::MAX;
    for mask in 0..(1u32 << n) {
        let size = i64::from(mask.count_ones());
        let violations: i64 = (0..n)
            .filter(|&i| mask & (1 << i) != 0)
            .map(|i| i64::from((neighbours[i] & mask).count_ones()))
            .sum::<i64>()
            / 2;
        let value = 4 * violations - size;
        if value < best_value {
            best_value = value;
            best_mask = mask;
        }
    }

    debug!(nodes = n, size = best_mask.count_ones(), "brute-force optimum");
    Ok((0..n)
        .map(|i| if best_mask & (1 << i) != 0 { 0 } else { 1 })
        .collect())
}

fn check_bits(x: &[u8], expected: usize) -> IsingResult<()> {
    if x.len() != expected {
        return Err(IsingError::LengthMismatch {
            expected,
            actual: x.len(),
        });
    }
    match x.iter().enumerate().find(|(_, b)| **b > 1) {
        Some((index, &value)) => Err(IsingError::InvalidBit { index, value }),
        None => Ok(()),
    }
}
