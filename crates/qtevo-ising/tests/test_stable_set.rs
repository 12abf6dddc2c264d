//! Tests for the stable-set encoding.

use ndarray::{Array2, array};
use proptest::prelude::*;

use qtevo_ising::graph::{self, random_graph};
use qtevo_ising::stable_set::{brute_force, get_graph_solution, get_operator, stable_set_value};
use qtevo_ising::{HamiltonianTerm, IsingError};

fn bitstrings(n: usize) -> impl Iterator<Item = Vec<u8>> {
    (0..(1u32 << n)).map(move |mask| (0..n).map(|i| ((mask >> i) & 1) as u8).collect())
}

fn max_stable_set(w: &Array2<f64>) -> usize {
    let n = w.nrows();
    bitstrings(n)
        .filter_map(|x| {
            let (size, feasible) = stable_set_value(&x, w).unwrap();
            feasible.then_some(size)
        })
        .max()
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Encoder structure
// ---------------------------------------------------------------------------

#[test]
fn triangle_terms_and_shift() {
    let w = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    let (h, shift) = get_operator(&w).unwrap();

    assert_eq!(h.n_terms(), 6);
    assert_eq!(&h.terms()[..3], &[
        HamiltonianTerm::zz(0, 1, 1.0),
        HamiltonianTerm::zz(0, 2, 1.0),
        HamiltonianTerm::zz(1, 2, 1.0),
    ]);
    assert!(h.terms()[3..].iter().all(|t| t.coeff == 1.5));
    assert_eq!(shift, 1.5);
    assert!(h.is_diagonal());
    assert_eq!(h.num_qubits(), 3);
}

#[test]
fn empty_graph_has_only_fields() {
    let w = Array2::zeros((4, 4));
    let (h, shift) = get_operator(&w).unwrap();
    assert_eq!(h.n_terms(), 4);
    assert!(h.terms().iter().all(|t| t.coeff == -0.5));
    assert_eq!(shift, -2.0);

    // Every node fits.
    let x = brute_force(&w).unwrap();
    assert_eq!(x, vec![0, 0, 0, 0]);
    assert_eq!(h.diagonal_energy(&x).unwrap() + shift, -4.0);
}

#[test]
fn non_square_matrix_rejected() {
    let w = Array2::zeros((3, 2));
    assert!(matches!(get_operator(&w), Err(IsingError::NotSquare { .. })));
    assert!(matches!(brute_force(&w), Err(IsingError::NotSquare { .. })));
}

#[test]
fn star_graph_prefers_leaves() {
    // Centre 0 joined to 1..=4.
    let mut w = Array2::zeros((5, 5));
    for leaf in 1..5 {
        w[[0, leaf]] = 1.0;
        w[[leaf, 0]] = 1.0;
    }
    let x = brute_force(&w).unwrap();
    assert_eq!(x, vec![1, 0, 0, 0, 0]);
    assert_eq!(get_graph_solution(&x).unwrap(), vec![0, 1, 1, 1, 1]);
}

#[test]
fn diagonal_energy_rejects_short_bitstring() {
    let w = array![[0.0, 1.0], [1.0, 0.0]];
    let (h, _) = get_operator(&w).unwrap();
    assert!(matches!(
        h.diagonal_energy(&[0]),
        Err(IsingError::QubitOutOfRange { qubit: 1, .. })
    ));
}

// ---------------------------------------------------------------------------
// Properties over random graphs
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn feasible_energy_is_minus_size(n in 1usize..=8, p in 0.0f64..=1.0, seed in any::<u64>()) {
        let w = random_graph(n, p, seed).unwrap();
        let (h, shift) = get_operator(&w).unwrap();
        for x in bitstrings(n) {
            let (size, feasible) = stable_set_value(&x, &w).unwrap();
            let value = h.diagonal_energy(&x).unwrap() + shift;
            if feasible {
                prop_assert!((value + size as f64).abs() < 1e-9, "x={:?} value={}", x, value);
            } else {
                prop_assert!(value > -(size as f64));
            }
        }
    }

    #[test]
    fn brute_force_finds_maximum(n in 1usize..=9, p in 0.0f64..=1.0, seed in any::<u64>()) {
        let w = random_graph(n, p, seed).unwrap();
        let x = brute_force(&w).unwrap();
        let (size, feasible) = stable_set_value(&x, &w).unwrap();
        prop_assert!(feasible);
        prop_assert_eq!(size, max_stable_set(&w));

        let (h, shift) = get_operator(&w).unwrap();
        let best = h.diagonal_energy(&x).unwrap() + shift;
        for y in bitstrings(n) {
            prop_assert!(h.diagonal_energy(&y).unwrap() + shift >= best - 1e-9);
        }
    }

    #[test]
    fn edge_count_drives_shift(n in 0usize..=10, p in 0.0f64..=1.0, seed in any::<u64>()) {
        let w = random_graph(n, p, seed).unwrap();
        let (_, shift) = get_operator(&w).unwrap();
        let edges = graph::edges(&w).count();
        prop_assert_eq!(shift, edges as f64 - n as f64 / 2.0);
    }
}
