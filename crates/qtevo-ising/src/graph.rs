//! Adjacency-matrix helpers.
//!
//! Graphs are dense `n × n` matrices; an entry `w[i, j] ≠ 0` with `i < j`
//! is an edge. Only the upper triangle is consulted for edges, while node
//! degrees are full row sums, so callers should keep the matrix symmetric.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{IsingError, IsingResult};

/// Largest graph, in nodes, that readers and generators will allocate.
///
/// A dense matrix of this size takes about 3.2 GB. The largest Gset
/// instance (G81) has exactly this many nodes.
pub const MAX_NODES: usize = 20_000;

/// Number of nodes, or an error if `w` is not square.
pub fn num_nodes(w: &Array2<f64>) -> IsingResult<usize> {
    let (rows, cols) = w.dim();
    if rows != cols {
        return Err(IsingError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Edges `(i, j)` with `i < j`, in row-major order.
pub fn edges(w: &Array2<f64>) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = w.nrows();
    (0..n).flat_map(move |i| {
        ((i + 1)..n)
            .filter(move |&j| w[[i, j]] != 0.0)
            .map(move |j| (i, j))
    })
}

/// Row sum of `w` for node `i`.
pub fn degree(w: &Array2<f64>, i: usize) -> f64 {
    w.row(i).sum()
}

/// Erdős–Rényi graph `G(n, p)` with unit weights.
///
/// The same seed always yields the same matrix. `n` is limited to
/// [`MAX_NODES`].
pub fn random_graph(n: usize, edge_probability: f64, seed: u64) -> IsingResult<Array2<f64>> {
    if n > MAX_NODES {
        return Err(IsingError::GraphTooLarge {
            num_nodes: n,
            max: MAX_NODES,
        });
    }
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(IsingError::InvalidProbability(edge_probability));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut w = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(edge_probability) {
                w[[i, j]] = 1.0;
                w[[j, i]] = 1.0;
            }
        }
    }
    Ok(w)
}
