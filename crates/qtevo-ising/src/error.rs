//! Error types for the ising crate.

use thiserror::Error;

/// Errors produced while building or evaluating Ising encodings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IsingError {
    /// The adjacency matrix is not square.
    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// A bitstring does not match the number of nodes.
    #[error("bitstring has {actual} entries but the graph has {expected} nodes")]
    LengthMismatch {
        /// Number of nodes.
        expected: usize,
        /// Length of the bitstring.
        actual: usize,
    },

    /// A bitstring entry is neither 0 nor 1.
    #[error("bitstring entry {index} is {value}, expected 0 or 1")]
    InvalidBit {
        /// Position of the entry.
        index: usize,
        /// The offending value.
        value: u8,
    },

    /// An edge connects a node to itself.
    #[error("line {line}: self loop on node {node}")]
    SelfLoop {
        /// 1-based line number in the input.
        line: usize,
        /// 1-based node index.
        node: usize,
    },

    /// An edge references a node outside `1..=n`.
    #[error("line {line}: node {node} is outside 1..={num_nodes}")]
    NodeOutOfRange {
        /// 1-based line number in the input.
        line: usize,
        /// 1-based node index.
        node: usize,
        /// Number of nodes declared in the header.
        num_nodes: usize,
    },

    /// The edge list length disagrees with the header.
    #[error("header declares {declared} edges but {found} were read")]
    EdgeCountMismatch {
        /// Edge count from the header.
        declared: usize,
        /// Edges actually present.
        found: usize,
    },

    /// The graph is too large for exhaustive search.
    #[error("exhaustive search supports at most {max} nodes, got {num_nodes}")]
    TooManyNodes {
        /// Nodes in the graph.
        num_nodes: usize,
        /// Largest supported size.
        max: usize,
    },

    /// The graph exceeds the dense adjacency-matrix limit.
    #[error("graphs support at most {max} nodes, got {num_nodes}")]
    GraphTooLarge {
        /// Requested number of nodes.
        num_nodes: usize,
        /// Largest supported size.
        max: usize,
    },

    /// A Pauli term contains X or Y and has no computational-basis value.
    #[error("term {index} is not diagonal in the computational basis")]
    NonDiagonalTerm {
        /// Position of the term in the Hamiltonian.
        index: usize,
    },

    /// A Pauli term acts on a qubit the basis state does not cover.
    #[error("term {index} acts on qubit {qubit} but the basis state has {num_qubits} qubits")]
    QubitOutOfRange {
        /// Position of the term in the Hamiltonian.
        index: usize,
        /// The offending qubit.
        qubit: u32,
        /// Length of the basis state.
        num_qubits: usize,
    },

    /// Edge probability outside `[0, 1]`.
    #[error("edge probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Malformed Gset input.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Ising encoding operations.
pub type IsingResult<T> = Result<T, IsingError>;
