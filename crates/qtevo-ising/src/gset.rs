//! Reader for the Gset graph format.
//!
//! ```text
//! <num_nodes> <num_edges>
//! <i> <j> <weight>
//! ...
//! ```
//!
//! Nodes are 1-indexed. Edge weights are parsed but replaced by 1, and the
//! resulting adjacency matrix is symmetric. Blank lines are skipped.
//! Graphs are limited to [`MAX_NODES`] nodes, which covers every published
//! Gset instance.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::error::{IsingError, IsingResult};
use crate::graph::MAX_NODES;

/// Parse a Gset graph into an adjacency matrix.
///
/// Node and edge counts must be plain non-negative integers. Headers
/// declaring more than [`MAX_NODES`] nodes are rejected before the matrix
/// is allocated.
pub fn parse<R: BufRead>(reader: R) -> IsingResult<Array2<f64>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(k, line)| line.map(|l| (k + 1, l)))
        .filter(|line| !matches!(line, Ok((_, l)) if l.trim().is_empty()));

    let (header_line, header) = lines.next().transpose()?.ok_or(IsingError::Parse {
        line: 1,
        message: "missing header".to_string(),
    })?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    let [num_nodes, declared] = match tokens.as_slice() {
        [n, m] => [*n, *m],
        _ => {
            return Err(IsingError::Parse {
                line: header_line,
                message: format!("header must be '<nodes> <edges>', got {} fields", tokens.len()),
            });
        }
    };
    let num_nodes = to_count(num_nodes, header_line)?;
    let declared = to_count(declared, header_line)?;
    if num_nodes > MAX_NODES {
        return Err(IsingError::GraphTooLarge {
            num_nodes,
            max: MAX_NODES,
        });
    }

    let mut w = Array2::zeros((num_nodes, num_nodes));
    let mut found = 0usize;
    for line in lines {
        let (line_no, text) = line?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let (i, j) = match tokens.as_slice() {
            [i, j] => (*i, *j),
            [i, j, weight] => {
                to_weight(weight, line_no)?;
                (*i, *j)
            }
            _ => {
                return Err(IsingError::Parse {
                    line: line_no,
                    message: format!("edge must be '<i> <j> <weight>', got {} fields", tokens.len()),
                });
            }
        };
        let i = node_index(i, num_nodes, line_no)?;
        let j = node_index(j, num_nodes, line_no)?;
        if i == j {
            return Err(IsingError::SelfLoop {
                line: line_no,
                node: i + 1,
            });
        }
        w[[i, j]] = 1.0;
        w[[j, i]] = 1.0;
        found += 1;
    }

    if found != declared {
        return Err(IsingError::EdgeCountMismatch { declared, found });
    }
    debug!(nodes = num_nodes, edges = found, "parsed gset graph");
    Ok(w)
}

/// Read a Gset file from disk.
pub fn read_file<P: AsRef<Path>>(path: P) -> IsingResult<Array2<f64>> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file))
}

fn to_count(tok: &str, line_no: usize) -> IsingResult<usize> {
    tok.parse::<usize>().map_err(|_| IsingError::Parse {
        line: line_no,
        message: format!("expected a non-negative integer, got '{tok}'"),
    })
}

fn to_weight(tok: &str, line_no: usize) -> IsingResult<f64> {
    tok.parse::<f64>().map_err(|_| IsingError::Parse {
        line: line_no,
        message: format!("'{tok}' is not a number"),
    })
}

fn node_index(tok: &str, num_nodes: usize, line_no: usize) -> IsingResult<usize> {
    let node = to_count(tok, line_no)?;
    if node == 0 || node > num_nodes {
        return Err(IsingError::NodeOutOfRange {
            line: line_no,
            node,
            num_nodes,
        });
    }
    Ok(node - 1)
}
