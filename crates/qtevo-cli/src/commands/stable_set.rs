//! Stable-set command implementations.
//!
//! Encode a graph as an Ising Hamiltonian, evaluate a candidate solution,
//! or solve small instances exactly.

use anyhow::{Context, Result};
use console::style;
use ndarray::Array2;
use serde::Serialize;
use tracing::info;

use qtevo_ising::{Hamiltonian, graph, stable_set};

use super::common::{OutputFormat, format_bitstring, load_graph, parse_bitstring};

#[derive(Serialize)]
struct Encoding<'a> {
    num_nodes: usize,
    num_edges: usize,
    shift: f64,
    hamiltonian: &'a Hamiltonian,
}

#[derive(Serialize)]
struct Solution {
    bitstring: String,
    nodes: Vec<usize>,
    size: usize,
    objective: f64,
}

/// Execute `stable-set encode`.
pub fn execute_encode(
    input: Option<&str>,
    random: Option<usize>,
    probability: f64,
    seed: u64,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let w = match (input, random) {
        (Some(path), _) => load_graph(path)?,
        (None, Some(n)) => {
            info!(nodes = n, probability, seed, "generating random graph");
            graph::random_graph(n, probability, seed).context("Failed to generate graph")?
        }
        (None, None) => anyhow::bail!("Either --input or --random is required"),
    };

    let (hamiltonian, shift) = stable_set::get_operator(&w).context("Encoding failed")?;
    let encoding = Encoding {
        num_nodes: w.nrows(),
        num_edges: graph::edges(&w).count(),
        shift,
        hamiltonian: &hamiltonian,
    };

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&encoding).context("JSON serialization failed")?;
            println!("{json}");
        }
        OutputFormat::Table => print_encoding(&encoding),
    }
    Ok(())
}

/// Execute `stable-set evaluate`.
pub fn execute_evaluate(input: &str, solution: &str) -> Result<()> {
    let w = load_graph(input)?;
    let x = parse_bitstring(solution)?;

    let (size, feasible) = stable_set::stable_set_value(&x, &w).context("Evaluation failed")?;
    let (hamiltonian, shift) = stable_set::get_operator(&w).context("Encoding failed")?;
    let objective = hamiltonian.diagonal_energy(&x).context("Evaluation failed")? + shift;

    let verdict = if feasible {
        style("stable").green().bold()
    } else {
        style("not stable").red().bold()
    };
    println!("{} {} ({})", style("Solution:").bold(), format_bitstring(&x), verdict);
    println!("  Size:      {size}");
    println!("  Objective: {objective}");
    println!("  Nodes:     {}", format_nodes(&x)?);
    Ok(())
}

/// Execute `stable-set solve`.
pub fn execute_solve(input: &str, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let w = load_graph(input)?;
    let solution = solve(&w)?;

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&solution).context("JSON serialization failed")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            println!(
                "\n{} Maximum stable set of size {}",
                style("✓").green().bold(),
                solution.size
            );
            println!("  Bitstring: {}", solution.bitstring);
            println!("  Objective: {}", solution.objective);
            println!("  Nodes:     {:?}", solution.nodes);
        }
    }
    Ok(())
}

fn solve(w: &Array2<f64>) -> Result<Solution> {
    let x = stable_set::brute_force(w).context("Exhaustive search failed")?;
    let (size, _) = stable_set::stable_set_value(&x, w)?;
    let (hamiltonian, shift) = stable_set::get_operator(w)?;
    let objective = hamiltonian.diagonal_energy(&x)? + shift;
    Ok(Solution {
        bitstring: format_bitstring(&x),
        nodes: member_nodes(&x)?,
        size,
        objective,
    })
}

/// 1-based indices of the nodes selected by a spin-format bitstring.
fn member_nodes(x: &[u8]) -> Result<Vec<usize>> {
    let members = stable_set::get_graph_solution(x)?;
    Ok(members
        .iter()
        .enumerate()
        .filter(|(_, m)| **m == 1)
        .map(|(i, _)| i + 1)
        .collect())
}

fn format_nodes(x: &[u8]) -> Result<String> {
    let nodes = member_nodes(x)?;
    if nodes.is_empty() {
        return Ok("(none)".to_string());
    }
    Ok(nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", "))
}

fn print_encoding(encoding: &Encoding<'_>) {
    println!(
        "{} {} nodes, {} edges",
        style("Stable set:").cyan().bold(),
        encoding.num_nodes,
        encoding.num_edges
    );
    println!("  Shift: {}", encoding.shift);
    println!("  Terms: {}", encoding.hamiltonian.n_terms());
    println!();
    for term in encoding.hamiltonian.terms() {
        println!("  {:>+10.4}  {}", term.coeff, term.pauli);
    }
}
