//! Per-node incidence lists over the original triple list
//!
//! Unlike [`build_graph`](super::build_graph), nothing is duplicated or
//! sorted here: edge ids are positions in the input triple slice. Used for
//! structure-aware edge sampling.

use crate::error::DatasetResult;
use crate::types::IndexedTriple;

use super::validate_triples;

/// Incident `(edge_id, neighbor)` pairs and degree for every node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    adjacency: Vec<Vec<(usize, usize)>>,
    degrees: Vec<usize>,
}

impl AdjacencyIndex {
    /// `(edge_id, neighbor)` pairs touching `node`, in triple order
    pub fn neighbors(&self, node: usize) -> &[(usize, usize)] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of incident triple endpoints at `node`
    pub fn degree(&self, node: usize) -> usize {
        self.degrees.get(node).copied().unwrap_or(0)
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub fn adjacency(&self) -> &[Vec<(usize, usize)>] {
        &self.adjacency
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }
}

/// Build incidence lists and degrees for `num_nodes` nodes
///
/// For triple `i = (h, r, t)`, `(i, t)` is appended to `h` and `(i, h)` to
/// `t`. A self-loop therefore appears twice at its node.
pub fn adjacency_and_degrees(
    num_nodes: usize,
    triples: &[IndexedTriple],
) -> DatasetResult<AdjacencyIndex> {
    validate_triples(num_nodes, None, triples)?;

    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); num_nodes];
    for (i, t) in triples.iter().enumerate() {
        adjacency[t.head].push((i, t.tail));
        adjacency[t.tail].push((i, t.head));
    }

    let degrees = adjacency.iter().map(Vec::len).collect();

    Ok(AdjacencyIndex { adjacency, degrees })
}
