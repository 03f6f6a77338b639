//! Graph Builder - degree-normalized multigraph for message passing
//!
//! Every triple `(h, r, t)` becomes two directed edges:
//!
//! ```text
//!   h ──r──────────────► t
//!   t ──r + num_rels───► h      (inverse relation)
//! ```
//!
//! Edges are then ordered by `(destination, source, relation)` and each
//! edge carries the norm `1 / in_degree(destination)` (0 for nodes nothing
//! points at).

mod adjacency;
mod norm;

use rayon::prelude::*;
use tracing::info;

use crate::error::{DatasetError, DatasetResult};
use crate::types::IndexedTriple;

pub use adjacency::{adjacency_and_degrees, AdjacencyIndex};
pub use norm::{comp_deg_norm, node_norm_to_edge_norm};

/// Directed multigraph stored as parallel source/destination arrays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    num_nodes: usize,
    src: Vec<usize>,
    dst: Vec<usize>,
}

impl Graph {
    /// Graph with `num_nodes` isolated nodes
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            src: Vec::new(),
            dst: Vec::new(),
        }
    }

    /// Append one directed edge; returns its edge id
    pub fn add_edge(&mut self, src: usize, dst: usize) -> DatasetResult<usize> {
        if src >= self.num_nodes || dst >= self.num_nodes {
            return Err(DatasetError::InvalidInput(format!(
                "edge {} -> {} outside node range 0..{}",
                src, dst, self.num_nodes
            )));
        }
        self.src.push(src);
        self.dst.push(dst);
        Ok(self.src.len() - 1)
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.src.len()
    }

    /// Source node of every edge, by edge id
    pub fn src(&self) -> &[usize] {
        &self.src
    }

    /// Destination node of every edge, by edge id
    pub fn dst(&self) -> &[usize] {
        &self.dst
    }

    /// `(source, destination)` pairs in edge id order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.src.iter().copied().zip(self.dst.iter().copied())
    }

    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes];
        for &d in &self.dst {
            degrees[d] += 1;
        }
        degrees
    }

    pub fn out_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes];
        for &s in &self.src {
            degrees[s] += 1;
        }
        degrees
    }
}

/// Output of [`build_graph`]: the graph plus per-edge arrays aligned with its edge ids
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltGraph {
    pub graph: Graph,
    /// Relation id of each edge; inverse edges use `r + num_relations`
    pub edge_relations: Vec<usize>,
    /// `1 / in_degree(destination)` of each edge, 0 when the in-degree is 0
    pub edge_norm: Vec<f32>,
    /// `1 / in_degree(node)` of each node, 0 when the in-degree is 0
    pub node_norm: Vec<f32>,
}

/// Build the bidirectional, degree-normalized graph over `triples`
///
/// All `num_nodes` nodes are present even if isolated. Fails with
/// [`DatasetError::InvalidInput`] if a triple references an entity
/// `>= num_nodes` or a relation `>= num_relations`.
pub fn build_graph(
    num_nodes: usize,
    num_relations: usize,
    triples: &[IndexedTriple],
) -> DatasetResult<BuiltGraph> {
    validate_triples(num_nodes, Some(num_relations), triples)?;

    // (destination, source, relation): tuple order is the edge order
    let mut records: Vec<(usize, usize, usize)> = Vec::with_capacity(triples.len() * 2);
    for t in triples {
        records.push((t.tail, t.head, t.relation));
        records.push((t.head, t.tail, t.relation + num_relations));
    }
    records.par_sort_unstable();

    let mut graph = Graph::new(num_nodes);
    graph.src.reserve(records.len());
    graph.dst.reserve(records.len());
    let mut edge_relations = Vec::with_capacity(records.len());
    for (dst, src, rel) in records {
        graph.add_edge(src, dst)?;
        edge_relations.push(rel);
    }

    let node_norm = comp_deg_norm(&graph);
    let edge_norm = node_norm_to_edge_norm(&graph, &node_norm)?;

    info!("# nodes: {}, # edges: {}", num_nodes, graph.num_edges());

    Ok(BuiltGraph {
        graph,
        edge_relations,
        edge_norm,
        node_norm,
    })
}

pub(crate) fn validate_triples(
    num_nodes: usize,
    num_relations: Option<usize>,
    triples: &[IndexedTriple],
) -> DatasetResult<()> {
    for (i, t) in triples.iter().enumerate() {
        if t.head >= num_nodes || t.tail >= num_nodes {
            return Err(DatasetError::InvalidInput(format!(
                "triple {} ({}, {}, {}) references an entity >= {}",
                i, t.head, t.relation, t.tail, num_nodes
            )));
        }
        if let Some(num_relations) = num_relations {
            if t.relation >= num_relations {
                return Err(DatasetError::InvalidInput(format!(
                    "triple {} ({}, {}, {}) references a relation >= {}",
                    i, t.head, t.relation, t.tail, num_relations
                )));
            }
        }
    }
    Ok(())
}
