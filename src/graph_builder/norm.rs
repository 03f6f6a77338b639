//! In-degree normalization

use crate::error::{DatasetError, DatasetResult};

use super::Graph;

/// Per-node `1 / in_degree`, with 0 for nodes of in-degree 0
pub fn comp_deg_norm(graph: &Graph) -> Vec<f32> {
    graph
        .in_degrees()
        .into_iter()
        .map(|deg| if deg == 0 { 0.0 } else { 1.0 / deg as f32 })
        .collect()
}

/// Give every edge the norm of its destination node
pub fn node_norm_to_edge_norm(graph: &Graph, node_norm: &[f32]) -> DatasetResult<Vec<f32>> {
    if node_norm.len() != graph.num_nodes() {
        return Err(DatasetError::InvalidInput(format!(
            "node norm has {} values for {} nodes",
            node_norm.len(),
            graph.num_nodes()
        )));
    }
    Ok(graph.dst().iter().map(|&d| node_norm[d]).collect())
}
