//! Out-degree-normalized sparse transition matrix.
//!
//! Column `j` of `M = Aᵗ·D⁻¹` holds node j's unit out-flow distribution:
//! it sums to 1 when j has out-edges and is the all-zero column when j is a
//! sink. The matrix is stored in CSR form over *source* nodes, so the
//! power-iteration product `M·v` is a single scatter pass over the edges.
//!
//! Sink mass deliberately vanishes; there is no dangling-node redistribution.

use crate::graph::model::GraphModel;

/// Sparse column-stochastic transition matrix.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    num_nodes: usize,
    /// Source i's targets are at `col_idx[row_ptr[i]..row_ptr[i+1]]`.
    row_ptr: Vec<usize>,
    col_idx: Vec<u32>,
    /// 1/out-degree per source. Zero out-degrees are guarded with a divisor
    /// of 1; the corresponding column is still all-zero because the node has
    /// no stored edges to scale.
    inv_out_degree: Vec<f64>,
    out_degree: Vec<u32>,
}

impl TransitionMatrix {
    /// Build the matrix from a graph. Never fails for a well-formed graph.
    pub fn from_graph(graph: &GraphModel) -> Self {
        let n = graph.node_count();
        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::with_capacity(graph.edge_count());
        let mut inv_out_degree = Vec::with_capacity(n);
        let mut out_degree = Vec::with_capacity(n);

        row_ptr.push(0);
        for source in 0..n as u32 {
            let targets = graph.out_neighbors(source);
            col_idx.extend_from_slice(targets);
            row_ptr.push(col_idx.len());

            let degree = targets.len();
            out_degree.push(degree as u32);
            inv_out_degree.push(1.0 / degree.max(1) as f64);
        }

        Self {
            num_nodes: n,
            row_ptr,
            col_idx,
            inv_out_degree,
            out_degree,
        }
    }

    /// Compute `out = M · scores` in one scatter pass.
    pub fn multiply(&self, scores: &[f64], out: &mut [f64]) {
        debug_assert_eq!(scores.len(), self.num_nodes);
        debug_assert_eq!(out.len(), self.num_nodes);

        out.fill(0.0);
        for source in 0..self.num_nodes {
            let share = scores[source] * self.inv_out_degree[source];
            let start = self.row_ptr[source];
            let end = self.row_ptr[source + 1];
            for &target in &self.col_idx[start..end] {
                out[target as usize] += share;
            }
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    pub fn out_degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Nodes with no outgoing edges (all-zero columns).
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }

    /// Per-column entry sums: 1.0 for nodes with out-edges, 0.0 for sinks.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.num_nodes)
            .map(|source| {
                let entries = self.row_ptr[source + 1] - self.row_ptr[source];
                entries as f64 * self.inv_out_degree[source]
            })
            .collect()
    }
}
