//! Damped power-iteration ranking.
//!
//! This module owns the numeric solve: the iteration loop, convergence
//! bookkeeping, and the post-loop debias step.

pub mod solver;

pub use solver::PowerIterationSolver;

/// Outcome of a power-iteration solve.
#[derive(Debug, Clone)]
pub struct RankResult {
    /// Debiased scores, indexed by node. The restart injection `alpha·p` is
    /// subtracted after the loop, so entries may be negative and the vector
    /// does not sum to 1. Both are intended.
    pub scores: Vec<f64>,
    /// Iterations actually performed.
    pub iterations: usize,
    /// Final L1 residual between the last two iterates.
    pub residual: f64,
    /// Whether the residual dropped below tolerance before `max_iterations`.
    pub converged: bool,
}

impl RankResult {
    /// Score for a single node, 0.0 when out of range.
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}
