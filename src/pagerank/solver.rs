//! Power-iteration solver for the damped personalized recurrence.
//!
//! Iterates `scores ← (1-α)·M·scores + α·p` from the uniform vector until the
//! L1 residual drops below tolerance or `max_iterations` is reached, then
//! subtracts the constant restart injection `α·p` so the seed/heuristic boost
//! does not inflate reported magnitudes.
//!
//! Sink-node mass vanishes: the transition matrix carries zero columns for
//! dangling nodes and no redistribution is performed.

use tracing::debug;

use super::RankResult;
use crate::error::RankError;
use crate::graph::TransitionMatrix;

/// Damped power-iteration solver.
#[derive(Debug, Clone)]
pub struct PowerIterationSolver {
    /// Restart probability per step.
    pub alpha: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// L1 convergence threshold.
    pub tolerance: f64,
}

impl Default for PowerIterationSolver {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

impl PowerIterationSolver {
    /// Create a solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the restart probability.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the maximum iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run the solve.
    ///
    /// Invalid inputs abort before the first iteration with no partial
    /// result. Reaching `max_iterations` is not an error: the result comes
    /// back with `converged = false` and the caller decides.
    pub fn solve(
        &self,
        matrix: &TransitionMatrix,
        personalization: &[f64],
    ) -> Result<RankResult, RankError> {
        let n = matrix.num_nodes();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(RankError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(RankError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if personalization.len() != n {
            return Err(RankError::InvalidParameter(format!(
                "personalization length {} does not match node count {n}",
                personalization.len()
            )));
        }
        if personalization.iter().any(|v| !v.is_finite()) {
            return Err(RankError::InvalidParameter(
                "personalization vector contains non-finite entries".to_string(),
            ));
        }

        let mut scores = uniform(n);
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut residual = f64::MAX;

        while iterations < self.max_iterations && residual > self.tolerance {
            iterations += 1;

            matrix.multiply(&scores, &mut next);
            for (value, &p) in next.iter_mut().zip(personalization) {
                *value = (1.0 - self.alpha) * *value + self.alpha * p;
            }

            residual = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut next);
        }

        let converged = residual <= self.tolerance;
        debug!(iterations, residual, converged, "power iteration finished");

        // Debias: remove the constant restart injection.
        for (score, &p) in scores.iter_mut().zip(personalization) {
            *score -= self.alpha * p;
        }

        Ok(RankResult {
            scores,
            iterations,
            residual,
            converged,
        })
    }
}

/// Uniform initial distribution `1/n`.
fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}
