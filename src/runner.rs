//! Run orchestration.
//!
//! [`rank`] builds the transition matrix and the personalization vector in
//! parallel (they share no data), feeds both to the solver, annotates scores
//! back onto the graph, and optionally persists a snapshot. The graph is
//! exclusively owned by the run for its duration; nothing mutates it until
//! the final annotation step.

use chrono::Utc;
use rustc_hash::FxHashMap;
use tracing::{info, info_span};

use crate::error::{RankError, RankWarning};
use crate::graph::{GraphModel, TransitionMatrix};
use crate::pagerank::{PowerIterationSolver, RankResult};
use crate::personalization::PersonalizationBuilder;
use crate::snapshot::Snapshot;
use crate::types::{AccountId, RankConfig, RunMetadata};

/// Result of one ranking run.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// Authoritative account id → debiased score mapping.
    pub scores: FxHashMap<AccountId, f64>,
    /// Index-space solver output.
    pub result: RankResult,
    pub metadata: RunMetadata,
    /// Non-fatal conditions encountered during the run.
    pub warnings: Vec<RankWarning>,
}

/// Execute one personalized ranking run over `graph`.
///
/// `seeds` is an ordered sequence of external ids; order has no effect on the
/// algorithm, but its length is preserved in the metadata as `seed_count`.
/// Fatal conditions return an error with no partial result; degenerate seeds
/// and non-convergence come back as warnings on a complete result.
pub fn rank(
    graph: &mut GraphModel,
    seeds: Option<&[AccountId]>,
    config: &RankConfig,
) -> Result<RankOutcome, RankError> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }

    let span = info_span!(
        "rank_run",
        nodes = graph.node_count(),
        edges = graph.edge_count()
    );
    let _guard = span.enter();

    // The two derived artifacts are independent.
    let graph_ref: &GraphModel = graph;
    let (matrix, personalization) = rayon::join(
        || {
            let _span = info_span!("transition_matrix").entered();
            TransitionMatrix::from_graph(graph_ref)
        },
        || {
            let _span = info_span!("personalization").entered();
            PersonalizationBuilder.build(graph_ref, seeds)
        },
    );

    let solver = PowerIterationSolver::new()
        .with_alpha(config.alpha)
        .with_max_iterations(config.max_iterations)
        .with_tolerance(config.tolerance);
    let result = {
        let _span = info_span!("power_iteration").entered();
        solver.solve(&matrix, &personalization.values)?
    };

    let mut warnings = Vec::new();
    if let Some(warning) = personalization.warning.clone() {
        warnings.push(warning);
    }
    if !result.converged {
        warnings.push(RankWarning::NonConvergence {
            iterations: result.iterations,
            residual: result.residual,
        });
    }

    let mut scores =
        FxHashMap::with_capacity_and_hasher(graph.node_count(), Default::default());
    for (account, &score) in graph.accounts().zip(result.scores.iter()) {
        scores.insert(account.id.clone(), score);
    }

    let metadata = RunMetadata {
        alpha: config.alpha,
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
        seed_count: seeds.map_or(0, <[AccountId]>::len),
        timestamp: Utc::now(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        iterations_used: result.iterations,
        converged: result.converged,
    };

    // Final step: convenience copy of the scores onto the graph itself.
    graph.annotate_scores(&result.scores);

    if let Some(path) = &config.snapshot_path {
        Snapshot::capture(graph, &result.scores, metadata.clone()).write(path)?;
    }

    info!(
        iterations = result.iterations,
        converged = result.converged,
        warnings = warnings.len(),
        "ranking complete"
    );

    Ok(RankOutcome {
        scores,
        result,
        metadata,
        warnings,
    })
}
