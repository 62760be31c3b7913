//! Personalization (restart) vector construction.
//!
//! Seed accounts share an elevated restart mass; every other account is
//! scored by a follower/following-ratio heuristic. An over-following penalty
//! is then applied per node, and the vector is min-max scaled to [0, 1].
//!
//! The penalty reads each node's own `following_count` at the moment it is
//! applied — the value is never carried over from another node's computation,
//! and it applies to seed nodes exactly like everyone else.

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::error::RankWarning;
use crate::graph::GraphModel;
use crate::types::{Account, AccountId};

/// Total raw restart mass shared equally across matched seed nodes.
const SEED_MASS: f64 = 5.0;
/// Additive smoothing applied to both counts in the heuristic ratio.
const HEURISTIC_OFFSET: f64 = 250.0;
/// Upper clamp on the heuristic score.
const HEURISTIC_CAP: f64 = 5.0;
/// Following count above which the over-following penalty kicks in.
const PENALTY_THRESHOLD: u64 = 8_000;
const PENALTY_DIVISOR: f64 = 4_000.0;
const PENALTY_CAP: f64 = 10.0;

/// Restart distribution plus bookkeeping from its construction.
#[derive(Debug, Clone)]
pub struct Personalization {
    /// Dense length-n vector, min-max scaled to [0, 1].
    pub values: Vec<f64>,
    /// Seed ids that resolved to a graph node.
    pub matched_seed_count: usize,
    /// Set when seeds were requested but none matched.
    pub warning: Option<RankWarning>,
}

/// Builds the restart vector for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalizationBuilder;

impl PersonalizationBuilder {
    /// Build the personalization vector.
    ///
    /// With no seeds (or after all supplied seeds are dropped as unknown),
    /// every entry is the heuristic score. With seeds, each matched seed gets
    /// `5 / |matched|` and non-seeds get the heuristic. Dropping to an empty
    /// seed set is surfaced as [`RankWarning::DegenerateSeedSet`], not
    /// silently conflated with "no seeds requested".
    pub fn build(&self, graph: &GraphModel, seeds: Option<&[AccountId]>) -> Personalization {
        let (mut values, matched_seed_count, warning) = self.raw_values(graph, seeds);
        min_max_normalize(&mut values);
        Personalization {
            values,
            matched_seed_count,
            warning,
        }
    }

    /// Pre-normalization entries: seed weight or heuristic, then penalty.
    fn raw_values(
        &self,
        graph: &GraphModel,
        seeds: Option<&[AccountId]>,
    ) -> (Vec<f64>, usize, Option<RankWarning>) {
        let requested = seeds.map_or(0, <[AccountId]>::len);
        let seed_indices: FxHashSet<u32> = seeds
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| graph.index_of(id))
            .collect();

        let mut warning = None;
        if requested > 0 && seed_indices.is_empty() {
            warn!(
                requested,
                "no seed ids matched the graph; falling back to heuristic personalization"
            );
            warning = Some(RankWarning::DegenerateSeedSet { requested });
        }

        let seed_weight = if seed_indices.is_empty() {
            0.0
        } else {
            SEED_MASS / seed_indices.len() as f64
        };

        let mut values = Vec::with_capacity(graph.node_count());
        for (i, account) in graph.accounts().enumerate() {
            let mut value = if seed_indices.contains(&(i as u32)) {
                seed_weight
            } else {
                heuristic_score(account)
            };

            // This node's own following count, read fresh.
            if account.following_count > PENALTY_THRESHOLD {
                let penalty = (account.following_count as f64 / PENALTY_DIVISOR).min(PENALTY_CAP);
                value /= penalty;
            }
            values.push(value);
        }

        (values, seed_indices.len(), warning)
    }
}

/// Organic-influence heuristic:
/// `clamp(ln((followers + 250) / (following + 250)), 0, 5)`.
pub fn heuristic_score(account: &Account) -> f64 {
    let ratio = (account.follower_count as f64 + HEURISTIC_OFFSET)
        / (account.following_count as f64 + HEURISTIC_OFFSET);
    ratio.ln().clamp(0.0, HEURISTIC_CAP)
}

/// Scale entries to [0, 1] via `(v - min) / (max - min)`.
///
/// Policy for the degenerate all-equal vector: the result is the uniform
/// vector `1/n`, never a division by zero.
fn min_max_normalize(values: &mut [f64]) {
    let n = values.len();
    if n == 0 {
        return;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    if max == min {
        values.fill(1.0 / n as f64);
        return;
    }

    let range = max - min;
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}
