//! Core account and run-level types.
//!
//! Attribute defaults are applied once, at construction time; downstream code
//! never re-derives them. Counts arrive from the external store as signed
//! integers so negative values can be rejected explicitly instead of wrapping.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque external account identifier.
pub type AccountId = String;

/// A single account in the follows graph, with defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub is_verified: bool,
    /// Populated only after a solve. This is a convenience copy; the score
    /// mapping returned by the run is the authoritative result.
    #[serde(default)]
    pub score: Option<f64>,
}

impl Account {
    /// Account with default attributes, used for ids that appear only as
    /// edge endpoints.
    pub fn with_defaults(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            username: "unknown".to_string(),
            follower_count: 1,
            following_count: 1,
            is_verified: false,
            score: None,
        }
    }
}

/// Raw attribute row as supplied by the external store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,
    #[serde(default)]
    pub username: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    #[serde(default)]
    pub is_verified: bool,
}

/// Parameters for one ranking run.
///
/// Passed explicitly into the run; there is no process-wide mutable default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Restart probability per step.
    pub alpha: f64,
    /// Upper bound on power-iteration steps.
    pub max_iterations: usize,
    /// L1 convergence threshold.
    pub tolerance: f64,
    /// Fixed, overwritable snapshot location. `None` disables persistence.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            max_iterations: 1000,
            tolerance: 1e-6,
            snapshot_path: None,
        }
    }
}

/// Immutable audit record attached to every solve result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub alpha: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Number of seed ids the caller supplied, before any filtering.
    pub seed_count: usize,
    pub timestamp: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: usize,
    pub iterations_used: usize,
    pub converged: bool,
}
