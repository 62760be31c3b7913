//! Error and warning types for ranking runs.
//!
//! Fatal kinds abort a run with no partial result. Non-fatal conditions ride
//! along on a completed, usable result as [`RankWarning`]s; the caller decides
//! whether to accept or retry.

use std::fmt;

use thiserror::Error;

/// Fatal failure of a ranking run.
#[derive(Debug, Error)]
pub enum RankError {
    /// Zero nodes: nothing to rank.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// Malformed node or edge input (blank identifiers, missing fields).
    #[error("invalid graph input: {0}")]
    InvalidGraphInput(String),

    /// A negative count would make the heuristic's logarithm argument
    /// non-positive.
    #[error("account {id}: negative {field} ({value})")]
    InvalidCountDomain {
        id: String,
        field: &'static str,
        value: i64,
    },

    /// A solver parameter outside its valid domain, caught before iterating.
    #[error("invalid solver parameter: {0}")]
    InvalidParameter(String),

    #[error("snapshot I/O failed: {0}")]
    SnapshotIo(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    SnapshotCodec(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found}")]
    SnapshotVersion { found: u32 },
}

/// Non-fatal condition surfaced alongside a complete result.
#[derive(Debug, Clone, PartialEq)]
pub enum RankWarning {
    /// Seed ids were supplied but none matched a graph node; the run fell
    /// back to the heuristic-only personalization path. Distinct from "no
    /// seeds requested".
    DegenerateSeedSet { requested: usize },

    /// `max_iterations` was reached before the residual dropped below
    /// tolerance. The scores are still returned, with `converged = false`
    /// in the metadata.
    NonConvergence { iterations: usize, residual: f64 },
}

impl fmt::Display for RankWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSeedSet { requested } => write!(
                f,
                "none of the {requested} supplied seed ids matched a graph node"
            ),
            Self::NonConvergence {
                iterations,
                residual,
            } => write!(
                f,
                "no convergence after {iterations} iterations (residual {residual:e})"
            ),
        }
    }
}
