//! # followrank
//!
//! Personalized PageRank over a directed "follows" graph of social accounts.
//!
//! The ranking is biased two ways: a curated seed set receives elevated
//! restart weight, and every account is scored by a follower/following-ratio
//! heuristic that favors organic influence (with a penalty for accounts that
//! follow excessively). The engine builds a sparse column-stochastic
//! transition matrix and a restart vector from the graph, runs a damped
//! power iteration to a fixed point, and finally subtracts the restart
//! injection so the seed boost does not inflate reported magnitudes.
//!
//! # Example
//!
//! ```
//! use followrank::{rank, AccountRow, GraphModel, RankConfig};
//!
//! let rows = vec![
//!     AccountRow {
//!         id: "a".into(),
//!         username: Some("alice".into()),
//!         follower_count: 1200,
//!         following_count: 300,
//!         is_verified: true,
//!     },
//!     AccountRow {
//!         id: "b".into(),
//!         username: None,
//!         follower_count: 50,
//!         following_count: 900,
//!         is_verified: false,
//!     },
//! ];
//! let edges = vec![("a".into(), "b".into()), ("b".into(), "a".into())];
//! let mut graph = GraphModel::from_tables(rows, edges)?;
//!
//! let outcome = rank(&mut graph, None, &RankConfig::default())?;
//! assert_eq!(outcome.scores.len(), 2);
//! assert!(outcome.metadata.converged);
//! # Ok::<(), followrank::RankError>(())
//! ```

pub mod error;
pub mod graph;
pub mod pagerank;
pub mod personalization;
pub mod runner;
pub mod snapshot;
pub mod types;

pub use error::{RankError, RankWarning};
pub use graph::{GraphModel, TransitionMatrix};
pub use pagerank::{PowerIterationSolver, RankResult};
pub use personalization::{heuristic_score, Personalization, PersonalizationBuilder};
pub use runner::{rank, RankOutcome};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use types::{Account, AccountId, AccountRow, RankConfig, RunMetadata};
