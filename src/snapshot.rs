//! Versioned run snapshot.
//!
//! Persists the three logical tables (nodes, edges, scores) plus the run
//! metadata as one JSON document at a fixed, overwritable path. The write
//! goes to a sibling temp file first and is renamed into place, so a crash
//! mid-write cannot leave a partial snapshot behind.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RankError;
use crate::graph::GraphModel;
use crate::types::{Account, AccountId, RunMetadata};

/// Current snapshot format version. Bumped on any schema change; loads of
/// other versions are rejected rather than misread.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Full state of one completed run: graph, scores, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub nodes: Vec<Account>,
    pub edges: Vec<(AccountId, AccountId)>,
    pub scores: Vec<(AccountId, f64)>,
    pub metadata: RunMetadata,
}

impl Snapshot {
    /// Capture the graph, per-node scores (index order), and metadata.
    pub fn capture(graph: &GraphModel, scores: &[f64], metadata: RunMetadata) -> Self {
        let nodes: Vec<Account> = graph.accounts().cloned().collect();

        let mut edges = Vec::with_capacity(graph.edge_count());
        for (i, account) in graph.accounts().enumerate() {
            for &target in graph.out_neighbors(i as u32) {
                edges.push((account.id.clone(), graph.account(target).id.clone()));
            }
        }

        let scores = graph
            .accounts()
            .zip(scores)
            .map(|(account, &score)| (account.id.clone(), score))
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            nodes,
            edges,
            scores,
            metadata,
        }
    }

    /// Write the snapshot, fully replacing whatever is at `path`.
    ///
    /// Temp-then-rename within the target directory; the rename is the
    /// commit point.
    pub fn write(&self, path: &Path) -> Result<(), RankError> {
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), bytes = json.len(), "snapshot written");
        Ok(())
    }

    /// Load a snapshot written by [`Snapshot::write`].
    pub fn load(path: &Path) -> Result<Self, RankError> {
        let bytes = fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RankError::SnapshotVersion {
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountRow;
    use chrono::Utc;

    fn sample_graph() -> GraphModel {
        let rows = vec![
            AccountRow {
                id: "a".to_string(),
                username: Some("alice".to_string()),
                follower_count: 100,
                following_count: 10,
                is_verified: true,
            },
            AccountRow {
                id: "b".to_string(),
                username: None,
                follower_count: 5,
                following_count: 50,
                is_verified: false,
            },
        ];
        let edges = vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ];
        GraphModel::from_tables(rows, edges).unwrap()
    }

    fn sample_metadata() -> RunMetadata {
        RunMetadata {
            alpha: 0.15,
            max_iterations: 1000,
            tolerance: 1e-6,
            seed_count: 1,
            timestamp: Utc::now(),
            node_count: 2,
            edge_count: 2,
            iterations_used: 12,
            converged: true,
        }
    }

    #[test]
    fn test_roundtrip_preserves_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let graph = sample_graph();
        let snapshot = Snapshot::capture(&graph, &[0.3, -0.1], sample_metadata());
        snapshot.write(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.version, SNAPSHOT_VERSION);
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.nodes[0].username, "alice");
        assert_eq!(loaded.edges.len(), 2);
        assert_eq!(loaded.scores[0], ("a".to_string(), 0.3));
        assert_eq!(loaded.scores[1], ("b".to_string(), -0.1));
        assert_eq!(loaded.metadata, snapshot.metadata);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let graph = sample_graph();
        Snapshot::capture(&graph, &[0.0, 0.0], sample_metadata())
            .write(&path)
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let graph = sample_graph();

        Snapshot::capture(&graph, &[1.0, 2.0], sample_metadata())
            .write(&path)
            .unwrap();
        Snapshot::capture(&graph, &[3.0, 4.0], sample_metadata())
            .write(&path)
            .unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.scores[0].1, 3.0);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let graph = sample_graph();
        let mut snapshot = Snapshot::capture(&graph, &[0.0, 0.0], sample_metadata());
        snapshot.version = 99;
        let json = serde_json::to_vec(&snapshot).unwrap();
        std::fs::write(&path, json).unwrap();

        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, RankError::SnapshotVersion { found: 99 }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RankError::SnapshotIo(_)));
    }
}
