//! Directed follows-graph model.
//!
//! [`GraphModel`] owns the node-attribute table, the deduplicated edge table,
//! and the node-to-index bijection that every matrix and vector operation is
//! expressed in. Indices are assigned on first sight (attribute rows first,
//! then edge endpoints) and stay fixed for the lifetime of one solve.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::RankError;
use crate::types::{Account, AccountId, AccountRow};

/// Directed "source follows target" graph with per-account attributes.
#[derive(Debug, Clone)]
pub struct GraphModel {
    accounts: Vec<Account>,
    id_to_index: FxHashMap<AccountId, u32>,
    /// Out-neighbors per node, sorted and deduplicated.
    out_edges: Vec<Vec<u32>>,
    edge_count: usize,
}

impl GraphModel {
    /// Build a graph from an attribute table and an edge table.
    ///
    /// Edge endpoints absent from the attribute table receive default
    /// attributes. Duplicate edges collapse; duplicate attribute rows are
    /// resolved last-row-wins. Self-follows are kept and count toward
    /// out-degree.
    pub fn from_tables(
        rows: Vec<AccountRow>,
        edges: Vec<(AccountId, AccountId)>,
    ) -> Result<Self, RankError> {
        let mut model = Self {
            accounts: Vec::with_capacity(rows.len()),
            id_to_index: FxHashMap::with_capacity_and_hasher(rows.len(), Default::default()),
            out_edges: Vec::new(),
            edge_count: 0,
        };

        for row in rows {
            model.insert_row(row)?;
        }

        // Intern endpoints first so the index space is complete before the
        // adjacency sets are sized.
        let mut pairs = Vec::with_capacity(edges.len());
        for (source, target) in edges {
            let s = model.intern(source)?;
            let t = model.intern(target)?;
            pairs.push((s, t));
        }

        let n = model.accounts.len();
        let mut sets: Vec<FxHashSet<u32>> = vec![FxHashSet::default(); n];
        let mut edge_count = 0;
        for (s, t) in pairs {
            if sets[s as usize].insert(t) {
                edge_count += 1;
            }
        }

        model.out_edges = sets
            .into_iter()
            .map(|set| {
                let mut targets: Vec<u32> = set.into_iter().collect();
                targets.sort_unstable();
                targets
            })
            .collect();
        model.edge_count = edge_count;

        Ok(model)
    }

    fn insert_row(&mut self, row: AccountRow) -> Result<(), RankError> {
        if row.id.trim().is_empty() {
            return Err(RankError::InvalidGraphInput(
                "blank account id in attribute table".to_string(),
            ));
        }
        if row.follower_count < 0 {
            return Err(RankError::InvalidCountDomain {
                id: row.id,
                field: "follower_count",
                value: row.follower_count,
            });
        }
        if row.following_count < 0 {
            return Err(RankError::InvalidCountDomain {
                id: row.id,
                field: "following_count",
                value: row.following_count,
            });
        }

        let account = Account {
            id: row.id.clone(),
            username: row.username.unwrap_or_else(|| "unknown".to_string()),
            follower_count: row.follower_count as u64,
            following_count: row.following_count as u64,
            is_verified: row.is_verified,
            score: None,
        };

        match self.id_to_index.get(&row.id) {
            // Last row wins.
            Some(&idx) => self.accounts[idx as usize] = account,
            None => {
                let idx = self.accounts.len() as u32;
                self.id_to_index.insert(row.id, idx);
                self.accounts.push(account);
            }
        }
        Ok(())
    }

    /// Resolve an id to its index, creating a default-attribute node for ids
    /// seen only as edge endpoints.
    fn intern(&mut self, id: AccountId) -> Result<u32, RankError> {
        if id.trim().is_empty() {
            return Err(RankError::InvalidGraphInput(
                "blank account id in edge table".to_string(),
            ));
        }
        if let Some(&idx) = self.id_to_index.get(&id) {
            return Ok(idx);
        }
        let idx = self.accounts.len() as u32;
        self.accounts.push(Account::with_defaults(id.clone()));
        self.id_to_index.insert(id, idx);
        Ok(idx)
    }

    pub fn node_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// O(1) index lookup by account id.
    pub fn index_of(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    pub fn account(&self, idx: u32) -> &Account {
        &self.accounts[idx as usize]
    }

    /// Iterate all accounts in index order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Out-neighbors of a node, sorted for deterministic iteration.
    pub fn out_neighbors(&self, idx: u32) -> &[u32] {
        &self.out_edges[idx as usize]
    }

    pub fn out_degree(&self, idx: u32) -> usize {
        self.out_edges[idx as usize].len()
    }

    /// Write final scores back onto the accounts.
    ///
    /// Convenience copy only; the mapping returned by the run is the
    /// authoritative result.
    pub fn annotate_scores(&mut self, scores: &[f64]) {
        debug_assert_eq!(scores.len(), self.accounts.len());
        for (account, &score) in self.accounts.iter_mut().zip(scores) {
            account.score = Some(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, followers: i64, following: i64) -> AccountRow {
        AccountRow {
            id: id.to_string(),
            username: Some(format!("user_{id}")),
            follower_count: followers,
            following_count: following,
            is_verified: false,
        }
    }

    fn edge(s: &str, t: &str) -> (AccountId, AccountId) {
        (s.to_string(), t.to_string())
    }

    #[test]
    fn test_index_order_rows_then_endpoints() {
        let graph = GraphModel::from_tables(
            vec![row("a", 10, 5), row("b", 20, 5)],
            vec![edge("b", "c"), edge("c", "a")],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.index_of("a"), Some(0));
        assert_eq!(graph.index_of("b"), Some(1));
        assert_eq!(graph.index_of("c"), Some(2));
    }

    #[test]
    fn test_endpoint_only_node_gets_defaults() {
        let graph =
            GraphModel::from_tables(vec![row("a", 10, 5)], vec![edge("a", "ghost")]).unwrap();

        let ghost = graph.account(graph.index_of("ghost").unwrap());
        assert_eq!(ghost.username, "unknown");
        assert_eq!(ghost.follower_count, 1);
        assert_eq!(ghost.following_count, 1);
        assert!(!ghost.is_verified);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let graph = GraphModel::from_tables(
            vec![row("a", 1, 1), row("b", 1, 1)],
            vec![edge("a", "b"), edge("a", "b"), edge("a", "b")],
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(0), 1);
    }

    #[test]
    fn test_duplicate_rows_last_wins() {
        let graph = GraphModel::from_tables(
            vec![row("a", 1, 1), row("a", 99, 7)],
            vec![],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.account(0).follower_count, 99);
        assert_eq!(graph.account(0).following_count, 7);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = GraphModel::from_tables(vec![row("a", -1, 0)], vec![]).unwrap_err();
        assert!(matches!(
            err,
            RankError::InvalidCountDomain {
                field: "follower_count",
                value: -1,
                ..
            }
        ));

        let err = GraphModel::from_tables(vec![row("a", 0, -5)], vec![]).unwrap_err();
        assert!(matches!(
            err,
            RankError::InvalidCountDomain {
                field: "following_count",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_id_rejected() {
        let err = GraphModel::from_tables(vec![row("  ", 1, 1)], vec![]).unwrap_err();
        assert!(matches!(err, RankError::InvalidGraphInput(_)));

        let err =
            GraphModel::from_tables(vec![row("a", 1, 1)], vec![edge("a", "")]).unwrap_err();
        assert!(matches!(err, RankError::InvalidGraphInput(_)));
    }

    #[test]
    fn test_self_follow_kept() {
        let graph =
            GraphModel::from_tables(vec![row("a", 1, 1)], vec![edge("a", "a")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_neighbors(0), &[0]);
    }

    #[test]
    fn test_out_neighbors_sorted() {
        let graph = GraphModel::from_tables(
            vec![row("a", 1, 1), row("b", 1, 1), row("c", 1, 1)],
            vec![edge("a", "c"), edge("a", "b")],
        )
        .unwrap();
        assert_eq!(graph.out_neighbors(0), &[1, 2]);
    }

    #[test]
    fn test_annotate_scores() {
        let mut graph =
            GraphModel::from_tables(vec![row("a", 1, 1), row("b", 1, 1)], vec![]).unwrap();
        graph.annotate_scores(&[0.5, -0.25]);
        assert_eq!(graph.account(0).score, Some(0.5));
        assert_eq!(graph.account(1).score, Some(-0.25));
    }

    #[test]
    fn test_empty_tables_yield_empty_graph() {
        let graph = GraphModel::from_tables(vec![], vec![]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
