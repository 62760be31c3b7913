//! Graph construction and representation
//!
//! This module provides the directed follows-graph model and the sparse
//! out-degree-normalized transition matrix derived from it.

pub mod model;
pub mod transition;

pub use model::GraphModel;
pub use transition::TransitionMatrix;
