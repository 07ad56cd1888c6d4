// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types of the coordinator.

use serde::Serialize;

use polymem_core::types::{Node, SearchHit, VectorMatch};
use polymem_core::{BackendFailure, Metadata};

/// Options for [`crate::ViewCoordinator::retrieve_multi_view`].
#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    /// Cap applied to each view separately. Zero means no cap.
    pub max_results: usize,
    /// Also search entity names in the graph view.
    pub include_graph: bool,
    pub filters: Option<Metadata>,
    /// Vector and text hits scoring below this are dropped.
    pub min_score: f64,
    /// Ask the text view for highlighted snippets.
    pub highlight: bool,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            include_graph: false,
            filters: None,
            min_score: 0.0,
            highlight: false,
        }
    }
}

/// Everything the views returned for one query, plus what went wrong.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MultiViewResults {
    pub vector: Vec<VectorMatch>,
    pub text: Vec<SearchHit>,
    pub graph: Vec<Node>,
    /// One entry per backend that failed or missed the deadline.
    pub errors: Vec<BackendFailure>,
}

impl MultiViewResults {
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty() && self.text.is_empty() && self.graph.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VectorStats {
    pub healthy: bool,
    pub vectors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub healthy: bool,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub healthy: bool,
    pub documents: usize,
    /// Total bytes of indexed content.
    pub index_bytes: usize,
}

/// Per-view counts. A view that failed to answer reports `healthy: false` and zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub vector: VectorStats,
    pub graph: GraphStats,
    pub text: TextStats,
}

impl ViewStats {
    pub fn all_healthy(&self) -> bool {
        self.vector.healthy && self.graph.healthy && self.text.healthy
    }
}
