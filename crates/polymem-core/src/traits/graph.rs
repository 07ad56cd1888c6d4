// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-graph view.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::PolymemError;
use crate::traits::adapter::BackendAdapter;
use crate::types::{
    Community, Edge, EdgeType, Metadata, Node, NodeType, PageRankOptions, Path, TraversalOptions,
};

/// Stores typed nodes and weighted edges and answers traversal and analytic queries.
#[async_trait]
pub trait GraphBackend: BackendAdapter {
    async fn create_node(&self, node: Node) -> Result<(), PolymemError>;

    async fn get_node(&self, id: &str) -> Result<Node, PolymemError>;

    /// Full replace of an existing node.
    async fn update_node(&self, node: Node) -> Result<(), PolymemError>;

    /// Removes the node together with every incident edge.
    async fn delete_node(&self, id: &str) -> Result<(), PolymemError>;

    /// Creates an edge. Both endpoints must already exist.
    async fn create_edge(&self, edge: Edge) -> Result<(), PolymemError>;

    async fn get_edge(&self, id: &str) -> Result<Edge, PolymemError>;

    async fn update_edge(&self, edge: Edge) -> Result<(), PolymemError>;

    async fn delete_edge(&self, id: &str) -> Result<(), PolymemError>;

    async fn get_neighbors(
        &self,
        id: &str,
        options: &TraversalOptions,
    ) -> Result<Vec<Node>, PolymemError>;

    async fn find_paths(
        &self,
        from: &str,
        to: &str,
        options: &TraversalOptions,
    ) -> Result<Vec<Path>, PolymemError>;

    async fn shortest_path(&self, from: &str, to: &str) -> Result<Path, PolymemError>;

    async fn page_rank(
        &self,
        options: &PageRankOptions,
    ) -> Result<HashMap<String, f64>, PolymemError>;

    async fn community_detection(&self) -> Result<Vec<Community>, PolymemError>;

    async fn find_nodes_by_type(
        &self,
        node_type: NodeType,
        filters: Option<&Metadata>,
    ) -> Result<Vec<Node>, PolymemError>;

    async fn find_edges_by_type(
        &self,
        edge_type: EdgeType,
        filters: Option<&Metadata>,
    ) -> Result<Vec<Edge>, PolymemError>;

    async fn node_count(&self) -> Result<usize, PolymemError>;

    async fn edge_count(&self) -> Result<usize, PolymemError>;
}
