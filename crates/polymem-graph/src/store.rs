// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GraphIndex: the lock-guarded, optionally file-backed graph engine.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use polymem_core::types::{
    Community, Edge, EdgeType, Node, NodeType, PageRankOptions, Path, TraversalOptions,
};
use polymem_core::{
    BackendAdapter, BackendKind, GraphBackend, HealthStatus, JsonFile, Lifecycle, Metadata,
    PolymemError, matches_filters,
};

use crate::state::{GraphState, Snapshot, Undo};
use crate::{paths, rank};

/// In-memory property graph with optional JSON file persistence.
///
/// When opened against a file, every successful mutation rewrites
/// `{"nodes": {...}, "edges": {...}}`. Adjacency is rebuilt on [`GraphIndex::load`].
pub struct GraphIndex {
    state: RwLock<GraphState>,
    file: Option<JsonFile>,
    lifecycle: Lifecycle,
}

impl GraphIndex {
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(GraphState::default()),
            file: None,
            lifecycle: Lifecycle::new(BackendKind::Graph),
        }
    }

    /// Creates a graph persisted at `path`. Nothing is read until [`GraphIndex::load`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(JsonFile::new(path)),
            ..Self::in_memory()
        }
    }

    /// Replaces the in-memory graph with the persisted one.
    ///
    /// Returns `(nodes, edges)` loaded.
    pub async fn load(&self) -> Result<(usize, usize), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut state = self.state.write().await;
        let Some(file) = &self.file else {
            return Ok((state.node_count(), state.edge_count()));
        };

        let snapshot: Snapshot = file.load().await?;
        *state = GraphState::from_snapshot(snapshot);
        info!(
            path = %file.path().display(),
            nodes = state.node_count(),
            edges = state.edge_count(),
            "graph loaded"
        );
        Ok((state.node_count(), state.edge_count()))
    }

    pub async fn save(&self) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        self.persist(&state).await
    }

    pub fn mark_unhealthy(&self, reason: impl Into<String>) {
        self.lifecycle.mark_unhealthy(reason);
    }

    pub fn mark_healthy(&self) {
        self.lifecycle.mark_healthy();
    }

    async fn persist(&self, state: &GraphState) -> Result<(), PolymemError> {
        match &self.file {
            Some(file) => file.save(&state.snapshot()).await,
            None => Ok(()),
        }
    }

    /// Persists a mutation, restoring the records in `undo` if the write fails.
    async fn commit(&self, state: &mut GraphState, undo: Undo) -> Result<(), PolymemError> {
        let result = self.persist(state).await;
        if let Err(e) = &result {
            warn!(error = %e, "graph write not persisted, rolled back");
            state.restore(undo);
        }
        result
    }
}

fn validate_node(node: &Node) -> Result<(), PolymemError> {
    if node.id.trim().is_empty() {
        return Err(PolymemError::Validation("node id must not be empty".into()));
    }
    Ok(())
}

fn validate_edge(edge: &Edge) -> Result<(), PolymemError> {
    if edge.id.trim().is_empty() {
        return Err(PolymemError::Validation("edge id must not be empty".into()));
    }
    if edge.from.is_empty() || edge.to.is_empty() {
        return Err(PolymemError::Validation(format!(
            "edge `{}` must name both endpoints",
            edge.id
        )));
    }
    if !edge.weight.is_finite() {
        return Err(PolymemError::Validation(format!(
            "edge `{}` weight must be finite",
            edge.id
        )));
    }
    Ok(())
}

fn ensure_node(state: &GraphState, id: &str) -> Result<(), PolymemError> {
    if state.nodes.contains_key(id) {
        Ok(())
    } else {
        Err(PolymemError::not_found("node", id))
    }
}

#[async_trait]
impl BackendAdapter for GraphIndex {
    fn name(&self) -> &str {
        "graph-index"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Graph
    }

    async fn health_check(&self) -> Result<HealthStatus, PolymemError> {
        self.lifecycle.health()
    }

    async fn close(&self) -> Result<(), PolymemError> {
        let _state = self.state.write().await;
        self.lifecycle.close()?;
        debug!("graph index closed");
        Ok(())
    }
}

#[async_trait]
impl GraphBackend for GraphIndex {
    async fn create_node(&self, mut node: Node) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_node(&node)?;

        let mut state = self.state.write().await;
        if state.nodes.contains_key(&node.id) {
            return Err(PolymemError::AlreadyExists {
                kind: "node",
                id: node.id,
            });
        }

        let undo = Undo::node(&state, &node.id);
        let now = Utc::now();
        node.created_at = now;
        node.updated_at = now;
        state.adjacency.entry(node.id.clone()).or_default();
        debug!(id = %node.id, node_type = %node.node_type, "node created");
        state.nodes.insert(node.id.clone(), node);
        self.commit(&mut state, undo).await
    }

    async fn get_node(&self, id: &str) -> Result<Node, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        state
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| PolymemError::not_found("node", id))
    }

    async fn update_node(&self, mut node: Node) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_node(&node)?;

        let mut state = self.state.write().await;
        let existing = state
            .nodes
            .get(&node.id)
            .ok_or_else(|| PolymemError::not_found("node", &node.id))?;
        node.created_at = existing.created_at;
        node.updated_at = Utc::now();
        let undo = Undo::node(&state, &node.id);
        debug!(id = %node.id, "node updated");
        state.nodes.insert(node.id.clone(), node);
        self.commit(&mut state, undo).await
    }

    async fn delete_node(&self, id: &str) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut state = self.state.write().await;
        ensure_node(&state, id)?;

        let undo = Undo::node_with_edges(&state, id);
        let removed = state.remove_node_cascading(id);
        debug!(id, edges_removed = removed.len(), "node deleted");
        self.commit(&mut state, undo).await
    }

    async fn create_edge(&self, mut edge: Edge) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_edge(&edge)?;

        let mut state = self.state.write().await;
        if state.edges.contains_key(&edge.id) {
            return Err(PolymemError::AlreadyExists {
                kind: "edge",
                id: edge.id,
            });
        }
        for endpoint in [&edge.from, &edge.to] {
            if !state.nodes.contains_key(endpoint) {
                return Err(PolymemError::Referential {
                    edge: edge.id.clone(),
                    missing: endpoint.clone(),
                });
            }
        }

        let undo = Undo::edge(&state, &edge.id);
        edge.created_at = Utc::now();
        state.link(&edge.from, &edge.to);
        debug!(id = %edge.id, from = %edge.from, to = %edge.to, "edge created");
        state.edges.insert(edge.id.clone(), edge);
        self.commit(&mut state, undo).await
    }

    async fn get_edge(&self, id: &str) -> Result<Edge, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        state
            .edges
            .get(id)
            .cloned()
            .ok_or_else(|| PolymemError::not_found("edge", id))
    }

    async fn update_edge(&self, mut edge: Edge) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_edge(&edge)?;

        let mut state = self.state.write().await;
        let previous = state
            .edges
            .get(&edge.id)
            .cloned()
            .ok_or_else(|| PolymemError::not_found("edge", &edge.id))?;
        edge.created_at = previous.created_at;
        let undo = Undo::edge(&state, &edge.id);

        let (from, to) = (edge.from.clone(), edge.to.clone());
        state.edges.insert(edge.id.clone(), edge);
        if previous.from != from || previous.to != to {
            state.unlink_if_unused(&previous.from, &previous.to);
            state.link(&from, &to);
        }
        debug!(id = %previous.id, "edge updated");
        self.commit(&mut state, undo).await
    }

    async fn delete_edge(&self, id: &str) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut state = self.state.write().await;
        let undo = Undo::edge(&state, id);
        let edge = state
            .edges
            .remove(id)
            .ok_or_else(|| PolymemError::not_found("edge", id))?;
        state.unlink_if_unused(&edge.from, &edge.to);
        debug!(id, "edge deleted");
        self.commit(&mut state, undo).await
    }

    async fn get_neighbors(
        &self,
        id: &str,
        options: &TraversalOptions,
    ) -> Result<Vec<Node>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        ensure_node(&state, id)?;

        let mut neighbors: Vec<Node> = state
            .neighbors(id)
            .into_iter()
            .filter_map(|nid| state.node(nid))
            .filter(|node| {
                options.node_types.is_empty() || options.node_types.contains(&node.node_type)
            })
            .cloned()
            .collect();

        if options.max_results > 0 {
            neighbors.truncate(options.max_results);
        }
        Ok(neighbors)
    }

    async fn find_paths(
        &self,
        from: &str,
        to: &str,
        options: &TraversalOptions,
    ) -> Result<Vec<Path>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        ensure_node(&state, from)?;
        ensure_node(&state, to)?;
        Ok(paths::find_paths(&state, from, to, options))
    }

    async fn shortest_path(&self, from: &str, to: &str) -> Result<Path, PolymemError> {
        let found = self
            .find_paths(from, to, &TraversalOptions::default())
            .await?;
        found
            .into_iter()
            .next()
            .ok_or_else(|| PolymemError::not_found("path", format!("{from}->{to}")))
    }

    async fn page_rank(
        &self,
        options: &PageRankOptions,
    ) -> Result<HashMap<String, f64>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        rank::page_rank(&state, options)
    }

    async fn community_detection(&self) -> Result<Vec<Community>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        Ok(rank::communities_by_type(&state))
    }

    async fn find_nodes_by_type(
        &self,
        node_type: NodeType,
        filters: Option<&Metadata>,
    ) -> Result<Vec<Node>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        let mut nodes: Vec<Node> = state
            .nodes
            .values()
            .filter(|n| n.node_type == node_type && matches_filters(&n.properties, filters))
            .cloned()
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(nodes)
    }

    async fn find_edges_by_type(
        &self,
        edge_type: EdgeType,
        filters: Option<&Metadata>,
    ) -> Result<Vec<Edge>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        let mut edges: Vec<Edge> = state
            .edges
            .values()
            .filter(|e| e.edge_type == edge_type && matches_filters(&e.properties, filters))
            .cloned()
            .collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(edges)
    }

    async fn node_count(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        Ok(self.state.read().await.node_count())
    }

    async fn edge_count(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        Ok(self.state.read().await.edge_count())
    }
}

#[cfg(test)]
mod tests {
    use polymem_core::PropertyValue;

    use super::*;

    async fn graph_with(nodes: &[(&str, NodeType)], edges: &[(&str, &str, &str, f64)]) -> GraphIndex {
        let graph = GraphIndex::in_memory();
        for (id, ty) in nodes {
            graph.create_node(Node::new(*id, *ty)).await.unwrap();
        }
        for (id, from, to, w) in edges {
            graph
                .create_edge(Edge::new(*id, *from, *to, EdgeType::RelatedTo, *w))
                .await
                .unwrap();
        }
        graph
    }

    #[tokio::test]
    async fn create_then_get_node() {
        let graph = GraphIndex::in_memory();
        let node = Node::new("ada", NodeType::Entity).with_property("name", "Ada Lovelace");
        graph.create_node(node.clone()).await.unwrap();

        let fetched = graph.get_node("ada").await.unwrap();
        assert_eq!(fetched.id, node.id);
        assert_eq!(fetched.node_type, node.node_type);
        assert_eq!(fetched.properties, node.properties);
    }

    #[tokio::test]
    async fn duplicate_and_empty_ids_are_rejected() {
        let graph = graph_with(&[("a", NodeType::Entity), ("b", NodeType::Entity)], &[("e", "a", "b", 1.0)]).await;
        assert!(matches!(
            graph.create_node(Node::new("a", NodeType::Claim)).await,
            Err(PolymemError::AlreadyExists { kind: "node", .. })
        ));
        assert!(matches!(
            graph.create_edge(Edge::new("e", "a", "b", EdgeType::Supports, 1.0)).await,
            Err(PolymemError::AlreadyExists { kind: "edge", .. })
        ));
        assert!(matches!(
            graph.create_node(Node::new("", NodeType::Entity)).await,
            Err(PolymemError::Validation(_))
        ));
        assert!(matches!(
            graph
                .create_edge(Edge::new("bad", "a", "b", EdgeType::Supports, f64::INFINITY))
                .await,
            Err(PolymemError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn edge_requires_both_endpoints() {
        let graph = graph_with(&[("a", NodeType::Entity)], &[]).await;
        let err = graph
            .create_edge(Edge::new("e", "a", "ghost", EdgeType::RelatedTo, 1.0))
            .await
            .unwrap_err();
        match err {
            PolymemError::Referential { edge, missing } => {
                assert_eq!(edge, "e");
                assert_eq!(missing, "ghost");
            }
            other => panic!("expected referential error, got {other:?}"),
        }
        assert_eq!(graph.edge_count().await.unwrap(), 0);

        let err = graph
            .create_edge(Edge::new("e", "ghost", "a", EdgeType::RelatedTo, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, PolymemError::Referential { .. }));
    }

    #[tokio::test]
    async fn delete_node_cascades() {
        let graph = graph_with(
            &[("a", NodeType::Entity), ("b", NodeType::Entity), ("c", NodeType::Entity)],
            &[("ab", "a", "b", 1.0), ("bc", "b", "c", 1.0), ("ac", "a", "c", 1.0)],
        )
        .await;

        graph.delete_node("b").await.unwrap();
        assert!(graph.get_node("b").await.unwrap_err().is_not_found());
        assert!(graph.get_edge("ab").await.unwrap_err().is_not_found());
        assert!(graph.get_edge("bc").await.unwrap_err().is_not_found());
        assert!(graph.get_edge("ac").await.is_ok());

        let neighbors = graph.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        let ids: Vec<&str> = neighbors.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert!(graph.delete_node("b").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_node_preserves_created_at() {
        let graph = graph_with(&[("a", NodeType::Entity)], &[]).await;
        let original = graph.get_node("a").await.unwrap();

        let replacement = Node::new("a", NodeType::Concept).with_property("name", "renamed");
        graph.update_node(replacement).await.unwrap();

        let updated = graph.get_node("a").await.unwrap();
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.node_type, NodeType::Concept);
        assert_eq!(updated.property("name"), Some(&PropertyValue::from("renamed")));

        assert!(graph
            .update_node(Node::new("missing", NodeType::Entity))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn update_edge_moves_adjacency() {
        let graph = graph_with(
            &[("a", NodeType::Entity), ("b", NodeType::Entity), ("c", NodeType::Entity)],
            &[("e", "a", "b", 1.0)],
        )
        .await;

        graph
            .update_edge(Edge::new("e", "a", "c", EdgeType::Causes, 2.0))
            .await
            .unwrap();

        let neighbors = graph.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        let ids: Vec<&str> = neighbors.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert_eq!(graph.get_edge("e").await.unwrap().edge_type, EdgeType::Causes);
    }

    #[tokio::test]
    async fn delete_edge_keeps_parallel_link() {
        let graph = graph_with(
            &[("a", NodeType::Entity), ("b", NodeType::Entity)],
            &[("e1", "a", "b", 1.0), ("e2", "a", "b", 2.0)],
        )
        .await;

        graph.delete_edge("e1").await.unwrap();
        let neighbors = graph.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        assert_eq!(neighbors.len(), 1);

        graph.delete_edge("e2").await.unwrap();
        let neighbors = graph.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        assert!(neighbors.is_empty());
        assert!(graph.delete_edge("e2").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn neighbors_filter_and_cap() {
        let graph = graph_with(
            &[
                ("hub", NodeType::Entity),
                ("c1", NodeType::Claim),
                ("e1", NodeType::Entity),
                ("e2", NodeType::Entity),
            ],
            &[("1", "hub", "c1", 1.0), ("2", "hub", "e1", 1.0), ("3", "hub", "e2", 1.0)],
        )
        .await;

        let only_entities = TraversalOptions {
            node_types: vec![NodeType::Entity],
            ..Default::default()
        };
        let ids: Vec<String> = graph
            .get_neighbors("hub", &only_entities)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["e1", "e2"]);

        let capped = TraversalOptions {
            max_results: 1,
            ..Default::default()
        };
        assert_eq!(graph.get_neighbors("hub", &capped).await.unwrap().len(), 1);
        assert!(graph
            .get_neighbors("nowhere", &TraversalOptions::default())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn paths_and_shortest_path() {
        let graph = graph_with(
            &[("a", NodeType::Entity), ("b", NodeType::Entity), ("c", NodeType::Entity)],
            &[("ab", "a", "b", 1.5), ("bc", "b", "c", 2.0)],
        )
        .await;

        let path = graph.shortest_path("a", "c").await.unwrap();
        assert_eq!(path.nodes, vec!["a", "b", "c"]);
        assert_eq!(path.edges, vec!["ab", "bc"]);
        assert!((path.weight - 3.5).abs() < 1e-12);

        let trivial = graph.find_paths("a", "a", &TraversalOptions::default()).await.unwrap();
        assert_eq!(trivial.len(), 1);
        assert!(trivial[0].edges.is_empty());

        assert!(graph.shortest_path("c", "a").await.unwrap_err().is_not_found());
        assert!(graph
            .find_paths("a", "ghost", &TraversalOptions::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(graph
            .find_paths("ghost", "ghost", &TraversalOptions::default())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn find_by_type_with_filters() {
        let graph = GraphIndex::in_memory();
        graph
            .create_node(Node::new("c2", NodeType::Claim).with_property("chunk_id", "k1"))
            .await
            .unwrap();
        graph
            .create_node(Node::new("c1", NodeType::Claim).with_property("chunk_id", "k1"))
            .await
            .unwrap();
        graph
            .create_node(Node::new("c3", NodeType::Claim).with_property("chunk_id", "k2"))
            .await
            .unwrap();
        graph.create_node(Node::new("e1", NodeType::Entity)).await.unwrap();
        graph
            .create_edge(Edge::new("s", "c1", "c2", EdgeType::Supports, 1.0))
            .await
            .unwrap();

        let mut filters = Metadata::new();
        filters.insert("chunk_id".into(), "k1".into());
        let ids: Vec<String> = graph
            .find_nodes_by_type(NodeType::Claim, Some(&filters))
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["c1", "c2"]);

        assert_eq!(graph.find_nodes_by_type(NodeType::Claim, None).await.unwrap().len(), 3);
        assert_eq!(graph.find_edges_by_type(EdgeType::Supports, None).await.unwrap().len(), 1);
        assert!(graph.find_edges_by_type(EdgeType::Causes, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_and_unhealthy_graph_rejects_calls() {
        let graph = graph_with(&[("a", NodeType::Entity)], &[]).await;
        graph.mark_unhealthy("forced");
        assert!(matches!(graph.node_count().await, Err(PolymemError::Unhealthy { .. })));
        graph.mark_healthy();
        assert_eq!(graph.node_count().await.unwrap(), 1);

        graph.close().await.unwrap();
        assert!(matches!(graph.get_node("a").await, Err(PolymemError::Closed { .. })));
        assert!(matches!(graph.close().await, Err(PolymemError::Closed { .. })));
    }

    #[tokio::test]
    async fn file_backed_round_trip_rebuilds_adjacency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let graph = GraphIndex::open(&path);
        graph.create_node(Node::new("a", NodeType::Entity)).await.unwrap();
        graph.create_node(Node::new("b", NodeType::Claim)).await.unwrap();
        graph
            .create_edge(Edge::new("ab", "a", "b", EdgeType::Mentions, 0.5))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["nodes"]["a"]["type"], "entity");
        assert_eq!(raw["edges"]["ab"]["from"], "a");
        assert!(raw.get("adjacency").is_none());

        let reopened = GraphIndex::open(&path);
        assert_eq!(reopened.load().await.unwrap(), (2, 1));
        let neighbors = reopened.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        assert_eq!(neighbors[0].id, "b");
        assert!(reopened
            .get_neighbors("b", &TraversalOptions::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_graph_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let graph = GraphIndex::open(sub.join("graph.json"));
        graph.create_node(Node::new("a", NodeType::Entity)).await.unwrap();
        graph.create_node(Node::new("b", NodeType::Entity)).await.unwrap();
        graph
            .create_edge(Edge::new("ab", "a", "b", EdgeType::RelatedTo, 1.0))
            .await
            .unwrap();

        // A regular file where the parent directory should be makes every save fail.
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "").unwrap();

        let err = graph.create_node(Node::new("c", NodeType::Entity)).await.unwrap_err();
        assert!(matches!(err, PolymemError::Storage { .. }), "got: {err:?}");
        assert!(matches!(graph.get_node("c").await, Err(PolymemError::NotFound { .. })));
        assert!(matches!(
            graph.create_node(Node::new("c", NodeType::Entity)).await,
            Err(PolymemError::Storage { .. })
        ));

        assert!(graph.delete_node("a").await.is_err());
        assert!(graph
            .update_edge(Edge::new("ab", "b", "a", EdgeType::Supports, 2.0))
            .await
            .is_err());
        assert!(graph
            .create_edge(Edge::new("ba", "b", "a", EdgeType::RelatedTo, 1.0))
            .await
            .is_err());
        assert!(graph.delete_edge("ab").await.is_err());

        assert_eq!(graph.node_count().await.unwrap(), 2);
        assert_eq!(graph.edge_count().await.unwrap(), 1);
        let edge = graph.get_edge("ab").await.unwrap();
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("a", "b"));
        let neighbors = graph.get_neighbors("a", &TraversalOptions::default()).await.unwrap();
        assert_eq!(neighbors.len(), 1);
        assert!(graph
            .get_neighbors("b", &TraversalOptions::default())
            .await
            .unwrap()
            .is_empty());
    }
}
