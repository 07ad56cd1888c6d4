// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock backend implementing every view trait.
//!
//! `MockBackend` either fails each call with a fixed error or sleeps before
//! answering with an empty result, which is enough to drive the
//! coordinator's partial-failure and timeout paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use polymem_core::types::{
    Community, Document, Edge, EdgeType, Node, NodeType, PageRankOptions, Path, SearchOptions,
    SearchResults, TraversalOptions, VectorMatch, VectorRecord,
};
use polymem_core::{
    BackendAdapter, BackendKind, GraphBackend, HealthStatus, Metadata, PolymemError, TextBackend,
    VectorBackend,
};

#[derive(Debug, Clone)]
enum Behavior {
    Fail(String),
    Delay(Duration),
}

/// A scripted stand-in for a vector, graph, or text backend.
#[derive(Debug)]
pub struct MockBackend {
    kind: BackendKind,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Every call fails with `Unhealthy { reason }`.
    pub fn failing(kind: BackendKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            behavior: Behavior::Fail(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call sleeps for `delay`, then succeeds with an empty answer.
    ///
    /// Lookups of a single record answer `NotFound` after the delay.
    pub fn slow(kind: BackendKind, delay: Duration) -> Self {
        Self {
            kind,
            behavior: Behavior::Delay(delay),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls received so far, including health checks.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn gate(&self) -> Result<(), PolymemError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Fail(reason) => Err(PolymemError::Unhealthy {
                backend: self.kind,
                reason: reason.clone(),
            }),
            Behavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
        }
    }

    async fn empty<T: Default>(&self) -> Result<T, PolymemError> {
        self.gate().await?;
        Ok(T::default())
    }

    async fn missing<T>(&self, kind: &'static str, id: &str) -> Result<T, PolymemError> {
        self.gate().await?;
        Err(PolymemError::not_found(kind, id))
    }
}

#[async_trait]
impl BackendAdapter for MockBackend {
    fn name(&self) -> &str {
        match self.behavior {
            Behavior::Fail(_) => "failing-mock",
            Behavior::Delay(_) => "slow-mock",
        }
    }

    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn health_check(&self) -> Result<HealthStatus, PolymemError> {
        self.gate().await?;
        Ok(HealthStatus::Healthy)
    }

    async fn close(&self) -> Result<(), PolymemError> {
        self.empty().await
    }
}

#[async_trait]
impl VectorBackend for MockBackend {
    async fn store(
        &self,
        _id: &str,
        _embedding: Vec<f32>,
        _metadata: Option<Metadata>,
    ) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn search(
        &self,
        _query: &[f32],
        _k: usize,
        _filters: Option<&Metadata>,
    ) -> Result<Vec<VectorMatch>, PolymemError> {
        self.empty().await
    }

    async fn get_by_id(&self, id: &str) -> Result<VectorRecord, PolymemError> {
        self.missing("vector", id).await
    }

    async fn delete(&self, _id: &str) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn update(&self, _id: &str, _metadata: Metadata) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn batch_store(&self, _records: Vec<VectorRecord>) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn count(&self) -> Result<usize, PolymemError> {
        self.empty().await
    }
}

#[async_trait]
impl GraphBackend for MockBackend {
    async fn create_node(&self, _node: Node) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn get_node(&self, id: &str) -> Result<Node, PolymemError> {
        self.missing("node", id).await
    }

    async fn update_node(&self, _node: Node) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn delete_node(&self, _id: &str) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn create_edge(&self, _edge: Edge) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn get_edge(&self, id: &str) -> Result<Edge, PolymemError> {
        self.missing("edge", id).await
    }

    async fn update_edge(&self, _edge: Edge) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn delete_edge(&self, _id: &str) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn get_neighbors(
        &self,
        _id: &str,
        _options: &TraversalOptions,
    ) -> Result<Vec<Node>, PolymemError> {
        self.empty().await
    }

    async fn find_paths(
        &self,
        _from: &str,
        _to: &str,
        _options: &TraversalOptions,
    ) -> Result<Vec<Path>, PolymemError> {
        self.empty().await
    }

    async fn shortest_path(&self, from: &str, to: &str) -> Result<Path, PolymemError> {
        self.missing("path", &format!("{from}->{to}")).await
    }

    async fn page_rank(
        &self,
        _options: &PageRankOptions,
    ) -> Result<HashMap<String, f64>, PolymemError> {
        self.empty().await
    }

    async fn community_detection(&self) -> Result<Vec<Community>, PolymemError> {
        self.empty().await
    }

    async fn find_nodes_by_type(
        &self,
        _node_type: NodeType,
        _filters: Option<&Metadata>,
    ) -> Result<Vec<Node>, PolymemError> {
        self.empty().await
    }

    async fn find_edges_by_type(
        &self,
        _edge_type: EdgeType,
        _filters: Option<&Metadata>,
    ) -> Result<Vec<Edge>, PolymemError> {
        self.empty().await
    }

    async fn node_count(&self) -> Result<usize, PolymemError> {
        self.empty().await
    }

    async fn edge_count(&self) -> Result<usize, PolymemError> {
        self.empty().await
    }
}

#[async_trait]
impl TextBackend for MockBackend {
    async fn index(&self, _document: Document) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn update(&self, _document: Document) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn delete(&self, _id: &str) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn batch_index(&self, _documents: Vec<Document>) -> Result<(), PolymemError> {
        self.empty().await
    }

    async fn get(&self, id: &str) -> Result<Document, PolymemError> {
        self.missing("document", id).await
    }

    async fn search(
        &self,
        _query: &str,
        _options: &SearchOptions,
    ) -> Result<SearchResults, PolymemError> {
        self.empty().await
    }

    async fn suggest(
        &self,
        _prefix: &str,
        _field: &str,
        _size: usize,
    ) -> Result<Vec<String>, PolymemError> {
        self.empty().await
    }

    async fn multi_search(
        &self,
        queries: &[String],
        _options: &SearchOptions,
    ) -> Result<Vec<SearchResults>, PolymemError> {
        self.gate().await?;
        Ok(vec![SearchResults::default(); queries.len()])
    }

    async fn document_count(&self) -> Result<usize, PolymemError> {
        self.empty().await
    }

    async fn index_size(&self) -> Result<usize, PolymemError> {
        self.empty().await
    }
}
