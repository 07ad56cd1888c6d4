// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The view coordinator.
//!
//! Each operation spawns one task per view and joins them all against a single
//! deadline. A failing view never cancels the others.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use polymem_config::model::PolymemConfig;
use polymem_core::types::{
    Community, Node, NodeType, PageRankOptions, Path, SearchOptions, VectorMatch,
};
use polymem_core::{
    BackendAdapter, BackendFailure, BackendKind, CHUNK_ID_PROPERTY, Chunk, GraphBackend,
    HealthStatus, Metadata, PolymemError, PropertyValue, TextBackend, VectorBackend,
};
use polymem_graph::GraphIndex;
use polymem_text::TextIndex;
use polymem_vector::VectorIndex;

use crate::fanout::{join_within, merge_outcomes};
use crate::recording::{record_backend_failure, record_chunk_stored, record_operation};
use crate::types::{
    GraphStats, MultiViewResults, RetrievalOptions, TextStats, VectorStats, ViewStats,
};

/// Deadline shared by every backend call of one fan-out.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Writes chunks to every view and answers queries from all of them at once.
///
/// Writes (`store_chunk`, `delete_chunk`, `close`) hold the coordinator lock
/// exclusively; reads share it.
pub struct ViewCoordinator {
    vector: Arc<dyn VectorBackend>,
    graph: Arc<dyn GraphBackend>,
    text: Arc<dyn TextBackend>,
    timeout: Duration,
    lock: RwLock<()>,
}

impl ViewCoordinator {
    pub fn new(
        vector: Arc<dyn VectorBackend>,
        graph: Arc<dyn GraphBackend>,
        text: Arc<dyn TextBackend>,
    ) -> Self {
        Self {
            vector,
            graph,
            text,
            timeout: DEFAULT_TIMEOUT,
            lock: RwLock::new(()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the three engines described by `config` and loads their files.
    ///
    /// With `storage.persist = false` every engine runs in memory.
    pub async fn from_config(config: &PolymemConfig) -> Result<Self, PolymemError> {
        let storage = &config.storage;
        let (vector, graph, text) = if storage.persist {
            let vector = VectorIndex::open(storage.vector_path());
            let graph = GraphIndex::open(storage.graph_path());
            let text = TextIndex::open(storage.text_path())
                .with_snippet_radius(config.text.snippet_radius);
            let vectors = vector.load().await?;
            let (nodes, edges) = graph.load().await?;
            let documents = text.load().await?;
            info!(
                data_dir = %storage.data_dir,
                vectors, nodes, edges, documents,
                "views loaded"
            );
            (vector, graph, text)
        } else {
            info!("views running in memory");
            (
                VectorIndex::in_memory(),
                GraphIndex::in_memory(),
                TextIndex::in_memory().with_snippet_radius(config.text.snippet_radius),
            )
        };

        Ok(Self::new(Arc::new(vector), Arc::new(graph), Arc::new(text))
            .with_timeout(Duration::from_millis(config.views.timeout_ms)))
    }

    pub fn vector(&self) -> &Arc<dyn VectorBackend> {
        &self.vector
    }

    pub fn graph(&self) -> &Arc<dyn GraphBackend> {
        &self.graph
    }

    pub fn text(&self) -> &Arc<dyn TextBackend> {
        &self.text
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    /// Stores a chunk in all three views.
    ///
    /// The vector and text writes are required: if either fails or misses the
    /// deadline the call returns `PartialFailure`, and the write that did
    /// succeed is kept. Entities and claims are upserted into the graph on a
    /// best-effort basis; graph failures are logged and otherwise ignored.
    pub async fn store_chunk(&self, chunk: &Chunk) -> Result<(), PolymemError> {
        if chunk.id.trim().is_empty() {
            return Err(PolymemError::Validation(
                "chunk id must not be empty".to_string(),
            ));
        }

        let _guard = self.lock.write().await;
        let started = Instant::now();
        let deadline = self.deadline();

        let vector = {
            let backend = Arc::clone(&self.vector);
            let record = chunk.vector_record();
            tokio::spawn(async move {
                backend
                    .store(&record.id, record.embedding, Some(record.metadata))
                    .await
            })
        };
        let text = {
            let backend = Arc::clone(&self.text);
            let document = chunk.document();
            tokio::spawn(async move { backend.index(document).await })
        };
        let graph = {
            let backend = Arc::clone(&self.graph);
            let nodes = chunk.graph_nodes();
            tokio::spawn(async move {
                Ok::<_, PolymemError>(upsert_nodes(backend.as_ref(), nodes).await)
            })
        };

        let vector_outcome = join_within(BackendKind::Vector, vector, deadline, self.timeout).await;
        let text_outcome = join_within(BackendKind::Text, text, deadline, self.timeout).await;
        match join_within(BackendKind::Graph, graph, deadline, self.timeout).await {
            Ok(failed) => {
                for (node_id, err) in &failed {
                    warn!(chunk_id = %chunk.id, node_id = %node_id, error = %err, "graph upsert failed, chunk kept without it");
                }
                if !failed.is_empty() {
                    record_backend_failure(BackendKind::Graph, "store_chunk");
                }
            }
            Err(err) => {
                warn!(chunk_id = %chunk.id, error = %err, "graph view unavailable, chunk kept without it");
                record_backend_failure(BackendKind::Graph, "store_chunk");
            }
        }

        record_operation("store_chunk", started.elapsed());
        merge_outcomes(
            "store_chunk",
            vec![
                (BackendKind::Vector, vector_outcome),
                (BackendKind::Text, text_outcome),
            ],
        )?;
        record_chunk_stored();
        debug!(chunk_id = %chunk.id, "chunk stored");
        Ok(())
    }

    /// Queries every view concurrently and returns whatever answered in time.
    ///
    /// Never fails: a backend that errors or misses the deadline contributes
    /// an entry to `errors` and an empty result list. An empty `embedding`
    /// skips the vector lookup.
    pub async fn retrieve_multi_view(
        &self,
        query: &str,
        embedding: &[f32],
        options: &RetrievalOptions,
    ) -> MultiViewResults {
        let _guard = self.lock.read().await;
        let started = Instant::now();
        let deadline = self.deadline();

        let vector = {
            let backend = Arc::clone(&self.vector);
            let embedding = embedding.to_vec();
            let filters = options.filters.clone();
            let (limit, min_score) = (options.max_results, options.min_score);
            tokio::spawn(async move {
                if embedding.is_empty() {
                    return Ok::<_, PolymemError>(Vec::new());
                }
                let mut matches = backend.search(&embedding, limit, filters.as_ref()).await?;
                matches.retain(|m: &VectorMatch| m.score >= min_score);
                Ok(matches)
            })
        };
        let text = {
            let backend = Arc::clone(&self.text);
            let query = query.to_string();
            let search = SearchOptions {
                limit: options.max_results,
                filters: options.filters.clone(),
                highlight: options.highlight,
                min_score: options.min_score,
                ..SearchOptions::default()
            };
            tokio::spawn(async move {
                Ok::<_, PolymemError>(backend.search(&query, &search).await?.hits)
            })
        };
        let graph = options.include_graph.then(|| {
            let backend = Arc::clone(&self.graph);
            let query = query.to_string();
            let limit = options.max_results;
            tokio::spawn(async move { search_entities(backend.as_ref(), &query, limit).await })
        });

        let mut results = MultiViewResults::default();
        match join_within(BackendKind::Vector, vector, deadline, self.timeout).await {
            Ok(matches) => results.vector = matches,
            Err(err) => results.errors.push(BackendFailure::new(BackendKind::Vector, &err)),
        }
        match join_within(BackendKind::Text, text, deadline, self.timeout).await {
            Ok(hits) => results.text = hits,
            Err(err) => results.errors.push(BackendFailure::new(BackendKind::Text, &err)),
        }
        if let Some(graph) = graph {
            match join_within(BackendKind::Graph, graph, deadline, self.timeout).await {
                Ok(nodes) => results.graph = nodes,
                Err(err) => results.errors.push(BackendFailure::new(BackendKind::Graph, &err)),
            }
        }

        for failure in &results.errors {
            warn!(backend = %failure.backend, error = %failure.message, "view left out of retrieval");
            record_backend_failure(failure.backend, "retrieve");
        }
        record_operation("retrieve", started.elapsed());
        debug!(
            vector = results.vector.len(),
            text = results.text.len(),
            graph = results.graph.len(),
            failed = results.errors.len(),
            "multi-view retrieval finished"
        );
        results
    }

    /// Removes a chunk from every view.
    ///
    /// Vector and text deletes run first, concurrently. Then every entity and
    /// claim node tagged with the chunk id is deleted along with its edges.
    /// All failures are gathered into one `PartialFailure`.
    pub async fn delete_chunk(&self, id: &str) -> Result<(), PolymemError> {
        if id.trim().is_empty() {
            return Err(PolymemError::Validation(
                "chunk id must not be empty".to_string(),
            ));
        }

        let _guard = self.lock.write().await;
        let started = Instant::now();
        let deadline = self.deadline();

        let vector = {
            let backend = Arc::clone(&self.vector);
            let id = id.to_string();
            tokio::spawn(async move { backend.delete(&id).await })
        };
        let text = {
            let backend = Arc::clone(&self.text);
            let id = id.to_string();
            tokio::spawn(async move { backend.delete(&id).await })
        };

        let mut outcomes = vec![
            (
                BackendKind::Vector,
                join_within(BackendKind::Vector, vector, deadline, self.timeout).await,
            ),
            (
                BackendKind::Text,
                join_within(BackendKind::Text, text, deadline, self.timeout).await,
            ),
        ];

        let graph = {
            let backend = Arc::clone(&self.graph);
            let id = id.to_string();
            tokio::spawn(async move {
                Ok::<_, PolymemError>(delete_chunk_nodes(backend.as_ref(), &id).await)
            })
        };
        match join_within(BackendKind::Graph, graph, deadline, self.timeout).await {
            Ok(node_outcomes) => outcomes.extend(
                node_outcomes
                    .into_iter()
                    .map(|outcome| (BackendKind::Graph, outcome)),
            ),
            Err(err) => outcomes.push((BackendKind::Graph, Err(err))),
        }

        record_operation("delete_chunk", started.elapsed());
        merge_outcomes("delete_chunk", outcomes)?;
        debug!(chunk_id = id, "chunk deleted");
        Ok(())
    }

    /// Counts from every view. Never fails.
    pub async fn get_stats(&self) -> ViewStats {
        let _guard = self.lock.read().await;
        let deadline = self.deadline();

        let vector = {
            let backend = Arc::clone(&self.vector);
            tokio::spawn(async move {
                Ok::<_, PolymemError>(VectorStats {
                    healthy: true,
                    vectors: backend.count().await?,
                })
            })
        };
        let graph = {
            let backend = Arc::clone(&self.graph);
            tokio::spawn(async move {
                Ok::<_, PolymemError>(GraphStats {
                    healthy: true,
                    nodes: backend.node_count().await?,
                    edges: backend.edge_count().await?,
                })
            })
        };
        let text = {
            let backend = Arc::clone(&self.text);
            tokio::spawn(async move {
                Ok::<_, PolymemError>(TextStats {
                    healthy: true,
                    documents: backend.document_count().await?,
                    index_bytes: backend.index_size().await?,
                })
            })
        };

        ViewStats {
            vector: join_within(BackendKind::Vector, vector, deadline, self.timeout)
                .await
                .unwrap_or_else(|err| stats_unavailable(BackendKind::Vector, &err)),
            graph: join_within(BackendKind::Graph, graph, deadline, self.timeout)
                .await
                .unwrap_or_else(|err| stats_unavailable(BackendKind::Graph, &err)),
            text: join_within(BackendKind::Text, text, deadline, self.timeout)
                .await
                .unwrap_or_else(|err| stats_unavailable(BackendKind::Text, &err)),
        }
    }

    /// Health-checks every view. Any failure or non-healthy status yields `PartialFailure`.
    pub async fn health_check(&self) -> Result<(), PolymemError> {
        let _guard = self.lock.read().await;
        let deadline = self.deadline();
        let handles = [
            (BackendKind::Vector, spawn_health(Arc::clone(&self.vector))),
            (BackendKind::Graph, spawn_health(Arc::clone(&self.graph))),
            (BackendKind::Text, spawn_health(Arc::clone(&self.text))),
        ];
        let outcomes = self.join_each(handles, deadline).await;
        merge_outcomes("health_check", outcomes)
    }

    /// Closes every view. Closing is permanent.
    pub async fn close(&self) -> Result<(), PolymemError> {
        let _guard = self.lock.write().await;
        let deadline = self.deadline();
        let handles = [
            (BackendKind::Vector, spawn_close(Arc::clone(&self.vector))),
            (BackendKind::Graph, spawn_close(Arc::clone(&self.graph))),
            (BackendKind::Text, spawn_close(Arc::clone(&self.text))),
        ];
        let outcomes = self.join_each(handles, deadline).await;
        merge_outcomes("close", outcomes)?;
        info!("views closed");
        Ok(())
    }

    pub async fn page_rank(
        &self,
        options: &PageRankOptions,
    ) -> Result<HashMap<String, f64>, PolymemError> {
        let _guard = self.lock.read().await;
        self.graph.page_rank(options).await
    }

    pub async fn community_detection(&self) -> Result<Vec<Community>, PolymemError> {
        let _guard = self.lock.read().await;
        self.graph.community_detection().await
    }

    pub async fn shortest_path(&self, from: &str, to: &str) -> Result<Path, PolymemError> {
        let _guard = self.lock.read().await;
        self.graph.shortest_path(from, to).await
    }

    async fn join_each(
        &self,
        handles: [(BackendKind, JoinHandle<Result<(), PolymemError>>); 3],
        deadline: Instant,
    ) -> Vec<(BackendKind, Result<(), PolymemError>)> {
        let budget = self.timeout;
        join_all(handles.into_iter().map(|(kind, handle)| async move {
            (kind, join_within(kind, handle, deadline, budget).await)
        }))
        .await
    }
}

/// Creates each node, falling back to a full update when creation fails.
///
/// Returns the nodes that could be neither created nor updated.
async fn upsert_nodes(graph: &dyn GraphBackend, nodes: Vec<Node>) -> Vec<(String, PolymemError)> {
    let mut failed = Vec::new();
    for node in nodes {
        let id = node.id.clone();
        if graph.create_node(node.clone()).await.is_ok() {
            continue;
        }
        if let Err(err) = graph.update_node(node).await {
            failed.push((id, err));
        }
    }
    failed
}

/// Entity nodes whose name contains any whitespace-separated query term, ignoring case.
async fn search_entities(
    graph: &dyn GraphBackend,
    query: &str,
    limit: usize,
) -> Result<Vec<Node>, PolymemError> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let matching = graph
        .find_nodes_by_type(NodeType::Entity, None)
        .await?
        .into_iter()
        .filter(|node| {
            node.property("name")
                .and_then(PropertyValue::as_str)
                .map(str::to_lowercase)
                .is_some_and(|name| terms.iter().any(|term| name.contains(term.as_str())))
        });

    Ok(if limit == 0 {
        matching.collect()
    } else {
        matching.take(limit).collect()
    })
}

/// Deletes the entity and claim nodes extracted from `chunk_id`, one outcome per node.
async fn delete_chunk_nodes(graph: &dyn GraphBackend, chunk_id: &str) -> Vec<Result<(), PolymemError>> {
    let mut filter = Metadata::new();
    filter.insert(CHUNK_ID_PROPERTY.to_string(), PropertyValue::from(chunk_id));

    let mut outcomes = Vec::new();
    for node_type in [NodeType::Entity, NodeType::Claim] {
        match graph.find_nodes_by_type(node_type, Some(&filter)).await {
            Ok(nodes) => {
                for node in nodes {
                    outcomes.push(graph.delete_node(&node.id).await);
                }
            }
            Err(err) => outcomes.push(Err(err)),
        }
    }
    outcomes
}

fn stats_unavailable<T: Default>(backend: BackendKind, err: &PolymemError) -> T {
    warn!(%backend, error = %err, "stats unavailable");
    record_backend_failure(backend, "stats");
    T::default()
}

fn spawn_health<B>(backend: Arc<B>) -> JoinHandle<Result<(), PolymemError>>
where
    B: BackendAdapter + ?Sized,
{
    tokio::spawn(async move {
        match backend.health_check().await? {
            HealthStatus::Healthy => Ok(()),
            HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
                Err(PolymemError::Unhealthy {
                    backend: backend.kind(),
                    reason,
                })
            }
        }
    })
}

fn spawn_close<B>(backend: Arc<B>) -> JoinHandle<Result<(), PolymemError>>
where
    B: BackendAdapter + ?Sized,
{
    tokio::spawn(async move { backend.close().await })
}
