// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the view coordinator against real engines and mocks.

use std::sync::Arc;
use std::time::Duration;

use polymem_config::model::PolymemConfig;
use polymem_core::{BackendKind, GraphBackend, PolymemError, TextBackend, VectorBackend};
use polymem_graph::GraphIndex;
use polymem_test_utils::MockBackend;
use polymem_test_utils::fixtures::{ada_chunk, ml_chunk, plain_chunk};
use polymem_text::TextIndex;
use polymem_vector::VectorIndex;
use polymem_views::{RetrievalOptions, ViewCoordinator};

#[tokio::test]
async fn unhealthy_vector_keeps_chunk_in_text() {
    let vector = Arc::new(VectorIndex::in_memory());
    let graph = Arc::new(GraphIndex::in_memory());
    let text = Arc::new(TextIndex::in_memory());
    let coordinator = ViewCoordinator::new(vector.clone(), graph.clone(), text.clone());

    vector.mark_unhealthy("index rebuild");
    let err = coordinator.store_chunk(&ada_chunk("c1")).await.unwrap_err();

    assert!(matches!(err, PolymemError::PartialFailure { operation: "store_chunk", .. }));
    assert!(err.to_string().contains("vector"), "got: {err}");
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].backend, BackendKind::Vector);

    assert!(text.get("c1").await.is_ok());
    assert!(graph.get_node("c1-ada").await.is_ok());

    vector.mark_healthy();
    assert!(vector.get_by_id("c1").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn empty_embedding_fails_only_the_vector_write() {
    let text = Arc::new(TextIndex::in_memory());
    let coordinator = ViewCoordinator::new(
        Arc::new(VectorIndex::in_memory()),
        Arc::new(GraphIndex::in_memory()),
        text.clone(),
    );

    let err = coordinator
        .store_chunk(&plain_chunk("c1", "no embedding yet", Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(err.failures()[0].backend, BackendKind::Vector);
    assert!(err.failures()[0].message.contains("validation"));
    assert_eq!(text.document_count().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_view_times_out_without_blocking_others() {
    let budget = Duration::from_millis(100);
    let vector = Arc::new(VectorIndex::in_memory());
    let coordinator = ViewCoordinator::new(
        vector.clone(),
        Arc::new(GraphIndex::in_memory()),
        Arc::new(MockBackend::slow(BackendKind::Text, Duration::from_secs(30))),
    )
    .with_timeout(budget);

    let started = tokio::time::Instant::now();
    let err = coordinator.store_chunk(&ada_chunk("c1")).await.unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(30));
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].backend, BackendKind::Text);
    assert!(err.failures()[0].message.contains("timed out"));
    assert_eq!(vector.count().await.unwrap(), 1);

    let results = coordinator
        .retrieve_multi_view("ada", &[0.9, 0.1, 0.0], &RetrievalOptions::default())
        .await;
    assert_eq!(results.vector.len(), 1);
    assert!(results.text.is_empty());
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].backend, BackendKind::Text);
}

#[tokio::test(start_paused = true)]
async fn stats_survive_a_stalled_view() {
    let coordinator = ViewCoordinator::new(
        Arc::new(VectorIndex::in_memory()),
        Arc::new(MockBackend::slow(BackendKind::Graph, Duration::from_secs(60))),
        Arc::new(TextIndex::in_memory()),
    )
    .with_timeout(Duration::from_millis(50));

    let stats = coordinator.get_stats().await;
    assert!(stats.vector.healthy);
    assert!(stats.text.healthy);
    assert!(!stats.graph.healthy);
}

#[tokio::test]
async fn file_backed_views_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PolymemConfig::default();
    config.storage.data_dir = dir.path().join("data").display().to_string();

    {
        let coordinator = ViewCoordinator::from_config(&config).await.unwrap();
        coordinator.store_chunk(&ada_chunk("c1")).await.unwrap();
        coordinator.store_chunk(&ml_chunk("c2")).await.unwrap();
        coordinator.delete_chunk("c2").await.unwrap();
        coordinator.close().await.unwrap();
    }

    assert!(config.storage.vector_path().exists());
    assert!(config.storage.graph_path().exists());
    assert!(config.storage.text_path().exists());

    let reopened = ViewCoordinator::from_config(&config).await.unwrap();
    let stats = reopened.get_stats().await;
    assert_eq!(stats.vector.vectors, 1);
    assert_eq!(stats.graph.nodes, 2);
    assert_eq!(stats.text.documents, 1);
    assert!(stats.all_healthy());

    let options = RetrievalOptions {
        include_graph: true,
        highlight: true,
        ..RetrievalOptions::default()
    };
    let results = reopened.retrieve_multi_view("lovelace", &[], &options).await;
    assert_eq!(results.text.len(), 1);
    let snippet = results.text[0].highlights[0].to_lowercase();
    assert!(snippet.contains("<em>lovelace</em>"), "got: {snippet}");
    assert_eq!(results.graph.len(), 1);
}

#[tokio::test]
async fn metadata_filters_reach_vector_and_text() {
    let coordinator = ViewCoordinator::new(
        Arc::new(VectorIndex::in_memory()),
        Arc::new(GraphIndex::in_memory()),
        Arc::new(TextIndex::in_memory()),
    );
    coordinator.store_chunk(&ada_chunk("c1")).await.unwrap();
    coordinator.store_chunk(&ml_chunk("c2")).await.unwrap();

    let mut filters = polymem_core::Metadata::new();
    filters.insert("topic".into(), "ai".into());
    let options = RetrievalOptions {
        filters: Some(filters),
        ..RetrievalOptions::default()
    };
    let results = coordinator
        .retrieve_multi_view("learning algorithm", &[1.0, 0.0, 0.0], &options)
        .await;
    let vector_ids: Vec<&str> = results.vector.iter().map(|m| m.id.as_str()).collect();
    let text_ids: Vec<&str> = results.text.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(vector_ids, vec!["c2"]);
    assert_eq!(text_ids, vec!["c2"]);
}
