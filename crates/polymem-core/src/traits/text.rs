// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword search view.

use async_trait::async_trait;

use crate::error::PolymemError;
use crate::traits::adapter::BackendAdapter;
use crate::types::{Document, SearchOptions, SearchResults};

/// Stores documents behind an inverted index and answers ranked keyword queries.
#[async_trait]
pub trait TextBackend: BackendAdapter {
    /// Indexes a document, replacing any previous version with the same id.
    async fn index(&self, document: Document) -> Result<(), PolymemError>;

    /// Re-indexes an existing document.
    async fn update(&self, document: Document) -> Result<(), PolymemError>;

    async fn delete(&self, id: &str) -> Result<(), PolymemError>;

    async fn batch_index(&self, documents: Vec<Document>) -> Result<(), PolymemError>;

    async fn get(&self, id: &str) -> Result<Document, PolymemError>;

    /// Ranked keyword search. An empty or whitespace-only query yields no hits.
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResults, PolymemError>;

    /// Indexed tokens starting with `prefix`, alphabetical, at most `size` (0 = all).
    async fn suggest(
        &self,
        prefix: &str,
        field: &str,
        size: usize,
    ) -> Result<Vec<String>, PolymemError>;

    /// Runs each query in order. The first failure aborts the whole call.
    async fn multi_search(
        &self,
        queries: &[String],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResults>, PolymemError>;

    async fn document_count(&self) -> Result<usize, PolymemError>;

    /// Total byte length of indexed content.
    async fn index_size(&self) -> Result<usize, PolymemError>;
}
