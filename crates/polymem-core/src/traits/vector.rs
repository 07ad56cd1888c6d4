// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector similarity view.

use async_trait::async_trait;

use crate::error::PolymemError;
use crate::traits::adapter::BackendAdapter;
use crate::types::{Metadata, VectorMatch, VectorRecord};

/// Stores embeddings and answers k-nearest-neighbor queries by cosine similarity.
#[async_trait]
pub trait VectorBackend: BackendAdapter {
    /// Upserts a record. `None` metadata is stored as an empty mapping.
    async fn store(
        &self,
        id: &str,
        embedding: Vec<f32>,
        metadata: Option<Metadata>,
    ) -> Result<(), PolymemError>;

    /// Returns the top `k` records by descending similarity (`k == 0` means all).
    ///
    /// Only records whose metadata satisfies every filter are considered.
    /// Ties are returned in no particular order.
    async fn search(
        &self,
        query: &[f32],
        k: usize,
        filters: Option<&Metadata>,
    ) -> Result<Vec<VectorMatch>, PolymemError>;

    async fn get_by_id(&self, id: &str) -> Result<VectorRecord, PolymemError>;

    async fn delete(&self, id: &str) -> Result<(), PolymemError>;

    /// Replaces the metadata of an existing record. The embedding is untouched.
    async fn update(&self, id: &str, metadata: Metadata) -> Result<(), PolymemError>;

    async fn batch_store(&self, records: Vec<VectorRecord>) -> Result<(), PolymemError>;

    async fn count(&self) -> Result<usize, PolymemError>;
}
