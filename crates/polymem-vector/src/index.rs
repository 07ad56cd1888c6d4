// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory vector index with optional JSON file persistence.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use polymem_core::types::{VectorMatch, VectorRecord};
use polymem_core::{
    BackendAdapter, BackendKind, HealthStatus, JsonFile, Lifecycle, Metadata, PolymemError,
    VectorBackend, matches_filters,
};

use crate::similarity::cosine_similarity;

/// Brute-force cosine-similarity index.
///
/// All records live in one map behind a reader/writer lock. When opened
/// against a file, every successful mutation rewrites the whole file as a flat
/// `{id: record}` JSON object. Loading is explicit via [`VectorIndex::load`].
pub struct VectorIndex {
    records: RwLock<HashMap<String, VectorRecord>>,
    file: Option<JsonFile>,
    lifecycle: Lifecycle,
}

impl VectorIndex {
    /// Creates an index that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            file: None,
            lifecycle: Lifecycle::new(BackendKind::Vector),
        }
    }

    /// Creates an index persisted at `path`. Nothing is read until [`VectorIndex::load`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(JsonFile::new(path)),
            ..Self::in_memory()
        }
    }

    /// Replaces the in-memory state with the persisted file's contents.
    ///
    /// Returns the number of records loaded.
    pub async fn load(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut records = self.records.write().await;
        let Some(file) = &self.file else {
            return Ok(records.len());
        };

        let loaded: BTreeMap<String, VectorRecord> = file.load().await?;
        *records = loaded
            .into_iter()
            .map(|(id, mut record)| {
                record.id.clone_from(&id);
                (id, record)
            })
            .collect();
        info!(path = %file.path().display(), count = records.len(), "vector index loaded");
        Ok(records.len())
    }

    /// Writes the current state to the backing file, if any.
    pub async fn save(&self) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let records = self.records.read().await;
        self.persist(&records).await
    }

    /// Puts the index into a recoverable degraded state; every call fails until
    /// [`VectorIndex::mark_healthy`].
    pub fn mark_unhealthy(&self, reason: impl Into<String>) {
        self.lifecycle.mark_unhealthy(reason);
    }

    pub fn mark_healthy(&self) {
        self.lifecycle.mark_healthy();
    }

    async fn persist(&self, records: &HashMap<String, VectorRecord>) -> Result<(), PolymemError> {
        match &self.file {
            Some(file) => {
                let ordered: BTreeMap<&String, &VectorRecord> = records.iter().collect();
                file.save(&ordered).await
            }
            None => Ok(()),
        }
    }

    /// Persists a mutation, putting back the records in `undo` if the write fails.
    async fn commit(
        &self,
        records: &mut HashMap<String, VectorRecord>,
        undo: Undo,
    ) -> Result<(), PolymemError> {
        let result = self.persist(records).await;
        if let Err(e) = &result {
            warn!(error = %e, count = undo.len(), "vector write not persisted, rolled back");
            for (id, previous) in undo.into_iter().rev() {
                match previous {
                    Some(record) => records.insert(id, record),
                    None => records.remove(&id),
                };
            }
        }
        result
    }
}

/// Prior state of each id touched by a write.
type Undo = Vec<(String, Option<VectorRecord>)>;

fn undo_log<'a>(
    records: &HashMap<String, VectorRecord>,
    ids: impl IntoIterator<Item = &'a str>,
) -> Undo {
    ids.into_iter()
        .map(|id| (id.to_string(), records.get(id).cloned()))
        .collect()
}

fn validate_record(id: &str, embedding: &[f32]) -> Result<(), PolymemError> {
    if id.trim().is_empty() {
        return Err(PolymemError::Validation("vector id must not be empty".into()));
    }
    if embedding.is_empty() {
        return Err(PolymemError::Validation(format!(
            "embedding for `{id}` must not be empty"
        )));
    }
    if embedding.iter().any(|x| !x.is_finite()) {
        return Err(PolymemError::Validation(format!(
            "embedding for `{id}` contains non-finite values"
        )));
    }
    Ok(())
}

#[async_trait]
impl BackendAdapter for VectorIndex {
    fn name(&self) -> &str {
        "vector-index"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Vector
    }

    async fn health_check(&self) -> Result<HealthStatus, PolymemError> {
        self.lifecycle.health()
    }

    async fn close(&self) -> Result<(), PolymemError> {
        // Wait out in-flight writers before refusing further calls.
        let _records = self.records.write().await;
        self.lifecycle.close()?;
        debug!("vector index closed");
        Ok(())
    }
}

#[async_trait]
impl VectorBackend for VectorIndex {
    async fn store(
        &self,
        id: &str,
        embedding: Vec<f32>,
        metadata: Option<Metadata>,
    ) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_record(id, &embedding)?;

        let mut records = self.records.write().await;
        let undo = undo_log(&records, [id]);
        records.insert(
            id.to_string(),
            VectorRecord {
                id: id.to_string(),
                embedding,
                metadata: metadata.unwrap_or_default(),
            },
        );
        debug!(id, "vector stored");
        self.commit(&mut records, undo).await
    }

    async fn search(
        &self,
        query: &[f32],
        k: usize,
        filters: Option<&Metadata>,
    ) -> Result<Vec<VectorMatch>, PolymemError> {
        self.lifecycle.ensure_available()?;
        let records = self.records.read().await;

        let mut results: Vec<VectorMatch> = records
            .values()
            .filter(|record| matches_filters(&record.metadata, filters))
            .map(|record| VectorMatch {
                id: record.id.clone(),
                score: cosine_similarity(query, &record.embedding),
                metadata: record.metadata.clone(),
            })
            .collect();

        // Sort by similarity descending
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        if k > 0 {
            results.truncate(k);
        }

        Ok(results)
    }

    async fn get_by_id(&self, id: &str) -> Result<VectorRecord, PolymemError> {
        self.lifecycle.ensure_available()?;
        let records = self.records.read().await;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| PolymemError::not_found("vector", id))
    }

    async fn delete(&self, id: &str) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut records = self.records.write().await;
        let undo = undo_log(&records, [id]);
        if records.remove(id).is_none() {
            return Err(PolymemError::not_found("vector", id));
        }
        debug!(id, "vector deleted");
        self.commit(&mut records, undo).await
    }

    async fn update(&self, id: &str, metadata: Metadata) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut records = self.records.write().await;
        let undo = undo_log(&records, [id]);
        let record = records
            .get_mut(id)
            .ok_or_else(|| PolymemError::not_found("vector", id))?;
        record.metadata = metadata;
        debug!(id, "vector metadata updated");
        self.commit(&mut records, undo).await
    }

    async fn batch_store(&self, batch: Vec<VectorRecord>) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        for record in &batch {
            validate_record(&record.id, &record.embedding)?;
        }

        let mut records = self.records.write().await;
        let undo = undo_log(&records, batch.iter().map(|record| record.id.as_str()));
        let count = batch.len();
        for record in batch {
            records.insert(record.id.clone(), record);
        }
        debug!(count, "vector batch stored");
        self.commit(&mut records, undo).await
    }

    async fn count(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use polymem_core::PropertyValue;

    use super::*;

    fn meta(key: &str, value: &str) -> Metadata {
        let mut m = Metadata::new();
        m.insert(key.to_string(), PropertyValue::from(value));
        m
    }

    async fn seeded() -> VectorIndex {
        let index = VectorIndex::in_memory();
        index.store("x", vec![1.0, 0.0], Some(meta("lang", "en"))).await.unwrap();
        index.store("y", vec![0.7, 0.7], Some(meta("lang", "fr"))).await.unwrap();
        index.store("z", vec![0.0, 1.0], None).await.unwrap();
        index
    }

    #[tokio::test]
    async fn store_and_get_by_id() {
        let index = seeded().await;
        let record = index.get_by_id("x").await.unwrap();
        assert_eq!(record.embedding, vec![1.0, 0.0]);
        assert_eq!(record.metadata.get("lang"), Some(&PropertyValue::from("en")));

        let z = index.get_by_id("z").await.unwrap();
        assert!(z.metadata.is_empty(), "None metadata should become an empty map");
    }

    #[tokio::test]
    async fn store_overwrites_wholesale() {
        let index = seeded().await;
        index.store("x", vec![0.0, 2.0], None).await.unwrap();
        let record = index.get_by_id("x").await.unwrap();
        assert_eq!(record.embedding, vec![0.0, 2.0]);
        assert!(record.metadata.is_empty());
        assert_eq!(index.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let index = seeded().await;
        let results = index.search(&[1.0, 0.0], 2, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "x");
        assert_eq!(results[1].id, "y");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn search_with_zero_k_returns_all() {
        let index = seeded().await;
        assert_eq!(index.search(&[1.0, 0.0], 0, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_applies_filters() {
        let index = seeded().await;
        let filters = meta("lang", "fr");
        let results = index.search(&[1.0, 0.0], 10, Some(&filters)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "y");
    }

    #[tokio::test]
    async fn search_with_mismatched_dimensions_scores_zero() {
        let index = seeded().await;
        let results = index.search(&[1.0, 0.0, 0.0], 10, None).await.unwrap();
        assert!(results.iter().all(|m| m.score == 0.0));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let index = VectorIndex::in_memory();
        assert!(index.get_by_id("nope").await.unwrap_err().is_not_found());
        assert!(index.delete("nope").await.unwrap_err().is_not_found());
        assert!(index.update("nope", Metadata::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_metadata_only() {
        let index = seeded().await;
        index.update("x", meta("lang", "de")).await.unwrap();
        let record = index.get_by_id("x").await.unwrap();
        assert_eq!(record.embedding, vec![1.0, 0.0]);
        assert_eq!(record.metadata, meta("lang", "de"));
    }

    #[tokio::test]
    async fn invalid_records_are_rejected() {
        let index = VectorIndex::in_memory();
        assert!(matches!(
            index.store("", vec![1.0], None).await,
            Err(PolymemError::Validation(_))
        ));
        assert!(matches!(
            index.store("a", vec![], None).await,
            Err(PolymemError::Validation(_))
        ));
        assert!(matches!(
            index.store("a", vec![f32::NAN], None).await,
            Err(PolymemError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn batch_store_is_all_or_nothing_on_validation() {
        let index = VectorIndex::in_memory();
        let batch = vec![VectorRecord::new("a", vec![1.0]), VectorRecord::new("", vec![1.0])];
        assert!(index.batch_store(batch).await.is_err());
        assert_eq!(index.count().await.unwrap(), 0);

        let batch = vec![VectorRecord::new("a", vec![1.0]), VectorRecord::new("b", vec![2.0])];
        index.batch_store(batch).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn closed_index_rejects_everything() {
        let index = seeded().await;
        index.close().await.unwrap();
        assert!(matches!(index.count().await, Err(PolymemError::Closed { .. })));
        assert!(matches!(
            index.store("a", vec![1.0], None).await,
            Err(PolymemError::Closed { .. })
        ));
        assert!(matches!(index.health_check().await, Err(PolymemError::Closed { .. })));
    }

    #[tokio::test]
    async fn unhealthy_index_rejects_until_recovered() {
        let index = seeded().await;
        index.mark_unhealthy("forced");
        assert!(matches!(
            index.store("a", vec![1.0], None).await,
            Err(PolymemError::Unhealthy { .. })
        ));
        index.mark_healthy();
        index.store("a", vec![1.0], None).await.unwrap();
    }

    #[tokio::test]
    async fn file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.json");

        let index = VectorIndex::open(&path);
        index.store("x", vec![1.0, 0.5], Some(meta("lang", "en"))).await.unwrap();
        index.store("y", vec![0.0, 1.0], None).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["x"]["id"], "x");
        assert_eq!(raw["x"]["metadata"]["lang"], "en");
        assert!(raw.get("records").is_none(), "layout should be a flat id map");

        let reopened = VectorIndex::open(&path);
        assert_eq!(reopened.count().await.unwrap(), 0, "open must not load implicitly");
        assert_eq!(reopened.load().await.unwrap(), 2);
        assert_eq!(reopened.get_by_id("x").await.unwrap().embedding, vec![1.0, 0.5]);
    }

    #[tokio::test]
    async fn failed_write_leaves_records_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let index = VectorIndex::open(sub.join("vectors.json"));
        index.store("x", vec![1.0, 0.0], Some(meta("lang", "en"))).await.unwrap();

        // A regular file where the parent directory should be makes every save fail.
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "").unwrap();

        let err = index.store("y", vec![0.0, 1.0], None).await.unwrap_err();
        assert!(matches!(err, PolymemError::Storage { .. }), "got: {err:?}");
        assert!(matches!(index.get_by_id("y").await, Err(PolymemError::NotFound { .. })));

        assert!(index.update("x", meta("lang", "fr")).await.is_err());
        assert!(index.delete("x").await.is_err());
        let batch = vec![
            VectorRecord {
                id: "x".to_string(),
                embedding: vec![0.5, 0.5],
                metadata: Metadata::new(),
            },
            VectorRecord {
                id: "z".to_string(),
                embedding: vec![0.2, 0.8],
                metadata: Metadata::new(),
            },
        ];
        assert!(index.batch_store(batch).await.is_err());

        let x = index.get_by_id("x").await.unwrap();
        assert_eq!(x.embedding, vec![1.0, 0.0]);
        assert_eq!(x.metadata, meta("lang", "en"));
        assert_eq!(index.count().await.unwrap(), 1);
    }
}
