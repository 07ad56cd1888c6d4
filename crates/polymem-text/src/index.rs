// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory inverted index with optional JSON file persistence.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use polymem_core::types::{Document, SearchHit, SearchOptions, SearchResults, SortField, SortOrder};
use polymem_core::{
    BackendAdapter, BackendKind, HealthStatus, JsonFile, Lifecycle, PolymemError, TextBackend,
    matches_filters,
};

use crate::highlight::snippet;
use crate::tokenizer::{tokenize, unique_terms};

/// Characters kept on each side of a highlighted term.
pub const DEFAULT_SNIPPET_RADIUS: usize = 20;

#[derive(Debug, Default)]
struct TextState {
    documents: HashMap<String, Document>,
    postings: HashMap<String, HashSet<String>>,
}

impl TextState {
    fn add_postings(&mut self, doc: &Document) {
        for token in tokenize(&doc.content) {
            self.postings.entry(token).or_default().insert(doc.id.clone());
        }
    }

    fn remove_postings(&mut self, doc: &Document) {
        for token in tokenize(&doc.content) {
            if let Some(ids) = self.postings.get_mut(&token) {
                ids.remove(&doc.id);
                if ids.is_empty() {
                    self.postings.remove(&token);
                }
            }
        }
    }

    fn upsert(&mut self, doc: Document) {
        if let Some(previous) = self.documents.remove(&doc.id) {
            self.remove_postings(&previous);
        }
        self.add_postings(&doc);
        self.documents.insert(doc.id.clone(), doc);
    }

    fn remove(&mut self, id: &str) -> Option<Document> {
        let doc = self.documents.remove(id)?;
        self.remove_postings(&doc);
        Some(doc)
    }

    /// Current version of each id, for undoing a write.
    fn undo_log<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(String, Option<Document>)> {
        ids.into_iter()
            .map(|id| (id.to_string(), self.documents.get(id).cloned()))
            .collect()
    }

    fn restore(&mut self, undo: Vec<(String, Option<Document>)>) {
        for (id, previous) in undo.into_iter().rev() {
            self.remove(&id);
            if let Some(doc) = previous {
                self.upsert(doc);
            }
        }
    }
}

/// On-disk layout: `{"documents": {id: Document}, "inverted_index": {token: [id, ...]}}`.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    documents: BTreeMap<String, Document>,
    #[serde(default)]
    inverted_index: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    documents: BTreeMap<&'a str, &'a Document>,
    inverted_index: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

impl<'a> From<&'a TextState> for SnapshotRef<'a> {
    fn from(state: &'a TextState) -> Self {
        Self {
            documents: state.documents.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            inverted_index: state
                .postings
                .iter()
                .map(|(token, ids)| (token.as_str(), ids.iter().map(String::as_str).collect()))
                .collect(),
        }
    }
}

/// Keyword search engine over an inverted index.
///
/// Scoring is a plain term-overlap count: one point per distinct query term
/// present in the document. There is no term-frequency or length weighting.
pub struct TextIndex {
    state: RwLock<TextState>,
    file: Option<JsonFile>,
    lifecycle: Lifecycle,
    snippet_radius: usize,
}

impl TextIndex {
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(TextState::default()),
            file: None,
            lifecycle: Lifecycle::new(BackendKind::Text),
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
        }
    }

    /// Creates an index persisted at `path`. Nothing is read until [`TextIndex::load`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(JsonFile::new(path)),
            ..Self::in_memory()
        }
    }

    /// Sets how many characters surround each highlighted term.
    pub fn with_snippet_radius(mut self, radius: usize) -> Self {
        self.snippet_radius = radius;
        self
    }

    /// Replaces the in-memory index with the persisted one.
    ///
    /// Postings are taken from the file; a file without them (or with none at
    /// all while documents exist) gets its postings rebuilt from content.
    /// Returns the number of documents loaded.
    pub async fn load(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut state = self.state.write().await;
        let Some(file) = &self.file else {
            return Ok(state.documents.len());
        };

        let snapshot: Snapshot = file.load().await?;
        let mut loaded = TextState {
            documents: snapshot
                .documents
                .into_iter()
                .map(|(id, mut doc)| {
                    doc.id.clone_from(&id);
                    (id, doc)
                })
                .collect(),
            postings: snapshot
                .inverted_index
                .into_iter()
                .filter(|(_, ids)| !ids.is_empty())
                .map(|(token, ids)| (token, ids.into_iter().collect()))
                .collect(),
        };
        if loaded.postings.is_empty() && !loaded.documents.is_empty() {
            let docs: Vec<Document> = loaded.documents.values().cloned().collect();
            for doc in &docs {
                loaded.add_postings(doc);
            }
        }
        *state = loaded;
        info!(path = %file.path().display(), count = state.documents.len(), "text index loaded");
        Ok(state.documents.len())
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

    async fn persist(&self, state: &TextState) -> Result<(), PolymemError> {
        match &self.file {
            Some(file) => file.save(&SnapshotRef::from(state)).await,
            None => Ok(()),
        }
    }

    /// Persists a mutation, putting back the documents in `undo` if the write fails.
    async fn commit(
        &self,
        state: &mut TextState,
        undo: Vec<(String, Option<Document>)>,
    ) -> Result<(), PolymemError> {
        let result = self.persist(state).await;
        if let Err(e) = &result {
            warn!(error = %e, count = undo.len(), "text write not persisted, rolled back");
            state.restore(undo);
        }
        result
    }

    fn run_query(&self, state: &TextState, query: &str, options: &SearchOptions) -> SearchResults {
        let terms = unique_terms(query);
        if terms.is_empty() {
            return SearchResults::default();
        }

        let mut scores: HashMap<&str, f64> = HashMap::new();
        for term in &terms {
            if let Some(ids) = state.postings.get(term) {
                for id in ids {
                    *scores.entry(id.as_str()).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut matched: Vec<(&Document, f64)> = scores
            .into_iter()
            .filter(|(_, score)| *score >= options.min_score)
            .filter_map(|(id, score)| state.documents.get(id).map(|doc| (doc, score)))
            .filter(|(doc, _)| matches_filters(&doc.metadata, options.filters.as_ref()))
            .collect();

        matched.sort_by(|(a, a_score), (b, b_score)| match options.sort_by {
            SortField::Score => {
                let by_score = a_score.partial_cmp(b_score).unwrap_or(Ordering::Equal);
                let by_score = match options.sort_order {
                    SortOrder::Desc => by_score.reverse(),
                    SortOrder::Asc => by_score,
                };
                by_score.then_with(|| a.id.cmp(&b.id))
            }
            SortField::Id => match options.sort_order {
                SortOrder::Desc => b.id.cmp(&a.id),
                SortOrder::Asc => a.id.cmp(&b.id),
            },
        });

        let total = matched.len();
        let take = if options.limit == 0 { usize::MAX } else { options.limit };
        let hits = matched
            .into_iter()
            .skip(options.offset)
            .take(take)
            .map(|(doc, score)| {
                let highlights = if options.highlight {
                    terms
                        .iter()
                        .filter(|term| {
                            state
                                .postings
                                .get(*term)
                                .is_some_and(|ids| ids.contains(&doc.id))
                        })
                        .filter_map(|term| snippet(&doc.content, term, self.snippet_radius))
                        .collect()
                } else {
                    Vec::new()
                };
                SearchHit {
                    id: doc.id.clone(),
                    score,
                    content: doc.content.clone(),
                    metadata: doc.metadata.clone(),
                    highlights,
                }
            })
            .collect();

        SearchResults { hits, total }
    }
}

fn validate_document(doc: &Document) -> Result<(), PolymemError> {
    if doc.id.trim().is_empty() {
        return Err(PolymemError::Validation("document id must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl BackendAdapter for TextIndex {
    fn name(&self) -> &str {
        "text-index"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Text
    }

    async fn health_check(&self) -> Result<HealthStatus, PolymemError> {
        self.lifecycle.health()
    }

    async fn close(&self) -> Result<(), PolymemError> {
        let _state = self.state.write().await;
        self.lifecycle.close()?;
        debug!("text index closed");
        Ok(())
    }
}

#[async_trait]
impl TextBackend for TextIndex {
    async fn index(&self, document: Document) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_document(&document)?;

        let mut state = self.state.write().await;
        let undo = state.undo_log([document.id.as_str()]);
        debug!(id = %document.id, bytes = document.content.len(), "document indexed");
        state.upsert(document);
        self.commit(&mut state, undo).await
    }

    async fn update(&self, document: Document) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        validate_document(&document)?;

        let mut state = self.state.write().await;
        if !state.documents.contains_key(&document.id) {
            return Err(PolymemError::not_found("document", document.id));
        }
        let undo = state.undo_log([document.id.as_str()]);
        debug!(id = %document.id, "document updated");
        state.upsert(document);
        self.commit(&mut state, undo).await
    }

    async fn delete(&self, id: &str) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        let mut state = self.state.write().await;
        let undo = state.undo_log([id]);
        if state.remove(id).is_none() {
            return Err(PolymemError::not_found("document", id));
        }
        debug!(id, "document deleted");
        self.commit(&mut state, undo).await
    }

    async fn batch_index(&self, documents: Vec<Document>) -> Result<(), PolymemError> {
        self.lifecycle.ensure_available()?;
        for doc in &documents {
            validate_document(doc)?;
        }

        let mut state = self.state.write().await;
        let undo = state.undo_log(documents.iter().map(|doc| doc.id.as_str()));
        let count = documents.len();
        for doc in documents {
            state.upsert(doc);
        }
        debug!(count, "document batch indexed");
        self.commit(&mut state, undo).await
    }

    async fn get(&self, id: &str) -> Result<Document, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        state
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| PolymemError::not_found("document", id))
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResults, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        Ok(self.run_query(&state, query, options))
    }

    async fn suggest(
        &self,
        prefix: &str,
        field: &str,
        size: usize,
    ) -> Result<Vec<String>, PolymemError> {
        self.lifecycle.ensure_available()?;
        if !field.is_empty() && field != "content" {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_lowercase();
        let state = self.state.read().await;
        let mut tokens: Vec<String> = state
            .postings
            .keys()
            .filter(|token| token.starts_with(&prefix))
            .cloned()
            .collect();
        tokens.sort();
        if size > 0 {
            tokens.truncate(size);
        }
        Ok(tokens)
    }

    async fn multi_search(
        &self,
        queries: &[String],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResults>, PolymemError> {
        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            results.push(self.search(query, options).await?);
        }
        Ok(results)
    }

    async fn document_count(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        Ok(self.state.read().await.documents.len())
    }

    async fn index_size(&self) -> Result<usize, PolymemError> {
        self.lifecycle.ensure_available()?;
        let state = self.state.read().await;
        Ok(state.documents.values().map(|doc| doc.content.len()).sum())
    }
}
