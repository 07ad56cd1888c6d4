// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the three storage views and the coordinator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A dynamically typed property or metadata value.
///
/// Serialized untagged, so a mapping of these reads and writes as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Returns the inner string for [`PropertyValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner number for [`PropertyValue::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        PropertyValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// String-keyed property mapping. Ordered so serialization is deterministic.
pub type Metadata = BTreeMap<String, PropertyValue>;

/// Returns true when every filter key is present in `metadata` with an equal value.
///
/// `None` and empty filters match everything.
pub fn matches_filters(metadata: &Metadata, filters: Option<&Metadata>) -> bool {
    filters.is_none_or(|filters| {
        filters
            .iter()
            .all(|(key, expected)| metadata.get(key) == Some(expected))
    })
}

/// Health status reported by backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational.
    Healthy,
    /// Backend is operational but experiencing issues.
    Degraded(String),
    /// Backend is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Identifies one of the three storage views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Vector,
    Graph,
    Text,
}

// --- Vector types ---

/// A stored embedding with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            embedding,
            metadata: Metadata::new(),
        }
    }
}

/// A vector search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorMatch {
    pub id: String,
    /// Cosine similarity to the query.
    pub score: f64,
    pub metadata: Metadata,
}

// --- Graph types ---

/// Kind of fact a graph node represents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Entity,
    Claim,
    Event,
    Task,
    Conversation,
    Document,
    Chunk,
    Concept,
}

/// Relationship carried by a graph edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    RelatedTo,
    Supports,
    Contradicts,
    PartOf,
    TemporalNext,
    Causes,
    Mentions,
    DerivedFrom,
}

/// A typed graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub properties: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            node_type,
            properties: Metadata::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// A directed, weighted graph edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Traversal cost.
    pub weight: f64,
    #[serde(default)]
    pub properties: Metadata,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        edge_type: EdgeType,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            edge_type,
            weight,
            properties: Metadata::new(),
            created_at: Utc::now(),
        }
    }
}

/// A path through the graph: node ids, the edges connecting them, and the summed weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
    pub weight: f64,
}

/// A group of nodes reported by community detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Community {
    pub id: String,
    pub members: Vec<String>,
    pub score: f64,
    pub summary: String,
}

/// Bounds for neighbor and path queries. Zero means "no limit".
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    pub max_depth: usize,
    pub max_results: usize,
    /// Restrict neighbor results to these node types. Empty means any type.
    pub node_types: Vec<NodeType>,
}

/// Power-iteration parameters for PageRank.
#[derive(Debug, Clone, Copy)]
pub struct PageRankOptions {
    /// Damping factor (alpha).
    pub damping: f64,
    /// Convergence threshold on the largest per-node change.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

// --- Text types ---

/// A searchable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }
}

/// Field used to order text search hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    #[default]
    Score,
    Id,
}

/// Direction of the text search ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Options for a text search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Page size. Zero means no cap.
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub filters: Option<Metadata>,
    /// Generate highlighted snippets for each hit.
    pub highlight: bool,
    /// Drop hits scoring below this value.
    pub min_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            sort_by: SortField::Score,
            sort_order: SortOrder::Desc,
            filters: None,
            highlight: false,
            min_score: 0.0,
        }
    }
}

/// A single text search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    /// Number of distinct query terms the document matched.
    pub score: f64,
    pub content: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// One page of text search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    /// Number of matching documents before pagination.
    pub total: usize,
}
