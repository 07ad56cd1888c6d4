// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unit of ingestion: a chunk of content with its extracted facts.

use serde::{Deserialize, Serialize};

use crate::types::{Document, Metadata, Node, NodeType, PropertyValue, VectorRecord};

/// Property linking a graph node back to the chunk it was extracted from.
pub const CHUNK_ID_PROPERTY: &str = "chunk_id";

/// One piece of content as produced by the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

/// A named thing mentioned in a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    /// Free-form category from the extractor, e.g. "person".
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub confidence: f64,
}

/// A subject/predicate/object statement extracted from a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
}

impl Chunk {
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding,
            metadata: Metadata::new(),
            entities: Vec::new(),
            claims: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// The vector-view record for this chunk.
    pub fn vector_record(&self) -> VectorRecord {
        VectorRecord {
            id: self.id.clone(),
            embedding: self.embedding.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// The text-view document for this chunk.
    pub fn document(&self) -> Document {
        Document {
            id: self.id.clone(),
            content: self.content.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Graph nodes for every entity, then every claim, tagged with this chunk's id.
    pub fn graph_nodes(&self) -> Vec<Node> {
        self.entities
            .iter()
            .map(|e| e.to_node(&self.id))
            .chain(self.claims.iter().map(|c| c.to_node(&self.id)))
            .collect()
    }
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            confidence: 1.0,
        }
    }

    pub fn to_node(&self, chunk_id: &str) -> Node {
        Node::new(&self.id, NodeType::Entity)
            .with_property("name", self.name.as_str())
            .with_property("entity_type", self.entity_type.as_str())
            .with_property("confidence", self.confidence)
            .with_property(CHUNK_ID_PROPERTY, chunk_id)
    }
}

impl Claim {
    pub fn to_node(&self, chunk_id: &str) -> Node {
        let evidence: Vec<PropertyValue> = self
            .evidence
            .iter()
            .map(|e| PropertyValue::from(e.as_str()))
            .collect();
        Node::new(&self.id, NodeType::Claim)
            .with_property("subject", self.subject.as_str())
            .with_property("predicate", self.predicate.as_str())
            .with_property("object", self.object.as_str())
            .with_property("confidence", self.confidence)
            .with_property("evidence", PropertyValue::List(evidence))
            .with_property(CHUNK_ID_PROPERTY, chunk_id)
    }
}
