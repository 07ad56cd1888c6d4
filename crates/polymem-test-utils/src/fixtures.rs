// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chunk fixtures.

use polymem_core::{Chunk, Claim, Entity, PropertyValue};

/// A chunk about Ada Lovelace with one entity and one claim.
///
/// Node ids are prefixed with the chunk id so several fixtures can share a graph.
pub fn ada_chunk(id: &str) -> Chunk {
    let mut chunk = Chunk::new(
        id,
        "Ada Lovelace wrote the first published algorithm for the Analytical Engine",
        vec![0.9, 0.1, 0.0],
    )
    .with_entity(Entity::new(format!("{id}-ada"), "Ada Lovelace", "person"))
    .with_claim(Claim {
        id: format!("{id}-claim"),
        subject: "Ada Lovelace".into(),
        predicate: "wrote".into(),
        object: "first algorithm".into(),
        confidence: 0.9,
        evidence: vec![id.to_string()],
    });
    chunk
        .metadata
        .insert("topic".into(), PropertyValue::from("computing"));
    chunk
}

/// A chunk about machine learning with one entity and no claims.
pub fn ml_chunk(id: &str) -> Chunk {
    let mut chunk = Chunk::new(
        id,
        "Machine learning models learn patterns from data",
        vec![0.0, 0.2, 0.9],
    )
    .with_entity(Entity::new(format!("{id}-ml"), "Machine Learning", "field"));
    chunk
        .metadata
        .insert("topic".into(), PropertyValue::from("ai"));
    chunk
}

/// A chunk with content and embedding but no extracted facts.
pub fn plain_chunk(id: &str, content: &str, embedding: Vec<f32>) -> Chunk {
    Chunk::new(id, content, embedding)
}
