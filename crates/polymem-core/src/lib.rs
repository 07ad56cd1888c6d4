// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the polymem retrieval engine.
//!
//! This crate provides the backend trait definitions, the error taxonomy, and
//! the domain types shared by the vector, graph, and text views and by the
//! coordinator that fans out across them.

pub mod chunk;
pub mod error;
pub mod lifecycle;
pub mod persist;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use chunk::{CHUNK_ID_PROPERTY, Chunk, Claim, Entity};
pub use error::{BackendFailure, PolymemError};
pub use lifecycle::Lifecycle;
pub use persist::JsonFile;
pub use types::{BackendKind, HealthStatus, Metadata, PropertyValue, matches_filters};

pub use traits::{BackendAdapter, GraphBackend, TextBackend, VectorBackend};
