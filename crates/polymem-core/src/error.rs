// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the polymem retrieval engine.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::types::BackendKind;

/// The primary error type used across all backend traits and coordinator operations.
#[derive(Debug, Error)]
pub enum PolymemError {
    /// The backend was closed; every later call fails with this error.
    #[error("{backend} backend is closed")]
    Closed { backend: BackendKind },

    /// The backend is in a recoverable degraded state.
    #[error("{backend} backend is unhealthy: {reason}")]
    Unhealthy { backend: BackendKind, reason: String },

    /// Malformed input. Never worth retrying.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A record with the same identity already exists.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    /// An edge references a node that does not exist. Nothing was stored.
    #[error("edge {edge} references missing node {missing}")]
    Referential { edge: String, missing: String },

    /// Some, but not all, of a fan-out's backend calls failed.
    ///
    /// Writes that succeeded are kept.
    #[error("partial failure in {operation}: {}", format_failures(.failures))]
    PartialFailure {
        operation: &'static str,
        failures: Vec<BackendFailure>,
    },

    /// The shared fan-out deadline elapsed before the backend answered.
    #[error("{backend} backend timed out after {duration:?}")]
    Timeout {
        backend: BackendKind,
        duration: Duration,
    },

    /// Persistence I/O failure.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A persisted file could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors (e.g. a panicked fan-out task).
    #[error("internal error: {0}")]
    Internal(String),
}

impl PolymemError {
    /// Shorthand for a [`PolymemError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true for [`PolymemError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the per-backend failures carried by a partial failure, if any.
    pub fn failures(&self) -> &[BackendFailure] {
        match self {
            Self::PartialFailure { failures, .. } => failures,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for PolymemError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            source: Box::new(err),
        }
    }
}

/// One backend's share of a fan-out failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendFailure {
    /// Which view failed.
    pub backend: BackendKind,
    /// Rendered error message.
    pub message: String,
}

impl BackendFailure {
    pub fn new(backend: BackendKind, error: &PolymemError) -> Self {
        Self {
            backend,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.message)
    }
}

fn format_failures(failures: &[BackendFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
