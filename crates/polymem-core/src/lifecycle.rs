// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed/unhealthy state shared by every engine.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PolymemError;
use crate::types::{BackendKind, HealthStatus};

/// Tracks whether a backend may serve calls.
///
/// Closing is permanent. The unhealthy flag is recoverable via [`Lifecycle::mark_healthy`].
#[derive(Debug)]
pub struct Lifecycle {
    kind: BackendKind,
    closed: AtomicBool,
    unhealthy: RwLock<Option<String>>,
}

impl Lifecycle {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            closed: AtomicBool::new(false),
            unhealthy: RwLock::new(None),
        }
    }

    /// Fails with `Closed` or `Unhealthy` when the backend cannot serve calls.
    pub fn ensure_available(&self) -> Result<(), PolymemError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(PolymemError::Closed { backend: self.kind });
        }
        let guard = self.unhealthy.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(reason) => Err(PolymemError::Unhealthy {
                backend: self.kind,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Health check: `Healthy`, or the same error [`Lifecycle::ensure_available`] returns.
    pub fn health(&self) -> Result<HealthStatus, PolymemError> {
        self.ensure_available()?;
        Ok(HealthStatus::Healthy)
    }

    /// Marks the backend closed. Returns `Closed` if it already was.
    pub fn close(&self) -> Result<(), PolymemError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(PolymemError::Closed { backend: self.kind });
        }
        Ok(())
    }

    pub fn mark_unhealthy(&self, reason: impl Into<String>) {
        let mut guard = self.unhealthy.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(reason.into());
    }

    pub fn mark_healthy(&self) {
        let mut guard = self.unhealthy.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}
