// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all storage backends implement.

use async_trait::async_trait;

use crate::error::PolymemError;
use crate::types::{BackendKind, HealthStatus};

/// The base trait for every storage view.
///
/// Provides identity, health, and lifecycle. Closing is permanent: every call
/// made after [`BackendAdapter::close`] fails with [`PolymemError::Closed`].
///
/// A mutation that returns an error leaves no trace. If the backend's state
/// cannot be persisted, the in-memory change is undone before the error is
/// returned.
#[async_trait]
pub trait BackendAdapter: Send + Sync + 'static {
    /// Human-readable name of this backend instance.
    fn name(&self) -> &str;

    /// Which view this backend serves.
    fn kind(&self) -> BackendKind;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, PolymemError>;

    /// Closes the backend.
    async fn close(&self) -> Result<(), PolymemError>;
}
