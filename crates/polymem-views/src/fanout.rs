// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joining spawned backend tasks against one shared deadline.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::warn;

use polymem_core::{BackendFailure, BackendKind, PolymemError};

/// Waits for `handle` until `deadline`.
///
/// An elapsed deadline yields `Timeout` with `budget` as the reported
/// duration. The handle is dropped in that case, which detaches the task
/// without aborting it. A panicked or cancelled task yields `Internal`.
pub async fn join_within<T>(
    backend: BackendKind,
    handle: JoinHandle<Result<T, PolymemError>>,
    deadline: Instant,
    budget: Duration,
) -> Result<T, PolymemError> {
    match tokio::time::timeout_at(deadline, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(PolymemError::Internal(format!(
            "{backend} task failed: {join_err}"
        ))),
        Err(_elapsed) => {
            warn!(%backend, budget_ms = budget.as_millis() as u64, "backend missed fan-out deadline");
            Err(PolymemError::Timeout {
                backend,
                duration: budget,
            })
        }
    }
}

/// Folds per-backend outcomes into `PartialFailure` when any of them failed.
pub fn merge_outcomes(
    operation: &'static str,
    outcomes: Vec<(BackendKind, Result<(), PolymemError>)>,
) -> Result<(), PolymemError> {
    let failures: Vec<BackendFailure> = outcomes
        .iter()
        .filter_map(|(backend, outcome)| {
            outcome
                .as_ref()
                .err()
                .map(|err| BackendFailure::new(*backend, err))
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }
    warn!(operation, failed = failures.len(), "fan-out finished with failures");
    for failure in &failures {
        crate::recording::record_backend_failure(failure.backend, operation);
    }
    Err(PolymemError::PartialFailure {
        operation,
        failures,
    })
}
