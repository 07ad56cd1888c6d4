// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `polymem ingest` command implementation.

use std::path::Path;

use polymem_core::{Chunk, PolymemError};
use polymem_views::ViewCoordinator;
use tracing::info;

/// Outcome counts for one ingest run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub stored: usize,
    /// Stored in at least one view but not all of them.
    pub partial: usize,
    pub rejected: usize,
}

/// Reads a JSON array of chunks and stores each one.
///
/// Per-chunk failures are reported and counted. Only an unreadable or
/// malformed file fails the command.
pub async fn run_ingest(
    coordinator: &ViewCoordinator,
    file: &Path,
    use_color: bool,
) -> Result<(), PolymemError> {
    let raw = tokio::fs::read_to_string(file).await?;
    let chunks: Vec<Chunk> = serde_json::from_str(&raw)?;
    info!(file = %file.display(), chunks = chunks.len(), "ingesting");

    let summary = ingest_chunks(coordinator, &chunks, use_color).await;
    println!(
        "stored {} chunk(s), {} partial, {} rejected",
        summary.stored, summary.partial, summary.rejected
    );
    Ok(())
}

async fn ingest_chunks(
    coordinator: &ViewCoordinator,
    chunks: &[Chunk],
    use_color: bool,
) -> IngestSummary {
    let mut summary = IngestSummary::default();
    for chunk in chunks {
        match coordinator.store_chunk(chunk).await {
            Ok(()) => summary.stored += 1,
            Err(PolymemError::PartialFailure { failures, .. }) => {
                summary.partial += 1;
                for failure in &failures {
                    print_problem(&chunk.id, &failure.to_string(), use_color);
                }
            }
            Err(e) => {
                summary.rejected += 1;
                print_problem(&chunk.id, &e.to_string(), use_color);
            }
        }
    }
    summary
}

fn print_problem(chunk_id: &str, message: &str, use_color: bool) {
    if use_color {
        use colored::Colorize;
        eprintln!("  {} {chunk_id}: {message}", "!".yellow());
    } else {
        eprintln!("  [WARN] {chunk_id}: {message}");
    }
}
