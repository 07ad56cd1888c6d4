// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `polymem stats` and `polymem health` command implementations.

use polymem_core::PolymemError;
use polymem_views::{ViewCoordinator, ViewStats};

pub async fn run_stats(
    coordinator: &ViewCoordinator,
    json: bool,
    use_color: bool,
) -> Result<(), PolymemError> {
    let stats = coordinator.get_stats().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats, use_color);
    }
    Ok(())
}

/// Fails with the coordinator's `PartialFailure` when any view is unhealthy.
pub async fn run_health(coordinator: &ViewCoordinator, use_color: bool) -> Result<(), PolymemError> {
    let outcome = coordinator.health_check().await;
    let failed: Vec<String> = outcome
        .as_ref()
        .err()
        .map(|e| e.failures().iter().map(|f| f.backend.to_string()).collect())
        .unwrap_or_default();

    println!();
    println!("  polymem health");
    println!("  {}", "-".repeat(35));
    for view in ["vector", "graph", "text"] {
        let ok = !failed.iter().any(|f| f == view);
        println!("    {view:<8}{}", status_mark(ok, use_color));
    }
    println!();
    outcome
}

fn print_stats(stats: &ViewStats, use_color: bool) {
    println!();
    println!("  polymem stats");
    println!("  {}", "-".repeat(35));
    println!(
        "    vector  {}  {} vectors",
        status_mark(stats.vector.healthy, use_color),
        stats.vector.vectors
    );
    println!(
        "    graph   {}  {} nodes, {} edges",
        status_mark(stats.graph.healthy, use_color),
        stats.graph.nodes,
        stats.graph.edges
    );
    println!(
        "    text    {}  {} documents, {} bytes",
        status_mark(stats.text.healthy, use_color),
        stats.text.documents,
        stats.text.index_bytes
    );
    println!();
}

fn status_mark(ok: bool, use_color: bool) -> String {
    use colored::Colorize;

    match (ok, use_color) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (true, false) => "[OK]".to_string(),
        (false, false) => "[FAIL]".to_string(),
    }
}
