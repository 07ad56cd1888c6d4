// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `polymem rank`, `communities`, and `path` command implementations.

use std::cmp::Ordering;
use std::collections::HashMap;

use polymem_config::model::PolymemConfig;
use polymem_core::PolymemError;
use polymem_core::types::PageRankOptions;
use polymem_views::ViewCoordinator;

pub async fn run_rank(
    coordinator: &ViewCoordinator,
    config: &PolymemConfig,
    top: usize,
) -> Result<(), PolymemError> {
    let options = PageRankOptions {
        damping: config.graph.damping,
        tolerance: config.graph.tolerance,
        max_iterations: config.graph.max_iterations,
    };
    let scores = coordinator.page_rank(&options).await?;
    for (id, score) in top_ranked(scores, top) {
        println!("{score:.6}  {id}");
    }
    Ok(())
}

pub async fn run_communities(coordinator: &ViewCoordinator) -> Result<(), PolymemError> {
    for community in coordinator.community_detection().await? {
        println!("{}: {}", community.id, community.summary);
        println!("  {}", community.members.join(", "));
    }
    Ok(())
}

pub async fn run_path(coordinator: &ViewCoordinator, from: &str, to: &str) -> Result<(), PolymemError> {
    let path = coordinator.shortest_path(from, to).await?;
    println!("{}  (weight {})", path.nodes.join(" -> "), path.weight);
    Ok(())
}

/// Highest scores first, ties by id. `top == 0` keeps everything.
fn top_ranked(scores: HashMap<String, f64>, top: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    if top > 0 {
        ranked.truncate(top);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_ranked_orders_and_truncates() {
        let scores = HashMap::from([
            ("b".to_string(), 0.25),
            ("a".to_string(), 0.25),
            ("hub".to_string(), 0.5),
        ]);
        let ranked = top_ranked(scores.clone(), 2);
        assert_eq!(ranked, vec![("hub".to_string(), 0.5), ("a".to_string(), 0.25)]);
        assert_eq!(top_ranked(scores, 0).len(), 3);
    }
}
