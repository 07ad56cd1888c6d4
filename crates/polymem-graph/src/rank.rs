// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph analytics: PageRank and type-partition communities.

use std::collections::{BTreeMap, HashMap};

use polymem_core::PolymemError;
use polymem_core::types::{Community, PageRankOptions};

use crate::state::GraphState;

/// Validates PageRank parameters.
pub fn validate_options(options: &PageRankOptions) -> Result<(), PolymemError> {
    if !(0.0..=1.0).contains(&options.damping) {
        return Err(PolymemError::Validation(format!(
            "damping must be within [0, 1], got {}",
            options.damping
        )));
    }
    if options.tolerance.is_nan() || options.tolerance <= 0.0 {
        return Err(PolymemError::Validation(format!(
            "tolerance must be positive, got {}",
            options.tolerance
        )));
    }
    Ok(())
}

/// Power-iteration PageRank over the adjacency map.
///
/// Nodes without outgoing links spread their damped score uniformly over
/// every node, so the scores keep summing to one.
pub fn page_rank(
    state: &GraphState,
    options: &PageRankOptions,
) -> Result<HashMap<String, f64>, PolymemError> {
    validate_options(options)?;

    let n = state.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }
    let n_f = n as f64;
    let alpha = options.damping;

    let mut scores: HashMap<String, f64> =
        state.nodes.keys().map(|id| (id.clone(), 1.0 / n_f)).collect();

    for iteration in 0..options.max_iterations {
        let mut next: HashMap<String, f64> = state
            .nodes
            .keys()
            .map(|id| (id.clone(), (1.0 - alpha) / n_f))
            .collect();

        let mut dangling = 0.0;
        for (id, score) in &scores {
            let out = state.adjacency.get(id).filter(|set| !set.is_empty());
            match out {
                Some(neighbors) => {
                    let share = alpha * score / neighbors.len() as f64;
                    for neighbor in neighbors {
                        if let Some(slot) = next.get_mut(neighbor) {
                            *slot += share;
                        }
                    }
                }
                None => dangling += alpha * score / n_f,
            }
        }
        if dangling > 0.0 {
            for slot in next.values_mut() {
                *slot += dangling;
            }
        }

        let delta = next
            .iter()
            .map(|(id, v)| (v - scores.get(id).copied().unwrap_or(0.0)).abs())
            .fold(0.0_f64, f64::max);
        scores = next;

        if delta < options.tolerance {
            tracing::debug!(iterations = iteration + 1, "pagerank converged");
            break;
        }
    }

    Ok(scores)
}

/// One community per node type, ordered by type name.
pub fn communities_by_type(state: &GraphState) -> Vec<Community> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for node in state.nodes.values() {
        groups
            .entry(node.node_type.to_string())
            .or_default()
            .push(node.id.clone());
    }

    groups
        .into_iter()
        .map(|(name, mut members)| {
            members.sort();
            Community {
                id: format!("community_{name}"),
                summary: format!("{} {name} nodes", members.len()),
                members,
                score: 1.0,
            }
        })
        .collect()
}
