// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Breadth-first path enumeration.
//!
//! Paths grow from `from` through a FIFO queue. A node is marked visited the
//! first time a path ending in it is dequeued, and is never expanded again, so
//! only the earliest-discovered route through any intermediate node survives.
//! The target is never marked: every path that reaches it is emitted. The
//! result is a bounded forest of earliest paths, not every simple path.

use std::collections::{HashSet, VecDeque};

use polymem_core::types::{Path, TraversalOptions};

use crate::state::GraphState;

/// Enumerates paths from `from` to `to`, cheapest first.
///
/// Callers must check that both endpoints exist. `from == to` yields a single
/// zero-cost path with no edges. `max_depth` bounds the edge count and
/// `max_results` the output length; zero disables either bound.
pub fn find_paths(state: &GraphState, from: &str, to: &str, options: &TraversalOptions) -> Vec<Path> {
    if from == to {
        return vec![Path {
            nodes: vec![from.to_string()],
            edges: Vec::new(),
            weight: 0.0,
        }];
    }

    let mut queue = VecDeque::new();
    queue.push_back(Path {
        nodes: vec![from.to_string()],
        edges: Vec::new(),
        weight: 0.0,
    });
    let mut visited: HashSet<String> = HashSet::new();
    let mut found = Vec::new();

    while let Some(path) = queue.pop_front() {
        let Some(current) = path.nodes.last().cloned() else {
            continue;
        };

        if current == to {
            found.push(path);
            continue;
        }

        if !visited.insert(current.clone()) {
            continue;
        }

        if options.max_depth > 0 && path.edges.len() >= options.max_depth {
            continue;
        }

        for next in state.neighbors(&current) {
            if visited.contains(next) {
                continue;
            }
            let Some(edge) = state.edge_between(&current, next) else {
                continue;
            };

            let mut extended = path.clone();
            extended.nodes.push(next.to_string());
            extended.edges.push(edge.id.clone());
            extended.weight += edge.weight;
            queue.push_back(extended);
        }
    }

    found.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal));
    if options.max_results > 0 {
        found.truncate(options.max_results);
    }
    found
}
