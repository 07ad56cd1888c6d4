// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph state: node and edge records plus the derived adjacency map.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use polymem_core::types::{Edge, Node};

/// Nodes, edges, and the adjacency map derived from the edges.
///
/// Adjacency maps every node id to the de-duplicated set of ids reachable
/// over one outgoing edge. Every node has an entry, even with no neighbors.
/// It is never persisted.
#[derive(Debug, Default)]
pub struct GraphState {
    pub(crate) nodes: HashMap<String, Node>,
    pub(crate) edges: HashMap<String, Edge>,
    pub(crate) adjacency: HashMap<String, HashSet<String>>,
}

/// On-disk layout: `{"nodes": {id: Node}, "edges": {id: Edge}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Snapshot {
    #[serde(default)]
    nodes: BTreeMap<String, Node>,
    #[serde(default)]
    edges: BTreeMap<String, Edge>,
}

#[derive(Serialize)]
pub(crate) struct SnapshotRef<'a> {
    nodes: BTreeMap<&'a str, &'a Node>,
    edges: BTreeMap<&'a str, &'a Edge>,
}

impl GraphState {
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = Self {
            nodes: snapshot.nodes.into_iter().collect(),
            edges: snapshot.edges.into_iter().collect(),
            adjacency: HashMap::new(),
        };
        state.rebuild_adjacency();
        state
    }

    pub(crate) fn snapshot(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            nodes: self.nodes.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            edges: self.edges.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        }
    }

    /// Recomputes adjacency from scratch out of the edge records.
    pub fn rebuild_adjacency(&mut self) {
        self.adjacency = self
            .nodes
            .keys()
            .map(|id| (id.clone(), HashSet::new()))
            .collect();
        for edge in self.edges.values() {
            self.adjacency
                .entry(edge.from.clone())
                .or_default()
                .insert(edge.to.clone());
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Outgoing neighbor ids of `id`, sorted.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .adjacency
            .get(id)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        out.sort_unstable();
        out
    }

    /// The edge used to step from `from` to `to`.
    ///
    /// Scans every edge; among parallel edges the lightest wins.
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges
            .values()
            .filter(|e| e.from == from && e.to == to)
            .min_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub(crate) fn link(&mut self, from: &str, to: &str) {
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Drops the `from -> to` adjacency link unless another edge still provides it.
    pub(crate) fn unlink_if_unused(&mut self, from: &str, to: &str) {
        let still_linked = self.edges.values().any(|e| e.from == from && e.to == to);
        if !still_linked {
            if let Some(set) = self.adjacency.get_mut(from) {
                set.remove(to);
            }
        }
    }

    /// Removes a node, every incident edge, and every adjacency reference to it.
    ///
    /// Returns the ids of the removed edges.
    pub(crate) fn remove_node_cascading(&mut self, id: &str) -> Vec<String> {
        self.nodes.remove(id);
        let incident: Vec<String> = self
            .edges
            .values()
            .filter(|e| e.from == id || e.to == id)
            .map(|e| e.id.clone())
            .collect();
        for edge_id in &incident {
            self.edges.remove(edge_id);
        }
        self.adjacency.remove(id);
        for set in self.adjacency.values_mut() {
            set.remove(id);
        }
        incident
    }
}

/// Prior versions of the records a write touches. `None` means absent.
#[derive(Debug, Default)]
pub(crate) struct Undo {
    nodes: Vec<(String, Option<Node>)>,
    edges: Vec<(String, Option<Edge>)>,
}

impl Undo {
    pub(crate) fn node(state: &GraphState, id: &str) -> Self {
        Self {
            nodes: vec![(id.to_string(), state.nodes.get(id).cloned())],
            edges: Vec::new(),
        }
    }

    pub(crate) fn edge(state: &GraphState, id: &str) -> Self {
        Self {
            nodes: Vec::new(),
            edges: vec![(id.to_string(), state.edges.get(id).cloned())],
        }
    }

    /// The node plus every edge incident to it.
    pub(crate) fn node_with_edges(state: &GraphState, id: &str) -> Self {
        let mut undo = Self::node(state, id);
        undo.edges = state
            .edges
            .values()
            .filter(|e| e.from == id || e.to == id)
            .map(|e| (e.id.clone(), Some(e.clone())))
            .collect();
        undo
    }
}

impl GraphState {
    /// Puts back every record in `undo` and recomputes adjacency.
    pub(crate) fn restore(&mut self, undo: Undo) {
        for (id, previous) in undo.nodes {
            match previous {
                Some(node) => self.nodes.insert(id, node),
                None => self.nodes.remove(&id),
            };
        }
        for (id, previous) in undo.edges {
            match previous {
                Some(edge) => self.edges.insert(id, edge),
                None => self.edges.remove(&id),
            };
        }
        self.rebuild_adjacency();
    }
}
