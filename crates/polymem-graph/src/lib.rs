// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph view for polymem.
//!
//! Typed nodes and weighted, directed edges held in memory behind one
//! reader/writer lock, with a derived adjacency map maintained on every write
//! and rebuilt on load.
//!
//! ## Algorithms
//!
//! - **Paths**: breadth-first enumeration of earliest-discovered paths, sorted by weight
//! - **PageRank**: power iteration with uniform redistribution of dangling mass
//! - **Communities**: partition of nodes by type

pub mod paths;
pub mod rank;
pub mod state;
pub mod store;

pub use state::GraphState;
pub use store::GraphIndex;
