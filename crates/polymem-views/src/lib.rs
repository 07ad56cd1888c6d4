// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-view coordination for polymem.
//!
//! [`ViewCoordinator`] writes each chunk to the vector, text, and graph views
//! concurrently and answers queries by consulting all of them at once. One
//! slow or failing view never hides the others: failures come back alongside
//! whatever the healthy views produced.

pub mod coordinator;
pub mod fanout;
pub mod recording;
pub mod types;

pub use coordinator::ViewCoordinator;
pub use types::{GraphStats, MultiViewResults, RetrievalOptions, TextStats, VectorStats, ViewStats};
