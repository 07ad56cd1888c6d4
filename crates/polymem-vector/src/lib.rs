// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector view for polymem.
//!
//! An in-memory map of id → embedding, optionally mirrored to a flat JSON
//! file, answering k-nearest-neighbor queries by brute-force cosine
//! similarity with exact-match metadata filters.

pub mod index;
pub mod similarity;

pub use index::VectorIndex;
pub use similarity::cosine_similarity;
