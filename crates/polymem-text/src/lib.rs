// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text view for polymem.
//!
//! Documents are split into lowercase alphanumeric tokens and indexed in a
//! token → document-id inverted index. A query scores each document by the
//! number of distinct query terms it contains.

pub mod highlight;
pub mod index;
pub mod tokenizer;

pub use highlight::snippet;
pub use index::TextIndex;
pub use tokenizer::tokenize;
