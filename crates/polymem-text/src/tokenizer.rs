// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenization shared by indexing and querying.

use std::collections::HashSet;

/// Lowercases `text` and splits it on every character outside `[a-z0-9]`.
///
/// Empty pieces are dropped. Non-ASCII letters act as separators, so every
/// token is plain ASCII.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens of `text` with duplicates removed, first occurrence order kept.
pub fn unique_terms(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
