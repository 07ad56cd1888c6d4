// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Highlighted snippets around matched terms.

const ELLIPSIS: &str = "…";

/// Builds a snippet around the first case-insensitive occurrence of `term`
/// as a whole token, so `learn` never matches inside `relearn`.
///
/// Keeps up to `radius` characters on either side, wraps the match in
/// `<em>…</em>`, and marks truncated ends with an ellipsis. Returns `None`
/// when `term` does not occur. `term` must be lowercase ASCII, as produced by
/// the tokenizer.
pub fn snippet(content: &str, term: &str, radius: usize) -> Option<String> {
    if term.is_empty() {
        return None;
    }
    // ASCII lowercasing keeps byte offsets aligned with `content`.
    let lowered = content.to_ascii_lowercase();
    let bytes = lowered.as_bytes();
    let start_of_match = lowered.match_indices(term).map(|(i, _)| i).find(|&i| {
        let before = i.checked_sub(1).and_then(|p| bytes.get(p));
        let after = bytes.get(i + term.len());
        !before.is_some_and(|b| is_token_byte(*b)) && !after.is_some_and(|b| is_token_byte(*b))
    })?;
    let end_of_match = start_of_match + term.len();

    let start = content[..start_of_match]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start_of_match, |(i, _)| i);
    let end = content[end_of_match..]
        .char_indices()
        .nth(radius)
        .map_or(content.len(), |(i, _)| end_of_match + i);

    let mut out = String::with_capacity(end - start + 16);
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(&content[start..start_of_match]);
    out.push_str("<em>");
    out.push_str(&content[start_of_match..end_of_match]);
    out.push_str("</em>");
    out.push_str(&content[end_of_match..end]);
    if end < content.len() {
        out.push_str(ELLIPSIS);
    }
    Some(out)
}

/// Bytes the tokenizer keeps inside a token.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}
