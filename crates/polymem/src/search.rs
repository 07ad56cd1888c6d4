// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `polymem search` command implementation.

use polymem_config::model::PolymemConfig;
use polymem_core::PolymemError;
use polymem_views::{MultiViewResults, RetrievalOptions, ViewCoordinator};

use crate::SearchArgs;

pub async fn run_search(
    coordinator: &ViewCoordinator,
    config: &PolymemConfig,
    args: SearchArgs,
    use_color: bool,
) -> Result<(), PolymemError> {
    let embedding = parse_embedding(args.embedding.as_deref())?;
    let options = RetrievalOptions {
        max_results: args.limit.unwrap_or(config.views.default_max_results),
        include_graph: args.graph,
        filters: None,
        min_score: args.min_score.unwrap_or(config.views.min_score),
        highlight: args.highlight,
    };

    let results = coordinator
        .retrieve_multi_view(&args.query, &embedding, &options)
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results, use_color);
    }
    Ok(())
}

/// Parses `--embedding` as a JSON array of numbers. Absent means no vector lookup.
fn parse_embedding(raw: Option<&str>) -> Result<Vec<f32>, PolymemError> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| {
            PolymemError::Validation(format!("--embedding must be a JSON array of numbers: {e}"))
        }),
    }
}

fn print_results(results: &MultiViewResults, use_color: bool) {
    use colored::Colorize;

    let heading = |title: &str, count: usize| {
        let line = format!("{title} ({count})");
        if use_color {
            println!("{}", line.bold());
        } else {
            println!("{line}");
        }
    };

    heading("vector", results.vector.len());
    for m in &results.vector {
        println!("  {:.4}  {}", m.score, m.id);
    }

    heading("text", results.text.len());
    for hit in &results.text {
        println!("  {:.1}  {}", hit.score, hit.id);
        for snippet in &hit.highlights {
            println!("        {snippet}");
        }
    }

    if !results.graph.is_empty() {
        heading("graph", results.graph.len());
        for node in &results.graph {
            let name = node
                .property("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            println!("  {}  {name}", node.id);
        }
    }

    for failure in &results.errors {
        if use_color {
            eprintln!("{} {failure}", "✗".red());
        } else {
            eprintln!("[FAIL] {failure}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_embedding_is_empty() {
        assert!(parse_embedding(None).unwrap().is_empty());
    }

    #[test]
    fn embedding_parses_from_json() {
        assert_eq!(parse_embedding(Some("[0.5, 1, -2]")).unwrap(), vec![0.5, 1.0, -2.0]);
    }

    #[test]
    fn malformed_embedding_is_a_validation_error() {
        let err = parse_embedding(Some("0.5, 1")).unwrap_err();
        assert!(matches!(err, PolymemError::Validation(msg) if msg.contains("--embedding")));
    }
}
