// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `polymem` binary against a temporary data directory.
//!
//! Each test writes its own config file, so tests are independent of the
//! user's configuration and of each other.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const CHUNKS: &str = r#"[
  {
    "id": "c1",
    "content": "Ada Lovelace wrote the first algorithm",
    "embedding": [0.9, 0.1, 0.0],
    "metadata": {"topic": "computing"},
    "entities": [
      {"id": "ada", "name": "Ada Lovelace", "type": "person", "confidence": 0.95},
      {"id": "engine", "name": "Analytical Engine", "type": "machine", "confidence": 0.9}
    ],
    "claims": [
      {"id": "k1", "subject": "Ada Lovelace", "predicate": "wrote", "object": "first algorithm", "confidence": 0.8, "evidence": ["c1"]}
    ]
  },
  {
    "id": "c2",
    "content": "Machine learning models learn patterns from data",
    "embedding": [0.0, 0.2, 0.9],
    "entities": [{"id": "ml", "name": "Machine Learning", "type": "field"}]
  }
]"#;

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("polymem.toml");
        let data_dir = dir.path().join("data");
        std::fs::write(
            &config,
            format!(
                "[storage]\ndata_dir = {:?}\n\n[views]\ntimeout_ms = 2000\n\n[logging]\nlevel = \"warn\"\n",
                data_dir.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        polymem(&self.config, args)
    }
}

fn polymem(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polymem"))
        .arg("--config")
        .arg(config)
        .arg("--plain")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn ingest_fixture(ws: &Workspace) {
    let chunks = ws.write("chunks.json", CHUNKS);
    let output = ws.run(&["ingest", chunks.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        stdout(&output).contains("stored 2 chunk(s), 0 partial, 0 rejected"),
        "stdout: {}",
        stdout(&output)
    );
}

#[test]
fn ingest_then_stats_reports_every_view() {
    let ws = Workspace::new();
    ingest_fixture(&ws);

    let output = ws.run(&["stats", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stats: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(stats["vector"]["vectors"], 2);
    assert_eq!(stats["graph"]["nodes"], 4);
    assert_eq!(stats["text"]["documents"], 2);
    assert_eq!(stats["text"]["healthy"], true);
}

#[test]
fn search_merges_views_as_json() {
    let ws = Workspace::new();
    ingest_fixture(&ws);

    let output = ws.run(&[
        "search",
        "lovelace",
        "--graph",
        "--embedding",
        "[1.0, 0.0, 0.0]",
        "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let results: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(results["vector"][0]["id"], "c1");
    assert_eq!(results["text"].as_array().unwrap().len(), 1);
    assert_eq!(results["text"][0]["id"], "c1");
    assert_eq!(results["graph"][0]["id"], "ada");
    assert!(results["errors"].as_array().unwrap().is_empty());
}

#[test]
fn search_with_bad_embedding_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["search", "anything", "--embedding", "not json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--embedding"));
}

#[test]
fn rank_and_communities_read_the_graph() {
    let ws = Workspace::new();
    ingest_fixture(&ws);

    let output = ws.run(&["rank", "--top", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).lines().count(), 2);

    let output = ws.run(&["communities"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("community_entity: 3 entity nodes"), "stdout: {out}");
    assert!(out.contains("community_claim: 1 claim nodes"), "stdout: {out}");
}

#[test]
fn path_without_edges_is_not_found() {
    let ws = Workspace::new();
    ingest_fixture(&ws);

    let output = ws.run(&["path", "ada", "ada"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("ada  (weight 0)"));

    let output = ws.run(&["path", "ada", "ml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("path not found: ada->ml"));
}

#[test]
fn health_reports_all_views() {
    let ws = Workspace::new();
    let output = ws.run(&["health"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    for view in ["vector", "graph", "text"] {
        assert!(out.contains(&format!("{view:<8}[OK]")), "stdout: {out}");
    }
}

#[test]
fn config_typo_exits_with_suggestion() {
    let ws = Workspace::new();
    let bad = ws.write("bad.toml", "[views]\ntimout_ms = 10\n");
    let output = polymem(&bad, &["stats"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("timeout_ms"), "stderr: {}", stderr(&output));
}

#[test]
fn malformed_chunk_file_fails_ingest() {
    let ws = Workspace::new();
    let chunks = ws.write("chunks.json", "{\"not\": \"an array\"}");
    let output = ws.run(&["ingest", chunks.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("serialization error"));
}
