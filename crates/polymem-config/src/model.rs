// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a mistyped key is
//! reported at startup instead of silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level polymem configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolymemConfig {
    /// Where the three engines keep their JSON files.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Coordinator fan-out settings.
    #[serde(default)]
    pub views: ViewsConfig,

    /// Graph analytics parameters.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Text search settings.
    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistence locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the engine files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_vector_file")]
    pub vector_file: String,

    #[serde(default = "default_graph_file")]
    pub graph_file: String,

    #[serde(default = "default_text_file")]
    pub text_file: String,

    /// When false the engines run purely in memory.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vector_file: default_vector_file(),
            graph_file: default_graph_file(),
            text_file: default_text_file(),
            persist: default_persist(),
        }
    }
}

impl StorageConfig {
    pub fn vector_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.vector_file)
    }

    pub fn graph_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.graph_file)
    }

    pub fn text_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.text_file)
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("polymem"))
        .unwrap_or_else(|| PathBuf::from("polymem-data"))
        .display()
        .to_string()
}

fn default_vector_file() -> String {
    "vectors.json".to_string()
}

fn default_graph_file() -> String {
    "graph.json".to_string()
}

fn default_text_file() -> String {
    "text.json".to_string()
}

fn default_persist() -> bool {
    true
}

/// Coordinator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ViewsConfig {
    /// Shared deadline for one fan-out, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Result cap used when a query does not give one.
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Vector and text hits scoring below this are dropped.
    #[serde(default)]
    pub min_score: f64,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            default_max_results: default_max_results(),
            min_score: 0.0,
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_results() -> usize {
    10
}

/// PageRank parameters used by the CLI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_damping() -> f64 {
    0.85
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextConfig {
    /// Characters kept on each side of a highlighted term.
    #[serde(default = "default_snippet_radius")]
    pub snippet_radius: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            snippet_radius: default_snippet_radius(),
        }
    }
}

fn default_snippet_radius() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
