// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express, such as
//! non-empty paths and numeric ranges.

use crate::diagnostic::ConfigError;
use crate::model::PolymemConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates a deserialized configuration.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &PolymemConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let storage = &config.storage;
    for (key, value) in [
        ("storage.data_dir", &storage.data_dir),
        ("storage.vector_file", &storage.vector_file),
        ("storage.graph_file", &storage.graph_file),
        ("storage.text_file", &storage.text_file),
    ] {
        if value.trim().is_empty() {
            fail(format!("{key} must not be empty"));
        }
    }

    let files = [&storage.vector_file, &storage.graph_file, &storage.text_file];
    if files[0] == files[1] || files[0] == files[2] || files[1] == files[2] {
        fail("storage.vector_file, graph_file and text_file must be distinct".to_string());
    }

    if config.views.timeout_ms == 0 {
        fail("views.timeout_ms must be greater than 0".to_string());
    }

    if !config.views.min_score.is_finite() {
        fail(format!(
            "views.min_score must be a finite number, got {}",
            config.views.min_score
        ));
    }

    if !(0.0..=1.0).contains(&config.graph.damping) {
        fail(format!(
            "graph.damping must be within [0, 1], got {}",
            config.graph.damping
        ));
    }

    if config.graph.tolerance.is_nan() || config.graph.tolerance <= 0.0 {
        fail(format!(
            "graph.tolerance must be positive, got {}",
            config.graph.tolerance
        ));
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
