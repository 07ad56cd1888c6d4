// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! `./polymem.toml` > `~/.config/polymem/polymem.toml` > `/etc/polymem/polymem.toml`,
//! with `POLYMEM_` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::PolymemConfig;

pub const SYSTEM_CONFIG: &str = "/etc/polymem/polymem.toml";
pub const LOCAL_CONFIG: &str = "polymem.toml";
const ENV_PREFIX: &str = "POLYMEM_";
const SECTIONS: &[&str] = &["storage", "views", "graph", "text", "logging"];

/// `~/.config/polymem/polymem.toml`, when a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("polymem").join("polymem.toml"))
}

/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/polymem/polymem.toml`
/// 3. `~/.config/polymem/polymem.toml`
/// 4. `./polymem.toml`
/// 5. `POLYMEM_*` environment variables
pub fn build_figment() -> Figment {
    let user = user_config_path().unwrap_or_default();
    let present: Vec<String> = [Path::new(SYSTEM_CONFIG), user.as_path(), Path::new(LOCAL_CONFIG)]
        .into_iter()
        .filter(|p| p.is_file())
        .map(|p| p.display().to_string())
        .collect();
    debug!(files = ?present, "merging config layers");

    Figment::new()
        .merge(Serialized::defaults(PolymemConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

pub fn load_config() -> Result<PolymemConfig, figment::Error> {
    build_figment().extract()
}

/// Defaults plus one TOML string. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<PolymemConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PolymemConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Defaults plus one explicit file, with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<PolymemConfig, figment::Error> {
    debug!(path = %path.display(), exists = path.is_file(), "merging explicit config file");
    Figment::new()
        .merge(Serialized::defaults(PolymemConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Maps `POLYMEM_VIEWS_TIMEOUT_MS` to `views.timeout_ms`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// underscored keys stay intact.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
