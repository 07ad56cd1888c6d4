// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-document JSON persistence shared by the file-backed engines.
//!
//! Every engine snapshot is one pretty-printed JSON document. There is no
//! incremental log: each successful mutation rewrites the full file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PolymemError;

/// A JSON document on disk holding one engine's full state.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the document.
    ///
    /// A missing or empty (whitespace-only) file decodes to `T::default()`.
    /// Malformed JSON is an error.
    pub async fn load<T>(&self) -> Result<T, PolymemError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted state, starting empty");
                return Ok(T::default());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(T::default());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// Encode and write the document, replacing any previous contents.
    ///
    /// Writes to a sibling temp file first and renames it into place.
    pub async fn save<T>(&self, value: &T) -> Result<(), PolymemError>
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string_pretty(value)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, encoded).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "persisted state");
        Ok(())
    }
}
