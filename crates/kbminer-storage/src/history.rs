// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only history of processed ticket identifiers.
//!
//! File format: one identifier per line, no header, no checksum. Entries are
//! never rewritten or removed. Membership is exact string comparison on the
//! trimmed line. A single process owns the file for the duration of a pass;
//! concurrent runs are unsupported and would race on appends.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kbminer_core::KbError;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// In-memory view of the history file plus its on-disk location.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    seen: HashSet<String>,
}

impl HistoryStore {
    /// Load the history at `path`.
    ///
    /// A missing file is an empty history, not an error. Blank lines are skipped.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, KbError> {
        let path = path.as_ref().to_path_buf();

        let seen = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                HashSet::new()
            }
            Err(e) => return Err(KbError::History { source: e }),
        };

        Ok(Self { path, seen })
    }

    /// Returns true if `id` was recorded in this or an earlier run.
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Append `id` to the file and remember it.
    ///
    /// The line is written even if `id` is already known; the file is a log,
    /// deduplication happens at read time.
    pub async fn record(&mut self, id: &str) -> Result<(), KbError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{id}\n").as_bytes()).await?;
        file.flush().await?;

        self.seen.insert(id.to_string());
        debug!(id, path = %self.path.display(), "recorded in history");
        Ok(())
    }

    /// Number of distinct identifiers known.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
