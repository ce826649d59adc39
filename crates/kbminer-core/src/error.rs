// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for kbminer.

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across all kbminer adapters and the mining pass.
#[derive(Debug, Error)]
pub enum KbError {
    /// Configuration errors (invalid TOML, bad values, unusable header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Helpdesk database errors (connection refused, bad credentials, query failure).
    #[error("database error: {message}")]
    Database {
        message: String,
        source: Option<BoxedSource>,
    },

    /// AI completion endpoint errors (transport failure, non-200 status, bad body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Ticketing API login was refused or could not be attempted.
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Ticketing API errors after login (article creation, session teardown).
    #[error("knowledge base error: {message}")]
    KnowledgeBase {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Local history file could not be read or appended.
    #[error("history error: {source}")]
    History { source: std::io::Error },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KbError {
    /// Returns true for errors that abort the whole mining pass.
    ///
    /// Per-ticket provider and knowledge base failures only skip the ticket.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, KbError::Provider { .. } | KbError::KnowledgeBase { .. })
    }
}

impl From<std::io::Error> for KbError {
    fn from(source: std::io::Error) -> Self {
        KbError::History { source }
    }
}
