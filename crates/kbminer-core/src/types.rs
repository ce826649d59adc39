// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across kbminer crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved incident ticket read from the helpdesk database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Helpdesk ticket identifier.
    pub id: i64,
    /// Ticket title as entered by the requester.
    pub title: String,
    /// Text of the solution recorded when the ticket was closed.
    pub resolution: String,
}

impl Ticket {
    /// The identifier as recorded in the history file.
    pub fn history_key(&self) -> String {
        self.id.to_string()
    }
}

/// Outcome of asking the AI to turn a ticket into a knowledge-base article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleDraft {
    /// An actionable incident, summarized into an article.
    Article {
        /// Human-readable article title.
        title: String,
        /// Article body as HTML.
        content: String,
    },
    /// Not an incident (project, meeting, task); nothing to publish.
    Ignore,
}

impl ArticleDraft {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ArticleDraft::Ignore)
    }
}

/// Identifier assigned by the helpdesk to a newly created article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedArticle {
    pub id: u64,
}

/// Session credential returned by the ticketing API login call.
///
/// `Debug` and `Display` only ever show a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First ten characters of the token, safe to log.
    pub fn preview(&self) -> &str {
        match self.0.char_indices().nth(10) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}...)", self.preview())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...", self.preview())
    }
}

/// Counters reported to the operator at the end of a mining pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows returned by the ticket query.
    pub fetched: usize,
    /// Rows skipped because their id was already in history.
    pub already_processed: usize,
    /// Rows handed to the AI step.
    pub candidates: usize,
    /// Articles created in the knowledge base (and recorded in history).
    pub created: usize,
    /// Tickets the AI classified as not being incidents.
    pub ignored: usize,
    /// Tickets skipped because generation or creation failed.
    pub failed: usize,
}

/// How a mining pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every fetched ticket was already in history; no session was opened.
    NothingNew { fetched: usize },
    /// The pass processed at least one new ticket.
    Completed(RunSummary),
}
