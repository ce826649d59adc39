// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for kbminer.
//!
//! Holds the error type, the domain types that flow through a mining pass,
//! and the adapter traits implemented by the database, AI, and helpdesk crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::KbError;
pub use traits::{ArticleGenerator, KnowledgeBase, TicketSource};
pub use types::{ArticleDraft, CreatedArticle, RunOutcome, RunSummary, SessionToken, Ticket};
