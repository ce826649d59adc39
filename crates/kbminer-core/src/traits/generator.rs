// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a resolved ticket into a knowledge-base article draft.

use async_trait::async_trait;

use crate::error::KbError;
use crate::types::{ArticleDraft, Ticket};

/// AI-backed article generation.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Classifies the ticket and, for incidents, drafts an article.
    ///
    /// `Ok(None)` means the model answered but no usable JSON object could be
    /// extracted. `Err` covers transport failures and non-success statuses.
    async fn generate(&self, ticket: &Ticket) -> Result<Option<ArticleDraft>, KbError>;
}
