// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpdesk knowledge base reached through its REST API.

use async_trait::async_trait;

use crate::error::KbError;
use crate::types::{CreatedArticle, SessionToken};

/// Session-scoped access to the helpdesk knowledge base.
///
/// Lifecycle: `init_session` -> any number of `create_article` -> `kill_session`.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    fn name(&self) -> &str;

    /// Exchanges the configured credentials for a session token.
    async fn init_session(&self) -> Result<SessionToken, KbError>;

    /// Creates an inactive, unpublished article attributed to `source_ticket_id`.
    async fn create_article(
        &self,
        session: &SessionToken,
        title: &str,
        content: &str,
        source_ticket_id: i64,
    ) -> Result<CreatedArticle, KbError>;

    /// Ends the session. Callers treat failures as non-fatal.
    async fn kill_session(&self, session: &SessionToken) -> Result<(), KbError>;
}
