// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock knowledge base that records every call.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use kbminer_core::{CreatedArticle, KbError, KnowledgeBase, SessionToken};
use tokio::sync::Mutex;

const MOCK_SESSION: &str = "mock-session-token-0123456789";

/// One successful `create_article` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    pub article_id: u64,
    pub source_ticket_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Default)]
pub struct MockKnowledgeBase {
    reject_auth: bool,
    fail_for: HashSet<i64>,
    created: Arc<Mutex<Vec<CreatedRecord>>>,
    create_attempts: AtomicUsize,
    sessions_opened: AtomicUsize,
    sessions_closed: AtomicUsize,
    next_id: AtomicU64,
}

impl MockKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `init_session` fail like a rejected user token.
    pub fn rejecting_auth(mut self) -> Self {
        self.reject_auth = true;
        self
    }

    /// Make article creation for `ticket_id` fail with a non-201 status.
    pub fn failing_for(mut self, ticket_id: i64) -> Self {
        self.fail_for.insert(ticket_id);
        self
    }

    pub async fn created(&self) -> Vec<CreatedRecord> {
        self.created.lock().await.clone()
    }

    pub fn create_attempts(&self) -> usize {
        self.create_attempts.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    fn name(&self) -> &str {
        "mock-knowledge-base"
    }

    async fn init_session(&self) -> Result<SessionToken, KbError> {
        if self.reject_auth {
            return Err(KbError::Auth {
                message: "initSession returned 401 Unauthorized".into(),
                source: None,
            });
        }
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(SessionToken::new(MOCK_SESSION))
    }

    async fn create_article(
        &self,
        session: &SessionToken,
        title: &str,
        content: &str,
        source_ticket_id: i64,
    ) -> Result<CreatedArticle, KbError> {
        self.create_attempts.fetch_add(1, Ordering::SeqCst);
        if session.expose() != MOCK_SESSION {
            return Err(KbError::KnowledgeBase {
                message: "401 invalid session".into(),
                source: None,
            });
        }
        if self.fail_for.contains(&source_ticket_id) {
            return Err(KbError::KnowledgeBase {
                message: "KnowbaseItem returned 400 Bad Request".into(),
                source: None,
            });
        }

        let article_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.created.lock().await.push(CreatedRecord {
            article_id,
            source_ticket_id,
            title: title.to_string(),
            content: content.to_string(),
        });
        Ok(CreatedArticle { id: article_id })
    }

    async fn kill_session(&self, _session: &SessionToken) -> Result<(), KbError> {
        self.sessions_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
